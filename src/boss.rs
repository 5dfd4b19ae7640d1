//! Boss behaviour: a phased state machine shared by five bosses that differ
//! only in their profile table.
//!
//! Phases run `Entering → InCombat → Dying → Removed`. Hit-points live on the
//! owning [`crate::enemy::Enemy`]; the boss is told about damage through
//! [`Boss::on_damaged`] and reports the end of its death sequence through
//! [`BossUpdate::finished`].

use glam::Vec2;
use rand::Rng;
use tracing::{debug, info};

use crate::constants::*;
use crate::geometry::{aim, direction_from_down, rotate, vec, Rect};
use crate::projectile::{self, fan_angles, Projectile, ProjectileKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossKind {
    Sentinel,
    Hydra,
    Tempest,
    Colossus,
    Overmind,
}

impl BossKind {
    pub const ALL: [BossKind; 5] = [
        BossKind::Sentinel,
        BossKind::Hydra,
        BossKind::Tempest,
        BossKind::Colossus,
        BossKind::Overmind,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BossKind::Sentinel => "Sentinel",
            BossKind::Hydra => "Hydra",
            BossKind::Tempest => "Tempest",
            BossKind::Colossus => "Colossus",
            BossKind::Overmind => "Overmind",
        }
    }

    pub fn profile(&self) -> &'static BossProfile {
        match self {
            BossKind::Sentinel => &SENTINEL,
            BossKind::Hydra => &HYDRA,
            BossKind::Tempest => &TEMPEST,
            BossKind::Colossus => &COLOSSUS,
            BossKind::Overmind => &OVERMIND,
        }
    }
}

/// One volley shape. Every pattern resolves to an origin plus a list of
/// directions, one projectile per direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttackPattern {
    /// Single shot straight at the player.
    Aimed,
    /// Fixed-angle fan centred on straight down.
    Fan { count: u32, spread: f32 },
    /// Evenly spaced full circle.
    Ring { count: u32 },
    /// Aimed shots from horizontally offset muzzles.
    Burst { count: u32, gap: f32 },
    Homing { count: u32 },
    BounceFan { count: u32, spread: f32 },
    SplitBomb,
    ZigzagFan { count: u32, spread: f32 },
    /// Lobbed upward, falls back under gravity.
    GravityRain { count: u32 },
    TeleportVolley { count: u32 },
}

impl AttackPattern {
    pub fn fire(&self, origin: Vec2, target: Vec2, speed: f32) -> Vec<Projectile> {
        let down = Vec2::new(0.0, 1.0);
        let shot =
            |dir: Vec2, kind: ProjectileKind| Projectile::boss_shot(origin, dir, speed, kind);
        match *self {
            AttackPattern::Aimed => vec![shot(aim(origin, target), ProjectileKind::Straight)],
            AttackPattern::Fan { count, spread } => fan_angles(count, spread)
                .into_iter()
                .map(|angle| shot(direction_from_down(angle), ProjectileKind::Straight))
                .collect(),
            AttackPattern::Ring { count } => (0..count)
                .map(|i| {
                    let angle = 360.0 * i as f32 / count as f32;
                    shot(rotate(down, angle), ProjectileKind::Straight)
                })
                .collect(),
            AttackPattern::Burst { count, gap } => {
                let half = gap * (count.saturating_sub(1)) as f32 / 2.0;
                (0..count)
                    .map(|i| {
                        let muzzle = origin + Vec2::new(-half + gap * i as f32, 0.0);
                        Projectile::boss_shot(
                            muzzle,
                            aim(muzzle, target),
                            speed,
                            ProjectileKind::Straight,
                        )
                    })
                    .collect()
            }
            AttackPattern::Homing { count } => fan_angles(count, 90.0)
                .into_iter()
                .map(|angle| shot(direction_from_down(angle), projectile::homing()))
                .collect(),
            AttackPattern::BounceFan { count, spread } => fan_angles(count, spread)
                .into_iter()
                .map(|angle| shot(direction_from_down(angle), projectile::bouncing()))
                .collect(),
            AttackPattern::SplitBomb => vec![shot(aim(origin, target), projectile::splitting())],
            AttackPattern::ZigzagFan { count, spread } => fan_angles(count, spread)
                .into_iter()
                .map(|angle| shot(direction_from_down(angle), projectile::zigzag()))
                .collect(),
            AttackPattern::GravityRain { count } => fan_angles(count, 120.0)
                .into_iter()
                .map(|angle| shot(rotate(Vec2::new(0.0, -1.0), angle), projectile::gravity()))
                .collect(),
            AttackPattern::TeleportVolley { count } => fan_angles(count, 40.0)
                .into_iter()
                .map(|angle| shot(direction_from_down(angle), projectile::teleporting()))
                .collect(),
        }
    }
}

#[derive(Debug)]
pub struct BossProfile {
    pub max_hp: i32,
    pub size: (f32, f32),
    pub speed: f32,
    /// Altitude of the centre once the entry dive ends.
    pub combat_y: f32,
    pub shoot_cooldown: u32,
    pub pattern_period: u32,
    pub shot_speed: f32,
    pub contact_damage: i32,
    pub attacks: &'static [AttackPattern],
}

// ── Boss tables ───────────────────────────────────────────────────────────────

static SENTINEL: BossProfile = BossProfile {
    max_hp: 20,
    size: (160.0, 120.0),
    speed: 2.0,
    combat_y: 160.0,
    shoot_cooldown: 50,
    pattern_period: 240,
    shot_speed: 5.0,
    contact_damage: 2,
    attacks: &[
        AttackPattern::Aimed,
        AttackPattern::Fan { count: 5, spread: 60.0 },
        AttackPattern::Ring { count: 12 },
    ],
};

static HYDRA: BossProfile = BossProfile {
    max_hp: 40,
    size: (200.0, 130.0),
    speed: 2.5,
    combat_y: 170.0,
    shoot_cooldown: 45,
    pattern_period: 210,
    shot_speed: 5.5,
    contact_damage: 2,
    attacks: &[
        AttackPattern::Fan { count: 7, spread: 90.0 },
        AttackPattern::Homing { count: 2 },
        AttackPattern::Burst { count: 3, gap: 50.0 },
    ],
};

static TEMPEST: BossProfile = BossProfile {
    max_hp: 60,
    size: (180.0, 140.0),
    speed: 3.5,
    combat_y: 180.0,
    shoot_cooldown: 40,
    pattern_period: 200,
    shot_speed: 6.0,
    contact_damage: 3,
    attacks: &[
        AttackPattern::Ring { count: 16 },
        AttackPattern::BounceFan { count: 5, spread: 100.0 },
        AttackPattern::ZigzagFan { count: 4, spread: 50.0 },
    ],
};

static COLOSSUS: BossProfile = BossProfile {
    max_hp: 80,
    size: (260.0, 160.0),
    speed: 1.5,
    combat_y: 190.0,
    shoot_cooldown: 55,
    pattern_period: 240,
    shot_speed: 4.5,
    contact_damage: 4,
    attacks: &[
        AttackPattern::SplitBomb,
        AttackPattern::GravityRain { count: 7 },
        AttackPattern::Burst { count: 5, gap: 45.0 },
    ],
};

static OVERMIND: BossProfile = BossProfile {
    max_hp: 100,
    size: (220.0, 180.0),
    speed: 3.0,
    combat_y: 200.0,
    shoot_cooldown: 35,
    pattern_period: 180,
    shot_speed: 6.0,
    contact_damage: 5,
    attacks: &[
        AttackPattern::TeleportVolley { count: 3 },
        AttackPattern::Ring { count: 24 },
        AttackPattern::Homing { count: 4 },
        AttackPattern::Fan { count: 9, spread: 120.0 },
    ],
};

// ── State machine ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossPhase {
    Entering,
    InCombat,
    Dying,
    Removed,
}

/// Cosmetic pose. Damage flash pre-empts the shooting pose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BossAnim {
    Idle,
    Shooting { until: u32 },
    DamageFlash { until: u32 },
}

/// Everything a boss produced during one tick.
#[derive(Debug, Default)]
pub struct BossUpdate {
    pub shots: Vec<Projectile>,
    pub explosions: Vec<Vec2>,
    /// Set exactly once, on the tick the death sequence completes.
    pub finished: bool,
}

#[derive(Clone, Debug)]
pub struct Boss {
    pub kind: BossKind,
    pub phase: BossPhase,
    pub anim: BossAnim,
    /// +1 moving right, -1 moving left.
    pub direction: f32,
    pub combat_started: u32,
    pub last_shot: u32,
    pub death_started: u32,
    pub next_explosion: u32,
    /// Unit vector from the boss towards the player; drives the eye sprite.
    pub gaze: Vec2,
}

impl Boss {
    pub fn new(kind: BossKind) -> Self {
        Self {
            kind,
            phase: BossPhase::Entering,
            anim: BossAnim::Idle,
            direction: 1.0,
            combat_started: 0,
            last_shot: 0,
            death_started: 0,
            next_explosion: 0,
            gaze: Vec2::new(0.0, 1.0),
        }
    }

    pub fn profile(&self) -> &'static BossProfile {
        self.kind.profile()
    }

    pub fn size(&self) -> Vec2 {
        vec(self.profile().size)
    }

    /// Spawn point: centred horizontally, just above the field.
    pub fn spawn_position(kind: BossKind) -> Vec2 {
        Vec2::new(FIELD_WIDTH / 2.0, -kind.profile().size.1 / 2.0)
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.phase, BossPhase::Dying | BossPhase::Removed)
    }

    /// Index of the attack in use at `now`.
    pub fn attack_index(&self, now: u32) -> usize {
        let profile = self.profile();
        let elapsed = now.saturating_sub(self.combat_started);
        (elapsed / profile.pattern_period.max(1)) as usize % profile.attacks.len()
    }

    /// Called after hit-points were reduced to `hp_left`. Always restarts the
    /// flash; returns `true` only on the tick the boss starts dying.
    pub fn on_damaged(&mut self, hp_left: i32, now: u32) -> bool {
        self.anim = BossAnim::DamageFlash {
            until: now + BOSS_FLASH_TICKS,
        };
        if hp_left <= 0 && !self.is_dying() {
            self.phase = BossPhase::Dying;
            self.death_started = now;
            self.next_explosion = now;
            info!(boss = self.kind.name(), tick = now, "boss destroyed, death sequence started");
            return true;
        }
        false
    }

    pub fn animation_frame(&self) -> u32 {
        match self.anim {
            BossAnim::Idle => 0,
            BossAnim::Shooting { .. } => 1,
            BossAnim::DamageFlash { .. } => 2,
        }
    }

    fn settle_anim(&mut self, now: u32) {
        match self.anim {
            BossAnim::Shooting { until } | BossAnim::DamageFlash { until } if now >= until => {
                self.anim = BossAnim::Idle;
            }
            _ => {}
        }
    }

    pub fn update(
        &mut self,
        pos: &mut Vec2,
        now: u32,
        target: Vec2,
        rng: &mut impl Rng,
    ) -> BossUpdate {
        let mut out = BossUpdate::default();
        match self.phase {
            BossPhase::Entering => {
                self.settle_anim(now);
                let combat_y = self.profile().combat_y;
                pos.y = (pos.y + BOSS_ENTRY_SPEED).min(combat_y);
                if pos.y >= combat_y {
                    self.phase = BossPhase::InCombat;
                    self.combat_started = now;
                    self.last_shot = now;
                    debug!(boss = self.kind.name(), tick = now, "boss entered combat");
                }
            }
            BossPhase::InCombat => {
                self.settle_anim(now);
                self.gaze = aim(*pos, target);
                self.sweep(pos);
                out.shots = self.try_attack(*pos, now, target);
            }
            BossPhase::Dying => self.run_death_sequence(*pos, now, rng, &mut out),
            BossPhase::Removed => {}
        }
        out
    }

    fn sweep(&mut self, pos: &mut Vec2) {
        let profile = self.profile();
        let half = profile.size.0 / 2.0;
        pos.x += self.direction * profile.speed;
        if pos.x - half <= 0.0 {
            pos.x = half;
            self.direction = 1.0;
        } else if pos.x + half >= FIELD_WIDTH {
            pos.x = FIELD_WIDTH - half;
            self.direction = -1.0;
        }
    }

    fn try_attack(&mut self, pos: Vec2, now: u32, target: Vec2) -> Vec<Projectile> {
        let profile = self.profile();
        if now.saturating_sub(self.last_shot) < profile.shoot_cooldown {
            return Vec::new();
        }
        self.last_shot = now;

        let pattern = profile.attacks[self.attack_index(now)];
        let origin = Vec2::new(pos.x, pos.y + profile.size.1 / 2.0);
        if !matches!(self.anim, BossAnim::DamageFlash { .. }) {
            self.anim = BossAnim::Shooting {
                until: now + BOSS_SHOOT_ANIM_TICKS,
            };
        }
        pattern.fire(origin, target, profile.shot_speed)
    }

    fn run_death_sequence(
        &mut self,
        pos: Vec2,
        now: u32,
        rng: &mut impl Rng,
        out: &mut BossUpdate,
    ) {
        let elapsed = now.saturating_sub(self.death_started);
        if elapsed >= BOSS_DEATH_TICKS {
            self.phase = BossPhase::Removed;
            self.anim = BossAnim::Idle;
            out.finished = true;
            debug!(boss = self.kind.name(), tick = now, "boss death sequence finished");
            return;
        }

        // Flashes and explosions both speed up as the sequence runs.
        let flash_period = 12u32.saturating_sub(elapsed / 15).max(2);
        self.anim = if (elapsed / flash_period) % 2 == 0 {
            BossAnim::DamageFlash { until: now + 1 }
        } else {
            BossAnim::Idle
        };

        if now >= self.next_explosion {
            let area = Rect::from_center(pos, self.size());
            out.explosions.push(Vec2::new(
                rng.gen_range(area.min.x..area.max.x),
                rng.gen_range(area.min.y..area.max.y),
            ));
            self.next_explosion = now + 18u32.saturating_sub(elapsed / 10).max(3);
        }
    }
}
