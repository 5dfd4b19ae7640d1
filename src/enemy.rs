//! Enemies: shared kinematics and health, with a closed set of behaviours.

use glam::Vec2;
use rand::Rng;

use crate::boss::{Boss, BossKind};
use crate::constants::*;
use crate::geometry::{aim, vec, Rect};
use crate::patterns::MovementPattern;
use crate::projectile::{Projectile, ProjectileKind};

#[derive(Clone, Debug)]
pub struct Shooter {
    /// Trajectory of every shot this enemy fires.
    pub weapon: ProjectileKind,
    pub cooldown: u32,
    /// Age (in ticks) at which the next shot is due.
    pub next_shot: u32,
}

#[derive(Clone, Debug)]
pub enum EnemyKind {
    Basic,
    Shooter(Shooter),
    Boss(Boss),
}

/// What a hit did to the enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitOutcome {
    Damaged,
    /// A regular enemy ran out of hit-points.
    Destroyed,
    /// A boss just entered its death sequence.
    BossDying,
}

#[derive(Debug, Default)]
pub struct EnemyUpdate {
    pub shots: Vec<Projectile>,
    pub explosions: Vec<Vec2>,
    /// A boss finished its death sequence this tick.
    pub finished: bool,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Vec2,
    /// Spawn position; movement patterns are evaluated relative to it.
    pub anchor: Vec2,
    pub size: Vec2,
    pub hp: i32,
    pub age: u32,
    pub speed: f32,
    pub contact_damage: i32,
    pub pattern: Option<MovementPattern>,
    pub drops_power_up: bool,
    /// Set once any part of the enemy has been inside the field.
    pub entered: bool,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn basic(anchor: Vec2, pattern: Option<MovementPattern>) -> Self {
        Self {
            pos: anchor,
            anchor,
            size: vec(ENEMY_SIZE),
            hp: BASIC_ENEMY_HP,
            age: 0,
            speed: ENEMY_BASE_SPEED,
            contact_damage: ENEMY_CONTACT_DAMAGE,
            pattern,
            drops_power_up: false,
            entered: false,
            kind: EnemyKind::Basic,
        }
    }

    pub fn shooter(anchor: Vec2, pattern: Option<MovementPattern>, weapon: ProjectileKind) -> Self {
        Self {
            hp: SHOOTER_ENEMY_HP,
            kind: EnemyKind::Shooter(Shooter {
                weapon,
                cooldown: SHOOTER_COOLDOWN,
                next_shot: SHOOTER_COOLDOWN / 2,
            }),
            ..Self::basic(anchor, pattern)
        }
    }

    pub fn boss(kind: BossKind) -> Self {
        let profile = kind.profile();
        let pos = Boss::spawn_position(kind);
        Self {
            pos,
            anchor: pos,
            size: vec(profile.size),
            hp: profile.max_hp,
            age: 0,
            speed: profile.speed,
            contact_damage: profile.contact_damage,
            pattern: None,
            drops_power_up: true,
            entered: false,
            kind: EnemyKind::Boss(Boss::new(kind)),
        }
    }

    pub fn with_power_up(mut self, drops: bool) -> Self {
        self.drops_power_up = drops;
        self
    }

    pub fn as_boss(&self) -> Option<&Boss> {
        match &self.kind {
            EnemyKind::Boss(boss) => Some(boss),
            _ => None,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.as_boss().is_some()
    }

    /// Dying bosses neither deal nor receive damage.
    pub fn is_dying(&self) -> bool {
        self.as_boss().map(Boss::is_dying).unwrap_or(false)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Regular enemies leave once they scroll past the bottom, or drift out
    /// of the field on any side after having entered it. Bosses never do.
    pub fn has_left_field(&self) -> bool {
        if self.is_boss() {
            return false;
        }
        let bounds = self.bounds();
        bounds.is_below_field() || (self.entered && bounds.is_off_field())
    }

    pub fn update(&mut self, now: u32, target: Vec2, rng: &mut impl Rng) -> EnemyUpdate {
        self.age += 1;
        let out = self.step(now, target, rng);
        if !self.entered && !self.bounds().is_off_field() {
            self.entered = true;
        }
        out
    }

    fn step(&mut self, now: u32, target: Vec2, rng: &mut impl Rng) -> EnemyUpdate {
        match &mut self.kind {
            EnemyKind::Boss(boss) => {
                let step = boss.update(&mut self.pos, now, target, rng);
                EnemyUpdate {
                    shots: step.shots,
                    explosions: step.explosions,
                    finished: step.finished,
                }
            }
            EnemyKind::Basic => {
                self.pos = next_position(self.pattern.as_ref(), self.anchor, self.speed, self.age);
                EnemyUpdate::default()
            }
            EnemyKind::Shooter(shooter) => {
                self.pos = next_position(self.pattern.as_ref(), self.anchor, self.speed, self.age);
                let mut out = EnemyUpdate::default();
                // Hold fire until the ship is actually on screen.
                if self.age >= shooter.next_shot && self.pos.y > 0.0 {
                    shooter.next_shot = self.age + shooter.cooldown;
                    let muzzle = Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0);
                    out.shots.push(Projectile::enemy_shot(
                        muzzle,
                        aim(muzzle, target),
                        shooter.weapon.clone(),
                    ));
                }
                out
            }
        }
    }

    pub fn take_damage(&mut self, amount: i32, now: u32) -> HitOutcome {
        self.hp -= amount;
        match &mut self.kind {
            EnemyKind::Boss(boss) => {
                if boss.on_damaged(self.hp, now) {
                    HitOutcome::BossDying
                } else {
                    HitOutcome::Damaged
                }
            }
            _ if self.hp <= 0 => HitOutcome::Destroyed,
            _ => HitOutcome::Damaged,
        }
    }
}

fn next_position(pattern: Option<&MovementPattern>, anchor: Vec2, speed: f32, age: u32) -> Vec2 {
    match pattern {
        Some(pattern) => pattern.position_at(anchor, age),
        None => Vec2::new(anchor.x, anchor.y + speed * age as f32),
    }
}
