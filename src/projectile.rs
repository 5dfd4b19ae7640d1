//! Projectiles: one struct with a closed set of trajectory kinds.

use std::collections::VecDeque;

use glam::Vec2;

use crate::constants::*;
use crate::geometry::{aim, rotate, vec, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// Trajectory behaviour plus the per-kind state it needs.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectileKind {
    Straight,
    Homing { turn_rate: f32, lifetime: u32 },
    Bouncing { bounces_left: u32 },
    Splitting { split_at: u32, children: u32, spread: f32 },
    Zigzag { amplitude: f32, frequency: f32 },
    Gravity { pull: f32 },
    Teleporting { interval: u32 },
}

/// Result of advancing a projectile by one tick.
#[derive(Debug)]
pub enum ProjectileEvent {
    Moved,
    /// Homing lifetime ran out.
    Expired,
    /// The projectile burst; it should be removed and the children added.
    Split(Vec<Projectile>),
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub owner: ProjectileOwner,
    pub damage: i32,
    pub kind: ProjectileKind,
    pub age: u32,
    /// Recent positions, oldest first.
    pub trail: VecDeque<Vec2>,
    /// Set for boss volleys so the renderer can pick a heavier sprite.
    pub heavy: bool,
}

impl Projectile {
    pub fn new(
        pos: Vec2,
        direction: Vec2,
        speed: f32,
        owner: ProjectileOwner,
        kind: ProjectileKind,
    ) -> Self {
        let size = match owner {
            ProjectileOwner::Player => vec(PLAYER_SHOT_SIZE),
            ProjectileOwner::Enemy => vec(ENEMY_SHOT_SIZE),
        };
        Self {
            pos,
            vel: direction.normalize_or_zero() * speed,
            size,
            owner,
            damage: 1,
            kind,
            age: 0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH),
            heavy: false,
        }
    }

    pub fn player_shot(pos: Vec2, direction: Vec2) -> Self {
        Self::new(
            pos,
            direction,
            PLAYER_SHOT_SPEED,
            ProjectileOwner::Player,
            ProjectileKind::Straight,
        )
    }

    pub fn enemy_shot(pos: Vec2, direction: Vec2, kind: ProjectileKind) -> Self {
        Self::new(pos, direction, ENEMY_SHOT_SPEED, ProjectileOwner::Enemy, kind)
    }

    /// Boss volleys are larger than regular enemy fire.
    pub fn boss_shot(pos: Vec2, direction: Vec2, speed: f32, kind: ProjectileKind) -> Self {
        let mut shot = Self::new(pos, direction, speed, ProjectileOwner::Enemy, kind);
        shot.size = vec(BOSS_SHOT_SIZE);
        shot.heavy = true;
        shot
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    pub fn is_off_field(&self) -> bool {
        self.bounds().is_off_field()
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    fn record_trail(&mut self) {
        if self.trail.len() == TRAIL_LENGTH {
            self.trail.pop_front();
        }
        self.trail.push_back(self.pos);
    }

    /// Advance one tick. `target` is the player's current centre, used by
    /// homing shots.
    pub fn update(&mut self, target: Vec2) -> ProjectileEvent {
        self.record_trail();
        self.age += 1;

        match self.kind {
            ProjectileKind::Straight => {
                self.pos += self.vel;
            }
            ProjectileKind::Homing { turn_rate, lifetime } => {
                if self.age >= lifetime {
                    return ProjectileEvent::Expired;
                }
                let speed = self.speed();
                let heading = self.vel.normalize_or_zero();
                let wanted = aim(self.pos, target);
                let steered = (heading + (wanted - heading) * turn_rate).normalize_or_zero();
                if steered != Vec2::ZERO {
                    self.vel = steered * speed;
                }
                self.pos += self.vel;
            }
            ProjectileKind::Bouncing { ref mut bounces_left } => {
                self.pos += self.vel;
                let half = self.size.x * 0.5;
                let hit_left = self.pos.x - half <= 0.0 && self.vel.x < 0.0;
                let hit_right = self.pos.x + half >= FIELD_WIDTH && self.vel.x > 0.0;
                if (hit_left || hit_right) && *bounces_left > 0 {
                    *bounces_left -= 1;
                    self.vel.x = -self.vel.x;
                    self.pos.x = self.pos.x.clamp(half, FIELD_WIDTH - half);
                }
            }
            ProjectileKind::Splitting {
                split_at,
                children,
                spread,
            } => {
                self.pos += self.vel;
                if self.age >= split_at {
                    return ProjectileEvent::Split(self.split_children(children, spread));
                }
            }
            ProjectileKind::Zigzag {
                amplitude,
                frequency,
            } => {
                let before = (self.age as f32 - 1.0) * frequency;
                let after = self.age as f32 * frequency;
                let sideways = amplitude * (after.sin() - before.sin());
                let normal = Vec2::new(-self.vel.y, self.vel.x).normalize_or_zero();
                self.pos += self.vel + normal * sideways;
            }
            ProjectileKind::Gravity { pull } => {
                self.vel.y += pull;
                self.pos += self.vel;
            }
            ProjectileKind::Teleporting { interval } => {
                self.pos += self.vel;
                if interval > 0 && self.age % interval == 0 {
                    self.pos.x = FIELD_WIDTH - self.pos.x;
                    self.trail.clear();
                }
            }
        }

        ProjectileEvent::Moved
    }

    /// Straight children fanned evenly across `spread` degrees around the
    /// current heading.
    fn split_children(&self, children: u32, spread: f32) -> Vec<Projectile> {
        let heading = self.vel.normalize_or_zero();
        let speed = self.speed();
        fan_angles(children, spread)
            .into_iter()
            .map(|angle| {
                let mut child = Projectile::new(
                    self.pos,
                    rotate(heading, angle),
                    speed,
                    self.owner,
                    ProjectileKind::Straight,
                );
                child.damage = self.damage;
                child
            })
            .collect()
    }
}

/// `count` angles spaced evenly over `spread` degrees, centred on zero.
pub fn fan_angles(count: u32, spread: f32) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let step = spread / (n - 1) as f32;
            (0..n).map(|i| -spread / 2.0 + step * i as f32).collect()
        }
    }
}

// ── Kind presets ──────────────────────────────────────────────────────────────

pub fn homing() -> ProjectileKind {
    ProjectileKind::Homing {
        turn_rate: HOMING_TURN_RATE,
        lifetime: HOMING_LIFETIME,
    }
}

pub fn bouncing() -> ProjectileKind {
    ProjectileKind::Bouncing {
        bounces_left: BOUNCE_LIMIT,
    }
}

pub fn splitting() -> ProjectileKind {
    ProjectileKind::Splitting {
        split_at: SPLIT_DELAY,
        children: SPLIT_CHILDREN,
        spread: SPLIT_SPREAD,
    }
}

pub fn zigzag() -> ProjectileKind {
    ProjectileKind::Zigzag {
        amplitude: ZIGZAG_AMPLITUDE,
        frequency: ZIGZAG_FREQUENCY,
    }
}

pub fn gravity() -> ProjectileKind {
    ProjectileKind::Gravity { pull: GRAVITY_PULL }
}

pub fn teleporting() -> ProjectileKind {
    ProjectileKind::Teleporting {
        interval: TELEPORT_INTERVAL,
    }
}
