//! The player's ship: pointer tracking, fire gating, damage immunity and
//! timed weapon upgrades.

use glam::Vec2;
use rand::Rng;

use crate::constants::*;
use crate::entities::PowerKind;
use crate::geometry::{clamp_to_field, rotate, vec, Rect};
use crate::projectile::Projectile;

/// Weapon currently fitted to the ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponPower {
    Normal,
    Double,
    Triple,
    Spread,
}

impl From<PowerKind> for WeaponPower {
    fn from(kind: PowerKind) -> Self {
        match kind {
            PowerKind::Double => WeaponPower::Double,
            PowerKind::Triple => WeaponPower::Triple,
            PowerKind::Spread => WeaponPower::Spread,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ThrusterParticle {
    pub pos: Vec2,
    pub born: u32,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub hp: i32,
    pub last_shot: Option<u32>,
    /// Damage is ignored while `now` is before this tick.
    pub invulnerable_until: Option<u32>,
    pub power: WeaponPower,
    pub power_expires: u32,
    pub thrusters: Vec<ThrusterParticle>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::new(FIELD_WIDTH / 2.0, PLAYER_START_Y))
    }
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            hp: PLAYER_START_HP,
            last_shot: None,
            invulnerable_until: None,
            power: WeaponPower::Normal,
            power_expires: 0,
            thrusters: Vec::new(),
        }
    }

    pub fn size() -> Vec2 {
        vec(PLAYER_SIZE)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Self::size())
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Pointer position maps 1:1 onto the ship centre.
    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pos = clamp_to_field(pointer, Self::size());
    }

    pub fn is_invulnerable(&self, now: u32) -> bool {
        self.invulnerable_until.map(|until| now < until).unwrap_or(false)
    }

    /// Apply damage unless the immunity window is open. Returns whether the
    /// hit landed.
    pub fn take_damage(&mut self, amount: i32, now: u32) -> bool {
        if self.is_invulnerable(now) {
            return false;
        }
        self.hp = (self.hp - amount).max(0);
        self.invulnerable_until = Some(now + INVULNERABILITY_TICKS);
        true
    }

    /// A new pickup replaces whatever is fitted and restarts the timer.
    pub fn apply_power(&mut self, kind: PowerKind, now: u32) {
        self.power = kind.into();
        self.power_expires = now + POWER_DURATION;
    }

    pub fn update(&mut self, now: u32, rng: &mut impl Rng) {
        if self.power != WeaponPower::Normal && now >= self.power_expires {
            self.power = WeaponPower::Normal;
        }
        if !self.is_invulnerable(now) {
            self.invulnerable_until = None;
        }

        self.thrusters
            .retain(|p| now.saturating_sub(p.born) < THRUSTER_LIFETIME);
        for particle in &mut self.thrusters {
            particle.pos.y += 3.0;
        }
        if now % THRUSTER_INTERVAL == 0 {
            let jitter = rng.gen_range(-6.0..6.0);
            self.thrusters.push(ThrusterParticle {
                pos: Vec2::new(self.pos.x + jitter, self.pos.y + PLAYER_SIZE.1 / 2.0),
                born: now,
            });
        }
    }

    pub fn can_fire(&self, now: u32) -> bool {
        self.last_shot
            .map(|last| now.saturating_sub(last) >= FIRE_COOLDOWN)
            .unwrap_or(true)
    }

    /// Honour a fire request if the cooldown has elapsed.
    pub fn try_fire(&mut self, now: u32) -> Vec<Projectile> {
        if !self.can_fire(now) {
            return Vec::new();
        }
        self.last_shot = Some(now);

        let muzzle = Vec2::new(self.pos.x, self.pos.y - PLAYER_SIZE.1 / 2.0);
        let up = Vec2::new(0.0, -1.0);
        let offsets: &[f32] = match self.power {
            WeaponPower::Normal | WeaponPower::Spread => &[0.0],
            WeaponPower::Double => &[-PARALLEL_SHOT_GAP / 2.0, PARALLEL_SHOT_GAP / 2.0],
            WeaponPower::Triple => &[-PARALLEL_SHOT_GAP, 0.0, PARALLEL_SHOT_GAP],
        };
        let mut shots: Vec<Projectile> = offsets
            .iter()
            .map(|dx| Projectile::player_shot(muzzle + Vec2::new(*dx, 0.0), up))
            .collect();

        if self.power == WeaponPower::Spread {
            for angle in [-SPREAD_SHOT_ANGLE, SPREAD_SHOT_ANGLE] {
                shots.push(Projectile::player_shot(muzzle, rotate(up, angle)));
            }
        }
        shots
    }
}
