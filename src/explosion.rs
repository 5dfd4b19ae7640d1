//! Cosmetic explosions. They never take part in collision.

use glam::Vec2;
use rand::Rng;

use crate::constants::{EXPLOSION_PARTICLES, EXPLOSION_TICKS};

/// Number of entries in the renderer's explosion palette.
pub const PALETTE_SIZE: u8 = 4;

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Index into the renderer's palette.
    pub color: u8,
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub pos: Vec2,
    pub spawned_at: u32,
    pub duration: u32,
    pub particles: Vec<Particle>,
}

impl Explosion {
    pub fn new(pos: Vec2, now: u32, rng: &mut impl Rng) -> Self {
        let particles = (0..EXPLOSION_PARTICLES)
            .map(|_| {
                let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                let speed = rng.gen_range(1.0..5.0);
                Particle {
                    pos,
                    vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                    radius: rng.gen_range(3.0..8.0),
                    color: rng.gen_range(0..PALETTE_SIZE),
                }
            })
            .collect();
        Self {
            pos,
            spawned_at: now,
            duration: EXPLOSION_TICKS,
            particles,
        }
    }

    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel *= 0.92;
            particle.radius = (particle.radius - 0.2).max(0.0);
        }
    }

    pub fn elapsed(&self, now: u32) -> u32 {
        now.saturating_sub(self.spawned_at)
    }

    pub fn is_finished(&self, now: u32) -> bool {
        self.elapsed(now) > self.duration
    }
}
