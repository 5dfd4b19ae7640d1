//! Shared entity types and the master game state.

use glam::Vec2;

use crate::arena::Pool;
use crate::combo::Combo;
use crate::constants::{POWER_UP_FALL_SPEED, POWER_UP_SIZE};
use crate::enemy::Enemy;
use crate::explosion::Explosion;
use crate::geometry::{vec, Rect};
use crate::level::LevelDirector;
use crate::player::Player;
use crate::projectile::Projectile;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Logical input for one tick, already mapped into field coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer position; `None` leaves the ship where it is.
    pub pointer: Option<Vec2>,
    pub fire: bool,
}

/// Temporary weapon upgrade carried by a power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerKind {
    Double,
    Triple,
    Spread,
}

impl PowerKind {
    pub const ALL: [PowerKind; 3] = [PowerKind::Double, PowerKind::Triple, PowerKind::Spread];
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct PowerUp {
    pub pos: Vec2,
    pub fall_speed: f32,
    pub kind: PowerKind,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerKind) -> Self {
        Self {
            pos,
            fall_speed: POWER_UP_FALL_SPEED,
            kind,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.fall_speed;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, vec(POWER_UP_SIZE))
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything one run owns. Entities never hold references to each other;
/// anything that needs the player gets its position passed in.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Regular enemies and bosses, in spawn order.
    pub enemies: Pool<Enemy>,
    pub player_shots: Pool<Projectile>,
    pub enemy_shots: Pool<Projectile>,
    /// Cosmetic only; never collides.
    pub explosions: Pool<Explosion>,
    pub power_ups: Pool<PowerUp>,
    pub combo: Combo,
    pub level: LevelDirector,
    pub status: GameStatus,
    /// Ticks since the run started.
    pub tick: u32,
    /// Player shots that left the field without hitting anything.
    pub misses: u32,
    pub kills: u32,
    pub bosses_defeated: u32,
    /// Vertical scroll of the star field, wrapped to the field height.
    pub background_offset: f32,
}

impl GameState {
    pub fn boss(&self) -> Option<&Enemy> {
        self.enemies.values().find(|enemy| enemy.is_boss())
    }
}
