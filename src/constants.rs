//! Tuning tables shared by the simulation.
//!
//! All durations are in ticks at the nominal 60 Hz rate; all distances are
//! logical field units (the front end scales them to terminal cells).

// ── Play field ────────────────────────────────────────────────────────────────

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 1000.0;

/// Nominal simulation rate.
pub const TICKS_PER_SECOND: u32 = 60;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SIZE: (f32, f32) = (48.0, 48.0);
pub const PLAYER_START_HP: i32 = 10;
pub const PLAYER_START_Y: f32 = FIELD_HEIGHT - 100.0;

/// Minimum ticks between two honoured fire requests (≈200 ms).
pub const FIRE_COOLDOWN: u32 = 12;

/// Ticks of damage immunity after any hit (1.5 s).
pub const INVULNERABILITY_TICKS: u32 = 90;

/// Weapon power-up lifetime (10 s).
pub const POWER_DURATION: u32 = 600;

pub const THRUSTER_INTERVAL: u32 = 2;
pub const THRUSTER_LIFETIME: u32 = 18;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const PLAYER_SHOT_SPEED: f32 = 15.0;
pub const PLAYER_SHOT_SIZE: (f32, f32) = (6.0, 18.0);
/// Horizontal gap between parallel shots of the Double/Triple weapons.
pub const PARALLEL_SHOT_GAP: f32 = 16.0;
/// Angle of the two outer Spread shots, in degrees from vertical.
pub const SPREAD_SHOT_ANGLE: f32 = 15.0;

pub const ENEMY_SHOT_SPEED: f32 = 6.0;
pub const ENEMY_SHOT_SIZE: (f32, f32) = (12.0, 12.0);
pub const BOSS_SHOT_SIZE: (f32, f32) = (16.0, 16.0);

pub const TRAIL_LENGTH: usize = 8;

pub const HOMING_LIFETIME: u32 = 240;
/// Fraction of the aim error corrected per tick.
pub const HOMING_TURN_RATE: f32 = 0.06;

pub const BOUNCE_LIMIT: u32 = 3;

pub const SPLIT_DELAY: u32 = 45;
pub const SPLIT_CHILDREN: u32 = 6;
pub const SPLIT_SPREAD: f32 = 150.0;

pub const ZIGZAG_AMPLITUDE: f32 = 40.0;
pub const ZIGZAG_FREQUENCY: f32 = 0.15;

pub const GRAVITY_PULL: f32 = 0.12;

pub const TELEPORT_INTERVAL: u32 = 50;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: (f32, f32) = (40.0, 40.0);
pub const ENEMY_BASE_SPEED: f32 = 2.5;
pub const BASIC_ENEMY_HP: i32 = 2;
pub const SHOOTER_ENEMY_HP: i32 = 3;
pub const ENEMY_CONTACT_DAMAGE: i32 = 1;
pub const SHOOTER_COOLDOWN: u32 = 90;

/// Chance that a spawned enemy carries a power-up.
pub const POWER_UP_DROP_CHANCE: f64 = 0.15;

// ── Boss ──────────────────────────────────────────────────────────────────────

/// Ticks the shooting pose stays up after a volley.
pub const BOSS_SHOOT_ANIM_TICKS: u32 = 12;
/// Ticks a single damage flash lasts.
pub const BOSS_FLASH_TICKS: u32 = 6;
/// Length of the scripted death sequence (2.5 s).
pub const BOSS_DEATH_TICKS: u32 = 150;
pub const BOSS_ENTRY_SPEED: f32 = 2.0;
/// Explosions spawned around a boss once its death sequence completes.
pub const BOSS_FINAL_BARRAGE: u32 = 10;

// ── Level ─────────────────────────────────────────────────────────────────────

pub const DEFAULT_SCROLL_SPEED: f32 = 2.0;
/// Per-tick change applied while easing the scroll speed.
pub const SCROLL_EASE: f32 = 0.05;

// ── Pickups and effects ───────────────────────────────────────────────────────

pub const POWER_UP_SIZE: (f32, f32) = (28.0, 28.0);
pub const POWER_UP_FALL_SPEED: f32 = 2.0;

pub const EXPLOSION_TICKS: u32 = 30;
pub const EXPLOSION_PARTICLES: usize = 16;

// ── Combo ─────────────────────────────────────────────────────────────────────

/// Idle ticks before an active combo lapses (5000 ms).
pub const COMBO_TIMEOUT: u32 = 300;
