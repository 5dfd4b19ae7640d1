//! Render snapshot: what the host needs to draw one tick, in draw order.

use glam::Vec2;

use crate::boss::BossKind;
use crate::constants::PLAYER_SIZE;
use crate::enemy::EnemyKind;
use crate::entities::{GameState, GameStatus, PowerKind};
use crate::geometry::vec;
use crate::player::WeaponPower;
use crate::projectile::{Projectile, ProjectileKind, ProjectileOwner};

/// Sprite reference; the renderer maps each to its own artwork.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player,
    /// Player ship while damage immunity is active.
    PlayerBlink,
    Thruster,
    PlayerShot,
    EnemyShot(ShotLook),
    BossShot(ShotLook),
    BasicEnemy,
    ShooterEnemy,
    Boss(BossKind),
    PowerUp(PowerKind),
    /// Explosion particle; `frame` carries the palette index.
    Spark,
}

/// Visual family of an enemy projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotLook {
    Plain,
    Homing,
    Bouncing,
    Splitting,
    Zigzag,
    Gravity,
    Teleporting,
}

impl From<&ProjectileKind> for ShotLook {
    fn from(kind: &ProjectileKind) -> Self {
        match kind {
            ProjectileKind::Straight => ShotLook::Plain,
            ProjectileKind::Homing { .. } => ShotLook::Homing,
            ProjectileKind::Bouncing { .. } => ShotLook::Bouncing,
            ProjectileKind::Splitting { .. } => ShotLook::Splitting,
            ProjectileKind::Zigzag { .. } => ShotLook::Zigzag,
            ProjectileKind::Gravity { .. } => ShotLook::Gravity,
            ProjectileKind::Teleporting { .. } => ShotLook::Teleporting,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Drawable {
    pub sprite: Sprite,
    pub pos: Vec2,
    pub size: Vec2,
    /// Animation frame (boss pose, palette index for sparks).
    pub frame: u32,
    /// Fading tail, oldest first. Empty for most sprites.
    pub trail: Vec<Vec2>,
    /// Where the sprite is looking (boss eye). Zero when it has no gaze.
    pub gaze: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BossGauge {
    pub name: &'static str,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub ticks: u32,
    pub hp: i32,
    pub combo: Option<String>,
    pub power: WeaponPower,
    pub boss: Option<BossGauge>,
    pub game_over: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub background_offset: f32,
    pub drawables: Vec<Drawable>,
    pub hud: Hud,
}

fn shot_drawable(shot: &Projectile) -> Drawable {
    let sprite = match shot.owner {
        ProjectileOwner::Player => Sprite::PlayerShot,
        ProjectileOwner::Enemy if shot.heavy => Sprite::BossShot(ShotLook::from(&shot.kind)),
        ProjectileOwner::Enemy => Sprite::EnemyShot(ShotLook::from(&shot.kind)),
    };
    Drawable {
        sprite,
        pos: shot.pos,
        size: shot.size,
        frame: 0,
        trail: shot.trail.iter().copied().collect(),
        gaze: Vec2::ZERO,
    }
}

fn simple(sprite: Sprite, pos: Vec2, size: Vec2, frame: u32) -> Drawable {
    Drawable {
        sprite,
        pos,
        size,
        frame,
        trail: Vec::new(),
        gaze: Vec2::ZERO,
    }
}

/// Build the snapshot in back-to-front order: pickups, enemies, enemy fire,
/// player fire, the ship and its exhaust, then explosions on top.
pub fn snapshot(state: &GameState) -> FrameSnapshot {
    let mut drawables = Vec::new();

    for power_up in state.power_ups.values() {
        drawables.push(simple(
            Sprite::PowerUp(power_up.kind),
            power_up.pos,
            power_up.bounds().size(),
            0,
        ));
    }

    for enemy in state.enemies.values() {
        let drawable = match &enemy.kind {
            EnemyKind::Basic => simple(Sprite::BasicEnemy, enemy.pos, enemy.size, 0),
            EnemyKind::Shooter(_) => simple(Sprite::ShooterEnemy, enemy.pos, enemy.size, 0),
            EnemyKind::Boss(boss) => Drawable {
                gaze: boss.gaze,
                ..simple(Sprite::Boss(boss.kind), enemy.pos, enemy.size, boss.animation_frame())
            },
        };
        drawables.push(drawable);
    }

    drawables.extend(state.enemy_shots.values().map(shot_drawable));
    drawables.extend(state.player_shots.values().map(shot_drawable));

    for particle in &state.player.thrusters {
        drawables.push(simple(Sprite::Thruster, particle.pos, Vec2::splat(4.0), 0));
    }
    let ship = if state.player.is_invulnerable(state.tick) {
        Sprite::PlayerBlink
    } else {
        Sprite::Player
    };
    drawables.push(simple(ship, state.player.pos, vec(PLAYER_SIZE), 0));

    for explosion in state.explosions.values() {
        for particle in &explosion.particles {
            drawables.push(simple(
                Sprite::Spark,
                particle.pos,
                Vec2::splat(particle.radius * 2.0),
                particle.color as u32,
            ));
        }
    }

    let boss = state.boss().and_then(|enemy| {
        enemy.as_boss().map(|boss| BossGauge {
            name: boss.kind.name(),
            hp: enemy.hp.max(0),
            max_hp: boss.profile().max_hp,
        })
    });

    FrameSnapshot {
        background_offset: state.background_offset,
        drawables,
        hud: Hud {
            ticks: state.tick,
            hp: state.player.hp,
            combo: state.combo.label(),
            power: state.player.power,
            boss,
            game_over: state.status == GameStatus::GameOver,
        },
    }
}
