//! Per-tick simulation.
//!
//! `tick` advances the whole `GameState` by exactly one step. Every timer
//! compares against `state.tick`, which is bumped once at the start of the
//! step and then passed down explicitly. All randomness comes through the
//! injected `rng`, so a seeded RNG replays a run exactly (useful for tests).
//!
//! Removals during a step only mark entities in their pools; the pools are
//! compacted once resolution is over.

use glam::Vec2;
use rand::Rng;
use tracing::{debug, info};

use crate::arena::Pool;
use crate::combo::Combo;
use crate::constants::{BOSS_FINAL_BARRAGE, FIELD_HEIGHT};
use crate::enemy::{Enemy, HitOutcome};
use crate::entities::{FrameInput, GameState, GameStatus, PowerKind, PowerUp};
use crate::explosion::Explosion;
use crate::level::LevelDirector;
use crate::player::Player;
use crate::projectile::ProjectileEvent;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh run driven by the given level timeline.
pub fn init_state(level: LevelDirector) -> GameState {
    GameState {
        player: Player::default(),
        enemies: Pool::new(),
        player_shots: Pool::new(),
        enemy_shots: Pool::new(),
        explosions: Pool::new(),
        power_ups: Pool::new(),
        combo: Combo::default(),
        level,
        status: GameStatus::Playing,
        tick: 0,
        misses: 0,
        kills: 0,
        bosses_defeated: 0,
        background_offset: 0.0,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick. Does nothing once the run is over.
pub fn tick(state: &mut GameState, input: FrameInput, rng: &mut impl Rng) {
    if state.status == GameStatus::GameOver {
        return;
    }
    state.tick += 1;
    let now = state.tick;

    // ── 1. Level timeline, spawns, background ────────────────────────────────
    let boss_present = state.enemies.values().any(Enemy::is_boss);
    let spawned = state.level.advance(boss_present, rng);
    state.enemies.extend(spawned);
    state.background_offset = (state.background_offset + state.level.scroll_speed) % FIELD_HEIGHT;

    // ── 2. Player ────────────────────────────────────────────────────────────
    if let Some(pointer) = input.pointer {
        state.player.set_pointer(pointer);
    }
    state.player.update(now, rng);
    if input.fire {
        let shots = state.player.try_fire(now);
        state.player_shots.extend(shots);
    }
    let target = state.player.pos;

    // ── 3. Player shots ──────────────────────────────────────────────────────
    advance_player_shots(state, target);

    // ── 4. Enemies and bosses ────────────────────────────────────────────────
    advance_enemies(state, now, target, rng);

    // ── 5. Enemy shots ───────────────────────────────────────────────────────
    advance_enemy_shots(state, target);

    // ── 6. Player shots ↔ enemies ────────────────────────────────────────────
    resolve_player_shots(state, now, rng);

    // ── 7. Enemy shots ↔ player ──────────────────────────────────────────────
    resolve_enemy_shots(state, now);

    // ── 8. Enemy bodies ↔ player ─────────────────────────────────────────────
    if state.status == GameStatus::Playing {
        resolve_contacts(state, now, rng);
    }

    // ── 9. Explosions ────────────────────────────────────────────────────────
    for id in state.explosions.live_ids() {
        if let Some(explosion) = state.explosions.get_mut(id) {
            explosion.update();
            if explosion.is_finished(now) {
                state.explosions.remove(id);
            }
        }
    }

    // ── 10. Power-ups ────────────────────────────────────────────────────────
    resolve_power_ups(state, now);

    // ── 11. Combo timeout ────────────────────────────────────────────────────
    state.combo.update(now);

    compact(state);
}

/// Move every player shot; a shot that leaves the field unspent is a miss.
fn advance_player_shots(state: &mut GameState, target: Vec2) {
    for id in state.player_shots.live_ids() {
        let Some(shot) = state.player_shots.get_mut(id) else {
            continue;
        };
        let event = shot.update(target);
        let gone = shot.is_off_field() || !matches!(event, ProjectileEvent::Moved);
        if gone {
            state.player_shots.remove(id);
            state.misses += 1;
            state.combo.miss();
        }
    }
}

fn advance_enemies(state: &mut GameState, now: u32, target: Vec2, rng: &mut impl Rng) {
    for id in state.enemies.live_ids() {
        let Some(enemy) = state.enemies.get_mut(id) else {
            continue;
        };
        let step = enemy.update(now, target, rng);
        let bounds = enemy.bounds();
        let drops = enemy.drops_power_up;
        let left_field = enemy.has_left_field();
        let boss_name = enemy.as_boss().map(|boss| boss.kind.name());

        state.enemy_shots.extend(step.shots);
        for pos in step.explosions {
            state.explosions.insert(Explosion::new(pos, now, rng));
        }

        if step.finished {
            state.enemies.remove(id);
            state.bosses_defeated += 1;
            info!(boss = boss_name.unwrap_or("?"), tick = now, "boss removed");
            for _ in 0..BOSS_FINAL_BARRAGE {
                let pos = Vec2::new(
                    rng.gen_range(bounds.min.x..bounds.max.x),
                    rng.gen_range(bounds.min.y..bounds.max.y),
                );
                state.explosions.insert(Explosion::new(pos, now, rng));
            }
            if drops {
                drop_power_up(&mut state.power_ups, bounds.center(), rng);
            }
        } else if left_field {
            state.enemies.remove(id);
        }
    }
}

fn advance_enemy_shots(state: &mut GameState, target: Vec2) {
    let mut children = Vec::new();
    for id in state.enemy_shots.live_ids() {
        let Some(shot) = state.enemy_shots.get_mut(id) else {
            continue;
        };
        match shot.update(target) {
            ProjectileEvent::Moved => {
                if shot.is_off_field() {
                    state.enemy_shots.remove(id);
                }
            }
            ProjectileEvent::Expired => {
                state.enemy_shots.remove(id);
            }
            ProjectileEvent::Split(parts) => {
                state.enemy_shots.remove(id);
                children.extend(parts);
            }
        }
    }
    state.enemy_shots.extend(children);
}

/// Each shot strikes at most one enemy: the first live, non-dying enemy in
/// pool order whose box it overlaps.
fn resolve_player_shots(state: &mut GameState, now: u32, rng: &mut impl Rng) {
    for shot_id in state.player_shots.live_ids() {
        let Some(shot) = state.player_shots.get(shot_id) else {
            continue;
        };
        let shot_box = shot.bounds();
        let damage = shot.damage;

        let struck = state
            .enemies
            .iter()
            .find(|(_, enemy)| !enemy.is_dying() && shot_box.intersects(&enemy.bounds()))
            .map(|(id, _)| id);
        let Some(enemy_id) = struck else {
            continue;
        };

        state.player_shots.remove(shot_id);
        state.combo.hit(now);

        let Some(enemy) = state.enemies.get_mut(enemy_id) else {
            continue;
        };
        let outcome = enemy.take_damage(damage, now);
        let center = enemy.pos;
        let drops = enemy.drops_power_up;
        state.explosions.insert(Explosion::new(center, now, rng));

        if outcome == HitOutcome::Destroyed {
            state.enemies.remove(enemy_id);
            state.kills += 1;
            if drops {
                drop_power_up(&mut state.power_ups, center, rng);
            }
        }
    }
}

fn resolve_enemy_shots(state: &mut GameState, now: u32) {
    let player_box = state.player.bounds();
    for id in state.enemy_shots.live_ids() {
        let Some(shot) = state.enemy_shots.get(id) else {
            continue;
        };
        if !shot.bounds().intersects(&player_box) {
            continue;
        }
        let damage = shot.damage;
        state.enemy_shots.remove(id);
        state.player.take_damage(damage, now);
        if check_game_over(state) {
            return;
        }
    }
}

/// Ramming: both sides take the enemy's contact damage on every tick of
/// overlap. Only the player's share is gated by the immunity window.
fn resolve_contacts(state: &mut GameState, now: u32, rng: &mut impl Rng) {
    for id in state.enemies.live_ids() {
        let Some(enemy) = state.enemies.get_mut(id) else {
            continue;
        };
        if enemy.is_dying() || !enemy.bounds().intersects(&state.player.bounds()) {
            continue;
        }
        let damage = enemy.contact_damage;
        let outcome = enemy.take_damage(damage, now);
        let center = enemy.pos;
        state.player.take_damage(damage, now);

        if outcome == HitOutcome::Destroyed {
            state.enemies.remove(id);
            state.kills += 1;
            state.explosions.insert(Explosion::new(center, now, rng));
        }
        if check_game_over(state) {
            return;
        }
    }
}

fn resolve_power_ups(state: &mut GameState, now: u32) {
    let player_box = state.player.bounds();
    for id in state.power_ups.live_ids() {
        let Some(power_up) = state.power_ups.get_mut(id) else {
            continue;
        };
        power_up.update();
        let bounds = power_up.bounds();
        let kind = power_up.kind;

        if bounds.intersects(&player_box) {
            state.power_ups.remove(id);
            state.player.apply_power(kind, now);
            debug!(power = ?kind, tick = now, "power-up collected");
        } else if bounds.is_below_field() {
            state.power_ups.remove(id);
        }
    }
}

fn drop_power_up(power_ups: &mut Pool<PowerUp>, pos: Vec2, rng: &mut impl Rng) {
    let kind = PowerKind::ALL[rng.gen_range(0..PowerKind::ALL.len())];
    power_ups.insert(PowerUp::new(pos, kind));
}

fn check_game_over(state: &mut GameState) -> bool {
    if state.player.is_alive() {
        return false;
    }
    if state.status != GameStatus::GameOver {
        state.status = GameStatus::GameOver;
        info!(
            tick = state.tick,
            misses = state.misses,
            best_combo = state.combo.best,
            "game over"
        );
    }
    true
}

fn compact(state: &mut GameState) {
    state.enemies.compact();
    state.player_shots.compact();
    state.enemy_shots.compact();
    state.explosions.compact();
    state.power_ups.compact();
}
