use glam::Vec2;
use star_striker::boss::{BossKind, BossPhase};
use star_striker::compute::*;
use star_striker::constants::*;
use star_striker::enemy::{Enemy, EnemyKind};
use star_striker::entities::*;
use star_striker::frame::{snapshot, Sprite};
use star_striker::level::{LevelDirector, SpawnAction, SpawnEvent, Trooper};
use star_striker::player::WeaponPower;
use star_striker::projectile::{Projectile, ProjectileKind};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn quiet_state() -> GameState {
    init_state(LevelDirector::empty())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn fire() -> FrameInput {
    FrameInput {
        pointer: None,
        fire: true,
    }
}

fn run(state: &mut GameState, ticks: u32, rng: &mut StdRng) {
    for _ in 0..ticks {
        tick(state, idle(), rng);
    }
}

/// Basic enemy that stays where it is put.
fn parked_enemy(pos: Vec2) -> Enemy {
    let mut enemy = Enemy::basic(pos, None);
    enemy.speed = 0.0;
    enemy
}

/// Sentinel already in combat, sitting on top of the ship.
fn boss_on_player(pos: Vec2, hp: i32) -> Enemy {
    let mut enemy = Enemy::boss(BossKind::Sentinel);
    enemy.pos = pos;
    enemy.hp = hp;
    if let EnemyKind::Boss(boss) = &mut enemy.kind {
        boss.phase = BossPhase::InCombat;
    }
    enemy
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = quiet_state();
    assert_eq!(s.player.pos, Vec2::new(FIELD_WIDTH / 2.0, PLAYER_START_Y));
    assert_eq!(s.player.hp, PLAYER_START_HP);
    assert_eq!(s.player.power, WeaponPower::Normal);
}

#[test]
fn init_state_empty_collections() {
    let s = quiet_state();
    assert!(s.enemies.is_empty());
    assert!(s.player_shots.is_empty());
    assert!(s.enemy_shots.is_empty());
    assert!(s.power_ups.is_empty());
    assert_eq!(s.tick, 0);
    assert_eq!(s.misses, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

// ── Player input ──────────────────────────────────────────────────────────────

#[test]
fn pointer_moves_ship_and_is_clamped() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let input = FrameInput {
        pointer: Some(Vec2::new(-50.0, 300.0)),
        fire: false,
    };
    tick(&mut s, input, &mut rng);
    assert_eq!(s.player.pos, Vec2::new(PLAYER_SIZE.0 / 2.0, 300.0));
}

#[test]
fn holding_fire_respects_cooldown() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    for _ in 0..FIRE_COOLDOWN {
        tick(&mut s, fire(), &mut rng);
    }
    assert_eq!(s.player_shots.len(), 1);
    tick(&mut s, fire(), &mut rng);
    assert_eq!(s.player_shots.len(), 2);
}

// ── Player shots ──────────────────────────────────────────────────────────────

#[test]
fn shot_leaving_top_counts_one_miss() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    s.combo.hit(0);

    tick(&mut s, fire(), &mut rng);
    run(&mut s, 30, &mut rng);
    assert_eq!(s.misses, 0);
    assert!(s.combo.active);

    run(&mut s, 70, &mut rng);
    assert_eq!(s.misses, 1);
    assert!(s.player_shots.is_empty());
    assert!(!s.combo.active, "a miss breaks the streak");
}

#[test]
fn shot_strikes_at_most_one_enemy() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    s.enemies.insert(parked_enemy(Vec2::new(400.0, 500.0)));
    s.enemies.insert(parked_enemy(Vec2::new(400.0, 500.0)));

    tick(&mut s, fire(), &mut rng);
    run(&mut s, 40, &mut rng);

    let hp: Vec<i32> = s.enemies.values().map(|e| e.hp).collect();
    assert_eq!(hp, vec![BASIC_ENEMY_HP - 1, BASIC_ENEMY_HP]);
    assert!(s.player_shots.is_empty());
    assert_eq!(s.misses, 0);
    assert_eq!(s.combo.count, 1);
}

#[test]
fn destroying_enemy_counts_kill() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    s.enemies.insert(parked_enemy(Vec2::new(400.0, 500.0)));

    for _ in 0..60 {
        tick(&mut s, fire(), &mut rng);
    }

    assert!(s.enemies.is_empty());
    assert_eq!(s.kills, 1);
    assert!(s.combo.count >= 2);
}

#[test]
fn destroyed_enemy_with_drop_leaves_power_up() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let mut enemy = parked_enemy(Vec2::new(400.0, 500.0)).with_power_up(true);
    enemy.hp = 1;
    s.enemies.insert(enemy);

    tick(&mut s, fire(), &mut rng);
    run(&mut s, 30, &mut rng);

    assert!(s.enemies.is_empty());
    assert_eq!(s.power_ups.len(), 1);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_removed_after_passing_bottom() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    s.enemies.insert(Enemy::basic(Vec2::new(100.0, 990.0), None));

    run(&mut s, 20, &mut rng);

    assert!(s.enemies.is_empty());
    assert_eq!(s.kills, 0);
}

#[test]
fn enemy_above_field_is_kept_until_it_enters() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    s.enemies.insert(parked_enemy(Vec2::new(100.0, -300.0)));

    run(&mut s, 10, &mut rng);

    assert_eq!(s.enemies.len(), 1);
}

#[test]
fn shooter_fires_aimed_shots() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let mut shooter = Enemy::shooter(Vec2::new(400.0, 200.0), None, ProjectileKind::Straight);
    shooter.speed = 0.0;
    s.enemies.insert(shooter);

    run(&mut s, SHOOTER_COOLDOWN / 2, &mut rng);

    assert_eq!(s.enemy_shots.len(), 1);
    let shot = s.enemy_shots.values().next().unwrap();
    assert!(shot.vel.y > 0.0, "aimed down towards the ship");
    assert!(shot.vel.x.abs() < 0.01);
}

// ── Contact and enemy fire ────────────────────────────────────────────────────

#[test]
fn contact_hurts_player_once_per_window_but_enemy_every_tick() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let mut enemy = parked_enemy(s.player.pos);
    enemy.hp = 5;
    let id = s.enemies.insert(enemy);

    tick(&mut s, idle(), &mut rng);
    assert_eq!(s.player.hp, PLAYER_START_HP - 1);
    assert!(s.player.is_invulnerable(s.tick));
    assert_eq!(s.enemies.get(id).unwrap().hp, 4);

    run(&mut s, 3, &mut rng);
    assert_eq!(s.player.hp, PLAYER_START_HP - 1, "still blinking");
    assert_eq!(s.enemies.get(id).unwrap().hp, 1);

    tick(&mut s, idle(), &mut rng);
    assert!(s.enemies.is_empty(), "rammed to pieces by the fifth tick");
    assert_eq!(s.kills, 1);
    assert_eq!(s.player.hp, PLAYER_START_HP - 1);
}

#[test]
fn contact_can_destroy_enemy() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let mut enemy = parked_enemy(s.player.pos);
    enemy.hp = 1;
    s.enemies.insert(enemy);

    tick(&mut s, idle(), &mut rng);

    assert!(s.enemies.is_empty());
    assert_eq!(s.kills, 1);
    assert!(!s.explosions.is_empty());
}

#[test]
fn enemy_shot_removed_even_while_invulnerable() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    s.player.invulnerable_until = Some(1_000);
    s.enemy_shots.insert(Projectile::enemy_shot(
        s.player.pos,
        Vec2::new(0.0, 1.0),
        ProjectileKind::Straight,
    ));

    tick(&mut s, idle(), &mut rng);

    assert!(s.enemy_shots.is_empty());
    assert_eq!(s.player.hp, PLAYER_START_HP);
}

#[test]
fn last_hit_point_ends_the_run() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    s.player.hp = 1;
    s.enemy_shots.insert(Projectile::enemy_shot(
        s.player.pos,
        Vec2::new(0.0, 1.0),
        ProjectileKind::Straight,
    ));

    tick(&mut s, idle(), &mut rng);
    assert_eq!(s.player.hp, 0);
    assert_eq!(s.status, GameStatus::GameOver);

    tick(&mut s, fire(), &mut rng);
    assert_eq!(s.tick, 1, "a finished run no longer advances");
    assert!(s.player_shots.is_empty());
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[test]
fn power_up_pickup_and_expiry() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    s.power_ups.insert(PowerUp::new(s.player.pos - Vec2::new(0.0, 20.0), PowerKind::Spread));

    tick(&mut s, idle(), &mut rng);
    assert!(s.power_ups.is_empty());
    assert_eq!(s.player.power, WeaponPower::Spread);

    tick(&mut s, fire(), &mut rng);
    assert_eq!(s.player_shots.len(), 3);

    run(&mut s, POWER_DURATION, &mut rng);
    assert_eq!(s.player.power, WeaponPower::Normal);
}

#[test]
fn uncollected_power_up_falls_away() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    s.power_ups.insert(PowerUp::new(Vec2::new(50.0, 980.0), PowerKind::Double));

    run(&mut s, 30, &mut rng);

    assert!(s.power_ups.is_empty());
    assert_eq!(s.player.power, WeaponPower::Normal);
}

// ── Bosses ────────────────────────────────────────────────────────────────────

#[test]
fn dying_boss_is_removed_after_sequence() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let id = s.enemies.insert(Enemy::boss(BossKind::Sentinel));
    let max_hp = BossKind::Sentinel.profile().max_hp;
    s.enemies.get_mut(id).unwrap().take_damage(max_hp, 0);

    run(&mut s, BOSS_DEATH_TICKS - 1, &mut rng);
    assert!(s.boss().is_some());
    assert_eq!(s.bosses_defeated, 0);

    tick(&mut s, idle(), &mut rng);
    assert!(s.boss().is_none());
    assert_eq!(s.bosses_defeated, 1);
    assert_eq!(s.power_ups.len(), 1);
    assert!(s.explosions.len() >= BOSS_FINAL_BARRAGE as usize);
}

#[test]
fn dying_boss_ignores_shots() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let mut boss = Enemy::boss(BossKind::Sentinel);
    boss.pos = Vec2::new(400.0, 500.0);
    let id = s.enemies.insert(boss);
    s.enemies.get_mut(id).unwrap().take_damage(20, 0);

    tick(&mut s, fire(), &mut rng);
    run(&mut s, 70, &mut rng);

    assert_eq!(s.enemies.get(id).unwrap().hp, 0);
    assert_eq!(s.misses, 1, "the shot passes through");
}

#[test]
fn boss_trades_contact_damage_with_the_ship() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let contact = BossKind::Sentinel.profile().contact_damage;
    let max_hp = BossKind::Sentinel.profile().max_hp;
    let id = s.enemies.insert(boss_on_player(s.player.pos, max_hp));

    tick(&mut s, idle(), &mut rng);
    let boss = s.enemies.get(id).unwrap();
    assert_eq!(boss.hp, max_hp - contact);
    assert_eq!(boss.as_boss().unwrap().animation_frame(), 2, "hit flash");
    assert_eq!(s.player.hp, PLAYER_START_HP - contact);

    tick(&mut s, idle(), &mut rng);
    assert_eq!(s.enemies.get(id).unwrap().hp, max_hp - 2 * contact);
    assert_eq!(s.player.hp, PLAYER_START_HP - contact);
}

#[test]
fn dying_boss_has_no_contact_damage() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let id = s.enemies.insert(boss_on_player(s.player.pos, 20));
    s.enemies.get_mut(id).unwrap().take_damage(20, 0);

    run(&mut s, 5, &mut rng);

    assert_eq!(s.player.hp, PLAYER_START_HP);
    assert!(!s.player.is_invulnerable(s.tick));
    assert_eq!(s.enemies.get(id).unwrap().hp, 0);
}

#[test]
fn boss_shot_down_is_not_also_rammed() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let id = s.enemies.insert(boss_on_player(s.player.pos, 1));

    tick(&mut s, fire(), &mut rng);

    let boss = s.enemies.get(id).unwrap();
    assert!(boss.is_dying());
    assert_eq!(boss.hp, 0);
    assert_eq!(s.combo.count, 1);
    assert_eq!(s.player.hp, PLAYER_START_HP);
}

#[test]
fn live_boss_takes_shot_and_ram_in_one_tick() {
    let mut s = quiet_state();
    let mut rng = seeded_rng();
    let id = s.enemies.insert(boss_on_player(s.player.pos, 5));

    tick(&mut s, fire(), &mut rng);

    assert_eq!(s.enemies.get(id).unwrap().hp, 2);
    assert_eq!(s.player.hp, PLAYER_START_HP - 2);
}

#[test]
fn boss_slows_the_scroll() {
    let mut s = init_state(LevelDirector::boss_rush(BossKind::Hydra));
    let mut rng = seeded_rng();

    run(&mut s, 59, &mut rng);
    assert!(s.boss().is_none());
    assert_eq!(s.level.scroll_speed, DEFAULT_SCROLL_SPEED);

    run(&mut s, 100, &mut rng);
    assert!(s.boss().is_some());
    assert_eq!(s.level.scroll_speed, 0.0);
}

// ── Level timeline ────────────────────────────────────────────────────────────

#[test]
fn level_events_spawn_into_state() {
    let level = LevelDirector::new(vec![SpawnEvent {
        at: 5,
        action: SpawnAction::Line {
            count: 4,
            trooper: Trooper::Basic,
        },
    }]);
    let mut s = init_state(level);
    let mut rng = seeded_rng();

    run(&mut s, 4, &mut rng);
    assert!(s.enemies.is_empty());
    tick(&mut s, idle(), &mut rng);
    assert_eq!(s.enemies.len(), 4);
}

// ── Snapshot and determinism ──────────────────────────────────────────────────

#[test]
fn snapshot_draws_ship_above_enemies() {
    let mut s = quiet_state();
    s.enemies.insert(parked_enemy(Vec2::new(200.0, 200.0)));
    s.power_ups.insert(PowerUp::new(Vec2::new(300.0, 300.0), PowerKind::Triple));

    let frame = snapshot(&s);
    let sprites: Vec<Sprite> = frame.drawables.iter().map(|d| d.sprite).collect();
    assert_eq!(
        sprites,
        vec![Sprite::PowerUp(PowerKind::Triple), Sprite::BasicEnemy, Sprite::Player]
    );
    assert_eq!(frame.hud.hp, PLAYER_START_HP);
    assert!(frame.hud.combo.is_none());
    assert!(!frame.hud.game_over);
}

#[test]
fn same_seed_same_run() {
    let mut a = init_state(LevelDirector::campaign());
    let mut b = init_state(LevelDirector::campaign());
    let mut rng_a = StdRng::seed_from_u64(7);
    let mut rng_b = StdRng::seed_from_u64(7);

    for i in 0..1_500u32 {
        let input = FrameInput {
            pointer: Some(Vec2::new(200.0 + (i % 400) as f32, 850.0)),
            fire: i % 3 == 0,
        };
        tick(&mut a, input, &mut rng_a);
        tick(&mut b, input, &mut rng_b);
    }

    assert_eq!(a.tick, b.tick);
    assert_eq!(a.kills, b.kills);
    assert_eq!(a.misses, b.misses);
    assert_eq!(snapshot(&a), snapshot(&b));
}
