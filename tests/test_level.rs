use star_striker::boss::BossKind;
use star_striker::constants::*;
use star_striker::enemy::EnemyKind;
use star_striker::level::*;
use star_striker::projectile::ProjectileKind;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn line(at: u32, count: u32) -> SpawnEvent {
    SpawnEvent {
        at,
        action: SpawnAction::Line {
            count,
            trooper: Trooper::Basic,
        },
    }
}

#[test]
fn event_fires_once_on_its_tick() {
    let mut rng = seeded_rng();
    let mut level = LevelDirector::new(vec![line(180, 3)]);

    for _ in 1..180 {
        assert!(level.advance(false, &mut rng).is_empty());
    }
    assert_eq!(level.advance(false, &mut rng).len(), 3);
    assert_eq!(level.tick(), 180);
    assert!(level.is_finished());

    for _ in 0..500 {
        assert!(level.advance(false, &mut rng).is_empty());
    }
}

#[test]
fn same_tick_events_all_fire() {
    let mut rng = seeded_rng();
    let mut level = LevelDirector::new(vec![line(2, 2), line(1, 1), line(2, 4)]);

    assert_eq!(level.advance(false, &mut rng).len(), 1);
    assert_eq!(level.advance(false, &mut rng).len(), 6);
    assert_eq!(level.pending(), 0);
}

#[test]
fn scroll_eases_to_zero_with_boss_and_recovers() {
    let mut rng = seeded_rng();
    let mut level = LevelDirector::empty();
    assert_eq!(level.scroll_speed, DEFAULT_SCROLL_SPEED);

    for _ in 0..100 {
        level.advance(true, &mut rng);
        assert!(level.scroll_speed >= 0.0);
    }
    assert_eq!(level.scroll_speed, 0.0);

    for _ in 0..100 {
        level.advance(false, &mut rng);
        assert!(level.scroll_speed <= level.default_scroll);
    }
    assert_eq!(level.scroll_speed, DEFAULT_SCROLL_SPEED);
}

#[test]
fn campaign_brings_all_bosses_in_order() {
    let mut rng = seeded_rng();
    let mut level = LevelDirector::campaign();
    let mut bosses = Vec::new();

    while !level.is_finished() {
        for enemy in level.advance(false, &mut rng) {
            if let Some(boss) = enemy.as_boss() {
                bosses.push(boss.kind);
            }
        }
    }

    assert_eq!(bosses, BossKind::ALL.to_vec());
}

#[test]
fn boss_rush_spawns_single_boss() {
    let mut rng = seeded_rng();
    let mut level = LevelDirector::boss_rush(BossKind::Overmind);
    let spawned: Vec<_> = (0..60).flat_map(|_| level.advance(false, &mut rng)).collect();

    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].as_boss().map(|b| b.kind), Some(BossKind::Overmind));
}

#[test]
fn formations_have_requested_size() {
    let mut rng = seeded_rng();
    let v = spawn(
        &SpawnAction::VFormation {
            count: 5,
            trooper: Trooper::Basic,
        },
        &mut rng,
    );
    assert_eq!(v.len(), 5);
    assert!(v.iter().all(|e| e.pos.y < 0.0));

    let swoop = spawn(&SpawnAction::SideSwoop, &mut rng);
    assert_eq!(swoop.len(), 2);
    assert!(swoop.iter().all(|e| matches!(e.kind, EnemyKind::Shooter(_))));

    let circle = spawn(&SpawnAction::Circle { count: 4 }, &mut rng);
    assert!(circle.iter().all(|e| e.pattern.is_some()));
}

#[test]
fn shooter_troopers_carry_weapon() {
    let mut rng = seeded_rng();
    let squad = spawn(
        &SpawnAction::Squadron {
            count: 3,
            trooper: Trooper::Shooter(ProjectileKind::Gravity { pull: 0.1 }),
        },
        &mut rng,
    );
    for enemy in &squad {
        match &enemy.kind {
            EnemyKind::Shooter(shooter) => {
                assert_eq!(shooter.weapon, ProjectileKind::Gravity { pull: 0.1 })
            }
            other => panic!("expected shooter, got {other:?}"),
        }
    }
}

#[test]
fn drop_chance_is_roughly_honoured() {
    let mut rng = seeded_rng();
    let enemies = spawn(
        &SpawnAction::RandomScatter {
            count: 2_000,
            trooper: Trooper::Basic,
        },
        &mut rng,
    );
    let drops = enemies.iter().filter(|e| e.drops_power_up).count();
    assert!((200..400).contains(&drops), "{drops} drops");
}
