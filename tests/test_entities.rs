use glam::Vec2;
use star_striker::arena::{EntityId, Pool};
use star_striker::constants::*;
use star_striker::entities::*;
use star_striker::explosion::{Explosion, PALETTE_SIZE};

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Pool ──────────────────────────────────────────────────────────────────────

#[test]
fn ids_are_unique_and_increasing() {
    let mut pool = Pool::new();
    let a = pool.insert("a");
    let b = pool.insert("b");
    assert!(a < b);
    assert_eq!(pool.len(), 2);
    assert_eq!(pool.get(b), Some(&"b"));
}

#[test]
fn removal_is_idempotent() {
    let mut pool = Pool::new();
    let a = pool.insert(1);
    assert!(pool.remove(a));
    assert!(!pool.remove(a));
    assert!(!pool.remove(EntityId(99)));
    assert!(!pool.is_live(a));
    assert!(pool.get(a).is_none());
    assert!(pool.is_empty());
}

#[test]
fn removed_entries_vanish_before_compaction() {
    let mut pool = Pool::new();
    let ids: Vec<EntityId> = (0..4).map(|i| pool.insert(i)).collect();
    pool.remove(ids[1]);

    assert_eq!(pool.values().copied().collect::<Vec<_>>(), vec![0, 2, 3]);
    assert_eq!(pool.live_ids(), vec![ids[0], ids[2], ids[3]]);
}

#[test]
fn compaction_keeps_order_and_ids() {
    let mut pool = Pool::new();
    let ids: Vec<EntityId> = (0..5).map(|i| pool.insert(i * 10)).collect();
    pool.remove(ids[0]);
    pool.remove(ids[3]);
    pool.compact();

    assert_eq!(pool.values().copied().collect::<Vec<_>>(), vec![10, 20, 40]);
    assert_eq!(pool.get(ids[4]), Some(&40));

    let fresh = pool.insert(50);
    assert!(fresh > ids[4], "ids are never reused");
}

#[test]
fn get_mut_edits_in_place() {
    let mut pool = Pool::new();
    let id = pool.insert(1);
    if let Some(v) = pool.get_mut(id) {
        *v = 7;
    }
    for (_, v) in pool.iter_mut() {
        *v += 1;
    }
    assert_eq!(pool.get(id), Some(&8));
}

// ── Power-ups and explosions ──────────────────────────────────────────────────

#[test]
fn power_up_falls_at_fixed_speed() {
    let mut p = PowerUp::new(Vec2::new(100.0, 100.0), PowerKind::Triple);
    p.update();
    assert_eq!(p.pos.y, 100.0 + POWER_UP_FALL_SPEED);
    assert_eq!(p.bounds().size(), Vec2::new(POWER_UP_SIZE.0, POWER_UP_SIZE.1));
}

#[test]
fn explosion_runs_for_its_duration() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut e = Explosion::new(Vec2::new(50.0, 50.0), 10, &mut rng);
    assert_eq!(e.particles.len(), EXPLOSION_PARTICLES);
    assert!(e.particles.iter().all(|p| p.color < PALETTE_SIZE));

    e.update();
    assert!(e.particles.iter().any(|p| p.pos != Vec2::new(50.0, 50.0)));

    assert!(!e.is_finished(10 + EXPLOSION_TICKS));
    assert!(e.is_finished(10 + EXPLOSION_TICKS + 1));
}

#[test]
fn frame_input_defaults_to_idle() {
    let input = FrameInput::default();
    assert_eq!(input.pointer, None);
    assert!(!input.fire);
}
