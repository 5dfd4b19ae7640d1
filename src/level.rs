//! Level timeline: timestamped spawn events and background scroll speed.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use tracing::debug;

use crate::boss::BossKind;
use crate::constants::*;
use crate::enemy::Enemy;
use crate::patterns::MovementPattern;
use crate::projectile::{self, ProjectileKind};

/// What an enemy in a formation does.
#[derive(Clone, Debug, PartialEq)]
pub enum Trooper {
    Basic,
    Shooter(ProjectileKind),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SpawnAction {
    RandomScatter { count: u32, trooper: Trooper },
    VFormation { count: u32, trooper: Trooper },
    Line { count: u32, trooper: Trooper },
    SineGroup { count: u32 },
    ZigZagGroup { count: u32 },
    /// Two swooping enemies entering from opposite sides.
    SideSwoop,
    /// Horizontal squadron sweeping side to side.
    Squadron { count: u32, trooper: Trooper },
    Circle { count: u32 },
    Boss(BossKind),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnEvent {
    pub at: u32,
    pub action: SpawnAction,
}

#[derive(Clone, Debug)]
pub struct LevelDirector {
    tick: u32,
    pending: VecDeque<SpawnEvent>,
    pub scroll_speed: f32,
    pub default_scroll: f32,
}

impl LevelDirector {
    /// Build a director from any list of events; they are sorted by trigger
    /// tick (stable, so same-tick events keep their listed order).
    pub fn new(mut events: Vec<SpawnEvent>) -> Self {
        events.sort_by_key(|event| event.at);
        Self {
            tick: 0,
            pending: events.into(),
            scroll_speed: DEFAULT_SCROLL_SPEED,
            default_scroll: DEFAULT_SCROLL_SPEED,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The full stage: every formation, escalating shooters, five bosses.
    pub fn campaign() -> Self {
        use SpawnAction::*;
        let shooter = Trooper::Shooter;
        let straight = || Trooper::Shooter(ProjectileKind::Straight);
        let events = vec![
            (60, RandomScatter { count: 5, trooper: Trooper::Basic }),
            (180, VFormation { count: 5, trooper: Trooper::Basic }),
            (300, Line { count: 6, trooper: straight() }),
            (420, SineGroup { count: 5 }),
            (540, ZigZagGroup { count: 4 }),
            (660, SideSwoop),
            (780, Squadron { count: 5, trooper: Trooper::Basic }),
            (900, Circle { count: 4 }),
            (1080, Boss(BossKind::Sentinel)),
            (1500, VFormation { count: 7, trooper: straight() }),
            (1620, RandomScatter { count: 6, trooper: shooter(projectile::zigzag()) }),
            (1740, SideSwoop),
            (1860, Boss(BossKind::Hydra)),
            (2300, Line { count: 6, trooper: shooter(projectile::bouncing()) }),
            (2420, Squadron { count: 6, trooper: shooter(projectile::gravity()) }),
            (2540, SineGroup { count: 7 }),
            (2700, Boss(BossKind::Tempest)),
            (3150, ZigZagGroup { count: 6 }),
            (3270, RandomScatter { count: 5, trooper: shooter(projectile::homing()) }),
            (3390, VFormation { count: 5, trooper: shooter(projectile::splitting()) }),
            (3600, Boss(BossKind::Colossus)),
            (4050, Squadron { count: 6, trooper: shooter(projectile::teleporting()) }),
            (4170, SideSwoop),
            (4290, Circle { count: 6 }),
            (4500, Boss(BossKind::Overmind)),
        ];
        Self::new(
            events
                .into_iter()
                .map(|(at, action)| SpawnEvent { at, action })
                .collect(),
        )
    }

    /// A single boss after a short lead-in; used by the practice menu.
    pub fn boss_rush(kind: BossKind) -> Self {
        Self::new(vec![SpawnEvent {
            at: 60,
            action: SpawnAction::Boss(kind),
        }])
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    /// Step the timeline one tick and return every enemy spawned by events
    /// that came due. Each event fires once and is then dropped.
    pub fn advance(&mut self, boss_present: bool, rng: &mut impl Rng) -> Vec<Enemy> {
        self.tick += 1;
        self.ease_scroll(boss_present);

        let mut spawned = Vec::new();
        while self.pending.front().map(|e| e.at <= self.tick).unwrap_or(false) {
            if let Some(event) = self.pending.pop_front() {
                debug!(tick = self.tick, action = ?event.action, "spawn event fired");
                spawned.extend(spawn(&event.action, rng));
            }
        }
        spawned
    }

    /// Decelerate towards zero while a boss is on screen, recover otherwise.
    fn ease_scroll(&mut self, boss_present: bool) {
        self.scroll_speed = if boss_present {
            (self.scroll_speed - SCROLL_EASE).max(0.0)
        } else {
            (self.scroll_speed + SCROLL_EASE).min(self.default_scroll)
        };
    }
}

fn trooper_at(trooper: &Trooper, anchor: Vec2, pattern: Option<MovementPattern>) -> Enemy {
    match trooper {
        Trooper::Basic => Enemy::basic(anchor, pattern),
        Trooper::Shooter(kind) => Enemy::shooter(anchor, pattern, kind.clone()),
    }
}

/// Spawn row above the visible field.
const SPAWN_Y: f32 = -ENEMY_SIZE.1;

/// Build the enemies for one spawn action.
pub fn spawn(action: &SpawnAction, rng: &mut impl Rng) -> Vec<Enemy> {
    let margin = ENEMY_SIZE.0;
    let mut enemies: Vec<Enemy> = match action {
        SpawnAction::RandomScatter { count, trooper } => (0..*count)
            .map(|_| {
                let x = rng.gen_range(margin..FIELD_WIDTH - margin);
                let y = SPAWN_Y - rng.gen_range(0.0..200.0);
                trooper_at(trooper, Vec2::new(x, y), None)
            })
            .collect(),
        SpawnAction::VFormation { count, trooper } => (0..*count)
            .map(|i| {
                // Alternate left/right of the lead ship, stepping back each pair.
                let rank = ((i + 1) / 2) as f32;
                let side = if i % 2 == 0 { 1.0 } else { -1.0 };
                let anchor =
                    Vec2::new(FIELD_WIDTH / 2.0 + side * rank * 60.0, SPAWN_Y - rank * 50.0);
                trooper_at(trooper, anchor, None)
            })
            .collect(),
        SpawnAction::Line { count, trooper } => spread_x(*count)
            .map(|x| trooper_at(trooper, Vec2::new(x, SPAWN_Y), None))
            .collect(),
        SpawnAction::SineGroup { count } => (0..*count)
            .map(|i| {
                let pattern = MovementPattern::SineWave {
                    amplitude: 120.0,
                    frequency: 0.04,
                    speed: 2.0,
                };
                Enemy::basic(Vec2::new(FIELD_WIDTH / 2.0, SPAWN_Y - i as f32 * 70.0), Some(pattern))
            })
            .collect(),
        SpawnAction::ZigZagGroup { count } => spread_x(*count)
            .map(|x| {
                let pattern = MovementPattern::ZigZag {
                    speed: 2.0,
                    step: 3.0,
                    switch_time: 40,
                };
                Enemy::basic(Vec2::new(x - 60.0, SPAWN_Y), Some(pattern))
            })
            .collect(),
        SpawnAction::SideSwoop => [true, false]
            .into_iter()
            .map(|from_left| {
                let x = if from_left { 120.0 } else { FIELD_WIDTH - 120.0 };
                let pattern = MovementPattern::Swoop {
                    from_left,
                    speed: 4.0,
                    dive_until: 60,
                    turn_at: 120,
                };
                Enemy::shooter(Vec2::new(x, SPAWN_Y), Some(pattern), ProjectileKind::Straight)
            })
            .collect(),
        SpawnAction::Squadron { count, trooper } => (0..*count)
            .map(|i| {
                let pattern = MovementPattern::HorizontalWave {
                    velocity: 3.0,
                    descent: 0.6,
                    margin,
                };
                let anchor = Vec2::new(margin + i as f32 * 60.0, SPAWN_Y);
                trooper_at(trooper, anchor, Some(pattern))
            })
            .collect(),
        SpawnAction::Circle { count } => (0..*count)
            .map(|i| {
                let pattern = MovementPattern::Circular {
                    radius: 80.0,
                    angular_speed: 0.05,
                    descent: 1.5,
                };
                let x = FIELD_WIDTH / 4.0 + (i % 2) as f32 * FIELD_WIDTH / 2.0;
                Enemy::basic(Vec2::new(x, SPAWN_Y - (i / 2) as f32 * 180.0), Some(pattern))
            })
            .collect(),
        SpawnAction::Boss(kind) => vec![Enemy::boss(*kind)],
    };

    for enemy in enemies.iter_mut().filter(|e| !e.is_boss()) {
        enemy.drops_power_up = rng.gen_bool(POWER_UP_DROP_CHANCE);
    }
    enemies
}

/// `count` x positions spread evenly across the field.
fn spread_x(count: u32) -> impl Iterator<Item = f32> {
    let gap = FIELD_WIDTH / (count + 1) as f32;
    (1..=count).map(move |i| gap * i as f32)
}
