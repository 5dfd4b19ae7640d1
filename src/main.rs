mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use display::Viewport;
use star_striker::boss::BossKind;
use star_striker::compute::{init_state, tick};
use star_striker::config::GameConfig;
use star_striker::entities::{FrameInput, GameState, GameStatus};
use star_striker::error::GameError;
use star_striker::frame::snapshot;
use star_striker::level::LevelDirector;

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// Field units the pointer moves per frame while a direction key is held.
const KEY_NUDGE: f32 = 12.0;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| is_held(key_frame, key, frame))
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(LevelChoice),
    Quit,
}

#[derive(Clone, Copy, Debug)]
enum LevelChoice {
    Campaign,
    BossRush(BossKind),
}

impl LevelChoice {
    fn director(self) -> LevelDirector {
        match self {
            LevelChoice::Campaign => LevelDirector::campaign(),
            LevelChoice::BossRush(kind) => LevelDirector::boss_rush(kind),
        }
    }
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;
    let left = cx.saturating_sub(14);

    let title = "★  STAR  STRIKER  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(left, cy.saturating_sub(5)))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("[1] "))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print("Campaign"))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("  waves and all five bosses"))?;

    out.queue(cursor::MoveTo(left, cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Boss rush: press B, then"))?;

    for (i, kind) in BossKind::ALL.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", i + 1)))?;
        out.queue(style::SetForegroundColor(Color::Red))?;
        out.queue(Print(format!("{:<10}", kind.name())))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" {} HP", kind.profile().max_hp)))?;
    }

    out.queue(cursor::MoveTo(left, cy + 4))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Power-ups: "))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print("D"))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(" double  "))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print("T"))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(" triple  "))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print("★"))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(" spread"))?;

    out.queue(cursor::MoveTo(left, cy + 6))?;
    out.queue(Print("Mouse / Arrows : Move   SPACE / Click : Shoot   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    let mut boss_select = false;
    loop {
        let (code, kind) = match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind, .. })) => (code, kind),
            Ok(_) => continue,
            // Input thread gone; nothing more can be selected.
            Err(_) => return Ok(MenuResult::Quit),
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        match code {
            KeyCode::Char('1') if !boss_select => {
                return Ok(MenuResult::Start(LevelChoice::Campaign));
            }
            KeyCode::Char('b') | KeyCode::Char('B') => boss_select = true,
            KeyCode::Char(c @ '1'..='5') if boss_select => {
                let index = c as usize - '1' as usize;
                return Ok(MenuResult::Start(LevelChoice::BossRush(BossKind::ALL[index])));
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(MenuResult::Quit);
            }
            _ => boss_select = false,
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Keys are tracked in a `key_frame` map of the frame each was last seen, so
/// movement and fire can be held together on terminals with or without
/// key-release events. The mouse pointer overrides keyboard nudging whenever
/// it moves.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    frame_time: Duration,
) -> std::io::Result<bool> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut mouse_fire = false;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let (width, height) = terminal::size()?;
        let view = Viewport { width, height };
        let mut pointer: Option<Vec2> = None;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code.clone(), frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(true);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(true);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if state.status == GameStatus::GameOver =>
                            {
                                return Ok(false);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                        pointer = Some(view.to_field(column, row));
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        mouse_fire = true;
                        pointer = Some(view.to_field(column, row));
                    }
                    MouseEventKind::Up(MouseButton::Left) => mouse_fire = false,
                    _ => {}
                },
                _ => {}
            }
        }

        // ── Held keys nudge the pointer relative to the ship ──────────────────
        let mut nudge = Vec2::ZERO;
        if any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame) {
            nudge.x -= KEY_NUDGE;
        }
        if any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame) {
            nudge.x += KEY_NUDGE;
        }
        if any_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame) {
            nudge.y -= KEY_NUDGE;
        }
        if any_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame) {
            nudge.y += KEY_NUDGE;
        }
        if pointer.is_none() && nudge != Vec2::ZERO {
            pointer = Some(state.player.pos + nudge);
        }

        let input = FrameInput {
            pointer,
            fire: mouse_fire || is_held(&key_frame, &KeyCode::Char(' '), frame),
        };

        if state.status == GameStatus::Playing {
            tick(state, input, rng);
        }

        display::render(out, &snapshot(state), view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Trace output would corrupt the alternate screen, so it only goes to a file.
fn init_logging(config: &GameConfig) -> Result<(), GameError> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let config = GameConfig::from_env()?;
    init_logging(&config)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Blocking event reads live on their own thread so the game loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(GameError::from)
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(config.frame_rate));
    info!(seed = ?config.seed, fps = config.frame_rate, "starting");

    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start(choice) => {
                info!(?choice, "new run");
                let mut state = init_state(choice.director());
                let quit = game_loop(out, &mut state, rx, &mut rng, frame_time)?;
                info!(
                    ticks = state.tick,
                    kills = state.kills,
                    bosses = state.bosses_defeated,
                    misses = state.misses,
                    "run ended"
                );
                if quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
