//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable frame snapshot.
//! No game logic is performed; this module only translates the snapshot
//! into terminal commands, scaling field units down to character cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;
use star_striker::constants::{FIELD_HEIGHT, FIELD_WIDTH, TICKS_PER_SECOND};
use star_striker::entities::PowerKind;
use star_striker::frame::{Drawable, FrameSnapshot, Hud, ShotLook, Sprite};
use star_striker::player::WeaponPower;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_STAR: Color = Color::DarkGrey;
const C_HUD_TIME: Color = Color::Yellow;
const C_HUD_HP: Color = Color::Red;
const C_HUD_COMBO: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_THRUSTER: Color = Color::DarkYellow;
const C_ENEMY_BASIC: Color = Color::Green;
const C_ENEMY_SHOOTER: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_BULLET_BOSS: Color = Color::Red;
const C_TRAIL: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;
const C_POWERUP: Color = Color::Yellow;
const SPARK_COLORS: [Color; 4] = [Color::Red, Color::Yellow, Color::DarkYellow, Color::White];

const STAR_COUNT: u16 = 40;

// ── Field ↔ terminal mapping ──────────────────────────────────────────────────

/// Terminal rectangle the play field is drawn into (inside the border).
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    fn cols(self) -> f32 {
        self.width.saturating_sub(2).max(1) as f32
    }

    fn rows(self) -> f32 {
        self.height.saturating_sub(4).max(1) as f32
    }

    /// Field position → terminal cell, or `None` when outside the border.
    fn to_cell(self, pos: Vec2) -> Option<(u16, u16)> {
        let col = 1.0 + pos.x / FIELD_WIDTH * self.cols();
        let row = 2.0 + pos.y / FIELD_HEIGHT * self.rows();
        let inside = col >= 1.0
            && col < self.width.saturating_sub(1) as f32
            && row >= 2.0
            && row < self.height.saturating_sub(2) as f32;
        inside.then(|| (col as u16, row as u16))
    }

    /// Terminal cell → field position (used for mouse input).
    pub fn to_field(self, col: u16, row: u16) -> Vec2 {
        let x = (col as f32 - 1.0 + 0.5) / self.cols() * FIELD_WIDTH;
        let y = (row as f32 - 2.0 + 0.5) / self.rows() * FIELD_HEIGHT;
        Vec2::new(x, y)
    }

    /// Size in cells of something `size` field units large (at least 1×1).
    fn cells(self, size: Vec2) -> (u16, u16) {
        let w = (size.x / FIELD_WIDTH * self.cols()).round().max(1.0) as u16;
        let h = (size.y / FIELD_HEIGHT * self.rows()).round().max(1.0) as u16;
        (w, h)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, frame: &FrameSnapshot, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_stars(out, frame.background_offset, view)?;

    for drawable in &frame.drawables {
        draw_sprite(out, drawable, frame.hud.ticks, view)?;
    }

    draw_hud(out, &frame.hud, view)?;
    draw_controls_hint(out, view)?;

    if frame.hud.game_over {
        draw_game_over(out, &frame.hud, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border & background ───────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

/// Fixed star pattern shifted down by the scroll offset.
fn draw_stars<W: Write>(out: &mut W, offset: f32, view: Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STAR))?;
    for i in 0..STAR_COUNT {
        let x = (i as f32 * 197.0) % FIELD_WIDTH;
        let y = (i as f32 * 331.0 + offset) % FIELD_HEIGHT;
        if let Some((col, row)) = view.to_cell(Vec2::new(x, y)) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("."))?;
        }
    }
    Ok(())
}

// ── HUD (row 0 plus the boss gauge on the top border) ─────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, view: Viewport) -> std::io::Result<()> {
    // Time and hit-points, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(format!("Time:{:>5}s  ", hud.ticks / TICKS_PER_SECOND)))?;
    out.queue(style::SetForegroundColor(C_HUD_HP))?;
    out.queue(Print(format!("HP:{}", "♥".repeat(hud.hp.max(0) as usize))))?;

    // Combo, centre
    if let Some(label) = &hud.combo {
        let cx = (view.width / 2).saturating_sub(label.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(cx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_COMBO))?;
        out.queue(Print(label))?;
    }

    // Weapon, right
    let weapon = match hud.power {
        WeaponPower::Normal => "[ NORMAL ]",
        WeaponPower::Double => "[ DOUBLE ]",
        WeaponPower::Triple => "[ TRIPLE ]",
        WeaponPower::Spread => "[ SPREAD ]",
    };
    let rx = view.width.saturating_sub(weapon.len() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_POWERUP))?;
    out.queue(Print(weapon))?;

    if let Some(boss) = &hud.boss {
        let slots = 20usize;
        let filled = (boss.hp.max(0) as usize * slots) / boss.max_hp.max(1) as usize;
        let gauge = format!(
            " {} [{}{}] ",
            boss.name,
            "█".repeat(filled),
            "░".repeat(slots - filled.min(slots))
        );
        let gx = (view.width / 2).saturating_sub(gauge.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(gx, 1))?;
        out.queue(style::SetForegroundColor(Color::Red))?;
        out.queue(Print(gauge))?;
    }

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    d: &Drawable,
    tick: u32,
    view: Viewport,
) -> std::io::Result<()> {
    match d.sprite {
        Sprite::Player => draw_player(out, d, view),
        // Blink while invulnerable
        Sprite::PlayerBlink if (tick / 4) % 2 == 0 => draw_player(out, d, view),
        Sprite::PlayerBlink => Ok(()),
        Sprite::Thruster => put(out, d.pos, "·", C_THRUSTER, view),
        Sprite::PlayerShot => {
            draw_trail(out, d, view)?;
            put(out, d.pos, "║", C_BULLET_PLAYER, view)
        }
        Sprite::EnemyShot(look) => {
            draw_trail(out, d, view)?;
            put(out, d.pos, shot_glyph(look), C_BULLET_ENEMY, view)
        }
        Sprite::BossShot(look) => {
            draw_trail(out, d, view)?;
            put(out, d.pos, shot_glyph(look), C_BULLET_BOSS, view)
        }
        Sprite::BasicEnemy => draw_two_row(out, d.pos, "«▼»", "╚═╝", C_ENEMY_BASIC, view),
        Sprite::ShooterEnemy => draw_two_row(out, d.pos, "(◎)", "╰─╯", C_ENEMY_SHOOTER, view),
        Sprite::Boss(_) => draw_boss(out, d, view),
        Sprite::PowerUp(kind) => {
            let glyph = match kind {
                PowerKind::Double => "D",
                PowerKind::Triple => "T",
                PowerKind::Spread => "★",
            };
            put(out, d.pos, glyph, C_POWERUP, view)
        }
        Sprite::Spark => {
            let color = SPARK_COLORS[d.frame as usize % SPARK_COLORS.len()];
            put(out, d.pos, "*", color, view)
        }
    }
}

fn put<W: Write>(
    out: &mut W,
    pos: Vec2,
    glyph: &str,
    color: Color,
    view: Viewport,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(pos) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

fn shot_glyph(look: ShotLook) -> &'static str {
    match look {
        ShotLook::Plain => "•",
        ShotLook::Homing => "◆",
        ShotLook::Bouncing => "o",
        ShotLook::Splitting => "✶",
        ShotLook::Zigzag => "~",
        ShotLook::Gravity => "●",
        ShotLook::Teleporting => "¤",
    }
}

/// Older trail points only; the head is drawn by the caller.
fn draw_trail<W: Write>(out: &mut W, d: &Drawable, view: Viewport) -> std::io::Result<()> {
    for point in d.trail.iter().step_by(2) {
        put(out, *point, "·", C_TRAIL, view)?;
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, d: &Drawable, view: Viewport) -> std::io::Result<()> {
    // Enhanced sprite (2 rows, 3 cols):
    //   ▲       ← row y      (tip)
    //  /█\      ← row y+1    (fuselage + wings)
    if let Some((col, row)) = view.to_cell(d.pos) {
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("▲"))?;
        if row + 1 < view.height.saturating_sub(2) {
            out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
            out.queue(Print("/█\\"))?;
        }
    }
    Ok(())
}

fn draw_two_row<W: Write>(
    out: &mut W,
    pos: Vec2,
    top: &str,
    bottom: &str,
    color: Color,
    view: Viewport,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.to_cell(pos) {
        let lx = col.saturating_sub(1).max(1);
        out.queue(style::SetForegroundColor(color))?;
        out.queue(cursor::MoveTo(lx, row))?;
        out.queue(Print(top))?;
        if row + 1 < view.height.saturating_sub(2) {
            out.queue(cursor::MoveTo(lx, row + 1))?;
            out.queue(Print(bottom))?;
        }
    }
    Ok(())
}

/// Boxed hull scaled to the boss size; the frame picks the colour
/// (0 idle, 1 firing, 2 damage flash).
fn draw_boss<W: Write>(out: &mut W, d: &Drawable, view: Viewport) -> std::io::Result<()> {
    let color = match d.frame {
        1 => Color::Yellow,
        2 => Color::Red,
        _ => Color::White,
    };
    let (w, h) = view.cells(d.size);
    let w = w.max(3);
    let h = h.max(2);
    let top_left = d.pos - d.size * 0.5;
    let Some((col, row)) = view.to_cell(top_left).or_else(|| {
        // Still entering from above: clip to the first playable row.
        view.to_cell(Vec2::new(top_left.x.max(0.0), 0.0))
    }) else {
        return Ok(());
    };

    out.queue(style::SetForegroundColor(color))?;
    let bottom = view.height.saturating_sub(2);
    for dy in 0..h {
        let r = row + dy;
        if r >= bottom {
            break;
        }
        let line = if dy == 0 {
            format!("╔{}╗", "═".repeat(w as usize - 2))
        } else if dy == h - 1 {
            format!("╚{}╝", "═".repeat(w as usize - 2))
        } else if dy == h / 2 {
            // Eye slides towards the player.
            let inner = w as usize - 2;
            let reach = (inner / 2) as f32;
            let left =
                ((inner / 2) as f32 + d.gaze.x * reach).clamp(0.0, (inner - 1) as f32) as usize;
            format!("║{}◉{}║", " ".repeat(left), " ".repeat(inner - left - 1))
        } else {
            format!("║{}║", " ".repeat(w as usize - 2))
        };
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Mouse / Arrows : Move   SPACE / Click : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, hud: &Hud, view: Viewport) -> std::io::Result<()> {
    let time_line = format!("Survived: {:>5}s", hud.ticks / TICKS_PER_SECOND);

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (time_line.as_str(), Color::Yellow),
        ("R - Menu  Q - Quit", Color::White),
    ];

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
