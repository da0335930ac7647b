/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session.  No game logic is performed; this module only translates state
/// into terminal commands.  The pixel field is squeezed into whatever the
/// terminal offers, so one cell covers many pixels.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use ocean_cleanup::entities::{Facing, Sprite, TrashColor};
use ocean_cleanup::leaderboard::Entry;
use ocean_cleanup::session::{Session, SessionStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_TIMER: Color = Color::Yellow;
const C_ORANGE: Color = Color::Rgb { r: 255, g: 165, b: 0 };
const C_TEAL: Color = Color::Rgb { r: 0, g: 128, b: 128 };
const C_RED_FISH: Color = Color::Red;
const C_BLUE_FISH: Color = Color::Blue;
const C_STUNNED: Color = Color::DarkGrey;
const C_ROCK: Color = Color::Grey;
const C_ALGAE: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;
const C_OVERLAY: Color = Color::Cyan;

/// One-off messages drawn over the field.
#[derive(Clone, Copy, Debug, Default)]
pub struct Overlay<'a> {
    /// e.g. "Stage 1 Complete. Onto Stage 2..."
    pub banner: Option<&'a str>,
}

/// Terminal rows/columns available to the play field.
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    fn inner_cols(&self) -> i32 {
        self.width.saturating_sub(2).max(1) as i32
    }

    fn inner_rows(&self) -> i32 {
        self.height.saturating_sub(4).max(1) as i32
    }

    /// Map a field pixel to a terminal cell inside the border.
    fn cell(&self, session: &Session, px: i32, py: i32) -> (u16, u16) {
        let cols = self.inner_cols();
        let rows = self.inner_rows();
        let col = (px * cols / session.config.width).clamp(0, cols - 1);
        let row = (py * rows / session.config.height).clamp(0, rows - 1);
        ((col + 1) as u16, (row + 2) as u16)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &Session, overlay: &Overlay) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport { width, height };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, session, &view)?;

    for entity in session.visible_entities() {
        let rect = entity.rect();
        let (col, row) = view.cell(
            session,
            rect.x + rect.w / 2,
            rect.y + rect.h / 2,
        );
        draw_sprite(out, entity.sprite(), col, row, &view)?;
    }

    match session.status {
        SessionStatus::Countdown { remaining } => {
            let secs = remaining.as_secs_f64().ceil() as u64;
            draw_centered(out, &view, 0, &secs.to_string(), C_OVERLAY)?;
        }
        SessionStatus::Paused => draw_pause_menu(out, &view)?,
        SessionStatus::Running | SessionStatus::Complete { .. } => {}
    }
    if let Some(banner) = overlay.banner {
        draw_centered(out, &view, -2, banner, C_HUD)?;
    }

    draw_controls_hint(out, &view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
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

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &Session, view: &Viewport) -> std::io::Result<()> {
    let (orange_got, orange_need) = session.progress(TrashColor::Orange);
    let (teal_got, teal_need) = session.progress(TrashColor::Teal);

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Stage: {}  Level: {}  ",
        session.stage(),
        session.level_number()
    )))?;
    out.queue(style::SetForegroundColor(C_ORANGE))?;
    out.queue(Print(format!("Orange: {orange_got}/{orange_need}  ")))?;
    out.queue(style::SetForegroundColor(C_TEAL))?;
    out.queue(Print(format!("Teal: {teal_got}/{teal_need}")))?;

    let timer = format!("Time: {:.1}s", session.elapsed.as_secs_f64());
    let x = view.width.saturating_sub(timer.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(x, 0))?;
    out.queue(style::SetForegroundColor(C_TIMER))?;
    out.queue(Print(timer))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn glyph(sprite: Sprite) -> (&'static str, Color) {
    match sprite {
        Sprite::Fish {
            team,
            facing,
            stunned,
        } => {
            let body = match facing {
                Facing::Left => "<><",
                Facing::Right => "><>",
            };
            let color = match (stunned, team) {
                (true, _) => C_STUNNED,
                (false, TrashColor::Orange) => C_RED_FISH,
                (false, TrashColor::Teal) => C_BLUE_FISH,
            };
            (body, color)
        }
        Sprite::Trash(TrashColor::Orange) => ("●", C_ORANGE),
        Sprite::Trash(TrashColor::Teal) => ("●", C_TEAL),
        Sprite::Rock => ("▓", C_ROCK),
        Sprite::Algae => ("♣", C_ALGAE),
    }
}

fn draw_sprite<W: Write>(
    out: &mut W,
    sprite: Sprite,
    col: u16,
    row: u16,
    view: &Viewport,
) -> std::io::Result<()> {
    let (text, color) = glyph(sprite);
    let len = text.chars().count() as u16;
    // Centre multi-cell glyphs without crossing the side walls.
    let max_col = view.width.saturating_sub(1 + len).max(1);
    let col = col.saturating_sub(len / 2).clamp(1, max_col);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row_offset: i32,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let row = (view.height as i32 / 2 + row_offset).max(0) as u16;
    let col = (view.width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_pause_menu<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", C_OVERLAY),
        ("║       PAUSED       ║", C_OVERLAY),
        ("╚════════════════════╝", C_OVERLAY),
        ("SPACE / R  Resume", C_HUD),
        ("N  Restart game   ", C_HUD),
        ("M  Main menu      ", C_HUD),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        draw_centered(out, view, i as i32 - 3, text, *color)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "Red: W A S D   Blue: ← ↑ → ↓   SPACE : Pause   Q : Quit",
    ))?;
    Ok(())
}

// ── End of game ───────────────────────────────────────────────────────────────

/// Team-name prompt shown after the last stage.
pub fn render_name_prompt<W: Write>(out: &mut W, score: f64, name: &str) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport { width, height };

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_centered(out, &view, -3, &format!("Game Over! Time: {score:.2}s"), C_TIMER)?;
    draw_centered(out, &view, 0, &format!("Enter team name: {name}_"), C_HUD)?;
    draw_centered(out, &view, 2, "ENTER : Save", C_HINT)?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

/// Fastest teams, with the row just recorded highlighted.
pub fn render_leaderboard<W: Write>(
    out: &mut W,
    entries: &[Entry],
    highlight: Option<usize>,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport { width, height };

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_centered(out, &view, -4, "Leaderboard:", C_OVERLAY)?;
    for (i, entry) in entries.iter().enumerate() {
        let color = if Some(i) == highlight { C_TIMER } else { C_HUD };
        let line = format!("{}. {}: {:.2}s", i + 1, entry.team, entry.score);
        draw_centered(out, &view, i as i32 - 2, &line, color)?;
    }
    draw_centered(out, &view, entries.len() as i32, "Press any key", C_HINT)?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
