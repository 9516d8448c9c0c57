//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use buzz_bombers::config::GameConfig;
use buzz_bombers::entities::{Bee, Bullet, GamePhase, GameState, Honeycomb, Tier};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_AMMO: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_WORKER: Color = Color::Yellow;
const C_KILLER: Color = Color::Red;
const C_COMB: Color = Color::DarkYellow;
const C_BULLET: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Screen layout ─────────────────────────────────────────────────────────────
//
// Row 0 is the HUD, row 1 the top border, then the field, the bottom border
// and the controls hint.  Field cell (x, y) lands on screen column x + 1
// (inside the walls) and screen row y + 2.

const FIELD_COL: u16 = 1;
const FIELD_ROW: u16 = 2;

fn cell(x: f32, y: f32) -> cursor::MoveTo {
    cursor::MoveTo(x as u16 + FIELD_COL, y as u16 + FIELD_ROW)
}

fn screen_size(cfg: &GameConfig) -> (u16, u16) {
    (cfg.field_w + 2, cfg.field_h + 4)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, cfg: &GameConfig) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, cfg)?;
    draw_hud(out, state, cfg)?;

    for comb in &state.combs {
        draw_comb(out, comb)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, bullet)?;
    }
    for bee in &state.bees {
        draw_bee(out, bee, cfg)?;
    }

    draw_player(out, state)?;
    draw_controls_hint(out, cfg)?;

    if state.intro {
        draw_level_banner(out, state, cfg)?;
    }
    if state.phase != GamePhase::Playing {
        draw_end_overlay(out, state, cfg)?;
    }

    // Park cursor in a harmless spot and flush
    let (_, screen_h) = screen_size(cfg);
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen_h.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cfg: &GameConfig) -> std::io::Result<()> {
    let (screen_w, _) = screen_size(cfg);
    let bottom = cfg.field_h + FIELD_ROW;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(cfg.field_w as usize))))?;

    // Bottom bar, just under the last field row
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(cfg.field_w as usize))))?;

    // Side walls
    for row in FIELD_ROW..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen_w.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, cfg: &GameConfig) -> std::io::Result<()> {
    let (screen_w, _) = screen_size(cfg);

    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", state.score)))?;

    // Remaining ammo — right
    let ammo_text = format!("Bullets: {:>2}", state.ammo);
    let rx = screen_w.saturating_sub(ammo_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_AMMO))?;
    out.queue(Print(&ammo_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //    ▲      ← row y      (muzzle)
    //   /█\     ← row y+1    (turret body)
    let p = &state.player;
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    out.queue(cell(p.x + 1.0, p.y))?;
    out.queue(Print("▲"))?;

    out.queue(cell(p.x, p.y + 1.0))?;
    out.queue(Print("/█\\"))?;

    Ok(())
}

fn draw_bee<W: Write>(out: &mut W, bee: &Bee, cfg: &GameConfig) -> std::io::Result<()> {
    // A bee frozen below the field on the game-over frame stays hidden
    if bee.y >= cfg.field_h as f32 {
        return Ok(());
    }
    let (color, art) = match bee.tier {
        Tier::Worker => (C_WORKER, "«ö»"),
        Tier::Killer => (C_KILLER, "»Ж«"),
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cell(bee.x, bee.y))?;
    out.queue(Print(art))?;
    Ok(())
}

fn draw_comb<W: Write>(out: &mut W, comb: &Honeycomb) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_COMB))?;
    out.queue(cell(comb.x, comb.y))?;
    out.queue(Print("⬡"))?;
    Ok(())
}

fn draw_bullet<W: Write>(out: &mut W, bullet: &Bullet) -> std::io::Result<()> {
    if bullet.y < 0.0 {
        return Ok(());
    }
    out.queue(style::SetForegroundColor(C_BULLET))?;
    out.queue(cell(bullet.x, bullet.y))?;
    out.queue(Print("•"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, cfg: &GameConfig) -> std::io::Result<()> {
    let (_, screen_h) = screen_size(cfg);
    out.queue(cursor::MoveTo(1, screen_h.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → : Move   SPACE : Shoot   ESC : Quit"))?;
    Ok(())
}

// ── Level-intro banner ────────────────────────────────────────────────────────

fn draw_level_banner<W: Write>(
    out: &mut W,
    state: &GameState,
    cfg: &GameConfig,
) -> std::io::Result<()> {
    let (screen_w, screen_h) = screen_size(cfg);
    let text = format!("Level: {}", state.level);
    let col = (screen_w / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, screen_h / 2))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&text))?;
    Ok(())
}

// ── Menu screen ───────────────────────────────────────────────────────────────

/// Draw the complete menu screen and flush it.  Input handling stays with
/// the caller.
pub fn draw_menu<W: Write>(out: &mut W, cfg: &GameConfig) -> std::io::Result<()> {
    let (screen_w, screen_h) = screen_size(cfg);
    let cx = screen_w / 2;
    let cy = screen_h / 2;

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let title = "⬡  BUZZ  BOMBERS  ⬡";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(4),
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(title))?;

    let start = "Press ENTER to Start";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(start.chars().count() as u16 / 2),
        cy.saturating_sub(1),
    ))?;
    out.queue(style::SetForegroundColor(Color::Blue))?;
    out.queue(Print(start))?;

    let exit = "Press ESC to Exit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(exit.chars().count() as u16 / 2),
        cy + 1,
    ))?;
    out.queue(style::SetForegroundColor(Color::Red))?;
    out.queue(Print(exit))?;

    let hint = "← → : Move   SPACE : Shoot   ESC : Quit";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        cy + 4,
    ))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── End-of-run overlay ────────────────────────────────────────────────────────

fn draw_end_overlay<W: Write>(
    out: &mut W,
    state: &GameState,
    cfg: &GameConfig,
) -> std::io::Result<()> {
    let (screen_w, screen_h) = screen_size(cfg);

    let (title, box_color) = match state.phase {
        GamePhase::Finished => ("║   GAME  FINISHED   ║", Color::Green),
        _ => ("║     GAME  OVER     ║", Color::Red),
    };
    let score_line = format!("Total Points: {}", state.score);

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", box_color),
        (title, box_color),
        ("╚════════════════════╝", box_color),
        (&score_line, Color::Yellow),
    ];

    let cx = screen_w / 2;
    let start_row = (screen_h / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
