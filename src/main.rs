mod audio;
mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{debug, info, warn};
use rand::thread_rng;

use buzz_bombers::compute::{
    move_player_left, move_player_right, new_run, player_fire, run_over, tick,
};
use buzz_bombers::config::GameConfig;
use buzz_bombers::entities::{GamePhase, GameState};
use buzz_bombers::Result;

use crate::audio::Audio;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS
const DT: f32 = 0.033; // seconds per frame, matches FRAME

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    cfg: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> Result<MenuResult> {
    display::draw_menu(out, cfg)?;

    // Block until the player makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            })) => {
                if kind != KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Enter => return Ok(MenuResult::Start),
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                        return Ok(MenuResult::Quit);
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(MenuResult::Quit);
                    }
                    _ => {}
                }
            }
            Ok(_) => {}
            // Input thread gone → nothing left to wait for
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Apply a discrete fire intent; the shot only costs ammo (and makes noise)
/// when the simulation accepts it.  A cue that fails to queue is dropped.
fn fire(state: &mut GameState, audio: &Audio) {
    let ammo_before = state.ammo;
    *state = player_fire(state);
    if state.ammo < ammo_before {
        if let Err(err) = audio.play_laser() {
            warn!("laser cue dropped: {err}");
        }
    }
}

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and apply their movement continuously.
/// Firing stays event-driven (one shot per Press/Repeat), so tapping Space
/// spends exactly one bullet.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    cfg: &GameConfig,
    audio: &Audio,
    rx: &mpsc::Receiver<Event>,
) -> Result<bool> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char(' ') => fire(state, audio),
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp + keep autofire going
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                    if code == KeyCode::Char(' ') {
                        fire(state, audio);
                    }
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Apply held-key movement every frame ───────────────────────────────
        if state.phase == GamePhase::Playing {
            if is_held(&key_frame, &KeyCode::Left, frame) {
                *state = move_player_left(state, cfg, DT);
            } else if is_held(&key_frame, &KeyCode::Right, frame) {
                *state = move_player_right(state, cfg, DT);
            }
        }

        // The tick runs in every phase: after game over / finish it only
        // advances the end-overlay timer.
        *state = tick(state, cfg, DT, &mut rng);

        display::render(out, state, cfg)?;

        if run_over(state, cfg) {
            return Ok(false);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let (term_w, term_h) = terminal::size()?;
    let cfg = GameConfig::for_terminal(term_w, term_h);
    info!(
        "field {}x{} cells (terminal {}x{})",
        cfg.field_w, cfg.field_h, term_w, term_h
    );

    // The game does not run silent: grab the audio device (and start the
    // melody) before touching the terminal, so a failure exits cleanly.
    let audio = Audio::init(&cfg).context("could not open the audio device")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &cfg, &audio, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result?;
    Ok(())
}

fn run<W: Write>(
    out: &mut W,
    cfg: &GameConfig,
    audio: &Audio,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    loop {
        match show_menu(out, cfg, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut state = new_run(cfg);
                let quit = game_loop(out, &mut state, cfg, audio, rx)?;
                debug!("run ended with {} points", state.score);
                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
