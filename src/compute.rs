//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (plus the config, a timestep and, where needed, an RNG handle)
//! and returns a brand-new `GameState`.  Side effects are limited to the
//! injected RNG, so every rule in here is testable with a seeded generator.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{intersects, Bee, Bullet, GamePhase, GameState, Honeycomb, Player, Tier};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the state for a fresh run: cannon centered near the bottom, a full
/// magazine, and no wave yet (the first tick spawns level 1).
pub fn new_run(cfg: &GameConfig) -> GameState {
    GameState {
        player: Player {
            x: (cfg.field_w as f32 - Player::W) / 2.0,
            y: cfg.field_h as f32 - 3.0,
        },
        bullets: Vec::new(),
        bees: Vec::new(),
        combs: Vec::new(),
        score: 0,
        ammo: cfg.max_bullets,
        level: 0,
        intro: false,
        intro_age: 0.0,
        end_age: 0.0,
        phase: GamePhase::Playing,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &GameState, cfg: &GameConfig, dt: f32) -> GameState {
    let new_x = (state.player.x - cfg.player_speed * dt).max(0.0);
    GameState {
        player: Player {
            x: new_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

pub fn move_player_right(state: &GameState, cfg: &GameConfig, dt: f32) -> GameState {
    let new_x = (state.player.x + cfg.player_speed * dt).min(cfg.field_w as f32 - Player::W);
    GameState {
        player: Player {
            x: new_x,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire one shot from the cannon nose.  Rejected with no state change when
/// the magazine is empty or the run has already ended.
pub fn player_fire(state: &GameState) -> GameState {
    if state.phase != GamePhase::Playing || state.ammo == 0 {
        return state.clone();
    }
    let new_bullet = Bullet {
        x: state.player.nose_x(),
        y: state.player.y - Bullet::H,
    };
    let mut bullets = state.bullets.clone();
    bullets.push(new_bullet);
    GameState {
        bullets,
        ammo: state.ammo - 1,
        ..state.clone()
    }
}

// ── Wave spawning ────────────────────────────────────────────────────────────

/// Build the bee roster for `level` (1-based).  Workers enter drifting right,
/// killers drifting left; every fifth bee of a kind starts one drop lower so
/// larger rosters do not stack on a single row.
pub fn spawn_wave(level: u32, cfg: &GameConfig, rng: &mut impl Rng) -> Vec<Bee> {
    let idx = (level - 1) as usize;
    let max_x = (cfg.field_w as f32 - Bee::W) as u32;
    let mut bees = Vec::new();
    for i in 0..cfg.workers_per_level[idx] {
        let x = rng.gen_range(0..max_x) as f32;
        let y = (i / 5) as f32 * cfg.tier_drop;
        bees.push(Bee::new(x, y, Tier::Worker, 1.0, cfg));
    }
    for i in 0..cfg.killers_per_level[idx] {
        let x = rng.gen_range(0..max_x) as f32;
        let y = (i / 5) as f32 * cfg.tier_drop;
        bees.push(Bee::new(x, y, Tier::Killer, -1.0, cfg));
    }
    bees
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one `dt` step.  All randomness comes through
/// `rng` so callers control determinism (useful for tests with a seeded RNG).
///
/// Pass order is part of the game's contract: combs age, bullets climb, bees
/// march (an escape ends the run before anything else this tick), bullets
/// kill bees, leftover bullets collect unguarded combs, the wave controller
/// reacts to an empty field, the magazine reward lands, and only then does
/// the out-of-ammo check bite.
pub fn tick(state: &GameState, cfg: &GameConfig, dt: f32, rng: &mut impl Rng) -> GameState {
    // An ended run only ages the end-of-run overlay; entities stay frozen
    // on screen behind it.
    if state.phase != GamePhase::Playing {
        return GameState {
            end_age: state.end_age + dt,
            ..state.clone()
        };
    }

    let score_at_start = state.score;

    // ── 1. Age honeycombs ────────────────────────────────────────────────────
    let mut combs: Vec<Honeycomb> = state
        .combs
        .iter()
        .map(|c| Honeycomb {
            age: c.age + dt,
            ..c.clone()
        })
        .collect();

    // ── 2. Move bullets ──────────────────────────────────────────────────────
    let mut bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .map(|b| Bullet {
            y: b.y - cfg.bullet_speed * dt,
            ..b.clone()
        })
        .collect();

    // ── 3. Move bees ─────────────────────────────────────────────────────────
    // Touching a side wall drops the bee one row, turns it around and snaps
    // it back inside so it cannot ping-pong on the wall.
    let bees: Vec<Bee> = state
        .bees
        .iter()
        .map(|b| {
            let mut bee = Bee {
                x: b.x + b.speed * b.direction * dt,
                ..b.clone()
            };
            if bee.at_edge(cfg) {
                bee.y += cfg.tier_drop;
                bee.direction = -bee.direction;
                bee.x = bee.x.clamp(0.0, cfg.field_w as f32 - Bee::W);
            }
            bee
        })
        .collect();

    // A bee past the bottom row ends the run on the spot; the rest of the
    // tick never happens, so the final score is exactly what was on screen.
    if bees.iter().any(|b| b.escaped(cfg)) {
        return GameState {
            bullets,
            bees,
            combs,
            phase: GamePhase::GameOver,
            ..state.clone()
        };
    }

    // ── 4. Collision: bullets ↔ bees ─────────────────────────────────────────
    // A hit kills the bee, drops a comb centered under it and scores by tier.
    // Bullets are not spent on impact, so one shot can rake several bees on
    // its way up.
    let mut bees = bees;
    let mut score = state.score;
    for bee in bees.iter_mut() {
        for bullet in bullets.iter() {
            if bee.alive && intersects(bee.bounds(), bullet.bounds()) {
                bee.alive = false;
                combs.push(Honeycomb::from_bee(bee));
                score += bee.tier.score(cfg);
                break;
            }
        }
    }
    bees.retain(|b| b.alive);

    // ── 5. Collision: bullets ↔ honeycombs ───────────────────────────────────
    // A comb fresh from a kill is immune for a beat so the shot that dropped
    // it cannot vaporise it in the same breath.
    for comb in combs.iter_mut() {
        if comb.immune(cfg) {
            continue;
        }
        for bullet in bullets.iter() {
            if intersects(comb.bounds(), bullet.bounds()) {
                comb.collected = true;
                break;
            }
        }
    }
    combs.retain(|c| !c.collected);
    bullets.retain(|b| !b.off_top());

    // ── 6. Wave controller ───────────────────────────────────────────────────
    // An empty field bumps the level, pays the comb bonus once per comb still
    // standing, then either ends the game after the last level or spawns the
    // next roster behind its intro banner.  Combs carry over between waves.
    let mut level = state.level;
    let mut intro = state.intro;
    let mut intro_age = state.intro_age;
    let mut phase = GamePhase::Playing;
    if bees.is_empty() {
        level += 1;
        score += cfg.comb_bonus * combs.len() as u32;
        if level > cfg.final_level {
            phase = GamePhase::Finished;
        } else {
            bees = spawn_wave(level, cfg, rng);
            intro = true;
            intro_age = 0.0;
        }
    }

    // ── 7. Magazine reward ───────────────────────────────────────────────────
    // Crossing any multiple-of-50 score boundary during this tick earns a
    // refill, capped at the magazine size.
    let mut ammo = state.ammo;
    if score / 50 > score_at_start / 50 {
        ammo = (ammo + cfg.bullet_reward).min(cfg.max_bullets);
    }

    // ── 8. Out-of-ammo check ─────────────────────────────────────────────────
    // Dry with no banner up loses the run.  The intro window keeps a fresh
    // wave from ending the game before the player has had a chance to shoot.
    if phase == GamePhase::Playing && ammo == 0 && !intro {
        phase = GamePhase::GameOver;
    }

    // ── 9. Intro banner timer ────────────────────────────────────────────────
    if intro {
        intro_age += dt;
        if intro_age > cfg.intro_secs {
            intro = false;
        }
    }

    GameState {
        player: state.player.clone(),
        bullets,
        bees,
        combs,
        score,
        ammo,
        level,
        intro,
        intro_age,
        end_age: state.end_age,
        phase,
    }
}

/// True once an ended run has held its end-of-run overlay long enough to
/// fall back to the menu.
pub fn run_over(state: &GameState, cfg: &GameConfig) -> bool {
    state.phase != GamePhase::Playing && state.end_age >= cfg.end_hold_secs
}
