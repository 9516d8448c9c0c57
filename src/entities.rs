//! All game entity types: pure data plus the per-entity movement rules.
//!
//! Positions are field cells stored as `f32` so sub-cell speeds stay smooth
//! at a fixed timestep; the display layer truncates to whole cells. The
//! cross-entity logic (collisions, scoring, waves) lives in `compute`.

use crate::config::GameConfig;

/// Bee speed class. Determines base speed, kill score and sprite.
#[derive(Clone, Debug, PartialEq)]
pub enum Tier {
    Worker,
    Killer,
}

impl Tier {
    /// Base horizontal speed for this tier, cells per second.
    pub fn speed(&self, cfg: &GameConfig) -> f32 {
        match self {
            Tier::Worker => cfg.worker_speed,
            Tier::Killer => cfg.killer_speed,
        }
    }

    /// Score awarded for destroying a bee of this tier.
    pub fn score(&self, cfg: &GameConfig) -> u32 {
        match self {
            Tier::Worker => cfg.worker_score,
            Tier::Killer => cfg.killer_score,
        }
    }
}

/// Phase of one run. The level intro is a `Playing` sub-state (a flag on
/// `GameState`), not a phase; the menu lives outside the run entirely.
#[derive(Clone, Debug, PartialEq)]
pub enum GamePhase {
    Playing,
    GameOver,
    Finished,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
}

impl Bullet {
    pub const W: f32 = 1.0;
    pub const H: f32 = 1.0;

    /// True once the bullet has fully left the top edge.
    pub fn off_top(&self) -> bool {
        self.y < 0.0
    }

    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, Self::W, Self::H)
    }
}

// ── Bees ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bee {
    pub x: f32,
    pub y: f32,
    /// Speed class; fixes `speed` at spawn and the kill score.
    pub tier: Tier,
    /// Horizontal speed, cells per second.
    pub speed: f32,
    /// Horizontal heading: `1.0` rightward, `-1.0` leftward.
    pub direction: f32,
    pub alive: bool,
}

impl Bee {
    pub const W: f32 = 3.0;
    pub const H: f32 = 1.0;

    pub fn new(x: f32, y: f32, tier: Tier, direction: f32, cfg: &GameConfig) -> Self {
        let speed = tier.speed(cfg);
        Bee { x, y, tier, speed, direction, alive: true }
    }

    /// True when the bee touches either side of the field. The caller flips
    /// `direction` and applies one `tier_drop` on the tick this first holds.
    pub fn at_edge(&self, cfg: &GameConfig) -> bool {
        self.x <= 0.0 || self.x >= cfg.field_w as f32 - Self::W
    }

    /// True once the bee has dropped past the bottom of the field, which
    /// ends the run immediately.
    pub fn escaped(&self, cfg: &GameConfig) -> bool {
        self.y >= cfg.field_h as f32
    }

    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, Self::W, Self::H)
    }
}

// ── Honeycombs ────────────────────────────────────────────────────────────────

/// Collectible left behind by a destroyed bee. Stationary; shootable once its
/// immunity window elapses; pays a bonus at every wave-clear it survives.
#[derive(Clone, Debug)]
pub struct Honeycomb {
    pub x: f32,
    pub y: f32,
    /// Seconds since spawn, advanced by the tick's `dt`.
    pub age: f32,
    /// Set when shot after the immunity window; collected combs are purged
    /// the same tick and never pay bonus.
    pub collected: bool,
}

impl Honeycomb {
    pub const W: f32 = 1.0;
    pub const H: f32 = 1.0;

    /// Spawn a comb centered on the given bee.
    pub fn from_bee(bee: &Bee) -> Self {
        Honeycomb {
            x: bee.x + Bee::W / 2.0 - Self::W / 2.0,
            y: bee.y + Bee::H / 2.0 - Self::H / 2.0,
            age: 0.0,
            collected: false,
        }
    }

    /// A fresh comb cannot be shot away until its age passes the window.
    pub fn immune(&self, cfg: &GameConfig) -> bool {
        self.age < cfg.immune_secs
    }

    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        (self.x, self.y, Self::W, Self::H)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    /// Fixed row near the bottom of the field.
    pub y: f32,
}

impl Player {
    pub const W: f32 = 3.0;
    pub const H: f32 = 2.0;

    /// Column a fired bullet starts from: the nose at the sprite's center.
    pub fn nose_x(&self) -> f32 {
        self.x + Self::W / 2.0 - Bullet::W / 2.0
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box overlap, strict on both axes: boxes that merely touch
/// along an edge do not collide.
pub fn intersects(a: (f32, f32, f32, f32), b: (f32, f32, f32, f32)) -> bool {
    a.0 < b.0 + b.2 && b.0 < a.0 + a.2 && a.1 < b.1 + b.3 && b.1 < a.1 + a.3
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire state of one run. Cloneable so the pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub bees: Vec<Bee>,
    pub combs: Vec<Honeycomb>,
    /// Monotonically non-decreasing across the run.
    pub score: u32,
    /// Bullets remaining, `0..=max_bullets`.
    pub ammo: u32,
    /// 0 until the first wave spawns, then 1..=final_level.
    pub level: u32,
    /// Level banner showing; also suppresses the ammo-exhaustion game over.
    pub intro: bool,
    /// Seconds the banner has been up.
    pub intro_age: f32,
    /// Seconds spent in a terminal phase, for the end-overlay hold.
    pub end_age: f32,
    pub phase: GamePhase,
}
