//! Game configuration — every tunable the simulation reads.
//!
//! One immutable `GameConfig` is built at startup and injected into
//! `compute::new_run` / `compute::tick`; nothing in the core reaches for
//! globals. Units are field cells and seconds; the defaults are tuned for a
//! standard 80×24 terminal.

/// Immutable tunables table for one run.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Playfield width in cells (terminal width minus the side borders).
    pub field_w: u16,
    /// Playfield height in rows (terminal height minus HUD and borders).
    pub field_h: u16,

    /// Player horizontal speed, cells per second.
    pub player_speed: f32,
    /// Bullet upward speed, rows per second.
    pub bullet_speed: f32,
    /// Worker bee horizontal speed, cells per second.
    pub worker_speed: f32,
    /// Killer bee horizontal speed, cells per second.
    pub killer_speed: f32,
    /// Vertical drop applied when a bee reaches a field edge, in rows.
    pub tier_drop: f32,

    /// Ammo capacity; also the starting ammo count.
    pub max_bullets: u32,
    /// Ammo granted when the score crosses a multiple-of-50 boundary.
    pub bullet_reward: u32,
    /// Kill score for a worker bee.
    pub worker_score: u32,
    /// Kill score for a killer bee.
    pub killer_score: u32,
    /// Bonus per honeycomb still standing when a wave clears.
    pub comb_bonus: u32,

    /// Worker bees spawned per level, indexed by `level - 1`.
    pub workers_per_level: [u32; 3],
    /// Killer bees spawned per level, indexed by `level - 1`.
    pub killers_per_level: [u32; 3],
    /// Clearing this level finishes the game.
    pub final_level: u32,

    /// Seconds a fresh honeycomb is immune to bullets.
    pub immune_secs: f32,
    /// Seconds the "Level: N" banner stays up after a wave spawns.
    pub intro_secs: f32,
    /// Seconds the end-of-run message is held before returning to the menu.
    pub end_hold_secs: f32,

    /// Background melody volume, 0.0..=1.0.
    pub music_volume: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_w: 78,
            field_h: 20,
            player_speed: 20.0,
            bullet_speed: 30.0,
            worker_speed: 8.0,
            killer_speed: 13.0,
            tier_drop: 1.0,
            max_bullets: 50,
            bullet_reward: 25,
            worker_score: 10,
            killer_score: 20,
            comb_bonus: 50,
            workers_per_level: [3, 4, 5],
            killers_per_level: [1, 2, 3],
            final_level: 3,
            immune_secs: 0.2,
            intro_secs: 2.0,
            end_hold_secs: 2.0,
            music_volume: 0.2,
        }
    }
}

impl GameConfig {
    /// Build a config whose playfield fills the given terminal.
    ///
    /// One column of border on each side, and four rows of chrome: HUD row,
    /// top border, bottom border, controls hint. Very small terminals are
    /// clamped to a still-playable minimum rather than rejected.
    pub fn for_terminal(term_w: u16, term_h: u16) -> Self {
        Self {
            field_w: term_w.saturating_sub(2).max(30),
            field_h: term_h.saturating_sub(4).max(10),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_cover_all_levels() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.final_level as usize, cfg.workers_per_level.len());
        assert_eq!(cfg.final_level as usize, cfg.killers_per_level.len());
    }

    #[test]
    fn for_terminal_subtracts_chrome() {
        let cfg = GameConfig::for_terminal(80, 24);
        assert_eq!(cfg.field_w, 78);
        assert_eq!(cfg.field_h, 20);
    }

    #[test]
    fn for_terminal_clamps_tiny_terminals() {
        let cfg = GameConfig::for_terminal(10, 5);
        assert!(cfg.field_w >= 30);
        assert!(cfg.field_h >= 10);
    }
}
