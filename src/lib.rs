//! Buzz Bombers — a single-screen terminal arcade shooter.
//!
//! The library holds the simulation core: entity models, the injected
//! configuration table, and the pure per-tick update functions. Terminal
//! rendering, input handling and audio live in the binary; the core never
//! touches them.
//!
//! # Modules
//! - [`entities`] — pure entity data plus per-entity movement/state rules
//! - [`compute`] — per-tick simulation: movement, collisions, scoring,
//!   wave/level progression, phase transitions
//! - [`config`] — the immutable tunables struct injected at run start

pub mod compute;
pub mod config;
pub mod entities;

/// Errors raised by the I/O layers around the simulation core.
///
/// In-run conditions (ammo exhaustion, bee escape, wave completion) are game
/// phase transitions, never errors; this type only covers startup and device
/// failures, all of which are fatal.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Terminal or other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The audio output device could not be opened at startup.
    #[error("audio device error: {0}")]
    AudioDevice(String),

    /// A sound could not be queued on an open device.
    #[error("audio playback error: {0}")]
    AudioPlayback(String),
}

/// Result type for game I/O operations.
pub type Result<T> = std::result::Result<T, GameError>;
