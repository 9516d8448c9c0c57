//! Sound output through the default audio device.
//!
//! Both cues are synthesized square waves, so the binary ships with no
//! asset files.  The background melody is an endless `Source` looped on its
//! own sink; laser blips are short sample buffers mixed straight onto the
//! output so overlapping shots do not cut each other off.

use std::time::Duration;

use log::debug;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use buzz_bombers::config::GameConfig;
use buzz_bombers::{GameError, Result};

const SAMPLE_RATE: u32 = 44_100;
const MELODY_AMP: f32 = 0.30;

// Chromatic bumblebee run, eighth-note feel.  Loops forever.
const MELODY: &[(f32, u32)] = &[
    (880.00, 150),
    (830.61, 150),
    (783.99, 150),
    (739.99, 150),
    (698.46, 150),
    (659.26, 150),
    (698.46, 150),
    (739.99, 150),
    (783.99, 150),
    (830.61, 150),
    (880.00, 150),
    (830.61, 150),
    (783.99, 150),
    (739.99, 150),
    (698.46, 150),
    (659.26, 300),
];

// ── Melody voice ──────────────────────────────────────────────────────────────

/// Square-wave voice that walks the note table and wraps around forever.
struct MelodySource {
    note: usize,
    sample: u32,
    note_len: u32,
}

impl MelodySource {
    fn new() -> Self {
        MelodySource {
            note: 0,
            sample: 0,
            note_len: SAMPLE_RATE * MELODY[0].1 / 1000,
        }
    }
}

impl Iterator for MelodySource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.sample >= self.note_len {
            self.note = (self.note + 1) % MELODY.len();
            self.sample = 0;
            self.note_len = SAMPLE_RATE * MELODY[self.note].1 / 1000;
        }
        let freq = MELODY[self.note].0;
        let t = self.sample as f32 / SAMPLE_RATE as f32;
        self.sample += 1;

        // The tail of each note is a rest so repeated pitches articulate.
        if self.sample * 10 > self.note_len * 9 {
            return Some(0.0);
        }
        let phase = (t * freq).fract();
        Some(if phase < 0.5 { MELODY_AMP } else { -MELODY_AMP })
    }
}

impl Source for MelodySource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

// ── Laser blip ────────────────────────────────────────────────────────────────

/// 90 ms square sweep falling from 880 Hz to 220 Hz with a linear fade.
/// Phase is accumulated sample by sample so the sweep stays click-free.
fn laser_samples() -> Vec<f32> {
    let len = SAMPLE_RATE as usize * 90 / 1000;
    let mut samples = Vec::with_capacity(len);
    let mut phase = 0.0f32;
    for i in 0..len {
        let k = i as f32 / len as f32;
        let freq = 880.0 - 660.0 * k;
        phase = (phase + freq / SAMPLE_RATE as f32).fract();
        let amp = 0.25 * (1.0 - k);
        samples.push(if phase < 0.5 { amp } else { -amp });
    }
    samples
}

// ── Device handle ─────────────────────────────────────────────────────────────

/// Open audio device plus the running background melody.
pub struct Audio {
    // The stream must be kept alive for the handle to stay valid.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    _music: Sink,
    laser: Vec<f32>,
}

impl Audio {
    /// Open the default output device and start the looping melody at the
    /// configured volume.  Failing to open the device is fatal; the game
    /// does not run silent.
    pub fn init(cfg: &GameConfig) -> Result<Self> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| GameError::AudioDevice(e.to_string()))?;
        let music = Sink::try_new(&handle).map_err(|e| GameError::AudioDevice(e.to_string()))?;
        music.set_volume(cfg.music_volume);
        music.append(MelodySource::new());
        debug!("audio device open, background melody started");

        Ok(Audio {
            _stream: stream,
            handle,
            _music: music,
            laser: laser_samples(),
        })
    }

    /// Queue one laser blip.  Cues mix freely with each other and with the
    /// melody.  The caller decides what a failed cue means; the game drops
    /// it with a warning rather than stopping.
    pub fn play_laser(&self) -> Result<()> {
        let cue = SamplesBuffer::new(1, SAMPLE_RATE, self.laser.clone());
        self.handle
            .play_raw(cue)
            .map_err(|e| GameError::AudioPlayback(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn melody_never_ends() {
        let mut src = MelodySource::new();
        let loop_len: usize = MELODY
            .iter()
            .map(|&(_, ms)| (SAMPLE_RATE * ms / 1000) as usize)
            .sum();
        // Two full passes through the table; the iterator must keep going.
        for _ in 0..loop_len * 2 {
            assert!(src.next().is_some());
        }
    }

    #[test]
    fn melody_stays_in_range() {
        let mut src = MelodySource::new();
        for _ in 0..SAMPLE_RATE {
            let s = src.next().unwrap();
            assert!(s.abs() <= MELODY_AMP);
        }
    }

    #[test]
    fn laser_cue_is_short_and_bounded() {
        let cue = laser_samples();
        assert_eq!(cue.len(), SAMPLE_RATE as usize * 90 / 1000);
        assert!(cue.iter().all(|s| s.abs() <= 0.25));
    }
}
