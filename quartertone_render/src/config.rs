// Render configuration.
//
// All synthesis and export parameters live in `RenderConfig`, loaded from
// JSON (any missing field takes its default). The defaults reproduce the
// classic rendering: 44.1 kHz mono, half-second notes, a triangle wave that
// decays by half every 20000 samples, and a 441-sample linear fade at the end
// of each note. Quarter-tone position 0 sounds 3/4 of an octave below A440
// (middle C).

use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Highest MIDI root note that still leaves room for the octave above it.
const MAX_MIDI_ROOT: u8 = 127 - 12;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Length of each note in samples.
    pub note_samples: usize,
    /// Tuning reference in Hz.
    pub reference_hz: f64,
    /// Offset of position 0 from the reference, in octaves.
    pub root_offset_octaves: f64,
    /// Samples over which the envelope halves.
    pub decay_samples: f64,
    /// Length of the end-of-note linear fade, in samples.
    pub fade_samples: usize,
    /// Peak amplitude of the 16-bit output.
    pub amplitude: f64,
    /// MIDI note for position 0 in MIDI export.
    pub midi_root_note: u8,
    /// Tempo of MIDI export.
    pub midi_tempo_bpm: u16,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            note_samples: 22050,
            reference_hz: 440.0,
            root_offset_octaves: -0.75,
            decay_samples: 20000.0,
            fade_samples: 441,
            amplitude: 32767.0,
            midi_root_note: 60,
            midi_tempo_bpm: 120,
        }
    }
}

impl RenderConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Duration of one note in seconds.
    pub fn note_seconds(&self) -> f64 {
        self.note_samples as f64 / f64::from(self.sample_rate)
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = |msg: &str| Err(RenderError::InvalidConfig(msg.to_string()));
        if self.sample_rate == 0 {
            return invalid("sample_rate must be positive");
        }
        if self.note_samples == 0 {
            return invalid("note_samples must be positive");
        }
        if self.fade_samples > self.note_samples {
            return invalid("fade_samples cannot exceed note_samples");
        }
        if self.decay_samples.is_nan() || self.decay_samples <= 0.0 {
            return invalid("decay_samples must be positive");
        }
        if self.reference_hz.is_nan() || self.reference_hz <= 0.0 {
            return invalid("reference_hz must be positive");
        }
        if !(0.0..=32767.0).contains(&self.amplitude) {
            return invalid("amplitude must lie in 0..=32767");
        }
        if self.midi_root_note > MAX_MIDI_ROOT {
            return invalid("midi_root_note leaves no room for the octave");
        }
        crate::midi::check_midi_limits(self)
    }
}
