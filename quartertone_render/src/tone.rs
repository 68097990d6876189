// Tone-sequence synthesis.
//
// A scale is played up from the root to the octave and back down again,
// fifteen notes with the octave sounded once at the turn. Each note is a
// triangle wave at the equal-tempered frequency of its quarter-tone
// position, shaped by an exponential decay and a short linear fade at the
// end so consecutive notes join without clicks. Notes are concatenated with
// no gap.
//
// Pure functions of a `PitchPositions` and a `RenderConfig`; writing the
// samples out is left to `wav.rs`.

use crate::config::RenderConfig;
use quartertone_scales::{CatalogEntry, OCTAVE, PitchPositions};

/// Degrees played, root to octave (7) and back.
pub const UP_DOWN: [usize; 15] = [0, 1, 2, 3, 4, 5, 6, 7, 6, 5, 4, 3, 2, 1, 0];

/// A rendered scale ready to be written out.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedScale {
    /// "<index> - <name>", without extension.
    pub file_stem: String,
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

/// Triangle wave with period 1 and peak 1; odd, zero at integer phases.
pub fn triangle(phase: f64) -> f64 {
    if phase < 0.0 {
        return -triangle(-phase);
    }
    let t = phase.fract();
    if t < 0.25 {
        t * 4.0
    } else if t < 0.75 {
        2.0 - t * 4.0
    } else {
        t * 4.0 - 4.0
    }
}

/// Frequency in Hz of a quarter-tone position.
pub fn note_frequency(position: i32, config: &RenderConfig) -> f64 {
    let octaves = config.root_offset_octaves + f64::from(position) / f64::from(OCTAVE);
    config.reference_hz * octaves.exp2()
}

/// Amplitude envelope at sample `n` of a note.
pub fn envelope(n: usize, config: &RenderConfig) -> f64 {
    let decay = (-(n as f64) / config.decay_samples).exp2();
    let fade_start = config.note_samples.saturating_sub(config.fade_samples);
    if config.fade_samples > 0 && n > fade_start {
        decay * (1.0 - (n - fade_start) as f64 / config.fade_samples as f64)
    } else {
        decay
    }
}

/// Samples of one note.
pub fn render_note(position: i32, config: &RenderConfig) -> impl Iterator<Item = i16> + '_ {
    let freq = note_frequency(position, config);
    let rate = f64::from(config.sample_rate);
    (0..config.note_samples).map(move |n| {
        let value = triangle(n as f64 / rate * freq) * envelope(n, config);
        // `as` truncates toward zero and saturates at the i16 bounds.
        (value * config.amplitude) as i16
    })
}

/// The full up-and-down sequence as 16-bit mono samples.
pub fn render_tone_sequence(positions: &PitchPositions, config: &RenderConfig) -> Vec<i16> {
    let notes = positions.with_octave();
    let mut samples = Vec::with_capacity(UP_DOWN.len() * config.note_samples);
    for &degree in &UP_DOWN {
        samples.extend(render_note(notes[degree], config));
    }
    samples
}

/// Render a catalog entry, naming the output after it.
pub fn render_entry(entry: &CatalogEntry, config: &RenderConfig) -> RenderedScale {
    RenderedScale {
        file_stem: entry.file_stem(),
        sample_rate: config.sample_rate,
        samples: render_tone_sequence(&entry.positions, config),
    }
}
