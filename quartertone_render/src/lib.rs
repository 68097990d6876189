// Audible rendering of quarter-tone scales.
//
// Turns a scale's pitch positions into sound: a fifteen-note up-and-down
// run synthesized as 16-bit mono PCM, plus a MIDI rendition of the same run
// using pitch bend for the quarter tones.
//
// Architecture:
// - config.rs: `RenderConfig`, JSON-loadable synthesis and export parameters
// - tone.rs: triangle-wave synthesis with decay/fade envelope
// - wav.rs: RIFF/WAVE encoder for the synthesized samples
// - midi.rs: Standard MIDI File output with quarter-tone pitch bends
// - error.rs: `RenderError`
//
// Synthesis is a pure function of the pitch positions and the config; only
// `save_wav` and `save_midi` touch the filesystem.

pub mod config;
pub mod error;
pub mod midi;
pub mod tone;
pub mod wav;

pub use config::RenderConfig;
pub use error::RenderError;
pub use midi::save_midi;
pub use tone::{RenderedScale, render_entry, render_tone_sequence};
pub use wav::save_wav;
