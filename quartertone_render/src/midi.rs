// MIDI output of a scale's up-and-down sequence.
//
// Same fifteen notes as the audio render (see `tone.rs`), one note per
// `note_samples` of wall time at the configured tempo. MIDI has no quarter
// tones, so each position becomes the semitone below it plus a pitch bend:
// even positions sound unbent, odd positions are bent up a quarter tone.
// The bend range is pinned to ±2 semitones with RPN 0 at the start of the
// track, which makes a quarter tone exactly 2048 bend units.
//
// Uses the `midly` crate. Output is SMF Format 0 (single track).

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::tone::UP_DOWN;
use midly::{
    Format, Header, MetaMessage, MidiMessage, PitchBend, Smf, Timing, Track, TrackEvent,
    TrackEventKind,
    num::{u4, u7, u14, u15, u24, u28},
};
use quartertone_scales::{CatalogEntry, PitchPositions};
use std::path::{Path, PathBuf};

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// Pitch-bend value for "no bend".
const BEND_CENTER: u16 = 8192;

/// Bend units per quarter tone with a ±2 semitone range.
const BEND_PER_QUARTER_TONE: u16 = 2048;

/// Largest value of the 24-bit tempo meta field (microseconds per quarter).
const MAX_TEMPO_MICROSECONDS: u32 = 0x00FF_FFFF;

/// Largest delta time a track event can carry (28 bits).
const MAX_DELTA_TICKS: u64 = 0x0FFF_FFFF;

const CHANNEL: u8 = 0;
const VELOCITY: u8 = 80;

/// Key and bend for a quarter-tone position.
pub fn key_and_bend(position: i32, root_note: u8) -> (u8, u16) {
    let semitones = position.div_euclid(2);
    let quarter = position.rem_euclid(2);
    let key = (i32::from(root_note) + semitones).clamp(0, 127) as u8;
    let bend = BEND_CENTER + quarter as u16 * BEND_PER_QUARTER_TONE;
    (key, bend)
}

fn tempo_microseconds(bpm: u16) -> u32 {
    60_000_000 / u32::from(bpm)
}

/// Length of one note in ticks at the configured tempo.
fn note_ticks(config: &RenderConfig) -> u64 {
    let quarters = config.note_seconds() * f64::from(config.midi_tempo_bpm) / 60.0;
    (quarters * f64::from(TICKS_PER_QUARTER)).round().max(1.0) as u64
}

/// Reject tempos and note lengths that don't fit their MIDI fields.
pub(crate) fn check_midi_limits(config: &RenderConfig) -> Result<(), RenderError> {
    let invalid = |msg: &str| Err(RenderError::InvalidConfig(msg.to_string()));
    if config.midi_tempo_bpm == 0 {
        return invalid("midi_tempo_bpm must be positive");
    }
    if tempo_microseconds(config.midi_tempo_bpm) > MAX_TEMPO_MICROSECONDS {
        return invalid("midi_tempo_bpm must be at least 4");
    }
    if note_ticks(config) > MAX_DELTA_TICKS {
        return invalid("note length overflows a MIDI delta time");
    }
    Ok(())
}

fn event(delta: u32, kind: TrackEventKind<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(delta),
        kind,
    }
}

fn midi(message: MidiMessage) -> TrackEventKind<'static> {
    TrackEventKind::Midi {
        channel: u4::new(CHANNEL),
        message,
    }
}

fn controller(number: u8, value: u8) -> TrackEvent<'static> {
    event(
        0,
        midi(MidiMessage::Controller {
            controller: u7::new(number),
            value: u7::new(value),
        }),
    )
}

/// Convert a scale to an in-memory SMF.
pub fn scale_to_smf(
    positions: &PitchPositions,
    config: &RenderConfig,
) -> Result<Smf<'static>, RenderError> {
    check_midi_limits(config)?;
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    let mut track: Track<'static> = Vec::new();
    let tempo = u24::new(tempo_microseconds(config.midi_tempo_bpm));
    track.push(event(0, TrackEventKind::Meta(MetaMessage::Tempo(tempo))));
    let name = MetaMessage::TrackName(b"Quarter-tone scale");
    track.push(event(0, TrackEventKind::Meta(name)));

    // RPN 0 (pitch-bend sensitivity) = 2 semitones, then close the RPN.
    track.push(controller(101, 0));
    track.push(controller(100, 0));
    track.push(controller(6, 2));
    track.push(controller(38, 0));
    track.push(controller(101, 127));
    track.push(controller(100, 127));

    // Bounded by check_midi_limits.
    let length = note_ticks(config) as u32;
    let notes = positions.with_octave();
    for &degree in &UP_DOWN {
        let (key, bend) = key_and_bend(notes[degree], config.midi_root_note);
        track.push(event(
            0,
            midi(MidiMessage::PitchBend {
                bend: PitchBend(u14::new(bend)),
            }),
        ));
        track.push(event(
            0,
            midi(MidiMessage::NoteOn {
                key: u7::new(key),
                vel: u7::new(VELOCITY),
            }),
        ));
        track.push(event(
            length,
            midi(MidiMessage::NoteOff {
                key: u7::new(key),
                vel: u7::new(0),
            }),
        ));
    }

    track.push(event(0, TrackEventKind::Meta(MetaMessage::EndOfTrack)));
    smf.tracks.push(track);
    Ok(smf)
}

/// Write `<dir>/<index> - <name>.mid` for a catalog entry and return its path.
pub fn save_midi(
    entry: &CatalogEntry,
    config: &RenderConfig,
    dir: &Path,
) -> Result<PathBuf, RenderError> {
    let path = dir.join(format!("{}.mid", entry.file_stem()));
    let smf = scale_to_smf(&entry.positions, config)?;
    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    std::fs::write(&path, &buf)?;
    tracing::info!(path = %path.display(), bytes = buf.len(), "wrote MIDI");
    Ok(path)
}
