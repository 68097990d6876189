// End-to-end rendering of catalog entries to WAV and MIDI files.
//
// Builds the real catalog, renders entries, writes them into a scratch
// directory under the target temp dir, and reads the files back.

use std::path::PathBuf;

use quartertone_render::{RenderConfig, render_entry, save_midi, save_wav};
use quartertone_scales::ScaleCatalog;

/// A fresh scratch directory unique to one test.
fn scratch_dir(name: &str) -> PathBuf {
    let stem = format!("quartertone_render_{}_{name}", std::process::id());
    let dir = std::env::temp_dir().join(stem);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn every_entry_renders_full_length() {
    let catalog = ScaleCatalog::build().unwrap();
    let config = RenderConfig::default();
    for index in [0, 98, 125, 160] {
        let rendered = render_entry(&catalog.entries()[index], &config);
        assert_eq!(rendered.samples.len(), 330_750);
        assert!(rendered.samples.iter().all(|&s| s.unsigned_abs() <= 32767));
    }
}

#[test]
fn wav_file_is_named_after_the_entry() {
    let catalog = ScaleCatalog::build().unwrap();
    let config = RenderConfig::default();
    let dir = scratch_dir("wav");

    let major = catalog.lookup("major").unwrap();
    let path = save_wav(&render_entry(major, &config), &dir).unwrap();
    assert_eq!(path.file_name().unwrap(), "125 - Ionian.wav");

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 44 + 330_750 * 2);
    assert_eq!(&bytes[0..4], b"RIFF");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn midi_file_is_named_after_the_entry() {
    let catalog = ScaleCatalog::build().unwrap();
    let config = RenderConfig::default();
    let dir = scratch_dir("midi");

    let rast = catalog.lookup("rast").unwrap();
    let path = save_midi(rast, &config, &dir).unwrap();
    assert_eq!(path.file_name().unwrap(), "98 - Ionian-Dorian.mid");

    let bytes = std::fs::read(&path).unwrap();
    let smf = midly::Smf::parse(&bytes).unwrap();
    assert_eq!(smf.tracks.len(), 1);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn shorter_notes_follow_config() {
    let catalog = ScaleCatalog::build().unwrap();
    let json = r#"{ "note_samples": 1000, "fade_samples": 100 }"#;
    let config = RenderConfig::from_json(json).unwrap();
    let rendered = render_entry(&catalog.entries()[125], &config);
    assert_eq!(rendered.samples.len(), 15_000);
}
