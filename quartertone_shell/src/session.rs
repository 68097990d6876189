// Command execution against a built catalog.
//
// `Session` owns the catalog, the render config and the output directory,
// and turns each `Command` into text on a writer. Query failures (unknown
// name, index out of range) come back as errors so the prompt can report
// them and carry on; the one-shot mode turns them into a non-zero exit.

use crate::cli::Command;
use quartertone_render::{RenderConfig, render_entry, save_midi, save_wav};
use quartertone_scales::spelling::spell_on_c;
use quartertone_scales::{CatalogEntry, ScaleCatalog, Square, parse_search_tokens};
use serde::Serialize;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

/// Whether the prompt should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// JSON shape of `export`.
#[derive(Serialize)]
struct CatalogExport<'a> {
    scales: &'a [CatalogEntry],
    squares: &'a [Square],
}

pub struct Session {
    catalog: ScaleCatalog,
    config: RenderConfig,
    out_dir: PathBuf,
}

impl Session {
    pub fn new(catalog: ScaleCatalog, config: RenderConfig, out_dir: PathBuf) -> Self {
        Session {
            catalog,
            config,
            out_dir,
        }
    }

    pub fn execute(&self, command: Command, out: &mut dyn Write) -> Result<Flow, Box<dyn Error>> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Scale(arg) => {
                let entry = self.catalog.lookup(&arg.token())?;
                self.describe(entry, out)?;
            }
            Command::Modes(arg) => {
                let index = self.catalog.resolve(&arg.token())?;
                let report = self.catalog.classify_modes(index)?;
                writeln!(
                    out,
                    "MODE CLASS {} - {}",
                    report.class.key, report.class.label
                )?;
                for r in &report.rotations {
                    writeln!(
                        out,
                        "Mode {}: {} - {}, {} (brightness {})",
                        r.mode, r.steps, r.index, r.name, r.brightness
                    )?;
                }
            }
            Command::Search { tokens } => {
                let constraints = parse_search_tokens(tokens.iter().map(String::as_str));
                for entry in self.catalog.search_by_degrees(&constraints) {
                    writeln!(
                        out,
                        "{} - {}, {} (brightness {})",
                        entry.steps,
                        entry.index,
                        entry.name,
                        entry.brightness()
                    )?;
                }
            }
            Command::Squares(arg) => {
                let index = self.catalog.resolve(&arg.token())?;
                for square in self.catalog.squares_containing(index)? {
                    writeln!(out, "{square}")?;
                }
            }
            Command::AllSquares => {
                for square in self.catalog.squares() {
                    writeln!(out, "{square}")?;
                }
            }
            Command::Alterations(arg) => {
                let index = self.catalog.resolve(&arg.token())?;
                for alt in self.catalog.alterations_of(index)? {
                    let target = self.catalog.get(alt.index)?;
                    writeln!(
                        out,
                        "{} degree {} to get {}",
                        alt.kind.verb(),
                        alt.degree + 1,
                        target.name
                    )?;
                }
            }
            Command::Wavfile(arg) => {
                let entry = self.catalog.lookup(&arg.token())?;
                let path = save_wav(&render_entry(entry, &self.config), &self.out_dir)?;
                writeln!(out, "Wrote {}", path.display())?;
            }
            Command::Midifile(arg) => {
                let entry = self.catalog.lookup(&arg.token())?;
                let path = save_midi(entry, &self.config, &self.out_dir)?;
                writeln!(out, "Wrote {}", path.display())?;
            }
            Command::Export { path } => {
                let export = CatalogExport {
                    scales: self.catalog.entries(),
                    squares: self.catalog.squares(),
                };
                let json = serde_json::to_string_pretty(&export)?;
                match path {
                    Some(path) => {
                        let path = self.out_dir.join(path);
                        std::fs::write(&path, json)?;
                        tracing::info!(path = %path.display(), "exported catalog");
                        writeln!(out, "Wrote {}", path.display())?;
                    }
                    None => writeln!(out, "{json}")?,
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn describe(&self, entry: &CatalogEntry, out: &mut dyn Write) -> std::io::Result<()> {
        if entry.historical_names.is_empty() {
            writeln!(out, "SCALE {} - {}", entry.index, entry.name)?;
        } else {
            writeln!(
                out,
                "SCALE {} - {} ({})",
                entry.index,
                entry.name,
                entry.historical_names.join(" / ")
            )?;
        }
        writeln!(out, "Scale: {}", entry.steps)?;
        writeln!(out, "On C: {}", spell_on_c(&entry.positions).join(" "))?;
        writeln!(out, "Average of: {}", entry.pairings.join(", "))?;
        writeln!(out, "Brightness: {}", entry.brightness())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::LineCommand;
    use clap::Parser;
    use quartertone_scales::ScaleError;

    fn session() -> Session {
        Session::new(
            ScaleCatalog::build().unwrap(),
            RenderConfig::default(),
            std::env::temp_dir(),
        )
    }

    fn run(session: &Session, line: &str) -> Result<String, Box<dyn Error>> {
        let command = LineCommand::try_parse_from(line.split_whitespace())?.command;
        let mut out = Vec::new();
        session.execute(command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn scale_view() {
        let s = session();
        let text = run(&s, "scale major").unwrap();
        assert_eq!(
            text,
            "SCALE 125 - Ionian (Major)\n\
             Scale: [4, 4, 2, 4, 4, 4, 2]\n\
             On C: C D E F G A B\n\
             Average of: Ionian-Ionian\n\
             Brightness: 0\n"
        );
    }

    #[test]
    fn modes_view() {
        let s = session();
        let text = run(&s, "modes 125").unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("MODE CLASS 710 - Quintal"));
        assert_eq!(
            lines.next(),
            Some("Mode 1: [4, 4, 2, 4, 4, 4, 2] - 125, Ionian (brightness 0)")
        );
        assert_eq!(lines.count(), 6);
    }

    #[test]
    fn alterations_view() {
        let s = session();
        let text = run(&s, "alterations ionian").unwrap();
        assert!(text.contains("Lower degree 7 to get Mixolydian\n"));
        assert!(text.contains("Raise degree 4 to get Lydian\n"));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn squares_views() {
        let s = session();
        assert_eq!(
            run(&s, "squares major").unwrap(),
            "re0 fa0 so0 la0\nre0 mi0 so0 la0\n"
        );
        assert_eq!(run(&s, "allsquares").unwrap().lines().count(), 9);
    }

    #[test]
    fn search_ignores_bad_tokens() {
        let s = session();
        let with_junk = run(&s, "search mi-1 xx9 fa-q").unwrap();
        let clean = run(&s, "search mi-1").unwrap();
        assert_eq!(with_junk, clean);
        assert_eq!(clean.lines().count(), 60);
    }

    #[test]
    fn unknown_scale_is_reported() {
        let s = session();
        let err = run(&s, "scale no such thing").unwrap_err();
        let err = err.downcast::<ScaleError>().unwrap();
        assert_eq!(*err, ScaleError::NotFound("no such thing".to_string()));
    }

    #[test]
    fn quit_stops_the_loop() {
        let s = session();
        let mut out = Vec::new();
        assert_eq!(s.execute(Command::Quit, &mut out).unwrap(), Flow::Quit);
    }

    #[test]
    fn export_is_valid_json() {
        let s = session();
        let text = run(&s, "export").unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["scales"].as_array().unwrap().len(), 161);
        assert_eq!(value["squares"].as_array().unwrap().len(), 9);
        assert_eq!(value["scales"][125]["name"], "Ionian");
    }
}
