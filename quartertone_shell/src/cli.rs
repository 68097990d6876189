// Command-line and command-loop grammar.
//
// One `Command` enum serves both entry points: `Cli` parses the process
// arguments (an optional one-shot command), and `LineCommand` parses each
// line typed at the `> ` prompt with the same subcommands. Scale arguments
// are taken as every remaining word, so multi-word names such as
// `natural minor` need no quoting.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Explore the catalog of quarter-tone heptatonic scales.
#[derive(Debug, Parser)]
#[command(name = "scales", version)]
pub struct Cli {
    /// JSON render config (sample rate, note length, MIDI tempo, ...).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for WAV, MIDI and export files.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Run one command and exit instead of starting the prompt.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One line of the interactive prompt.
#[derive(Debug, Parser)]
#[command(name = "scales", no_binary_name = true)]
pub struct LineCommand {
    #[command(subcommand)]
    pub command: Command,
}

/// A scale reference: catalog index or name (may contain spaces).
#[derive(Debug, Clone, clap::Args)]
pub struct ScaleArg {
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true, value_name = "SCALE")]
    pub words: Vec<String>,
}

impl ScaleArg {
    pub fn token(&self) -> String {
        self.words.join(" ")
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Look up a scale
    Scale(ScaleArg),
    /// List the modes of a scale
    Modes(ScaleArg),
    /// Search for scales with certain degrees altered, e.g. "search mi-1"
    /// finds scales where mi is lowered one quarter tone
    Search {
        #[arg(allow_hyphen_values = true, value_name = "DEGREE")]
        tokens: Vec<String>,
    },
    /// List scale squares containing a scale
    Squares(ScaleArg),
    /// List all of the scale squares recognized by the catalog
    #[command(name = "allsquares")]
    AllSquares,
    /// List new scales made from a scale by altering one of its pitches
    Alterations(ScaleArg),
    /// Create a WAV file of a scale
    Wavfile(ScaleArg),
    /// Create a MIDI file of a scale
    Midifile(ScaleArg),
    /// Write the whole catalog as JSON (to stdout without a path)
    Export {
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
    /// Quit
    #[command(alias = "exit")]
    Quit,
}
