// Quarter-tone scale explorer: CLI entry point.
//
// Builds the scale catalog once, then either runs the single command given
// on the command line or reads commands from a `> ` prompt until `quit` or
// end of input. See `cli.rs` for the grammar and `session.rs` for what each
// command prints.
//
// Usage:
//   scales [--config render.json] [--out-dir DIR] [COMMAND ...]
//
// Logging goes to stderr; set RUST_LOG=debug to see catalog statistics and
// dropped search tokens.

mod cli;
mod session;

use std::io::{self, BufRead, Write};

use clap::Parser;
use quartertone_render::RenderConfig;
use quartertone_scales::ScaleCatalog;
use tracing_subscriber::EnvFilter;

use cli::{Cli, LineCommand};
use session::{Flow, Session};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RenderConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load render config {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => RenderConfig::default(),
    };

    let catalog = ScaleCatalog::build().unwrap_or_else(|e| {
        eprintln!("Failed to build scale catalog: {e}");
        std::process::exit(1);
    });

    let session = Session::new(catalog, config, cli.out_dir);
    match cli.command {
        Some(command) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = session.execute(command, &mut stdout) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        None => {
            if let Err(e) = prompt_loop(&session) {
                eprintln!("I/O error: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read and run commands until `quit` or end of input.
fn prompt_loop(session: &Session) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let command = match LineCommand::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                // Covers `help` as well as unknown commands and bad arguments.
                e.print()?;
                continue;
            }
        };

        match session.execute(command, &mut stdout) {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => writeln!(stdout, "{e}")?,
        }
    }
}
