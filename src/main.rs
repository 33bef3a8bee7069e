//! # fastfingers - A Terminal Typing Trainer
//!
//! Type the highlighted row of words; accuracy and words per minute are
//! shown as you go and printed when you quit with Ctrl-G.
//!
//! ## Quick Start
//!
//! ```bash
//! # Practice with the default word list
//! cargo run
//!
//! # Practice with your own list, six words per row
//! cargo run -- --lexicon words.txt --num-words 6
//! ```

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fastfingers_term::{run, Flags};

/// fastfingers - practice typing in the terminal
#[derive(Parser, Debug)]
#[command(name = "fastfingers")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Newline-delimited word list to sample from
    #[arg(short, long, value_name = "FILE")]
    lexicon: Option<PathBuf>,

    /// Words per row
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    num_words: Option<u16>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Write logs to this file (defaults to fastfingers.log with -v)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Where logs go while the trainer owns the terminal.
    ///
    /// stderr is the same TTY as the trainer screen, so anything past the
    /// warnings emitted during startup goes to a file.
    fn log_path(&self) -> Option<PathBuf> {
        match (&self.log_file, self.verbose) {
            (Some(path), _) => Some(path.clone()),
            (None, 0) => None,
            (None, _) => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

const DEFAULT_LOG_FILE: &str = "fastfingers.log";

/// Installs the subscriber. The returned guard flushes file logs on drop.
fn init_logging(args: &Args) -> anyhow::Result<Option<WorkerGuard>> {
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let (writer, guard, ansi) = match args.log_path() {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid log file: {}", path.display()))?;
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(writer), Some(guard), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), None, true),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    Ok(guard)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _log_guard = init_logging(&args)?;

    tracing::info!("Starting fastfingers v{}", env!("CARGO_PKG_VERSION"));

    let flags = Flags {
        lexicon: args.lexicon,
        row_width: args.num_words.map(usize::from),
        config: args.config,
    };

    let report = run(flags).map_err(|e| anyhow::anyhow!("Application error: {:#}", e))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
