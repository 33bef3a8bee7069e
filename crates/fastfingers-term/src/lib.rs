//! # fastfingers Term
//!
//! The terminal front-end: raw mode, key reading and drawing with
//! crossterm, wired into a `TypingSession`.

pub mod keys;
pub mod raw;
pub mod view;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use fastfingers_core::{
    Config, CoreResult, KeySource, LineEditor, Lexicon, PerformanceReport, TypingSession,
};

pub use keys::{key_to_raw, TerminalKeys};
pub use raw::RawMode;
pub use view::{Layout, TerminalRenderer};

/// Launch options from the command line. Set fields win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub lexicon: Option<PathBuf>,
    pub row_width: Option<usize>,
    pub config: Option<PathBuf>,
}

/// Loads the config named by `flags` (or the default one) and applies the
/// flag overrides.
pub fn load_config(flags: &Flags) -> CoreResult<Config> {
    let mut config = match &flags.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    if let Some(lexicon) = &flags.lexicon {
        config.session.lexicon = lexicon.clone();
    }
    if let Some(width) = flags.row_width {
        config.session.row_width = width;
    }
    Ok(config)
}

/// Runs one typing session on the terminal until the user aborts.
///
/// The terminal is restored before this returns, so the caller can print
/// the report to the normal screen.
pub fn run(flags: Flags) -> anyhow::Result<PerformanceReport> {
    let config = load_config(&flags).context("Failed to load config")?;
    let lexicon = Lexicon::from_file(&config.session.lexicon)?;
    let mut editor = LineEditor::from_config(&config);

    let _raw = RawMode::enter().context("Failed to set up terminal")?;
    let mut keys = TerminalKeys::new();
    let mut renderer = TerminalRenderer::new(io::stdout());

    renderer.draw_splash()?;
    keys.read_key().context("Failed to read key")?;
    renderer.draw_title()?;

    let mut session = TypingSession::new(lexicon, config.session.row_width, renderer)?;
    session.render_initial()?;
    let partial = session.run(&mut editor, &mut keys)?;
    if !partial.is_empty() {
        tracing::debug!("Abandoned partial entry {:?}", partial);
    }

    let report = session.report();
    tracing::info!(
        "Session finished: {} of {} correct",
        report.correct,
        report.attempted
    );
    Ok(report)
}
