//! # fastfingers Core
//!
//! The line-editing engine and the typing trainer built on top of it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐   RawKey   ┌───────────────┐  EditCommand  ┌────────────┐
//! │  KeySource   │ ─────────▶ │ KeyClassifier │ ────────────▶ │ LineEditor │
//! └──────────────┘            │  (+ override) │               │  (buffer)  │
//!                             └───────────────┘               └─────┬──────┘
//!                                                                   │ Commit
//!                                                                   ▼
//!                    ┌──────────────────────── TypingSession ───────────────┐
//!                    │  WordRows  │  PerformanceMonitor  │  RenderSink      │
//!                    └──────────────────────────────────────────────────────┘
//! ```
//!
//! The editor knows nothing about words or scores. Everything above the
//! buffer observes it through `CommitObserver`.

pub mod command;
pub mod config;
pub mod editor;
pub mod input;
pub mod keymap;
pub mod lexicon;
pub mod performance;
pub mod render;
pub mod rows;
pub mod session;

pub use command::EditCommand;
pub use config::Config;
pub use editor::{Commit, CommitObserver, EditorState, LineEditor, Step};
pub use input::{KeySource, ScriptedKeys};
pub use keymap::{KeyClassifier, KeyOverride, KeyRemap, RawKey};
pub use lexicon::Lexicon;
pub use performance::{PerformanceMonitor, PerformanceReport, SessionGuard};
pub use render::{NullSink, RenderSink, RowView, WordMark};
pub use rows::{WordRow, WordRows};
pub use session::TypingSession;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Failed to read key: {0}")]
    InputRead(#[source] std::io::Error),

    #[error("Failed to load lexicon {}: {source}", path.display())]
    LexiconLoad {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lexicon has no words: {0}")]
    EmptyLexicon(String),

    #[error("Row width must be at least 1, got {0}")]
    InvalidRowWidth(usize),

    #[error("Render error: {0}")]
    Render(#[source] std::io::Error),

    #[error("Buffer error: {0}")]
    Buffer(#[from] fastfingers_buffer::BufferError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}
