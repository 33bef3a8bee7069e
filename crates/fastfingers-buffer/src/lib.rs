//! # fastfingers Buffer
//!
//! Single-line editable text buffer.
//!
//! ## Key Concepts
//!
//! ### Ownership & Borrowing
//! - `LineBuffer` owns its rope and its cursor
//! - `contents()` returns an owned `String`, so callers can keep it while
//!   the buffer keeps changing
//! - Mutations require `&mut self` (exclusive access)
//!
//! ### Bounded Cursor
//! - The cursor is a `Cursor` newtype, never a bare index
//! - Every mutation re-clamps it, so `0 <= cursor <= len` always holds

mod cursor;
mod line;

pub use cursor::Cursor;
pub use line::{LineBuffer, LineSnapshot};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("Invalid character index: {0}")]
    InvalidCharIndex(usize),

    #[error("Line breaks cannot be inserted into a single-line buffer")]
    Newline,
}
