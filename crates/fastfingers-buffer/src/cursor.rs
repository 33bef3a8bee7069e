//! Cursor type for single-line navigation.
//!
//! ## Learning: Newtype Pattern
//!
//! `Cursor` wraps a plain `usize` character index. Wrapping it means the
//! only way to move it is through methods that take the line length, so
//! the `0 <= index <= len` invariant cannot be broken by accident.

use serde::{Deserialize, Serialize};

/// A cursor inside a single line of text.
///
/// The index counts characters, not bytes, and may sit one past the last
/// character (the insertion point at the end of the line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    /// Cursor at the start of the line.
    pub const START: Cursor = Cursor { index: 0 };

    /// Creates a cursor at `index`, clamped to `len`.
    pub fn new(index: usize, len: usize) -> Self {
        Self {
            index: index.min(len),
        }
    }

    /// Returns the character index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns true if the cursor is at the start of the line.
    #[inline]
    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    /// Moves to the start of the line.
    pub fn move_to_start(&mut self) {
        self.index = 0;
    }

    /// Moves to the end of a line of length `len`.
    pub fn move_to_end(&mut self, len: usize) {
        self.index = len;
    }

    /// Moves to `index`, clamped to `len`.
    pub fn move_to(&mut self, index: usize, len: usize) {
        self.index = index.min(len);
    }

    /// Moves one character right, stopping at `len`.
    pub fn advance(&mut self, len: usize) {
        if self.index < len {
            self.index += 1;
        }
    }

    /// Moves one character left.
    ///
    /// Returns false (and stays put) at the start of the line.
    pub fn retreat(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 1-indexed column for user-facing output
        write!(f, "col {}", self.index + 1)
    }
}
