//! Single-line text buffer backed by a rope.
//!
//! ## Why a Rope for One Line?
//!
//! Lines typed into a trainer are short, but the rope gives character-index
//! insertion and removal without any byte-offset bookkeeping, and keeps the
//! buffer API close to a full multi-line buffer should one ever be needed.
//!
//! ## Learning: Invariants Owned by the Type
//!
//! ```rust,ignore
//! let mut line = LineBuffer::new();
//! line.insert('a')?;          // cursor moves with the text
//! line.delete_backward();     // cursor can never go below zero
//! line.kill_to_end();         // cursor never moves past the new end
//! ```
//!
//! Every mutation goes through `&mut self`, so the cursor is re-validated
//! in exactly one place per operation.

use ropey::Rope;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::cursor::Cursor;
use crate::{BufferError, BufferResult};

/// An editable line of text with a cursor.
///
/// The line never contains `\n` or `\r`; both are rejected on insert.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    /// The characters of the line
    rope: Rope,

    /// Insertion point, always `<= rope.len_chars()`
    cursor: Cursor,

    /// Trim surrounding whitespace in `contents()`
    strip: bool,
}

/// A copy of the buffer state handed to render sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    /// Untrimmed contents
    pub contents: String,
    /// Cursor as a character index
    pub cursor: usize,
    /// Cursor as a terminal display column
    pub column: usize,
}

impl LineBuffer {
    /// Creates an empty buffer in strip mode.
    ///
    /// # Example
    /// ```
    /// use fastfingers_buffer::LineBuffer;
    ///
    /// let line = LineBuffer::new();
    /// assert!(line.is_empty());
    /// assert_eq!(line.cursor(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_strip(true)
    }

    /// Creates an empty buffer with an explicit strip mode.
    pub fn with_strip(strip: bool) -> Self {
        Self {
            rope: Rope::new(),
            cursor: Cursor::START,
            strip,
        }
    }

    // ==================== Text Access ====================

    /// Returns the contents, trimmed when strip mode is on.
    pub fn contents(&self) -> String {
        let text = self.rope.to_string();
        if self.strip {
            text.trim().to_string()
        } else {
            text
        }
    }

    /// Returns the contents exactly as typed.
    pub fn raw_contents(&self) -> String {
        self.rope.to_string()
    }

    /// Returns the state needed to draw the line.
    pub fn snapshot(&self) -> LineSnapshot {
        LineSnapshot {
            contents: self.raw_contents(),
            cursor: self.cursor.index(),
            column: self.cursor_column(),
        }
    }

    // ==================== Measurements ====================

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of characters in the line.
    #[inline]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Cursor position as a character index.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    /// Display width of the text before the cursor.
    ///
    /// Control and zero-width characters count as 0 columns.
    pub fn cursor_column(&self) -> usize {
        self.rope
            .slice(..self.cursor.index())
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    // ==================== Mutations ====================

    /// Inserts a character at the cursor and moves the cursor past it.
    pub fn insert(&mut self, ch: char) -> BufferResult<()> {
        if ch == '\n' || ch == '\r' {
            return Err(BufferError::Newline);
        }
        self.rope.insert_char(self.cursor.index(), ch);
        self.cursor.advance(self.len_chars());
        Ok(())
    }

    /// Inserts a string at the cursor, one character at a time.
    ///
    /// Nothing is inserted if the string contains a line break.
    pub fn insert_str(&mut self, text: &str) -> BufferResult<()> {
        if text.contains(['\n', '\r']) {
            return Err(BufferError::Newline);
        }
        for ch in text.chars() {
            self.insert(ch)?;
        }
        Ok(())
    }

    /// Deletes the character before the cursor.
    ///
    /// Returns the removed character, or `None` at the start of the line.
    pub fn delete_backward(&mut self) -> Option<char> {
        if !self.cursor.retreat() {
            return None;
        }
        let idx = self.cursor.index();
        let removed = self.rope.char(idx);
        self.rope.remove(idx..idx + 1);
        Some(removed)
    }

    /// Removes everything at or after the cursor. The cursor stays put.
    pub fn kill_to_end(&mut self) -> String {
        let start = self.cursor.index();
        let end = self.len_chars();
        let killed: String = self.rope.slice(start..end).into();
        self.rope.remove(start..end);
        killed
    }

    /// Moves the cursor to the start of the line.
    pub fn move_to_start(&mut self) {
        self.cursor.move_to_start();
    }

    /// Moves the cursor past the last character.
    pub fn move_to_end(&mut self) {
        self.cursor.move_to_end(self.len_chars());
    }

    /// Places the cursor at a character index.
    pub fn set_cursor(&mut self, char_idx: usize) -> BufferResult<()> {
        if char_idx > self.len_chars() {
            return Err(BufferError::InvalidCharIndex(char_idx));
        }
        self.cursor.move_to(char_idx, self.len_chars());
        Ok(())
    }

    /// Empties the line and returns the cursor to 0.
    pub fn clear(&mut self) {
        self.rope = Rope::new();
        self.cursor = Cursor::START;
    }

    // ==================== Settings ====================

    /// Returns true if `contents()` trims whitespace.
    pub fn strip(&self) -> bool {
        self.strip
    }

    pub fn set_strip(&mut self, strip: bool) {
        self.strip = strip;
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> LineBuffer {
        let mut buffer = LineBuffer::new();
        buffer.insert_str(text).unwrap();
        buffer
    }

    #[test]
    fn test_insert_in_middle() {
        let mut buffer = line("ct");
        buffer.set_cursor(1).unwrap();
        buffer.insert('a').unwrap();
        assert_eq!(buffer.contents(), "cat");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_insert_rejects_newline() {
        let mut buffer = line("ab");
        assert!(matches!(buffer.insert('\n'), Err(BufferError::Newline)));
        assert!(matches!(buffer.insert_str("c\rd"), Err(BufferError::Newline)));
        assert_eq!(buffer.raw_contents(), "ab");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        let mut buffer = line("dog");
        buffer.move_to_start();
        assert_eq!(buffer.delete_backward(), None);
        assert_eq!(buffer.contents(), "dog");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_delete_backward_removes_previous_char() {
        let mut buffer = line("do");
        assert_eq!(buffer.delete_backward(), Some('o'));
        assert_eq!(buffer.contents(), "d");
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_kill_to_end_keeps_cursor() {
        let mut buffer = line("typing");
        buffer.set_cursor(4).unwrap();
        assert_eq!(buffer.kill_to_end(), "ng");
        assert_eq!(buffer.contents(), "typi");
        assert_eq!(buffer.cursor(), 4);
    }

    #[test]
    fn test_move_start_then_kill_clears() {
        let mut buffer = line("word");
        buffer.move_to_start();
        buffer.kill_to_end();
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_strip_mode() {
        let mut buffer = line("  cat ");
        assert_eq!(buffer.contents(), "cat");

        buffer.set_strip(false);
        assert_eq!(buffer.contents(), "  cat ");
        assert_eq!(buffer.raw_contents(), "  cat ");
    }

    #[test]
    fn test_set_cursor_out_of_bounds() {
        let mut buffer = line("abc");
        assert!(matches!(
            buffer.set_cursor(4),
            Err(BufferError::InvalidCharIndex(4))
        ));
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut buffer = line("hello");
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_snapshot_reports_display_column() {
        let mut buffer = line("a\u{ff21}b");
        buffer.set_cursor(2).unwrap();
        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.cursor, 2);
        // fullwidth 'A' occupies two columns
        assert_eq!(snapshot.column, 3);
        assert_eq!(snapshot.contents, "a\u{ff21}b");
    }
}
