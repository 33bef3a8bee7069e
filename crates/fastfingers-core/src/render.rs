//! What the core hands to a screen.
//!
//! The core never draws. After every commit the typing session passes a
//! `RowView` and a `PerformanceReport` to a `RenderSink`; how those become
//! cells on a terminal is the sink's business.

use std::io;

use crate::performance::PerformanceReport;
use crate::rows::WordRow;

/// Receives snapshots after each commit.
pub trait RenderSink {
    /// Draws the word rows and the line being typed.
    fn draw_rows(&mut self, view: &RowView<'_>) -> io::Result<()>;

    /// Draws the running counters.
    fn draw_stats(&mut self, report: &PerformanceReport) -> io::Result<()>;
}

/// A sink that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw_rows(&mut self, _view: &RowView<'_>) -> io::Result<()> {
        Ok(())
    }

    fn draw_stats(&mut self, _report: &PerformanceReport) -> io::Result<()> {
        Ok(())
    }
}

/// The rows plus typing progress, borrowed from the session.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    pub current: &'a WordRow,
    pub next: &'a WordRow,
    /// Entries already submitted for the current row
    pub history: &'a [String],
    /// The line being typed, untrimmed
    pub entry: &'a str,
    /// Display column of the cursor within `entry`
    pub cursor_column: usize,
}

impl<'a> RowView<'a> {
    /// Index of the word being typed.
    pub fn position(&self) -> usize {
        self.history.len()
    }

    /// How each word of the current row should be shown.
    pub fn marks(&self) -> Vec<WordMark<'a>> {
        let position = self.position();
        let (current, history, entry) = (self.current, self.history, self.entry);
        current
            .words()
            .iter()
            .enumerate()
            .map(|(i, word)| {
                if i < position {
                    WordMark::typed(word, &history[i])
                } else if i == position {
                    let (matched, rest) = split_common_prefix(word, entry);
                    WordMark::Active { matched, rest }
                } else {
                    WordMark::Pending(word)
                }
            })
            .collect()
    }
}

/// Display state of one expected word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordMark<'a> {
    /// Already submitted
    Typed {
        /// Leading part of the word the entry got right
        matched: &'a str,
        /// Remainder of the word the entry missed
        rest: &'a str,
        /// The entry ran past the end of the word
        overtyped: bool,
    },
    /// Being typed now
    Active { matched: &'a str, rest: &'a str },
    /// Not reached yet
    Pending(&'a str),
}

impl<'a> WordMark<'a> {
    fn typed(expected: &'a str, entered: &str) -> Self {
        let (matched, rest) = split_common_prefix(expected, entered);
        WordMark::Typed {
            matched,
            rest,
            overtyped: entered != expected && entered.starts_with(expected),
        }
    }
}

/// Splits `expected` after the longest prefix it shares with `entered`.
///
/// ```
/// use fastfingers_core::render::split_common_prefix;
///
/// assert_eq!(split_common_prefix("dog", "dg"), ("d", "og"));
/// ```
pub fn split_common_prefix<'a>(expected: &'a str, entered: &str) -> (&'a str, &'a str) {
    let split = expected
        .char_indices()
        .zip(entered.chars())
        .find(|((_, a), b)| a != b)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| {
            // One is a prefix of the other
            expected
                .char_indices()
                .nth(entered.chars().count())
                .map_or(expected.len(), |(i, _)| i)
        });
    expected.split_at(split)
}
