//! Drawing rows, entry line and stats with crossterm.
//!
//! ```text
//! row 0   Ctrl-G to exit.
//! row 3       the of and to a in is you that
//! row 4       it he was for on are as with his
//! row 6       th▌
//! row 10  Correct:   ...
//! ```

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{Clear, ClearType};
use fastfingers_core::{PerformanceReport, RenderSink, RowView, WordMark};

/// Screen rows and left margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub margin: u16,
    pub title_row: u16,
    pub rows_row: u16,
    pub entry_row: u16,
    pub stats_row: u16,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            margin: 4,
            title_row: 0,
            rows_row: 3,
            entry_row: 6,
            stats_row: 10,
        }
    }
}

/// A `RenderSink` that writes crossterm commands to `out`.
pub struct TerminalRenderer<W: Write> {
    out: W,
    layout: Layout,
    /// Where the cursor goes back to after each frame
    cursor_column: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_layout(out, Layout::default())
    }

    pub fn with_layout(out: W, layout: Layout) -> Self {
        Self {
            out,
            layout,
            cursor_column: 0,
        }
    }

    /// Shows the start screen.
    pub fn draw_splash(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            Clear(ClearType::All),
            MoveTo(self.layout.margin, self.layout.rows_row),
            PrintStyledContent("fastfingers".bold()),
            MoveTo(self.layout.margin, self.layout.rows_row + 1),
            Print("Hit a key to begin.")
        )?;
        self.out.flush()
    }

    /// Clears the screen and shows the exit hint.
    pub fn draw_title(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            Clear(ClearType::All),
            MoveTo(0, self.layout.title_row),
            Print("Ctrl-G to exit.")
        )?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_mark(&mut self, mark: WordMark<'_>) -> io::Result<()> {
        match mark {
            WordMark::Typed {
                matched,
                rest,
                overtyped,
            } => {
                if overtyped {
                    queue!(self.out, PrintStyledContent(matched.red()))?;
                } else {
                    queue!(self.out, PrintStyledContent(matched.bold()))?;
                }
                queue!(self.out, PrintStyledContent(rest.red()))
            }
            WordMark::Active { matched, rest } => queue!(
                self.out,
                PrintStyledContent(matched.bold()),
                PrintStyledContent(rest.reverse())
            ),
            WordMark::Pending(word) => queue!(self.out, Print(word)),
        }
    }

    fn park_cursor(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(
                self.layout.margin.saturating_add(self.cursor_column),
                self.layout.entry_row
            )
        )
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn draw_rows(&mut self, view: &RowView<'_>) -> io::Result<()> {
        let Layout {
            margin,
            rows_row,
            entry_row,
            ..
        } = self.layout;

        queue!(self.out, MoveTo(margin, rows_row), Clear(ClearType::CurrentLine))?;
        for mark in view.marks() {
            self.draw_mark(mark)?;
            queue!(self.out, Print(" "))?;
        }

        queue!(
            self.out,
            MoveTo(margin, rows_row + 1),
            Clear(ClearType::CurrentLine),
            Print(view.next.to_string()),
            MoveTo(margin, entry_row),
            Clear(ClearType::CurrentLine),
            Print(view.entry)
        )?;

        self.cursor_column = u16::try_from(view.cursor_column).unwrap_or(u16::MAX);
        self.park_cursor()?;
        self.out.flush()
    }

    fn draw_stats(&mut self, report: &PerformanceReport) -> io::Result<()> {
        let text = report.to_string();
        for (i, line) in text.lines().enumerate() {
            let row = self.layout.stats_row + i as u16;
            queue!(
                self.out,
                MoveTo(0, row),
                Clear(ClearType::CurrentLine),
                Print(line)
            )?;
        }
        self.park_cursor()?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastfingers_core::{Lexicon, WordRows};

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_draw_rows_writes_words_and_entry() {
        let lexicon = Lexicon::from_words(["kiwi"]).unwrap();
        let rows = WordRows::seeded(lexicon, 2, 1).unwrap();
        let history = vec!["kiwi".to_string()];
        let view = RowView {
            current: rows.current_row(),
            next: rows.next_row(),
            history: &history,
            entry: "ki",
            cursor_column: 2,
        };

        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.draw_rows(&view).unwrap();
        let text = output(renderer);

        assert!(text.contains("kiwi"));
        assert!(text.contains("wi"));
        assert!(text.contains("kiwi kiwi"));
        // Cursor parked after the entry: margin 4 + column 2, row 6 (1-based 7;7)
        assert!(text.ends_with("\x1b[7;7H"));
    }

    #[test]
    fn test_draw_stats_writes_summary() {
        let report = PerformanceReport {
            correct: 5,
            attempted: 8,
            accuracy: 0.625,
            wpm: 31.0,
            duration_secs: 9.7,
        };
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.draw_stats(&report).unwrap();
        let text = output(renderer);

        assert!(text.contains("Correct:   5"));
        assert!(text.contains("Attempted: 8"));
        assert!(text.contains("WPM:       31.0"));
    }

    #[test]
    fn test_splash_and_title() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.draw_splash().unwrap();
        renderer.draw_title().unwrap();
        let text = output(renderer);
        assert!(text.contains("Hit a key to begin."));
        assert!(text.contains("Ctrl-G to exit."));
    }
}
