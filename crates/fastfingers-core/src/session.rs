//! The typing session: the observer that turns commits into scores.
//!
//! ## Learning: Splitting Borrows
//!
//! While the edit loop runs, the session needs to be the loop's observer
//! *and* keep its performance clock inside a `SessionGuard`. Both want
//! `&mut` access to parts of the session. Destructuring the struct hands
//! out disjoint `&mut` borrows of each field, so the guard can own the
//! clock while a short-lived `Scorer` borrows the rest.

use fastfingers_buffer::LineBuffer;
use rand::Rng;
use rand::rngs::SmallRng;

use crate::command::EditCommand;
use crate::editor::{Commit, CommitObserver, LineEditor};
use crate::input::KeySource;
use crate::lexicon::Lexicon;
use crate::performance::{PerformanceMonitor, PerformanceReport};
use crate::render::{RenderSink, RowView};
use crate::rows::WordRows;
use crate::{CoreError, CoreResult};

/// Word rows, scoring and rendering for one run of the trainer.
///
/// A row advances after exactly `width` submissions. If the edit loop is
/// aborted part way through a row, the words already submitted stay
/// recorded, the unfinished entry is dropped, and the row is abandoned.
#[derive(Debug)]
pub struct TypingSession<S, R = SmallRng> {
    rows: WordRows<R>,
    performance: PerformanceMonitor,
    /// Entries submitted for the current row
    history: Vec<String>,
    sink: S,
}

impl<S: RenderSink> TypingSession<S, SmallRng> {
    /// Creates a session with randomly seeded rows.
    pub fn new(lexicon: Lexicon, width: usize, sink: S) -> CoreResult<Self> {
        Ok(Self::with_rows(WordRows::new(lexicon, width)?, sink))
    }
}

impl<S: RenderSink, R: Rng> TypingSession<S, R> {
    /// Creates a session over an existing row window.
    pub fn with_rows(rows: WordRows<R>, sink: S) -> Self {
        Self {
            rows,
            performance: PerformanceMonitor::new(),
            history: Vec::new(),
            sink,
        }
    }

    // ==================== Accessors ====================

    pub fn rows(&self) -> &WordRows<R> {
        &self.rows
    }

    pub fn performance(&self) -> &PerformanceMonitor {
        &self.performance
    }

    pub fn report(&self) -> PerformanceReport {
        self.performance.report()
    }

    /// Entries submitted so far in the current row.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Index of the word being typed in the current row.
    pub fn position(&self) -> usize {
        self.history.len()
    }

    /// The word the next submission is compared against.
    pub fn expected_word(&self) -> &str {
        self.rows.current_row().get(self.position()).unwrap_or_default()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // ==================== Actions ====================

    /// Records a submitted word and advances the row when it is full.
    ///
    /// Returns true if the word was correct.
    pub fn submit(&mut self, entered: &str) -> bool {
        self.scorer().submit(entered)
    }

    /// Draws the rows with an empty entry line.
    pub fn render_initial(&mut self) -> CoreResult<()> {
        self.scorer().render("", 0)
    }

    /// Runs the edit loop with this session as its observer.
    ///
    /// The performance clock starts on the first call and is stopped on
    /// every exit path, including read failures. Calling `run` again after
    /// a failure continues the same clock.
    pub fn run<K>(&mut self, editor: &mut LineEditor, keys: &mut K) -> CoreResult<String>
    where
        K: KeySource + ?Sized,
    {
        let Self {
            rows,
            performance,
            history,
            sink,
        } = self;

        let mut clock = performance.session();
        let mut scorer = Scorer {
            rows,
            performance: &mut clock,
            history,
            sink,
        };
        editor.run(keys, &mut scorer)
    }

    fn scorer(&mut self) -> Scorer<'_, S, R> {
        Scorer {
            rows: &mut self.rows,
            performance: &mut self.performance,
            history: &mut self.history,
            sink: &mut self.sink,
        }
    }
}

impl<S: RenderSink, R: Rng> CommitObserver for TypingSession<S, R> {
    fn on_commit(&mut self, commit: &Commit<'_>, buffer: &mut LineBuffer) -> CoreResult<()> {
        self.scorer().on_commit(commit, buffer)
    }
}

/// Borrowed view of a session used while the edit loop runs.
struct Scorer<'s, S, R> {
    rows: &'s mut WordRows<R>,
    performance: &'s mut PerformanceMonitor,
    history: &'s mut Vec<String>,
    sink: &'s mut S,
}

impl<S: RenderSink, R: Rng> Scorer<'_, S, R> {
    fn submit(&mut self, entered: &str) -> bool {
        let expected = self
            .rows
            .current_row()
            .get(self.history.len())
            .unwrap_or_default()
            .to_string();
        self.performance.record(entered, &expected);
        self.history.push(entered.to_string());

        if self.history.len() >= self.rows.width() {
            self.rows.advance();
            self.history.clear();
        }
        entered == expected
    }

    fn render(&mut self, entry: &str, cursor_column: usize) -> CoreResult<()> {
        let view = RowView {
            current: self.rows.current_row(),
            next: self.rows.next_row(),
            history: self.history.as_slice(),
            entry,
            cursor_column,
        };
        self.sink.draw_rows(&view).map_err(CoreError::Render)?;
        self.sink
            .draw_stats(&self.performance.report())
            .map_err(CoreError::Render)
    }
}

impl<S: RenderSink, R: Rng> CommitObserver for Scorer<'_, S, R> {
    fn on_commit(&mut self, commit: &Commit<'_>, buffer: &mut LineBuffer) -> CoreResult<()> {
        if commit.command == EditCommand::Submit {
            self.submit(commit.contents);
            buffer.clear();
            self.render("", 0)
        } else {
            self.render(commit.contents, buffer.cursor_column())
        }
    }
}
