//! The edit loop.
//!
//! ## Learning: Read, Classify, Apply, Notify
//!
//! ```text
//!            ┌──────────────────────────────────────────────┐
//!            ▼                                              │
//!   read_key ──▶ classify ──▶ Ignore? ── yes ───────────────┤
//!                               │ no                        │
//!                               ▼                           │
//!                            Abort? ── yes ──▶ Terminated   │
//!                               │ no                        │
//!                               ▼                           │
//!                        apply to buffer ──▶ on_commit ─────┘
//! ```
//!
//! The observer receives `&mut LineBuffer`, so it can reset the line after
//! recording a word. That change is only seen by the next iteration; the
//! `Commit` it was handed already holds a copy of the contents.

use fastfingers_buffer::LineBuffer;

use crate::command::EditCommand;
use crate::config::Config;
use crate::input::KeySource;
use crate::keymap::{KeyClassifier, RawKey};
use crate::{CoreError, CoreResult};

/// What the observer sees after each accepted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit<'a> {
    /// Buffer contents after the command was applied
    pub contents: &'a str,
    /// The key as read from the source, before any remapping
    pub raw: RawKey,
    /// The command that was applied
    pub command: EditCommand,
}

/// Post-mutation hook invoked once per accepted command.
///
/// Returning an error ends the edit loop and hands the error to the caller.
pub trait CommitObserver {
    fn on_commit(&mut self, commit: &Commit<'_>, buffer: &mut LineBuffer) -> CoreResult<()>;
}

impl<F> CommitObserver for F
where
    F: FnMut(&Commit<'_>, &mut LineBuffer) -> CoreResult<()>,
{
    fn on_commit(&mut self, commit: &Commit<'_>, buffer: &mut LineBuffer) -> CoreResult<()> {
        self(commit, buffer)
    }
}

/// Edit loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    /// Reading and applying keys
    #[default]
    Editing,
    /// An `Abort` was seen; no further keys are read
    Terminated,
}

/// Outcome of a single loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The key classified as `Ignore`; nothing happened
    Ignored,
    /// The command was applied and the observer notified
    Committed(EditCommand),
    /// The editor is terminated
    Terminated,
}

/// A single-line editor driven by raw keys.
///
/// ## Thread Safety
///
/// `LineEditor` is owned by one thread and blocks inside `run` while
/// waiting for keys. Nothing is shared, so no locking is involved.
#[derive(Debug, Default)]
pub struct LineEditor {
    /// The line being edited
    buffer: LineBuffer,

    /// Raw key to command mapping
    classifier: KeyClassifier,

    state: EditorState,
}

impl LineEditor {
    /// Creates an editor with the default key table and strip mode on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an editor with a custom classifier.
    pub fn with_classifier(classifier: KeyClassifier) -> Self {
        Self {
            classifier,
            ..Self::default()
        }
    }

    /// Creates an editor from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            buffer: LineBuffer::with_strip(config.editor.strip),
            classifier: KeyClassifier::from_config(&config.keyboard),
            state: EditorState::Editing,
        }
    }

    // ==================== Accessors ====================

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut LineBuffer {
        &mut self.buffer
    }

    pub fn classifier(&self) -> &KeyClassifier {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut KeyClassifier {
        &mut self.classifier
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == EditorState::Terminated
    }

    /// Current buffer contents (strip mode applied).
    pub fn contents(&self) -> String {
        self.buffer.contents()
    }

    // ==================== Loop ====================

    /// Runs until an `Abort` key arrives and returns the final contents.
    ///
    /// A read failure or observer error ends the loop with that error. The
    /// editor stays in `Editing`, so a caller that wants to retry can call
    /// `run` again with the same buffer.
    pub fn run<S, O>(&mut self, source: &mut S, observer: &mut O) -> CoreResult<String>
    where
        S: KeySource + ?Sized,
        O: CommitObserver + ?Sized,
    {
        loop {
            if let Step::Terminated = self.step(source, observer)? {
                return Ok(self.buffer.contents());
            }
        }
    }

    /// Reads and handles exactly one key.
    pub fn step<S, O>(&mut self, source: &mut S, observer: &mut O) -> CoreResult<Step>
    where
        S: KeySource + ?Sized,
        O: CommitObserver + ?Sized,
    {
        if self.is_terminated() {
            return Ok(Step::Terminated);
        }

        let raw = source.read_key().map_err(CoreError::InputRead)?;
        let command = self.classifier.classify(raw);
        tracing::trace!("Key {} classified as {}", raw, command);

        match command {
            EditCommand::Ignore => Ok(Step::Ignored),
            EditCommand::Abort => {
                tracing::debug!("Edit loop aborted by {}", raw);
                self.state = EditorState::Terminated;
                Ok(Step::Terminated)
            }
            _ => {
                command.apply(&mut self.buffer)?;
                let contents = self.buffer.contents();
                let commit = Commit {
                    contents: &contents,
                    raw,
                    command,
                };
                observer.on_commit(&commit, &mut self.buffer)?;
                Ok(Step::Committed(command))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedKeys;

    /// Records every commit it sees.
    #[derive(Default)]
    struct Recorder {
        commits: Vec<(String, RawKey, EditCommand)>,
    }

    impl CommitObserver for Recorder {
        fn on_commit(&mut self, commit: &Commit<'_>, _buffer: &mut LineBuffer) -> CoreResult<()> {
            self.commits
                .push((commit.contents.to_string(), commit.raw, commit.command));
            Ok(())
        }
    }

    #[test]
    fn test_run_returns_contents_on_abort() {
        let mut keys = ScriptedKeys::typed("cat");
        keys.push(RawKey::CTRL_G);
        let mut editor = LineEditor::new();
        let mut recorder = Recorder::default();

        let result = editor.run(&mut keys, &mut recorder).unwrap();
        assert_eq!(result, "cat");
        assert!(editor.is_terminated());
        assert_eq!(recorder.commits.len(), 3);
        assert_eq!(recorder.commits[2].0, "cat");
        assert_eq!(recorder.commits[2].1, RawKey::from('t'));
    }

    #[test]
    fn test_ignored_keys_do_not_notify() {
        let mut keys = ScriptedKeys::with_keys([
            RawKey::NONE,
            RawKey::ESCAPE,
            RawKey::from('a'),
            RawKey::CTRL_G,
        ]);
        let mut editor = LineEditor::new();
        let mut recorder = Recorder::default();

        editor.run(&mut keys, &mut recorder).unwrap();
        assert_eq!(recorder.commits.len(), 1);
        assert_eq!(recorder.commits[0].2, EditCommand::InsertChar('a'));
    }

    #[test]
    fn test_terminated_is_absorbing() {
        let mut keys = ScriptedKeys::with_keys([RawKey::from('x'), RawKey::CTRL_C]);
        let mut editor = LineEditor::new();
        let mut recorder = Recorder::default();
        editor.run(&mut keys, &mut recorder).unwrap();

        // Further keys are never read
        keys.push_text("yz");
        assert_eq!(editor.run(&mut keys, &mut recorder).unwrap(), "x");
        assert_eq!(editor.step(&mut keys, &mut recorder).unwrap(), Step::Terminated);
        assert_eq!(keys.pending_count(), 2);
    }

    #[test]
    fn test_read_failure_propagates() {
        let mut keys = ScriptedKeys::typed("ab");
        let mut editor = LineEditor::new();
        let mut recorder = Recorder::default();

        let err = editor.run(&mut keys, &mut recorder).unwrap_err();
        assert!(matches!(err, CoreError::InputRead(_)));
        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(editor.contents(), "ab");
    }

    #[test]
    fn test_observer_clear_is_seen_next_iteration() {
        let mut keys = ScriptedKeys::typed("ab c");
        keys.push(RawKey::CTRL_G);
        let mut editor = LineEditor::new();
        let mut seen = Vec::new();

        let mut observer = |commit: &Commit<'_>, buffer: &mut LineBuffer| -> CoreResult<()> {
            seen.push(commit.contents.to_string());
            if commit.command == EditCommand::Submit {
                buffer.clear();
            }
            Ok(())
        };

        let result = editor.run(&mut keys, &mut observer).unwrap();
        assert_eq!(result, "c");
        // The submit commit still carries the pre-clear contents
        assert_eq!(seen, vec!["a", "ab", "ab", "c"]);
    }

    #[test]
    fn test_observer_error_ends_loop() {
        let mut keys = ScriptedKeys::typed("abc");
        let mut editor = LineEditor::new();
        let mut observer = |commit: &Commit<'_>, _: &mut LineBuffer| -> CoreResult<()> {
            if commit.contents == "ab" {
                return Err(CoreError::Render(std::io::Error::other("sink closed")));
            }
            Ok(())
        };

        let err = editor.run(&mut keys, &mut observer).unwrap_err();
        assert!(matches!(err, CoreError::Render(_)));
        assert_eq!(keys.pending_count(), 1);
    }

    #[test]
    fn test_override_changes_submit_key() {
        let classifier = KeyClassifier::with_override(|raw: RawKey| match raw {
            RawKey::TAB => Some(RawKey::SPACE),
            RawKey::SPACE => Some(RawKey::from('_')),
            _ => None,
        });
        let mut editor = LineEditor::with_classifier(classifier);
        let mut keys = ScriptedKeys::with_keys([
            RawKey::from('a'),
            RawKey::SPACE,
            RawKey::TAB,
            RawKey::CTRL_G,
        ]);
        let mut recorder = Recorder::default();

        editor.run(&mut keys, &mut recorder).unwrap();
        let commands: Vec<_> = recorder.commits.iter().map(|c| c.2).collect();
        assert_eq!(
            commands,
            vec![
                EditCommand::InsertChar('a'),
                EditCommand::InsertChar('_'),
                EditCommand::Submit
            ]
        );
        // The observer sees the original key, not the remapped one
        assert_eq!(recorder.commits[2].1, RawKey::TAB);
    }

    #[test]
    fn test_from_config_respects_strip() {
        let mut config = Config::default();
        config.editor.strip = false;
        let mut editor = LineEditor::from_config(&config);
        let mut keys = ScriptedKeys::with_keys([RawKey::from('a'), RawKey::CTRL_G]);
        editor.buffer_mut().insert(' ').unwrap();
        let result = editor.run(&mut keys, &mut Recorder::default()).unwrap();
        assert_eq!(result, " a");
    }
}
