//! Editing commands produced by the keystroke classifier.
//!
//! ## Learning: Closed Enums
//!
//! Unlike an editor command set that grows with plugins, the line editor
//! understands a fixed vocabulary. Leaving the enum exhaustive (no
//! `#[non_exhaustive]`) means every `match` over it is checked by the
//! compiler, and adding a command forces every consumer to handle it.

use fastfingers_buffer::{BufferResult, LineBuffer};

/// A single editing command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditCommand {
    /// Insert a character at the cursor
    InsertChar(char),
    /// Move the cursor to the start of the line
    MoveToStart,
    /// Move the cursor to the end of the line
    MoveToEnd,
    /// Delete the character before the cursor
    DeleteBackward,
    /// Delete everything from the cursor to the end of the line
    KillToEnd,
    /// The current word is complete
    Submit,
    /// Leave the edit loop
    Abort,
    /// Drop the keystroke
    Ignore,
}

impl EditCommand {
    /// Returns the command's display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            EditCommand::InsertChar(_) => "Insert Character",
            EditCommand::MoveToStart => "Move to Start",
            EditCommand::MoveToEnd => "Move to End",
            EditCommand::DeleteBackward => "Delete Backward",
            EditCommand::KillToEnd => "Kill to End",
            EditCommand::Submit => "Submit",
            EditCommand::Abort => "Abort",
            EditCommand::Ignore => "Ignore",
        }
    }

    /// Applies the command to a buffer.
    ///
    /// `Submit`, `Abort` and `Ignore` leave the buffer untouched; what they
    /// mean is up to the edit loop and its observer.
    pub fn apply(&self, buffer: &mut LineBuffer) -> BufferResult<()> {
        match *self {
            EditCommand::InsertChar(c) => buffer.insert(c)?,
            EditCommand::MoveToStart => buffer.move_to_start(),
            EditCommand::MoveToEnd => buffer.move_to_end(),
            EditCommand::DeleteBackward => {
                buffer.delete_backward();
            }
            EditCommand::KillToEnd => {
                buffer.kill_to_end();
            }
            EditCommand::Submit | EditCommand::Abort | EditCommand::Ignore => {}
        }
        Ok(())
    }
}

impl std::fmt::Display for EditCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditCommand::InsertChar(c) => write!(f, "{} '{}'", self.display_name(), c),
            _ => write!(f, "{}", self.display_name()),
        }
    }
}
