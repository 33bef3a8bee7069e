//! Raw key input sources.
//!
//! The edit loop reads through the `KeySource` trait so it can be driven
//! by a real terminal in production and by a scripted queue in tests:
//!
//! ```text
//! Production:  LineEditor ──▶ TerminalKeys ──▶ crossterm::event::read()
//! Testing:     LineEditor ──▶ ScriptedKeys ──▶ VecDeque<RawKey>
//! ```

use std::collections::VecDeque;
use std::io;

use crate::keymap::RawKey;

/// A blocking source of raw key codes.
pub trait KeySource {
    /// Blocks until the next key is available.
    ///
    /// Errors are returned as-is; retrying is up to the implementation.
    fn read_key(&mut self) -> io::Result<RawKey>;
}

/// A key source that replays a pre-programmed queue.
///
/// Reading past the end fails with `UnexpectedEof`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<RawKey>,
}

impl ScriptedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(keys: impl IntoIterator<Item = RawKey>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Queues one key per character of `text`.
    pub fn typed(text: &str) -> Self {
        Self::with_keys(text.chars().map(RawKey::from_char))
    }

    pub fn push(&mut self, key: RawKey) {
        self.keys.push_back(key);
    }

    pub fn push_text(&mut self, text: &str) {
        self.keys.extend(text.chars().map(RawKey::from_char));
    }

    pub fn pending_count(&self) -> usize {
        self.keys.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<RawKey> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "No keys left in script")
        })
    }
}
