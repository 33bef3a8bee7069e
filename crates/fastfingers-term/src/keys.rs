//! crossterm key events as raw codes.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fastfingers_core::{KeySource, RawKey};

/// Reads keys from the terminal, blocking until one arrives.
///
/// Resize, mouse and focus events are skipped, as are key releases on
/// terminals that report them.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> io::Result<RawKey> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(raw) = key_to_raw(&key) {
                    return Ok(raw);
                }
                tracing::trace!("Skipping unmapped key {:?}", key.code);
            }
        }
    }
}

/// Converts a key event to its curses-style code.
pub fn key_to_raw(key: &KeyEvent) -> Option<RawKey> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => RawKey::ctrl(c),
        KeyCode::Char(c) => Some(RawKey::from(c)),
        KeyCode::Enter => Some(RawKey::NEWLINE),
        KeyCode::Backspace => Some(RawKey::KEY_BACKSPACE),
        KeyCode::Delete => Some(RawKey::DELETE),
        KeyCode::Tab => Some(RawKey::TAB),
        KeyCode::Esc => Some(RawKey::ESCAPE),
        KeyCode::Home => Some(RawKey::CTRL_A),
        KeyCode::End => Some(RawKey::CTRL_E),
        _ => None,
    }
}
