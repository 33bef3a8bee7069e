//! Keystroke classification.
//!
//! ## Learning: Pure Functions at the Edge of a State Machine
//!
//! A raw key code goes through two stages before it can touch the buffer:
//!
//! ```text
//! raw code ──▶ override (optional) ──▶ fixed table ──▶ EditCommand
//! ```
//!
//! Both stages are plain functions of their input. The override lets an
//! application decide which physical keys mean "submit" or "delete"
//! without touching the edit loop, and the fixed table stays trivially
//! testable.

use std::collections::HashMap;

use crate::command::EditCommand;
use crate::config::KeyboardConfig;

/// A raw key code as delivered by an input source.
///
/// Codes follow curses conventions: ASCII control codes, Unicode code
/// points for printable characters, and `263` for `KEY_BACKSPACE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RawKey(pub u32);

impl RawKey {
    /// The "no key" code. Remapping to it drops the keystroke.
    pub const NONE: RawKey = RawKey(0);
    pub const CTRL_A: RawKey = RawKey(1);
    pub const CTRL_C: RawKey = RawKey(3);
    pub const CTRL_E: RawKey = RawKey(5);
    pub const CTRL_G: RawKey = RawKey(7);
    pub const BACKSPACE: RawKey = RawKey(8);
    pub const TAB: RawKey = RawKey(9);
    pub const NEWLINE: RawKey = RawKey(10);
    pub const CTRL_K: RawKey = RawKey(11);
    pub const RETURN: RawKey = RawKey(13);
    pub const ESCAPE: RawKey = RawKey(27);
    pub const SPACE: RawKey = RawKey(32);
    pub const DELETE: RawKey = RawKey(127);
    /// curses `KEY_BACKSPACE`
    pub const KEY_BACKSPACE: RawKey = RawKey(263);

    /// Code for a literal character.
    pub fn from_char(c: char) -> Self {
        RawKey(c as u32)
    }

    /// Code for Ctrl plus an ASCII letter.
    pub fn ctrl(letter: char) -> Option<Self> {
        letter
            .is_ascii_alphabetic()
            .then(|| RawKey(letter.to_ascii_lowercase() as u32 & 0x1f))
    }

    #[inline]
    pub fn code(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == RawKey::NONE
    }

    /// Returns the character for this code, if it is one.
    pub fn as_char(self) -> Option<char> {
        char::from_u32(self.0)
    }

    /// Parses a key name such as `"space"`, `"ctrl+g"`, `"x"` or `"263"`.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        match lower.as_str() {
            "none" | "nop" => Some(RawKey::NONE),
            "space" => Some(RawKey::SPACE),
            "enter" | "newline" => Some(RawKey::NEWLINE),
            "return" => Some(RawKey::RETURN),
            "tab" => Some(RawKey::TAB),
            "backspace" | "bs" => Some(RawKey::KEY_BACKSPACE),
            "delete" | "del" => Some(RawKey::DELETE),
            "escape" | "esc" => Some(RawKey::ESCAPE),
            _ if lower.starts_with("ctrl+") => {
                let mut rest = lower["ctrl+".len()..].chars();
                match (rest.next(), rest.next()) {
                    (Some(letter), None) => RawKey::ctrl(letter),
                    _ => None,
                }
            }
            // Case matters for literal characters, so use the original text
            _ if trimmed.chars().count() == 1 => trimmed.chars().next().map(RawKey::from_char),
            _ if trimmed.chars().all(|c| c.is_ascii_digit()) => trimmed.parse().ok().map(RawKey),
            _ => None,
        }
    }
}

impl std::fmt::Display for RawKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            RawKey::NONE => write!(f, "None"),
            RawKey::SPACE => write!(f, "Space"),
            RawKey::NEWLINE => write!(f, "Enter"),
            RawKey::RETURN => write!(f, "Return"),
            RawKey::TAB => write!(f, "Tab"),
            RawKey::BACKSPACE | RawKey::KEY_BACKSPACE => write!(f, "Backspace"),
            RawKey::DELETE => write!(f, "Delete"),
            RawKey::ESCAPE => write!(f, "Escape"),
            RawKey(code @ 1..=26) => {
                write!(f, "Ctrl+{}", char::from(b'A' + code as u8 - 1))
            }
            RawKey(code) => match self.as_char().filter(|c| !c.is_control()) {
                Some(c) => write!(f, "{}", c),
                None => write!(f, "#{}", code),
            },
        }
    }
}

impl From<char> for RawKey {
    fn from(c: char) -> Self {
        RawKey::from_char(c)
    }
}

/// Classifies a raw code against the fixed table.
///
/// | Code | Command |
/// |------|---------|
/// | newline, return, space | `Submit` |
/// | BS, DEL, `KEY_BACKSPACE` | `DeleteBackward` |
/// | Ctrl-G, Ctrl-C | `Abort` |
/// | Ctrl-A / Ctrl-E | `MoveToStart` / `MoveToEnd` |
/// | Ctrl-K | `KillToEnd` |
/// | other printable | `InsertChar` |
/// | anything else | `Ignore` |
pub fn classify(raw: RawKey) -> EditCommand {
    match raw {
        RawKey::NEWLINE | RawKey::RETURN | RawKey::SPACE => EditCommand::Submit,
        RawKey::BACKSPACE | RawKey::DELETE | RawKey::KEY_BACKSPACE => EditCommand::DeleteBackward,
        RawKey::CTRL_G | RawKey::CTRL_C => EditCommand::Abort,
        RawKey::CTRL_A => EditCommand::MoveToStart,
        RawKey::CTRL_E => EditCommand::MoveToEnd,
        RawKey::CTRL_K => EditCommand::KillToEnd,
        _ => match raw.as_char() {
            Some(c) if !c.is_control() => EditCommand::InsertChar(c),
            _ => EditCommand::Ignore,
        },
    }
}

/// A hook that may remap a raw code before classification.
///
/// Returning `None` keeps the original code. Returning `Some(RawKey::NONE)`
/// drops the keystroke.
pub trait KeyOverride {
    fn remap(&self, raw: RawKey) -> Option<RawKey>;
}

impl<F> KeyOverride for F
where
    F: Fn(RawKey) -> Option<RawKey>,
{
    fn remap(&self, raw: RawKey) -> Option<RawKey> {
        self(raw)
    }
}

/// Table-driven override built from configuration.
#[derive(Debug, Clone, Default)]
pub struct KeyRemap {
    map: HashMap<RawKey, RawKey>,
}

impl KeyRemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the remap table from `[keyboard.remap]`.
    ///
    /// Entries whose names do not parse are skipped.
    pub fn from_config(config: &KeyboardConfig) -> Self {
        let mut remap = Self::new();
        for (from, to) in &config.remap {
            match (RawKey::parse(from), RawKey::parse(to)) {
                (Some(from), Some(to)) => remap.insert(from, to),
                _ => tracing::warn!("Ignoring key remap {:?} = {:?}", from, to),
            }
        }
        remap
    }

    pub fn insert(&mut self, from: RawKey, to: RawKey) {
        self.map.insert(from, to);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl KeyOverride for KeyRemap {
    fn remap(&self, raw: RawKey) -> Option<RawKey> {
        self.map.get(&raw).copied()
    }
}

/// Maps raw codes to commands, honoring an optional override.
#[derive(Default)]
pub struct KeyClassifier {
    overrides: Option<Box<dyn KeyOverride>>,
}

impl KeyClassifier {
    /// Creates a classifier that uses only the fixed table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a classifier with an override consulted first.
    pub fn with_override(overrides: impl KeyOverride + 'static) -> Self {
        Self {
            overrides: Some(Box::new(overrides)),
        }
    }

    /// Creates a classifier from keyboard configuration.
    ///
    /// An empty remap table installs no override at all.
    pub fn from_config(config: &KeyboardConfig) -> Self {
        let remap = KeyRemap::from_config(config);
        if remap.is_empty() {
            Self::new()
        } else {
            Self::with_override(remap)
        }
    }

    pub fn has_override(&self) -> bool {
        self.overrides.is_some()
    }

    /// Classifies a raw code.
    ///
    /// A remapped code that the table does not recognize is dropped as
    /// `Ignore` rather than reported, so a bad remap can never stop the
    /// edit loop.
    pub fn classify(&self, raw: RawKey) -> EditCommand {
        let Some(remapped) = self.overrides.as_ref().and_then(|o| o.remap(raw)) else {
            return classify(raw);
        };

        if remapped.is_none() {
            tracing::trace!("Key {} remapped to nothing", raw);
            return EditCommand::Ignore;
        }

        let command = classify(remapped);
        if command == EditCommand::Ignore {
            tracing::debug!("Key {} remapped to unrecognized code {}", raw, remapped.code());
        }
        command
    }
}

impl std::fmt::Debug for KeyClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyClassifier")
            .field("has_override", &self.has_override())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_keys() {
        assert_eq!(classify(RawKey::SPACE), EditCommand::Submit);
        assert_eq!(classify(RawKey::NEWLINE), EditCommand::Submit);
        assert_eq!(classify(RawKey::RETURN), EditCommand::Submit);
    }

    #[test]
    fn test_backspace_variants() {
        for key in [RawKey::BACKSPACE, RawKey::DELETE, RawKey::KEY_BACKSPACE] {
            assert_eq!(classify(key), EditCommand::DeleteBackward);
        }
    }

    #[test]
    fn test_control_table() {
        assert_eq!(classify(RawKey::CTRL_G), EditCommand::Abort);
        assert_eq!(classify(RawKey::CTRL_C), EditCommand::Abort);
        assert_eq!(classify(RawKey::CTRL_A), EditCommand::MoveToStart);
        assert_eq!(classify(RawKey::CTRL_E), EditCommand::MoveToEnd);
        assert_eq!(classify(RawKey::CTRL_K), EditCommand::KillToEnd);
    }

    #[test]
    fn test_printable_and_unknown() {
        assert_eq!(classify(RawKey::from('q')), EditCommand::InsertChar('q'));
        assert_eq!(classify(RawKey::from('Q')), EditCommand::InsertChar('Q'));
        assert_eq!(classify(RawKey::NONE), EditCommand::Ignore);
        assert_eq!(classify(RawKey::ESCAPE), EditCommand::Ignore);
        assert_eq!(classify(RawKey(0xD800)), EditCommand::Ignore);
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(RawKey::parse("space"), Some(RawKey::SPACE));
        assert_eq!(RawKey::parse("Ctrl+G"), Some(RawKey::CTRL_G));
        assert_eq!(RawKey::parse("ctrl+k"), Some(RawKey::CTRL_K));
        assert_eq!(RawKey::parse("X"), Some(RawKey::from('X')));
        assert_eq!(RawKey::parse("1"), Some(RawKey::from('1')));
        assert_eq!(RawKey::parse("263"), Some(RawKey::KEY_BACKSPACE));
        assert_eq!(RawKey::parse("none"), Some(RawKey::NONE));
        assert_eq!(RawKey::parse("ctrl+"), None);
        assert_eq!(RawKey::parse("hyper+x"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(RawKey::CTRL_G.to_string(), "Ctrl+G");
        assert_eq!(RawKey::from('z').to_string(), "z");
        assert_eq!(RawKey::KEY_BACKSPACE.to_string(), "Backspace");
    }

    #[test]
    fn test_closure_override() {
        // Tab counts as submit, everything else untouched
        let classifier = KeyClassifier::with_override(|raw: RawKey| {
            (raw == RawKey::TAB).then_some(RawKey::SPACE)
        });
        assert_eq!(classifier.classify(RawKey::TAB), EditCommand::Submit);
        assert_eq!(classifier.classify(RawKey::from('a')), EditCommand::InsertChar('a'));
    }

    #[test]
    fn test_override_to_none_is_ignored() {
        let mut remap = KeyRemap::new();
        remap.insert(RawKey::SPACE, RawKey::NONE);
        let classifier = KeyClassifier::with_override(remap);
        assert_eq!(classifier.classify(RawKey::SPACE), EditCommand::Ignore);
    }

    #[test]
    fn test_unrecognized_override_is_ignored() {
        let classifier = KeyClassifier::with_override(|_: RawKey| Some(RawKey(0x1f)));
        assert_eq!(classifier.classify(RawKey::from('a')), EditCommand::Ignore);
    }

    #[test]
    fn test_from_config_skips_bad_entries() {
        let mut config = KeyboardConfig::default();
        config.remap.insert("tab".to_string(), "space".to_string());
        config.remap.insert("hyper+q".to_string(), "space".to_string());

        let remap = KeyRemap::from_config(&config);
        assert_eq!(remap.len(), 1);

        let classifier = KeyClassifier::from_config(&config);
        assert!(classifier.has_override());
        assert_eq!(classifier.classify(RawKey::TAB), EditCommand::Submit);
    }

    #[test]
    fn test_empty_config_has_no_override() {
        let classifier = KeyClassifier::from_config(&KeyboardConfig::default());
        assert!(!classifier.has_override());
    }
}
