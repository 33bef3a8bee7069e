//! Word lists.

use std::path::Path;
use std::sync::Arc;

use crate::{CoreError, CoreResult};

/// An immutable, non-empty list of words.
///
/// Cloning is cheap: all clones share one allocation, so the same lexicon
/// can back several sessions without copying or locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    words: Arc<[String]>,
}

impl Lexicon {
    /// Loads a newline-delimited word list.
    ///
    /// Lines are trimmed and blank lines skipped.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::LexiconLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let lexicon = Self::from_words(content.lines()).map_err(|e| match e {
            CoreError::EmptyLexicon(_) => CoreError::EmptyLexicon(path.display().to_string()),
            other => other,
        })?;
        tracing::info!("Loaded {} words from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Builds a lexicon from an in-memory sequence, keeping its order.
    pub fn from_words<I, S>(words: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Err(CoreError::EmptyLexicon("in-memory word list".to_string()));
        }
        Ok(Self {
            words: words.into(),
        })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}
