//! The sliding window of word rows.
//!
//! ## Learning: Structural Invariants
//!
//! The window always holds exactly three rows. Instead of a bounded queue
//! whose length could drift, it is three named fields, and the only way to
//! change them is `advance()`:
//!
//! ```text
//!   before:  previous=A  current=B  next=C
//!   advance
//!   after:   previous=B  current=C  next=D (freshly sampled)
//! ```

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

use crate::lexicon::Lexicon;
use crate::{CoreError, CoreResult};

/// A fixed-width row of words with a unique identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRow {
    id: u64,
    words: Vec<String>,
}

impl WordRow {
    /// Serial number, unique within one `WordRows`.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl std::fmt::Display for WordRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.words.join(" "))
    }
}

/// Previous, current and next rows sampled from a lexicon.
///
/// The previous row starts out blank (`width` empty strings) and is only
/// kept for display.
#[derive(Debug)]
pub struct WordRows<R = SmallRng> {
    lexicon: Lexicon,
    width: usize,
    rng: R,
    next_id: u64,
    previous: WordRow,
    current: WordRow,
    next: WordRow,
}

impl WordRows<SmallRng> {
    /// Creates a window seeded from OS entropy.
    pub fn new(lexicon: Lexicon, width: usize) -> CoreResult<Self> {
        Self::with_rng(lexicon, width, SmallRng::from_entropy())
    }

    /// Creates a reproducible window from a seed.
    pub fn seeded(lexicon: Lexicon, width: usize, seed: u64) -> CoreResult<Self> {
        Self::with_rng(lexicon, width, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> WordRows<R> {
    /// Creates a window drawing words from `rng`.
    pub fn with_rng(lexicon: Lexicon, width: usize, rng: R) -> CoreResult<Self> {
        if width == 0 {
            return Err(CoreError::InvalidRowWidth(width));
        }

        let previous = WordRow {
            id: 0,
            words: vec![String::new(); width],
        };
        let mut rows = Self {
            lexicon,
            width,
            rng,
            next_id: 1,
            previous,
            current: WordRow {
                id: 0,
                words: Vec::new(),
            },
            next: WordRow {
                id: 0,
                words: Vec::new(),
            },
        };
        rows.current = rows.sample_row();
        rows.next = rows.sample_row();
        Ok(rows)
    }

    pub fn previous_row(&self) -> &WordRow {
        &self.previous
    }

    pub fn current_row(&self) -> &WordRow {
        &self.current
    }

    pub fn next_row(&self) -> &WordRow {
        &self.next
    }

    /// Words per row.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Shifts the window by one row and samples a new next row.
    pub fn advance(&mut self) {
        let fresh = self.sample_row();
        let next = std::mem::replace(&mut self.next, fresh);
        let current = std::mem::replace(&mut self.current, next);
        self.previous = current;
        tracing::debug!(
            "Advanced to row {} (next row {})",
            self.current.id,
            self.next.id
        );
    }

    /// Draws `width` words uniformly with replacement.
    fn sample_row(&mut self) -> WordRow {
        let words = (0..self.width)
            .filter_map(|_| self.lexicon.words().choose(&mut self.rng).cloned())
            .collect();
        let id = self.next_id;
        self.next_id += 1;
        WordRow { id, words }
    }
}

impl<R> std::fmt::Display for WordRows<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}\n{}", self.previous, self.current, self.next)
    }
}
