//! Random, non-repeating word selection

use crate::core::Word;
use crate::error::GameError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;

/// The fixed vocabulary a session draws from
pub struct WordBank<R = StdRng> {
    words: Vec<Word>,
    rng: R,
}

impl WordBank<StdRng> {
    /// Create a bank seeded from the operating system
    ///
    /// # Errors
    /// Returns `GameError::EmptyVocabulary` if `words` is empty.
    pub fn new(words: impl IntoIterator<Item = Word>) -> Result<Self, GameError> {
        Self::with_rng(words, StdRng::from_os_rng())
    }

    /// Create a reproducible bank
    ///
    /// # Errors
    /// Returns `GameError::EmptyVocabulary` if `words` is empty.
    pub fn seeded(words: impl IntoIterator<Item = Word>, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(words, StdRng::seed_from_u64(seed))
    }
}

impl<R: rand::Rng> WordBank<R> {
    /// Create a bank with an explicit RNG
    ///
    /// Duplicate entries are dropped (case-sensitive), keeping first-seen order.
    ///
    /// # Errors
    /// Returns `GameError::EmptyVocabulary` if `words` is empty.
    pub fn with_rng(words: impl IntoIterator<Item = Word>, rng: R) -> Result<Self, GameError> {
        let mut seen = FxHashSet::default();
        let words: Vec<Word> = words
            .into_iter()
            .filter(|word| seen.insert(word.clone()))
            .collect();

        if words.is_empty() {
            return Err(GameError::EmptyVocabulary);
        }

        Ok(Self { words, rng })
    }

    /// Number of distinct words in the vocabulary
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; empty banks are rejected on construction
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The vocabulary in first-seen order
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Draw a word uniformly at random from the vocabulary minus `excluding`
    ///
    /// # Errors
    /// Returns `GameError::Exhausted` when every word is excluded.
    pub fn pick_unused(&mut self, excluding: &FxHashSet<Word>) -> Result<Word, GameError> {
        let available: Vec<&Word> = self
            .words
            .iter()
            .filter(|word| !excluding.contains(*word))
            .collect();

        available
            .choose(&mut self.rng)
            .map(|&word| word.clone())
            .ok_or(GameError::Exhausted {
                used: excluding.len(),
                vocabulary: self.words.len(),
            })
    }
}
