//! Letter scrambling
//!
//! Scrambling repeatedly shuffles a word's characters until the arrangement
//! differs from the original. The number of shuffles is bounded so that a
//! bad vocabulary entry surfaces as an error instead of a hang.

use super::Word;
use crate::error::GameError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum shuffles attempted before a word is declared unscrambleable
pub const MAX_SCRAMBLE_ATTEMPTS: usize = 100;

/// A permutation of a word's letters, never equal to the word itself
///
/// Carries a presentation hint: scrambles are nonsense strings, so renderers
/// should present them letter by letter rather than as a pronounceable word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrambledWord {
    text: String,
    verbatim: bool,
}

impl ScrambledWord {
    /// Wrap an already-scrambled string with the verbatim hint set
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            verbatim: true,
        }
    }

    /// The scrambled letters
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether renderers should present the letters one by one
    #[inline]
    #[must_use]
    pub const fn is_verbatim(&self) -> bool {
        self.verbatim
    }

    /// Check the scramble invariants against its source word
    ///
    /// Same character multiset, different string (case-sensitive).
    #[must_use]
    pub fn is_valid_for(&self, word: &Word) -> bool {
        self.text != word.text() && super::word::char_counts(&self.text) == word.char_counts()
    }
}

impl fmt::Display for ScrambledWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Produces scrambles for vocabulary words
pub trait Scramble {
    /// Scramble `word` into a differing permutation of its letters
    ///
    /// # Errors
    /// Returns `GameError::Unscrambleable` when no differing arrangement
    /// was produced within the attempt bound.
    fn scramble(&mut self, word: &Word) -> Result<ScrambledWord, GameError>;
}

/// Uniform random scrambler
pub struct RandomScrambler<R = StdRng> {
    rng: R,
    max_attempts: usize,
}

impl RandomScrambler<StdRng> {
    /// Create a scrambler seeded from the operating system
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a reproducible scrambler
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomScrambler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: rand::Rng> RandomScrambler<R> {
    pub const fn with_rng(rng: R) -> Self {
        Self {
            rng,
            max_attempts: MAX_SCRAMBLE_ATTEMPTS,
        }
    }

    /// Override the attempt bound
    #[must_use]
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

impl<R: rand::Rng> Scramble for RandomScrambler<R> {
    fn scramble(&mut self, word: &Word) -> Result<ScrambledWord, GameError> {
        let mut letters: Vec<char> = word.text().chars().collect();

        for _ in 0..self.max_attempts {
            letters.shuffle(&mut self.rng);
            let candidate: String = letters.iter().collect();
            if candidate != word.text() {
                return Ok(ScrambledWord::new(candidate));
            }
        }

        Err(GameError::Unscrambleable {
            word: word.clone(),
            attempts: self.max_attempts,
        })
    }
}
