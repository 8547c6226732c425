//! Vocabulary word representation
//!
//! A Word is an immutable, validated entry from the fixed vocabulary.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A vocabulary word
///
/// Equality and hashing are case-sensitive: `"Kotlin"` and `"kotlin"` are
/// distinct entries for session bookkeeping. Guess evaluation goes through
/// [`Word::matches_guess`], which ignores case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word {
    text: String,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must not be empty")]
    Empty,
    #[error("word '{0}' contains non-alphabetic characters")]
    InvalidCharacters(String),
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Surrounding whitespace is trimmed; case is preserved.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - The trimmed text is empty
    /// - Any character is not alphabetic
    ///
    /// # Examples
    /// ```
    /// use unscramble::core::Word;
    ///
    /// let word = Word::new("kotlin").unwrap();
    /// assert_eq!(word.text(), "kotlin");
    ///
    /// assert!(Word::new("").is_err());
    /// assert!(Word::new("x-ray").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into();
        let text = text.trim();

        if text.is_empty() {
            return Err(WordError::Empty);
        }

        if !text.chars().all(char::is_alphabetic) {
            return Err(WordError::InvalidCharacters(text.to_string()));
        }

        Ok(Self {
            text: text.to_string(),
        })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters (not bytes)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Always false; empty words are rejected on construction
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check a player's guess against this word, ignoring case
    ///
    /// # Examples
    /// ```
    /// use unscramble::core::Word;
    ///
    /// let word = Word::new("apple").unwrap();
    /// assert!(word.matches_guess("Apple"));
    /// assert!(word.matches_guess("APPLE"));
    /// assert!(!word.matches_guess("appel"));
    /// ```
    #[must_use]
    pub fn matches_guess(&self, guess: &str) -> bool {
        // Fast path for ASCII, full Unicode folding otherwise
        if self.text.is_ascii() && guess.is_ascii() {
            return self.text.eq_ignore_ascii_case(guess);
        }
        self.text.to_lowercase() == guess.to_lowercase()
    }

    /// Whether some arrangement of the letters differs from the word itself
    ///
    /// False for single-letter words and words made of one repeated letter.
    #[must_use]
    pub fn is_scrambleable(&self) -> bool {
        let mut chars = self.text.chars();
        match chars.next() {
            Some(first) => chars.any(|c| c != first),
            None => false,
        }
    }

    /// Get the count of each character in the word
    ///
    /// Used to check that a scramble is a permutation of its source.
    pub(crate) fn char_counts(&self) -> FxHashMap<char, usize> {
        char_counts(&self.text)
    }
}

pub(crate) fn char_counts(text: &str) -> FxHashMap<char, usize> {
    let mut counts = FxHashMap::default();
    for ch in text.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.text
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_creation_valid() {
        let word = Word::new("android").unwrap();
        assert_eq!(word.text(), "android");
        assert_eq!(word.len(), 7);
    }

    #[test]
    fn word_creation_preserves_case() {
        let word = Word::new("Kotlin").unwrap();
        assert_eq!(word.text(), "Kotlin");
    }

    #[test]
    fn word_creation_trims_whitespace() {
        let word = Word::new("  maze\n").unwrap();
        assert_eq!(word.text(), "maze");
    }

    #[test]
    fn word_creation_empty() {
        assert_eq!(Word::new(""), Err(WordError::Empty));
        assert_eq!(Word::new("   "), Err(WordError::Empty));
    }

    #[test]
    fn word_creation_invalid_characters() {
        assert!(Word::new("x-ray").is_err()); // Hyphen
        assert!(Word::new("two words").is_err()); // Space
        assert!(Word::new("r2d2").is_err()); // Digits
    }

    #[test]
    fn word_creation_unicode_letters() {
        let word = Word::new("café").unwrap();
        assert_eq!(word.len(), 4);
    }

    #[test]
    fn word_equality_is_case_sensitive() {
        let lower = Word::new("kotlin").unwrap();
        let upper = Word::new("KOTLIN").unwrap();
        assert_ne!(lower, upper);
        assert_eq!(lower, Word::new("kotlin").unwrap());
    }

    #[test]
    fn matches_guess_ignores_case() {
        let word = Word::new("apple").unwrap();
        assert!(word.matches_guess("apple"));
        assert!(word.matches_guess("Apple"));
        assert!(word.matches_guess("aPPLE"));
        assert!(!word.matches_guess("apples"));
        assert!(!word.matches_guess(""));
    }

    #[test]
    fn matches_guess_unicode() {
        let word = Word::new("Ärger").unwrap();
        assert!(word.matches_guess("ärger"));
        assert!(word.matches_guess("ÄRGER"));
    }

    #[test]
    fn scrambleable_words() {
        assert!(Word::new("ab").unwrap().is_scrambleable());
        assert!(Word::new("yoyo").unwrap().is_scrambleable());
        assert!(Word::new("Aa").unwrap().is_scrambleable());
    }

    #[test]
    fn unscrambleable_words() {
        assert!(!Word::new("a").unwrap().is_scrambleable());
        assert!(!Word::new("aaaa").unwrap().is_scrambleable());
    }

    #[test]
    fn word_char_counts() {
        let word = Word::new("eerie").unwrap();
        let counts = word.char_counts();
        assert_eq!(counts.get(&'e'), Some(&3));
        assert_eq!(counts.get(&'r'), Some(&1));
        assert_eq!(counts.get(&'i'), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn word_display() {
        let word = Word::new("zigzag").unwrap();
        assert_eq!(format!("{word}"), "zigzag");
    }

    #[test]
    fn word_serde_validates() {
        let word: Word = serde_json::from_str("\"kotlin\"").unwrap();
        assert_eq!(word.text(), "kotlin");
        assert_eq!(serde_json::to_string(&word).unwrap(), "\"kotlin\"");

        assert!(serde_json::from_str::<Word>("\"\"").is_err());
        assert!(serde_json::from_str::<Word>("\"x-ray\"").is_err());
    }
}
