//! Game error taxonomy

use crate::core::{Word, WordError};
use crate::game::Phase;
use thiserror::Error;

/// Faults surfaced by the word bank, the scrambler and the session
///
/// Persistence failures never appear here; the high score store recovers
/// from them on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Every word in the vocabulary has already been drawn this session
    #[error("vocabulary exhausted: all {vocabulary} words used ({used} excluded)")]
    Exhausted { used: usize, vocabulary: usize },

    /// No differing arrangement was found within the attempt bound
    #[error("word '{word}' could not be scrambled after {attempts} attempts")]
    Unscrambleable { word: Word, attempts: usize },

    /// A transition was requested in a phase that does not allow it
    #[error("cannot {operation} while the session is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },

    /// A word bank was built from an empty vocabulary
    #[error("vocabulary is empty")]
    EmptyVocabulary,

    /// A session snapshot failed validation on restore
    #[error("invalid session snapshot: {0}")]
    InvalidSnapshot(String),

    #[error(transparent)]
    Word(#[from] WordError),
}
