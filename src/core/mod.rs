//! Core domain types for the scramble game
//!
//! Vocabulary words and their scrambles. Nothing here knows about sessions,
//! scores or persistence.

mod scramble;
mod word;

pub use scramble::{MAX_SCRAMBLE_ATTEMPTS, RandomScrambler, Scramble, ScrambledWord};
pub use word::{Word, WordError};
