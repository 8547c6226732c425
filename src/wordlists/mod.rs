//! Word lists for the scramble game
//!
//! Provides the built-in vocabulary compiled into the binary, plus loading
//! from custom files.

mod embedded;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};
