//! Unscramble
//!
//! A single-player word-scramble game: unscramble the word, score points,
//! and chase an all-time high score that persists between sessions.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use unscramble::core::RandomScrambler;
//! use unscramble::game::{GameConfig, GameSession, WordBank};
//! use unscramble::persistence::{HighScoreStore, MemoryBackend};
//! use unscramble::wordlists::{WORDS, loader::words_from_slice};
//!
//! # async fn demo() -> Result<(), unscramble::GameError> {
//! let store = HighScoreStore::open(MemoryBackend::default()).await;
//! let bank = WordBank::new(words_from_slice(WORDS))?;
//! let mut session = GameSession::new(GameConfig::default(), bank, RandomScrambler::new(), store);
//!
//! session.start()?;
//! println!("Unscramble: {}", session.current_scramble().unwrap());
//! if session.submit_guess("android")? {
//!     session.advance()?;
//! }
//! # Ok(())
//! # }
//! ```

// Core domain types
pub mod core;

// Error taxonomy
pub mod error;

// Session state machine
pub mod game;

// High score persistence
pub mod persistence;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

pub use error::GameError;
