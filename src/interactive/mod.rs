//! Interactive TUI game
//!
//! A ratatui front end that subscribes to a session's observable state and
//! forwards guesses and skips back into it.

mod app;
mod rendering;

pub use app::{App, Message, MessageStyle, run_tui};
