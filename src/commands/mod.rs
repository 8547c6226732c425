//! Command implementations

pub mod simple;
pub mod snapshot;

pub use simple::{command_words, play, run_simple};
pub use snapshot::{persist_session, resume_session, snapshot_path_for};
