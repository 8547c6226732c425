//! Game session logic
//!
//! - `bank`: non-repeating random word selection
//! - `session`: the round/score state machine
//! - `state`: serializable session snapshot
//! - `config`: round and scoring constants

mod bank;
mod config;
mod session;
mod state;

pub use bank::WordBank;
pub use config::{GameConfig, MAX_ROUNDS, SCORE_INCREASE};
pub use session::GameSession;
pub use state::{Phase, SessionState};
