//! Session configuration

use serde::{Deserialize, Serialize};

/// Total words offered per session
pub const MAX_ROUNDS: u32 = 10;

/// Points awarded per correct guess
pub const SCORE_INCREASE: u32 = 20;

/// Tunable session constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Words drawn per session before it completes
    pub max_rounds: u32,
    /// Points per correct guess
    pub score_increase: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            score_increase: SCORE_INCREASE,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub const fn new(max_rounds: u32, score_increase: u32) -> Self {
        Self {
            max_rounds,
            score_increase,
        }
    }

    /// Best score a single session can reach
    #[must_use]
    pub const fn max_score(&self) -> u32 {
        self.max_rounds.saturating_mul(self.score_increase)
    }
}
