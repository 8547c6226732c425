//! Session state value object
//!
//! `SessionState` is everything a collaborator needs to save and restore a
//! session across restarts.

use crate::core::{ScrambledWord, Word};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No word drawn yet
    #[default]
    Idle,
    /// A scramble is live and accepts guesses
    InRound,
    /// All rounds played; no further words offered
    Complete,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::InRound => "in round",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub phase: Phase,
    pub score: u32,
    pub round_count: u32,
    pub current_word: Option<Word>,
    pub current_scramble: Option<ScrambledWord>,
    /// Words drawn this session, in selection order
    pub history: Vec<Word>,
}

impl SessionState {
    /// Check internal consistency against a round limit
    ///
    /// # Errors
    /// Returns a description of the first violated invariant.
    pub fn validate(&self, max_rounds: u32) -> Result<(), String> {
        if self.round_count as usize != self.history.len() {
            return Err(format!(
                "round count {} does not match {} drawn words",
                self.round_count,
                self.history.len()
            ));
        }
        if self.round_count > max_rounds {
            return Err(format!(
                "round count {} exceeds the limit of {max_rounds}",
                self.round_count
            ));
        }

        let mut seen = FxHashSet::default();
        if let Some(repeat) = self.history.iter().find(|word| !seen.insert(*word)) {
            return Err(format!("word '{repeat}' drawn twice"));
        }

        match (self.phase, &self.current_word, &self.current_scramble) {
            (Phase::Idle, None, None) if self.round_count == 0 && self.score == 0 => Ok(()),
            (Phase::Idle, ..) => Err("idle session carries round data".to_string()),
            (Phase::InRound, Some(word), Some(scramble)) => {
                if self.history.last() != Some(word) {
                    return Err(format!("current word '{word}' is not the last drawn"));
                }
                if !scramble.is_valid_for(word) {
                    return Err(format!("'{scramble}' is not a scramble of '{word}'"));
                }
                Ok(())
            }
            (Phase::InRound, ..) => Err("in-round session has no current word".to_string()),
            // Complete sessions keep the last word on display (or none when
            // zero rounds were configured)
            (Phase::Complete, ..) if self.round_count != max_rounds => Err(format!(
                "complete session played {} of {max_rounds} rounds",
                self.round_count
            )),
            (Phase::Complete, word, scramble) => match (word, scramble) {
                (Some(word), Some(scramble))
                    if self.history.last() == Some(word) && scramble.is_valid_for(word) =>
                {
                    Ok(())
                }
                (None, None) if self.round_count == 0 => Ok(()),
                _ => Err("complete session has an inconsistent final word".to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn in_round() -> SessionState {
        SessionState {
            phase: Phase::InRound,
            score: 20,
            round_count: 2,
            current_word: Some(word("kotlin")),
            current_scramble: Some(ScrambledWord::new("niltok")),
            history: vec![word("android"), word("kotlin")],
        }
    }

    #[test]
    fn default_state_is_valid_idle() {
        assert_eq!(SessionState::default().validate(10), Ok(()));
    }

    #[test]
    fn in_round_state_is_valid() {
        assert_eq!(in_round().validate(2), Ok(()));
    }

    #[test]
    fn round_count_must_match_history() {
        let mut state = in_round();
        state.round_count = 3;
        assert!(state.validate(10).is_err());
    }

    #[test]
    fn round_count_bounded_by_limit() {
        assert!(in_round().validate(1).is_err());
    }

    #[test]
    fn repeated_history_rejected() {
        let mut state = in_round();
        state.history = vec![word("kotlin"), word("kotlin")];
        assert!(state.validate(10).unwrap_err().contains("drawn twice"));
    }

    #[test]
    fn bad_scramble_rejected() {
        let mut state = in_round();
        state.current_scramble = Some(ScrambledWord::new("kotlin"));
        assert!(state.validate(10).is_err());
    }

    #[test]
    fn idle_with_score_rejected() {
        let state = SessionState {
            score: 20,
            ..SessionState::default()
        };
        assert!(state.validate(10).is_err());
    }

    #[test]
    fn complete_keeps_last_word() {
        let mut state = in_round();
        state.phase = Phase::Complete;
        assert_eq!(state.validate(2), Ok(()));
    }

    #[test]
    fn complete_before_last_round_rejected() {
        let mut state = in_round();
        state.phase = Phase::Complete;
        assert!(state.validate(10).unwrap_err().contains("2 of 10"));
    }

    #[test]
    fn complete_with_undrawn_word_rejected() {
        let state = SessionState {
            phase: Phase::Complete,
            score: 0,
            round_count: 1,
            current_word: Some(word("kotlin")),
            current_scramble: Some(ScrambledWord::new("niltok")),
            history: vec![word("android")],
        };
        assert!(state.validate(1).is_err());
    }

    #[test]
    fn complete_without_rounds_needs_zero_limit() {
        let state = SessionState {
            phase: Phase::Complete,
            ..SessionState::default()
        };
        assert_eq!(state.validate(0), Ok(()));
        assert!(state.validate(10).is_err());
    }

    #[test]
    fn phase_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Phase::InRound).unwrap(),
            "\"in_round\""
        );
    }

    #[test]
    fn state_survives_json() {
        let state = in_round();
        let json = serde_json::to_string(&state).unwrap();
        let restored: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
