//! Game session state machine
//!
//! A session moves `Idle → InRound → Complete`. Drawing a word, guessing and
//! resetting all take `&mut self`, so transitions on one session never
//! overlap. Every exposed field is also published on a `watch` channel for
//! presentation layers that prefer to subscribe.

use super::bank::WordBank;
use super::config::GameConfig;
use super::state::{Phase, SessionState};
use crate::core::{RandomScrambler, Scramble, ScrambledWord, Word};
use crate::error::GameError;
use crate::persistence::ScorePersistence;
use rand::rngs::StdRng;
use rustc_hash::FxHashSet;
use tokio::sync::watch;
use tracing::{debug, info};

/// One player's run through a bounded sequence of scrambled words
pub struct GameSession<P, S = RandomScrambler, R = StdRng> {
    config: GameConfig,
    bank: WordBank<R>,
    scrambler: S,
    persistence: P,
    state: SessionState,
    used: FxHashSet<Word>,
    score_tx: watch::Sender<u32>,
    round_tx: watch::Sender<u32>,
    scramble_tx: watch::Sender<Option<ScrambledWord>>,
    phase_tx: watch::Sender<Phase>,
}

impl<P, S, R> GameSession<P, S, R>
where
    P: ScorePersistence,
    S: Scramble,
    R: rand::Rng,
{
    /// Create an idle session; call [`start`](Self::start) to draw the first word
    pub fn new(config: GameConfig, bank: WordBank<R>, scrambler: S, persistence: P) -> Self {
        Self {
            config,
            bank,
            scrambler,
            persistence,
            state: SessionState::default(),
            used: FxHashSet::default(),
            score_tx: watch::channel(0).0,
            round_tx: watch::channel(0).0,
            scramble_tx: watch::channel(None).0,
            phase_tx: watch::channel(Phase::Idle).0,
        }
    }

    /// Reset score and rounds, then draw the first word
    ///
    /// Enters `InRound`, or `Complete` when zero rounds are configured.
    ///
    /// # Errors
    /// Returns the bank or scrambler fault if the first draw fails; the
    /// session is left `Idle`.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.state = SessionState::default();
        self.used.clear();
        debug!(max_rounds = self.config.max_rounds, "session reset");

        let result = if self.config.max_rounds == 0 {
            self.state.phase = Phase::Complete;
            Ok(())
        } else {
            self.draw_next()
        };
        self.publish();
        result
    }

    /// Start over; words from the previous session may come up again
    ///
    /// # Errors
    /// See [`start`](Self::start).
    pub fn reinitialize(&mut self) -> Result<(), GameError> {
        self.start()
    }

    /// Move to the next word
    ///
    /// Returns `false` and enters `Complete` once every round has been
    /// played; the last word stays current in that case.
    ///
    /// # Errors
    /// - `InvalidState` outside `InRound`
    /// - `Exhausted` / `Unscrambleable` if the draw fails; the current
    ///   round is left untouched
    pub fn advance(&mut self) -> Result<bool, GameError> {
        self.require_in_round("advance")?;

        if self.state.round_count >= self.config.max_rounds {
            self.state.phase = Phase::Complete;
            info!(score = self.state.score, "session complete");
            self.publish();
            return Ok(false);
        }

        self.draw_next()?;
        self.publish();
        Ok(true)
    }

    /// Check a guess against the current word, ignoring case
    ///
    /// A correct guess adds `score_increase` and offers the new score as a
    /// high score without waiting for the write. It does not advance.
    ///
    /// # Errors
    /// `InvalidState` outside `InRound`.
    pub fn submit_guess(&mut self, candidate: &str) -> Result<bool, GameError> {
        self.require_in_round("submit a guess")?;

        let correct = self
            .state
            .current_word
            .as_ref()
            .is_some_and(|word| word.matches_guess(candidate));
        if !correct {
            debug!(round = self.state.round_count, "incorrect guess");
            return Ok(false);
        }

        self.state.score = self.state.score.saturating_add(self.config.score_increase);
        debug!(score = self.state.score, "correct guess");
        self.publish();

        // Fire and forget; the store handles its own failures
        let _ = self.persistence.record_score_if_higher(self.state.score);
        Ok(true)
    }

    /// Snapshot the session for saving across restarts
    #[must_use]
    pub fn export_state(&self) -> SessionState {
        self.state.clone()
    }

    /// Replace the session with a saved snapshot
    ///
    /// # Errors
    /// `InvalidSnapshot` if the snapshot is inconsistent or exceeds this
    /// session's round limit. The current state is kept in that case.
    pub fn restore_state(&mut self, state: SessionState) -> Result<(), GameError> {
        state
            .validate(self.config.max_rounds)
            .map_err(GameError::InvalidSnapshot)?;

        self.used = state.history.iter().cloned().collect();
        self.state = state;
        debug!(
            phase = %self.state.phase,
            round = self.state.round_count,
            "session restored"
        );
        self.publish();
        Ok(())
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.state.score
    }

    #[must_use]
    pub const fn round_count(&self) -> u32 {
        self.state.round_count
    }

    #[must_use]
    pub const fn current_word(&self) -> Option<&Word> {
        self.state.current_word.as_ref()
    }

    #[must_use]
    pub const fn current_scramble(&self) -> Option<&ScrambledWord> {
        self.state.current_scramble.as_ref()
    }

    /// Words drawn this session, in selection order
    #[must_use]
    pub fn history(&self) -> &[Word] {
        &self.state.history
    }

    /// Last known durable high score
    #[must_use]
    pub fn high_score(&self) -> u32 {
        *self.persistence.observe_high_score().borrow()
    }

    #[must_use]
    pub fn subscribe_score(&self) -> watch::Receiver<u32> {
        self.score_tx.subscribe()
    }

    #[must_use]
    pub fn subscribe_round_count(&self) -> watch::Receiver<u32> {
        self.round_tx.subscribe()
    }

    #[must_use]
    pub fn subscribe_scramble(&self) -> watch::Receiver<Option<ScrambledWord>> {
        self.scramble_tx.subscribe()
    }

    #[must_use]
    pub fn subscribe_phase(&self) -> watch::Receiver<Phase> {
        self.phase_tx.subscribe()
    }

    /// The persisted high score stream, independent of this session's score
    #[must_use]
    pub fn observe_high_score(&self) -> watch::Receiver<u32> {
        self.persistence.observe_high_score()
    }

    fn require_in_round(&self, operation: &'static str) -> Result<(), GameError> {
        match self.state.phase {
            Phase::InRound => Ok(()),
            phase => Err(GameError::InvalidState { operation, phase }),
        }
    }

    /// Draw, scramble and record the next word as one step
    fn draw_next(&mut self) -> Result<(), GameError> {
        let word = self.bank.pick_unused(&self.used)?;
        let scramble = self.scrambler.scramble(&word)?;

        self.used.insert(word.clone());
        self.state.history.push(word.clone());
        self.state.round_count += 1;
        debug!(round = self.state.round_count, %word, %scramble, "word drawn");

        self.state.current_word = Some(word);
        self.state.current_scramble = Some(scramble);
        self.state.phase = Phase::InRound;
        Ok(())
    }

    fn publish(&self) {
        publish(&self.score_tx, self.state.score);
        publish(&self.round_tx, self.state.round_count);
        publish(&self.scramble_tx, self.state.current_scramble.clone());
        publish(&self.phase_tx, self.state.phase);
    }
}

/// Notify subscribers only when the value actually changed
fn publish<T: PartialEq>(tx: &watch::Sender<T>, value: T) {
    tx.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}
