//! Durable all-time high score
//!
//! The session reports scores through [`ScorePersistence`] and never waits
//! for the write. [`HighScoreStore`] is the implementation used by the
//! binary: a single writer task owns a [`ScoreBackend`] and performs every
//! read-compare-write in order, so racing candidates converge to their
//! maximum.

mod backend;
mod store;

pub use backend::{JsonFileBackend, MemoryBackend, ScoreBackend};
pub use store::{HighScoreStore, RETRY_BACKOFF, WRITE_ATTEMPTS};

use tokio::sync::{oneshot, watch};

/// High score persistence as seen by a game session
pub trait ScorePersistence {
    /// Subscribe to the durable high score
    ///
    /// Starts at the last durable value and changes on every successful write.
    fn observe_high_score(&self) -> watch::Receiver<u32>;

    /// Offer `candidate` as a new high score
    ///
    /// Returns immediately. The value is written only if it exceeds the
    /// stored one. I/O failures are handled by the implementation.
    fn record_score_if_higher(&self, candidate: u32) -> RecordTicket;
}

/// Completion handle for a [`ScorePersistence::record_score_if_higher`] call
///
/// Dropping the ticket does not cancel the write.
#[must_use = "await `settled` to observe the write, or drop the ticket to fire and forget"]
pub struct RecordTicket {
    rx: oneshot::Receiver<u32>,
}

impl RecordTicket {
    pub(crate) const fn new(rx: oneshot::Receiver<u32>) -> Self {
        Self { rx }
    }

    /// Wait until the candidate has been processed
    ///
    /// Returns the durable high score after processing, or `None` if the
    /// store shut down before handling the request.
    pub async fn settled(self) -> Option<u32> {
        self.rx.await.ok()
    }
}
