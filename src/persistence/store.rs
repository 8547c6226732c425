//! Single-writer high score store

use super::{RecordTicket, ScoreBackend, ScorePersistence};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

/// Attempts per write before the candidate is dropped
pub const WRITE_ATTEMPTS: u32 = 3;

/// Delay before the first retry; grows linearly with each attempt
pub const RETRY_BACKOFF: Duration = Duration::from_millis(50);

struct RecordRequest {
    candidate: u32,
    done: oneshot::Sender<u32>,
}

/// Handle to the high score writer task
///
/// Cheap to clone. The writer task runs until every handle is dropped,
/// finishing queued writes first.
#[derive(Clone)]
pub struct HighScoreStore {
    requests: mpsc::UnboundedSender<RecordRequest>,
    high_score: watch::Receiver<u32>,
}

impl HighScoreStore {
    /// Load the durable value and start the writer task
    ///
    /// An unreadable store is treated as holding 0.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub async fn open<B: ScoreBackend>(mut backend: B) -> Self {
        let initial = match backend.load().await {
            Ok(value) => value.unwrap_or(0),
            Err(err) => {
                warn!(error = %err, "high score unreadable, starting from 0");
                0
            }
        };
        debug!(high_score = initial, "high score loaded");

        let (publisher, high_score) = watch::channel(initial);
        let (requests, queue) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(backend, initial, queue, publisher));

        Self {
            requests,
            high_score,
        }
    }

    /// Last durable value
    #[must_use]
    pub fn current(&self) -> u32 {
        *self.high_score.borrow()
    }

    /// Wait until every previously queued candidate has been processed
    pub async fn flush(&self) -> u32 {
        // 0 never beats the stored value, so this only marks a queue position
        match self.record_score_if_higher(0).settled().await {
            Some(value) => value,
            None => self.current(),
        }
    }
}

impl ScorePersistence for HighScoreStore {
    fn observe_high_score(&self) -> watch::Receiver<u32> {
        self.high_score.clone()
    }

    fn record_score_if_higher(&self, candidate: u32) -> RecordTicket {
        let (done, rx) = oneshot::channel();
        if self
            .requests
            .send(RecordRequest { candidate, done })
            .is_err()
        {
            warn!(candidate, "high score writer stopped, candidate dropped");
        }
        RecordTicket::new(rx)
    }
}

async fn run_writer<B: ScoreBackend>(
    mut backend: B,
    mut durable: u32,
    mut queue: mpsc::UnboundedReceiver<RecordRequest>,
    publisher: watch::Sender<u32>,
) {
    while let Some(RecordRequest { candidate, done }) = queue.recv().await {
        // Another store may share the backend
        match backend.load().await {
            Ok(Some(stored)) if stored > durable => {
                debug!(previous = durable, high_score = stored, "high score raised elsewhere");
                durable = stored;
                publisher.send_replace(durable);
            }
            Ok(_) => {}
            Err(err) => warn!(error = %err, "high score unreadable, comparing with last known value"),
        }

        if candidate > durable && save_with_retry(&mut backend, candidate).await {
            info!(previous = durable, high_score = candidate, "new high score");
            durable = candidate;
            publisher.send_replace(durable);
        }
        // The caller may have dropped its ticket
        let _ = done.send(durable);
    }
    debug!("high score writer stopped");
}

async fn save_with_retry<B: ScoreBackend>(backend: &mut B, candidate: u32) -> bool {
    for attempt in 1..=WRITE_ATTEMPTS {
        match backend.save(candidate).await {
            Ok(()) => return true,
            Err(err) if attempt < WRITE_ATTEMPTS => {
                warn!(error = %err, attempt, candidate, "high score write failed, retrying");
                tokio::time::sleep(RETRY_BACKOFF * attempt).await;
            }
            Err(err) => {
                warn!(error = %err, candidate, "high score write failed, dropping candidate");
            }
        }
    }
    false
}
