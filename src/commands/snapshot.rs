//! Session snapshots across restarts
//!
//! An unfinished session is written next to the high score store on exit
//! and picked up again on the next `--resume` start.

use crate::core::Scramble;
use crate::game::{GameSession, Phase, SessionState};
use crate::persistence::ScorePersistence;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the saved session, beside the high score document
pub const SNAPSHOT_FILE: &str = "session.json";

/// Snapshot location for a given high score store path
#[must_use]
pub fn snapshot_path_for(store_path: &Path) -> PathBuf {
    store_path.with_file_name(SNAPSHOT_FILE)
}

/// Read a saved session, `None` if there is none
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_snapshot(path: &Path) -> Result<Option<SessionState>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("reading {}", path.display()));
        }
    };

    let state = serde_json::from_str(&content)
        .with_context(|| format!("parsing session snapshot {}", path.display()))?;
    Ok(Some(state))
}

/// Write a session snapshot
///
/// The document is written to a sibling `.tmp` file first and renamed over
/// `path`, so an interrupted save keeps the previous snapshot.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_snapshot(path: &Path, state: &SessionState) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;

    let mut temp = path.as_os_str().to_os_string();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);
    fs::write(&temp, json).with_context(|| format!("writing {}", temp.display()))?;
    fs::rename(&temp, path).with_context(|| format!("replacing {}", path.display()))
}

/// Restore the saved session into `session` if a usable one exists
///
/// Unreadable or inconsistent snapshots are discarded with a warning.
/// Returns whether a session was restored.
pub fn resume_session<P, S, R>(session: &mut GameSession<P, S, R>, path: &Path) -> bool
where
    P: ScorePersistence,
    S: Scramble,
    R: rand::Rng,
{
    let state = match load_snapshot(path) {
        Ok(Some(state)) => state,
        Ok(None) => return false,
        Err(err) => {
            warn!(error = %err, "discarding unreadable session snapshot");
            return false;
        }
    };

    match session.restore_state(state) {
        Ok(()) => {
            debug!(path = %path.display(), "session resumed");
            true
        }
        Err(err) => {
            warn!(error = %err, "discarding session snapshot");
            false
        }
    }
}

/// Save an unfinished session, or remove a stale snapshot for a finished one
///
/// # Errors
///
/// Returns an error if the snapshot cannot be written or removed.
pub fn persist_session<P, S, R>(session: &GameSession<P, S, R>, path: &Path) -> Result<()>
where
    P: ScorePersistence,
    S: Scramble,
    R: rand::Rng,
{
    if session.phase() == Phase::InRound {
        return save_snapshot(path, &session.export_state());
    }

    match fs::remove_file(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            Err(err).with_context(|| format!("removing {}", path.display()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RandomScrambler;
    use crate::game::{GameConfig, WordBank};
    use crate::persistence::{HighScoreStore, MemoryBackend};
    use crate::wordlists::loader::words_from_slice;

    async fn session(seed: u64) -> GameSession<HighScoreStore> {
        let store = HighScoreStore::open(MemoryBackend::default()).await;
        GameSession::new(
            GameConfig::new(3, 20),
            WordBank::seeded(words_from_slice(&["android", "kotlin", "rust"]), seed).unwrap(),
            RandomScrambler::seeded(seed),
            store,
        )
    }

    #[test]
    fn snapshot_sits_beside_store() {
        let path = snapshot_path_for(Path::new("/data/unscramble/high_score.json"));
        assert_eq!(path, Path::new("/data/unscramble/session.json"));
    }

    #[test]
    fn missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_snapshot(&dir.path().join(SNAPSHOT_FILE)).unwrap().is_none());
    }

    #[tokio::test]
    async fn unfinished_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE);

        let mut first = session(1).await;
        first.start().unwrap();
        let word = first.current_word().unwrap().text().to_string();
        first.submit_guess(&word).unwrap();
        persist_session(&first, &path).unwrap();

        let mut second = session(2).await;
        assert!(resume_session(&mut second, &path));
        assert_eq!(second.export_state(), first.export_state());
    }

    #[tokio::test]
    async fn save_replaces_previous_snapshot_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE);
        fs::write(&path, "stale").unwrap();

        let mut session = session(3).await;
        session.start().unwrap();
        save_snapshot(&path, &session.export_state()).unwrap();

        assert_eq!(load_snapshot(&path).unwrap(), Some(session.export_state()));
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn finished_session_removes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE);
        fs::write(&path, "{}").unwrap();

        let mut finished = session(1).await;
        finished.start().unwrap();
        while finished.advance().unwrap() {}
        persist_session(&finished, &path).unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SNAPSHOT_FILE);
        fs::write(&path, "not json").unwrap();

        let mut session = session(1).await;
        assert!(!resume_session(&mut session, &path));
        assert_eq!(session.phase(), Phase::Idle);
    }
}
