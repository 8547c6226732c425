//! Storage backends for the high score

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Durable storage for one integer
///
/// Only the store's writer task calls these, one at a time.
pub trait ScoreBackend: Send + 'static {
    /// Read the stored value; `None` when nothing has been written yet
    fn load(&mut self) -> impl Future<Output = io::Result<Option<u32>>> + Send;

    /// Replace the stored value
    fn save(&mut self, high_score: u32) -> impl Future<Output = io::Result<()>> + Send;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreDocument {
    #[serde(default)]
    high_score: Option<u32>,
}

/// JSON document on disk: `{"high_score": 50}`
///
/// Writes go to a sibling temporary file that is renamed over the target,
/// so a crash mid-write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the platform data directory
    ///
    /// Returns `None` when the platform has no data directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("unscramble").join("high_score.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreBackend for JsonFileBackend {
    async fn load(&mut self) -> io::Result<Option<u32>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };

        let document: HighScoreDocument = serde_json::from_str(&content)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        Ok(document.high_score)
    }

    async fn save(&mut self, high_score: u32) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let document = HighScoreDocument {
            high_score: Some(high_score),
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await
    }
}

/// In-process storage, for ephemeral sessions and tests
///
/// Clones share the same cell, so a handle kept outside the store can
/// inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    value: Arc<Mutex<Option<u32>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new(initial: Option<u32>) -> Self {
        Self {
            value: Arc::new(Mutex::new(initial)),
        }
    }

    /// The currently stored value
    #[must_use]
    pub fn stored(&self) -> Option<u32> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ScoreBackend for MemoryBackend {
    async fn load(&mut self) -> io::Result<Option<u32>> {
        Ok(self.stored())
    }

    async fn save(&mut self, high_score: u32) -> io::Result<()> {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(high_score);
        Ok(())
    }
}
