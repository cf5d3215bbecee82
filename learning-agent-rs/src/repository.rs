// learning-agent-rs/src/repository.rs
// Persistence layer for the append-only feedback log.
//
// Implementation notes:
// - Append-only NDJSON file on disk (one FeedbackRecord per line).
// - Simple filtering by category.
// - Retention and compaction strategies can be added later if needed.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::model::FeedbackRecord;

/// Repository error type.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable feedback store contract: append one record, list all records,
/// optionally filtered by category.
#[async_trait]
pub trait FeedbackRepository {
    async fn append(&self, record: &FeedbackRecord) -> Result<(), RepositoryError>;

    async fn load_all(&self) -> Result<Vec<FeedbackRecord>, RepositoryError>;

    async fn load_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<FeedbackRecord>, RepositoryError>;
}

/// Simple file-backed repository that stores records as NDJSON:
/// one serialized FeedbackRecord per line.
///
/// This is intentionally append-only and suitable for a single-operator,
/// single-process deployment. A more advanced backend (e.g. SQLite)
/// can be wired behind the same trait later.
pub struct FileBackedRepository {
    path: PathBuf,
}

impl FileBackedRepository {
    /// Create a repository at an explicit path (see
    /// `LearningConfig::store_path` for how the path is configured).
    ///
    /// Eagerly validates that the parent directory is writable by
    /// creating it, so callers fail fast at startup when the configured
    /// storage path is unusable.
    pub fn new(path: PathBuf) -> Result<Self, RepositoryError> {
        if let Some(parent) = path.parent() {
            // Blocking std::fs here since this is a one-time startup check.
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path().parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<FeedbackRecord>, RepositoryError> {
        if !self.path().exists() {
            return Ok(Vec::new());
        }

        let mut file = fs::File::open(self.path()).await?;
        let mut buf = String::new();
        file.read_to_string(&mut buf).await?;

        let mut out = Vec::new();
        for line in buf.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<FeedbackRecord>(line) {
                Ok(rec) => out.push(rec),
                Err(err) => {
                    // Log and continue on parse failures so one bad line
                    // doesn't hide the rest of the history.
                    tracing::warn!(error = %err, "failed to parse FeedbackRecord line; skipping");
                }
            }
        }

        Ok(out)
    }
}

#[async_trait]
impl FeedbackRepository for FileBackedRepository {
    async fn append(&self, record: &FeedbackRecord) -> Result<(), RepositoryError> {
        self.ensure_parent_dir().await?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())
            .await?;

        let line = serde_json::to_string(record)?;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;

        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<FeedbackRecord>, RepositoryError> {
        self.read_all().await
    }

    async fn load_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<FeedbackRecord>, RepositoryError> {
        let all = self.read_all().await?;
        Ok(all.into_iter().filter(|r| r.category == category).collect())
    }
}
