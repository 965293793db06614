//! Result Repository
//!
//! Persists completed workflow results as one JSON document per run in a
//! flat directory, and reads them back for the history endpoints.
//!
//! Documents are named `post_YYYYMMDD_HHMMSS.json` after the UTC completion
//! time. Two runs completing within the same second share a name and the
//! later one wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use postflow_core::domain::history::HistoryEntry;
use postflow_core::domain::workflow::WorkflowResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FILENAME_PREFIX: &str = "post_";
const FILENAME_SUFFIX: &str = ".json";
const FILENAME_FORMAT: &str = "post_%Y%m%d_%H%M%S.json";

/// Repository error type
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("result {0} not found")]
    NotFound(String),

    #[error("invalid result filename: {0}")]
    InvalidFilename(String),

    #[error("result storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid result document: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage of completed workflow results
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persists a result and returns the document's filename
    async fn save(&self, result: &WorkflowResult) -> Result<String>;

    /// Most recent results first, at most `limit` of them
    async fn list(&self, limit: usize) -> Result<Vec<HistoryEntry>>;

    /// Raw stored document
    async fn read_document(&self, filename: &str) -> Result<Vec<u8>>;

    /// Stored result decoded back into a [`WorkflowResult`]
    async fn get(&self, filename: &str) -> Result<WorkflowResult> {
        let bytes = self.read_document(filename).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Directory-backed implementation of ResultStore
#[derive(Debug, Clone)]
pub struct FileResultStore {
    dir: PathBuf,
}

impl FileResultStore {
    /// Opens the store, creating `dir` if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, filename: &str) -> Result<PathBuf> {
        if !is_result_filename(filename) {
            return Err(StoreError::InvalidFilename(filename.to_string()));
        }
        Ok(self.dir.join(filename))
    }
}

#[async_trait]
impl ResultStore for FileResultStore {
    async fn save(&self, result: &WorkflowResult) -> Result<String> {
        let filename = filename_for(&result.timestamp);
        let path = self.dir.join(&filename);
        let tmp = self.dir.join(format!(
            ".{}.{}.tmp",
            filename,
            result.timestamp.timestamp_subsec_nanos()
        ));

        let bytes = serde_json::to_vec_pretty(result)?;

        // Write aside then rename so readers never see a half-written document
        if let Err(e) = write_then_rename(&tmp, &path, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        tracing::info!("Result saved: {}", path.display());

        Ok(filename)
    }

    async fn list(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                if is_result_filename(name) {
                    names.push(name.to_string());
                }
            }
        }

        // Names embed the timestamp, so lexical order is chronological
        names.sort_unstable_by(|a, b| b.cmp(a));

        let mut history = Vec::with_capacity(limit.min(names.len()));
        for name in names {
            if history.len() >= limit {
                break;
            }

            let bytes = match tokio::fs::read(self.dir.join(&name)).await {
                Ok(bytes) => bytes,
                // Removed between listing and reading
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    tracing::warn!("Skipping unreadable result {}: {}", name, e);
                    continue;
                }
            };

            match serde_json::from_slice::<serde_json::Value>(&bytes) {
                Ok(doc) => history.push(HistoryEntry::from_document(name, &doc)),
                Err(e) => tracing::warn!("Skipping unreadable result {}: {}", name, e),
            }
        }

        Ok(history)
    }

    async fn read_document(&self, filename: &str) -> Result<Vec<u8>> {
        let path = self.path_of(filename)?;

        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound(filename.to_string())
            } else {
                StoreError::Io(e)
            }
        })
    }
}

async fn write_then_rename(tmp: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(tmp, bytes).await?;
    tokio::fs::rename(tmp, path).await
}

/// Document name for a result completed at `timestamp`
pub fn filename_for(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(FILENAME_FORMAT).to_string()
}

/// Whether `name` follows the `post_YYYYMMDD_HHMMSS.json` convention
pub fn is_result_filename(name: &str) -> bool {
    let Some(stamp) = name
        .strip_prefix(FILENAME_PREFIX)
        .and_then(|rest| rest.strip_suffix(FILENAME_SUFFIX))
    else {
        return false;
    };

    let bytes = stamp.as_bytes();
    bytes.len() == 15
        && bytes[8] == b'_'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 8 || b.is_ascii_digit())
}
