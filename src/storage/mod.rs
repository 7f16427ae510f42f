//! Object store abstraction for transcripts and summaries.
//!
//! Objects are addressed by `/`-separated names (`transcripts/call.txt`).
//! Transcripts and their summaries share one prefix; a summary is the
//! transcript's base name with `summary` appended.

mod local;
mod memory;

pub use local::LocalObjectStore;
pub use memory::MemoryObjectStore;

use crate::error::{OwlError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Listing entry for a stored object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Full object name including prefix.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

impl ObjectInfo {
    /// Last path segment of the object name.
    pub fn file_name(&self) -> &str {
        base_name(&self.name)
    }

    /// Whether this looks like a plain transcript.
    pub fn is_transcript(&self) -> bool {
        self.name.ends_with(".txt") && !self.name.contains("summary")
    }

    /// Whether this looks like a generated summary.
    pub fn is_summary(&self) -> bool {
        self.name.ends_with(".txt") && self.name.contains("summary")
    }
}

/// Trait for object store implementations.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `name`, replacing any existing object.
    async fn put(&self, name: &str, body: &[u8]) -> Result<()>;

    /// Fetch an object's bytes.
    async fn get(&self, name: &str) -> Result<Vec<u8>>;

    /// List objects whose name starts with `prefix`, sorted by name.
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>>;

    /// Delete one object. Returns false if it did not exist.
    async fn delete(&self, name: &str) -> Result<bool>;

    /// Fetch an object as UTF-8 text (invalid bytes are replaced).
    async fn get_text(&self, name: &str) -> Result<String> {
        let bytes = self.get(name).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Delete every object under `prefix`. Returns the number deleted.
    async fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let mut deleted = 0;
        for object in self.list(prefix).await? {
            if self.delete(&object.name).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

/// Last `/`-separated segment of a path or object name.
pub fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Object name for a transcript of `source` produced by `model_type`.
pub fn transcript_object_name(prefix: &str, source: &str, model_type: &str) -> String {
    format!("{}/{}{}.txt", prefix, base_name(source), model_type)
}

/// Object name for the summary of `source`.
pub fn summary_object_name(prefix: &str, source: &str) -> String {
    format!("{}/{}summary.txt", prefix, base_name(source))
}

/// Validate an object name: relative, `/`-separated, no `.` or `..` segments.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.starts_with('/')
        || name.contains('\\')
        || name
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if invalid {
        return Err(OwlError::Storage(format!("invalid object name: {:?}", name)));
    }
    Ok(())
}
