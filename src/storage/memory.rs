//! In-memory object store implementation.
//!
//! Useful for testing.

use super::{validate_name, ObjectInfo, ObjectStore};
use crate::error::{OwlError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory object store.
pub struct MemoryObjectStore {
    objects: RwLock<BTreeMap<String, (Vec<u8>, DateTime<Utc>)>>,
}

impl MemoryObjectStore {
    /// Create a new in-memory object store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
        }
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, name: &str, body: &[u8]) -> Result<()> {
        validate_name(name)?;
        let mut objects = self.objects.write().unwrap();
        objects.insert(name.to_string(), (body.to_vec(), Utc::now()));
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Vec<u8>> {
        let objects = self.objects.read().unwrap();
        objects
            .get(name)
            .map(|(body, _)| body.clone())
            .ok_or_else(|| OwlError::ObjectNotFound(name.to_string()))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>> {
        let objects = self.objects.read().unwrap();
        Ok(objects
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, (body, modified))| ObjectInfo {
                name: name.clone(),
                size: body.len() as u64,
                modified: *modified,
            })
            .collect())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let mut objects = self.objects.write().unwrap();
        Ok(objects.remove(name).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_list_delete() {
        let store = MemoryObjectStore::new();
        store.put("transcripts/a.txt", b"alpha").await.unwrap();
        store.put("transcripts/asummary.txt", b"sum").await.unwrap();
        store.put("uploads/a.mp3", b"\x00\x01").await.unwrap();

        assert_eq!(store.get_text("transcripts/a.txt").await.unwrap(), "alpha");

        let listed = store.list("transcripts/").await.unwrap();
        let names: Vec<_> = listed.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["transcripts/a.txt", "transcripts/asummary.txt"]);

        assert_eq!(store.delete_prefix("transcripts/").await.unwrap(), 2);
        assert!(store.list("transcripts/").await.unwrap().is_empty());
        assert_eq!(store.list("").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_object() {
        let store = MemoryObjectStore::new();
        assert!(matches!(
            store.get("nope.txt").await,
            Err(OwlError::ObjectNotFound(_))
        ));
        assert!(!store.delete("nope.txt").await.unwrap());
    }
}
