//! Persisted client-side state
//!
//! A small key-value store backed by one JSON file per key, mirroring the
//! browser local-storage layout the dashboard relies on: each key is
//! rehydrated independently, so a torn or corrupted write of one key never
//! takes down the others.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};

/// File-backed key-value store with independently keyed entries
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> ApiResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| ApiError::Storage(format!("failed to create {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read and deserialize a key. Missing or corrupted entries read as
    /// `None`; corruption is logged and otherwise ignored so the remaining
    /// keys still rehydrate.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = key, error = %e, "Discarding corrupted persisted entry");
                None
            }
        }
    }

    /// Serialize and persist a key
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> ApiResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| ApiError::Storage(format!("failed to serialize {}: {}", key, e)))?;
        fs::write(self.path_for(key), raw)
            .map_err(|e| ApiError::Storage(format!("failed to write {}: {}", key, e)))
    }

    /// Remove a key; removing an absent key is a no-op
    pub fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(key = key, error = %e, "Failed to remove persisted entry");
            }
        }
    }

    /// Whether a key currently exists on disk
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> StateStore {
        let dir = std::env::temp_dir().join(format!("fxdesk-test-{}", Uuid::new_v4()));
        StateStore::open(dir).unwrap()
    }

    #[test]
    fn test_set_get_roundtrip() {
        let store = temp_store();
        store.set("market", &"DUBAI".to_string()).unwrap();
        assert_eq!(store.get::<String>("market"), Some("DUBAI".to_string()));
    }

    #[test]
    fn test_missing_key_reads_none() {
        let store = temp_store();
        assert_eq!(store.get::<String>("nope"), None);
    }

    #[test]
    fn test_corrupted_entry_is_isolated() {
        let store = temp_store();
        store.set("good", &42i64).unwrap();
        std::fs::write(store.path_for("bad"), "{not json").unwrap();

        // The broken key reads as empty, the healthy one is untouched
        assert_eq!(store.get::<i64>("bad"), None);
        assert_eq!(store.get::<i64>("good"), Some(42));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = temp_store();
        store.set("k", &true).unwrap();
        store.remove("k");
        store.remove("k");
        assert!(!store.contains("k"));
    }
}
