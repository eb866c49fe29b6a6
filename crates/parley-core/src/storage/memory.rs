//! In-memory `KvStore`.
//!
//! Backs `--ephemeral` sessions and tests. Nothing survives the process.

use std::collections::HashMap;
use std::sync::Mutex;

use parley_types::error::RepositoryError;

use super::kv_store::KvStore;

/// `KvStore` backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| RepositoryError::Query(format!("store lock poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| RepositoryError::Query(format!("store lock poisoned: {e}")))?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| RepositoryError::Query(format!("store lock poisoned: {e}")))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemoryKvStore::new();
        assert!(store.get("theme").await.unwrap().is_none());

        store.set("theme", &serde_json::json!("dark")).await.unwrap();
        assert_eq!(
            store.get("theme").await.unwrap(),
            Some(serde_json::json!("dark"))
        );
        assert_eq!(store.len(), 1);

        store.delete("theme").await.unwrap();
        assert!(store.get("theme").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MemoryKvStore::new();
        store.set("k", &serde_json::json!(1)).await.unwrap();
        store.set("k", &serde_json::json!(2)).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(serde_json::json!(2)));
    }
}
