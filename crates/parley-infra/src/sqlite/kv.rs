//! SQLite key-value store implementation.
//!
//! Implements `KvStore` from `parley-core` using sqlx with split read/write
//! pools. Values are stored as JSON text and parsed on read.

use chrono::Utc;
use parley_core::storage::kv_store::KvStore;
use parley_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KvStore`.
pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    /// Create a new KV store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let value_str: String = row
            .try_get("value")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let value = serde_json::from_str(&value_str)
            .map_err(|e| RepositoryError::Serialization(format!("invalid JSON value: {e}")))?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let value_str = serde_json::to_string(value)
            .map_err(|e| RepositoryError::Serialization(format!("failed to serialize value: {e}")))?;

        sqlx::query(
            r#"INSERT INTO kv_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(&value_str)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::chat::session::ChatSession;
    use parley_core::storage::persistence::{PersistenceAdapter, ACTIVE_CHAT_KEY, CHATS_KEY};
    use parley_types::chat::{ChatId, ChatMessage};

    async fn test_store() -> (SqliteKvStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (SqliteKvStore::new(pool), dir)
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let (store, _dir) = test_store().await;

        let value = serde_json::json!([{"id": "x", "title": "New Chat", "messages": []}]);
        store.set(CHATS_KEY, &value).await.unwrap();

        assert_eq!(store.get(CHATS_KEY).await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let (store, _dir) = test_store().await;
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let (store, _dir) = test_store().await;

        store.set(ACTIVE_CHAT_KEY, &serde_json::json!("a")).await.unwrap();
        store.set(ACTIVE_CHAT_KEY, &serde_json::json!("b")).await.unwrap();

        assert_eq!(
            store.get(ACTIVE_CHAT_KEY).await.unwrap(),
            Some(serde_json::json!("b"))
        );
    }

    #[tokio::test]
    async fn test_delete_and_delete_nonexistent() {
        let (store, _dir) = test_store().await;

        store.set("temp", &serde_json::json!(1)).await.unwrap();
        store.delete("temp").await.unwrap();
        assert!(store.get("temp").await.unwrap().is_none());

        store.delete("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_row_is_serialization_error() {
        let (store, _dir) = test_store().await;
        sqlx::query(
            "INSERT INTO kv_store (key, value, created_at, updated_at) VALUES (?, 'not json', '', '')",
        )
        .bind(CHATS_KEY)
        .execute(&store.pool.writer)
        .await
        .unwrap();

        let err = store.get(CHATS_KEY).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("chat.db").display());

        let chat_id: ChatId = {
            let store = SqliteKvStore::new(DatabasePool::new(&url).await.unwrap());
            let mut session = ChatSession::load(PersistenceAdapter::new(store)).await;
            parley_core::chat::controller::init_chat_session(&mut session).await;
            let id = session.active_chat_id().cloned().unwrap();
            session
                .store_mut()
                .append(&id, ChatMessage::user("remember me"))
                .unwrap();
            assert!(session.persist().await);
            id
        };

        let store = SqliteKvStore::new(DatabasePool::new(&url).await.unwrap());
        let session = ChatSession::load(PersistenceAdapter::new(store)).await;
        assert_eq!(session.active_chat_id(), Some(&chat_id));
        assert_eq!(
            session.active_chat().unwrap().messages,
            vec![ChatMessage::user("remember me")]
        );
    }
}
