//! Application state wiring the adapters together.
//!
//! AppState resolves the data directory and config, then hands out the
//! concrete store, reply client, and feedback sink the commands need.

use std::path::PathBuf;

use parley_core::app::AppOptions;
use parley_core::chat::session::ChatSession;
use parley_core::storage::kv_store::KvStore;
use parley_core::storage::memory::MemoryKvStore;
use parley_core::storage::persistence::PersistenceAdapter;
use parley_infra::config::{load_global_config, recent_limit, request_timeout};
use parley_infra::filesystem::{database_url, ensure_data_dir, resolve_data_dir};
use parley_infra::http::feedback::HttpFeedbackSink;
use parley_infra::http::reply::HttpReplyClient;
use parley_infra::sqlite::kv::SqliteKvStore;
use parley_infra::sqlite::pool::DatabasePool;
use parley_types::config::GlobalConfig;
use parley_types::error::RepositoryError;
use tracing::warn;

/// The key-value store backing this run.
pub enum LocalStore {
    Sqlite(SqliteKvStore),
    Memory(MemoryKvStore),
}

impl LocalStore {
    pub fn is_persistent(&self) -> bool {
        matches!(self, LocalStore::Sqlite(_))
    }
}

impl KvStore for LocalStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        match self {
            LocalStore::Sqlite(store) => store.get(key).await,
            LocalStore::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        match self {
            LocalStore::Sqlite(store) => store.set(key, value).await,
            LocalStore::Memory(store) => store.set(key, value).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        match self {
            LocalStore::Sqlite(store) => store.delete(key).await,
            LocalStore::Memory(store) => store.delete(key).await,
        }
    }
}

/// Settings shared by every command.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: GlobalConfig,
    pub ephemeral: bool,
}

impl AppState {
    /// Resolve the data directory and load `config.toml`.
    ///
    /// `api_url` replaces the configured service URL when given.
    pub async fn init(api_url: Option<String>, ephemeral: bool) -> anyhow::Result<Self> {
        Self::with_data_dir(resolve_data_dir(), api_url, ephemeral).await
    }

    pub async fn with_data_dir(
        data_dir: PathBuf,
        api_url: Option<String>,
        ephemeral: bool,
    ) -> anyhow::Result<Self> {
        let mut config = load_global_config(&data_dir).await;
        if let Some(url) = api_url {
            config.api_base_url = url;
        }
        Ok(Self {
            data_dir,
            config,
            ephemeral,
        })
    }

    /// Open the local store.
    ///
    /// If the database cannot be opened the run continues on an in-memory
    /// store, the same way a failed write degrades.
    pub async fn open_store(&self) -> LocalStore {
        if self.ephemeral {
            return LocalStore::Memory(MemoryKvStore::new());
        }

        if let Err(e) = ensure_data_dir(&self.data_dir).await {
            warn!(error = %e, dir = %self.data_dir.display(), "Cannot create data directory, chats will not be saved");
            return LocalStore::Memory(MemoryKvStore::new());
        }

        match DatabasePool::new(&database_url(&self.data_dir)).await {
            Ok(pool) => LocalStore::Sqlite(SqliteKvStore::new(pool)),
            Err(e) => {
                warn!(error = %e, "Cannot open chat database, chats will not be saved");
                LocalStore::Memory(MemoryKvStore::new())
            }
        }
    }

    /// Load the chat session from the local store.
    pub async fn load_session(&self) -> ChatSession<LocalStore> {
        ChatSession::load(PersistenceAdapter::new(self.open_store().await)).await
    }

    pub fn reply_client(&self) -> anyhow::Result<HttpReplyClient> {
        Ok(HttpReplyClient::new(
            &self.config.api_base_url,
            request_timeout(&self.config),
        )?)
    }

    pub fn feedback_sink(&self) -> anyhow::Result<HttpFeedbackSink> {
        Ok(HttpFeedbackSink::new(&self.config.api_base_url)?)
    }

    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            recent_limit: recent_limit(&self.config),
            feedback_enabled: self.config.feedback_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_api_url_override() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::with_data_dir(
            dir.path().to_path_buf(),
            Some("http://localhost:9999".to_string()),
            false,
        )
        .await
        .unwrap();
        assert_eq!(state.config.api_base_url, "http://localhost:9999");
        assert_eq!(
            state.reply_client().unwrap().url(),
            "http://localhost:9999/api/chat"
        );
    }

    #[tokio::test]
    async fn test_ephemeral_uses_memory_store() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::with_data_dir(dir.path().to_path_buf(), None, true)
            .await
            .unwrap();
        assert!(!state.open_store().await.is_persistent());
        assert!(!dir.path().join("parley.db").exists());
    }

    #[tokio::test]
    async fn test_persistent_store_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested");
        let state = AppState::with_data_dir(data_dir.clone(), None, false)
            .await
            .unwrap();
        assert!(state.open_store().await.is_persistent());
        assert!(data_dir.join("parley.db").exists());
    }

    #[tokio::test]
    async fn test_app_options_from_config() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join("config.toml"),
            "recent_limit = 3\nfeedback_enabled = false\n",
        )
        .await
        .unwrap();

        let state = AppState::with_data_dir(dir.path().to_path_buf(), None, true)
            .await
            .unwrap();
        let options = state.app_options();
        assert_eq!(options.recent_limit, 3);
        assert!(!options.feedback_enabled);
    }
}
