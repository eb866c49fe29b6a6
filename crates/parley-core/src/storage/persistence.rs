//! Persistence adapter for chat session state.
//!
//! Maps the chat collection and the active-chat id onto two named slots of
//! a [`KvStore`]. Both slots are read once at startup and rewritten after
//! every mutation.

use parley_types::chat::{Chat, ChatId};
use parley_types::error::RepositoryError;

use super::kv_store::KvStore;

/// Slot holding the serialized chat collection (JSON array).
pub const CHATS_KEY: &str = "chats";

/// Slot holding the serialized active-chat id (JSON string).
pub const ACTIVE_CHAT_KEY: &str = "activeChatId";

/// Reads and writes session state through a `KvStore`.
pub struct PersistenceAdapter<K: KvStore> {
    store: K,
}

impl<K: KvStore> PersistenceAdapter<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Access the underlying key-value store.
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Load the chat collection. A missing slot is an empty collection.
    pub async fn load_chats(&self) -> Result<Vec<Chat>, RepositoryError> {
        match self.store.get(CHATS_KEY).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| RepositoryError::Serialization(format!("invalid chats slot: {e}"))),
            None => Ok(Vec::new()),
        }
    }

    /// Load the active-chat id. A missing or null slot is `None`.
    pub async fn load_active_chat_id(&self) -> Result<Option<ChatId>, RepositoryError> {
        match self.store.get(ACTIVE_CHAT_KEY).await? {
            Some(serde_json::Value::Null) | None => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                RepositoryError::Serialization(format!("invalid activeChatId slot: {e}"))
            }),
        }
    }

    pub async fn save_chats(&self, chats: &[Chat]) -> Result<(), RepositoryError> {
        let value = serde_json::to_value(chats)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        self.store.set(CHATS_KEY, &value).await
    }

    /// Write the active-chat id, clearing the slot when there is none.
    pub async fn save_active_chat_id(&self, id: Option<&ChatId>) -> Result<(), RepositoryError> {
        match id {
            Some(id) => {
                let value = serde_json::to_value(id)
                    .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
                self.store.set(ACTIVE_CHAT_KEY, &value).await
            }
            None => self.store.delete(ACTIVE_CHAT_KEY).await,
        }
    }

    /// Write both slots.
    pub async fn save(&self, chats: &[Chat], active: Option<&ChatId>) -> Result<(), RepositoryError> {
        self.save_chats(chats).await?;
        self.save_active_chat_id(active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryKvStore;
    use parley_types::chat::ChatMessage;

    #[tokio::test]
    async fn test_empty_store_loads_nothing() {
        let adapter = PersistenceAdapter::new(MemoryKvStore::new());
        assert!(adapter.load_chats().await.unwrap().is_empty());
        assert!(adapter.load_active_chat_id().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let adapter = PersistenceAdapter::new(MemoryKvStore::new());
        let mut chat = Chat::new();
        chat.messages.push(ChatMessage::user("hello"));
        let chats = vec![chat.clone(), Chat::new()];

        adapter.save(&chats, Some(&chat.id)).await.unwrap();

        assert_eq!(adapter.load_chats().await.unwrap(), chats);
        assert_eq!(adapter.load_active_chat_id().await.unwrap(), Some(chat.id));
    }

    #[tokio::test]
    async fn test_clearing_active_chat_id() {
        let adapter = PersistenceAdapter::new(MemoryKvStore::new());
        let id = ChatId::new();
        adapter.save_active_chat_id(Some(&id)).await.unwrap();
        adapter.save_active_chat_id(None).await.unwrap();
        assert!(adapter.load_active_chat_id().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_chats_slot_is_serialization_error() {
        let store = MemoryKvStore::new();
        store
            .set(CHATS_KEY, &serde_json::json!({"not": "an array"}))
            .await
            .unwrap();
        let adapter = PersistenceAdapter::new(store);

        let err = adapter.load_chats().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }
}
