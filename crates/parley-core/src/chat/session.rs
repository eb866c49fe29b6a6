//! The session object shared by every chat component.
//!
//! `ChatSession` bundles the chat collection, the active-chat reference, and
//! the persistence adapter. Components receive it by `&mut`; there is no
//! global state. Every mutation ends with [`ChatSession::persist`], which
//! flushes both slots before returning.

use parley_types::chat::{Chat, ChatId};
use tracing::{debug, warn};

use crate::chat::store::ChatStore;
use crate::storage::kv_store::KvStore;
use crate::storage::persistence::PersistenceAdapter;

/// In-memory chat state plus its persistence adapter.
pub struct ChatSession<K: KvStore> {
    store: ChatStore,
    active_chat_id: Option<ChatId>,
    persistence: PersistenceAdapter<K>,
}

impl<K: KvStore> ChatSession<K> {
    /// Build a session from whatever the adapter holds.
    ///
    /// Unreadable slots are logged and treated as empty; the session then
    /// runs from memory until the next successful write.
    pub async fn load(persistence: PersistenceAdapter<K>) -> Self {
        let chats = persistence.load_chats().await.unwrap_or_else(|e| {
            warn!(error = %e, "Could not load saved chats, starting empty");
            Vec::new()
        });
        let active_chat_id = persistence.load_active_chat_id().await.unwrap_or_else(|e| {
            warn!(error = %e, "Could not load active chat id");
            None
        });
        debug!(chats = chats.len(), "Chat session loaded");

        Self {
            store: ChatStore::from_chats(chats),
            active_chat_id,
            persistence,
        }
    }

    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ChatStore {
        &mut self.store
    }

    pub fn active_chat_id(&self) -> Option<&ChatId> {
        self.active_chat_id.as_ref()
    }

    pub(crate) fn set_active_chat_id(&mut self, id: ChatId) {
        self.active_chat_id = Some(id);
    }

    /// The active chat, if the active id resolves.
    pub fn active_chat(&self) -> Option<&Chat> {
        self.active_chat_id
            .as_ref()
            .and_then(|id| self.store.find_by_id(id))
    }

    pub fn persistence(&self) -> &PersistenceAdapter<K> {
        &self.persistence
    }

    /// Write the chat collection and active id through the adapter.
    ///
    /// Returns `false` when the write failed. The in-memory state stays
    /// authoritative either way.
    pub async fn persist(&self) -> bool {
        match self
            .persistence
            .save(self.store.chats(), self.active_chat_id.as_ref())
            .await
        {
            Ok(()) => {
                debug!(chats = self.store.len(), "Chat session persisted");
                true
            }
            Err(e) => {
                warn!(error = %e, "Persistence unavailable, continuing in memory");
                false
            }
        }
    }
}
