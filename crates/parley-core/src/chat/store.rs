//! In-memory chat collection.
//!
//! `ChatStore` owns the chats and the lookup/creation rules. It does not
//! enforce the single-empty-chat rule itself; the session controller checks
//! [`ChatStore::find_empty_new_chat`] before calling [`ChatStore::create`].

use parley_types::chat::{title_from_text, Chat, ChatId, ChatMessage};
use parley_types::error::ChatError;

/// Ordered collection of chats, in creation order.
#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    chats: Vec<Chat>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate a store from persisted chats.
    pub fn from_chats(chats: Vec<Chat>) -> Self {
        Self { chats }
    }

    pub fn chats(&self) -> &[Chat] {
        &self.chats
    }

    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    pub fn find_by_id(&self, id: &ChatId) -> Option<&Chat> {
        self.chats.iter().find(|c| &c.id == id)
    }

    fn find_by_id_mut(&mut self, id: &ChatId) -> Option<&mut Chat> {
        self.chats.iter_mut().find(|c| &c.id == id)
    }

    /// The chat titled "New Chat" with no messages, if one exists.
    pub fn find_empty_new_chat(&self) -> Option<&Chat> {
        self.chats.iter().find(|c| c.is_empty_new_chat())
    }

    /// The most recently created chat. Ties on `created_at` go to the larger id.
    pub fn latest(&self) -> Option<&Chat> {
        self.chats.iter().max_by(|a, b| a.recency_key().cmp(&b.recency_key()))
    }

    /// Append a fresh "New Chat" and return it.
    pub fn create(&mut self) -> &Chat {
        self.chats.push(Chat::new());
        &self.chats[self.chats.len() - 1]
    }

    /// Push a message onto the end of a chat's history.
    pub fn append(&mut self, id: &ChatId, message: ChatMessage) -> Result<(), ChatError> {
        let chat = self
            .find_by_id_mut(id)
            .ok_or_else(|| ChatError::NotFound(id.clone()))?;
        chat.messages.push(message);
        Ok(())
    }

    /// Title a chat from the first words of its opening message.
    ///
    /// Only valid while the chat has no messages yet.
    pub fn retitle_from_first_message(&mut self, id: &ChatId, text: &str) -> Result<(), ChatError> {
        let chat = self
            .find_by_id_mut(id)
            .ok_or_else(|| ChatError::NotFound(id.clone()))?;
        if !chat.messages.is_empty() {
            return Err(ChatError::AlreadyStarted(id.clone()));
        }
        chat.title = title_from_text(text);
        Ok(())
    }
}
