//! Active-chat selection.
//!
//! [`ensure_active_chat`] is the single place that decides which chat is
//! active. It reuses an untouched "New Chat" instead of creating a second
//! one, unless the caller explicitly asks for a fresh chat.

use parley_types::chat::ChatId;
use parley_types::error::ChatError;
use tracing::info;

use crate::chat::session::ChatSession;
use crate::storage::kv_store::KvStore;

/// What [`ensure_active_chat`] did to arrive at the active chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveChatOutcome {
    /// A new chat was created and made active.
    Created(ChatId),
    /// The active chat was already an empty "New Chat" and was kept.
    Reused(ChatId),
    /// Another empty "New Chat" existed and became active.
    Switched(ChatId),
}

impl ActiveChatOutcome {
    pub fn chat_id(&self) -> &ChatId {
        match self {
            ActiveChatOutcome::Created(id)
            | ActiveChatOutcome::Reused(id)
            | ActiveChatOutcome::Switched(id) => id,
        }
    }
}

/// Make sure exactly one chat is active, creating one when required.
///
/// The checks run in a fixed order: an empty store always gets a new chat;
/// a missing or dangling active id falls back to the newest chat; then,
/// unless `force_new` is set, the active empty chat is reused, or any other
/// empty chat is switched to. Only when none of that applies is a chat
/// created, so two empty "New Chat" entries never coexist.
pub async fn ensure_active_chat<K: KvStore>(
    session: &mut ChatSession<K>,
    force_new: bool,
) -> ActiveChatOutcome {
    if session.store().is_empty() {
        return create_and_activate(session).await;
    }

    if session.active_chat().is_none() {
        let Some(latest) = session.store().latest().map(|c| c.id.clone()) else {
            return create_and_activate(session).await;
        };
        info!(chat_id = %latest, "Active chat unset, falling back to latest");
        session.set_active_chat_id(latest);
        session.persist().await;
    }

    if !force_new {
        if let Some(active) = session.active_chat() {
            if active.is_empty_new_chat() {
                let id = active.id.clone();
                info!(chat_id = %id, "Reusing empty active chat");
                return ActiveChatOutcome::Reused(id);
            }
        }

        if let Some(empty) = session.store().find_empty_new_chat() {
            let id = empty.id.clone();
            info!(chat_id = %id, "Switching to existing empty chat");
            session.set_active_chat_id(id.clone());
            session.persist().await;
            return ActiveChatOutcome::Switched(id);
        }
    }

    create_and_activate(session).await
}

/// Startup entry point: resolve the active chat once at load.
///
/// Not a special case: an active empty chat is kept, anything else goes
/// through the same reuse-or-create path as [`ensure_active_chat`].
pub async fn init_chat_session<K: KvStore>(session: &mut ChatSession<K>) -> ActiveChatOutcome {
    ensure_active_chat(session, false).await
}

/// The "new chat" action: always creates a chat.
pub async fn new_chat<K: KvStore>(session: &mut ChatSession<K>) -> ActiveChatOutcome {
    ensure_active_chat(session, true).await
}

/// Make an existing chat active (e.g. picked from the recent list).
pub async fn select_chat<K: KvStore>(
    session: &mut ChatSession<K>,
    id: &ChatId,
) -> Result<(), ChatError> {
    if session.store().find_by_id(id).is_none() {
        return Err(ChatError::NotFound(id.clone()));
    }
    session.set_active_chat_id(id.clone());
    session.persist().await;
    info!(chat_id = %id, "Chat selected");
    Ok(())
}

async fn create_and_activate<K: KvStore>(session: &mut ChatSession<K>) -> ActiveChatOutcome {
    let id = session.store_mut().create().id.clone();
    session.set_active_chat_id(id.clone());
    session.persist().await;
    info!(chat_id = %id, "New chat created");
    ActiveChatOutcome::Created(id)
}
