//! Message flow for one user turn.
//!
//! A turn moves `Idle -> AwaitingReply -> Idle`. [`MessageFlowController::begin_turn`]
//! records the user message and locks submission; [`MessageFlowController::complete_turn`]
//! appends the bot message (or the apology on failure) and unlocks it.
//! [`MessageFlowController::send_prompt`] runs both around the awaited reply call.

use parley_types::chat::{ChatId, ChatMessage};
use parley_types::error::RemoteError;
use parley_types::reply::{ReplyPayload, ReplyRequest};
use thiserror::Error;
use tracing::{info, warn};

use crate::chat::feedback::FeedbackAffordance;
use crate::chat::recent::build_recent_list;
use crate::chat::session::ChatSession;
use crate::remote::ReplyClient;
use crate::storage::kv_store::KvStore;
use crate::view::ChatView;

/// Bot message appended when the reply call fails.
pub const APOLOGY_TEXT: &str =
    "Sorry, I couldn't get a response right now. Please try again in a moment.";

/// Bot message appended when the reply payload carries no text.
pub const NO_RESPONSE_TEXT: &str = "No response available.";

/// Text of the placeholder shown while waiting.
pub const PENDING_TEXT: &str = "Thinking...";

/// Where the controller is in the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingReply(ChatId),
}

/// Why a submission was not accepted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TurnRejected {
    #[error("message is empty")]
    Empty,

    #[error("a reply is still pending")]
    Busy,

    #[error("no active chat")]
    NoActiveChat,
}

/// A turn that has been recorded and is waiting for its reply.
///
/// Only [`MessageFlowController::begin_turn`] creates one.
#[derive(Debug)]
pub struct PendingTurn {
    chat_id: ChatId,
    chat_title: String,
    prompt: String,
}

impl PendingTurn {
    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    /// Body for the reply service.
    pub fn request(&self) -> ReplyRequest {
        ReplyRequest {
            prompt: self.prompt.clone(),
            chat_id: self.chat_id.clone(),
            chat_title: self.chat_title.clone(),
        }
    }
}

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Delivered {
        answer: String,
        feedback: FeedbackAffordance,
    },
    Failed,
}

/// Drives user turns against the active chat.
pub struct MessageFlowController<R: ReplyClient, V: ChatView> {
    reply_client: R,
    view: V,
    state: TurnState,
}

impl<R: ReplyClient, V: ChatView> MessageFlowController<R, V> {
    pub fn new(reply_client: R, view: V) -> Self {
        Self {
            reply_client,
            view,
            state: TurnState::Idle,
        }
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn reply_client(&self) -> &R {
        &self.reply_client
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Redraw the active chat and the recent list.
    pub fn refresh<K: KvStore>(&mut self, session: &ChatSession<K>, recent_limit: usize) {
        if let Some(chat) = session.active_chat() {
            self.view.render_messages(chat);
        }
        let recent = build_recent_list(
            session.store().chats(),
            session.active_chat_id(),
            recent_limit,
        );
        self.view.render_recent(&recent);
    }

    /// Record the user's message and lock submission until the reply lands.
    pub async fn begin_turn<K: KvStore>(
        &mut self,
        session: &mut ChatSession<K>,
        text: &str,
    ) -> Result<PendingTurn, TurnRejected> {
        let prompt = text.trim();
        if prompt.is_empty() {
            return Err(TurnRejected::Empty);
        }
        if self.state != TurnState::Idle {
            return Err(TurnRejected::Busy);
        }
        let Some(chat) = session.active_chat() else {
            return Err(TurnRejected::NoActiveChat);
        };
        let chat_id = chat.id.clone();
        let first_message = chat.messages.is_empty();

        let store = session.store_mut();
        if first_message {
            store
                .retitle_from_first_message(&chat_id, prompt)
                .map_err(|_| TurnRejected::NoActiveChat)?;
        }
        store
            .append(&chat_id, ChatMessage::user(prompt))
            .map_err(|_| TurnRejected::NoActiveChat)?;
        session.persist().await;

        let chat_title = session
            .active_chat()
            .map(|c| c.title.clone())
            .unwrap_or_default();
        if let Some(chat) = session.active_chat() {
            self.view.render_messages(chat);
        }
        self.view.show_pending(&ChatMessage::pending(PENDING_TEXT));
        self.view.set_submit_enabled(false);
        self.state = TurnState::AwaitingReply(chat_id.clone());

        Ok(PendingTurn {
            chat_id,
            chat_title,
            prompt: prompt.to_string(),
        })
    }

    /// Land the reply (or the failure) for a pending turn.
    pub async fn complete_turn<K: KvStore>(
        &mut self,
        session: &mut ChatSession<K>,
        pending: PendingTurn,
        result: Result<ReplyPayload, RemoteError>,
    ) -> TurnOutcome {
        self.view.clear_pending();

        let (message, delivered) = match result {
            Ok(payload) => {
                let answer = payload
                    .bot_reply
                    .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string());
                (ChatMessage::bot(answer), true)
            }
            Err(e) => {
                warn!(chat_id = %pending.chat_id, error = %e, "Reply failed");
                (ChatMessage::bot(APOLOGY_TEXT), false)
            }
        };
        let answer = message.text.clone();

        let appended = session.store_mut().append(&pending.chat_id, message);
        if let Err(e) = &appended {
            warn!(error = %e, "Dropping reply for missing chat");
        } else {
            session.persist().await;
        }

        if let Some(chat) = session.active_chat() {
            self.view.render_messages(chat);
        }
        self.view.set_submit_enabled(true);
        self.state = TurnState::Idle;

        if !delivered || appended.is_err() {
            return TurnOutcome::Failed;
        }

        info!(chat_id = %pending.chat_id, "Reply delivered");
        let chat_title = session
            .store()
            .find_by_id(&pending.chat_id)
            .map(|c| c.title.clone())
            .unwrap_or(pending.chat_title);
        TurnOutcome::Delivered {
            feedback: FeedbackAffordance::new(
                pending.chat_id,
                chat_title,
                pending.prompt,
                answer.clone(),
            ),
            answer,
        }
    }

    /// Run one full turn: record, ask the reply service, land the result.
    ///
    /// Remote failures never escape; they end as [`TurnOutcome::Failed`].
    #[tracing::instrument(name = "send_prompt", skip_all)]
    pub async fn send_prompt<K: KvStore>(
        &mut self,
        session: &mut ChatSession<K>,
        text: &str,
    ) -> Result<TurnOutcome, TurnRejected> {
        let pending = self.begin_turn(session, text).await?;
        let result = self.reply_client.send(&pending.request()).await;
        Ok(self.complete_turn(session, pending, result).await)
    }
}
