//! Chat thread and message types for Parley.
//!
//! A `Chat` is one conversation thread: an id, a title, and an append-only
//! list of messages. Chats are serialized as camelCase JSON so the persisted
//! collection stays readable by other clients of the same storage slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Title every chat carries until its first user message arrives.
pub const NEW_CHAT_TITLE: &str = "New Chat";

/// Number of leading words of the first user message used as the title.
pub const TITLE_WORD_LIMIT: usize = 5;

/// Unique identifier for a chat, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub Uuid);

impl ChatId {
    /// Create a new ChatId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// First eight characters, for compact display.
    pub fn short(&self) -> String {
        self.0.to_string().chars().take(8).collect()
    }
}

impl Default for ChatId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Author of a chat message.
///
/// `BotPending` only ever appears on the display placeholder shown while a
/// reply is in flight; it is never appended to a stored chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageRole {
    User,
    Bot,
    BotPending,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Bot => write!(f, "bot"),
            MessageRole::BotPending => write!(f, "bot-pending"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "bot" => Ok(MessageRole::Bot),
            "bot-pending" => Ok(MessageRole::BotPending),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message within a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Bot,
            text: text.into(),
        }
    }

    pub fn pending(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::BotPending,
            text: text.into(),
        }
    }
}

/// A conversation thread.
///
/// `messages` is always present: a persisted chat without the field loads
/// with an empty history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: ChatId,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl Chat {
    /// A fresh chat with the sentinel title and no messages.
    pub fn new() -> Self {
        Self {
            id: ChatId::new(),
            title: NEW_CHAT_TITLE.to_string(),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether this chat is an untouched "New Chat" eligible for reuse.
    pub fn is_empty_new_chat(&self) -> bool {
        self.title == NEW_CHAT_TITLE && self.messages.is_empty()
    }

    /// Ordering key used everywhere chats are ranked by recency.
    pub fn recency_key(&self) -> (DateTime<Utc>, &ChatId) {
        (self.created_at, &self.id)
    }
}

impl Default for Chat {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a title from the first `TITLE_WORD_LIMIT` whitespace-delimited words.
pub fn title_from_text(text: &str) -> String {
    text.split_whitespace()
        .take(TITLE_WORD_LIMIT)
        .collect::<Vec<_>>()
        .join(" ")
}
