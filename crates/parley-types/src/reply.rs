//! Wire types for the remote reply service (`POST /api/chat`).

use serde::{Deserialize, Serialize};

use crate::chat::ChatId;

/// Request body for one user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub prompt: String,
    pub chat_id: ChatId,
    pub chat_title: String,
}

/// Response body. `bot_reply` may be absent; the flow substitutes a fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPayload {
    #[serde(default)]
    pub bot_reply: Option<String>,
}
