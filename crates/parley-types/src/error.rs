use thiserror::Error;

use crate::chat::ChatId;

/// Errors from Chat Store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("chat '{0}' not found")]
    NotFound(ChatId),

    #[error("chat '{0}' already has messages and cannot be retitled")]
    AlreadyStarted(ChatId),
}

/// Errors from the remote reply service.
///
/// The message flow treats every variant the same way; the split exists for
/// logging only.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),

    #[error("reply service returned status {0}")]
    Status(u16),

    #[error("failed to decode reply: {0}")]
    Decode(String),

    #[error("reply request timed out")]
    Timeout,
}

/// Errors from key-value persistence (used by trait definitions in parley-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
