//! Remote service ports.
//!
//! `ReplyClient` answers user prompts; `FeedbackSink` records ratings.
//! Implementations live in parley-infra (e.g., `HttpReplyClient`).

use parley_types::error::RemoteError;
use parley_types::feedback::FeedbackRequest;
use parley_types::reply::{ReplyPayload, ReplyRequest};

/// Trait for the service that produces bot replies.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ReplyClient: Send + Sync {
    /// Send one prompt and wait for the reply payload.
    fn send(
        &self,
        request: &ReplyRequest,
    ) -> impl std::future::Future<Output = Result<ReplyPayload, RemoteError>> + Send;
}

/// Trait for the feedback collector.
///
/// Fire-and-forget: the call returns immediately and its outcome never
/// reaches the UI.
pub trait FeedbackSink: Send + Sync {
    fn submit(&self, request: FeedbackRequest);
}
