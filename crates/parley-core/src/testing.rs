//! Hand-written doubles for the core ports, shared by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use parley_types::chat::{Chat, ChatMessage};
use parley_types::error::{RemoteError, RepositoryError};
use parley_types::feedback::FeedbackRequest;
use parley_types::reply::{ReplyPayload, ReplyRequest};

use crate::chat::recent::RecentChat;
use crate::remote::{FeedbackSink, ReplyClient};
use crate::storage::kv_store::KvStore;
use crate::view::ChatView;

/// `KvStore` whose every call fails.
#[derive(Debug, Default)]
pub struct UnavailableKvStore;

impl KvStore for UnavailableKvStore {
    async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        Err(RepositoryError::Connection)
    }

    async fn set(&self, _key: &str, _value: &serde_json::Value) -> Result<(), RepositoryError> {
        Err(RepositoryError::Connection)
    }

    async fn delete(&self, _key: &str) -> Result<(), RepositoryError> {
        Err(RepositoryError::Connection)
    }
}

/// Reply client that plays back queued results and records requests.
#[derive(Default)]
pub struct ScriptedReplyClient {
    replies: Mutex<VecDeque<Result<ReplyPayload, RemoteError>>>,
    pub requests: Mutex<Vec<ReplyRequest>>,
}

impl ScriptedReplyClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.push(Ok(ReplyPayload {
            bot_reply: Some(text.to_string()),
        }))
    }

    pub fn fail(self, error: RemoteError) -> Self {
        self.push(Err(error))
    }

    pub fn push(self, result: Result<ReplyPayload, RemoteError>) -> Self {
        self.replies.lock().unwrap().push_back(result);
        self
    }
}

impl ReplyClient for ScriptedReplyClient {
    async fn send(&self, request: &ReplyRequest) -> Result<ReplyPayload, RemoteError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RemoteError::Network("no scripted reply".to_string())))
    }
}

/// Feedback sink that records every submission.
#[derive(Default)]
pub struct RecordingFeedbackSink {
    pub sent: Mutex<Vec<FeedbackRequest>>,
}

impl RecordingFeedbackSink {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl FeedbackSink for RecordingFeedbackSink {
    fn submit(&self, request: FeedbackRequest) {
        self.sent.lock().unwrap().push(request);
    }
}

/// Everything a view was asked to draw, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Messages(Chat),
    Recent(Vec<RecentChat>),
    ShowPending(ChatMessage),
    ClearPending,
    SubmitEnabled(bool),
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
}

impl RecordingView {
    pub fn last_submit_state(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            ViewCall::SubmitEnabled(enabled) => Some(*enabled),
            _ => None,
        })
    }

    pub fn pending_visible(&self) -> bool {
        let shown = self
            .calls
            .iter()
            .filter(|c| matches!(c, ViewCall::ShowPending(_)))
            .count();
        let cleared = self
            .calls
            .iter()
            .filter(|c| matches!(c, ViewCall::ClearPending))
            .count();
        shown > cleared
    }

    pub fn last_recent(&self) -> Option<&[RecentChat]> {
        self.calls.iter().rev().find_map(|c| match c {
            ViewCall::Recent(entries) => Some(entries.as_slice()),
            _ => None,
        })
    }
}

impl ChatView for RecordingView {
    fn render_messages(&mut self, chat: &Chat) {
        self.calls.push(ViewCall::Messages(chat.clone()));
    }

    fn render_recent(&mut self, entries: &[RecentChat]) {
        self.calls.push(ViewCall::Recent(entries.to_vec()));
    }

    fn show_pending(&mut self, placeholder: &ChatMessage) {
        self.calls.push(ViewCall::ShowPending(placeholder.clone()));
    }

    fn clear_pending(&mut self) {
        self.calls.push(ViewCall::ClearPending);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.calls.push(ViewCall::SubmitEnabled(enabled));
    }
}
