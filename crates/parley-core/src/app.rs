//! Event dispatcher wiring the chat components together.
//!
//! `ChatApp` owns the session, the message flow, and the feedback sink, and
//! turns UI events into state transitions followed by a redraw. Front-ends
//! translate their input into [`UiEvent`]s and never touch the session
//! directly.

use parley_types::chat::ChatId;
use parley_types::error::ChatError;
use parley_types::feedback::FeedbackChoice;
use tracing::debug;

use crate::chat::controller::{init_chat_session, new_chat, select_chat, ActiveChatOutcome};
use crate::chat::feedback::{FeedbackAffordance, FeedbackResult};
use crate::chat::flow::{MessageFlowController, TurnOutcome, TurnRejected};
use crate::chat::recent::{build_recent_list, RecentChat, DEFAULT_RECENT_LIMIT};
use crate::chat::session::ChatSession;
use crate::remote::{FeedbackSink, ReplyClient};
use crate::storage::kv_store::KvStore;
use crate::view::ChatView;

/// Input events a front-end can raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Submit(String),
    NewChat,
    SelectChat(ChatId),
    Feedback(FeedbackChoice),
    Refresh,
}

/// What handling an event produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered { answer: String, feedback_offered: bool },
    Failed,
    Rejected(TurnRejected),
    ActiveChat(ActiveChatOutcome),
    Selected(ChatId),
    SelectFailed(ChatError),
    Feedback(FeedbackResult),
    NoFeedbackPending,
    Refreshed,
}

/// Options the dispatcher reads from configuration.
#[derive(Debug, Clone, Copy)]
pub struct AppOptions {
    pub recent_limit: usize,
    pub feedback_enabled: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
            feedback_enabled: true,
        }
    }
}

/// The running chat application.
pub struct ChatApp<K, R, F, V>
where
    K: KvStore,
    R: ReplyClient,
    F: FeedbackSink,
    V: ChatView,
{
    session: ChatSession<K>,
    flow: MessageFlowController<R, V>,
    feedback_sink: F,
    feedback: Option<FeedbackAffordance>,
    options: AppOptions,
}

impl<K, R, F, V> ChatApp<K, R, F, V>
where
    K: KvStore,
    R: ReplyClient,
    F: FeedbackSink,
    V: ChatView,
{
    /// Resolve the active chat and draw the initial screen.
    ///
    /// With `force_new` the "new chat" action runs in place of the startup
    /// resolution.
    pub async fn start(
        mut session: ChatSession<K>,
        flow: MessageFlowController<R, V>,
        feedback_sink: F,
        options: AppOptions,
        force_new: bool,
    ) -> (Self, ActiveChatOutcome) {
        let outcome = if force_new {
            new_chat(&mut session).await
        } else {
            init_chat_session(&mut session).await
        };

        let mut app = Self {
            session,
            flow,
            feedback_sink,
            feedback: None,
            options,
        };
        app.redraw();
        (app, outcome)
    }

    pub fn session(&self) -> &ChatSession<K> {
        &self.session
    }

    pub fn view(&self) -> &V {
        self.flow.view()
    }

    pub fn view_mut(&mut self) -> &mut V {
        self.flow.view_mut()
    }

    pub fn feedback_sink(&self) -> &F {
        &self.feedback_sink
    }

    /// The affordance for the most recent delivered answer, if any.
    pub fn pending_feedback(&self) -> Option<&FeedbackAffordance> {
        self.feedback.as_ref()
    }

    /// Current recent-chats list.
    pub fn recent(&self) -> Vec<RecentChat> {
        build_recent_list(
            self.session.store().chats(),
            self.session.active_chat_id(),
            self.options.recent_limit,
        )
    }

    /// Handle one UI event to completion.
    pub async fn dispatch(&mut self, event: UiEvent) -> DispatchOutcome {
        debug!(?event, "Dispatching UI event");
        match event {
            UiEvent::Submit(text) => self.submit(&text).await,
            UiEvent::NewChat => {
                self.feedback = None;
                let outcome = new_chat(&mut self.session).await;
                self.redraw();
                DispatchOutcome::ActiveChat(outcome)
            }
            UiEvent::SelectChat(id) => match select_chat(&mut self.session, &id).await {
                Ok(()) => {
                    self.feedback = None;
                    self.redraw();
                    DispatchOutcome::Selected(id)
                }
                Err(e) => DispatchOutcome::SelectFailed(e),
            },
            UiEvent::Feedback(choice) => match self.feedback.as_mut() {
                Some(affordance) => {
                    DispatchOutcome::Feedback(affordance.submit(&self.feedback_sink, choice))
                }
                None => DispatchOutcome::NoFeedbackPending,
            },
            UiEvent::Refresh => {
                self.redraw();
                DispatchOutcome::Refreshed
            }
        }
    }

    async fn submit(&mut self, text: &str) -> DispatchOutcome {
        let outcome = match self.flow.send_prompt(&mut self.session, text).await {
            Ok(outcome) => outcome,
            Err(rejected) => return DispatchOutcome::Rejected(rejected),
        };
        self.feedback = None;
        self.redraw();

        match outcome {
            TurnOutcome::Delivered { answer, feedback } => {
                let feedback_offered = self.options.feedback_enabled;
                if feedback_offered {
                    self.feedback = Some(feedback);
                }
                DispatchOutcome::Delivered {
                    answer,
                    feedback_offered,
                }
            }
            TurnOutcome::Failed => DispatchOutcome::Failed,
        }
    }

    fn redraw(&mut self) {
        self.flow.refresh(&self.session, self.options.recent_limit);
    }
}
