//! Per-answer feedback affordance.
//!
//! Offered after a delivered answer. The first choice is sent to the
//! [`FeedbackSink`] and collapses the affordance; later choices are ignored.

use parley_types::chat::ChatId;
use parley_types::feedback::{FeedbackChoice, FeedbackRequest, Rating};
use tracing::debug;

use crate::remote::FeedbackSink;

/// Whether the affordance still accepts a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AffordanceState {
    Open,
    Collapsed(Rating),
}

/// Result of [`FeedbackAffordance::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackResult {
    Sent(Rating),
    AlreadySubmitted,
    /// A comment with no text; the affordance stays open.
    EmptyComment,
}

/// Up/down/comment control for one question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackAffordance {
    chat_id: ChatId,
    chat_title: String,
    question: String,
    answer: String,
    state: AffordanceState,
}

impl FeedbackAffordance {
    pub fn new(chat_id: ChatId, chat_title: String, question: String, answer: String) -> Self {
        Self {
            chat_id,
            chat_title,
            question,
            answer,
            state: AffordanceState::Open,
        }
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn state(&self) -> AffordanceState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == AffordanceState::Open
    }

    /// Record the user's choice, sending it at most once.
    pub fn submit<F: FeedbackSink + ?Sized>(
        &mut self,
        sink: &F,
        choice: FeedbackChoice,
    ) -> FeedbackResult {
        if !self.is_open() {
            return FeedbackResult::AlreadySubmitted;
        }

        let rating = choice.rating();
        let comment = match choice {
            FeedbackChoice::Comment(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return FeedbackResult::EmptyComment;
                }
                Some(text.to_string())
            }
            FeedbackChoice::Up | FeedbackChoice::Down => None,
        };

        sink.submit(FeedbackRequest {
            chat_id: self.chat_id.clone(),
            chat_title: self.chat_title.clone(),
            question: self.question.clone(),
            answer: self.answer.clone(),
            rating,
            comment,
        });
        self.state = AffordanceState::Collapsed(rating);
        debug!(chat_id = %self.chat_id, %rating, "Feedback submitted");
        FeedbackResult::Sent(rating)
    }
}
