//! Answer feedback types.
//!
//! A `FeedbackRequest` is the body posted to `/api/feedback` once the user
//! rates a delivered answer.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::chat::ChatId;

/// How the user rated an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Up,
    Down,
    Comment,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Up => write!(f, "up"),
            Rating::Down => write!(f, "down"),
            Rating::Comment => write!(f, "comment"),
        }
    }
}

/// The user's pick on a feedback affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackChoice {
    Up,
    Down,
    Comment(String),
}

impl FeedbackChoice {
    pub fn rating(&self) -> Rating {
        match self {
            FeedbackChoice::Up => Rating::Up,
            FeedbackChoice::Down => Rating::Down,
            FeedbackChoice::Comment(_) => Rating::Comment,
        }
    }
}

/// Body of a feedback submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub chat_id: ChatId,
    pub chat_title: String,
    pub question: String,
    pub answer: String,
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
