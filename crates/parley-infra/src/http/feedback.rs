//! HttpFeedbackSink -- fire-and-forget [`FeedbackSink`] over `POST /api/feedback`.

use std::time::Duration;

use parley_core::remote::FeedbackSink;
use parley_types::error::RemoteError;
use parley_types::feedback::FeedbackRequest;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::endpoint;

/// Path of the feedback endpoint, relative to the configured base URL.
pub const FEEDBACK_PATH: &str = "/api/feedback";

/// Feedback requests are small; they get a short fixed timeout.
const FEEDBACK_TIMEOUT: Duration = Duration::from_secs(15);

/// Sends ratings on a spawned task and never reports back to the caller.
#[derive(Clone)]
pub struct HttpFeedbackSink {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedbackSink {
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(FEEDBACK_TIMEOUT)
            .build()
            .map_err(|e| RemoteError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: endpoint(base_url, FEEDBACK_PATH),
        })
    }

    /// Spawn the POST and hand back its task handle.
    ///
    /// Returns `None` outside a tokio runtime, in which case the rating is
    /// dropped with a warning.
    pub fn spawn(&self, request: FeedbackRequest) -> Option<JoinHandle<()>> {
        let Ok(handle) = Handle::try_current() else {
            warn!("No async runtime, dropping feedback");
            return None;
        };

        let client = self.client.clone();
        let url = self.url.clone();
        Some(handle.spawn(async move {
            let chat_id = request.chat_id.clone();
            let rating = request.rating;
            match client.post(&url).json(&request).send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(%chat_id, %rating, "Feedback recorded");
                }
                Ok(response) => {
                    warn!(%chat_id, status = %response.status(), "Feedback rejected");
                }
                Err(e) => {
                    warn!(%chat_id, error = %e, "Feedback request failed");
                }
            }
        }))
    }
}

impl FeedbackSink for HttpFeedbackSink {
    fn submit(&self, request: FeedbackRequest) {
        let _ = self.spawn(request);
    }
}
