//! HttpReplyClient -- [`ReplyClient`] over `POST /api/chat`.

use std::time::Duration;

use parley_core::remote::ReplyClient;
use parley_types::error::RemoteError;
use parley_types::reply::{ReplyPayload, ReplyRequest};

use super::endpoint;

/// Path of the reply endpoint, relative to the configured base URL.
pub const CHAT_PATH: &str = "/api/chat";

/// Reply service client.
///
/// The timeout applies to the whole request, body included. An elapsed
/// timeout surfaces as [`RemoteError::Timeout`].
#[derive(Clone)]
pub struct HttpReplyClient {
    client: reqwest::Client,
    url: String,
}

impl HttpReplyClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: endpoint(base_url, CHAT_PATH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn map_transport_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout
    } else {
        RemoteError::Network(e.to_string())
    }
}

impl ReplyClient for HttpReplyClient {
    #[tracing::instrument(name = "reply_request", skip_all, fields(chat_id = %request.chat_id))]
    async fn send(&self, request: &ReplyRequest) -> Result<ReplyPayload, RemoteError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Reply service returned an error status");
            return Err(RemoteError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice::<ReplyPayload>(&body)
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::chat::ChatId;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(chat_id: ChatId) -> ReplyRequest {
        ReplyRequest {
            prompt: "What is Rust?".to_string(),
            chat_id,
            chat_title: "What is Rust?".to_string(),
        }
    }

    fn client(server: &MockServer, timeout: Duration) -> HttpReplyClient {
        HttpReplyClient::new(&server.uri(), timeout).unwrap()
    }

    #[tokio::test]
    async fn test_posts_prompt_and_reads_reply() {
        let server = MockServer::start().await;
        let chat_id = ChatId::new();
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .and(body_json(json!({
                "prompt": "What is Rust?",
                "chatId": chat_id.to_string(),
                "chatTitle": "What is Rust?",
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"bot_reply": "A language."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let payload = client(&server, Duration::from_secs(5))
            .send(&request(chat_id))
            .await
            .unwrap();
        assert_eq!(payload.bot_reply.as_deref(), Some("A language."));
    }

    #[tokio::test]
    async fn test_missing_reply_field_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let payload = client(&server, Duration::from_secs(5))
            .send(&request(ChatId::new()))
            .await
            .unwrap();
        assert!(payload.bot_reply.is_none());
    }

    #[tokio::test]
    async fn test_error_status_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_secs(5))
            .send(&request(ChatId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Status(503)));
    }

    #[tokio::test]
    async fn test_invalid_body_maps_to_decode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_secs(5))
            .send(&request(ChatId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Decode(_)));
    }

    #[tokio::test]
    async fn test_slow_service_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"bot_reply": "late"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = client(&server, Duration::from_millis(200))
            .send(&request(ChatId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Timeout));
    }

    #[tokio::test]
    async fn test_unreachable_service_maps_to_network() {
        // Bind then drop a listener to get a port nobody is serving.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client =
            HttpReplyClient::new(&format!("http://127.0.0.1:{port}"), Duration::from_secs(2)).unwrap();

        let err = client.send(&request(ChatId::new())).await.unwrap_err();
        assert!(matches!(err, RemoteError::Network(_)));
    }
}
