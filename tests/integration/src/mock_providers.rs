//! Mock upstream providers for integration testing
//!
//! Wiremock servers simulating the OpenAI and OpenRouter chat completion
//! APIs. Both speak the same wire format, so one mock type covers both with
//! different base URLs.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock chat-completions upstream.
pub struct MockUpstream {
    /// The underlying wiremock server
    pub server: MockServer,
}

impl MockUpstream {
    /// Start a new mock upstream
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to point a provider at
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Respond to every chat completion with the given content
    pub async fn mock_chat(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(chat_completion_response(content)),
            )
            .mount(&self.server)
            .await;
    }

    /// Respond with the given content after a delay
    pub async fn mock_chat_delayed(&self, content: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(chat_completion_response(content))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Respond with a rate limit error
    pub async fn mock_rate_limit(&self) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(error_response("rate_limit_exceeded", "Rate limit exceeded"))
                    .append_header("Retry-After", "60"),
            )
            .mount(&self.server)
            .await;
    }

    /// Respond with a server error
    pub async fn mock_server_error(&self) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(error_response("server_error", "Internal server error")),
            )
            .mount(&self.server)
            .await;
    }

    /// Respond with an authentication error
    pub async fn mock_auth_error(&self) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(error_response("invalid_api_key", "Incorrect API key provided")),
            )
            .mount(&self.server)
            .await;
    }

    /// Respond with a body that is not valid chat-completions JSON
    pub async fn mock_garbage(&self) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>bad gateway</html>"))
            .mount(&self.server)
            .await;
    }

    /// Requests the mock has received so far
    pub async fn received_requests(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |reqs| reqs.len())
    }
}

/// Build a chat-completions success body
pub fn chat_completion_response(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 9, "completion_tokens": 12, "total_tokens": 21}
    })
}

/// Build a chat-completions error body
pub fn error_response(code: &str, message: &str) -> Value {
    json!({
        "error": {"type": code, "code": code, "message": message}
    })
}
