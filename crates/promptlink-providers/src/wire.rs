//! OpenAI chat-completions wire format.
//!
//! OpenRouter mirrors OpenAI's request and response shapes, so both provider
//! clients serialize through these types.

use promptlink_core::{ProviderError, ProviderReply, ProviderRequest, UpstreamErrorKind};
use serde::{Deserialize, Serialize};

/// Chat-completions request body.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatCompletionMessage>,
    /// Token budget for the reply
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

/// One conversation message.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletionMessage {
    /// `system`, `user`, or `assistant`
    pub role: String,
    /// Message text
    pub content: String,
}

/// Chat-completions response body. Fields we do not consume are ignored.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Generated choices; we use the first
    pub choices: Vec<ChatCompletionChoice>,
    /// Token usage, when the upstream reports it
    #[serde(default)]
    pub usage: Option<ChatCompletionUsage>,
}

/// One generated choice.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    /// The assistant message
    pub message: ChatCompletionMessage,
}

/// Token usage accounting.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionUsage {
    /// Total tokens for prompt plus completion
    #[serde(default)]
    pub total_tokens: u32,
}

impl ChatCompletionRequest {
    /// Build a request body from a provider request, flattening the optional
    /// system prompt into the message list.
    #[must_use]
    pub fn from_provider_request(request: &ProviderRequest) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system_prompt {
            messages.push(ChatCompletionMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatCompletionMessage {
            role: "user".to_string(),
            content: request.message.clone(),
        });

        Self {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

/// Parse a successful chat-completions body into a provider reply.
///
/// # Errors
/// Returns a `MalformedResponse` error when the body is not valid JSON or
/// contains no choices.
pub fn parse_reply(provider: &str, body: &str) -> Result<ProviderReply, ProviderError> {
    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::new(
            UpstreamErrorKind::MalformedResponse,
            format!("{provider} returned invalid JSON: {e}"),
        )
    })?;

    let choice = response.choices.into_iter().next().ok_or_else(|| {
        ProviderError::new(
            UpstreamErrorKind::MalformedResponse,
            format!("{provider} returned no choices"),
        )
    })?;

    Ok(ProviderReply {
        text: choice.message.content,
        tokens_used: response.usage.map_or(0, |u| u.total_tokens),
    })
}
