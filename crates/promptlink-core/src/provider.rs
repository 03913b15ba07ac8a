//! The `ChatProvider` trait abstracting upstream LLM APIs.
//!
//! Providers are the only components that perform outbound network calls. A
//! provider takes one flattened prompt and returns either the reply text with
//! token usage, or a classified [`ProviderError`] that the aggregator folds
//! into the failing agent's result slot.

use crate::agent::ProviderKind;
use crate::error::UpstreamErrorKind;
use async_trait::async_trait;
use thiserror::Error;

/// A single upstream chat invocation.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Upstream model identifier
    pub model: String,
    /// Optional system prompt prepended to the conversation
    pub system_prompt: Option<String>,
    /// The user message
    pub message: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl ProviderRequest {
    /// Create a request with the backend's default sampling parameters
    pub fn new(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: None,
            message: message.into(),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }

    /// Set the system prompt
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the token limit
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// A successful upstream reply.
#[derive(Debug, Clone)]
pub struct ProviderReply {
    /// The model's response text
    pub text: String,
    /// Total tokens reported by the upstream, when available
    pub tokens_used: u32,
}

/// A classified upstream failure.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct ProviderError {
    /// Failure classification
    pub kind: UpstreamErrorKind,
    /// Human-readable description
    pub message: String,
    /// Upstream HTTP status, when one was received
    pub status: Option<u16>,
}

impl ProviderError {
    /// Create a provider error
    pub fn new(kind: UpstreamErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    /// Attach the upstream HTTP status
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Classify an upstream HTTP status code
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 | 403 => UpstreamErrorKind::AuthFailed,
            429 => UpstreamErrorKind::RateLimited,
            _ => UpstreamErrorKind::Unavailable,
        };
        // Upstream bodies can be large; keep the captured message bounded.
        let detail: String = body.chars().take(200).collect();
        Self {
            kind,
            message: format!("upstream returned status {status}: {detail}"),
            status: Some(status),
        }
    }
}

/// An upstream LLM provider.
///
/// Implementations must be cheap to share (`Arc`) and safe to call
/// concurrently; the aggregator issues overlapping calls from parallel tasks.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider instance id
    fn id(&self) -> &str;

    /// Which upstream API this provider speaks
    fn kind(&self) -> ProviderKind;

    /// Send one chat message and return the reply
    async fn chat(&self, request: &ProviderRequest) -> Result<ProviderReply, ProviderError>;
}
