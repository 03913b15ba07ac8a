//! OpenAI provider implementation.
//!
//! Calls the chat completions API at `https://api.openai.com/v1`.

use crate::wire::{self, ChatCompletionRequest};
use async_trait::async_trait;
use promptlink_core::{
    ChatProvider, OrchestratorError, ProviderError, ProviderKind, ProviderReply, ProviderRequest,
    UpstreamErrorKind,
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, error, trace};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI provider configuration.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// API key; `None` means every call fails with an auth classification
    pub api_key: Option<SecretString>,
    /// API base URL (overridable for tests)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Create a configuration with the production base URL
    #[must_use]
    pub fn new(api_key: Option<SecretString>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.is_some())
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// OpenAI chat provider.
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new(config: OpenAiConfig) -> Result<Self, OrchestratorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                OrchestratorError::internal(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn id(&self) -> &str {
        "openai"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn chat(&self, request: &ProviderRequest) -> Result<ProviderReply, ProviderError> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            ProviderError::new(
                UpstreamErrorKind::AuthFailed,
                "no OpenAI API key configured",
            )
        })?;

        let url = format!("{}/chat/completions", self.config.base_url);
        let body = ChatCompletionRequest::from_provider_request(request);

        debug!(
            provider = "openai",
            model = %request.model,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "openai", error = %e, "request failed");
                classify_transport_error("openai", &e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ProviderError::new(
                UpstreamErrorKind::MalformedResponse,
                format!("failed to read OpenAI response: {e}"),
            )
        })?;

        trace!(provider = "openai", status = %status, "Received response");

        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16(), &text));
        }

        wire::parse_reply("openai", &text)
    }
}

/// Classify a reqwest transport error.
pub(crate) fn classify_transport_error(provider: &str, error: &reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::new(
            UpstreamErrorKind::Timeout,
            format!("{provider} request timed out"),
        )
    } else {
        ProviderError::new(
            UpstreamErrorKind::Unavailable,
            format!("{provider} request failed: {error}"),
        )
    }
}
