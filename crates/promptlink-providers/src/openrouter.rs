//! OpenRouter provider implementation.
//!
//! OpenRouter fronts most of the agent roster (Claude, Llama, Mistral,
//! Gemini) behind one chat completions API at `https://openrouter.ai/api/v1`.
//! It expects `HTTP-Referer` and `X-Title` headers identifying the calling
//! application in addition to the bearer key.

use crate::openai::classify_transport_error;
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

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// OpenRouter provider configuration.
#[derive(Clone)]
pub struct OpenRouterConfig {
    /// API key; `None` means every call fails with an auth classification
    pub api_key: Option<SecretString>,
    /// API base URL (overridable for tests)
    pub base_url: String,
    /// Referer URL identifying the frontend
    pub referer: String,
    /// Application title sent as `X-Title`
    pub title: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl OpenRouterConfig {
    /// Create a configuration with the production base URL
    #[must_use]
    pub fn new(api_key: Option<SecretString>, referer: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: referer.into(),
            title: "PromptLink Orchestration Engine".to_string(),
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

impl std::fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("api_key", &self.api_key.is_some())
            .field("base_url", &self.base_url)
            .field("referer", &self.referer)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// OpenRouter chat provider.
pub struct OpenRouterProvider {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new(config: OpenRouterConfig) -> Result<Self, OrchestratorError> {
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
impl ChatProvider for OpenRouterProvider {
    fn id(&self) -> &str {
        "openrouter"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenRouter
    }

    async fn chat(&self, request: &ProviderRequest) -> Result<ProviderReply, ProviderError> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            ProviderError::new(
                UpstreamErrorKind::AuthFailed,
                "no OpenRouter API key configured",
            )
        })?;

        let url = format!("{}/chat/completions", self.config.base_url);
        let body = ChatCompletionRequest::from_provider_request(request);

        debug!(
            provider = "openrouter",
            model = %request.model,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "openrouter", error = %e, "request failed");
                classify_transport_error("openrouter", &e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ProviderError::new(
                UpstreamErrorKind::MalformedResponse,
                format!("failed to read OpenRouter response: {e}"),
            )
        })?;

        trace!(provider = "openrouter", status = %status, "Received response");

        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16(), &text));
        }

        wire::parse_reply("openrouter", &text)
    }
}
