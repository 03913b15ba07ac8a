//! # PromptLink Config
//!
//! Environment-driven configuration for the orchestration backend.
//!
//! The backend is deployed behind platforms that inject configuration through
//! environment variables only, so there is no config file layer: everything
//! is read once at startup by [`load_config`] and shared read-only.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use secrecy::SecretString;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value we could not parse
    #[error("invalid value for {var}: {message}")]
    InvalidValue {
        /// Variable name
        var: String,
        /// What was wrong with it
        message: String,
    },
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Upstream call settings shared by all providers.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Per-call timeout; one slow provider must not stall the fan-out
    pub timeout: Duration,
    /// Token budget per upstream reply
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_tokens: 1000,
            temperature: 0.7,
        }
    }
}

/// Provider credentials. Absent keys are tolerated at startup; the affected
/// agents fail per-request with an auth classification instead.
#[derive(Clone, Default)]
pub struct CredentialsConfig {
    /// OpenAI API key
    pub openai_api_key: Option<SecretString>,
    /// OpenRouter API key
    pub openrouter_api_key: Option<SecretString>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("openai_api_key", &self.openai_api_key.is_some())
            .field("openrouter_api_key", &self.openrouter_api_key.is_some())
            .finish()
    }
}

/// Top-level backend configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Upstream call settings
    pub upstream: UpstreamConfig,
    /// Provider credentials
    pub credentials: CredentialsConfig,
    /// Frontend origin, sent to OpenRouter as the referer
    pub frontend_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            credentials: CredentialsConfig::default(),
            frontend_url: "https://promptlink-enhanced.netlify.app".to_string(),
        }
    }
}

impl BackendConfig {
    /// Set the bind port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.server.port = port;
        self
    }

    /// Set the per-call upstream timeout
    #[must_use]
    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream.timeout = timeout;
        self
    }

    /// Set the frontend origin URL
    #[must_use]
    pub fn with_frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = url.into();
        self
    }
}

/// Load configuration from the process environment.
///
/// # Errors
/// Returns an error when a variable is present but unparseable. Missing
/// variables fall back to defaults; missing API keys only log a warning.
pub fn load_config() -> Result<BackendConfig, ConfigError> {
    let mut config = BackendConfig::default();

    if let Ok(host) = env::var("HOST") {
        config.server.host = host;
    }
    if let Some(port) = parse_var("PORT")? {
        config.server.port = port;
    }
    if let Some(secs) = parse_var::<u64>("PROMPTLINK_UPSTREAM_TIMEOUT_SECS")? {
        config.upstream.timeout = Duration::from_secs(secs);
    }
    if let Some(max_tokens) = parse_var("PROMPTLINK_MAX_TOKENS")? {
        config.upstream.max_tokens = max_tokens;
    }
    if let Some(temperature) = parse_var("PROMPTLINK_TEMPERATURE")? {
        config.upstream.temperature = temperature;
    }

    if let Ok(url) = env::var("FRONTEND_URL") {
        Url::parse(&url).map_err(|e| ConfigError::InvalidValue {
            var: "FRONTEND_URL".to_string(),
            message: e.to_string(),
        })?;
        config.frontend_url = url;
    }

    config.credentials.openai_api_key = read_key("OPENAI_API_KEY");
    config.credentials.openrouter_api_key = read_key("OPENROUTER_API_KEY");

    Ok(config)
}

fn read_key(var: &str) -> Option<SecretString> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(SecretString::new(value)),
        _ => {
            warn!(var, "API key not set; bound agents will fail per-request");
            None
        }
    }
}

fn parse_var<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                var: var.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
