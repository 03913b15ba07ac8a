//! Error types for the orchestration backend.
//!
//! Failures fall into two layers. Request-level errors (`OrchestratorError`)
//! abort the whole call and map to HTTP error responses. Per-agent failures
//! are data, not exceptions: they are captured into that agent's slot of the
//! response mapping as an [`AgentErrorKind`] and never cross the aggregation
//! boundary as a raised error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request-level errors that fail the entire call.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The request itself was malformed (empty message, empty agent set)
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// A requested resource does not exist
    #[error("not found: {message}")]
    NotFound {
        /// Human-readable description
        message: String,
    },

    /// The backend is misconfigured
    #[error("configuration error: {message}")]
    Configuration {
        /// Human-readable description
        message: String,
    },

    /// An unexpected internal failure
    #[error("internal error: {message}")]
    Internal {
        /// Human-readable description
        message: String,
    },
}

impl OrchestratorError {
    /// Create an `InvalidRequest` error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a `NotFound` error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a `Configuration` error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an `Internal` error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Classification of an upstream provider failure.
///
/// Captured per agent; the raw upstream error never reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamErrorKind {
    /// The upstream call exceeded its timeout
    Timeout,
    /// The upstream returned 429
    RateLimited,
    /// The upstream rejected our credentials, or none were configured
    AuthFailed,
    /// The upstream returned a body we could not interpret
    MalformedResponse,
    /// The upstream was unreachable or returned a server error
    Unavailable,
}

impl std::fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Timeout => "timeout",
            Self::RateLimited => "rate_limited",
            Self::AuthFailed => "auth_failed",
            Self::MalformedResponse => "malformed_response",
            Self::Unavailable => "unavailable",
        };
        f.write_str(s)
    }
}

/// The kind of a per-agent error entry in a chat response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentErrorKind {
    /// The requested agent id is not in the registry
    UnknownAgent,
    /// The agent's upstream call failed, with a classification
    UpstreamFailure(UpstreamErrorKind),
}

impl AgentErrorKind {
    /// Wire name for the error kind
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownAgent => "unknown_agent",
            Self::UpstreamFailure(_) => "upstream_failure",
        }
    }

    /// Upstream classification, if this is an upstream failure
    #[must_use]
    pub fn classification(&self) -> Option<UpstreamErrorKind> {
        match self {
            Self::UnknownAgent => None,
            Self::UpstreamFailure(kind) => Some(*kind),
        }
    }
}
