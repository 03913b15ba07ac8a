//! Chat request and response types.
//!
//! A chat request carries one user message and the set of agents it should be
//! fanned out to. The response maps every requested agent id to a tagged
//! outcome: either a successful reply or a classified failure scoped to that
//! agent alone.

use crate::error::{AgentErrorKind, UpstreamErrorKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Conversation mode, selecting the system prompt sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Open-ended assistance
    #[default]
    Free,
    /// Structured debate with a clear position
    Debate,
    /// Creative idea generation
    Brainstorm,
    /// Strategic planning with actionable steps
    Plan,
}

impl ChatMode {
    /// System prompt sent to the upstream model for this mode
    #[must_use]
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Self::Debate => {
                "You are participating in a structured debate. Take a clear position and provide well-reasoned arguments."
            }
            Self::Brainstorm => {
                "You are in a creative brainstorming session. Generate innovative ideas and build upon concepts."
            }
            Self::Plan => {
                "You are helping create a strategic plan. Focus on actionable steps and practical implementation."
            }
            Self::Free => {
                "You are an AI assistant ready to help with any task. Respond naturally and helpfully."
            }
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Free => "free",
            Self::Debate => "debate",
            Self::Brainstorm => "brainstorm",
            Self::Plan => "plan",
        };
        f.write_str(s)
    }
}

/// Incoming chat request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user message to fan out
    pub message: String,
    /// Requested agent ids; duplicates are collapsed
    pub agents: Vec<String>,
    /// Conversation mode (defaults to `free`)
    #[serde(default)]
    pub mode: ChatMode,
}

/// A successful reply from one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReply {
    /// The model's response text
    pub response: String,
    /// Display name of the agent that answered
    pub agent: String,
    /// Upstream model that produced the reply
    pub model: String,
    /// Total tokens the upstream reported for the exchange
    pub tokens_used: u32,
    /// Wall-clock time of the upstream call in milliseconds
    pub response_time_ms: u64,
}

/// A failure scoped to one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentFailure {
    /// Error kind (`unknown_agent` or `upstream_failure`)
    pub kind: String,
    /// Upstream failure classification, when the kind is `upstream_failure`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<UpstreamErrorKind>,
    /// Human-readable description; never the raw upstream exception
    pub error: String,
    /// Display name of the agent, when the id was recognized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Wall-clock time spent before failing, in milliseconds
    pub response_time_ms: u64,
}

impl AgentFailure {
    /// Build a failure entry from an error kind and message
    pub fn new(kind: AgentErrorKind, error: impl Into<String>) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            classification: kind.classification(),
            error: error.into(),
            agent: None,
            response_time_ms: 0,
        }
    }

    /// Attach the agent display name
    #[must_use]
    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// Attach the elapsed time
    #[must_use]
    pub fn with_elapsed_ms(mut self, elapsed_ms: u64) -> Self {
        self.response_time_ms = elapsed_ms;
        self
    }
}

/// Outcome of one agent invocation: success or an isolated failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AgentResult {
    /// The agent answered
    Success(AgentReply),
    /// The agent failed; other agents are unaffected
    Error(AgentFailure),
}

impl AgentResult {
    /// Whether this outcome is a success
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The response text, when successful
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success(reply) => Some(&reply.response),
            Self::Error(_) => None,
        }
    }
}

/// Orchestration metadata attached to every chat response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMetadata {
    /// Number of agents the request was fanned out to
    pub total_agents: usize,
    /// Number of agents that answered successfully
    pub successful_responses: usize,
    /// Wall-clock time for the whole fan-out in milliseconds
    pub total_time_ms: u64,
    /// Conversation mode the request ran under
    pub mode: ChatMode,
    /// When the orchestration completed
    pub orchestration_time: DateTime<Utc>,
    /// Opaque id for correlating frontend sessions
    pub session_id: String,
}

/// Aggregated chat response: one entry per requested agent id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Always true; request-level failures use the error envelope instead
    pub success: bool,
    /// Mapping from agent id to that agent's outcome
    pub responses: BTreeMap<String, AgentResult>,
    /// Orchestration metadata
    pub metadata: ChatMetadata,
}
