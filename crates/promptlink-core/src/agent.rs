//! The static agent model.
//!
//! An agent is a named binding to one upstream provider and model. The set of
//! agents is fixed at process start and shared read-only with request
//! handlers; nothing mutates it during a process lifetime.

use serde::{Deserialize, Serialize};

/// Which upstream API an agent is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions API
    OpenAi,
    /// OpenRouter chat completions API
    OpenRouter,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi => f.write_str("openai"),
            Self::OpenRouter => f.write_str("openrouter"),
        }
    }
}

/// Whether an agent is available for chat requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// The agent accepts requests
    #[default]
    Active,
    /// The agent is configured but disabled
    Inactive,
}

/// A configured binding to one upstream AI provider/model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Short string identifier (e.g. `"claude3.5"`)
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// Upstream provider the agent is bound to
    pub provider: ProviderKind,
    /// Upstream model identifier
    pub model: String,
    /// Capability tags surfaced to the frontend
    pub capabilities: Vec<String>,
    /// Display color used by the frontend
    pub color: String,
    /// Availability status
    #[serde(default)]
    pub status: AgentStatus,
}

impl AgentDefinition {
    /// Create a new agent definition
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        provider: ProviderKind,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            provider,
            model: model.into(),
            capabilities: Vec::new(),
            color: "gray".to_string(),
            status: AgentStatus::Active,
        }
    }

    /// Set capability tags
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: &[&str]) -> Self {
        self.capabilities = capabilities.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the display color
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Whether the agent currently accepts requests
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }
}

/// The five agents the frontend knows about.
///
/// Ids must stay in sync with the frontend's agent selector.
#[must_use]
pub fn default_agents() -> Vec<AgentDefinition> {
    vec![
        AgentDefinition::new(
            "claude3.5",
            "Claude 3.5 Sonnet",
            ProviderKind::OpenRouter,
            "anthropic/claude-3.5-sonnet",
        )
        .with_capabilities(&["reasoning", "analysis", "creative-writing"])
        .with_color("green"),
        AgentDefinition::new(
            "chatgpt4",
            "ChatGPT 4 Turbo",
            ProviderKind::OpenAi,
            "gpt-4-turbo-preview",
        )
        .with_capabilities(&["reasoning", "analysis", "code-generation"])
        .with_color("blue"),
        AgentDefinition::new(
            "llama3.3",
            "Llama 3.3",
            ProviderKind::OpenRouter,
            "meta-llama/llama-3.3-70b-instruct",
        )
        .with_capabilities(&["reasoning", "analysis", "multilingual"])
        .with_color("purple"),
        AgentDefinition::new(
            "mistral",
            "Mistral Large 2407",
            ProviderKind::OpenRouter,
            "mistralai/mistral-large-2407",
        )
        .with_capabilities(&["reasoning", "analysis", "code-generation"])
        .with_color("orange"),
        AgentDefinition::new(
            "gemini",
            "Gemini 2.0 Flash",
            ProviderKind::OpenRouter,
            "google/gemini-2.0-flash-exp",
        )
        .with_capabilities(&["reasoning", "analysis", "multimodal"])
        .with_color("red"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_agents_count() {
        let agents = default_agents();
        assert_eq!(agents.len(), 5);
        assert!(agents.iter().all(AgentDefinition::is_active));
    }

    #[test]
    fn test_default_agent_ids_unique() {
        let agents = default_agents();
        let mut ids: Vec<_> = agents.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_agent_serialization() {
        let agent = AgentDefinition::new(
            "claude3.5",
            "Claude 3.5 Sonnet",
            ProviderKind::OpenRouter,
            "anthropic/claude-3.5-sonnet",
        );
        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(json["id"], "claude3.5");
        assert_eq!(json["provider"], "openrouter");
        assert_eq!(json["status"], "active");
    }
}
