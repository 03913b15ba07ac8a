//! The static agent registry.
//!
//! Binds each agent id to its definition and a shared provider instance.
//! Built once at startup from configuration and handed to request handlers
//! behind an `Arc`; it is never mutated afterwards, so lookups need no
//! synchronization.

use crate::openai::{OpenAiConfig, OpenAiProvider};
use crate::openrouter::{OpenRouterConfig, OpenRouterProvider};
use promptlink_config::BackendConfig;
use promptlink_core::agent::default_agents;
use promptlink_core::{AgentDefinition, ChatProvider, OrchestratorError, ProviderKind};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// An agent together with the provider instance that serves it.
#[derive(Clone)]
pub struct RegisteredAgent {
    /// The agent's static definition
    pub definition: AgentDefinition,
    /// Provider client shared across agents of the same kind
    pub provider: Arc<dyn ChatProvider>,
}

/// Immutable registry of all known agents.
#[derive(Clone, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<String, RegisteredAgent>,
}

impl AgentRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent, replacing any previous binding for the same id
    pub fn register(&mut self, definition: AgentDefinition, provider: Arc<dyn ChatProvider>) {
        self.agents.insert(
            definition.id.clone(),
            RegisteredAgent {
                definition,
                provider,
            },
        );
    }

    /// Look up an agent by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RegisteredAgent> {
        self.agents.get(id)
    }

    /// All agent definitions, in id order
    pub fn definitions(&self) -> impl Iterator<Item = &AgentDefinition> {
        self.agents.values().map(|a| &a.definition)
    }

    /// All agent ids, in order
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.agents.keys().cloned().collect()
    }

    /// Number of registered agents
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Number of agents currently accepting requests
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.agents
            .values()
            .filter(|a| a.definition.is_active())
            .count()
    }

    /// Build the default five-agent registry from configuration.
    ///
    /// # Errors
    /// Returns an error if an HTTP client cannot be constructed. Missing API
    /// keys do not fail here; the affected agents fail per-request instead.
    pub fn from_config(config: &BackendConfig) -> Result<Self, OrchestratorError> {
        let openai: Arc<dyn ChatProvider> = Arc::new(OpenAiProvider::new(
            OpenAiConfig::new(config.credentials.openai_api_key.clone())
                .with_timeout(config.upstream.timeout),
        )?);

        let openrouter: Arc<dyn ChatProvider> = Arc::new(OpenRouterProvider::new(
            OpenRouterConfig::new(
                config.credentials.openrouter_api_key.clone(),
                config.frontend_url.clone(),
            )
            .with_timeout(config.upstream.timeout),
        )?);

        let mut registry = Self::new();
        for definition in default_agents() {
            let provider = match definition.provider {
                ProviderKind::OpenAi => Arc::clone(&openai),
                ProviderKind::OpenRouter => Arc::clone(&openrouter),
            };
            registry.register(definition, provider);
        }

        info!(agents = registry.len(), "Agent registry initialized");
        Ok(registry)
    }
}
