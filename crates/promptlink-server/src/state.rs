//! Shared application state.

use promptlink_config::BackendConfig;
use promptlink_orchestrator::Orchestrator;
use promptlink_providers::AgentRegistry;
use promptlink_telemetry::RequestTracker;
use std::sync::Arc;

/// State shared across request handlers.
///
/// Everything here is either immutable after startup (config, registry) or
/// internally synchronized (tracker), so cloning is cheap and handlers need
/// no locking of their own.
#[derive(Clone)]
pub struct AppState {
    /// Backend configuration
    pub config: Arc<BackendConfig>,
    /// Fan-out orchestrator over the agent registry
    pub orchestrator: Orchestrator,
    /// Request counters for the monitoring endpoint
    pub tracker: Arc<RequestTracker>,
}

impl AppState {
    /// Create a builder
    #[must_use]
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::default()
    }

    /// The agent registry behind the orchestrator
    #[must_use]
    pub fn registry(&self) -> &Arc<AgentRegistry> {
        self.orchestrator.registry()
    }
}

/// Builder for [`AppState`].
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<BackendConfig>,
    registry: Option<AgentRegistry>,
}

impl AppStateBuilder {
    /// Set the configuration
    #[must_use]
    pub fn config(mut self, config: BackendConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the agent registry
    #[must_use]
    pub fn registry(mut self, registry: AgentRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the state, filling in defaults for anything unset
    #[must_use]
    pub fn build(self) -> AppState {
        let config = self.config.unwrap_or_default();
        let registry = self.registry.unwrap_or_default();
        let orchestrator =
            Orchestrator::new(Arc::new(registry), config.upstream.clone());

        AppState {
            config: Arc::new(config),
            orchestrator,
            tracker: Arc::new(RequestTracker::new()),
        }
    }
}
