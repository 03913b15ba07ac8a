//! The fan-out aggregator.
//!
//! One task per requested agent, joined with a wait-all combinator. Every
//! invocation resolves to a tagged [`AgentResult`] rather than raising, so
//! aggregation is a pure fold over independent outcomes. Each call carries
//! its own timeout; total latency tracks the slowest single upstream call.
//! Dropping the dispatch future (client disconnect) cancels all still-pending
//! upstream calls with it.

use chrono::Utc;
use futures::future::join_all;
use promptlink_config::UpstreamConfig;
use promptlink_core::{
    AgentErrorKind, AgentFailure, AgentReply, AgentResult, ChatMetadata, ChatMode, ChatResponse,
    OrchestratorError, ProviderRequest,
};
use promptlink_providers::{AgentRegistry, RegisteredAgent};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Dispatches chat requests to agents and aggregates the outcomes.
#[derive(Clone)]
pub struct Orchestrator {
    registry: Arc<AgentRegistry>,
    upstream: UpstreamConfig,
}

impl Orchestrator {
    /// Create an orchestrator over a registry
    #[must_use]
    pub fn new(registry: Arc<AgentRegistry>, upstream: UpstreamConfig) -> Self {
        Self { registry, upstream }
    }

    /// The registry this orchestrator dispatches against
    #[must_use]
    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }

    /// Fan a message out to the requested agents and aggregate the results.
    ///
    /// The response mapping holds exactly one entry per distinct requested
    /// id. Unknown ids degrade to per-entry `unknown_agent` failures; only a
    /// malformed request (empty message or empty agent set) fails the call.
    ///
    /// # Errors
    /// Returns `InvalidRequest` when the message is empty or no agents were
    /// requested.
    #[instrument(skip(self, message), fields(agents = agent_ids.len(), mode = %mode))]
    pub async fn dispatch(
        &self,
        message: &str,
        agent_ids: &[String],
        mode: ChatMode,
    ) -> Result<ChatResponse, OrchestratorError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(OrchestratorError::invalid_request("message is required"));
        }
        if agent_ids.is_empty() {
            return Err(OrchestratorError::invalid_request(
                "at least one agent must be specified",
            ));
        }

        // Collapse duplicates, keeping first-seen order.
        let mut seen = HashSet::new();
        let distinct: Vec<&String> = agent_ids.iter().filter(|id| seen.insert(*id)).collect();

        let start = Instant::now();

        let invocations = distinct.iter().map(|id| {
            let id = (*id).clone();
            async move {
                let result = match self.registry.get(&id) {
                    Some(agent) => self.invoke_agent(agent, message, mode).await,
                    None => {
                        warn!(agent = %id, "Requested agent is not registered");
                        AgentResult::Error(AgentFailure::new(
                            AgentErrorKind::UnknownAgent,
                            format!("Unknown agent: {id}"),
                        ))
                    }
                };
                (id, result)
            }
        });

        let outcomes = join_all(invocations).await;
        let total_time = start.elapsed();

        let responses: BTreeMap<String, AgentResult> = outcomes.into_iter().collect();
        let successful = responses.values().filter(|r| r.is_success()).count();

        info!(
            agents = responses.len(),
            successful,
            total_time_ms = total_time.as_millis() as u64,
            "Fan-out complete"
        );

        Ok(ChatResponse {
            success: true,
            metadata: ChatMetadata {
                total_agents: responses.len(),
                successful_responses: successful,
                total_time_ms: total_time.as_millis() as u64,
                mode,
                orchestration_time: Utc::now(),
                session_id: format!("session_{}", Uuid::new_v4().simple()),
            },
            responses,
        })
    }

    /// Invoke one agent, capturing any failure into its result slot.
    async fn invoke_agent(
        &self,
        agent: &RegisteredAgent,
        message: &str,
        mode: ChatMode,
    ) -> AgentResult {
        let definition = &agent.definition;
        let request = ProviderRequest::new(&definition.model, message)
            .with_system_prompt(mode.system_prompt())
            .with_max_tokens(self.upstream.max_tokens)
            .with_temperature(self.upstream.temperature);

        debug!(agent = %definition.id, provider = %definition.provider, "Invoking agent");

        let start = Instant::now();

        // The provider's HTTP client has its own timeout; this outer guard
        // bounds the whole invocation regardless of where it stalls.
        let outcome =
            tokio::time::timeout(self.upstream.timeout, agent.provider.chat(&request)).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(Ok(reply)) => {
                debug!(
                    agent = %definition.id,
                    elapsed_ms,
                    tokens = reply.tokens_used,
                    "Agent responded"
                );
                AgentResult::Success(AgentReply {
                    response: reply.text,
                    agent: definition.name.clone(),
                    model: definition.model.clone(),
                    tokens_used: reply.tokens_used,
                    response_time_ms: elapsed_ms,
                })
            }
            Ok(Err(err)) => {
                warn!(agent = %definition.id, error = %err, "Agent call failed");
                AgentResult::Error(
                    AgentFailure::new(AgentErrorKind::UpstreamFailure(err.kind), err.message)
                        .with_agent(&definition.name)
                        .with_elapsed_ms(elapsed_ms),
                )
            }
            Err(_) => {
                warn!(agent = %definition.id, elapsed_ms, "Agent call timed out");
                AgentResult::Error(
                    AgentFailure::new(
                        AgentErrorKind::UpstreamFailure(
                            promptlink_core::UpstreamErrorKind::Timeout,
                        ),
                        format!(
                            "no response from {} within {}s",
                            definition.name,
                            self.upstream.timeout.as_secs()
                        ),
                    )
                    .with_agent(&definition.name)
                    .with_elapsed_ms(elapsed_ms),
                )
            }
        }
    }
}
