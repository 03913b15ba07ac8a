//! HTTP request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use promptlink_core::{
    AgentDefinition, AgentResult, ChatMode, ChatRequest, ChatResponse, ProviderKind,
};
use promptlink_orchestrator::{workflow_catalog, WorkflowExecution, WorkflowTemplate};
use promptlink_telemetry::MonitoringStats;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::state::AppState;

const SERVICE_NAME: &str = "PromptLink Orchestration Engine";

/// Service banner returned from `/`.
pub async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "frontend_url": state.config.frontend_url,
        "endpoints": {
            "health": "/health",
            "agents": "/api/agents",
            "chat": "/api/chat",
            "models": "/api/chat/models",
            "workflows": "/api/workflows",
            "monitoring": "/api/monitoring/stats",
        },
    }))
}

/// Health check response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version
    pub version: String,
    /// Seconds since process start
    pub uptime_seconds: u64,
    /// When the check ran
    pub timestamp: DateTime<Utc>,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.tracker.stats().uptime_seconds,
        timestamp: Utc::now(),
    })
}

/// Agents listing response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct AgentsResponse {
    /// Always true
    pub success: bool,
    /// Registered agents in id order
    pub agents: Vec<AgentDefinition>,
    /// Total registered agents
    pub total: usize,
    /// Agents currently accepting requests
    pub active: usize,
}

/// List all registered agents
#[instrument(skip(state))]
pub async fn list_agents(State(state): State<AppState>) -> Json<AgentsResponse> {
    let registry = state.registry();
    let agents: Vec<AgentDefinition> = registry.definitions().cloned().collect();

    Json(AgentsResponse {
        success: true,
        total: agents.len(),
        active: registry.active_count(),
        agents,
    })
}

/// Get one agent by id
#[instrument(skip(state))]
pub async fn get_agent(
    State(state): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<Json<AgentDefinition>, ApiError> {
    state
        .registry()
        .get(&agent_id)
        .map(|a| Json(a.definition.clone()))
        .ok_or_else(|| ApiError::not_found(format!("Unknown agent: {agent_id}")))
}

/// Fan a chat message out to the requested agents
#[instrument(skip(state, body))]
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(format!("invalid JSON: {e}")))?;

    debug!(
        agents = request.agents.len(),
        mode = %request.mode,
        "Processing chat request"
    );

    let response = state
        .orchestrator
        .dispatch(&request.message, &request.agents, request.mode)
        .await?;

    record_outcomes(&state, &response);
    Ok(Json(response))
}

/// Single-agent chat request body.
#[derive(Debug, Serialize, Deserialize)]
pub struct SingleChatRequest {
    /// The user message
    pub message: String,
    /// Target agent id
    pub agent: String,
    /// Conversation mode
    #[serde(default)]
    pub mode: ChatMode,
}

/// Single-agent chat response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct SingleChatResponse {
    /// Always true
    pub success: bool,
    /// The agent's outcome
    pub response: AgentResult,
    /// Session correlation id
    pub session_id: String,
}

/// Convenience wrapper fanning out to exactly one agent
#[instrument(skip(state, body))]
pub async fn chat_single(
    State(state): State<AppState>,
    body: Result<Json<SingleChatRequest>, JsonRejection>,
) -> Result<Json<SingleChatResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(format!("invalid JSON: {e}")))?;

    let agents = vec![request.agent.clone()];
    let response = state
        .orchestrator
        .dispatch(&request.message, &agents, request.mode)
        .await?;

    record_outcomes(&state, &response);

    let result = response
        .responses
        .into_iter()
        .next()
        .map(|(_, result)| result)
        .ok_or_else(|| ApiError::internal("fan-out produced no result"))?;

    Ok(Json(SingleChatResponse {
        success: true,
        response: result,
        session_id: response.metadata.session_id,
    }))
}

fn record_outcomes(state: &AppState, response: &ChatResponse) {
    state
        .tracker
        .record_chat(Duration::from_millis(response.metadata.total_time_ms));
    for (agent_id, result) in &response.responses {
        state
            .tracker
            .record_agent_outcome(agent_id, result.is_success());
    }
}

/// One entry in the model listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Agent id
    pub id: String,
    /// Agent display name
    pub name: String,
    /// Upstream model identifier
    pub model: String,
    /// Backing provider
    pub provider: ProviderKind,
    /// Whether the provider has a credential configured
    pub available: bool,
}

/// Model listing response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    /// Always true
    pub success: bool,
    /// Models in agent id order
    pub models: Vec<ModelInfo>,
    /// Total models
    pub total: usize,
    /// Models whose provider has a credential
    pub available: usize,
}

/// List the upstream models behind the agents
pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    let credentials = &state.config.credentials;
    let models: Vec<ModelInfo> = state
        .registry()
        .definitions()
        .map(|definition| {
            let available = match definition.provider {
                ProviderKind::OpenAi => credentials.openai_api_key.is_some(),
                ProviderKind::OpenRouter => credentials.openrouter_api_key.is_some(),
            };
            ModelInfo {
                id: definition.id.clone(),
                name: definition.name.clone(),
                model: definition.model.clone(),
                provider: definition.provider,
                available,
            }
        })
        .collect();

    let available = models.iter().filter(|m| m.available).count();
    Json(ModelsResponse {
        success: true,
        total: models.len(),
        available,
        models,
    })
}

/// Workflow catalog response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkflowsResponse {
    /// Always true
    pub success: bool,
    /// Available templates
    pub workflows: Vec<WorkflowTemplate>,
    /// Number of templates
    pub total: usize,
}

/// List workflow templates
pub async fn list_workflows() -> Json<WorkflowsResponse> {
    let workflows = workflow_catalog().to_vec();
    Json(WorkflowsResponse {
        success: true,
        total: workflows.len(),
        workflows,
    })
}

/// Get one workflow template by id
pub async fn get_workflow(
    Path(workflow_id): Path<String>,
) -> Result<Json<WorkflowTemplate>, ApiError> {
    workflow_catalog()
        .iter()
        .find(|t| t.id == workflow_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Unknown workflow: {workflow_id}")))
}

/// One workflow category with its member templates.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkflowCategory {
    /// Category name
    pub name: String,
    /// Templates in the category (id, name, description)
    pub workflows: Vec<serde_json::Value>,
    /// Number of templates in the category
    pub count: usize,
}

/// Workflow categories response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkflowCategoriesResponse {
    /// Always true
    pub success: bool,
    /// Categories in first-seen order
    pub categories: Vec<WorkflowCategory>,
    /// Number of distinct categories
    pub total_categories: usize,
}

/// Group the workflow catalog by category
pub async fn workflow_categories() -> Json<WorkflowCategoriesResponse> {
    let mut categories: Vec<WorkflowCategory> = Vec::new();
    for template in workflow_catalog() {
        let entry = json!({
            "id": template.id,
            "name": template.name,
            "description": template.description,
        });
        match categories.iter_mut().find(|c| c.name == template.category) {
            Some(category) => {
                category.workflows.push(entry);
                category.count += 1;
            }
            None => categories.push(WorkflowCategory {
                name: template.category.clone(),
                workflows: vec![entry],
                count: 1,
            }),
        }
    }

    Json(WorkflowCategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories,
    })
}

/// Workflow catalog statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkflowStats {
    /// Number of templates
    pub total_workflows: usize,
    /// Steps across all templates
    pub total_steps: usize,
    /// Number of distinct categories
    pub total_categories: usize,
    /// When the stats were computed
    pub last_updated: DateTime<Utc>,
}

/// Workflow statistics response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkflowStatsResponse {
    /// Always true
    pub success: bool,
    /// Catalog statistics
    pub stats: WorkflowStats,
}

/// Summarize the workflow catalog
pub async fn workflow_stats() -> Json<WorkflowStatsResponse> {
    let catalog = workflow_catalog();
    let mut categories: Vec<&str> = catalog.iter().map(|t| t.category.as_str()).collect();
    categories.sort_unstable();
    categories.dedup();

    Json(WorkflowStatsResponse {
        success: true,
        stats: WorkflowStats {
            total_workflows: catalog.len(),
            total_steps: catalog.iter().map(|t| t.tasks.len()).sum(),
            total_categories: categories.len(),
            last_updated: Utc::now(),
        },
    })
}

/// Workflow execution request body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteWorkflowRequest {
    /// The user's topic, substituted into every step prompt
    pub input: String,
}

/// Execute a workflow template
#[instrument(skip(state, body))]
pub async fn execute_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
    body: Result<Json<ExecuteWorkflowRequest>, JsonRejection>,
) -> Result<Json<WorkflowExecution>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(format!("invalid JSON: {e}")))?;

    let template = workflow_catalog()
        .iter()
        .find(|t| t.id == workflow_id)
        .ok_or_else(|| ApiError::not_found(format!("Unknown workflow: {workflow_id}")))?;

    let execution = state
        .orchestrator
        .execute_workflow(template, &request.input)
        .await?;

    Ok(Json(execution))
}

/// Monitoring statistics endpoint
pub async fn monitoring_stats(State(state): State<AppState>) -> Json<MonitoringStats> {
    Json(state.tracker.stats())
}
