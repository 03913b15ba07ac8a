//! Templated multi-agent workflow sessions.
//!
//! A workflow is an ordered list of steps, each with a prompt template and
//! its own agent set. Execution substitutes the user's input into each
//! template and runs the steps sequentially, fanning each step out through
//! the aggregator. Within a step agents still run concurrently; across steps
//! order is preserved so later prompts can assume earlier topics were
//! covered.

use crate::fanout::Orchestrator;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use promptlink_core::{AgentResult, ChatMode, OrchestratorError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{info, instrument};

/// One step of a workflow template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// 1-based step number
    pub step: u32,
    /// Short step title
    pub title: String,
    /// What the step accomplishes
    pub description: String,
    /// Prompt with a `{user_input}` placeholder
    pub prompt_template: String,
    /// Agents the step fans out to
    pub agents: Vec<String>,
}

/// A reusable workflow template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    /// Template identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// What the workflow is for
    pub description: String,
    /// Catalog category
    pub category: String,
    /// Rough duration estimate shown to the user
    pub estimated_time: String,
    /// Agents the template suggests enabling
    pub recommended_agents: Vec<String>,
    /// Ordered steps
    pub tasks: Vec<WorkflowStep>,
}

/// Outcome of one executed workflow step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// 1-based step number
    pub step: u32,
    /// Step title
    pub title: String,
    /// The prompt actually sent after substitution
    pub prompt: String,
    /// Per-agent outcomes for the step
    pub responses: BTreeMap<String, AgentResult>,
    /// Wall-clock time for the step in milliseconds
    pub step_time_ms: u64,
}

/// Outcome of a full workflow execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowExecution {
    /// Template that was executed
    pub workflow_id: String,
    /// Per-step results in execution order
    pub steps: Vec<StepResult>,
    /// Wall-clock time for the whole workflow in milliseconds
    pub total_time_ms: u64,
    /// When the execution finished
    pub completed_at: DateTime<Utc>,
}

impl Orchestrator {
    /// Execute a workflow template against the user's input.
    ///
    /// # Errors
    /// Returns `InvalidRequest` when the input is empty.
    #[instrument(skip(self, template, user_input), fields(workflow = %template.id))]
    pub async fn execute_workflow(
        &self,
        template: &WorkflowTemplate,
        user_input: &str,
    ) -> Result<WorkflowExecution, OrchestratorError> {
        let user_input = user_input.trim();
        if user_input.is_empty() {
            return Err(OrchestratorError::invalid_request("input is required"));
        }

        let start = Instant::now();
        let mut steps = Vec::with_capacity(template.tasks.len());

        for task in &template.tasks {
            let prompt = task.prompt_template.replace("{user_input}", user_input);
            let step_start = Instant::now();

            let response = self.dispatch(&prompt, &task.agents, ChatMode::Plan).await?;

            steps.push(StepResult {
                step: task.step,
                title: task.title.clone(),
                prompt,
                responses: response.responses,
                step_time_ms: step_start.elapsed().as_millis() as u64,
            });
        }

        let total_time_ms = start.elapsed().as_millis() as u64;
        info!(
            workflow = %template.id,
            steps = steps.len(),
            total_time_ms,
            "Workflow execution complete"
        );

        Ok(WorkflowExecution {
            workflow_id: template.id.clone(),
            steps,
            total_time_ms,
            completed_at: Utc::now(),
        })
    }
}

fn step(
    number: u32,
    title: &str,
    description: &str,
    prompt_template: &str,
    agents: &[&str],
) -> WorkflowStep {
    WorkflowStep {
        step: number,
        title: title.to_string(),
        description: description.to_string(),
        prompt_template: prompt_template.to_string(),
        agents: agents.iter().map(ToString::to_string).collect(),
    }
}

static CATALOG: Lazy<Vec<WorkflowTemplate>> = Lazy::new(|| {
    vec![
        WorkflowTemplate {
            id: "strategic-planning".to_string(),
            name: "Strategic Planning Session".to_string(),
            description: "Comprehensive strategic planning with multiple perspectives".to_string(),
            category: "business".to_string(),
            estimated_time: "15-30 minutes".to_string(),
            recommended_agents: vec![
                "claude3.5".to_string(),
                "chatgpt4".to_string(),
                "mistral".to_string(),
            ],
            tasks: vec![
                step(
                    1,
                    "Objective Definition",
                    "Define clear goals and success metrics",
                    "Help me define clear, measurable objectives for: {user_input}. Focus on specific goals and success metrics.",
                    &["claude3.5", "chatgpt4"],
                ),
                step(
                    2,
                    "Current State Analysis",
                    "Current state assessment and gap identification",
                    "Analyze the current state of: {user_input}. Identify key gaps and challenges that need to be addressed.",
                    &["chatgpt4", "mistral"],
                ),
                step(
                    3,
                    "Strategy Development",
                    "Develop actionable implementation roadmap",
                    "Based on the objectives and current state analysis, create a detailed strategic roadmap for: {user_input}.",
                    &["claude3.5", "mistral"],
                ),
                step(
                    4,
                    "Resource Planning",
                    "Identify required assets and constraints",
                    "Identify the resources, budget, timeline, and potential constraints for implementing: {user_input}.",
                    &["chatgpt4", "claude3.5"],
                ),
            ],
        },
        WorkflowTemplate {
            id: "orchestration-framework".to_string(),
            name: "5-Model Orchestration Framework".to_string(),
            description: "Advanced multi-model coordination system".to_string(),
            category: "ai-coordination".to_string(),
            estimated_time: "20-45 minutes".to_string(),
            recommended_agents: vec![
                "claude3.5".to_string(),
                "chatgpt4".to_string(),
                "llama3.3".to_string(),
                "mistral".to_string(),
                "gemini".to_string(),
            ],
            tasks: vec![
                step(
                    1,
                    "Model Selection",
                    "Choose optimal AI combination for task",
                    "Analyze this task and recommend the best AI model combination: {user_input}",
                    &["claude3.5"],
                ),
                step(
                    2,
                    "Role Assignment",
                    "Assign specific cognitive archetypes",
                    "Assign specific roles and cognitive approaches for each AI model to tackle: {user_input}",
                    &["chatgpt4", "claude3.5"],
                ),
                step(
                    3,
                    "Collaborative Processing",
                    "Enable cross-model dialogue and synthesis",
                    "Work together to solve: {user_input}. Each model should contribute their unique perspective.",
                    &["claude3.5", "chatgpt4", "llama3.3", "mistral", "gemini"],
                ),
            ],
        },
    ]
});

/// The static workflow template catalog.
#[must_use]
pub fn workflow_catalog() -> &'static [WorkflowTemplate] {
    &CATALOG
}
