//! # PromptLink Orchestrator
//!
//! Concurrent multi-agent fan-out and response aggregation.
//!
//! Given one user message and a set of agent ids, the orchestrator issues one
//! upstream call per agent in parallel, captures each outcome independently,
//! and folds them into a single response mapping. One agent's timeout, rate
//! limit, or malformed reply never disturbs another agent's entry.
//!
//! The [`workflow`] module layers templated multi-step sessions on top of the
//! same fan-out primitive.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fanout;
pub mod workflow;

// Re-export main types
pub use fanout::Orchestrator;
pub use workflow::{
    StepResult, WorkflowExecution, WorkflowStep, WorkflowTemplate, workflow_catalog,
};
