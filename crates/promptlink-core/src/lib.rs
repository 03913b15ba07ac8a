//! # PromptLink Core
//!
//! Core types, traits, and error handling for the PromptLink orchestration
//! backend.
//!
//! This crate provides the foundational types used throughout the backend:
//! - The static agent model and provider bindings
//! - Chat request and response types
//! - The `ChatProvider` trait abstracting upstream LLM APIs
//! - Error types with per-agent failure classification

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agent;
pub mod chat;
pub mod error;
pub mod provider;

// Re-export commonly used types
pub use agent::{AgentDefinition, AgentStatus, ProviderKind};
pub use chat::{
    AgentFailure, AgentReply, AgentResult, ChatMetadata, ChatMode, ChatRequest, ChatResponse,
};
pub use error::{AgentErrorKind, OrchestratorError, UpstreamErrorKind};
pub use provider::{ChatProvider, ProviderError, ProviderReply, ProviderRequest};
