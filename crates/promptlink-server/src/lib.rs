//! # PromptLink Server
//!
//! HTTP server implementation for the orchestration backend.
//!
//! This crate provides:
//! - Axum-based HTTP server with graceful shutdown
//! - The chat, agents, workflows, and monitoring endpoints
//! - Permissive CORS for the browser frontend
//! - Request-id and logging middleware

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use error::ApiError;
pub use routes::create_router;
pub use server::Server;
pub use state::AppState;
