//! # PromptLink Telemetry
//!
//! Observability for the orchestration backend:
//! - Structured logging setup with env-filter support
//! - In-memory request tracking behind the monitoring endpoint

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod logging;
pub mod tracker;

// Re-export main types
pub use logging::{LoggingConfig, LoggingError, init_logging};
pub use tracker::{MonitoringStats, RequestTracker};
