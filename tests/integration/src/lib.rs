//! Integration tests for the PromptLink orchestration backend
//!
//! Covers:
//! - The HTTP API surface end to end, in-process
//! - Fan-out behavior against wiremock upstream providers
//! - Failure isolation and error classification
//! - The concurrency latency bound

pub mod helpers;
pub mod mock_providers;

// Re-export commonly used items
pub use helpers::*;
pub use mock_providers::*;

#[cfg(test)]
mod api_tests;
#[cfg(test)]
mod fanout_tests;
#[cfg(test)]
mod workflow_tests;
