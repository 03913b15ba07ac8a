//! # PromptLink Providers
//!
//! Upstream LLM provider clients for the orchestration backend.
//!
//! Two providers cover all five agents:
//! - OpenAI (ChatGPT 4 Turbo)
//! - OpenRouter (Claude, Llama, Mistral, Gemini)
//!
//! Both speak the OpenAI chat-completions wire format; the shared types live
//! in [`wire`]. The [`registry`] module binds agent ids to provider
//! instances at startup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod openai;
pub mod openrouter;
pub mod registry;
pub mod wire;

// Re-export main types
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use openrouter::{OpenRouterConfig, OpenRouterProvider};
pub use registry::{AgentRegistry, RegisteredAgent};
