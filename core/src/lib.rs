//! # Illie Core
//!
//! Core library for Illie - an agent that turns raw Notion notes into
//! LinkedIn posts.
//!
//! The interesting part is prompt resolution: the agent's instructions are
//! read from an operator-editable database row on every build and fall back to
//! built-in text whenever that row cannot be used.

// Core modules
pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod prompt;

// Re-export commonly used types
pub use agent::{build_agent, AgentDescriptor, AgentFactory, AgentRunner, ContextOptions, RunOutput};
pub use config::{ModelRef, Protocol, PromptStoreSchema, ResolvedLlmConfig};
pub use prompt::{resolve_prompt, PromptResolver, ResolvedPrompt};

/// Current version of the illie-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
