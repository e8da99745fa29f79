//! Agent descriptors, the factory that builds them, and run execution

pub mod descriptor;
pub mod draft;
pub mod factory;
pub mod runner;

pub use descriptor::{AgentDescriptor, ContextOptions};
pub use draft::PostDraft;
pub use factory::{build_agent, AgentFactory, AGENT_ID, AGENT_NAME, DEFAULT_MODEL_ID};
pub use runner::{system_message, AgentRunner, RunOutput};
