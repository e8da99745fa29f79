//! CLI command implementations

pub mod agent;
pub mod prompt;
pub mod serve;

pub use agent::agent_command;
pub use prompt::prompt_command;
pub use serve::serve_command;
