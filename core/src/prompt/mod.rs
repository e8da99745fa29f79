//! Agent prompt resolution

pub mod default;
pub mod instructions;
pub mod resolver;
pub mod store;

pub use default::{DEFAULT_INSTRUCTIONS, DEFAULT_PROMPT_MARKER};
pub use instructions::Instructions;
pub use resolver::{resolve_prompt, FallbackReason, PromptResolver, PromptSource, ResolvedPrompt};
pub use store::{PostgresPromptStore, PromptStore};
