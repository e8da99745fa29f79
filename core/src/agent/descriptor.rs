//! Agent descriptor handed to the hosting layer

use crate::config::ModelRef;
use crate::prompt::Instructions;
use serde::Serialize;

/// Context switches applied when the agent runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContextOptions {
    /// Append the current date and time to the system message
    pub add_datetime_to_context: bool,
    /// Ask the model for markdown output
    pub markdown: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            add_datetime_to_context: true,
            markdown: false,
        }
    }
}

/// Immutable description of one agent: identity, model and instructions.
///
/// Built fresh for every request; the instructions are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDescriptor {
    id: String,
    name: String,
    model: ModelRef,
    instructions: Instructions,
    context: ContextOptions,
}

impl AgentDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        model: ModelRef,
        instructions: Instructions,
        context: ContextOptions,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            model,
            instructions,
            context,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &ModelRef {
        &self.model
    }

    pub fn instructions(&self) -> &str {
        self.instructions.as_str()
    }

    pub fn context(&self) -> ContextOptions {
        self.context
    }
}
