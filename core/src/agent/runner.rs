//! Single-shot agent runs against a language model

use super::descriptor::AgentDescriptor;
use super::draft::PostDraft;
use crate::error::Result;
use crate::llm::{LlmClient, LlmMessage, Usage};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

const MARKDOWN_HINT: &str = "Use markdown to format your answers.";

/// Result of one agent run
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub run_id: String,
    pub agent_id: String,
    pub model: String,
    /// Raw reply text
    pub content: String,
    /// `content` parsed as a post draft, when it has that shape
    pub draft: Option<PostDraft>,
    pub usage: Option<Usage>,
    pub created_at: DateTime<Utc>,
}

/// Executes agent descriptors against an LLM client
pub struct AgentRunner {
    llm: Arc<dyn LlmClient>,
}

impl AgentRunner {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn run(&self, descriptor: &AgentDescriptor, input: &str) -> Result<RunOutput> {
        let run_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        info!(
            run_id = %run_id,
            agent = descriptor.id(),
            model = self.llm.model_name(),
            "Starting agent run"
        );

        let messages = vec![
            LlmMessage::system(system_message(descriptor, now)),
            LlmMessage::user(input),
        ];
        let response = self.llm.chat_completion(messages, None).await?;

        let content = response.message.content;
        let draft = PostDraft::parse(&content);
        if draft.is_none() {
            debug!(run_id = %run_id, "Reply is not a post draft object");
        }

        Ok(RunOutput {
            run_id,
            agent_id: descriptor.id().to_string(),
            model: response.model,
            content,
            draft,
            usage: response.usage,
            created_at: now,
        })
    }
}

/// System message for `descriptor` as of `now`
pub fn system_message(descriptor: &AgentDescriptor, now: DateTime<Utc>) -> String {
    let mut message = descriptor.instructions().to_string();
    let context = descriptor.context();

    if context.markdown {
        message.push_str("\n\n");
        message.push_str(MARKDOWN_HINT);
    }

    if context.add_datetime_to_context {
        message.push_str("\n\n<additional_information>\n- The current time is ");
        message.push_str(&now.format("%Y-%m-%d %H:%M:%S UTC").to_string());
        message.push_str(".\n</additional_information>");
    }

    message
}
