//! Builds agent descriptors from freshly resolved instructions

use super::descriptor::{AgentDescriptor, ContextOptions};
use crate::config::{ModelRef, PromptStoreSchema};
use crate::prompt::{PromptResolver, ResolvedPrompt};
use tracing::debug;

/// Identifier of the Illie agent
pub const AGENT_ID: &str = "illie-agent";

/// Display name of the Illie agent
pub const AGENT_NAME: &str = "Illie Agent";

/// Model the agent runs on unless configuration says otherwise
pub const DEFAULT_MODEL_ID: &str = "gpt-4o";

/// Factory for the Illie agent.
///
/// Holds only static configuration. Each [`build_agent`](Self::build_agent)
/// call resolves the prompt again, so edits made through the settings page
/// apply to the next request without a restart.
#[derive(Clone)]
pub struct AgentFactory {
    resolver: PromptResolver,
    model: ModelRef,
}

impl AgentFactory {
    pub fn new(resolver: PromptResolver) -> Self {
        Self {
            resolver,
            model: ModelRef::openai(DEFAULT_MODEL_ID),
        }
    }

    /// Override the model reference
    pub fn with_model(mut self, model: ModelRef) -> Self {
        self.model = model;
        self
    }

    pub fn agent_id(&self) -> &str {
        AGENT_ID
    }

    pub fn agent_name(&self) -> &str {
        AGENT_NAME
    }

    pub fn model(&self) -> &ModelRef {
        &self.model
    }

    pub fn resolver(&self) -> &PromptResolver {
        &self.resolver
    }

    pub async fn build_agent(&self) -> AgentDescriptor {
        self.build_agent_with_source().await.0
    }

    /// Build a descriptor and report where its instructions came from
    pub async fn build_agent_with_source(&self) -> (AgentDescriptor, ResolvedPrompt) {
        let resolved = self.resolver.resolve().await;
        debug!(agent = AGENT_ID, source = ?resolved.source, "Building agent descriptor");

        let descriptor = AgentDescriptor::new(
            AGENT_ID,
            AGENT_NAME,
            self.model.clone(),
            resolved.instructions.clone(),
            ContextOptions::default(),
        );
        (descriptor, resolved)
    }
}

/// Build the Illie agent for `connection_string` against the default schema.
pub async fn build_agent(connection_string: Option<&str>) -> AgentDescriptor {
    let resolver =
        PromptResolver::from_connection_string(connection_string, PromptStoreSchema::default());
    AgentFactory::new(resolver).build_agent().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::prompt::{PromptSource, PromptStore, DEFAULT_INSTRUCTIONS};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PromptStore for CountingStore {
        async fn fetch_prompt(&self) -> Result<Option<String>, StoreError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Some(format!("prompt v{n}")))
        }
    }

    #[tokio::test]
    async fn test_build_agent_without_database_uses_default() {
        let descriptor = build_agent(None).await;
        assert_eq!(descriptor.id(), "illie-agent");
        assert_eq!(descriptor.name(), "Illie Agent");
        assert_eq!(descriptor.model(), &ModelRef::openai("gpt-4o"));
        assert_eq!(descriptor.instructions(), DEFAULT_INSTRUCTIONS);
        assert!(descriptor.context().add_datetime_to_context);
        assert!(!descriptor.context().markdown);
    }

    #[tokio::test]
    async fn test_each_build_resolves_again() {
        let store = Arc::new(CountingStore {
            calls: AtomicUsize::new(0),
        });
        let factory = AgentFactory::new(PromptResolver::with_store(store.clone()));

        let first = factory.build_agent().await;
        let second = factory.build_agent().await;

        assert_eq!(first.instructions(), "prompt v1");
        assert_eq!(second.instructions(), "prompt v2");
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_with_model_and_source() {
        let factory = AgentFactory::new(PromptResolver::disabled())
            .with_model(ModelRef::openai("gpt-4o-mini"));
        let (descriptor, resolved) = factory.build_agent_with_source().await;
        assert_eq!(descriptor.model().id, "gpt-4o-mini");
        assert!(matches!(resolved.source, PromptSource::Default(_)));
    }
}
