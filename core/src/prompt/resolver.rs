//! Best-effort prompt resolution with fallback to the built-in instructions

use super::instructions::Instructions;
use super::store::{PostgresPromptStore, PromptStore};
use crate::config::PromptStoreSchema;
use crate::error::StoreError;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Why the built-in instructions were used instead of the stored prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No connection string configured
    ConfigurationAbsent,
    /// The store could not be reached or the connection string was unusable
    ConnectionFailure,
    /// Connected, but the query failed
    QueryFailure,
    /// Query returned no row, NULL, or blank text
    EmptyResult,
}

/// Where resolved instructions came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum PromptSource {
    Stored,
    Default(FallbackReason),
}

/// Outcome of one resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPrompt {
    pub instructions: Instructions,
    pub source: PromptSource,
}

impl ResolvedPrompt {
    fn fallback(reason: FallbackReason) -> Self {
        Self {
            instructions: Instructions::builtin(),
            source: PromptSource::Default(reason),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self.source, PromptSource::Default(_))
    }
}

/// Turns an optional configuration store into usable instructions.
///
/// Resolution never fails: every problem is logged and answered with the
/// built-in instructions. Nothing is cached between calls.
#[derive(Clone)]
pub struct PromptResolver {
    store: Option<Arc<dyn PromptStore>>,
}

impl PromptResolver {
    /// Resolver with no configuration store; always yields the built-in text
    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn with_store(store: Arc<dyn PromptStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Resolver backed by PostgreSQL when a connection string is present.
    ///
    /// An empty or blank string counts as absent.
    pub fn from_connection_string(
        connection_string: Option<&str>,
        schema: PromptStoreSchema,
    ) -> Self {
        match connection_string.map(str::trim).filter(|s| !s.is_empty()) {
            Some(url) => Self::with_store(Arc::new(PostgresPromptStore::new(url, schema))),
            None => Self::disabled(),
        }
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub async fn resolve(&self) -> ResolvedPrompt {
        let Some(store) = &self.store else {
            warn!("No database connection configured, using default instructions");
            return ResolvedPrompt::fallback(FallbackReason::ConfigurationAbsent);
        };

        match store.fetch_prompt().await {
            Ok(Some(text)) => match Instructions::new(text) {
                Some(instructions) => {
                    info!(
                        store = %store.describe(),
                        "Loaded instructions from configuration store"
                    );
                    ResolvedPrompt {
                        instructions,
                        source: PromptSource::Stored,
                    }
                }
                None => {
                    warn!(
                        store = %store.describe(),
                        "Stored prompt is empty, using default instructions"
                    );
                    ResolvedPrompt::fallback(FallbackReason::EmptyResult)
                }
            },
            Ok(None) => {
                warn!(
                    store = %store.describe(),
                    "No stored prompt found, using default instructions"
                );
                ResolvedPrompt::fallback(FallbackReason::EmptyResult)
            }
            Err(err) => {
                error!(
                    store = %store.describe(),
                    error = %err,
                    "Failed to load stored prompt, using default instructions"
                );
                let reason = match err {
                    StoreError::Connection { .. } => FallbackReason::ConnectionFailure,
                    StoreError::Query { .. } => FallbackReason::QueryFailure,
                };
                ResolvedPrompt::fallback(reason)
            }
        }
    }

    pub async fn resolve_text(&self) -> String {
        self.resolve().await.instructions.into_string()
    }
}

/// Resolve the agent prompt for `connection_string` against the default schema.
pub async fn resolve_prompt(connection_string: Option<&str>) -> String {
    PromptResolver::from_connection_string(connection_string, PromptStoreSchema::default())
        .resolve_text()
        .await
}
