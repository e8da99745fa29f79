//! LLM client abstractions and implementations

pub mod client;
pub mod message;
pub mod openai;

pub use client::{ChatOptions, FinishReason, LlmClient, LlmResponse, Usage};
pub use message::{LlmMessage, MessageRole};
pub use openai::OpenAiClient;

use crate::config::{Protocol, ResolvedLlmConfig};
use crate::error::{ConfigError, Result};
use std::sync::Arc;

/// Create the LLM client matching the configured protocol
pub fn create_client(config: &ResolvedLlmConfig) -> Result<Arc<dyn LlmClient>> {
    match &config.protocol {
        Protocol::OpenAICompat => Ok(Arc::new(OpenAiClient::new(config)?)),
        Protocol::Custom(name) => Err(ConfigError::UnsupportedProtocol {
            protocol: name.clone(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn config(protocol: Protocol) -> ResolvedLlmConfig {
        ResolvedLlmConfig::new(
            protocol,
            "https://api.openai.com/v1".to_string(),
            "sk-test".to_string(),
            "gpt-4o".to_string(),
        )
    }

    #[test]
    fn test_create_client_for_openai() {
        let client = create_client(&config(Protocol::OpenAICompat)).unwrap();
        assert_eq!(client.model_name(), "gpt-4o");
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_create_client_rejects_custom_protocol() {
        let result = create_client(&config(Protocol::Custom("mystery".to_string())));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::UnsupportedProtocol { .. }))
        ));
    }
}
