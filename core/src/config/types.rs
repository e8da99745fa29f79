//! LLM configuration types
//!
//! Core only accepts fully resolved, validated configuration.
//! All environment lookup happens in the CLI layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported LLM protocols
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// OpenAI-compatible API (includes OpenAI, many proxies, local models)
    #[serde(rename = "openai_compat")]
    OpenAICompat,
    /// Custom protocol
    #[serde(rename = "custom")]
    Custom(String),
}

impl Protocol {
    /// Parse a protocol name as written in configuration
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "openai" | "openai_compat" => Protocol::OpenAICompat,
            other => Protocol::Custom(other.to_string()),
        }
    }

    /// Get the protocol name as a string
    pub fn as_str(&self) -> &str {
        match self {
            Protocol::OpenAICompat => "openai_compat",
            Protocol::Custom(name) => name,
        }
    }

    /// Provider prefix used in model references (`openai/gpt-4o`)
    pub fn provider(&self) -> &str {
        match self {
            Protocol::OpenAICompat => "openai",
            Protocol::Custom(name) => name,
        }
    }

    /// Get the default base URL for this protocol
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Protocol::OpenAICompat => Some("https://api.openai.com/v1"),
            Protocol::Custom(_) => None,
        }
    }
}

/// Reference to the language model an agent runs on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    /// Provider name (e.g. "openai")
    pub provider: String,
    /// Model identifier (e.g. "gpt-4o")
    pub id: String,
}

impl ModelRef {
    pub fn new(provider: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            id: id.into(),
        }
    }

    pub fn openai(id: impl Into<String>) -> Self {
        Self::new("openai", id)
    }
}

impl std::fmt::Display for ModelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.id)
    }
}

/// Model parameters for LLM requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelParams {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature for sampling (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Top-p sampling parameter
    pub top_p: Option<f32>,
}

/// A fully resolved LLM configuration ready for use by core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLlmConfig {
    /// The protocol to use
    pub protocol: Protocol,
    /// Base URL for the API
    pub base_url: String,
    /// API key for authentication
    pub api_key: String,
    /// Model name/identifier
    pub model: String,
    /// Model parameters
    #[serde(default)]
    pub params: ModelParams,
    /// Additional headers for requests
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl ResolvedLlmConfig {
    /// Create a new resolved LLM config
    pub fn new(protocol: Protocol, base_url: String, api_key: String, model: String) -> Self {
        Self {
            protocol,
            base_url,
            api_key,
            model,
            params: ModelParams::default(),
            headers: HashMap::new(),
        }
    }

    /// Set model parameters
    pub fn with_params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    /// Add a header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Model reference for agent descriptors
    pub fn model_ref(&self) -> ModelRef {
        ModelRef::new(self.protocol.provider(), self.model.clone())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("API key cannot be empty".to_string());
        }

        if self.model.is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Base URL must start with http:// or https://".to_string());
        }

        if let Some(temp) = self.params.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err("Temperature must be between 0.0 and 2.0".to_string());
            }
        }

        if let Some(top_p) = self.params.top_p {
            if !(0.0..=1.0).contains(&top_p) {
                return Err("Top-p must be between 0.0 and 1.0".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ResolvedLlmConfig {
        ResolvedLlmConfig::new(
            Protocol::OpenAICompat,
            "https://api.openai.com/v1".to_string(),
            "sk-test".to_string(),
            "gpt-4o".to_string(),
        )
    }

    #[test]
    fn test_protocol_parse() {
        assert_eq!(Protocol::parse("openai"), Protocol::OpenAICompat);
        assert_eq!(Protocol::parse(" OpenAI_Compat "), Protocol::OpenAICompat);
        assert_eq!(
            Protocol::parse("anthropic"),
            Protocol::Custom("anthropic".to_string())
        );
    }

    #[test]
    fn test_model_ref_display() {
        assert_eq!(config().model_ref().to_string(), "openai/gpt-4o");
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = config();
        cfg.api_key.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = config();
        cfg.base_url = "api.openai.com".to_string();
        assert!(cfg.validate().is_err());

        let cfg = config().with_params(ModelParams {
            temperature: Some(3.0),
            ..Default::default()
        });
        assert!(cfg.validate().is_err());
    }
}
