//! Error types and handling for Illie Core

use thiserror::Error;

/// Result type alias for Illie operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Illie Core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// LLM client errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Configuration-specific errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("Invalid SQL identifier for '{field}': {value}")]
    InvalidIdentifier { field: String, value: String },

    #[error("Unsupported protocol: {protocol}")]
    UnsupportedProtocol { protocol: String },
}

/// Errors raised while reading the prompt from the configuration store.
///
/// These never leave the prompt resolver; they select the log line and the
/// fallback reason.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection failed: {message}")]
    Connection { message: String },

    #[error("Query failed: {message}")]
    Query { message: String },
}

impl StoreError {
    pub fn connection(err: impl std::fmt::Display) -> Self {
        StoreError::Connection {
            message: err.to_string(),
        }
    }

    pub fn query(err: impl std::fmt::Display) -> Self {
        StoreError::Query {
            message: err.to_string(),
        }
    }
}

/// LLM client errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Model returned no content")]
    EmptyResponse,
}
