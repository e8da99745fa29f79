//! Server configuration

pub mod loader;

pub use loader::{ServerConfig, ServerConfigLoader};
