//! Configuration data types for Illie core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod schema;
pub mod types;

pub use schema::PromptStoreSchema;
pub use types::{ModelParams, ModelRef, Protocol, ResolvedLlmConfig};
