//! Where the live prompt lives in the configuration store

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Table layout of the prompt configuration row.
///
/// Names are interpolated into SQL, so they must pass [`validate`](Self::validate)
/// before a query is built. A name may be schema-qualified (`settings.agent_config`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptStoreSchema {
    /// Table holding the prompt row
    pub table: String,
    /// Integer key column
    pub id_column: String,
    /// Text column with the instructions
    pub prompt_column: String,
    /// Key of the row to read
    pub row_id: i32,
}

impl Default for PromptStoreSchema {
    fn default() -> Self {
        Self {
            table: "agent_config".to_string(),
            id_column: "id".to_string(),
            prompt_column: "prompt".to_string(),
            row_id: 1,
        }
    }
}

impl PromptStoreSchema {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_identifier("table", &self.table, true)?;
        check_identifier("id_column", &self.id_column, false)?;
        check_identifier("prompt_column", &self.prompt_column, false)?;
        Ok(())
    }

    /// The single query the resolver runs; `$1` binds [`row_id`](Self::row_id).
    pub fn select_sql(&self) -> String {
        format!(
            "SELECT {prompt} FROM {table} WHERE {id} = $1 LIMIT 1",
            prompt = self.prompt_column,
            table = self.table,
            id = self.id_column,
        )
    }
}

fn check_identifier(field: &str, value: &str, allow_qualified: bool) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidIdentifier {
        field: field.to_string(),
        value: value.to_string(),
    };

    let segments: Vec<&str> = value.split('.').collect();
    if segments.len() > 2 || (segments.len() == 2 && !allow_qualified) {
        return Err(invalid());
    }

    for segment in segments {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            return Err(invalid());
        };
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(invalid());
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid());
        }
    }

    Ok(())
}
