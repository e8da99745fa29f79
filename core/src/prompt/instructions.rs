//! Non-empty instruction text

use super::default::DEFAULT_INSTRUCTIONS;
use serde::Serialize;

/// Behavioral instructions for an agent. Never empty or blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Instructions(String);

impl Instructions {
    /// Wrap `text`, or `None` when it is empty or whitespace only.
    ///
    /// The text is kept as-is, surrounding whitespace included.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    /// The built-in instructions
    pub fn builtin() -> Self {
        Self(DEFAULT_INSTRUCTIONS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Instructions {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Instructions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_text() {
        assert!(Instructions::new("").is_none());
        assert!(Instructions::new("  \n\t").is_none());
    }

    #[test]
    fn test_keeps_text_verbatim() {
        let instructions = Instructions::new("  CUSTOM\n").unwrap();
        assert_eq!(instructions.as_str(), "  CUSTOM\n");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let instructions = Instructions::new("CUSTOM").unwrap();
        assert_eq!(serde_json::to_string(&instructions).unwrap(), "\"CUSTOM\"");
    }
}
