//! The post object the instructions ask the model to return

use serde::{Deserialize, Serialize};

/// A LinkedIn post draft as produced by the agent.
///
/// The shape is requested by the instructions only; replies that do not match
/// are passed through untouched and simply have no draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub linkedin_post: String,
    pub short_post: String,
    pub hashtags: Vec<String>,
    pub original_content: String,
}

impl PostDraft {
    /// Parse a model reply, or `None` when it is not a bare draft object.
    pub fn parse(reply: &str) -> Option<Self> {
        serde_json::from_str(reply.trim()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r##"
{
  "title": "O dia em que o deploy caiu",
  "linkedin_post": "Sexta, 18h. O deploy caiu.\n\nO que você faria?\n\n#LinkedIn #DevOps",
  "short_post": "Sexta, 18h. O deploy caiu.",
  "hashtags": ["#LinkedIn", "#DevOps"],
  "original_content": "deploy caiu sexta"
}
"##;

    #[test]
    fn test_parse_bare_json() {
        let draft = PostDraft::parse(REPLY).unwrap();
        assert_eq!(draft.title, "O dia em que o deploy caiu");
        assert_eq!(draft.hashtags, vec!["#LinkedIn", "#DevOps"]);
        assert_eq!(draft.original_content, "deploy caiu sexta");
    }

    #[test]
    fn test_parse_rejects_fenced_or_partial_replies() {
        let fenced = format!("```json\n{}\n```", REPLY.trim());
        assert!(PostDraft::parse(&fenced).is_none());
        assert!(PostDraft::parse(r#"{"title": "only a title"}"#).is_none());
        assert!(PostDraft::parse("Here is your post!").is_none());
    }
}
