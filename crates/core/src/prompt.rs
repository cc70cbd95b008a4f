//! Prompt templates with a single checked substitution point.
//!
//! A template must contain `{user_content}` exactly once. Any other
//! `{identifier}` token is rejected at construction so a typo in a template
//! fails on load instead of reaching the model. Braces that do not wrap an
//! identifier (JSON examples, for instance) are left alone.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::TemplateError;

/// Name of the substitution slot.
pub const SLOT: &str = "user_content";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex"));

/// A validated prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Validates `text` and wraps it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use overview_core::PromptTemplate;
    ///
    /// let template = PromptTemplate::new("Summarize:\n{user_content}").unwrap();
    /// assert_eq!(template.render("text"), "Summarize:\ntext");
    /// assert!(PromptTemplate::new("no slot").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, TemplateError> {
        let text = text.into();
        let mut slots = 0;

        for caps in PLACEHOLDER.captures_iter(&text) {
            let name = &caps[1];
            if name == SLOT {
                slots += 1;
            } else {
                return Err(TemplateError::UnknownPlaceholder { name: name.to_string() });
            }
        }

        match slots {
            0 => Err(TemplateError::MissingSlot),
            1 => Ok(Self { text }),
            count => Err(TemplateError::DuplicateSlot { count }),
        }
    }

    /// Inserts `content` verbatim into the slot.
    pub fn render(&self, content: &str) -> String {
        self.text.replacen(&format!("{{{SLOT}}}"), content, 1)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_inserts_verbatim() {
        let template = PromptTemplate::new("---\n{user_content}\n---").unwrap();
        let content = "<script>{user_content}</script> & {other}";
        assert_eq!(template.render(content), format!("---\n{content}\n---"));
    }

    #[test]
    fn test_missing_slot() {
        assert_eq!(PromptTemplate::new("Analyze this."), Err(TemplateError::MissingSlot));
    }

    #[test]
    fn test_duplicate_slot() {
        assert_eq!(
            PromptTemplate::new("{user_content} and {user_content}"),
            Err(TemplateError::DuplicateSlot { count: 2 })
        );
    }

    #[test]
    fn test_unknown_placeholder() {
        assert_eq!(
            PromptTemplate::new("{user_content} for {query}"),
            Err(TemplateError::UnknownPlaceholder { name: "query".into() })
        );
    }

    #[test]
    fn test_non_identifier_braces_allowed() {
        let template = PromptTemplate::new(r#"Reply as {"score": 1}. {user_content}"#).unwrap();
        assert_eq!(template.render("x"), r#"Reply as {"score": 1}. x"#);
    }
}
