//! Analysis criteria: named prompt templates.
//!
//! The built-in set covers clarity and trust signals. A JSON file with the
//! same shape replaces it without touching the dispatcher:
//!
//! ```json
//! [
//!   { "id": "clarity", "name": "Clarity & Conciseness", "template": "... {user_content} ..." }
//! ]
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::prompt::PromptTemplate;
use crate::{ConfigError, Error, Result};

const CLARITY_PROMPT: &str = r#"Your role is an expert content editor specializing in optimizing web text for Google AI Overviews.
Analyze the following content for clarity and conciseness, keeping in mind it might be used by Google to generate a summary.
Identify 1-2 strengths and provide 2-3 actionable suggestions to improve its suitability for AI summarization.
Be specific in your suggestions.

Content to analyze:
---
{user_content}
---
"#;

const TRUST_SIGNALS_PROMPT: &str = r#"Your role is an SEO expert focusing on Google's E-E-A-T guidelines for AI Overviews.
Review the provided content. What signals of Experience, Expertise, Authoritativeness, and Trustworthiness are present?
What signals are missing or could be strengthened? Provide 3 specific, actionable recommendations
to enhance E-E-A-T for this content in the context of Google AI Overviews.

Content to analyze:
---
{user_content}
---
"#;

/// File name looked up under the user config directory.
pub const CRITERIA_FILE: &str = "criteria.json";

/// One analysis dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    /// Stable identifier used in routes and CLI flags.
    pub id: String,
    /// Display name, also used in error messages.
    pub name: String,
    /// Heading shown above the result.
    pub heading: String,
    #[serde(skip)]
    pub template: PromptTemplate,
}

/// Unvalidated criterion as read from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CriterionDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub heading: Option<String>,
    pub template: String,
}

/// Ordered set of criteria with unique ids.
#[derive(Debug, Clone)]
pub struct CriteriaSet {
    criteria: Vec<Criterion>,
}

impl Default for CriteriaSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CriteriaSet {
    /// Clarity & Conciseness and Trust Signals.
    pub fn builtin() -> Self {
        Self::new(vec![
            CriterionDef {
                id: "clarity".into(),
                name: "Clarity & Conciseness".into(),
                heading: Some("Clarity & Conciseness Analysis".into()),
                template: CLARITY_PROMPT.into(),
            },
            CriterionDef {
                id: "trust-signals".into(),
                name: "Trust Signals".into(),
                heading: Some("E-E-A-T (Experience, Expertise, Authoritativeness, Trustworthiness) Analysis".into()),
                template: TRUST_SIGNALS_PROMPT.into(),
            },
        ])
        .expect("built-in criteria are valid")
    }

    /// Validates definitions: non-empty set, unique non-blank ids, one slot per template.
    pub fn new(defs: Vec<CriterionDef>) -> std::result::Result<Self, ConfigError> {
        if defs.is_empty() {
            return Err(ConfigError::Criteria("at least one criterion is required".into()));
        }

        let mut seen = HashSet::new();
        let mut criteria = Vec::with_capacity(defs.len());

        for def in defs {
            let id = def.id.trim().to_string();
            if id.is_empty() || def.name.trim().is_empty() {
                return Err(ConfigError::Criteria("criterion id and name must not be empty".into()));
            }
            if !seen.insert(id.clone()) {
                return Err(ConfigError::Criteria(format!("duplicate criterion id '{id}'")));
            }

            let template = PromptTemplate::new(def.template)
                .map_err(|source| ConfigError::Template { criterion: def.name.clone(), source })?;
            let heading = def.heading.unwrap_or_else(|| format!("{} Analysis", def.name));

            criteria.push(Criterion { id, name: def.name, heading, template });
        }

        Ok(Self { criteria })
    }

    /// Parses a JSON array of criterion definitions.
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        let defs: Vec<CriterionDef> = serde_json::from_str(json).map_err(|e| ConfigError::Criteria(e.to_string()))?;
        Self::new(defs)
    }

    /// Reads [`from_json`](Self::from_json) input from a file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        Ok(Self::from_json(&json)?)
    }

    pub fn get(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

/// `<config dir>/overview/criteria.json`, if the platform has a config dir.
pub fn default_criteria_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("overview").join(CRITERIA_FILE))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::TemplateError;

    #[test]
    fn test_builtin_set() {
        let set = CriteriaSet::builtin();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("clarity").unwrap().name, "Clarity & Conciseness");
        assert_eq!(set.get("trust-signals").unwrap().name, "Trust Signals");
        assert!(set.get("missing").is_none());
    }

    #[test]
    fn test_builtin_templates_wrap_content() {
        let set = CriteriaSet::builtin();
        let prompt = set.get("clarity").unwrap().template.render("MY CONTENT");
        assert!(prompt.contains("---\nMY CONTENT\n---"));
        assert!(prompt.starts_with("Your role is an expert content editor"));
    }

    #[test]
    fn test_from_json_with_default_heading() {
        let set = CriteriaSet::from_json(r#"[{"id": "freshness", "name": "Freshness", "template": "Is this current? {user_content}"}]"#)
            .unwrap();
        let criterion = set.get("freshness").unwrap();
        assert_eq!(criterion.heading, "Freshness Analysis");
        assert_eq!(criterion.template.render("x"), "Is this current? x");
    }

    #[test]
    fn test_rejects_bad_template() {
        let err = CriteriaSet::from_json(r#"[{"id": "a", "name": "A", "template": "no slot"}]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Template { source: TemplateError::MissingSlot, .. }));
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        let dup = r#"[{"id": "a", "name": "A", "template": "{user_content}"}, {"id": "a", "name": "B", "template": "{user_content}"}]"#;
        assert!(matches!(CriteriaSet::from_json(dup), Err(ConfigError::Criteria(m)) if m.contains("duplicate")));
        assert!(CriteriaSet::from_json("[]").is_err());
        assert!(CriteriaSet::from_json("not json").is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "tone", "name": "Tone", "template": "Tone of: {{user_content}}"}}]"#).unwrap();

        let set = CriteriaSet::from_json_file(file.path()).unwrap();
        assert_eq!(set.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["tone"]);
    }

    #[test]
    fn test_from_missing_file() {
        let err = CriteriaSet::from_json_file("/nonexistent/criteria.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
