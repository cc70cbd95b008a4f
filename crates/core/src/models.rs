//! The enumerated set of selectable models.

use serde::Serialize;

use crate::ConfigError;

/// One selectable model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    /// Display label.
    pub label: String,
    /// Identifier sent to the API.
    pub id: String,
}

impl ModelOption {
    pub fn new(label: impl Into<String>, id: impl Into<String>) -> Self {
        Self { label: label.into(), id: id.into() }
    }

    /// Identifier without a `models/` style prefix.
    pub fn short_id(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or(&self.id)
    }
}

/// Ordered catalog of models. The first entry is the default.
#[derive(Debug, Clone, Serialize)]
pub struct ModelCatalog {
    options: Vec<ModelOption>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            options: vec![
                ModelOption::new("Gemini 1.0 Pro (General Purpose)", "gemini-1.0-pro"),
                ModelOption::new("Gemini 1.5 Flash (Fast & Efficient)", "gemini-1.5-flash-latest"),
            ],
        }
    }
}

impl ModelCatalog {
    /// Builds a catalog from explicit options. At least one is required.
    pub fn new(options: Vec<ModelOption>) -> Result<Self, ConfigError> {
        if options.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self { options })
    }

    pub fn options(&self) -> &[ModelOption] {
        &self.options
    }

    pub fn default_option(&self) -> &ModelOption {
        &self.options[0]
    }

    /// Looks up an option by identifier or by label.
    pub fn find(&self, key: &str) -> Option<&ModelOption> {
        self.options.iter().find(|o| o.id == key || o.label == key)
    }

    /// Resolves a user choice into a [`ModelSelection`].
    pub fn select(&self, key: &str) -> Result<ModelSelection, ConfigError> {
        self.find(key)
            .map(|o| ModelSelection(o.clone()))
            .ok_or_else(|| ConfigError::UnknownModel(key.to_string()))
    }

    /// The session-start selection.
    pub fn default_selection(&self) -> ModelSelection {
        ModelSelection(self.default_option().clone())
    }
}

/// The model currently chosen by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSelection(ModelOption);

impl ModelSelection {
    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn label(&self) -> &str {
        &self.0.label
    }

    pub fn option(&self) -> &ModelOption {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_two_models() {
        let catalog = ModelCatalog::default();
        assert_eq!(catalog.options().len(), 2);
        assert_eq!(catalog.default_selection().id(), "gemini-1.0-pro");
    }

    #[test]
    fn test_select_by_id_or_label() {
        let catalog = ModelCatalog::default();
        assert_eq!(catalog.select("gemini-1.5-flash-latest").unwrap().label(), "Gemini 1.5 Flash (Fast & Efficient)");
        assert_eq!(catalog.select("Gemini 1.0 Pro (General Purpose)").unwrap().id(), "gemini-1.0-pro");
    }

    #[test]
    fn test_select_unknown() {
        let catalog = ModelCatalog::default();
        assert!(matches!(catalog.select("gpt-4o"), Err(ConfigError::UnknownModel(m)) if m == "gpt-4o"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(ModelCatalog::new(Vec::new()), Err(ConfigError::EmptyCatalog)));
    }

    #[test]
    fn test_short_id() {
        assert_eq!(ModelOption::new("x", "models/gemini-1.0-pro").short_id(), "gemini-1.0-pro");
        assert_eq!(ModelOption::new("x", "gemini-1.0-pro").short_id(), "gemini-1.0-pro");
    }
}
