//! Analysis dispatch: template + content + model client.
//!
//! The dispatcher never contacts the model unless content is non-empty, the
//! client holds a credential and a model is chosen. Those checks come back as
//! [`NotReady`] so callers can show a warning instead of an error.

use serde::Serialize;

use crate::client::ModelClient;
use crate::criteria::{CriteriaSet, Criterion};
use crate::{AnalysisError, NotReady};

/// The raw model output for one criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub criterion: String,
    pub name: String,
    pub heading: String,
    pub model: String,
    /// Model response, unmodified.
    pub text: String,
}

/// What is still missing before an analysis can run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readiness {
    pub has_content: bool,
    pub configured: bool,
    pub model: Option<String>,
}

impl Readiness {
    pub fn of(client: &ModelClient, content: &str, model: Option<&str>) -> Self {
        Self {
            has_content: !content.is_empty(),
            configured: client.is_configured(),
            model: model.filter(|m| !m.is_empty()).map(str::to_string),
        }
    }

    /// The first unmet precondition, checked as key, then model, then content.
    pub fn blocker(&self) -> Option<NotReady> {
        if !self.configured {
            Some(NotReady::MissingCredential)
        } else if self.model.is_none() {
            Some(NotReady::MissingModel)
        } else if !self.has_content {
            Some(NotReady::MissingContent)
        } else {
            None
        }
    }

    pub fn is_ready(&self) -> bool {
        self.blocker().is_none()
    }
}

/// Runs criteria against content through a [`ModelClient`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisDispatcher {
    criteria: CriteriaSet,
}

impl AnalysisDispatcher {
    pub fn new(criteria: CriteriaSet) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &CriteriaSet {
        &self.criteria
    }

    pub fn criterion(&self, id: &str) -> Result<&Criterion, AnalysisError> {
        self.criteria
            .get(id)
            .ok_or_else(|| AnalysisError::UnknownCriterion(id.to_string()))
    }

    /// Renders the criterion's template around `content`.
    pub fn prompt(&self, criterion: &str, content: &str) -> Result<String, AnalysisError> {
        Ok(self.criterion(criterion)?.template.render(content))
    }

    /// Analyzes `content` for one criterion.
    ///
    /// The response text is returned as-is. Failures are wrapped with the
    /// criterion name and model identifier; nothing is retried.
    pub async fn analyze(
        &self, client: &ModelClient, criterion: &str, content: &str, model: &str,
    ) -> Result<Analysis, AnalysisError> {
        let criterion = self.criterion(criterion)?;

        if let Some(blocker) = Readiness::of(client, content, Some(model)).blocker() {
            return Err(blocker.into());
        }

        let prompt = criterion.template.render(content);
        let text = client
            .generate(model, &prompt)
            .await
            .map_err(|source| AnalysisError::Call {
                criterion: criterion.name.clone(),
                model: model.to_string(),
                source,
            })?;

        Ok(Analysis {
            criterion: criterion.id.clone(),
            name: criterion.name.clone(),
            heading: criterion.heading.clone(),
            model: model.to_string(),
            text,
        })
    }
}
