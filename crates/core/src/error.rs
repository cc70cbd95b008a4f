//! Error types for content acquisition and analysis.
//!
//! Each boundary raises its own error type so a caller can turn it into a
//! user-facing message right where it happens:
//!
//! - [`FetchError`] while retrieving and extracting a page
//! - [`ConfigError`] for credentials, model selection and static configuration
//! - [`TemplateError`] when a prompt template is malformed
//! - [`CallError`] when the remote model call fails
//! - [`AnalysisError`] wrapping a [`CallError`] with criterion context
//!
//! [`NotReady`] is the odd one out: it is a precondition that was not met
//! yet (no content, no key, no model) and is shown as a warning rather than
//! a failure.
//!
//! # Example
//!
//! ```rust
//! use overview_core::{AnalysisError, NotReady};
//!
//! let err = AnalysisError::from(NotReady::MissingContent);
//! assert!(err.is_warning());
//! ```

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while fetching a page and extracting its paragraphs.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL parsed but is not HTTP(S).
    #[error("Unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Connection, DNS or TLS failure.
    #[error("HTTP request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("Server responded with HTTP {status}")]
    Status { status: u16 },

    /// The body could not be read or decoded.
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Errors in credentials, model selection and static configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The supplied API key is empty or whitespace.
    #[error("API key is empty")]
    EmptyCredential,

    /// The remote service refused the API key on first use.
    #[error("Invalid API Key or configuration error: {reason}")]
    Rejected { reason: String },

    /// The requested model is not in the catalog.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// A model catalog was built without any options.
    #[error("Model catalog has no models")]
    EmptyCatalog,

    /// Checklist thresholds are out of order.
    #[error("Invalid thresholds: medium ({medium}) must not exceed high ({high})")]
    InvalidThresholds { high: u32, medium: u32 },

    /// The HTTP client could not be initialised.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    /// A criteria definition is malformed.
    #[error("Invalid criteria definition: {0}")]
    Criteria(String),

    /// A criterion carries a malformed template.
    #[error("Invalid prompt template for '{criterion}': {source}")]
    Template {
        criterion: String,
        #[source]
        source: TemplateError,
    },
}

/// Prompt template validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template has no {{user_content}} slot")]
    MissingSlot,

    #[error("template has {count} {{user_content}} slots, expected exactly one")]
    DuplicateSlot { count: usize },

    #[error("template has unknown placeholder {{{name}}}")]
    UnknownPlaceholder { name: String },
}

/// Why a model call failed.
#[derive(Error, Debug)]
pub enum CallErrorKind {
    #[error("no API key configured")]
    NotConfigured,

    /// The key was refused (HTTP 401/403 or `API_KEY_INVALID`).
    #[error("API key rejected: {0}")]
    Rejected(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("network error: {0}")]
    Network(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The model exists but cannot do free-text generation.
    #[error("model does not support generateContent: {0}")]
    Unsupported(String),

    /// The response carried no text, e.g. because it was blocked.
    #[error("the model returned no text{}", .0.as_deref().map(|r| format!(" ({r})")).unwrap_or_default())]
    EmptyResponse(Option<String>),

    #[error("unexpected response: {0}")]
    Parse(String),
}

/// A failed call to the text-generation service.
#[derive(Error, Debug)]
#[error("model {model}: {kind}")]
pub struct CallError {
    /// Model identifier the call was made against.
    pub model: String,
    #[source]
    pub kind: CallErrorKind,
}

impl CallError {
    pub fn new(model: impl Into<String>, kind: CallErrorKind) -> Self {
        Self { model: model.into(), kind }
    }

    /// Returns the configuration error when this failure means the key was refused.
    pub fn rejection(&self) -> Option<ConfigError> {
        match &self.kind {
            CallErrorKind::Rejected(reason) => Some(ConfigError::Rejected { reason: reason.clone() }),
            _ => None,
        }
    }
}

/// A precondition that is not met yet.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotReady {
    #[error("Please provide content first.")]
    MissingContent,

    #[error("Google AI not configured. Please enter your API key.")]
    MissingCredential,

    #[error("Please select a Gemini model.")]
    MissingModel,

    #[error("Please enter a search query or content topic first.")]
    MissingTopic,
}

/// Errors surfaced by the analysis dispatcher.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Precondition not met; nothing was sent.
    #[error(transparent)]
    NotReady(#[from] NotReady),

    #[error("Unknown analysis criterion: {0}")]
    UnknownCriterion(String),

    /// The model call failed.
    #[error("Error during analysis for {criterion} using model {model}: {source}")]
    Call {
        criterion: String,
        model: String,
        #[source]
        source: CallError,
    },
}

impl AnalysisError {
    /// Whether this is a "not ready yet" warning rather than a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, AnalysisError::NotReady(_))
    }
}

/// Crate-wide error type for operations spanning several boundaries.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Call(#[from] CallError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
