//! User-visible messages and the mapping from core errors onto them.
//!
//! Every error is turned into a notice at the handler boundary. Unmet
//! preconditions become `warning` notices with 409, failures become `error`
//! notices with 400 (bad input) or 502 (remote failure).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use overview_core::{AnalysisError, ConfigError, FetchError, NotReady};
use serde::Serialize;

/// Hint appended to failed model calls.
pub const MODEL_HINT: &str = "Hint: Ensure the selected model supports 'generateContent' and your API key has access.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: Level::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: Level::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: Level::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: Level::Error, message: message.into() }
    }
}

/// Body of every API response.
#[derive(Debug, Serialize)]
pub struct Reply<T: Serialize> {
    pub notices: Vec<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Reply<T> {
    pub fn new(data: T) -> Self {
        Self { notices: Vec::new(), data: Some(data) }
    }

    pub fn notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}

impl Reply<()> {
    pub fn notices(notices: Vec<Notice>) -> Self {
        Self { notices, data: None }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// A failed or refused action.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub notices: Vec<Notice>,
}

impl ApiError {
    pub fn new(status: StatusCode, notice: Notice) -> Self {
        Self { status, notices: vec![notice] }
    }

    pub fn with(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Reply::notices(self.notices))).into_response()
    }
}

impl From<NotReady> for ApiError {
    fn from(err: NotReady) -> Self {
        ApiError::new(StatusCode::CONFLICT, Notice::warning(err.to_string()))
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        let status = match err {
            FetchError::InvalidUrl(_) | FetchError::UnsupportedScheme(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };
        ApiError::new(status, Notice::error(format!("Error fetching URL: {err}")))
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, Notice::error(err.to_string()))
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::NotReady(not_ready) => not_ready.into(),
            AnalysisError::UnknownCriterion(_) => ApiError::new(StatusCode::NOT_FOUND, Notice::error(err.to_string())),
            AnalysisError::Call { .. } => {
                ApiError::new(StatusCode::BAD_GATEWAY, Notice::error(err.to_string())).with(Notice::info(MODEL_HINT))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use overview_core::{CallError, CallErrorKind};

    use super::*;

    #[test]
    fn test_not_ready_is_warning_conflict() {
        let err = ApiError::from(AnalysisError::from(NotReady::MissingContent));
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.notices, vec![Notice::warning("Please provide content first.")]);
    }

    #[test]
    fn test_call_failure_is_bad_gateway_with_hint() {
        let err = ApiError::from(AnalysisError::Call {
            criterion: "Trust Signals".into(),
            model: "gemini-1.0-pro".into(),
            source: CallError::new("gemini-1.0-pro", CallErrorKind::Timeout(60)),
        });
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.notices.len(), 2);
        assert_eq!(err.notices[0].level, Level::Error);
        assert!(err.notices[0].message.contains("Trust Signals"));
        assert_eq!(err.notices[1].message, MODEL_HINT);
    }

    #[test]
    fn test_fetch_status_mapping() {
        assert_eq!(ApiError::from(FetchError::InvalidUrl("x".into())).status, StatusCode::BAD_REQUEST);
        let err = ApiError::from(FetchError::Status { status: 500 });
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert!(err.notices[0].message.starts_with("Error fetching URL"));
    }
}
