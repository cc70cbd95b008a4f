//! HTTP backend for the Gemini `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::client::{Generation, TextGenerator, Usage};
use crate::credential::Credential;
use crate::{CallError, CallErrorKind, ConfigError};

/// Endpoint settings for [`GeminiBackend`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_version: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_version: "v1beta".to_string(),
            timeout: 60,
        }
    }
}

/// Calls `POST {base}/{version}/models/{model}:generateContent`.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    http_client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig) -> Result<Self, ConfigError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { http_client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!(
            "{}/{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version,
            model
        )
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct UsageMetadata {
    prompt_token_count: u64,
    candidates_token_count: u64,
    total_token_count: u64,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ErrorBody {
    message: String,
    status: String,
    details: Vec<ErrorDetail>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ErrorDetail {
    reason: Option<String>,
}

/// Maps a non-2xx response onto a [`CallErrorKind`].
fn classify_error(status: u16, body: &str) -> CallErrorKind {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let message = if envelope.error.message.is_empty() { body.trim().to_string() } else { envelope.error.message };
    let key_invalid = envelope
        .error
        .details
        .iter()
        .any(|d| d.reason.as_deref() == Some("API_KEY_INVALID"));

    match status {
        401 | 403 => CallErrorKind::Rejected(message),
        400 if key_invalid => CallErrorKind::Rejected(message),
        404 => CallErrorKind::Unsupported(message),
        400 if message.contains("not supported for generateContent") => CallErrorKind::Unsupported(message),
        _ if envelope.error.status.is_empty() => CallErrorKind::Api { status, message },
        _ => CallErrorKind::Api { status, message: format!("{}: {}", envelope.error.status, message) },
    }
}

/// Pulls the text out of a successful response body.
fn parse_generation(body: &str) -> Result<Generation, CallErrorKind> {
    let response: GenerateResponse = serde_json::from_str(body).map_err(|e| CallErrorKind::Parse(e.to_string()))?;

    let usage = response.usage_metadata.map(|u| Usage {
        prompt_tokens: u.prompt_token_count,
        output_tokens: u.candidates_token_count,
        total_tokens: u.total_token_count,
    });

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response.prompt_feedback.and_then(|f| f.block_reason);
        return Err(CallErrorKind::EmptyResponse(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(CallErrorKind::EmptyResponse(candidate.finish_reason));
    }

    Ok(Generation { text, usage })
}

#[async_trait]
impl TextGenerator for GeminiBackend {
    async fn generate(&self, credential: &Credential, model: &str, prompt: &str) -> Result<Generation, CallError> {
        let request = GenerateRequest { contents: [RequestContent { role: "user", parts: [RequestPart { text: prompt }] }] };

        let response = self
            .http_client
            .post(self.endpoint(model))
            .header("x-goog-api-key", credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let kind = if e.is_timeout() {
                    CallErrorKind::Timeout(self.config.timeout)
                } else {
                    CallErrorKind::Network(e.without_url().to_string())
                };
                CallError::new(model, kind)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CallError::new(model, CallErrorKind::Network(e.to_string())))?;

        if !status.is_success() {
            return Err(CallError::new(model, classify_error(status.as_u16(), &body)));
        }

        parse_generation(&body).map_err(|kind| CallError::new(model, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_models_prefix() {
        let backend = GeminiBackend::new(GeminiConfig { base_url: "http://localhost:1/".into(), ..Default::default() })
            .unwrap();
        assert_eq!(
            backend.endpoint("models/gemini-1.0-pro"),
            "http://localhost:1/v1beta/models/gemini-1.0-pro:generateContent"
        );
    }

    #[test]
    fn test_parse_generation_joins_parts() {
        let body = r#"{
            "candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "world"}], "role": "model"}, "finishReason": "STOP"}],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4, "totalTokenCount": 16}
        }"#;
        let generation = parse_generation(body).unwrap();
        assert_eq!(generation.text, "Hello world");
        assert_eq!(generation.usage, Some(Usage { prompt_tokens: 12, output_tokens: 4, total_tokens: 16 }));
    }

    #[test]
    fn test_parse_generation_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert!(matches!(
            parse_generation(body),
            Err(CallErrorKind::EmptyResponse(Some(reason))) if reason == "SAFETY"
        ));
    }

    #[test]
    fn test_parse_generation_garbage() {
        assert!(matches!(parse_generation("<html>"), Err(CallErrorKind::Parse(_))));
    }

    #[test]
    fn test_classify_invalid_key() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT", "details": [{"@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": "API_KEY_INVALID"}]}}"#;
        assert!(matches!(classify_error(400, body), CallErrorKind::Rejected(m) if m.contains("API key not valid")));
        assert!(matches!(classify_error(403, "forbidden"), CallErrorKind::Rejected(_)));
    }

    #[test]
    fn test_classify_unsupported_model() {
        let body = r#"{"error": {"code": 404, "message": "models/gemini-x is not found for API version v1beta, or is not supported for generateContent.", "status": "NOT_FOUND"}}"#;
        assert!(matches!(classify_error(404, body), CallErrorKind::Unsupported(_)));
    }

    #[test]
    fn test_classify_other() {
        let body = r#"{"error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        match classify_error(429, body) {
            CallErrorKind::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "RESOURCE_EXHAUSTED: Resource exhausted");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(classify_error(500, "oops"), CallErrorKind::Api { status: 500, message } if message == "oops"));
    }
}
