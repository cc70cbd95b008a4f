//! Page retrieval over HTTP(S).
//!
//! One GET per call, no retries, fixed timeout. The body is handed to
//! [`extract_paragraphs`](crate::extract_paragraphs).

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::FetchError;
use crate::extract::{ExtractedContent, extract_paragraphs};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Optional User-Agent; reqwest's default headers are used when unset.
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 10, user_agent: None }
    }
}

/// Validates that `url` is a well-formed HTTP(S) URL.
pub fn parse_http_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// Fetches the raw body of a page.
///
/// Fails on malformed URLs, network errors, timeouts and non-2xx statuses.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String, FetchError> {
    let parsed_url = parse_http_url(url)?;

    let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout));
    if let Some(ua) = &config.user_agent {
        builder = builder.user_agent(ua.as_str());
    }
    let client = builder.build().map_err(|e| FetchError::Network(e.to_string()))?;

    let response = client.get(parsed_url).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout { timeout: config.timeout }
        } else {
            FetchError::Network(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status { status: status.as_u16() });
    }

    response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout { timeout: config.timeout }
        } else {
            FetchError::Body(e.to_string())
        }
    })
}

/// Fetches a page and extracts its paragraph text.
pub async fn fetch_content(url: &str, config: &FetchConfig) -> Result<ExtractedContent, FetchError> {
    let html = fetch_url(url, config).await?;
    Ok(extract_paragraphs(&html))
}

/// Fetches a page and returns only the newline-joined paragraph text.
pub async fn fetch_text(url: &str, config: &FetchConfig) -> Result<String, FetchError> {
    fetch_content(url, config).await.map(|extracted| extracted.text)
}
