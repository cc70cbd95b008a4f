use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use overview_core::{CriteriaSet, FetchConfig, GeminiConfig};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";

/// Server settings, read from `OVERVIEW_*` environment variables.
///
/// None of them are required. The Gemini API key is never read from the
/// environment here; each session supplies its own.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub fetch: FetchConfig,
    pub gemini: GeminiConfig,
    pub criteria_path: Option<PathBuf>,
    pub session_idle: Duration,
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let addr = lookup("OVERVIEW_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()
            .context("OVERVIEW_ADDR must be a socket address like 127.0.0.1:8501")?;

        let fetch = FetchConfig { timeout: number(&lookup, "OVERVIEW_FETCH_TIMEOUT_SECS", 10)?, ..Default::default() };

        let mut gemini = GeminiConfig::default();
        if let Some(base_url) = lookup("OVERVIEW_GEMINI_BASE_URL") {
            url::Url::parse(&base_url).context("OVERVIEW_GEMINI_BASE_URL must be an absolute URL")?;
            gemini.base_url = base_url.trim_end_matches('/').to_string();
        }

        let criteria_path = lookup("OVERVIEW_CRITERIA_PATH").filter(|p| !p.is_empty()).map(PathBuf::from);
        let session_idle = number(&lookup, "OVERVIEW_SESSION_IDLE_MINUTES", 60)?
            .checked_mul(60)
            .map(Duration::from_secs)
            .context("OVERVIEW_SESSION_IDLE_MINUTES is too large")?;
        let request_timeout = Duration::from_secs(number(&lookup, "OVERVIEW_REQUEST_TIMEOUT_SECS", 90)?);

        Ok(Self { addr, fetch, gemini, criteria_path, session_idle, request_timeout })
    }

    /// The configured criteria file, or the built-in set.
    pub fn load_criteria(&self) -> anyhow::Result<CriteriaSet> {
        match &self.criteria_path {
            Some(path) => CriteriaSet::from_json_file(path)
                .with_context(|| format!("Failed to load criteria from {}", path.display())),
            None => Ok(CriteriaSet::builtin()),
        }
    }
}

fn number(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> anyhow::Result<u64> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a whole number, got {value:?}")),
        None => Ok(default),
    }
}
