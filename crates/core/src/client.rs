//! Model client: a credential plus a text-generation backend.
//!
//! The backend is a trait so the HTTP implementation
//! ([`GeminiBackend`](crate::GeminiBackend)) can be swapped for a fake in
//! tests. [`GenerationHook`]s observe every call, which is where cost
//! tracking plugs in without touching the client.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::credential::Credential;
use crate::{CallError, CallErrorKind, ConfigError};

/// Token counts reported by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

/// A successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub usage: Option<Usage>,
}

impl Generation {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), usage: None }
    }
}

/// Anything that can turn a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, credential: &Credential, model: &str, prompt: &str) -> Result<Generation, CallError>;
}

/// Observer for model calls.
pub trait GenerationHook: Send + Sync {
    fn before_call(&self, _model: &str, _prompt: &str) {}

    fn after_call(&self, _model: &str, _outcome: &Result<Generation, CallError>) {}
}

/// Counts calls and tokens across every client it is attached to.
#[derive(Debug, Default)]
pub struct UsageTally {
    calls: AtomicU64,
    failures: AtomicU64,
    prompt_tokens: AtomicU64,
    output_tokens: AtomicU64,
}

/// Point-in-time copy of a [`UsageTally`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UsageSnapshot {
    pub calls: u64,
    pub failures: u64,
    pub prompt_tokens: u64,
    pub output_tokens: u64,
}

impl UsageTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot {
            calls: self.calls.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            prompt_tokens: self.prompt_tokens.load(Ordering::Relaxed),
            output_tokens: self.output_tokens.load(Ordering::Relaxed),
        }
    }
}

impl GenerationHook for UsageTally {
    fn before_call(&self, _model: &str, _prompt: &str) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }

    fn after_call(&self, _model: &str, outcome: &Result<Generation, CallError>) {
        match outcome {
            Ok(generation) => {
                if let Some(usage) = generation.usage {
                    self.prompt_tokens.fetch_add(usage.prompt_tokens, Ordering::Relaxed);
                    self.output_tokens.fetch_add(usage.output_tokens, Ordering::Relaxed);
                }
            }
            Err(_) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// Credential holder that forwards prompts to a [`TextGenerator`].
#[derive(Clone)]
pub struct ModelClient {
    backend: Arc<dyn TextGenerator>,
    credential: Option<Credential>,
    hooks: Vec<Arc<dyn GenerationHook>>,
}

impl ModelClient {
    /// Creates an unconfigured client.
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self { backend, credential: None, hooks: Vec::new() }
    }

    /// Attaches a hook that sees every call.
    pub fn with_hook(mut self, hook: Arc<dyn GenerationHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Stores a credential after local validation.
    ///
    /// The remote service only judges the key on the first call, so a
    /// successful `configure` does not prove the key works. A failed
    /// `configure` leaves the client unconfigured.
    pub fn configure(&mut self, credential: &str) -> Result<(), ConfigError> {
        match Credential::new(credential) {
            Ok(credential) => {
                self.credential = Some(credential);
                Ok(())
            }
            Err(e) => {
                self.credential = None;
                Err(e)
            }
        }
    }

    /// Drops the credential, e.g. after the service rejected it.
    pub fn clear(&mut self) {
        self.credential = None;
    }

    pub fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    /// Generates text for `prompt` with `model`.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, CallError> {
        self.generate_with_usage(model, prompt).await.map(|g| g.text)
    }

    /// Like [`generate`](Self::generate) but keeps the token usage.
    pub async fn generate_with_usage(&self, model: &str, prompt: &str) -> Result<Generation, CallError> {
        let credential = self
            .credential
            .as_ref()
            .ok_or_else(|| CallError::new(model, CallErrorKind::NotConfigured))?;

        for hook in &self.hooks {
            hook.before_call(model, prompt);
        }

        let start = Instant::now();
        let outcome = self.backend.generate(credential, model, prompt).await;

        match &outcome {
            Ok(generation) => debug!(
                model,
                duration_ms = start.elapsed().as_millis() as u64,
                chars = generation.text.len(),
                "model generation"
            ),
            Err(e) => warn!(model, error = %e, "model generation failed"),
        }

        for hook in &self.hooks {
            hook.after_call(model, &outcome);
        }

        outcome
    }
}

impl fmt::Debug for ModelClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelClient")
            .field("configured", &self.is_configured())
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
