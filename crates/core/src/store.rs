//! The working-content slot and the ways of filling it.
//!
//! A [`ContentStore`] holds exactly one string. Every input event replaces it
//! wholesale; nothing is kept from earlier inputs.

use serde::{Deserialize, Serialize};

/// Characters shown in a fetched-content preview.
pub const PREVIEW_CHARS: usize = 1000;

/// How the user supplied content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum ContentInput {
    /// A page to fetch; its paragraph text becomes the content.
    Url(String),
    /// Text stored exactly as given.
    Text(String),
    /// A topic or target query, stored as `Content Topic: <topic>`.
    Topic(String),
}

impl ContentInput {
    /// Short label for messages and logs.
    pub fn mode(&self) -> &'static str {
        match self {
            ContentInput::Url(_) => "url",
            ContentInput::Text(_) => "text",
            ContentInput::Topic(_) => "topic",
        }
    }

    /// Content for the non-network modes. `None` for URLs and for empty input.
    pub fn direct_content(&self) -> Option<String> {
        match self {
            ContentInput::Url(_) => None,
            ContentInput::Text(text) if !text.is_empty() => Some(text.clone()),
            ContentInput::Topic(topic) if !topic.trim().is_empty() => Some(format!("Content Topic: {}", topic.trim())),
            _ => None,
        }
    }
}

/// Single mutable content slot, last writer wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentStore {
    content: String,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content unconditionally.
    pub fn set(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn get(&self) -> &str {
        &self.content
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Records the outcome of a fetch. Failures clear the slot so stale
    /// content never survives a failed fetch.
    pub fn record_fetch<E>(&mut self, outcome: &Result<String, E>) {
        match outcome {
            Ok(text) => self.set(text.as_str()),
            Err(_) => self.clear(),
        }
    }

    /// Applies a paste or topic input. Returns `false` when there was nothing
    /// to apply, in which case the slot is left untouched.
    pub fn apply_direct(&mut self, input: &ContentInput) -> bool {
        match input.direct_content() {
            Some(content) => {
                self.set(content);
                true
            }
            None => false,
        }
    }

    /// The first [`PREVIEW_CHARS`] characters followed by `...`.
    pub fn preview(&self) -> String {
        preview(&self.content, PREVIEW_CHARS)
    }
}

/// Truncates `text` to `limit` characters and appends `...`.
pub fn preview(text: &str, limit: usize) -> String {
    let head: String = text.chars().take(limit).collect();
    format!("{head}...")
}
