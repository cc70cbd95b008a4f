//! API key handling.
//!
//! Uses `secrecy` so the key never shows up in logs, debug output or error
//! messages. It lives in memory for the session only.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::ConfigError;

/// A user-supplied API key.
pub struct Credential(SecretString);

impl Credential {
    /// Validates and wraps a key. Surrounding whitespace is dropped.
    pub fn new(value: &str) -> Result<Self, ConfigError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyCredential);
        }
        Ok(Self(SecretString::from(trimmed.to_string())))
    }

    /// Only call this when building the outgoing request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for Credential {
    fn clone(&self) -> Self {
        Self(SecretString::from(self.expose().to_string()))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank() {
        assert!(matches!(Credential::new(""), Err(ConfigError::EmptyCredential)));
        assert!(matches!(Credential::new(" \t\n"), Err(ConfigError::EmptyCredential)));
    }

    #[test]
    fn test_trims_and_exposes() {
        let cred = Credential::new("  AIza-test  ").unwrap();
        assert_eq!(cred.expose(), "AIza-test");
    }

    #[test]
    fn test_debug_is_redacted() {
        let cred = Credential::new("AIza-secret").unwrap();
        let debug = format!("{:?}", cred);
        assert!(!debug.contains("AIza-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
