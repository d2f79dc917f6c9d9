//! Secret values with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of sensitive
//! values.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A secret string that won't be logged or displayed.
///
/// API keys flow from the credential store into request headers through
/// this type; `Debug` and `Display` both render `[REDACTED]`, so a key
/// can't leak through error messages or tracing output.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this at the point of use (e.g. building an API
    /// request header).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts() {
        let secret = SecretString::new("sk-captions-key");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("captions"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_display_redacts() {
        let secret = SecretString::new("sk-captions-key");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_expose_returns_value() {
        let secret = SecretString::new("sk-captions-key");
        assert_eq!(secret.expose(), "sk-captions-key");
    }
}
