//! Credential lookup capability.

use std::collections::HashMap;

use crate::security::SecretString;

/// Key-value credential store for third-party API keys.
///
/// `None` means the credential was never provisioned; methods that need
/// one fail fast instead of attempting an unauthenticated call.
pub trait CredentialStore: Send + Sync {
    /// Look up a credential by name.
    fn get(&self, name: &str) -> Option<SecretString>;
}

/// Credentials read from process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    /// Create an environment-backed store.
    pub fn new() -> Self {
        Self
    }
}

impl CredentialStore for EnvCredentials {
    fn get(&self, name: &str) -> Option<SecretString> {
        std::env::var(name).ok().map(SecretString::new)
    }
}

/// Fixed in-memory credentials, for tests and embedding applications
/// that manage provisioning themselves.
#[derive(Default)]
pub struct StaticCredentials {
    values: HashMap<String, SecretString>,
}

impl StaticCredentials {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values
            .insert(name.into(), SecretString::new(value.into()));
        self
    }
}

impl CredentialStore for StaticCredentials {
    fn get(&self, name: &str) -> Option<SecretString> {
        self.values.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_lookup() {
        let store = StaticCredentials::new().with("CAPTIONS_API_KEY", "key-123");
        assert_eq!(
            store.get("CAPTIONS_API_KEY").map(|s| s.expose().to_string()),
            Some("key-123".to_string())
        );
        assert!(store.get("OTHER_KEY").is_none());
    }

    #[test]
    fn test_env_lookup_missing() {
        let store = EnvCredentials::new();
        assert!(store.get("TRANSCRIPTION_TEST_UNSET_VAR").is_none());
    }
}
