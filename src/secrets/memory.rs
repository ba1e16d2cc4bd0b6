//! In-memory secret store for tests and offline development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::client::{SecretLookup, SecretStoreClient, StoreCredentialsSecret};

/// Secret store backed by a fixed in-memory map.
///
/// Substitutes for [`super::AwsSecretStore`] in tests. Records how many
/// lookups were made so callers can assert the store was (or was not)
/// consulted.
#[derive(Debug, Default)]
pub struct StaticSecretStore {
    secrets: HashMap<String, SecretLookup>,
    invocations: AtomicUsize,
}

impl StaticSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lookup outcome for a secret name.
    pub fn with_lookup(mut self, name: impl Into<String>, lookup: SecretLookup) -> Self {
        self.secrets.insert(name.into(), lookup);
        self
    }

    /// Register a found credentials document for a secret name.
    pub fn with_secret(self, name: impl Into<String>, secret: StoreCredentialsSecret) -> Self {
        self.with_lookup(name, SecretLookup::Found(secret))
    }

    /// Number of `fetch` calls made against this store.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStoreClient for StaticSecretStore {
    async fn fetch(&self, name: &str) -> SecretLookup {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.secrets.get(name).cloned().unwrap_or(SecretLookup::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_secret_is_not_found() {
        let store = StaticSecretStore::new();
        assert_eq!(store.fetch("missing").await, SecretLookup::NotFound);
        assert_eq!(store.invocations(), 1);
    }

    #[tokio::test]
    async fn test_registered_secret_is_returned() {
        let secret = StoreCredentialsSecret {
            access_key_id: "AKIA123".to_string(),
            secret_key: "s3cr3t".to_string(),
            region: None,
        };
        let store = StaticSecretStore::new().with_secret("notes/creds", secret.clone());

        assert_eq!(store.fetch("notes/creds").await, SecretLookup::Found(secret));
        assert_eq!(store.invocations(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_lookup_passes_through() {
        let store = StaticSecretStore::new()
            .with_lookup("flaky", SecretLookup::Unavailable("timeout".to_string()));
        assert!(matches!(store.fetch("flaky").await, SecretLookup::Unavailable(_)));
    }
}
