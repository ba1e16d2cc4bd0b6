//! Core secret store client trait and lookup types.

use async_trait::async_trait;
use serde::Deserialize;

/// Credential material stored in the secret body.
///
/// Expected secret format:
///
/// ```json
/// {
///     "aws_access_key_id": "AKIA...",
///     "aws_secret_access_key": "...",
///     "region": "eu-west-1"
/// }
/// ```
///
/// Missing fields deserialize to empty strings so a half-filled secret is
/// representable; whether the pair is usable is the resolver's call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreCredentialsSecret {
    #[serde(rename = "aws_access_key_id", default)]
    pub access_key_id: String,

    #[serde(rename = "aws_secret_access_key", default)]
    pub secret_key: String,

    #[serde(default)]
    pub region: Option<String>,
}

/// Outcome of a secret store lookup.
///
/// This union never carries an `Err`: backends map every failure onto one of
/// these variants so callers can apply policy without unwrapping transport
/// errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretLookup {
    /// The secret exists and parsed as a credentials document.
    Found(StoreCredentialsSecret),

    /// The secret does not exist, or its body was unusable (binary payload,
    /// malformed JSON). Malformed bodies are logged by the backend but are
    /// not a distinct outcome.
    NotFound,

    /// The secret store could not be reached or answered with a service
    /// fault. Retrying is the caller's choice, never done here.
    Unavailable(String),
}

/// Trait for secret store backends.
///
/// Implementations MUST NOT log secret values and MUST NOT propagate
/// backend exceptions past this boundary.
#[async_trait]
pub trait SecretStoreClient: Send + Sync {
    /// Fetch a named secret. An empty name is simply not found from the
    /// remote service's perspective; no client-side validation happens.
    async fn fetch(&self, name: &str) -> SecretLookup;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_deserializes_from_store_format() {
        let body = r#"{
            "aws_access_key_id": "AKIA123",
            "aws_secret_access_key": "s3cr3t",
            "region": "eu-west-1"
        }"#;
        let secret: StoreCredentialsSecret = serde_json::from_str(body).unwrap();
        assert_eq!(secret.access_key_id, "AKIA123");
        assert_eq!(secret.secret_key, "s3cr3t");
        assert_eq!(secret.region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn test_secret_tolerates_missing_fields() {
        let secret: StoreCredentialsSecret = serde_json::from_str("{}").unwrap();
        assert!(secret.access_key_id.is_empty());
        assert!(secret.secret_key.is_empty());
        assert!(secret.region.is_none());
    }
}
