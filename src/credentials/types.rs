//! Credential set type and the reserved placeholder sentinels.

use crate::secrets::StoreCredentialsSecret;

/// Reserved access key ID meaning "no real credential". Used only against a
/// local store emulator; any component receiving this pair in a managed
/// context must treat it as absent.
pub const PLACEHOLDER_ACCESS_KEY_ID: &str = "fakeLocalKey";

/// Reserved secret key counterpart of [`PLACEHOLDER_ACCESS_KEY_ID`].
pub const PLACEHOLDER_SECRET_KEY: &str = "fakeLocalSecret";

/// A resolved credential pair plus region.
///
/// Never partially populated: constructors either set both key fields or
/// neither. The keyless form is the "ambient" set, where the store client is
/// expected to fall back to platform-level credential discovery such as an
/// attached execution role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSet {
    pub access_key_id: Option<String>,
    pub secret_key: Option<String>,
    pub region: String,
}

impl CredentialSet {
    /// A concrete key pair retrieved from the secret store or environment.
    pub fn keyed(
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: Some(access_key_id.into()),
            secret_key: Some(secret_key.into()),
            region: region.into(),
        }
    }

    /// The fixed local-development pair for a store emulator.
    pub fn placeholder(region: impl Into<String>) -> Self {
        Self::keyed(PLACEHOLDER_ACCESS_KEY_ID, PLACEHOLDER_SECRET_KEY, region)
    }

    /// Region only; credentials left to ambient platform discovery.
    pub fn ambient(region: impl Into<String>) -> Self {
        Self { access_key_id: None, secret_key: None, region: region.into() }
    }

    /// Build a candidate set from a secret body, defaulting the region from
    /// the runtime context when the secret does not carry one.
    pub fn from_secret(secret: StoreCredentialsSecret, fallback_region: &str) -> Self {
        let region = secret
            .region
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| fallback_region.to_string());
        Self {
            access_key_id: Some(secret.access_key_id),
            secret_key: Some(secret.secret_key),
            region,
        }
    }

    /// Whether this is a usable real pair: both fields present, non-empty,
    /// and neither equal to its reserved placeholder value.
    pub fn is_real(&self) -> bool {
        match (&self.access_key_id, &self.secret_key) {
            (Some(key), Some(secret)) => {
                !key.is_empty()
                    && !secret.is_empty()
                    && key != PLACEHOLDER_ACCESS_KEY_ID
                    && secret != PLACEHOLDER_SECRET_KEY
            }
            _ => false,
        }
    }
}
