//! AWS Secrets Manager secret store backend.

use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_secretsmanager::Client;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::client::{SecretLookup, SecretStoreClient, StoreCredentialsSecret};

/// Secret store client backed by AWS Secrets Manager.
///
/// The SDK handle is built lazily on first use and then shared for the
/// process lifetime. Concurrent first calls race through the [`OnceCell`]
/// initialization gate; losers discard their handle, which is safe because
/// construction has no side effects.
#[derive(Debug)]
pub struct AwsSecretStore {
    region: String,
    client: OnceCell<Client>,
}

impl AwsSecretStore {
    /// Create a secret store client for the given region. No network I/O
    /// happens until the first [`SecretStoreClient::fetch`] call.
    pub fn new(region: impl Into<String>) -> Self {
        Self { region: region.into(), client: OnceCell::new() }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                    .region(Region::new(self.region.clone()))
                    .load()
                    .await;
                Client::new(&config)
            })
            .await
    }
}

#[async_trait]
impl SecretStoreClient for AwsSecretStore {
    async fn fetch(&self, name: &str) -> SecretLookup {
        let client = self.client().await;

        let response = match client.get_secret_value().secret_id(name).send().await {
            Ok(response) => response,
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_resource_not_found_exception() {
                    // Expected when no credentials secret has been provisioned.
                    info!(secret = %name, "Secret not found in Secrets Manager");
                    return SecretLookup::NotFound;
                }
                warn!(secret = %name, error = %service_err, "Secrets Manager lookup failed");
                return SecretLookup::Unavailable(service_err.to_string());
            }
        };

        let Some(body) = response.secret_string() else {
            warn!(secret = %name, "Secret is binary, expected a JSON string");
            return SecretLookup::NotFound;
        };

        match serde_json::from_str::<StoreCredentialsSecret>(body) {
            Ok(values) => SecretLookup::Found(values),
            Err(err) => {
                // Body unusable; treated the same as an absent secret.
                warn!(secret = %name, error = %err, "Failed to parse secret body as JSON");
                SecretLookup::NotFound
            }
        }
    }
}
