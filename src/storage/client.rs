//! DynamoDB client construction from a materialized [`ClientConfig`].

use aws_config::Region;
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::Client;
use tracing::info;

use crate::credentials::ClientConfig;

/// Build the DynamoDB client for a materialized configuration.
///
/// Explicit static credentials are installed only when the configuration
/// carries both halves of the pair; otherwise the SDK's ambient provider
/// chain applies (attached execution role in managed deployments). The
/// endpoint override is present only in local mode and points at the store
/// emulator.
pub async fn build_store_client(config: &ClientConfig) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()));

    if let (Some(access_key_id), Some(secret_key)) = (&config.access_key_id, &config.secret_key) {
        loader = loader.credentials_provider(static_credentials(access_key_id, secret_key));
    }

    let shared_config = loader.load().await;
    let mut builder = aws_sdk_dynamodb::config::Builder::from(&shared_config);

    if let Some(endpoint) = &config.endpoint {
        info!(endpoint = %endpoint, "Using local store endpoint override");
        builder = builder.endpoint_url(endpoint);
    }

    Client::from_conf(builder.build())
}

/// Wrap an explicit key pair as a static credentials provider. No session
/// token and no expiry; the pair lives for the process lifetime.
fn static_credentials(access_key_id: &str, secret_key: &str) -> Credentials {
    Credentials::new(
        access_key_id.to_string(),
        secret_key.to_string(),
        None,
        None,
        "jotpad-client-config",
    )
}
