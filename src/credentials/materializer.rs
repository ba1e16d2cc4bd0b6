//! Configuration materialization: one pure mapping from runtime state to a
//! ready-to-use store client configuration.

use crate::config::RuntimeContext;
use crate::errors::Result;
use crate::secrets::SecretStoreClient;

use super::env::EnvReader;
use super::resolver::CredentialResolver;
use super::types::CredentialSet;

/// The record handed to the store client constructor.
///
/// `endpoint` is set only in local mode and points at the store emulator; in
/// managed mode the client resolves the real service endpoint itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_key: Option<String>,
}

/// Build a [`ClientConfig`] for the given runtime context.
///
/// A single resolution attempt per call, no retries and no caching; callers
/// decide both. `Error::CredentialsUnavailable` from the resolver propagates
/// unchanged.
pub async fn materialize<S: SecretStoreClient, E: EnvReader>(
    ctx: &RuntimeContext,
    resolver: &CredentialResolver<S, E>,
    secret_name: &str,
    local_endpoint: &str,
) -> Result<ClientConfig> {
    let resolved = resolver.resolve(ctx, secret_name).await?;
    Ok(client_config(ctx, resolved, local_endpoint))
}

fn client_config(
    ctx: &RuntimeContext,
    credentials: CredentialSet,
    local_endpoint: &str,
) -> ClientConfig {
    ClientConfig {
        endpoint: ctx.is_local().then(|| local_endpoint.to_string()),
        region: credentials.region,
        access_key_id: credentials.access_key_id,
        secret_key: credentials.secret_key,
    }
}
