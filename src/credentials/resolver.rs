//! Environment-aware credential resolution.

use tracing::{info, warn};

use crate::config::RuntimeContext;
use crate::errors::{Error, Result};
use crate::secrets::{SecretLookup, SecretStoreClient};

use super::env::{EnvReader, ENV_ACCESS_KEY_ID, ENV_SECRET_ACCESS_KEY};
use super::types::CredentialSet;

/// Resolves item-store credentials for a [`RuntimeContext`].
///
/// The secret store and environment reader are owned collaborators; swap in
/// [`crate::secrets::StaticSecretStore`] and a recording [`EnvReader`] to
/// exercise the chain without any remote service.
pub struct CredentialResolver<S, E> {
    store: S,
    env: E,
}

impl<S: SecretStoreClient, E: EnvReader> CredentialResolver<S, E> {
    pub fn new(store: S, env: E) -> Self {
        Self { store, env }
    }

    /// Consume the resolver, handing back its collaborators. Tests use this
    /// to assert how often each was consulted.
    pub fn into_parts(self) -> (S, E) {
        (self.store, self.env)
    }

    /// Resolve credentials for the given context.
    ///
    /// Local mode always yields the fixed placeholder pair and consults
    /// neither the secret store nor the environment. Managed mode with the
    /// secret store enabled is fail-fast: a miss, a transient fault, or a
    /// placeholder-valued secret all surface as
    /// [`Error::CredentialsUnavailable`] rather than silently degrading to
    /// another source.
    pub async fn resolve(
        &self,
        ctx: &RuntimeContext,
        secret_name: &str,
    ) -> Result<CredentialSet> {
        if ctx.is_local() {
            info!("Using placeholder credentials for the local store emulator");
            return Ok(CredentialSet::placeholder(&ctx.region));
        }

        if ctx.use_secrets_manager {
            return self.resolve_from_secret_store(ctx, secret_name).await;
        }

        Ok(self.resolve_from_environment(ctx))
    }

    async fn resolve_from_secret_store(
        &self,
        ctx: &RuntimeContext,
        secret_name: &str,
    ) -> Result<CredentialSet> {
        match self.store.fetch(secret_name).await {
            SecretLookup::Found(secret) => {
                let candidate = CredentialSet::from_secret(secret, &ctx.region);
                if candidate.is_real() {
                    info!(region = %candidate.region, "Using secret store credentials");
                    return Ok(candidate);
                }
                warn!(secret = %secret_name, "Secret holds an empty or placeholder pair");
            }
            SecretLookup::NotFound => {
                warn!(secret = %secret_name, "Credentials secret not found");
            }
            SecretLookup::Unavailable(reason) => {
                warn!(secret = %secret_name, reason = %reason, "Secret store unavailable");
            }
        }

        // A managed deployment that opted into the secret store must never
        // run against the database on fake or missing credentials.
        Err(Error::credentials_unavailable(format!(
            "secret store did not yield a usable credential pair for '{}'",
            secret_name
        )))
    }

    fn resolve_from_environment(&self, ctx: &RuntimeContext) -> CredentialSet {
        let access_key_id = self.env.get(ENV_ACCESS_KEY_ID).unwrap_or_default();
        let secret_key = self.env.get(ENV_SECRET_ACCESS_KEY).unwrap_or_default();

        if !access_key_id.is_empty() && !secret_key.is_empty() {
            let candidate = CredentialSet::keyed(access_key_id, secret_key, &ctx.region);
            if candidate.is_real() {
                info!("Using environment variable credentials");
                return candidate;
            }
        }

        // Not a failure: the store client falls back to ambient
        // platform-level credential discovery (attached execution role).
        info!("No explicit credentials; relying on ambient platform discovery");
        CredentialSet::ambient(&ctx.region)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::config::RuntimeMode;
    use crate::secrets::{StaticSecretStore, StoreCredentialsSecret};

    /// Env reader over a fixed map, counting every read.
    #[derive(Default)]
    struct RecordingEnv {
        vars: HashMap<String, String>,
        reads: AtomicUsize,
    }

    impl RecordingEnv {
        fn with_var(mut self, key: &str, value: &str) -> Self {
            self.vars.insert(key.to_string(), value.to_string());
            self
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl EnvReader for RecordingEnv {
        fn get(&self, key: &str) -> Option<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.vars.get(key).cloned()
        }
    }

    fn managed_ctx(use_secrets_manager: bool) -> RuntimeContext {
        RuntimeContext {
            mode: RuntimeMode::Managed,
            region: "eu-west-1".to_string(),
            use_secrets_manager,
        }
    }

    fn local_ctx() -> RuntimeContext {
        RuntimeContext {
            mode: RuntimeMode::Local,
            region: "eu-west-1".to_string(),
            use_secrets_manager: true,
        }
    }

    fn real_secret() -> StoreCredentialsSecret {
        StoreCredentialsSecret {
            access_key_id: "AKIA123".to_string(),
            secret_key: "s3cr3t".to_string(),
            region: Some("eu-west-1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_local_mode_never_consults_collaborators() {
        let store = StaticSecretStore::new().with_secret("notes/creds", real_secret());
        let env = RecordingEnv::default().with_var(ENV_ACCESS_KEY_ID, "AKIAENV");
        let resolver = CredentialResolver::new(store, env);

        let set = resolver.resolve(&local_ctx(), "notes/creds").await.unwrap();
        assert_eq!(set, CredentialSet::placeholder("eu-west-1"));
        assert_eq!(resolver.store.invocations(), 0);
        assert_eq!(resolver.env.reads(), 0);
    }

    #[tokio::test]
    async fn test_managed_secret_store_hit_skips_environment() {
        let store = StaticSecretStore::new().with_secret("notes/creds", real_secret());
        let env = RecordingEnv::default()
            .with_var(ENV_ACCESS_KEY_ID, "AKIAENV")
            .with_var(ENV_SECRET_ACCESS_KEY, "env-secret");
        let resolver = CredentialResolver::new(store, env);

        let set = resolver.resolve(&managed_ctx(true), "notes/creds").await.unwrap();
        assert_eq!(set, CredentialSet::keyed("AKIA123", "s3cr3t", "eu-west-1"));
        assert_eq!(resolver.store.invocations(), 1);
        assert_eq!(resolver.env.reads(), 0);
    }

    #[tokio::test]
    async fn test_managed_secret_store_miss_fails_hard() {
        let store = StaticSecretStore::new();
        let resolver = CredentialResolver::new(store, RecordingEnv::default());

        let err = resolver.resolve(&managed_ctx(true), "notes/creds").await.unwrap_err();
        assert!(matches!(err, Error::CredentialsUnavailable(_)));
        // No silent fallback to environment variables after a miss.
        assert_eq!(resolver.env.reads(), 0);
    }

    #[tokio::test]
    async fn test_managed_transient_fault_fails_hard() {
        let store = StaticSecretStore::new()
            .with_lookup("notes/creds", SecretLookup::Unavailable("timeout".to_string()));
        let resolver = CredentialResolver::new(store, RecordingEnv::default());

        let err = resolver.resolve(&managed_ctx(true), "notes/creds").await.unwrap_err();
        assert!(matches!(err, Error::CredentialsUnavailable(_)));
    }

    #[tokio::test]
    async fn test_managed_placeholder_secret_fails_hard() {
        let secret = StoreCredentialsSecret {
            access_key_id: "fakeLocalKey".to_string(),
            secret_key: "fakeLocalSecret".to_string(),
            region: None,
        };
        let store = StaticSecretStore::new().with_secret("notes/creds", secret);
        let resolver = CredentialResolver::new(store, RecordingEnv::default());

        let err = resolver.resolve(&managed_ctx(true), "notes/creds").await.unwrap_err();
        assert!(matches!(err, Error::CredentialsUnavailable(_)));
    }

    #[tokio::test]
    async fn test_managed_env_branch_uses_variables() {
        let env = RecordingEnv::default()
            .with_var(ENV_ACCESS_KEY_ID, "AKIAENV")
            .with_var(ENV_SECRET_ACCESS_KEY, "env-secret");
        let resolver = CredentialResolver::new(StaticSecretStore::new(), env);

        let set = resolver.resolve(&managed_ctx(false), "ignored").await.unwrap();
        assert_eq!(set, CredentialSet::keyed("AKIAENV", "env-secret", "eu-west-1"));
        assert_eq!(resolver.store.invocations(), 0);
    }

    #[tokio::test]
    async fn test_managed_env_branch_absent_variables_yield_ambient_set() {
        let resolver =
            CredentialResolver::new(StaticSecretStore::new(), RecordingEnv::default());

        let set = resolver.resolve(&managed_ctx(false), "ignored").await.unwrap();
        assert_eq!(set, CredentialSet::ambient("eu-west-1"));
    }

    #[tokio::test]
    async fn test_managed_env_branch_placeholder_values_yield_ambient_set() {
        let env = RecordingEnv::default()
            .with_var(ENV_ACCESS_KEY_ID, "fakeLocalKey")
            .with_var(ENV_SECRET_ACCESS_KEY, "fakeLocalSecret");
        let resolver = CredentialResolver::new(StaticSecretStore::new(), env);

        let set = resolver.resolve(&managed_ctx(false), "ignored").await.unwrap();
        assert_eq!(set, CredentialSet::ambient("eu-west-1"));
    }

    #[tokio::test]
    async fn test_secret_region_overrides_context_region() {
        let secret = StoreCredentialsSecret {
            access_key_id: "AKIA123".to_string(),
            secret_key: "s3cr3t".to_string(),
            region: Some("us-east-1".to_string()),
        };
        let store = StaticSecretStore::new().with_secret("notes/creds", secret);
        let resolver = CredentialResolver::new(store, RecordingEnv::default());

        let set = resolver.resolve(&managed_ctx(true), "notes/creds").await.unwrap();
        assert_eq!(set.region, "us-east-1");
    }
}
