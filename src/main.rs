use std::sync::Arc;

use jotpad::{
    api::start_api_server,
    config::AppConfig,
    credentials::{materialize, CredentialResolver, ProcessEnv},
    observability::init_tracing,
    secrets::AwsSecretStore,
    storage::{build_store_client, spawn_bootstrap, NoteRepository},
    Result, APP_NAME, VERSION,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present; must happen before any config is read.
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let config = AppConfig::from_env()?;
    init_tracing(&config.observability)?;

    let ctx = config.store.runtime_context();
    info!(
        app_name = APP_NAME,
        version = VERSION,
        mode = ?ctx.mode,
        region = %ctx.region,
        secrets_manager = ctx.use_secrets_manager,
        "Starting jotpad notes API"
    );

    // Materialize the store client configuration once for the process
    // lifetime; a managed deployment without usable credentials fails here.
    let resolver = CredentialResolver::new(AwsSecretStore::new(ctx.region.clone()), ProcessEnv);
    let client_config = materialize(
        &ctx,
        &resolver,
        &config.store.secret_name,
        &config.store.local_endpoint,
    )
    .await?;

    let store_client = build_store_client(&client_config).await;
    let repository =
        Arc::new(NoteRepository::new(store_client, config.store.table_name.clone()));

    // Local development: create the table and seed sample notes without
    // blocking readiness.
    if ctx.is_local() {
        spawn_bootstrap((*repository).clone(), config.store.seed_sample_data);
    }

    start_api_server(config.server, repository).await
}
