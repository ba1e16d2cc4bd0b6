//! # Configuration Settings
//!
//! Defines the configuration structure for the jotpad service. All values
//! can be supplied through `JOTPAD_`-prefixed environment variables and are
//! read exactly once at startup.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Deployment mode the process is running in.
///
/// `Managed` means a provider-managed serverless environment (Lambda-style
/// execution); `Local` means a developer machine talking to DynamoDB Local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    Local,
    Managed,
}

/// Process-wide description of deployment mode, region, and secret-store
/// usage policy. Constructed once at startup, read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeContext {
    pub mode: RuntimeMode,
    pub region: String,
    pub use_secrets_manager: bool,
}

impl RuntimeContext {
    pub fn is_local(&self) -> bool {
        self.mode == RuntimeMode::Local
    }

    pub fn is_managed(&self) -> bool {
        self.mode == RuntimeMode::Managed
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// HTTP server configuration
    #[validate(nested)]
    pub server: ServerConfig,

    /// Item store configuration
    #[validate(nested)]
    pub store: StoreConfig,

    /// Observability configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            server: ServerConfig::from_env()?,
            store: StoreConfig::from_env(),
            observability: ObservabilityConfig::from_env(),
        };
        config.validate_all()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_all(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;

        // A managed deployment that opted into the secret store must name one.
        if self.store.runtime_context().is_managed()
            && self.store.use_secrets_manager
            && self.store.secret_name.is_empty()
        {
            return Err(Error::config(
                "JOTPAD_STORE_SECRET_NAME must be set when the secret store is enabled in managed mode",
            ));
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server bind address
    #[validate(length(min = 1, message = "Host cannot be empty"))]
    pub host: String,

    /// Server port
    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    pub port: u16,

    /// CORS allowed origins (empty = CORS disabled)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000, cors_origins: vec![] }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Create ServerConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("JOTPAD_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("JOTPAD_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| Error::config(format!("Invalid server port: {}", e)))?;

        let cors_origins = std::env::var("JOTPAD_CORS_ORIGINS")
            .map(|raw| parse_cors_origins(&raw))
            .unwrap_or_default();

        Ok(Self { host, port, cors_origins })
    }
}

/// Parse CORS origins from a comma-separated environment value, dropping
/// blanks and trailing slashes.
fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.to_string())
        .collect()
}

/// Item store configuration: table, region, and credential policy.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreConfig {
    /// Notes table name
    #[validate(length(min = 1, message = "Table name cannot be empty"))]
    pub table_name: String,

    /// AWS region for the item store and the secret store
    #[validate(length(min = 1, message = "Region cannot be empty"))]
    pub region: String,

    /// DynamoDB Local endpoint, used only in local mode
    #[validate(length(min = 1, message = "Local endpoint cannot be empty"))]
    pub local_endpoint: String,

    /// Name of the credentials secret in AWS Secrets Manager
    pub secret_name: String,

    /// Whether managed deployments read credentials from the secret store
    pub use_secrets_manager: bool,

    /// Create the table and seed sample notes on startup (local mode)
    pub seed_sample_data: bool,

    /// Deployment environment string (`dev`, `lambda`, ...)
    pub environment: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table_name: "notes".to_string(),
            region: "eu-west-1".to_string(),
            local_endpoint: "http://localhost:8001".to_string(),
            secret_name: String::new(),
            use_secrets_manager: true,
            seed_sample_data: true,
            environment: "dev".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create StoreConfig from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let table_name =
            std::env::var("JOTPAD_TABLE_NAME").unwrap_or(defaults.table_name);
        let region = std::env::var("JOTPAD_AWS_REGION").unwrap_or(defaults.region);
        let local_endpoint =
            std::env::var("JOTPAD_STORE_ENDPOINT_URL").unwrap_or(defaults.local_endpoint);
        let secret_name =
            std::env::var("JOTPAD_STORE_SECRET_NAME").unwrap_or(defaults.secret_name);

        let use_secrets_manager = std::env::var("JOTPAD_USE_SECRETS_MANAGER")
            .map(|s| parse_bool(&s))
            .unwrap_or(defaults.use_secrets_manager);

        let seed_sample_data = std::env::var("JOTPAD_SEED_SAMPLE_DATA")
            .map(|s| parse_bool(&s))
            .unwrap_or(defaults.seed_sample_data);

        let environment =
            std::env::var("JOTPAD_ENVIRONMENT").unwrap_or(defaults.environment);

        Self {
            table_name,
            region,
            local_endpoint,
            secret_name,
            use_secrets_manager,
            seed_sample_data,
            environment,
        }
    }

    /// Whether the process is running inside a managed serverless
    /// environment. True when the environment string says so or when the
    /// platform's function-name variable is present.
    pub fn is_managed(&self) -> bool {
        self.environment == "lambda" || std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok()
    }

    /// Derive the process-wide runtime context from this configuration.
    pub fn runtime_context(&self) -> RuntimeContext {
        RuntimeContext {
            mode: if self.is_managed() { RuntimeMode::Managed } else { RuntimeMode::Local },
            region: self.region.clone(),
            use_secrets_manager: self.use_secrets_manager,
        }
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.to_lowercase().as_str(), "true" | "1" | "yes")
}

/// Observability configuration for structured logging
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,

    /// Service name attached to log records
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logging: false,
            service_name: "jotpad".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Create ObservabilityConfig from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let log_level = std::env::var("JOTPAD_LOG_LEVEL").unwrap_or(defaults.log_level);

        let json_logging = std::env::var("JOTPAD_JSON_LOGGING")
            .map(|s| parse_bool(&s))
            .unwrap_or(defaults.json_logging);

        Self { log_level, json_logging, service_name: defaults.service_name }
    }
}
