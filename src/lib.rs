//! # jotpad
//!
//! A small notes HTTP API over a single DynamoDB table, with an
//! environment-aware credential-resolution core.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers → NoteRepository → DynamoDB client
//!                        ↑
//!          ClientConfig (materialized once at startup)
//!                        ↑
//!   CredentialResolver → Secret Store | Environment | Placeholder
//! ```
//!
//! The credential chain is the interesting part: a managed deployment that
//! opted into the secret store fails hard when no real pair is available,
//! while local development always runs on the fixed placeholder pair against
//! a store emulator.

pub mod api;
pub mod config;
pub mod credentials;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod secrets;
pub mod storage;

// Re-export commonly used types
pub use config::{AppConfig, RuntimeContext, RuntimeMode};
pub use errors::{Error, Result};
pub use observability::init_tracing;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_available() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "jotpad");
    }
}
