//! # Credential Resolution
//!
//! Decides, per runtime environment, which item-store credentials to use:
//! the secret store, environment variables, or the fixed local-development
//! placeholder pair. One policy module configured by
//! [`crate::config::RuntimeContext`]; the secret store and the process
//! environment are injected collaborators so the chain is testable without
//! either.
//!
//! Resolution order is strict: in managed mode the secret store always takes
//! priority when enabled, and environment variables are only consulted when
//! secret-store usage is explicitly disabled — never as a fallback after a
//! secret-store miss.

mod env;
mod materializer;
mod resolver;
mod types;

pub use env::{EnvReader, ProcessEnv, ENV_ACCESS_KEY_ID, ENV_SECRET_ACCESS_KEY};
pub use materializer::{materialize, ClientConfig};
pub use resolver::CredentialResolver;
pub use types::{CredentialSet, PLACEHOLDER_ACCESS_KEY_ID, PLACEHOLDER_SECRET_KEY};
