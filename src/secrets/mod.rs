//! # Secret Store Access
//!
//! Clients for the remote secret store holding item-store credentials.
//!
//! Every fault a backend can hit is folded into the [`SecretLookup`] union;
//! nothing past this module ever sees a transport or service error. The
//! credential resolver treats `NotFound` and `Unavailable` identically, but
//! they are logged distinctly here.

mod aws;
mod client;
mod memory;

pub use aws::AwsSecretStore;
pub use client::{SecretLookup, SecretStoreClient, StoreCredentialsSecret};
pub use memory::StaticSecretStore;
