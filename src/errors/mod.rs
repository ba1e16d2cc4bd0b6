//! # Error Handling
//!
//! Crate-wide error types built on `thiserror`. The only error the
//! credential chain ever raises is `CredentialsUnavailable`; everything the
//! secret store can report stays behind the [`crate::secrets::SecretLookup`]
//! union and never escapes as an error.

mod types;

pub use types::{Error, Result};
