//! # Error Types
//!
//! Error types for the jotpad service using `thiserror`.

/// Custom result type for jotpad operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the jotpad service
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No usable credentials could be obtained for the item store.
    ///
    /// Raised only by the credential resolver, and only when a managed
    /// deployment has opted into the secret store and no real credential
    /// pair came back. Fatal to configuration materialization; never
    /// retried here.
    #[error("Item store credentials unavailable: {0}")]
    CredentialsUnavailable(String),

    /// Item store (DynamoDB) errors with additional context
    #[error("Store error: {context}")]
    Storage { context: String },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found errors
    #[error("Resource not found: {resource_type} with ID '{id}'")]
    NotFound { resource_type: String, id: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new credentials-unavailable error
    pub fn credentials_unavailable<S: Into<String>>(message: S) -> Self {
        Self::CredentialsUnavailable(message.into())
    }

    /// Create a new store error
    pub fn storage<S: Into<String>>(context: S) -> Self {
        Self::Storage { context: context.into() }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new not-found error
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound { resource_type: resource_type.into(), id: id.into() }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}
