//! Error types for the application

use thiserror::Error;

use crate::apigateway::ResolverError;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// API definition resolution errors
    #[error(transparent)]
    Resolver(#[from] ResolverError),
}

impl Error {
    /// Create a Validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
