//! Error types for the Health Notifier
//!
//! Transport and decode failures never reach the top level on their own:
//! the prober folds them into an unhealthy verdict. Configuration and
//! delivery failures are fatal.

use thiserror::Error;

/// Main error type for probe and dispatch operations
#[derive(Error, Debug)]
pub enum HealthCheckError {
    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The target could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// The target body was not a valid health payload
    #[error("Decode error: {0}")]
    Decode(String),

    /// The alert could not be delivered
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Caller passed something the operation cannot act on
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HealthCheckError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        HealthCheckError::Config(msg.into())
    }

    /// Create a delivery error
    pub fn delivery(msg: impl Into<String>) -> Self {
        HealthCheckError::Delivery(msg.into())
    }

    /// Check if this is a user-facing error (vs internal)
    pub fn is_user_error(&self) -> bool {
        matches!(self, HealthCheckError::Config(_))
    }
}

impl From<serde_json::Error> for HealthCheckError {
    fn from(err: serde_json::Error) -> Self {
        HealthCheckError::Decode(err.to_string())
    }
}

/// Result type alias for health notifier operations
pub type Result<T> = std::result::Result<T, HealthCheckError>;
