//! # Service Error Types
//!
//! Errors surfaced at the HTTP boundary of the verify service.
//! The validator itself never fails; these cover payload shape,
//! response encoding and startup configuration.

use thiserror::Error;

/// Error type for everything around the validator
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Request body could not be decoded into a verify request
    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(String),

    /// Response body could not be encoded
    #[error("Error creating response: {0}")]
    Serialization(String),

    /// Configuration errors (bad port, unreadable config file)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl VerifyError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            VerifyError::InvalidPayload(_) => 400,
            VerifyError::Serialization(_) => 500,
            VerifyError::Configuration(_) => 500,
        }
    }

    /// Returns true if the caller sent a bad request
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

/// Result type alias for service operations
pub type VerifyResult<T> = Result<T, VerifyError>;
