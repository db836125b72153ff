//! # Payment Error Types
//!
//! Typed error handling for the express-checkout payment request layer.
//! All fallible operations return `Result<T, PaymentError>`.
//!
//! Vendor payment errors (declined cards, invalid emails, ...) are not
//! represented here. Those are classified into display messages by the
//! provider crate and never raised.

use thiserror::Error;

/// Core error type for payment request operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (invalid settings values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The platform settings blob was not provided at all
    #[error("Payment settings are missing")]
    MissingSettings,

    /// The settings blob exists but carries no publishable API key
    #[error("Payment API key is missing")]
    MissingApiKey,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The capability probe was rejected by the vendor
    #[error("Capability probe failed: {0}")]
    CapabilityProbe(String),

    /// A call on the vendor payment request handle failed
    #[error("Payment request handle error [{operation}]: {message}")]
    Handle {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Build a handle error for the given vendor operation
    pub fn handle(operation: &'static str, message: impl Into<String>) -> Self {
        PaymentError::Handle {
            operation,
            message: message.into(),
        }
    }

    /// Returns true for the configuration-missing class.
    ///
    /// These errors abort rendering of the payment button entirely.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PaymentError::Configuration(_)
                | PaymentError::MissingSettings
                | PaymentError::MissingApiKey
        )
    }
}

impl From<serde_json::Error> for PaymentError {
    fn from(err: serde_json::Error) -> Self {
        PaymentError::Serialization(err.to_string())
    }
}

/// Result type alias for payment request operations
pub type PaymentResult<T> = Result<T, PaymentError>;
