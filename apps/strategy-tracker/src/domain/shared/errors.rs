//! Domain errors.

use thiserror::Error;

/// Domain-level validation errors.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid value for a field.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

impl DomainError {
    /// Create an invalid value error.
    #[must_use]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get the offending field name.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidValue { field, .. } => field,
        }
    }
}
