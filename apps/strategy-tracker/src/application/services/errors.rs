//! Service errors.

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::shared::DomainError;

/// Errors returned by application services.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Input failed domain validation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Storage failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Entity missing or not visible to the caller.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity type.
        entity: &'static str,
        /// Entity identifier.
        id: String,
    },
}

impl ServiceError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Check if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            ServiceError::not_found("strategy", 42).to_string(),
            "strategy 42 not found"
        );

        let err: ServiceError = DomainError::invalid("name", "empty").into();
        assert_eq!(err.to_string(), "Invalid value for name: empty");
        assert!(!err.is_not_found());
    }
}
