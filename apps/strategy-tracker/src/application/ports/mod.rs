//! Port Interfaces
//!
//! Persistence contracts implemented by infrastructure adapters
//! (in-memory today, a SQL database behind the same traits later).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::strategy::{NewStrategy, NewUser, Strategy, StrategyId, User, UserId};

/// Errors raised by repository adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A user with this email already exists.
    #[error("user with email {0} already exists")]
    DuplicateEmail(String),

    /// Backend failure.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Repository for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user and assign its id.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail` if the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Find a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Find a user by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Delete a user. Returns whether it existed.
    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError>;
}

/// Repository for strategies and their legs.
#[async_trait]
pub trait StrategyRepository: Send + Sync {
    /// Store a new strategy and assign its id.
    async fn insert(&self, strategy: NewStrategy) -> Result<Strategy, RepositoryError>;

    /// Find a strategy by id.
    async fn find_by_id(&self, id: StrategyId) -> Result<Option<Strategy>, RepositoryError>;

    /// All strategies of a user, oldest first.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Strategy>, RepositoryError>;

    /// Delete a strategy and its legs. Returns whether it existed.
    async fn delete(&self, id: StrategyId) -> Result<bool, RepositoryError>;

    /// Delete every strategy of a user. Returns how many were removed.
    async fn delete_by_user(&self, user_id: UserId) -> Result<usize, RepositoryError>;
}
