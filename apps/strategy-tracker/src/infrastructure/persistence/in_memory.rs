//! In-memory repositories for tests and local development.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::application::ports::{RepositoryError, StrategyRepository, UserRepository};
use crate::domain::strategy::{NewStrategy, NewUser, Strategy, StrategyId, User, UserId};

/// In-memory implementation of `UserRepository`.
///
/// Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<UserId, User>>,
    next_id: AtomicI64,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Get the number of users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.users.write();
        if users.values().any(|u| u.email() == user.email()) {
            return Err(RepositoryError::DuplicateEmail(user.email().to_string()));
        }

        let id = UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let user = user.with_id(id);
        users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email() == email)
            .cloned())
    }

    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        Ok(self.users.write().remove(&id).is_some())
    }
}

/// In-memory implementation of `StrategyRepository`.
///
/// Strategies are keyed by id, so iteration is in insertion order.
#[derive(Debug)]
pub struct InMemoryStrategyRepository {
    strategies: RwLock<BTreeMap<StrategyId, Strategy>>,
    next_id: AtomicI64,
}

impl Default for InMemoryStrategyRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStrategyRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Get the number of strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.read().len()
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.read().is_empty()
    }
}

#[async_trait]
impl StrategyRepository for InMemoryStrategyRepository {
    async fn insert(&self, strategy: NewStrategy) -> Result<Strategy, RepositoryError> {
        let id = StrategyId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let strategy = strategy.with_id(id);
        self.strategies.write().insert(id, strategy.clone());
        Ok(strategy)
    }

    async fn find_by_id(&self, id: StrategyId) -> Result<Option<Strategy>, RepositoryError> {
        Ok(self.strategies.read().get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Strategy>, RepositoryError> {
        Ok(self
            .strategies
            .read()
            .values()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: StrategyId) -> Result<bool, RepositoryError> {
        Ok(self.strategies.write().remove(&id).is_some())
    }

    async fn delete_by_user(&self, user_id: UserId) -> Result<usize, RepositoryError> {
        let mut strategies = self.strategies.write();
        let before = strategies.len();
        strategies.retain(|_, s| s.user_id() != user_id);
        Ok(before - strategies.len())
    }
}
