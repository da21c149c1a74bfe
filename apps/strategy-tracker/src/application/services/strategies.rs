//! Strategy persistence and analysis.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::ServiceError;
use crate::application::ports::{RepositoryError, StrategyRepository, UserRepository};
use crate::domain::analysis::{StrategyAnalysis, analyze};
use crate::domain::shared::Symbol;
use crate::domain::strategy::{NewStrategy, NewUser, OptionLeg, Strategy, StrategyId, User, UserId};
use crate::infrastructure::metrics::record_strategy_saved;

/// Save request as posted by the web client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStrategyRequest {
    /// Display name.
    pub name: String,
    /// Legs, at least one.
    pub legs: Vec<OptionLeg>,
    /// Underlying stock, if any.
    #[serde(default)]
    pub stock_symbol: Option<Symbol>,
}

/// Saves, lists, deletes and analyzes users' strategies.
#[derive(Clone)]
pub struct StrategyService {
    users: Arc<dyn UserRepository>,
    strategies: Arc<dyn StrategyRepository>,
}

impl StrategyService {
    /// Create a service over the given repositories.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, strategies: Arc<dyn StrategyRepository>) -> Self {
        Self { users, strategies }
    }

    /// Return the user with this email, creating it on first login.
    ///
    /// A concurrent first login that wins the insert is picked up by a
    /// second lookup.
    ///
    /// # Errors
    ///
    /// Returns a domain error for a blank username or malformed email.
    #[instrument(skip(self))]
    pub async fn register_user(&self, username: &str, email: &str) -> Result<User, ServiceError> {
        let new_user = NewUser::new(username, email)?;

        if let Some(existing) = self.users.find_by_email(new_user.email()).await? {
            return Ok(existing);
        }

        let email = new_user.email().to_string();
        match self.users.insert(new_user).await {
            Ok(user) => {
                info!(user_id = %user.id(), "User registered");
                Ok(user)
            }
            Err(RepositoryError::DuplicateEmail(_)) => self
                .users
                .find_by_email(&email)
                .await?
                .ok_or_else(|| RepositoryError::DuplicateEmail(email).into()),
            Err(e) => Err(e.into()),
        }
    }

    /// Save a strategy for a user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown user and a domain error for an
    /// invalid strategy.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn save_strategy(
        &self,
        user_id: UserId,
        request: SaveStrategyRequest,
    ) -> Result<Strategy, ServiceError> {
        self.require_user(user_id).await?;

        let new_strategy =
            NewStrategy::new(user_id, request.name, request.stock_symbol, request.legs)?;
        let strategy = self.strategies.insert(new_strategy).await?;

        record_strategy_saved();
        info!(
            strategy_id = %strategy.id(),
            legs = strategy.legs().len(),
            "Strategy saved"
        );
        Ok(strategy)
    }

    /// All strategies of a user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a repository error if storage fails.
    pub async fn list_strategies(&self, user_id: UserId) -> Result<Vec<Strategy>, ServiceError> {
        Ok(self.strategies.find_by_user(user_id).await?)
    }

    /// Get one of the user's strategies.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the strategy is missing or owned by another
    /// user.
    pub async fn get_strategy(
        &self,
        user_id: UserId,
        strategy_id: StrategyId,
    ) -> Result<Strategy, ServiceError> {
        match self.strategies.find_by_id(strategy_id).await? {
            Some(strategy) if strategy.user_id() == user_id => Ok(strategy),
            Some(_) => {
                warn!(%user_id, %strategy_id, "Strategy belongs to another user");
                Err(ServiceError::not_found("strategy", strategy_id))
            }
            None => Err(ServiceError::not_found("strategy", strategy_id)),
        }
    }

    /// Delete one of the user's strategies.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the strategy is missing or owned by another
    /// user.
    #[instrument(skip(self))]
    pub async fn delete_strategy(
        &self,
        user_id: UserId,
        strategy_id: StrategyId,
    ) -> Result<(), ServiceError> {
        self.get_strategy(user_id, strategy_id).await?;

        if !self.strategies.delete(strategy_id).await? {
            return Err(ServiceError::not_found("strategy", strategy_id));
        }

        info!("Strategy deleted");
        Ok(())
    }

    /// Analyze one of the user's strategies.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the strategy is missing or owned by another
    /// user.
    pub async fn analyze_strategy(
        &self,
        user_id: UserId,
        strategy_id: StrategyId,
    ) -> Result<StrategyAnalysis, ServiceError> {
        let strategy = self.get_strategy(user_id, strategy_id).await?;
        Ok(analyze(strategy.legs()))
    }

    /// Delete a user and all of their strategies.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown user.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: UserId) -> Result<(), ServiceError> {
        self.require_user(user_id).await?;

        let removed = self.strategies.delete_by_user(user_id).await?;
        self.users.delete(user_id).await?;

        info!(strategies_removed = removed, "User deleted");
        Ok(())
    }

    async fn require_user(&self, user_id: UserId) -> Result<User, ServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", user_id))
    }
}
