//! Strategy aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{OptionLeg, UserId};
use crate::domain::shared::{DomainError, StrikePrice, Symbol};

/// Database identifier of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyId(i64);

impl StrategyId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated strategy that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStrategy {
    user_id: UserId,
    name: String,
    stock_symbol: Option<Symbol>,
    legs: Vec<OptionLeg>,
}

impl NewStrategy {
    /// Validate a strategy for a user.
    ///
    /// The symbol is normalized; a blank symbol is treated as no symbol.
    ///
    /// # Errors
    ///
    /// Returns error if the name is blank, there are no legs, or the
    /// symbol is malformed.
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        stock_symbol: Option<Symbol>,
        legs: Vec<OptionLeg>,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::invalid("name", "Strategy name cannot be empty"));
        }

        if legs.is_empty() {
            return Err(DomainError::invalid(
                "legs",
                "Strategy must have at least one leg",
            ));
        }

        let stock_symbol = stock_symbol
            .map(|s| s.normalized())
            .filter(|s| !s.as_str().is_empty());
        if let Some(symbol) = &stock_symbol {
            symbol.validate()?;
        }

        Ok(Self {
            user_id,
            name,
            stock_symbol,
            legs,
        })
    }

    /// Owner of the strategy.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Attach the identifier assigned by storage.
    #[must_use]
    pub fn with_id(self, id: StrategyId) -> Strategy {
        Strategy {
            id,
            user_id: self.user_id,
            name: self.name,
            stock_symbol: self.stock_symbol,
            legs: self.legs,
        }
    }
}

/// A stored strategy with its legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    id: StrategyId,
    user_id: UserId,
    name: String,
    stock_symbol: Option<Symbol>,
    legs: Vec<OptionLeg>,
}

impl Strategy {
    /// Get the identifier.
    #[must_use]
    pub const fn id(&self) -> StrategyId {
        self.id
    }

    /// Get the owner.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Get the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the underlying stock, if any.
    #[must_use]
    pub const fn stock_symbol(&self) -> Option<&Symbol> {
        self.stock_symbol.as_ref()
    }

    /// Get the legs.
    #[must_use]
    pub fn legs(&self) -> &[OptionLeg] {
        &self.legs
    }

    /// Strike prices of the option legs, stock legs excluded.
    pub fn option_strikes(&self) -> impl Iterator<Item = StrikePrice> + '_ {
        self.legs
            .iter()
            .filter(|leg| leg.option_type().is_option())
            .map(OptionLeg::strike_price)
    }
}
