//! Strike price value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::DomainError;

/// A price level used as a subscription key.
///
/// Wraps a `Decimal`, so `150`, `150.0` and `150.00` are the same strike.
/// The subscription registry orders and compares strikes but never does
/// arithmetic on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrikePrice(#[serde(serialize_with = "rust_decimal::serde::float::serialize")] Decimal);

impl StrikePrice {
    /// Create a strike price from a decimal without validation.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a strike price from user input.
    ///
    /// # Errors
    ///
    /// Returns error if the price is zero or negative.
    pub fn try_new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::invalid(
                "strike_price",
                format!("Strike price must be positive, got {value}"),
            ));
        }
        Ok(Self(value))
    }

    /// Get the inner decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for StrikePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl From<Decimal> for StrikePrice {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for StrikePrice {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}
