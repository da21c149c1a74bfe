//! Option leg value object.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, StrikePrice};

/// Highest accepted strike or premium, per share.
pub const MAX_LEG_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Highest accepted number of contracts in one leg.
pub const MAX_LEG_QUANTITY: u32 = 100_000;

/// Instrument of a leg.
///
/// `Stock` models shares held alongside options (a covered call); its
/// strike is the purchase price and it carries no premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option.
    Call,
    /// Put option.
    Put,
    /// Underlying shares.
    Stock,
}

impl OptionType {
    /// Check if this leg is an option contract.
    #[must_use]
    pub const fn is_option(&self) -> bool {
        !matches!(self, Self::Stock)
    }
}

/// Position side (long or short).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    /// Bought.
    Long,
    /// Sold/written.
    Short,
}

impl PositionSide {
    /// Sign multiplier for this side.
    #[must_use]
    pub const fn sign(&self) -> Decimal {
        match self {
            Self::Long => Decimal::ONE,
            Self::Short => Decimal::NEGATIVE_ONE,
        }
    }

    /// Check if this is a long position.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Self::Long)
    }
}

/// One leg of a strategy.
///
/// Deserializes from the web client's leg shape:
/// `{"type": "call", "position": "long", "strike": 100, "premium": 5, "quantity": 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LegFields")]
pub struct OptionLeg {
    #[serde(rename = "type")]
    option_type: OptionType,
    position: PositionSide,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    strike: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    premium: Decimal,
    quantity: u32,
}

impl OptionLeg {
    /// Create a validated leg.
    ///
    /// # Errors
    ///
    /// Returns error if strike or premium is negative or above
    /// [`MAX_LEG_PRICE`], or quantity is zero or above [`MAX_LEG_QUANTITY`].
    /// The caps keep payoff arithmetic within `Decimal` range.
    pub fn new(
        option_type: OptionType,
        position: PositionSide,
        strike: Decimal,
        premium: Decimal,
        quantity: u32,
    ) -> Result<Self, DomainError> {
        if strike < Decimal::ZERO {
            return Err(DomainError::invalid("strike", "Strike cannot be negative"));
        }
        if strike > MAX_LEG_PRICE {
            return Err(DomainError::invalid(
                "strike",
                format!("Strike cannot exceed {MAX_LEG_PRICE}"),
            ));
        }
        if premium < Decimal::ZERO {
            return Err(DomainError::invalid("premium", "Premium cannot be negative"));
        }
        if premium > MAX_LEG_PRICE {
            return Err(DomainError::invalid(
                "premium",
                format!("Premium cannot exceed {MAX_LEG_PRICE}"),
            ));
        }
        if quantity == 0 {
            return Err(DomainError::invalid("quantity", "Quantity must be at least 1"));
        }
        if quantity > MAX_LEG_QUANTITY {
            return Err(DomainError::invalid(
                "quantity",
                format!("Quantity cannot exceed {MAX_LEG_QUANTITY}"),
            ));
        }

        Ok(Self {
            option_type,
            position,
            strike,
            premium,
            quantity,
        })
    }

    /// Get the instrument type.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Get the position side.
    #[must_use]
    pub const fn position(&self) -> PositionSide {
        self.position
    }

    /// Get the strike (purchase price for stock legs).
    #[must_use]
    pub const fn strike(&self) -> Decimal {
        self.strike
    }

    /// Get the strike as a subscription key.
    #[must_use]
    pub const fn strike_price(&self) -> StrikePrice {
        StrikePrice::new(self.strike)
    }

    /// Get the per-share premium.
    #[must_use]
    pub const fn premium(&self) -> Decimal {
        self.premium
    }

    /// Get the number of contracts (or 100-share lots).
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }
}

#[derive(Deserialize)]
struct LegFields {
    #[serde(rename = "type")]
    option_type: OptionType,
    position: PositionSide,
    strike: Decimal,
    #[serde(default)]
    premium: Decimal,
    quantity: u32,
}

impl TryFrom<LegFields> for OptionLeg {
    type Error = DomainError;

    fn try_from(fields: LegFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.option_type,
            fields.position,
            fields.strike,
            fields.premium,
            fields.quantity,
        )
    }
}
