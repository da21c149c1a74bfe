//! Preset strategies offered by the strategy builder.

use rust_decimal::Decimal;

use crate::domain::shared::DomainError;
use crate::domain::strategy::{OptionLeg, OptionType, PositionSide};

/// A named template of legs built around a base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyPreset {
    /// Long call at the base price.
    LongCall,
    /// Long put at the base price.
    LongPut,
    /// Long stock plus a short call 10 above.
    CoveredCall,
    /// Long call and put at the base price.
    LongStraddle,
    /// Short call and put at the base price.
    ShortStraddle,
    /// Long put 10 below and long call 10 above.
    LongStrangle,
    /// Long call at base, short call 10 above.
    BullCallSpread,
    /// Long put at base, short put 10 below.
    BearPutSpread,
    /// Short strangle at +/-10 with wings at +/-20.
    IronCondor,
    /// Short straddle at base with wings at +/-10.
    IronButterfly,
}

impl StrategyPreset {
    /// Base price used when the caller has none.
    pub const DEFAULT_BASE_PRICE: Decimal = Decimal::ONE_HUNDRED;

    /// Get all presets in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::LongCall,
            Self::LongPut,
            Self::CoveredCall,
            Self::LongStraddle,
            Self::ShortStraddle,
            Self::LongStrangle,
            Self::BullCallSpread,
            Self::BearPutSpread,
            Self::IronCondor,
            Self::IronButterfly,
        ]
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LongCall => "Long Call",
            Self::LongPut => "Long Put",
            Self::CoveredCall => "Covered Call",
            Self::LongStraddle => "Long Straddle",
            Self::ShortStraddle => "Short Straddle",
            Self::LongStrangle => "Long Strangle",
            Self::BullCallSpread => "Bull Call Spread",
            Self::BearPutSpread => "Bear Put Spread",
            Self::IronCondor => "Iron Condor",
            Self::IronButterfly => "Iron Butterfly",
        }
    }

    /// One-line market outlook.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::LongCall => "Bullish, unlimited upside",
            Self::LongPut => "Bearish, profit on decline",
            Self::CoveredCall => "Income on existing stock",
            Self::LongStraddle => "Profit from volatility",
            Self::ShortStraddle => "Profit from stability",
            Self::LongStrangle => "Cheaper volatility bet",
            Self::BullCallSpread => "Limited risk bullish",
            Self::BearPutSpread => "Limited risk bearish",
            Self::IronCondor => "Range-bound profit",
            Self::IronButterfly => "Pinpoint stability bet",
        }
    }

    /// Build the legs around `base`.
    ///
    /// # Errors
    ///
    /// Returns error if a strike would fall below zero (base under 20 for
    /// the iron condor, under 10 for other offset presets).
    pub fn legs(&self, base: Decimal) -> Result<Vec<OptionLeg>, DomainError> {
        use OptionType::{Call, Put, Stock};
        use PositionSide::{Long, Short};

        let ten = Decimal::TEN;
        let twenty = Decimal::from(20);
        let dollars = |units: i64, scale: u32| Decimal::new(units, scale);

        let specs: Vec<(OptionType, PositionSide, Decimal, Decimal)> = match self {
            Self::LongCall => vec![(Call, Long, base, dollars(5, 0))],
            Self::LongPut => vec![(Put, Long, base, dollars(5, 0))],
            Self::CoveredCall => vec![
                (Stock, Long, base, Decimal::ZERO),
                (Call, Short, base + ten, dollars(3, 0)),
            ],
            Self::LongStraddle => vec![
                (Call, Long, base, dollars(5, 0)),
                (Put, Long, base, dollars(5, 0)),
            ],
            Self::ShortStraddle => vec![
                (Call, Short, base, dollars(5, 0)),
                (Put, Short, base, dollars(5, 0)),
            ],
            Self::LongStrangle => vec![
                (Put, Long, base - ten, dollars(3, 0)),
                (Call, Long, base + ten, dollars(3, 0)),
            ],
            Self::BullCallSpread => vec![
                (Call, Long, base, dollars(5, 0)),
                (Call, Short, base + ten, dollars(2, 0)),
            ],
            Self::BearPutSpread => vec![
                (Put, Long, base, dollars(5, 0)),
                (Put, Short, base - ten, dollars(2, 0)),
            ],
            Self::IronCondor => vec![
                (Put, Long, base - twenty, dollars(1, 0)),
                (Put, Short, base - ten, dollars(25, 1)),
                (Call, Short, base + ten, dollars(25, 1)),
                (Call, Long, base + twenty, dollars(1, 0)),
            ],
            Self::IronButterfly => vec![
                (Put, Long, base - ten, dollars(2, 0)),
                (Put, Short, base, dollars(5, 0)),
                (Call, Short, base, dollars(5, 0)),
                (Call, Long, base + ten, dollars(2, 0)),
            ],
        };

        specs
            .into_iter()
            .map(|(option_type, position, strike, premium)| {
                OptionLeg::new(option_type, position, strike, premium, 1)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{PayoffBound, analyze};
    use rust_decimal_macros::dec;

    #[test]
    fn every_preset_builds_at_default_base() {
        for preset in StrategyPreset::all() {
            let legs = preset.legs(StrategyPreset::DEFAULT_BASE_PRICE).unwrap();
            assert!(!legs.is_empty(), "{} has no legs", preset.name());
            assert!(!preset.description().is_empty());
        }
    }

    #[test]
    fn iron_condor_strikes() {
        let strikes: Vec<_> = StrategyPreset::IronCondor
            .legs(dec!(100))
            .unwrap()
            .iter()
            .map(OptionLeg::strike)
            .collect();

        assert_eq!(strikes, vec![dec!(80), dec!(90), dec!(110), dec!(120)]);
    }

    #[test]
    fn low_base_price_is_rejected_for_offset_presets() {
        assert!(StrategyPreset::IronCondor.legs(dec!(15)).is_err());
        assert!(StrategyPreset::LongCall.legs(dec!(15)).is_ok());
    }

    #[test]
    fn bull_call_spread_is_bounded() {
        let legs = StrategyPreset::BullCallSpread.legs(dec!(100)).unwrap();

        let analysis = analyze(&legs);

        assert_eq!(analysis.net_premium, dec!(-300));
        assert_eq!(analysis.max_profit, PayoffBound::Limited(dec!(700)));
        assert_eq!(analysis.max_loss, PayoffBound::Limited(dec!(300)));
        assert_eq!(analysis.breakevens, vec![dec!(103)]);
    }
}
