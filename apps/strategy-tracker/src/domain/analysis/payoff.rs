//! Payoff math.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};

use crate::domain::strategy::{OptionLeg, OptionType};

/// Shares per option contract.
pub const CONTRACT_MULTIPLIER: Decimal = Decimal::ONE_HUNDRED;

/// Smallest half-width of the default curve range.
const MIN_HALF_WIDTH: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Payoff change at a curve edge that marks the payoff as unbounded.
const EDGE_TOLERANCE: Decimal = Decimal::ONE_HUNDRED;

/// Samples inspected next to each edge.
const EDGE_LOOKBACK: usize = 5;

/// Explicit curve bounds are clamped to `[0, PRICE_CEILING]`; twice the
/// largest leg price keeps every sample within `Decimal` range.
const PRICE_CEILING: Decimal = Decimal::from_parts(2_000_000, 0, 0, false, 0);

/// Payoff of one leg at expiration for a given underlying price.
#[must_use]
pub fn leg_payoff(leg: &OptionLeg, underlying: Decimal) -> Decimal {
    let sign = leg.position().sign();
    let per_share = match leg.option_type() {
        OptionType::Stock => (underlying - leg.strike()) * sign,
        OptionType::Call => {
            (underlying - leg.strike()).max(Decimal::ZERO) * sign - leg.premium() * sign
        }
        OptionType::Put => {
            (leg.strike() - underlying).max(Decimal::ZERO) * sign - leg.premium() * sign
        }
    };

    per_share * Decimal::from(leg.quantity()) * CONTRACT_MULTIPLIER
}

/// Total payoff of all legs at a given underlying price.
#[must_use]
pub fn strategy_payoff(legs: &[OptionLeg], underlying: Decimal) -> Decimal {
    legs.iter().map(|leg| leg_payoff(leg, underlying)).sum()
}

/// Net premium: positive for a credit, negative for a debit.
#[must_use]
pub fn net_premium(legs: &[OptionLeg]) -> Decimal {
    legs.iter()
        .filter(|leg| leg.option_type().is_option())
        .map(|leg| {
            -leg.position().sign()
                * leg.premium()
                * Decimal::from(leg.quantity())
                * CONTRACT_MULTIPLIER
        })
        .sum()
}

/// A sampled point of the payoff curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayoffPoint {
    /// Underlying price, rounded to cents.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    /// Strategy payoff at that price, rounded to cents.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub payoff: Decimal,
}

/// Sampling settings for [`payoff_curve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSettings {
    /// Lowest sampled price; defaults to below the average strike.
    pub min_price: Option<Decimal>,
    /// Highest sampled price; defaults to above the average strike.
    pub max_price: Option<Decimal>,
    /// Number of intervals; the curve has `points + 1` samples.
    pub points: usize,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            min_price: None,
            max_price: None,
            points: 100,
        }
    }
}

/// Sample the payoff curve.
///
/// The default range is centred on the average strike with a half-width
/// of `max(avg / 2, 50)`, floored at zero. Explicit bounds are clamped
/// to a sane price range. Returns an empty curve for no legs or zero
/// points.
#[must_use]
pub fn payoff_curve(legs: &[OptionLeg], settings: &CurveSettings) -> Vec<PayoffPoint> {
    if legs.is_empty() || settings.points == 0 {
        return Vec::new();
    }

    let strike_sum: Decimal = legs.iter().map(OptionLeg::strike).sum();
    let avg_strike = strike_sum / Decimal::from(legs.len());
    let half_width = (avg_strike / Decimal::TWO).max(MIN_HALF_WIDTH);

    let min = settings
        .min_price
        .unwrap_or(avg_strike - half_width)
        .clamp(Decimal::ZERO, PRICE_CEILING);
    let max = settings
        .max_price
        .unwrap_or(avg_strike + half_width)
        .clamp(Decimal::ZERO, PRICE_CEILING);
    let step = (max - min) / Decimal::from(settings.points);

    (0..=settings.points)
        .map(|i| {
            let price = min + step * Decimal::from(i);
            PayoffPoint {
                price: price.round_dp(2),
                payoff: strategy_payoff(legs, price).round_dp(2),
            }
        })
        .collect()
}

/// Prices where the sampled payoff crosses zero.
///
/// Each crossing is linearly interpolated between neighbouring samples
/// and rounded to cents. A sample sitting exactly on zero is reported once.
#[must_use]
pub fn breakevens(curve: &[PayoffPoint]) -> Vec<Decimal> {
    let mut points: Vec<Decimal> = Vec::new();

    for pair in curve.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        let crosses = (prev.payoff <= Decimal::ZERO && curr.payoff >= Decimal::ZERO)
            || (prev.payoff >= Decimal::ZERO && curr.payoff <= Decimal::ZERO);
        if !crosses {
            continue;
        }

        let span = prev.payoff.abs() + curr.payoff.abs();
        if span.is_zero() {
            continue;
        }

        let ratio = prev.payoff.abs() / span;
        let breakeven = (prev.price + (curr.price - prev.price) * ratio).round_dp(2);
        if points.last() != Some(&breakeven) {
            points.push(breakeven);
        }
    }

    points
}

/// Maximum profit or loss of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoffBound {
    /// Bounded amount (losses are reported as a positive number).
    Limited(Decimal),
    /// Keeps growing past the sampled range.
    Unlimited,
}

impl Serialize for PayoffBound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Limited(amount) => rust_decimal::serde::float::serialize(amount, serializer),
            Self::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

/// Summary of a strategy's expiration payoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyAnalysis {
    /// Breakeven prices.
    #[serde(serialize_with = "serialize_prices")]
    pub breakevens: Vec<Decimal>,
    /// Maximum profit.
    pub max_profit: PayoffBound,
    /// Maximum loss.
    pub max_loss: PayoffBound,
    /// Net premium (credit positive).
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub net_premium: Decimal,
    /// Sampled payoff curve.
    pub payoff_data: Vec<PayoffPoint>,
}

fn serialize_prices<S: Serializer>(prices: &[Decimal], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(prices.iter().filter_map(ToPrimitive::to_f64))
}

impl Default for StrategyAnalysis {
    fn default() -> Self {
        Self {
            breakevens: Vec::new(),
            max_profit: PayoffBound::Limited(Decimal::ZERO),
            max_loss: PayoffBound::Limited(Decimal::ZERO),
            net_premium: Decimal::ZERO,
            payoff_data: Vec::new(),
        }
    }
}

/// Analyze a strategy over the default curve.
///
/// A maximum or minimum that sits on a curve edge while the payoff is
/// still moving there by more than 100 is reported as unlimited.
#[must_use]
pub fn analyze(legs: &[OptionLeg]) -> StrategyAnalysis {
    let curve = payoff_curve(legs, &CurveSettings::default());
    let (Some(first), Some(last)) = (curve.first(), curve.last()) else {
        return StrategyAnalysis::default();
    };
    let (first, last) = (first.payoff, last.payoff);

    let max = curve.iter().map(|p| p.payoff).max().unwrap_or(first);
    let min = curve.iter().map(|p| p.payoff).min().unwrap_or(first);

    let moving_at_start = curve
        .get(EDGE_LOOKBACK)
        .is_some_and(|p| (first - p.payoff).abs() > EDGE_TOLERANCE);
    let moving_at_end = curve
        .len()
        .checked_sub(EDGE_LOOKBACK + 1)
        .and_then(|i| curve.get(i))
        .is_some_and(|p| (last - p.payoff).abs() > EDGE_TOLERANCE);

    let unbounded =
        |extreme: Decimal| (extreme == first && moving_at_start) || (extreme == last && moving_at_end);

    StrategyAnalysis {
        breakevens: breakevens(&curve),
        max_profit: if unbounded(max) {
            PayoffBound::Unlimited
        } else {
            PayoffBound::Limited(max)
        },
        max_loss: if unbounded(min) {
            PayoffBound::Unlimited
        } else {
            PayoffBound::Limited(min.abs())
        },
        net_premium: net_premium(legs),
        payoff_data: curve,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::PositionSide;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn leg(
        option_type: OptionType,
        position: PositionSide,
        strike: Decimal,
        premium: Decimal,
    ) -> OptionLeg {
        OptionLeg::new(option_type, position, strike, premium, 1).unwrap()
    }

    #[test_case(OptionType::Call, PositionSide::Long, dec!(120), dec!(1500) ; "long call in the money")]
    #[test_case(OptionType::Call, PositionSide::Long, dec!(90), dec!(-500) ; "long call expires worthless")]
    #[test_case(OptionType::Call, PositionSide::Short, dec!(120), dec!(-1500) ; "short call in the money")]
    #[test_case(OptionType::Put, PositionSide::Long, dec!(80), dec!(1500) ; "long put in the money")]
    #[test_case(OptionType::Put, PositionSide::Short, dec!(110), dec!(500) ; "short put keeps premium")]
    #[test_case(OptionType::Stock, PositionSide::Long, dec!(110), dec!(1000) ; "long stock gains")]
    #[test_case(OptionType::Stock, PositionSide::Short, dec!(110), dec!(-1000) ; "short stock loses")]
    fn leg_payoff_at_expiration(
        option_type: OptionType,
        position: PositionSide,
        underlying: Decimal,
        expected: Decimal,
    ) {
        // Stock legs carry no premium
        let premium = if option_type.is_option() { dec!(5) } else { dec!(0) };
        let leg = leg(option_type, position, dec!(100), premium);

        assert_eq!(leg_payoff(&leg, underlying), expected);
    }

    #[test]
    fn quantity_scales_payoff() {
        let leg =
            OptionLeg::new(OptionType::Call, PositionSide::Long, dec!(100), dec!(5), 3).unwrap();
        assert_eq!(leg_payoff(&leg, dec!(110)), dec!(1500));
    }

    #[test]
    fn net_premium_signs_and_skips_stock() {
        let legs = vec![
            leg(OptionType::Stock, PositionSide::Long, dec!(100), dec!(0)),
            leg(OptionType::Call, PositionSide::Short, dec!(110), dec!(3)),
            leg(OptionType::Put, PositionSide::Long, dec!(90), dec!(1)),
        ];
        assert_eq!(net_premium(&legs), dec!(200));
    }

    #[test]
    fn default_curve_range_and_resolution() {
        let legs = vec![leg(OptionType::Call, PositionSide::Long, dec!(100), dec!(5))];

        let curve = payoff_curve(&legs, &CurveSettings::default());

        assert_eq!(curve.len(), 101);
        assert_eq!(curve[0].price, dec!(50));
        assert_eq!(curve[100].price, dec!(150));
        assert_eq!(curve[100].payoff, dec!(4500));
    }

    #[test]
    fn curve_floor_is_zero_for_cheap_underlyings() {
        let legs = vec![leg(OptionType::Put, PositionSide::Long, dec!(20), dec!(1))];

        let curve = payoff_curve(&legs, &CurveSettings::default());

        // Half-width is max(10, 50) = 50 and the low end clamps at zero
        assert_eq!(curve[0].price, dec!(0));
        assert_eq!(curve[100].price, dec!(70));
    }

    #[test]
    fn explicit_range_is_respected() {
        let legs = vec![leg(OptionType::Call, PositionSide::Long, dec!(100), dec!(5))];
        let settings = CurveSettings {
            min_price: Some(dec!(90)),
            max_price: Some(dec!(110)),
            points: 4,
        };

        let prices: Vec<_> = payoff_curve(&legs, &settings)
            .iter()
            .map(|p| p.price)
            .collect();

        assert_eq!(prices, vec![dec!(90), dec!(95), dec!(100), dec!(105), dec!(110)]);
    }

    #[test]
    fn empty_inputs_give_empty_curve() {
        assert!(payoff_curve(&[], &CurveSettings::default()).is_empty());

        let legs = vec![leg(OptionType::Call, PositionSide::Long, dec!(100), dec!(5))];
        let settings = CurveSettings {
            points: 0,
            ..CurveSettings::default()
        };
        assert!(payoff_curve(&legs, &settings).is_empty());
    }

    #[test]
    fn breakevens_interpolate_between_samples() {
        let curve = vec![
            PayoffPoint { price: dec!(10), payoff: dec!(-100) },
            PayoffPoint { price: dec!(11), payoff: dec!(300) },
        ];
        assert_eq!(breakevens(&curve), vec![dec!(10.25)]);
    }

    #[test]
    fn breakevens_skip_flat_zero_segments() {
        let curve = vec![
            PayoffPoint { price: dec!(10), payoff: dec!(0) },
            PayoffPoint { price: dec!(11), payoff: dec!(0) },
        ];
        assert!(breakevens(&curve).is_empty());
    }

    #[test]
    fn long_call_analysis() {
        let legs = vec![leg(OptionType::Call, PositionSide::Long, dec!(100), dec!(5))];

        let analysis = analyze(&legs);

        assert_eq!(analysis.breakevens, vec![dec!(105)]);
        assert_eq!(analysis.max_profit, PayoffBound::Unlimited);
        assert_eq!(analysis.max_loss, PayoffBound::Limited(dec!(500)));
        assert_eq!(analysis.net_premium, dec!(-500));
    }

    #[test]
    fn long_straddle_analysis() {
        let legs = vec![
            leg(OptionType::Call, PositionSide::Long, dec!(100), dec!(5)),
            leg(OptionType::Put, PositionSide::Long, dec!(100), dec!(5)),
        ];

        let analysis = analyze(&legs);

        assert_eq!(analysis.breakevens, vec![dec!(90), dec!(110)]);
        assert_eq!(analysis.max_profit, PayoffBound::Unlimited);
        assert_eq!(analysis.max_loss, PayoffBound::Limited(dec!(1000)));
    }

    #[test]
    fn iron_condor_has_bounded_risk() {
        let legs = vec![
            leg(OptionType::Put, PositionSide::Long, dec!(80), dec!(1)),
            leg(OptionType::Put, PositionSide::Short, dec!(90), dec!(2.5)),
            leg(OptionType::Call, PositionSide::Short, dec!(110), dec!(2.5)),
            leg(OptionType::Call, PositionSide::Long, dec!(120), dec!(1)),
        ];

        let analysis = analyze(&legs);

        assert_eq!(analysis.net_premium, dec!(300));
        assert_eq!(analysis.max_profit, PayoffBound::Limited(dec!(300)));
        assert_eq!(analysis.max_loss, PayoffBound::Limited(dec!(700)));
        assert_eq!(analysis.breakevens, vec![dec!(87), dec!(113)]);
    }

    #[test]
    fn empty_strategy_analysis() {
        assert_eq!(analyze(&[]), StrategyAnalysis::default());
    }

    #[test]
    fn bound_serialization() {
        assert_eq!(
            serde_json::to_string(&PayoffBound::Unlimited).unwrap(),
            "\"unlimited\""
        );
        assert_eq!(
            serde_json::to_value(PayoffBound::Limited(dec!(700))).unwrap(),
            serde_json::json!(700.0)
        );
    }

    #[test]
    fn analysis_serializes_numbers_for_the_client() {
        let legs = vec![leg(OptionType::Call, PositionSide::Long, dec!(100), dec!(5))];

        let json = serde_json::to_value(analyze(&legs)).unwrap();

        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec!["breakevens", "maxLoss", "maxProfit", "netPremium", "payoffData"]
        );
        assert_eq!(json["maxLoss"].as_f64(), Some(500.0));
        assert_eq!(json["maxProfit"], "unlimited");
        assert_eq!(json["netPremium"].as_f64(), Some(-500.0));
        assert_eq!(json["breakevens"][0].as_f64(), Some(105.0));
        assert!(json["payoffData"][0]["price"].is_number());
        assert!(json["payoffData"][0]["payoff"].is_number());
    }

    #[test]
    fn largest_accepted_legs_do_not_overflow() {
        use crate::domain::strategy::{MAX_LEG_PRICE, MAX_LEG_QUANTITY};

        let legs = vec![
            OptionLeg::new(
                OptionType::Call,
                PositionSide::Long,
                MAX_LEG_PRICE,
                MAX_LEG_PRICE,
                MAX_LEG_QUANTITY,
            )
            .unwrap(),
            OptionLeg::new(
                OptionType::Put,
                PositionSide::Short,
                MAX_LEG_PRICE,
                MAX_LEG_PRICE,
                MAX_LEG_QUANTITY,
            )
            .unwrap(),
        ];

        let analysis = analyze(&legs);
        assert_eq!(analysis.payoff_data.len(), 101);

        let settings = CurveSettings {
            min_price: Some(Decimal::MIN),
            max_price: Some(Decimal::MAX),
            points: 10,
        };
        let curve = payoff_curve(&legs, &settings);
        assert_eq!(curve[0].price, Decimal::ZERO);
        assert_eq!(curve[10].price, PRICE_CEILING);
    }
}
