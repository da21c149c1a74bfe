//! Strategy Payoff Analysis
//!
//! Expiration payoff of a set of legs: per-leg and total payoff at an
//! underlying price, net premium, a sampled payoff curve, breakeven
//! points and max profit/loss.
//!
//! All amounts are in dollars per position, using the standard 100-share
//! contract multiplier.

mod payoff;
mod presets;

pub use payoff::{
    CONTRACT_MULTIPLIER, CurveSettings, PayoffBound, PayoffPoint, StrategyAnalysis, analyze,
    breakevens, leg_payoff, net_premium, payoff_curve, strategy_payoff,
};
pub use presets::StrategyPreset;
