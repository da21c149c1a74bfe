//! Per-symbol strike price registry.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

use rust_decimal::Decimal;

use crate::domain::shared::{StrikePrice, Symbol};

/// Maps the strike prices watched for one stock to their subscribers.
///
/// Strike keys are created lazily by [`add_subscriber`](Self::add_subscriber)
/// and never removed, so every key has at least one subscriber. Subscribers
/// under a strike keep their registration order and are not deduplicated.
///
/// # Example
///
/// ```rust
/// use strategy_tracker::domain::subscription::StrikeSubscriptionRegistry;
/// use strategy_tracker::StrikePrice;
///
/// let mut registry = StrikeSubscriptionRegistry::new("AAPL");
/// registry.add_subscriber(StrikePrice::from(150), "user1");
/// registry.add_subscriber(StrikePrice::from(150), "user2");
///
/// assert_eq!(registry.subscribers(StrikePrice::from(150)), ["user1", "user2"]);
/// assert!(registry.subscribers(StrikePrice::from(170)).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrikeSubscriptionRegistry<S> {
    symbol: Symbol,
    strike_prices: BTreeMap<StrikePrice, Vec<S>>,
}

impl<S> StrikeSubscriptionRegistry<S> {
    /// Create an empty registry for a symbol.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            strike_prices: BTreeMap::new(),
        }
    }

    /// The stock this registry tracks.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Append a subscriber to a strike price, creating the strike if needed.
    pub fn add_subscriber(&mut self, strike_price: StrikePrice, subscriber: S) {
        self.strike_prices
            .entry(strike_price)
            .or_default()
            .push(subscriber);
    }

    /// All watched strike prices.
    ///
    /// Returned in ascending order; callers should not rely on it.
    #[must_use]
    pub fn strike_price_keys(&self) -> Vec<StrikePrice> {
        self.strike_prices.keys().copied().collect()
    }

    /// Subscribers of a strike price, empty if nobody watches it.
    #[must_use]
    pub fn subscribers(&self, strike_price: StrikePrice) -> &[S] {
        self.strike_prices
            .get(&strike_price)
            .map_or(&[], Vec::as_slice)
    }

    /// Strikes passed through by a price move from `from` to `to`.
    ///
    /// A rising move crosses strikes in `(from, to]`, a falling move those
    /// in `[to, from)`. Arriving exactly on a strike counts; leaving one
    /// does not. Yields in ascending strike order.
    pub fn strikes_crossed(
        &self,
        from: Decimal,
        to: Decimal,
    ) -> impl Iterator<Item = (StrikePrice, &[S])> + '_ {
        let (from, to) = (StrikePrice::new(from), StrikePrice::new(to));
        let bounds = if from < to {
            Some((Bound::Excluded(from), Bound::Included(to)))
        } else if to < from {
            Some((Bound::Included(to), Bound::Excluded(from)))
        } else {
            None
        };

        bounds
            .into_iter()
            .flat_map(move |range| self.strike_prices.range(range))
            .map(|(strike, subscribers)| (*strike, subscribers.as_slice()))
    }

    /// True when no strike price is watched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strike_prices.is_empty()
    }

    /// Number of watched strike prices.
    #[must_use]
    pub fn strike_count(&self) -> usize {
        self.strike_prices.len()
    }

    /// Number of subscriptions across all strikes, duplicates included.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.strike_prices.values().map(Vec::len).sum()
    }
}

impl<S: fmt::Debug> fmt::Display for StrikeSubscriptionRegistry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<StrikeSubscriptionRegistry {}: {{", self.symbol)?;
        for (i, (strike, subscribers)) in self.strike_prices.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{strike}: {subscribers:?}")?;
        }
        f.write_str("}>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn strike(value: i64) -> StrikePrice {
        StrikePrice::from(value)
    }

    fn aapl_registry() -> StrikeSubscriptionRegistry<&'static str> {
        let mut registry = StrikeSubscriptionRegistry::new("AAPL");
        registry.add_subscriber(strike(150), "user1");
        registry.add_subscriber(strike(150), "user2");
        registry.add_subscriber(strike(160), "user3");
        registry
    }

    #[test]
    fn new_registry_is_empty() {
        let registry: StrikeSubscriptionRegistry<u64> = StrikeSubscriptionRegistry::new("MSFT");

        assert!(registry.is_empty());
        assert!(registry.strike_price_keys().is_empty());
        assert_eq!(registry.symbol().as_str(), "MSFT");
    }

    #[test]
    fn symbol_is_kept_as_given() {
        let registry: StrikeSubscriptionRegistry<u64> = StrikeSubscriptionRegistry::new("aapl");
        assert_eq!(registry.symbol().as_str(), "aapl");
    }

    #[test]
    fn unknown_strike_has_no_subscribers() {
        let registry: StrikeSubscriptionRegistry<u64> = StrikeSubscriptionRegistry::new("MSFT");
        assert!(registry.subscribers(strike(100)).is_empty());
    }

    #[test]
    fn aapl_scenario() {
        let registry = aapl_registry();

        assert_eq!(registry.strike_price_keys(), vec![strike(150), strike(160)]);
        assert_eq!(registry.subscribers(strike(150)), ["user1", "user2"]);
        assert_eq!(registry.subscribers(strike(160)), ["user3"]);
        assert!(registry.subscribers(strike(170)).is_empty());
    }

    #[test]
    fn duplicate_subscribers_are_kept() {
        let mut registry = StrikeSubscriptionRegistry::new("AAPL");
        registry.add_subscriber(strike(150), 7_u64);
        registry.add_subscriber(strike(150), 7_u64);

        assert_eq!(registry.subscribers(strike(150)), [7, 7]);
        assert_eq!(registry.strike_count(), 1);
        assert_eq!(registry.subscription_count(), 2);
    }

    #[test]
    fn decimal_scale_does_not_split_keys() {
        let mut registry = StrikeSubscriptionRegistry::new("SPY");
        registry.add_subscriber(StrikePrice::new(dec!(450)), "a");
        registry.add_subscriber(StrikePrice::new(dec!(450.00)), "b");

        assert_eq!(registry.strike_count(), 1);
        assert_eq!(registry.subscribers(StrikePrice::new(dec!(450.0))), ["a", "b"]);
    }

    #[test]
    fn rising_move_crosses_strikes_in_half_open_range() {
        let registry = aapl_registry();

        let crossed: Vec<_> = registry
            .strikes_crossed(dec!(150), dec!(160))
            .map(|(strike, _)| strike)
            .collect();

        // Leaving 150 does not count, landing on 160 does
        assert_eq!(crossed, vec![strike(160)]);
    }

    #[test]
    fn falling_move_crosses_strikes() {
        let registry = aapl_registry();

        let crossed: Vec<_> = registry.strikes_crossed(dec!(165), dec!(149.5)).collect();

        assert_eq!(crossed.len(), 2);
        assert_eq!(crossed[0], (strike(150), ["user1", "user2"].as_slice()));
        assert_eq!(crossed[1], (strike(160), ["user3"].as_slice()));
    }

    #[test]
    fn no_move_crosses_nothing() {
        let registry = aapl_registry();
        assert_eq!(registry.strikes_crossed(dec!(150), dec!(150)).count(), 0);
    }

    #[test]
    fn display_lists_symbol_and_mapping() {
        let registry = aapl_registry();

        assert_eq!(
            registry.to_string(),
            r#"<StrikeSubscriptionRegistry AAPL: {150: ["user1", "user2"], 160: ["user3"]}>"#
        );
    }
}
