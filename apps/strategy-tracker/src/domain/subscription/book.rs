//! Thread-safe collection of per-symbol registries.

use std::collections::HashMap;

use parking_lot::RwLock;
use rust_decimal::Decimal;

use super::StrikeSubscriptionRegistry;
use crate::domain::shared::{StrikePrice, Symbol};

/// Owns one [`StrikeSubscriptionRegistry`] per tracked symbol.
///
/// All registries sit behind a single `RwLock`: lookups take the shared
/// lock, registrations the exclusive one. Lookups on untracked symbols or
/// unwatched strikes return empty results.
///
/// # Example
///
/// ```rust
/// use strategy_tracker::{StrikePrice, SubscriptionBook, Symbol};
///
/// let book = SubscriptionBook::new();
/// book.add_subscriber(&Symbol::new("AAPL"), StrikePrice::from(150), 1_u64);
///
/// assert_eq!(book.subscribers(&Symbol::new("AAPL"), StrikePrice::from(150)), vec![1]);
/// assert!(book.subscribers(&Symbol::new("MSFT"), StrikePrice::from(150)).is_empty());
/// ```
#[derive(Debug)]
pub struct SubscriptionBook<S> {
    registries: RwLock<HashMap<Symbol, StrikeSubscriptionRegistry<S>>>,
}

impl<S> Default for SubscriptionBook<S> {
    fn default() -> Self {
        Self {
            registries: RwLock::new(HashMap::new()),
        }
    }
}

impl<S: Clone> SubscriptionBook<S> {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a symbol.
    ///
    /// Returns `true` if a new registry was created.
    pub fn track(&self, symbol: &Symbol) -> bool {
        let mut registries = self.registries.write();
        if registries.contains_key(symbol) {
            return false;
        }
        registries.insert(symbol.clone(), StrikeSubscriptionRegistry::new(symbol.clone()));
        true
    }

    /// Stop tracking a symbol, handing back its registry.
    pub fn untrack(&self, symbol: &Symbol) -> Option<StrikeSubscriptionRegistry<S>> {
        self.registries.write().remove(symbol)
    }

    /// Check whether a symbol has a registry.
    #[must_use]
    pub fn is_tracked(&self, symbol: &Symbol) -> bool {
        self.registries.read().contains_key(symbol)
    }

    /// All tracked symbols, sorted.
    #[must_use]
    pub fn tracked_symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<_> = self.registries.read().keys().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Register a subscriber, tracking the symbol first if needed.
    pub fn add_subscriber(&self, symbol: &Symbol, strike_price: StrikePrice, subscriber: S) {
        self.registries
            .write()
            .entry(symbol.clone())
            .or_insert_with(|| StrikeSubscriptionRegistry::new(symbol.clone()))
            .add_subscriber(strike_price, subscriber);
    }

    /// Watched strike prices for a symbol.
    #[must_use]
    pub fn strike_prices(&self, symbol: &Symbol) -> Vec<StrikePrice> {
        self.registries
            .read()
            .get(symbol)
            .map(StrikeSubscriptionRegistry::strike_price_keys)
            .unwrap_or_default()
    }

    /// Subscribers of a strike price, in registration order.
    #[must_use]
    pub fn subscribers(&self, symbol: &Symbol, strike_price: StrikePrice) -> Vec<S> {
        self.registries
            .read()
            .get(symbol)
            .map(|registry| registry.subscribers(strike_price).to_vec())
            .unwrap_or_default()
    }

    /// Strikes crossed by a price move, with their subscribers.
    ///
    /// See [`StrikeSubscriptionRegistry::strikes_crossed`].
    #[must_use]
    pub fn strikes_crossed(
        &self,
        symbol: &Symbol,
        from: Decimal,
        to: Decimal,
    ) -> Vec<(StrikePrice, Vec<S>)> {
        self.registries
            .read()
            .get(symbol)
            .map(|registry| {
                registry
                    .strikes_crossed(from, to)
                    .map(|(strike, subscribers)| (strike, subscribers.to_vec()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Copy of a symbol's registry.
    #[must_use]
    pub fn snapshot(&self, symbol: &Symbol) -> Option<StrikeSubscriptionRegistry<S>> {
        self.registries.read().get(symbol).cloned()
    }

    /// Counts across all registries.
    #[must_use]
    pub fn stats(&self) -> BookStats {
        let registries = self.registries.read();
        BookStats {
            symbol_count: registries.len(),
            strike_count: registries
                .values()
                .map(StrikeSubscriptionRegistry::strike_count)
                .sum(),
            subscription_count: registries
                .values()
                .map(StrikeSubscriptionRegistry::subscription_count)
                .sum(),
        }
    }
}

/// Size of a [`SubscriptionBook`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookStats {
    /// Number of tracked symbols.
    pub symbol_count: usize,
    /// Number of watched strike prices across symbols.
    pub strike_count: usize,
    /// Number of subscriptions, duplicates included.
    pub subscription_count: usize,
}
