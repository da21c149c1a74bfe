//! Price alerts over strike subscriptions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ServiceError;
use crate::domain::shared::{StrikePrice, Symbol};
use crate::domain::strategy::{Strategy, UserId};
use crate::domain::subscription::SubscriptionBook;
use crate::infrastructure::metrics::{
    SubscriptionSource, record_alerts_triggered, record_subscriptions_added, set_tracked_symbols,
};

/// Alert request as posted by the web client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlertRequest {
    /// Underlying stock.
    pub stock_symbol: Symbol,
    /// Price to watch.
    pub target_price: Decimal,
}

/// A registered price alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    /// Subscribed user.
    pub user_id: UserId,
    /// Underlying stock.
    pub stock_symbol: Symbol,
    /// Watched strike price.
    pub target_price: StrikePrice,
}

/// Direction of a price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    /// Price went up through the strike.
    Rising,
    /// Price went down through the strike.
    Falling,
}

/// A strike crossed by a price move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertTrigger {
    /// Underlying stock.
    pub symbol: Symbol,
    /// Strike that was crossed.
    pub strike_price: StrikePrice,
    /// Move direction.
    pub direction: PriceDirection,
    /// Users to notify, in subscription order.
    pub subscribers: Vec<UserId>,
    /// When the crossing was detected.
    pub triggered_at: DateTime<Utc>,
}

/// Registers users against strike prices and reports crossings.
#[derive(Debug, Clone, Default)]
pub struct AlertService {
    book: Arc<SubscriptionBook<UserId>>,
}

impl AlertService {
    /// Create a service over a shared subscription book.
    #[must_use]
    pub const fn new(book: Arc<SubscriptionBook<UserId>>) -> Self {
        Self { book }
    }

    /// The underlying subscription book.
    #[must_use]
    pub fn book(&self) -> &SubscriptionBook<UserId> {
        &self.book
    }

    /// Subscribe a user to a target price.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the symbol is malformed or the price is
    /// not strictly positive.
    pub fn create_price_alert(
        &self,
        user_id: UserId,
        request: PriceAlertRequest,
    ) -> Result<PriceAlert, ServiceError> {
        let stock_symbol = request.stock_symbol.normalized();
        stock_symbol.validate()?;
        let target_price = StrikePrice::try_new(request.target_price)?;

        self.book.add_subscriber(&stock_symbol, target_price, user_id);
        record_subscriptions_added(SubscriptionSource::PriceAlert, 1);
        set_tracked_symbols(self.book.stats().symbol_count);

        info!(
            user_id = %user_id,
            symbol = %stock_symbol,
            target_price = %target_price,
            "Price alert created"
        );

        Ok(PriceAlert {
            user_id,
            stock_symbol,
            target_price,
        })
    }

    /// Subscribe a strategy's owner to each of its option strikes.
    ///
    /// Strategies without a stock symbol have nothing to watch. Returns
    /// the number of subscriptions added.
    pub fn watch_strategy(&self, strategy: &Strategy) -> usize {
        let Some(symbol) = strategy.stock_symbol().map(Symbol::normalized) else {
            return 0;
        };

        let mut added = 0;
        for strike in strategy.option_strikes() {
            self.book.add_subscriber(&symbol, strike, strategy.user_id());
            added += 1;
        }

        if added > 0 {
            record_subscriptions_added(SubscriptionSource::Strategy, added as u64);
            set_tracked_symbols(self.book.stats().symbol_count);
            debug!(
                strategy_id = %strategy.id(),
                symbol = %symbol,
                strikes = added,
                "Watching strategy strikes"
            );
        }

        added
    }

    /// Report every strike crossed by a move from `previous` to `current`.
    ///
    /// Symbols are matched in their normalized form, like the alerts.
    #[must_use]
    pub fn evaluate_price_move(
        &self,
        symbol: &Symbol,
        previous: Decimal,
        current: Decimal,
    ) -> Vec<AlertTrigger> {
        let direction = if current > previous {
            PriceDirection::Rising
        } else {
            PriceDirection::Falling
        };
        let triggered_at = Utc::now();
        let symbol = &symbol.normalized();

        let triggers: Vec<AlertTrigger> = self
            .book
            .strikes_crossed(symbol, previous, current)
            .into_iter()
            .map(|(strike_price, subscribers)| AlertTrigger {
                symbol: symbol.clone(),
                strike_price,
                direction,
                subscribers,
                triggered_at,
            })
            .collect();

        if !triggers.is_empty() {
            record_alerts_triggered(triggers.len() as u64);
            info!(
                symbol = %symbol,
                previous = %previous,
                current = %current,
                crossed = triggers.len(),
                "Strike prices crossed"
            );
        }

        triggers
    }

    /// Strike prices watched for a symbol, ascending.
    #[must_use]
    pub fn watched_strikes(&self, symbol: &Symbol) -> Vec<StrikePrice> {
        self.book.strike_prices(&symbol.normalized())
    }

    /// Drop every subscription for a symbol. Returns whether it was tracked.
    pub fn stop_tracking(&self, symbol: &Symbol) -> bool {
        let symbol = &symbol.normalized();
        let removed = self.book.untrack(symbol).is_some();
        if removed {
            set_tracked_symbols(self.book.stats().symbol_count);
            info!(symbol = %symbol, "Stopped tracking symbol");
        }
        removed
    }
}
