//! Prometheus Metrics Module
//!
//! # Metrics
//!
//! - `strategy_tracker_subscriptions_added_total{source}`: strike
//!   subscriptions registered, by origin
//! - `strategy_tracker_alerts_triggered_total`: strike crossings that had
//!   subscribers
//! - `strategy_tracker_strategies_saved_total`: strategies persisted
//! - `strategy_tracker_tracked_symbols`: symbols with a registry
//!
//! Recording is a no-op until [`init_metrics`] installs the recorder, so
//! library users that bring their own recorder are unaffected.

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use parking_lot::Mutex;

static PROMETHEUS_HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

/// Install the Prometheus recorder, or return the existing handle.
///
/// Concurrent callers are serialized, so exactly one installs the
/// recorder and the rest receive its handle.
///
/// # Errors
///
/// Returns error if a recorder from elsewhere is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let mut slot = PROMETHEUS_HANDLE.lock();
    if let Some(handle) = slot.as_ref() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    *slot = Some(handle.clone());

    Ok(handle)
}

/// Get the Prometheus handle for rendering metrics.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.lock().clone()
}

fn register_metrics() {
    describe_counter!(
        "strategy_tracker_subscriptions_added_total",
        "Strike price subscriptions registered"
    );
    describe_counter!(
        "strategy_tracker_alerts_triggered_total",
        "Strike crossings delivered to subscribers"
    );
    describe_counter!(
        "strategy_tracker_strategies_saved_total",
        "Strategies persisted"
    );
    describe_gauge!(
        "strategy_tracker_tracked_symbols",
        "Symbols with an active strike registry"
    );
}

/// Where a strike subscription came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionSource {
    /// Explicit price alert.
    PriceAlert,
    /// Strike of a saved strategy's leg.
    Strategy,
}

impl SubscriptionSource {
    const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAlert => "price_alert",
            Self::Strategy => "strategy",
        }
    }
}

/// Record registered subscriptions.
pub fn record_subscriptions_added(source: SubscriptionSource, count: u64) {
    counter!(
        "strategy_tracker_subscriptions_added_total",
        "source" => source.as_str()
    )
    .increment(count);
}

/// Record triggered alerts.
pub fn record_alerts_triggered(count: u64) {
    counter!("strategy_tracker_alerts_triggered_total").increment(count);
}

/// Record a saved strategy.
pub fn record_strategy_saved() {
    counter!("strategy_tracker_strategies_saved_total").increment(1);
}

/// Update the tracked symbol count.
#[allow(clippy::cast_precision_loss)]
pub fn set_tracked_symbols(count: usize) {
    gauge!("strategy_tracker_tracked_symbols").set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_source_as_str() {
        assert_eq!(SubscriptionSource::PriceAlert.as_str(), "price_alert");
        assert_eq!(SubscriptionSource::Strategy.as_str(), "strategy");
    }

    #[test]
    fn recording_without_recorder_is_noop() {
        record_subscriptions_added(SubscriptionSource::PriceAlert, 2);
        record_alerts_triggered(1);
        record_strategy_saved();
        set_tracked_symbols(3);
    }

    #[test]
    fn concurrent_init_shares_one_recorder() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| init_metrics().is_ok()))
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert!(get_metrics_handle().is_some());
    }

    #[test]
    fn init_metrics_renders_described_metrics() {
        let handle = init_metrics().unwrap();
        assert!(get_metrics_handle().is_some());
        assert!(init_metrics().is_ok());

        record_strategy_saved();
        assert!(handle.render().contains("strategy_tracker_strategies_saved_total"));
    }
}
