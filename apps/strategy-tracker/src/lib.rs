#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Strategy Tracker - Options Strategy Backend Core
//!
//! Tracks which users watch which strike prices of which stocks, stores
//! users' option strategies and computes their payoff profiles.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Value objects, entities and pure logic
//!   - `subscription`: Per-symbol strike price registries
//!   - `strategy`: Users, strategies and option legs
//!   - `analysis`: Payoff curves, breakevens and strategy presets
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: Repository interfaces
//!   - `services`: Price alerts, strategy persistence and analysis
//!
//! - **Infrastructure**: Adapters and process-wide concerns
//!   - `config`: Environment configuration
//!   - `persistence`: In-memory repositories
//!   - `telemetry`: Tracing and OTLP export
//!   - `metrics`: Prometheus metrics
//!
//! # Example
//!
//! ```rust
//! use strategy_tracker::domain::subscription::StrikeSubscriptionRegistry;
//! use strategy_tracker::StrikePrice;
//!
//! let mut registry = StrikeSubscriptionRegistry::new("AAPL");
//! registry.add_subscriber(StrikePrice::from(150), "user1");
//! registry.add_subscriber(StrikePrice::from(150), "user2");
//!
//! assert_eq!(registry.subscribers(StrikePrice::from(150)), &["user1", "user2"]);
//! assert!(registry.subscribers(StrikePrice::from(200)).is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Core types with no infrastructure dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and process-wide concerns.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::analysis::{PayoffBound, StrategyAnalysis, StrategyPreset, analyze};
pub use domain::shared::{DomainError, StrikePrice, Symbol};
pub use domain::strategy::{OptionLeg, OptionType, PositionSide, Strategy, StrategyId, User, UserId};
pub use domain::subscription::{BookStats, StrikeSubscriptionRegistry, SubscriptionBook};

// Application services
pub use application::services::{
    AlertService, AlertTrigger, PriceAlert, PriceAlertRequest, PriceDirection, SaveStrategyRequest,
    ServiceError, StrategyService,
};

// Infrastructure config
pub use infrastructure::config::{AppConfig, ConfigError, Environment};
