//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer, plus the
//! process-wide concerns:
//!
//! - `config/`: environment-driven settings
//! - `persistence/`: repository adapters (in-memory)
//! - `telemetry/`: tracing subscriber and OTLP export
//! - `metrics/`: Prometheus metrics

pub mod config;
pub mod metrics;
pub mod persistence;
pub mod telemetry;
