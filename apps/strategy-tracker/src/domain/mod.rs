//! Domain Layer - Core types and business logic.
//!
//! Pure Rust types with serialization support and no I/O.

/// Value objects and errors shared across the domain.
pub mod shared;

/// Strike price subscription registries.
pub mod subscription;

/// Users, strategies and option legs.
pub mod strategy;

/// Payoff analytics and strategy presets.
pub mod analysis;
