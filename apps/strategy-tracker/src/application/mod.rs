//! Application Layer - Use cases and port definitions.
//!
//! Services here orchestrate the domain types and talk to storage only
//! through the port traits.

/// Port interfaces for storage.
pub mod ports;

/// Alert and strategy use cases.
pub mod services;
