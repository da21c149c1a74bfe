//! Shared Domain Types
//!
//! Value objects and errors shared by the subscription, strategy and
//! analysis modules.

pub mod errors;
mod strike;
mod symbol;

pub use errors::DomainError;
pub use strike::StrikePrice;
pub use symbol::Symbol;
