//! Application Services
//!
//! - `AlertService`: price alerts and strike crossings
//! - `StrategyService`: saving, listing and analyzing strategies

mod alerts;
mod errors;
mod strategies;

pub use alerts::{AlertService, AlertTrigger, PriceAlert, PriceAlertRequest, PriceDirection};
pub use errors::ServiceError;
pub use strategies::{SaveStrategyRequest, StrategyService};
