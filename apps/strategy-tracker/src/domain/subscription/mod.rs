//! Strike Price Subscriptions
//!
//! Domain types for tracking which subscribers want to hear about a
//! stock reaching a given strike price.
//!
//! # Design
//!
//! - [`StrikeSubscriptionRegistry`] holds, for one symbol, the strike
//!   prices being watched and the subscribers of each, in registration
//!   order. It is a plain single-threaded accumulator.
//! - [`SubscriptionBook`] owns one registry per tracked symbol behind a
//!   read/write lock for use from concurrent request handlers.
//!
//! Subscribers are opaque: user ids, session ids or channel handles all
//! work, and neither type ever inspects them.

mod book;
mod registry;

pub use book::{BookStats, SubscriptionBook};
pub use registry::StrikeSubscriptionRegistry;
