//! Strategy Entities
//!
//! Users, the option strategies they save and the legs those strategies
//! are built from. A user owns its strategies and a strategy owns its legs:
//! removing the owner removes everything beneath it.

mod definition;
mod leg;
mod user;

pub use definition::{NewStrategy, Strategy, StrategyId};
pub use leg::{MAX_LEG_PRICE, MAX_LEG_QUANTITY, OptionLeg, OptionType, PositionSide};
pub use user::{NewUser, User, UserId};
