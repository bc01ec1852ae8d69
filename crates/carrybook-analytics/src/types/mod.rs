//! Typed input records.
//!
//! - [`Position`]: A single leg of a carry basket
//! - [`Contract`]: A futures contract for the forward rate matrix

mod contract;
mod position;

pub use contract::Contract;
pub use position::{Position, PositionBuilder, PositionType, StrategyType};
