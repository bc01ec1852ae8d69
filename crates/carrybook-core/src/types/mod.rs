//! Domain types shared by every Carrybook crate.
//!
//! - [`Date`]: Calendar date for carry and lifecycle calculations
//! - [`Direction`]: Long/short leg direction

mod date;
mod direction;

pub use date::Date;
pub use direction::Direction;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One basis point as a decimal fraction.
pub const BASIS_POINT: Decimal = dec!(0.0001);

/// Basis points per unit (1.0 = 10,000 bps).
pub const BPS_PER_UNIT: Decimal = dec!(10_000);
