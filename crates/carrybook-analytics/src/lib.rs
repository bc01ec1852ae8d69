//! # Carrybook Analytics
//!
//! Calculation engine for equity-futures carry books.
//!
//! - **Types**: [`Position`](types::Position) legs and futures
//!   [`Contract`](types::Contract)s
//! - **Metrics**: P&L, carry and accrual, signed equity exposure, fair value,
//!   implied financing, rebalancing, DV01, calendar spread carry
//! - **Forward rates**: the N×N implied forward rate matrix and the
//!   rich/cheap spread screen
//!
//! Every function is pure: identical inputs and reference date give
//! identical outputs, and no input record is ever modified.
//!
//! ## Usage
//!
//! ```rust
//! use carrybook_analytics::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let reference = Date::from_ymd(2026, 2, 27).unwrap();
//! let march = Contract::new("AXWH6", Some(dec!(44.5)), Date::from_ymd(2026, 3, 20).unwrap(), reference);
//! let june = Contract::new("AXWM6", Some(dec!(51.5)), Date::from_ymd(2026, 6, 18).unwrap(), reference);
//!
//! let rate = implied_forward_rate(&march, &june).rate().unwrap();
//! assert!((rate - dec!(53.13)).abs() < dec!(0.01));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod forward;
pub mod metrics;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use carrybook_core::prelude::*;

    pub use crate::forward::{
        identify_calendar_spread_opportunities, implied_forward_rate, DarkReason,
        ForwardRateCell, ForwardRateMatrix, SpreadAction, SpreadOpportunity, SpreadSignal,
        TenorBucket,
    };
    pub use crate::metrics::{
        accrued_carry, calendar_spread_carry, carry, daily_carry, dv01,
        expected_carry_to_maturity, futures_equity_exposure, futures_theoretical_price,
        implied_financing_rate, net_equity_exposure, physical_equity_exposure,
        profit_and_loss, shares_to_rebalance, CarryContext, PositionMetrics,
    };
    pub use crate::types::{Contract, Position, PositionType, StrategyType};
}
