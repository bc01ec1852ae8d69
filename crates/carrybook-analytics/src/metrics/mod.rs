//! Per-position metrics.
//!
//! - [`pnl`]: Realized P&L in USD and bps
//! - [`carry`]: Total, accrued, remaining and daily carry
//! - [`exposure`]: Signed futures and physical equity exposure
//! - [`pricing`]: Fair value, implied financing, rebalancing, DV01
//! - [`spread`]: Calendar spread carry
//! - [`summary`]: [`PositionMetrics`] bundle

pub mod carry;
mod context;
pub mod exposure;
pub mod pnl;
pub mod pricing;
pub mod spread;
pub mod summary;

pub use carry::{
    accrual_fraction, accrued_carry, carry, daily_carry, expected_carry_to_maturity,
    rate_differential,
};
pub use context::CarryContext;
pub use exposure::{
    futures_equity_exposure, futures_notional_split, net_equity_exposure,
    physical_equity_exposure,
};
pub use pnl::{pnl_to_bps, profit_and_loss};
pub use pricing::{
    dv01, futures_theoretical_price, implied_financing_rate, needs_rebalance,
    shares_to_rebalance, DEFAULT_REBALANCE_THRESHOLD_SHARES,
};
pub use spread::{calendar_spread_carry, CalendarSpreadCarry};
pub use summary::PositionMetrics;
