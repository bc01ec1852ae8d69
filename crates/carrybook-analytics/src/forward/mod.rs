//! Implied forward rates between futures contracts.
//!
//! - [`implied_forward_rate`]: One (FROM, TO) cell
//! - [`ForwardRateMatrix`]: Every pair of a contract universe, with the
//!   cross-set integrity check
//! - [`identify_calendar_spread_opportunities`]: Rich/cheap screen

mod matrix;
mod opportunities;
mod rate;

pub use matrix::ForwardRateMatrix;
pub use opportunities::{
    identify_calendar_spread_opportunities, SpreadAction, SpreadOpportunity, SpreadSignal,
    TenorBucket, DEFAULT_CHEAP_THRESHOLD_BPS, DEFAULT_RICH_THRESHOLD_BPS,
};
pub use rate::{implied_forward_rate, DarkReason, ForwardRateCell};
