//! Evaluation context for time-dependent metrics.

use carrybook_core::{Date, DayCountConvention};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs shared by every carry calculation in one evaluation pass.
///
/// The reference date is always explicit; nothing in the engine reads the
/// system clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryContext {
    /// Valuation date.
    pub reference_date: Date,

    /// Reference funding rate (decimal fraction). When absent, carry is the
    /// position's own financing rate applied to its notional.
    pub funding_rate: Option<Decimal>,

    /// Day count used to annualise rates.
    pub day_count: DayCountConvention,
}

impl CarryContext {
    /// Creates a context with ACT/360 and no reference funding rate.
    #[must_use]
    pub fn new(reference_date: Date) -> Self {
        Self {
            reference_date,
            funding_rate: None,
            day_count: DayCountConvention::default(),
        }
    }

    /// Sets the reference funding rate.
    #[must_use]
    pub fn with_funding_rate(mut self, rate: Decimal) -> Self {
        self.funding_rate = Some(rate);
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Moves the context to another reference date.
    #[must_use]
    pub fn at(mut self, reference_date: Date) -> Self {
        self.reference_date = reference_date;
        self
    }
}
