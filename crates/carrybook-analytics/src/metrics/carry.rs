//! Carry: the financing-rate-driven profit or cost of holding a leg.
//!
//! Total carry is `rate_differential × |notional| × yf(start, end)`, where
//! the differential is the leg's financing rate minus the context funding
//! rate (or the leg's rate alone when no funding rate is supplied).
//!
//! Accrual splits total carry by the elapsed share of the leg's life. The
//! fraction is clamped to `[0, 1]` so a reference date outside the leg's
//! window never produces negative carry or more than 100% of it.

use rust_decimal::Decimal;

use super::CarryContext;
use crate::types::Position;

/// Financing rate minus the reference funding rate.
#[must_use]
pub fn rate_differential(position: &Position, ctx: &CarryContext) -> Decimal {
    position.financing_rate - ctx.funding_rate.unwrap_or(Decimal::ZERO)
}

/// Total carry in USD over the leg's full life.
#[must_use]
pub fn carry(position: &Position, ctx: &CarryContext) -> Decimal {
    let year_fraction = ctx
        .day_count
        .year_fraction(position.start_date, position.end_date);
    rate_differential(position, ctx) * position.notional.abs() * year_fraction
}

/// Elapsed share of the leg's life at the reference date, clamped to `[0, 1]`.
#[must_use]
pub fn accrual_fraction(position: &Position, ctx: &CarryContext) -> Decimal {
    let total_days = position.term_days();
    if total_days <= 0 {
        return Decimal::ONE;
    }
    let elapsed = position.start_date.days_between(&ctx.reference_date);
    let fraction = Decimal::from(elapsed) / Decimal::from(total_days);
    fraction.clamp(Decimal::ZERO, Decimal::ONE)
}

/// Carry earned from start date to the reference date.
#[must_use]
pub fn accrued_carry(position: &Position, ctx: &CarryContext) -> Decimal {
    carry(position, ctx) * accrual_fraction(position, ctx)
}

/// Carry still to be earned from the reference date to maturity.
#[must_use]
pub fn expected_carry_to_maturity(position: &Position, ctx: &CarryContext) -> Decimal {
    carry(position, ctx) - accrued_carry(position, ctx)
}

/// Daily carry run-rate: remaining carry over remaining calendar days.
///
/// Returns `None` at or past maturity, where a daily run-rate is undefined.
#[must_use]
pub fn daily_carry(position: &Position, ctx: &CarryContext) -> Option<Decimal> {
    let remaining_days = position.days_to_maturity(ctx.reference_date);
    if remaining_days <= 0 {
        return None;
    }
    Some(expected_carry_to_maturity(position, ctx) / Decimal::from(remaining_days))
}
