//! Futures fair value, implied financing, rebalancing and DV01.
//!
//! All annualising formulas take the day count explicitly. Under the
//! default ACT/360 convention:
//!
//! ```text
//! F = S × (1 + r × T/360) − D
//! r = ((F + D)/S − 1) × 360/T
//! DV01 = |N| × T/360 × 0.0001
//! ```

use carrybook_core::types::BASIS_POINT;
use carrybook_core::{CarryError, CarryResult, DayCountConvention};
use rust_decimal::Decimal;

/// Share difference at which a constituent is flagged for rebalancing.
pub const DEFAULT_REBALANCE_THRESHOLD_SHARES: i64 = 1_000;

/// Theoretical futures price from spot, financing rate and dividends.
///
/// # Arguments
///
/// * `spot` - Spot level of the underlying
/// * `rate` - Annualised financing rate as a decimal fraction
/// * `days` - Calendar days to delivery
/// * `dividends` - Dividends expected before delivery, in index points
/// * `convention` - Day count used to annualise `rate`
///
/// # Errors
///
/// Returns `CarryError::DataError` if `spot` is not positive.
pub fn futures_theoretical_price(
    spot: Decimal,
    rate: Decimal,
    days: i64,
    dividends: Decimal,
    convention: DayCountConvention,
) -> CarryResult<Decimal> {
    if spot <= Decimal::ZERO {
        return Err(CarryError::data_error(format!(
            "spot must be positive, got {spot}"
        )));
    }
    let year_fraction = convention.year_fraction_days(days);
    Ok(spot * (Decimal::ONE + rate * year_fraction) - dividends)
}

/// Financing rate implied by a futures price, the inverse of
/// [`futures_theoretical_price`].
///
/// Returns `None` when `spot` or `days` is zero.
#[must_use]
pub fn implied_financing_rate(
    futures: Decimal,
    spot: Decimal,
    dividends: Decimal,
    days: i64,
    convention: DayCountConvention,
) -> Option<Decimal> {
    if days == 0 {
        return None;
    }
    let ratio = (futures + dividends).checked_div(spot)?;
    let year_fraction = convention.year_fraction_days(days);
    (ratio - Decimal::ONE).checked_div(year_fraction)
}

/// Shares to buy (positive) or sell (negative) to reach a constituent's
/// index weight in `target_notional`.
///
/// The target share count is truncated toward zero before the current
/// holding is subtracted.
///
/// # Errors
///
/// Returns `CarryError::DataError` if `local_price` is not positive or the
/// target share count does not fit in an `i64`.
pub fn shares_to_rebalance(
    current_shares: i64,
    index_weight: Decimal,
    target_notional: Decimal,
    local_price: Decimal,
) -> CarryResult<i64> {
    if local_price <= Decimal::ZERO {
        return Err(CarryError::data_error(format!(
            "local price must be positive, got {local_price}"
        )));
    }
    let target = (index_weight * target_notional / local_price).trunc();
    let target_shares = i64::try_from(target).map_err(|_| {
        CarryError::data_error(format!("target share count {target} is out of range"))
    })?;
    Ok(target_shares - current_shares)
}

/// Returns true if a share difference warrants a rebalancing trade.
///
/// The threshold is inclusive: a difference of exactly `threshold_shares`
/// is flagged.
#[must_use]
pub fn needs_rebalance(shares_delta: i64, threshold_shares: i64) -> bool {
    shares_delta != 0 && shares_delta.abs() >= threshold_shares
}

/// Dollar value of a one basis point move in the financing rate.
#[must_use]
pub fn dv01(notional: Decimal, period_days: i64, convention: DayCountConvention) -> Decimal {
    notional.abs() * convention.year_fraction_days(period_days) * BASIS_POINT
}
