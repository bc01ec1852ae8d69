//! Profit and loss.

use carrybook_core::types::BPS_PER_UNIT;
use carrybook_core::{CarryError, CarryResult};
use rust_decimal::Decimal;

use crate::types::Position;

/// Realized P&L of a position in USD and in basis points of notional.
///
/// # Errors
///
/// Returns `CarryError::DataError` when the notional is zero.
pub fn profit_and_loss(position: &Position) -> CarryResult<(Decimal, Decimal)> {
    let bps = pnl_to_bps(position.realized_pnl, position.notional).ok_or_else(|| {
        CarryError::data_error(format!(
            "position '{}': cannot express P&L in bps of a zero notional",
            position.position_id
        ))
    })?;
    Ok((position.realized_pnl, bps))
}

/// Converts a USD amount into basis points of `notional`.
///
/// Returns `None` for a zero notional.
#[must_use]
pub fn pnl_to_bps(value: Decimal, notional: Decimal) -> Option<Decimal> {
    value
        .checked_div(notional.abs())
        .map(|ratio| ratio * BPS_PER_UNIT)
}
