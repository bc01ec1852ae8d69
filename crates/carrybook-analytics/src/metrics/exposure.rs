//! Signed equity exposure.
//!
//! Futures and physical legs contribute `notional × (+1 long, −1 short)`;
//! financing legs contribute nothing. A correctly hedged basket nets to
//! roughly zero.

use rust_decimal::Decimal;

use crate::types::Position;

/// Signed equity exposure of a futures leg; zero for any other leg kind.
#[must_use]
pub fn futures_equity_exposure(position: &Position) -> Decimal {
    if position.position_type.is_futures() {
        position.signed_notional()
    } else {
        Decimal::ZERO
    }
}

/// Signed equity exposure of a physical leg; zero for any other leg kind.
#[must_use]
pub fn physical_equity_exposure(position: &Position) -> Decimal {
    if position.position_type.is_physical() {
        position.signed_notional()
    } else {
        Decimal::ZERO
    }
}

/// Net signed equity exposure of all legs in `basket_id`.
#[must_use]
pub fn net_equity_exposure(positions: &[Position], basket_id: &str) -> Decimal {
    positions
        .iter()
        .filter(|p| p.basket_id == basket_id)
        .map(|p| futures_equity_exposure(p) + physical_equity_exposure(p))
        .sum()
}

/// Gross long and short futures notional, both unsigned.
#[must_use]
pub fn futures_notional_split<'a>(
    positions: impl IntoIterator<Item = &'a Position>,
) -> (Decimal, Decimal) {
    positions
        .into_iter()
        .filter(|p| p.position_type.is_futures())
        .fold((Decimal::ZERO, Decimal::ZERO), |(long, short), p| {
            match p.direction {
                carrybook_core::Direction::Long => (long + p.notional.abs(), short),
                carrybook_core::Direction::Short => (long, short + p.notional.abs()),
            }
        })
}
