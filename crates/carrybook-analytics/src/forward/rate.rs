//! Implied forward rate between two futures contracts.
//!
//! For FROM delivering before TO, with days and prices measured from a
//! common reference date:
//!
//! ```text
//! time_ratio = days(FROM) / days(TO)
//! dcf        = (days(TO) − days(FROM)) / days(TO)
//! rate       = (price(TO) − price(FROM) × time_ratio) / dcf
//! ```
//!
//! Pairs that cannot be priced are dark. Dark cells are ordinary values,
//! never errors.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Contract;

/// Why a cell has no forward rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DarkReason {
    /// FROM does not deliver strictly before TO (includes the diagonal).
    NotOrdered,
    /// One of the two contracts has no valid price.
    MissingPrice,
    /// TO delivers on the reference date.
    ZeroDayCount,
}

impl fmt::Display for DarkReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DarkReason::NotOrdered => "not ordered",
            DarkReason::MissingPrice => "missing price",
            DarkReason::ZeroDayCount => "zero day count",
        };
        write!(f, "{s}")
    }
}

/// One cell of the forward rate matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ForwardRateCell {
    /// Implied forward rate in basis points.
    Rate(Decimal),
    /// Not computable.
    Dark(DarkReason),
}

impl ForwardRateCell {
    /// Returns the rate, if computed.
    #[must_use]
    pub fn rate(&self) -> Option<Decimal> {
        match self {
            ForwardRateCell::Rate(r) => Some(*r),
            ForwardRateCell::Dark(_) => None,
        }
    }

    /// Returns true if the cell is not computable.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        matches!(self, ForwardRateCell::Dark(_))
    }
}

impl fmt::Display for ForwardRateCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardRateCell::Rate(r) => write!(f, "{:.2}", r),
            ForwardRateCell::Dark(_) => write!(f, "-"),
        }
    }
}

/// Implied forward rate from `from` to `to`.
///
/// The ordering check comes first so the diagonal is always
/// [`DarkReason::NotOrdered`], whatever the prices.
#[must_use]
pub fn implied_forward_rate(from: &Contract, to: &Contract) -> ForwardRateCell {
    let days_from = from.days_to_expiry;
    let days_to = to.days_to_expiry;

    if days_from >= days_to {
        return ForwardRateCell::Dark(DarkReason::NotOrdered);
    }
    let (Some(price_from), Some(price_to)) = (from.price, to.price) else {
        return ForwardRateCell::Dark(DarkReason::MissingPrice);
    };

    let days_from = Decimal::from(days_from);
    let days_to = Decimal::from(days_to);

    let Some(time_ratio) = days_from.checked_div(days_to) else {
        return ForwardRateCell::Dark(DarkReason::ZeroDayCount);
    };
    let Some(dcf) = (days_to - days_from).checked_div(days_to) else {
        return ForwardRateCell::Dark(DarkReason::ZeroDayCount);
    };

    match (price_to - price_from * time_ratio).checked_div(dcf) {
        Some(rate) => ForwardRateCell::Rate(rate),
        None => ForwardRateCell::Dark(DarkReason::ZeroDayCount),
    }
}
