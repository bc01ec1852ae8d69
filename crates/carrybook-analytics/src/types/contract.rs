//! Futures contracts for the forward rate matrix.

use carrybook_core::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A futures contract snapshot for one computation cycle.
///
/// `price` is `None` when the feed delivered an invalid marker (e.g.
/// `#N/A`). `days_to_expiry` is signed: contracts already delivered relative
/// to the reference date carry a negative count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Contract ticker, unique within a cycle.
    pub ticker: String,

    /// Last price, if valid.
    pub price: Option<Decimal>,

    /// First delivery date.
    pub delivery_date: Date,

    /// Signed calendar days from the reference date to delivery.
    pub days_to_expiry: i64,
}

impl Contract {
    /// Creates a contract, deriving days to expiry from the reference date.
    #[must_use]
    pub fn new(
        ticker: impl Into<String>,
        price: Option<Decimal>,
        delivery_date: Date,
        reference_date: Date,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            price,
            delivery_date,
            days_to_expiry: reference_date.days_between(&delivery_date),
        }
    }

    /// Creates a contract with an explicit day count, as printed in a
    /// back-dated reference table.
    #[must_use]
    pub fn with_days(
        ticker: impl Into<String>,
        price: Option<Decimal>,
        delivery_date: Date,
        days_to_expiry: i64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            price,
            delivery_date,
            days_to_expiry,
        }
    }

    /// Returns true if the contract has a usable price.
    #[must_use]
    pub fn has_valid_price(&self) -> bool {
        self.price.is_some()
    }

    /// Returns true if delivery is strictly before `other`'s.
    #[must_use]
    pub fn delivers_before(&self, other: &Contract) -> bool {
        self.days_to_expiry < other.days_to_expiry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_days_derived_from_reference() {
        let reference = Date::from_ymd(2026, 2, 27).unwrap();
        let march = Contract::new(
            "AXWH6",
            Some(dec!(44.5)),
            Date::from_ymd(2026, 3, 20).unwrap(),
            reference,
        );
        let december = Contract::new(
            "AXWZ5",
            Some(dec!(65)),
            Date::from_ymd(2025, 12, 19).unwrap(),
            reference,
        );
        assert_eq!(march.days_to_expiry, 21);
        assert_eq!(december.days_to_expiry, -70);
        assert!(december.delivers_before(&march));
        assert!(!march.delivers_before(&march));
    }

    #[test]
    fn test_invalid_price() {
        let c = Contract::with_days("AXWF6", None, Date::from_ymd(2026, 1, 16).unwrap(), -42);
        assert!(!c.has_valid_price());
    }
}
