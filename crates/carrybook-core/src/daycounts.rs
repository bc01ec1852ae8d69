//! Day count conventions for carry, DV01 and fair-value formulas.
//!
//! Every annualising formula in Carrybook takes the convention as an
//! explicit parameter so that /360 and /365 results are never mixed
//! silently.
//!
//! # Supported Conventions
//!
//! - [`DayCountConvention::Act360`]: Actual/360, the desk default
//! - [`DayCountConvention::Act365Fixed`]: Actual/365 Fixed, used by
//!   box-spread financing quotes
//!
//! # Usage
//!
//! ```rust
//! use carrybook_core::daycounts::{day_count_fraction, days_between, DayCountConvention};
//! use carrybook_core::types::Date;
//! use rust_decimal_macros::dec;
//!
//! let start = Date::from_ymd(2026, 3, 20).unwrap();
//! let end = Date::from_ymd(2026, 6, 18).unwrap();
//!
//! let days = days_between(start, end);
//! assert_eq!(days, 90);
//! assert_eq!(day_count_fraction(0, days, DayCountConvention::Act360), dec!(0.25));
//! ```

use crate::types::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Runtime-selectable day count convention.
///
/// Deserializes from the variant name or the market name (`"ACT/360"`,
/// `"ACT/365F"`), so configuration files can use either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360 - carry, DV01 and futures fair value.
    #[default]
    #[serde(alias = "ACT/360")]
    Act360,

    /// Actual/365 Fixed - box-spread financing comparisons.
    #[serde(alias = "ACT/365F", alias = "ACT/365")]
    Act365Fixed,
}

impl DayCountConvention {
    /// Returns the conventional name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Fixed => "ACT/365F",
        }
    }

    /// Returns the year basis (denominator) in days.
    #[must_use]
    pub const fn basis(&self) -> u32 {
        match self {
            DayCountConvention::Act360 => 360,
            DayCountConvention::Act365Fixed => 365,
        }
    }

    /// Converts a whole number of days into a year fraction.
    #[must_use]
    pub fn year_fraction_days(&self, days: i64) -> Decimal {
        Decimal::from(days) / Decimal::from(self.basis())
    }

    /// Calculates the year fraction between two dates.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        self.year_fraction_days(days_between(start, end))
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Signed whole calendar days from `reference_date` to `target_date`.
#[must_use]
pub fn days_between(reference_date: Date, target_date: Date) -> i64 {
    reference_date.days_between(&target_date)
}

/// Fraction of a year covered by the period from day `days_a` to day `days_b`.
///
/// Both arguments are day offsets from a common reference date, so the
/// result is `(days_b - days_a) / basis`.
#[must_use]
pub fn day_count_fraction(days_a: i64, days_b: i64, convention: DayCountConvention) -> Decimal {
    convention.year_fraction_days(days_b - days_a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_is_act360() {
        assert_eq!(DayCountConvention::default(), DayCountConvention::Act360);
        assert_eq!(DayCountConvention::default().basis(), 360);
    }

    #[test]
    fn test_day_count_fraction() {
        assert_eq!(
            day_count_fraction(21, 111, DayCountConvention::Act360),
            dec!(0.25)
        );
        assert_eq!(
            day_count_fraction(0, 73, DayCountConvention::Act365Fixed),
            dec!(0.2)
        );
        assert_eq!(
            day_count_fraction(111, 21, DayCountConvention::Act360),
            dec!(-0.25)
        );
    }

    #[test]
    fn test_year_fraction_from_dates() {
        let start = Date::from_ymd(2026, 1, 1).unwrap();
        let end = Date::from_ymd(2026, 4, 1).unwrap();
        // 90 actual days
        assert_eq!(DayCountConvention::Act360.year_fraction(start, end), dec!(0.25));
        assert_eq!(
            DayCountConvention::Act365Fixed.year_fraction(start, end),
            Decimal::from(90) / Decimal::from(365)
        );
        assert_eq!(DayCountConvention::Act360.year_fraction(end, start), dec!(-0.25));
    }

    #[test]
    fn test_leap_year_counts_actual_days() {
        let start = Date::from_ymd(2028, 2, 1).unwrap();
        let end = Date::from_ymd(2028, 3, 1).unwrap();
        assert_eq!(
            DayCountConvention::Act360.year_fraction(start, end),
            Decimal::from(29) / Decimal::from(360)
        );
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&DayCountConvention::Act365Fixed).unwrap();
        let parsed: DayCountConvention = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DayCountConvention::Act365Fixed);
    }

    #[test]
    fn test_deserialize_market_names() {
        let parsed: DayCountConvention = serde_json::from_str("\"ACT/360\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Act360);
        let parsed: DayCountConvention = serde_json::from_str("\"ACT/365F\"").unwrap();
        assert_eq!(parsed, DayCountConvention::Act365Fixed);
        assert!(serde_json::from_str::<DayCountConvention>("\"30/360\"").is_err());
    }
}
