//! Date type for carry calculations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CarryError, CarryResult};

/// A calendar date for carry and lifecycle calculations.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. All day arithmetic
/// is in calendar days, never trading days.
///
/// # Example
///
/// ```rust
/// use carrybook_core::types::Date;
///
/// let trade = Date::from_ymd(2026, 3, 20).unwrap();
/// let expiry = Date::from_ymd(2026, 6, 18).unwrap();
/// assert_eq!(trade.days_between(&expiry), 90);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::DataError` if the date is not a valid calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CarryResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CarryError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CarryError::DataError` if the string is not a valid date.
    pub fn parse(s: &str) -> CarryResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CarryError::invalid_date(format!("cannot parse '{s}'")))
    }

    /// Adds a number of calendar days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Calculates the signed number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}
