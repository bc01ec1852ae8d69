//! Cell-level cleanup for desk spreadsheet exports.

use std::str::FromStr;

use carrybook_core::{CarryError, CarryResult, Date};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Feed error markers that stand in for a missing price.
const INVALID_PRICE_MARKERS: &[&str] = &["VALUEERROR", "#VALUE!", "#REF!", "#DIV/0!", "NAN", "N/A"];

fn strip_money(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '$' | ',' | ' ' | '(' | ')'))
        .collect()
}

/// Parses a money cell: `$1,234.50`, `(12,000)`, `-`, or empty.
///
/// Parentheses mean negative. A lone dash or an empty cell is zero.
///
/// # Errors
///
/// Returns `CarryError::DataError` if what is left is not a number.
pub fn parse_money(cell: &str) -> CarryResult<Decimal> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(Decimal::ZERO);
    }

    let negative = trimmed.contains('(') && trimmed.ends_with(')');
    let value = Decimal::from_str(&strip_money(trimmed))
        .map_err(|_| CarryError::data_error(format!("cannot parse amount '{trimmed}'")))?;

    Ok(if negative { -value.abs() } else { value })
}

/// Parses a percentage cell (`5.35`, `5.35%`) into a decimal fraction.
///
/// An empty cell is zero.
///
/// # Errors
///
/// Returns `CarryError::DataError` if the cell is not a number.
pub fn parse_percent(cell: &str) -> CarryResult<Decimal> {
    let cleaned = cell.trim().trim_end_matches('%').trim();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let pct = Decimal::from_str(cleaned)
        .map_err(|_| CarryError::data_error(format!("cannot parse rate '{}'", cell.trim())))?;
    Ok(pct / Decimal::ONE_HUNDRED)
}

/// Parses a date in `YYYY-MM-DD` or `M/D/YYYY` form.
///
/// # Errors
///
/// Returns `CarryError::DataError` if neither form matches.
pub fn parse_date(cell: &str) -> CarryResult<Date> {
    let trimmed = cell.trim();
    if trimmed.contains('/') {
        NaiveDate::parse_from_str(trimmed, "%m/%d/%Y")
            .map(Date::from)
            .map_err(|_| CarryError::invalid_date(format!("cannot parse '{trimmed}'")))
    } else {
        Date::parse(trimmed)
    }
}

/// Parses a share count. An empty cell or a lone dash is `None`.
///
/// Fractional counts are truncated toward zero.
///
/// # Errors
///
/// Returns `CarryError::DataError` if the cell is not a number or does not
/// fit in an `i64`.
pub fn parse_shares(cell: &str) -> CarryResult<Option<i64>> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(None);
    }
    let shares = parse_money(trimmed)?.trunc();
    i64::try_from(shares)
        .map(Some)
        .map_err(|_| CarryError::data_error(format!("share count '{trimmed}' is out of range")))
}

/// Parses a yes/no flag. Empty is `false`.
///
/// # Errors
///
/// Returns `CarryError::DataError` on anything else.
pub fn parse_flag(cell: &str) -> CarryResult<bool> {
    match cell.trim().to_uppercase().as_str() {
        "" | "N" | "NO" | "FALSE" | "0" => Ok(false),
        "Y" | "YES" | "TRUE" | "1" | "X" => Ok(true),
        other => Err(CarryError::data_error(format!("cannot parse flag '{other}'"))),
    }
}

/// Parses a price cell. Feed error markers, blanks and non-numeric text
/// yield `None`.
#[must_use]
pub fn parse_price(cell: &str) -> Option<Decimal> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    let upper = trimmed.to_uppercase();
    if upper.starts_with("#N/A") || INVALID_PRICE_MARKERS.contains(&upper.as_str()) {
        return None;
    }
    Decimal::from_str(&trimmed.replace(',', "")).ok()
}
