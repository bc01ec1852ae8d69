//! Error types for the Carrybook library.
//!
//! Two failure classes abort a computation and are surfaced to the caller:
//! malformed single-record input ([`CarryError::DataError`]) and cross-record
//! inconsistency ([`CarryError::DataIntegrityError`]). Values that are simply
//! not computable (a dark forward-rate cell, daily carry at maturity) are
//! ordinary data and never appear here.

use thiserror::Error;

/// A specialized Result type for Carrybook operations.
pub type CarryResult<T> = Result<T, CarryError>;

/// The main error type for Carrybook operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarryError {
    /// Malformed or out-of-domain input on a single record.
    #[error("Data error: {reason}")]
    DataError {
        /// Description of what is wrong with the input.
        reason: String,
    },

    /// The same contract was supplied with contradictory values.
    #[error("Data integrity error for contract '{ticker}': {reason}")]
    DataIntegrityError {
        /// Ticker of the offending contract.
        ticker: String,
        /// Description of the inconsistency.
        reason: String,
    },
}

impl CarryError {
    /// Creates a data error.
    #[must_use]
    pub fn data_error(reason: impl Into<String>) -> Self {
        Self::DataError {
            reason: reason.into(),
        }
    }

    /// Creates a data error for an invalid calendar date.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::DataError {
            reason: format!("invalid date: {}", message.into()),
        }
    }

    /// Creates a data integrity error naming the offending contract.
    #[must_use]
    pub fn data_integrity(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataIntegrityError {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for single-record input errors.
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::DataError { .. })
    }

    /// Returns true for cross-record integrity errors.
    #[must_use]
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, Self::DataIntegrityError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CarryError::invalid_date("2026-02-30");
        assert!(err.to_string().contains("invalid date"));
        assert!(err.is_data_error());

        let err = CarryError::data_integrity("AXWH6", "price 44.5 vs 44.0");
        assert!(err.to_string().contains("AXWH6"));
        assert!(err.to_string().contains("44.0"));
        assert!(err.is_integrity_error());
        assert!(!err.is_data_error());
    }

    #[test]
    fn test_error_clone() {
        let err = CarryError::data_error("notional is zero");
        assert_eq!(err.clone(), err);
    }
}
