//! Error types for basket and alert analytics.

use carrybook_core::CarryError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// A position or contract failed validation.
    #[error(transparent)]
    Carry(#[from] CarryError),

    /// The engine configuration could not be read or is out of range.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },
}

impl PortfolioError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carry_error_is_transparent() {
        let err: PortfolioError = CarryError::data_error("notional must be positive").into();
        assert_eq!(err.to_string(), "Data error: notional must be positive");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = PortfolioError::invalid_config("lookahead must not be negative");
        assert!(err.to_string().contains("lookahead"));
    }
}
