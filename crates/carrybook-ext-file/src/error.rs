//! Error types for file ingestion.

use carrybook_core::CarryError;
use thiserror::Error;

/// A specialized Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised while loading input files.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The file could not be opened or read.
    #[error("cannot read {path}: {reason}")]
    Io {
        /// File that failed.
        path: String,
        /// Underlying reason.
        reason: String,
    },

    /// The header row lacks a required column.
    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn {
        /// File or stream name.
        source_name: String,
        /// Column that was expected.
        column: String,
    },

    /// A data row could not be turned into a record.
    #[error("{source_name}, line {line}: {reason}")]
    MalformedRow {
        /// File or stream name.
        source_name: String,
        /// 1-based line number in the file.
        line: u64,
        /// What is wrong with the row.
        reason: String,
    },

    /// The loaded records are inconsistent with each other.
    #[error(transparent)]
    Carry(#[from] CarryError),
}

impl IngestError {
    /// Creates an I/O error.
    #[must_use]
    pub fn io(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(source_name: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            source_name: source_name.into(),
            column: column.into(),
        }
    }

    /// Creates a malformed row error.
    #[must_use]
    pub fn malformed_row(
        source_name: impl Into<String>,
        line: u64,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRow {
            source_name: source_name.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Returns the offending line for row errors.
    #[must_use]
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MalformedRow { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_names_line() {
        let err = IngestError::malformed_row("positions.csv", 7, "unknown direction 'FLAT'");
        assert_eq!(err.line(), Some(7));
        assert_eq!(
            err.to_string(),
            "positions.csv, line 7: unknown direction 'FLAT'"
        );
    }

    #[test]
    fn test_carry_error_is_transparent() {
        let err: IngestError = CarryError::data_integrity("AXWH6", "price differs").into();
        assert!(err.to_string().contains("AXWH6"));
        assert_eq!(err.line(), None);
    }
}
