//! CLI error types.

use carrybook_core::CarryError;
use carrybook_ext_file::IngestError;
use carrybook_portfolio::PortfolioError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// No position with the requested id.
    #[error("Position not found: {0}")]
    PositionNotFound(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file error.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Calculation error.
    #[error(transparent)]
    Carry(#[from] CarryError),

    /// Configuration or aggregation error.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
