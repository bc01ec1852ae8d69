//! CLI command implementations.

pub mod alerts;
pub mod baskets;
pub mod matrix;
pub mod opportunities;
pub mod position;
pub mod rebalance;

// Re-export submodules for convenience
pub use alerts::AlertsArgs;
pub use baskets::BasketsArgs;
pub use matrix::MatrixArgs;
pub use opportunities::OpportunitiesArgs;
pub use position::PositionArgs;
pub use rebalance::RebalanceArgs;

use std::path::{Path, PathBuf};

use carrybook_core::Date;
use carrybook_portfolio::types::EngineConfig;
use clap::Args;
use rust_decimal::Decimal;

use crate::cli::DayCountArg;
use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Loads the engine configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = EngineConfig::from_toml_str(&contents)?;
    tracing::debug!("loaded configuration from {}", path.display());
    Ok(config)
}

/// Position sheet and valuation date.
#[derive(Args, Debug)]
pub struct BookArgs {
    /// Position sheet (CSV)
    #[arg(short, long)]
    pub positions: PathBuf,

    /// Reference date (YYYY-MM-DD)
    #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
    pub as_of: String,
}

/// Futures price sheets and valuation date.
#[derive(Args, Debug)]
pub struct StripArgs {
    /// Futures price sheet (CSV)
    #[arg(long)]
    pub futures: PathBuf,

    /// Separate TO-side price sheet (CSV)
    #[arg(long)]
    pub to_futures: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD)
    #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
    pub as_of: String,
}

/// Flags that override values from the configuration file.
#[derive(Args, Debug, Default)]
pub struct EngineOverrides {
    /// Net exposure (USD) at which a basket breaches
    #[arg(long)]
    pub alert_threshold: Option<Decimal>,

    /// Reference funding rate as a decimal fraction (0.0525 for 5.25%)
    #[arg(long)]
    pub funding_rate: Option<Decimal>,

    /// Day count convention
    #[arg(long, value_enum)]
    pub day_count: Option<DayCountArg>,

    /// Days ahead of maturity at which lifecycle alerts start
    #[arg(long)]
    pub lookahead_days: Option<i64>,

    /// Days ahead of maturity at which lifecycle alerts are urgent
    #[arg(long)]
    pub urgent_days: Option<i64>,

    /// Share difference at which a constituent needs rebalancing
    #[arg(long)]
    pub rebalance_threshold: Option<i64>,

    /// Disable parallel basket aggregation
    #[arg(long)]
    pub sequential: bool,
}

impl EngineOverrides {
    /// Applies the flags on top of `config` and re-validates it.
    pub fn apply(&self, mut config: EngineConfig) -> CliResult<EngineConfig> {
        if let Some(threshold) = self.alert_threshold {
            config = config.with_alert_threshold(threshold);
        }
        if let Some(rate) = self.funding_rate {
            config = config.with_funding_rate(rate);
        }
        if let Some(day_count) = self.day_count {
            config = config.with_day_count(day_count.into());
        }
        if let Some(days) = self.lookahead_days {
            config = config.with_lookahead_days(days);
        }
        if let Some(days) = self.urgent_days {
            config = config.with_urgent_days(days);
        }
        if let Some(shares) = self.rebalance_threshold {
            config = config.with_rebalance_threshold(shares);
        }
        if self.sequential {
            config = config.with_parallel(false);
        }
        config.validate()?;
        Ok(config)
    }
}
