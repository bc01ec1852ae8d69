//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    AlertsArgs, BasketsArgs, MatrixArgs, OpportunitiesArgs, PositionArgs, RebalanceArgs,
};

/// Carrybook - Equity futures carry analytics CLI
#[derive(Parser)]
#[command(name = "carrybook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Engine configuration file (TOML). Command-line flags override it.
    #[arg(short, long, global = true, env = "CARRYBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate positions into basket summaries
    Baskets(BasketsArgs),

    /// Evaluate exposure-breach and lifecycle alerts
    Alerts(AlertsArgs),

    /// Build the implied forward rate matrix from futures prices
    Matrix(MatrixArgs),

    /// Flag rich and cheap calendar spreads
    Opportunities(OpportunitiesArgs),

    /// Show metrics for a single position
    Position(PositionArgs),

    /// Compare constituent holdings with index-weight targets
    Rebalance(RebalanceArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// Day count convention selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DayCountArg {
    /// Actual/360
    #[value(name = "act360")]
    Act360,
    /// Actual/365 Fixed
    #[value(name = "act365")]
    Act365,
}

impl From<DayCountArg> for carrybook_core::DayCountConvention {
    fn from(arg: DayCountArg) -> Self {
        match arg {
            DayCountArg::Act360 => Self::Act360,
            DayCountArg::Act365 => Self::Act365Fixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
