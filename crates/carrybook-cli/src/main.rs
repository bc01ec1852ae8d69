//! Carrybook CLI - Command-line interface for equity futures carry analytics.
//!
//! # Usage
//!
//! ```bash
//! # Basket summaries
//! carrybook baskets --positions positions.csv --as-of 2026-02-27
//!
//! # Exposure and lifecycle alerts
//! carrybook alerts --positions positions.csv --as-of 2026-02-27 --lookahead-days 14
//!
//! # Implied forward rate matrix
//! carrybook matrix --futures futures.csv --as-of 2026-02-27
//!
//! # Rich/cheap calendar spreads
//! carrybook opportunities --futures futures.csv --as-of 2026-02-27 --format json
//!
//! # Metrics for one leg
//! carrybook position --positions positions.csv --as-of 2026-02-27 --id B1-FUT
//!
//! # Constituent rebalancing against index weights
//! carrybook rebalance --positions positions.csv --weights stockmarketdata.csv --all
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table/JSON/CSV output on stdout stays clean
    let default_filter = if cli.verbose {
        "carrybook=debug"
    } else {
        "carrybook=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Baskets(args) => commands::baskets::execute(args, config, format)?,
        Commands::Alerts(args) => commands::alerts::execute(args, config, format)?,
        Commands::Matrix(args) => commands::matrix::execute(args, config, format)?,
        Commands::Opportunities(args) => commands::opportunities::execute(args, config, format)?,
        Commands::Position(args) => commands::position::execute(args, config, format)?,
        Commands::Rebalance(args) => commands::rebalance::execute(args, config, format)?,
    }

    Ok(())
}
