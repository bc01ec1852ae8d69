//! Rebalance command implementation.
//!
//! Compares single-name equity legs with the share counts their index
//! weights imply.

use std::path::PathBuf;

use anyhow::Result;
use carrybook_ext_file::{load_index_weights, load_positions};
use carrybook_portfolio::rebalance::{rebalancing_needs, RebalanceNeed};
use carrybook_portfolio::types::EngineConfig;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::EngineOverrides;
use crate::output::{format_opt, format_usd, print_output, print_success, print_warning};

/// Arguments for the rebalance command.
#[derive(Args, Debug)]
pub struct RebalanceArgs {
    /// Position sheet (CSV)
    #[arg(short, long)]
    pub positions: PathBuf,

    /// Index constituent sheet (CSV) with BLOOMBERG_TICKER and INDEX_WEIGHT
    #[arg(long)]
    pub weights: PathBuf,

    /// Show every constituent, not only those over the threshold
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub engine: EngineOverrides,
}

#[derive(Debug, Serialize, Tabled)]
struct RebalanceRow {
    #[tabled(rename = "Basket")]
    basket: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Current")]
    current_shares: i64,
    #[tabled(rename = "Target")]
    target_shares: i64,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Shares")]
    shares: i64,
    #[tabled(rename = "Value (USD)")]
    trade_value: String,
}

impl From<&RebalanceNeed> for RebalanceRow {
    fn from(n: &RebalanceNeed) -> Self {
        Self {
            basket: n.basket_id.clone(),
            position: n.position_id.clone(),
            ticker: n.ticker.clone(),
            weight: format_opt(n.index_weight, 4),
            current_shares: n.current_shares,
            target_shares: n.target_shares,
            action: n.action.to_string(),
            shares: n.shares_delta.abs(),
            trade_value: format_usd(n.trade_value),
        }
    }
}

/// Execute the rebalance command.
pub fn execute(args: RebalanceArgs, config: EngineConfig, format: OutputFormat) -> Result<()> {
    let config = args.engine.apply(config)?;

    let positions = load_positions(&args.positions)?;
    let weights = load_index_weights(&args.weights)?;
    let needs = rebalancing_needs(&positions, &weights, &config)?;
    tracing::info!(
        "checked {} constituents against {} index weights",
        needs.len(),
        weights.len()
    );

    let shown: Vec<RebalanceNeed> = needs
        .into_iter()
        .filter(|n| args.all || n.needs_rebalance)
        .collect();
    let rows: Vec<RebalanceRow> = shown.iter().map(RebalanceRow::from).collect();
    print_output(&rows, &shown, format)?;

    let flagged = shown.iter().filter(|n| n.needs_rebalance).count();
    if flagged == 0 {
        print_success(&format!(
            "all constituents within {} shares of target",
            config.rebalance_threshold_shares
        ));
    } else {
        print_warning(&format!(
            "{flagged} constituent(s) at or above the {} share threshold",
            config.rebalance_threshold_shares
        ));
    }

    Ok(())
}
