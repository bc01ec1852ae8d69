//! Baskets command implementation.
//!
//! Aggregates a position sheet into one summary row per basket.

use anyhow::Result;
use carrybook_ext_file::load_positions;
use carrybook_portfolio::basket::{aggregate_baskets, BasketSummary};
use carrybook_portfolio::types::EngineConfig;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, BookArgs, EngineOverrides};
use crate::output::{format_opt, format_usd, print_output, print_success, print_warning};

/// Arguments for the baskets command.
#[derive(Args, Debug)]
pub struct BasketsArgs {
    #[command(flatten)]
    pub book: BookArgs,

    #[command(flatten)]
    pub engine: EngineOverrides,
}

#[derive(Debug, Serialize, Tabled)]
struct BasketRow {
    #[tabled(rename = "Basket")]
    basket: String,
    #[tabled(rename = "Legs")]
    legs: usize,
    #[tabled(rename = "P&L (USD)")]
    pnl_usd: String,
    #[tabled(rename = "P&L (bps)")]
    pnl_bps: String,
    #[tabled(rename = "Futures")]
    futures_exposure: String,
    #[tabled(rename = "Physical")]
    physical_exposure: String,
    #[tabled(rename = "Net")]
    net_exposure: String,
    #[tabled(rename = "Carry")]
    carry: String,
    #[tabled(rename = "Accrued")]
    accrued_carry: String,
    #[tabled(rename = "DV01")]
    dv01: String,
    #[tabled(rename = "End")]
    end_date: String,
    #[tabled(rename = "Hedge")]
    hedge: &'static str,
}

impl From<&BasketSummary> for BasketRow {
    fn from(s: &BasketSummary) -> Self {
        Self {
            basket: s.basket_id.clone(),
            legs: s.position_count,
            pnl_usd: format_usd(s.pnl_usd),
            pnl_bps: format_opt(s.pnl_bps, 2),
            futures_exposure: format_usd(s.futures_exposure),
            physical_exposure: format_usd(s.physical_exposure),
            net_exposure: format_usd(s.net_exposure),
            carry: format_usd(s.carry),
            accrued_carry: format_usd(s.accrued_carry),
            dv01: format_usd(s.total_dv01),
            end_date: s.end_date.to_string(),
            hedge: if s.hedge_breach { "BREACH" } else { "OK" },
        }
    }
}

/// Execute the baskets command.
pub fn execute(args: BasketsArgs, config: EngineConfig, format: OutputFormat) -> Result<()> {
    let config = args.engine.apply(config)?;
    let as_of = parse_date(&args.book.as_of)?;

    let positions = load_positions(&args.book.positions)?;
    let summaries = aggregate_baskets(&positions, as_of, &config)?;
    tracing::info!(
        "aggregated {} positions into {} baskets as of {as_of}",
        positions.len(),
        summaries.len()
    );

    let rows: Vec<BasketRow> = summaries.iter().map(BasketRow::from).collect();
    print_output(&rows, &summaries, format)?;

    let breaches = summaries.iter().filter(|s| s.hedge_breach).count();
    if breaches == 0 {
        print_success("all baskets within the exposure threshold");
    } else {
        print_warning(&format!(
            "{breaches} basket(s) at or above the {} exposure threshold",
            format_usd(config.alert_threshold_usd)
        ));
    }

    Ok(())
}
