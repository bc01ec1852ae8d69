//! Opportunities command implementation.
//!
//! Flags calendar spreads whose implied forward rate is rich or cheap.

use anyhow::Result;
use carrybook_analytics::forward::{identify_calendar_spread_opportunities, SpreadOpportunity};
use carrybook_ext_file::load_forward_matrix;
use carrybook_portfolio::types::EngineConfig;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, StripArgs};
use crate::output::{print_output, print_success};

/// Arguments for the opportunities command.
#[derive(Args, Debug)]
pub struct OpportunitiesArgs {
    #[command(flatten)]
    pub strip: StripArgs,

    /// Forward rate (bps) at or above which a spread is rich
    #[arg(long)]
    pub rich_bps: Option<Decimal>,

    /// Forward rate (bps) at or below which a spread is cheap
    #[arg(long)]
    pub cheap_bps: Option<Decimal>,
}

#[derive(Debug, Serialize, Tabled)]
struct OpportunityRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Tenor")]
    tenor: String,
    #[tabled(rename = "Rate (bps)")]
    rate: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&SpreadOpportunity> for OpportunityRow {
    fn from(o: &SpreadOpportunity) -> Self {
        Self {
            from: o.from_contract.clone(),
            to: o.to_contract.clone(),
            tenor: o.tenor_bucket.to_string(),
            rate: format!("{:.2}", o.forward_rate),
            signal: o.signal.to_string(),
            action: o.action.to_string(),
            description: o.description(),
        }
    }
}

/// Execute the opportunities command.
pub fn execute(args: OpportunitiesArgs, config: EngineConfig, format: OutputFormat) -> Result<()> {
    let rich = args.rich_bps.unwrap_or(config.rich_threshold_bps);
    let cheap = args.cheap_bps.unwrap_or(config.cheap_threshold_bps);
    let config = config.with_spread_thresholds(rich, cheap);
    config.validate()?;

    let as_of = parse_date(&args.strip.as_of)?;
    let matrix = load_forward_matrix(
        &args.strip.futures,
        args.strip.to_futures.as_deref(),
        as_of,
    )?;
    let opportunities = identify_calendar_spread_opportunities(
        &matrix,
        config.rich_threshold_bps,
        config.cheap_threshold_bps,
    );

    let rows: Vec<OpportunityRow> = opportunities.iter().map(OpportunityRow::from).collect();
    print_output(&rows, &opportunities, format)?;

    if opportunities.is_empty() {
        print_success(&format!(
            "all implied rates between {} and {} bps",
            config.cheap_threshold_bps, config.rich_threshold_bps
        ));
    }

    Ok(())
}
