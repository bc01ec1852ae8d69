//! Alerts command implementation.
//!
//! Evaluates exposure-breach and lifecycle alerts for a position sheet, plus
//! rebalance alerts when an index weight sheet is given.

use std::path::PathBuf;

use anyhow::Result;
use carrybook_ext_file::{load_index_weights, load_positions};
use carrybook_portfolio::alerts::{evaluate_alerts, rebalancing_alerts, Alert, AlertSeverity};
use carrybook_portfolio::basket::aggregate_baskets;
use carrybook_portfolio::rebalance::rebalancing_needs;
use carrybook_portfolio::types::EngineConfig;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, BookArgs, EngineOverrides};
use crate::output::{print_output, print_success, print_warning};

/// Arguments for the alerts command.
#[derive(Args, Debug)]
pub struct AlertsArgs {
    #[command(flatten)]
    pub book: BookArgs,

    /// Index constituent sheet (CSV); adds rebalance alerts
    #[arg(long)]
    pub weights: Option<PathBuf>,

    #[command(flatten)]
    pub engine: EngineOverrides,
}

#[derive(Debug, Serialize, Tabled)]
struct AlertRow {
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Basket")]
    basket: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        Self {
            severity: alert.severity.to_string(),
            kind: alert.kind.to_string(),
            basket: alert.basket_id.clone(),
            position: alert.position_id.clone().unwrap_or_else(|| "-".to_string()),
            message: alert.message(),
        }
    }
}

/// Execute the alerts command.
pub fn execute(args: AlertsArgs, config: EngineConfig, format: OutputFormat) -> Result<()> {
    let config = args.engine.apply(config)?;
    let as_of = parse_date(&args.book.as_of)?;

    let positions = load_positions(&args.book.positions)?;
    let summaries = aggregate_baskets(&positions, as_of, &config)?;
    let mut alerts = evaluate_alerts(&summaries, &positions, as_of, &config);
    if let Some(path) = &args.weights {
        let weights = load_index_weights(path)?;
        let needs = rebalancing_needs(&positions, &weights, &config)?;
        alerts.extend(rebalancing_alerts(&needs, &config));
    }

    let rows: Vec<AlertRow> = alerts.iter().map(AlertRow::from).collect();
    print_output(&rows, &alerts, format)?;

    let high = alerts
        .iter()
        .filter(|a| a.severity == AlertSeverity::High)
        .count();
    if alerts.is_empty() {
        print_success(&format!("no alerts as of {as_of}"));
    } else {
        print_warning(&format!("{} alert(s), {high} high severity", alerts.len()));
    }

    Ok(())
}
