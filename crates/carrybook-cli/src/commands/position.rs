//! Position command implementation.
//!
//! Shows carry, exposure and risk metrics for one leg.

use anyhow::Result;
use carrybook_analytics::metrics::PositionMetrics;
use carrybook_ext_file::load_positions;
use carrybook_portfolio::types::EngineConfig;
use clap::Args;
use rust_decimal::Decimal;

use crate::cli::OutputFormat;
use crate::commands::{parse_date, BookArgs, EngineOverrides};
use crate::error::CliError;
use crate::output::{format_opt, print_header, print_output, KeyValue};

/// Arguments for the position command.
#[derive(Args, Debug)]
pub struct PositionArgs {
    #[command(flatten)]
    pub book: BookArgs,

    /// Position identifier
    #[arg(long)]
    pub id: String,

    #[command(flatten)]
    pub engine: EngineOverrides,
}

/// Execute the position command.
pub fn execute(args: PositionArgs, config: EngineConfig, format: OutputFormat) -> Result<()> {
    let config = args.engine.apply(config)?;
    let as_of = parse_date(&args.book.as_of)?;

    let positions = load_positions(&args.book.positions)?;
    let position = positions
        .iter()
        .find(|p| p.position_id == args.id)
        .ok_or_else(|| CliError::PositionNotFound(args.id.clone()))?;

    let ctx = config.carry_context(as_of);
    let metrics = PositionMetrics::calculate(position, &ctx)?;

    let rows = vec![
        KeyValue::new("Basket", &metrics.basket_id),
        KeyValue::new("Type", position.position_type.to_string()),
        KeyValue::new("Direction", position.direction.to_string()),
        KeyValue::from_usd("Notional", position.notional),
        KeyValue::from_decimal(
            "Financing Rate (%)",
            position.financing_rate * Decimal::ONE_HUNDRED,
            4,
        ),
        KeyValue::new("Maturity", position.end_date.to_string()),
        KeyValue::new("Days to Maturity", metrics.days_to_maturity.to_string()),
        KeyValue::from_usd("P&L (USD)", metrics.pnl_usd),
        KeyValue::from_decimal("P&L (bps)", metrics.pnl_bps, 2),
        KeyValue::from_usd("Carry", metrics.carry),
        KeyValue::new("Daily Carry", format_opt(metrics.daily_carry, 2)),
        KeyValue::from_usd("Accrued Carry", metrics.accrued_carry),
        KeyValue::from_usd("Carry to Maturity", metrics.expected_carry_to_maturity),
        KeyValue::from_usd("Futures Exposure", metrics.futures_exposure),
        KeyValue::from_usd("Physical Exposure", metrics.physical_exposure),
        KeyValue::from_usd("DV01", metrics.dv01),
    ];

    if format == OutputFormat::Table {
        print_header(&format!(
            "Position {} ({})",
            metrics.position_id,
            config.day_count.name()
        ));
    }
    print_output(&rows, &metrics, format)?;

    Ok(())
}
