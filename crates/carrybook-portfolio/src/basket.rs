//! Basket aggregation and hedge-quality checks.
//!
//! A basket pairs a futures leg with an offsetting physical leg and any
//! financing legs. A correctly hedged basket has net equity exposure close
//! to zero; anything at or above the configured threshold is a breach.

use std::collections::BTreeMap;

use carrybook_analytics::metrics::{
    accrued_carry, carry, dv01, expected_carry_to_maturity, futures_equity_exposure,
    futures_notional_split, physical_equity_exposure, pnl_to_bps, CarryContext,
};
use carrybook_analytics::types::Position;
use carrybook_core::{CarryResult, Date};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::parallel::{maybe_parallel_map, maybe_parallel_try_map};
use crate::types::EngineConfig;

/// Aggregated view of one basket at a reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketSummary {
    /// Basket identifier.
    pub basket_id: String,

    /// Number of legs in the basket.
    pub position_count: usize,

    /// Sum of realized P&L in USD.
    pub pnl_usd: Decimal,

    /// P&L in bps of gross futures notional; `None` without futures legs.
    pub pnl_bps: Option<Decimal>,

    /// Signed futures equity exposure.
    pub futures_exposure: Decimal,

    /// Signed physical equity exposure.
    pub physical_exposure: Decimal,

    /// `futures_exposure + physical_exposure`.
    pub net_exposure: Decimal,

    /// Gross long futures notional.
    pub long_futures_notional: Decimal,

    /// Gross short futures notional.
    pub short_futures_notional: Decimal,

    /// Total carry over every leg's life.
    pub carry: Decimal,

    /// Carry earned to the reference date.
    pub accrued_carry: Decimal,

    /// Carry still to be earned.
    pub expected_carry_to_maturity: Decimal,

    /// DV01 of the gross futures notional to the basket's last maturity.
    pub total_dv01: Decimal,

    /// Earliest leg start date.
    pub start_date: Date,

    /// Latest leg end date.
    pub end_date: Date,

    /// `|net_exposure|` is at or above the alert threshold.
    pub hedge_breach: bool,
}

impl BasketSummary {
    /// Gross futures notional (long plus short).
    #[must_use]
    pub fn gross_futures_notional(&self) -> Decimal {
        self.long_futures_notional + self.short_futures_notional
    }

    /// Signed calendar days from `reference_date` to the basket's last
    /// maturity.
    #[must_use]
    pub fn days_to_end(&self, reference_date: Date) -> i64 {
        reference_date.days_between(&self.end_date)
    }
}

/// Returns true if `|net_exposure|` reaches `threshold_usd`.
#[must_use]
pub fn is_hedge_breach(net_exposure: Decimal, threshold_usd: Decimal) -> bool {
    net_exposure.abs() >= threshold_usd
}

/// Summarizes one basket's legs.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn summarize_basket(
    basket_id: &str,
    legs: &[&Position],
    ctx: &CarryContext,
    config: &EngineConfig,
) -> Option<BasketSummary> {
    let first = legs.first()?;

    let mut summary = BasketSummary {
        basket_id: basket_id.to_string(),
        position_count: legs.len(),
        pnl_usd: Decimal::ZERO,
        pnl_bps: None,
        futures_exposure: Decimal::ZERO,
        physical_exposure: Decimal::ZERO,
        net_exposure: Decimal::ZERO,
        long_futures_notional: Decimal::ZERO,
        short_futures_notional: Decimal::ZERO,
        carry: Decimal::ZERO,
        accrued_carry: Decimal::ZERO,
        expected_carry_to_maturity: Decimal::ZERO,
        total_dv01: Decimal::ZERO,
        start_date: first.start_date,
        end_date: first.end_date,
        hedge_breach: false,
    };

    for leg in legs {
        summary.pnl_usd += leg.realized_pnl;
        summary.futures_exposure += futures_equity_exposure(leg);
        summary.physical_exposure += physical_equity_exposure(leg);
        summary.carry += carry(leg, ctx);
        summary.accrued_carry += accrued_carry(leg, ctx);
        summary.expected_carry_to_maturity += expected_carry_to_maturity(leg, ctx);
        summary.start_date = summary.start_date.min(leg.start_date);
        summary.end_date = summary.end_date.max(leg.end_date);
    }

    let (long, short) = futures_notional_split(legs.iter().copied());
    summary.long_futures_notional = long;
    summary.short_futures_notional = short;
    summary.net_exposure = summary.futures_exposure + summary.physical_exposure;

    let gross = summary.gross_futures_notional();
    if gross > Decimal::ZERO {
        summary.pnl_bps = pnl_to_bps(summary.pnl_usd, gross);
    }

    let remaining = summary.days_to_end(ctx.reference_date).max(0);
    summary.total_dv01 = dv01(gross, remaining, ctx.day_count);
    summary.hedge_breach = is_hedge_breach(summary.net_exposure, config.alert_threshold_usd);

    Some(summary)
}

/// Groups positions by basket and summarizes each one.
///
/// Baskets come back in ascending basket-id order. Inputs are never
/// modified.
///
/// # Errors
///
/// Returns `CarryError::DataError` if any position violates its record
/// invariants.
pub fn aggregate_baskets(
    positions: &[Position],
    reference_date: Date,
    config: &EngineConfig,
) -> CarryResult<Vec<BasketSummary>> {
    maybe_parallel_try_map(positions, config, Position::validate)?;

    let mut grouped: BTreeMap<&str, Vec<&Position>> = BTreeMap::new();
    for position in positions {
        grouped
            .entry(position.basket_id.as_str())
            .or_default()
            .push(position);
    }
    let groups: Vec<(&str, Vec<&Position>)> = grouped.into_iter().collect();

    let ctx = config.carry_context(reference_date);
    let summaries: Vec<BasketSummary> = maybe_parallel_map(&groups, config, |(id, legs)| {
        summarize_basket(id, legs, &ctx, config)
    })
    .into_iter()
    .flatten()
    .collect();

    log::debug!(
        "aggregated {} positions into {} baskets ({} breaching)",
        positions.len(),
        summaries.len(),
        summaries.iter().filter(|s| s.hedge_breach).count()
    );

    Ok(summaries)
}
