//! Constituent rebalancing against index weights.
//!
//! Each single-name equity leg is compared with the share count its index
//! weight implies for the basket. The physical leg hedges the futures, so
//! its target direction is the opposite of the basket's net futures
//! direction: long constituents under short futures (simple carry), short
//! constituents under long futures (reverse carry).

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use carrybook_analytics::metrics::{needs_rebalance, shares_to_rebalance};
use carrybook_analytics::types::{Position, PositionType};
use carrybook_core::{CarryResult, Direction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::parallel::maybe_parallel_try_map;
use crate::types::EngineConfig;

/// Trade that brings a constituent back to its index weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebalanceAction {
    /// Buy shares.
    Buy,
    /// Sell shares.
    Sell,
    /// Already on target, or no weight or price to compare against.
    Hold,
}

impl RebalanceAction {
    fn from_delta(shares_delta: i64) -> Self {
        match shares_delta.signum() {
            1 => RebalanceAction::Buy,
            -1 => RebalanceAction::Sell,
            _ => RebalanceAction::Hold,
        }
    }
}

impl fmt::Display for RebalanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebalanceAction::Buy => write!(f, "BUY"),
            RebalanceAction::Sell => write!(f, "SELL"),
            RebalanceAction::Hold => write!(f, "HOLD"),
        }
    }
}

/// Rebalancing position of one constituent leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceNeed {
    /// Basket the leg belongs to.
    pub basket_id: String,
    /// Leg identifier.
    pub position_id: String,
    /// Constituent ticker (the leg's underlying).
    pub ticker: String,
    /// Signed shares held.
    pub current_shares: i64,
    /// Signed shares the index weight implies.
    pub target_shares: i64,
    /// `target_shares - current_shares`.
    pub shares_delta: i64,
    /// Local price, if known.
    pub price: Option<Decimal>,
    /// Index weight as a decimal fraction, if the ticker is in the index.
    pub index_weight: Option<Decimal>,
    /// Trade direction.
    pub action: RebalanceAction,
    /// `|shares_delta| × price`.
    pub trade_value: Decimal,
    /// `|shares_delta|` is at or above the configured threshold.
    pub needs_rebalance: bool,
}

/// Direction the physical leg should take to hedge the basket's futures.
///
/// Net long futures call for short constituents; net short or flat futures
/// (and baskets with no futures) call for long constituents.
#[must_use]
pub fn hedge_direction(legs: &[&Position]) -> Direction {
    let net_futures: Decimal = legs
        .iter()
        .filter(|p| p.position_type.is_futures())
        .map(|p| p.signed_notional())
        .sum();
    if net_futures > Decimal::ZERO {
        Direction::Short
    } else {
        Direction::Long
    }
}

/// Notional the constituents are sized against: the gross futures notional,
/// or the single-name equity notional when the basket holds no futures.
#[must_use]
pub fn basket_target_notional(legs: &[&Position]) -> Decimal {
    let futures: Decimal = legs
        .iter()
        .filter(|p| p.position_type.is_futures())
        .map(|p| p.notional)
        .sum();
    if futures > Decimal::ZERO {
        return futures;
    }
    legs.iter()
        .filter(|p| p.position_type == PositionType::Equity)
        .map(|p| p.notional)
        .sum()
}

fn constituent_need(
    leg: &Position,
    ticker: &str,
    weights: &HashMap<String, Decimal>,
    signed_target_notional: Decimal,
    threshold_shares: i64,
) -> CarryResult<RebalanceNeed> {
    let current_shares = leg.signed_quantity();
    let index_weight = weights.get(ticker).copied();

    let shares_delta = match (index_weight, leg.price) {
        (Some(weight), Some(price))
            if weight > Decimal::ZERO
                && price > Decimal::ZERO
                && !signed_target_notional.is_zero() =>
        {
            shares_to_rebalance(current_shares, weight, signed_target_notional, price)?
        }
        _ => 0,
    };

    let trade_value = leg
        .price
        .map_or(Decimal::ZERO, |price| Decimal::from(shares_delta.abs()) * price);

    Ok(RebalanceNeed {
        basket_id: leg.basket_id.clone(),
        position_id: leg.position_id.clone(),
        ticker: ticker.to_string(),
        current_shares,
        target_shares: current_shares + shares_delta,
        shares_delta,
        price: leg.price,
        index_weight,
        action: RebalanceAction::from_delta(shares_delta),
        trade_value,
        needs_rebalance: needs_rebalance(shares_delta, threshold_shares),
    })
}

fn basket_needs(
    legs: &[&Position],
    weights: &HashMap<String, Decimal>,
    threshold_shares: i64,
) -> CarryResult<Vec<RebalanceNeed>> {
    let signed_target = hedge_direction(legs).signed(basket_target_notional(legs));

    legs.iter()
        .filter(|p| p.position_type == PositionType::Equity)
        .filter_map(|&leg| leg.underlying.as_deref().map(|ticker| (leg, ticker)))
        .map(|(leg, ticker)| constituent_need(leg, ticker, weights, signed_target, threshold_shares))
        .collect()
}

/// Compares every single-name equity leg with its index-weight target.
///
/// Only `EQUITY` legs with an underlying ticker are considered. Legs whose
/// ticker has no positive weight, or that have no positive price, come back
/// with a zero delta and [`RebalanceAction::Hold`]. Results are grouped by
/// ascending basket id, in sheet order within a basket.
///
/// # Errors
///
/// Returns `CarryError::DataError` if a target share count overflows.
pub fn rebalancing_needs(
    positions: &[Position],
    weights: &HashMap<String, Decimal>,
    config: &EngineConfig,
) -> CarryResult<Vec<RebalanceNeed>> {
    let mut grouped: BTreeMap<&str, Vec<&Position>> = BTreeMap::new();
    for position in positions {
        grouped
            .entry(position.basket_id.as_str())
            .or_default()
            .push(position);
    }
    let groups: Vec<Vec<&Position>> = grouped.into_values().collect();

    let needs: Vec<RebalanceNeed> = maybe_parallel_try_map(&groups, config, |legs| {
        basket_needs(legs, weights, config.rebalance_threshold_shares)
    })?
    .into_iter()
    .flatten()
    .collect();

    log::debug!(
        "rebalancing: {} constituents checked, {} over {} shares",
        needs.len(),
        needs.iter().filter(|n| n.needs_rebalance).count(),
        config.rebalance_threshold_shares
    );

    Ok(needs)
}
