//! Exposure and lifecycle alerts.
//!
//! Alerts are derived data: evaluating them reads summaries and positions
//! and returns a fresh list. Output order is stable: exposure alerts by
//! basket, then lifecycle alerts by (days remaining, basket, position).
//! Rebalance alerts come from [`rebalancing_alerts`] in the order of the
//! rebalancing needs they are built from.

use carrybook_analytics::types::Position;
use carrybook_core::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::basket::{is_hedge_breach, BasketSummary};
use crate::rebalance::RebalanceNeed;
use crate::types::EngineConfig;

/// What triggered an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    /// Net equity exposure at or above the alert threshold.
    ExposureBreach,
    /// A leg matures within the lookahead window.
    LifecycleApproaching,
    /// A constituent is off its index weight by the share threshold or more.
    Rebalance,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::ExposureBreach => write!(f, "EXPOSURE_BREACH"),
            AlertKind::LifecycleApproaching => write!(f, "LIFECYCLE_APPROACHING"),
            AlertKind::Rebalance => write!(f, "REBALANCE"),
        }
    }
}

/// How urgent an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    /// Plan a roll.
    Medium,
    /// Act now.
    High,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Medium => write!(f, "MEDIUM"),
            AlertSeverity::High => write!(f, "HIGH"),
        }
    }
}

/// A single alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Basket the alert belongs to.
    pub basket_id: String,
    /// Leg that triggered a lifecycle or rebalance alert.
    pub position_id: Option<String>,
    /// Trigger.
    pub kind: AlertKind,
    /// Urgency.
    pub severity: AlertSeverity,
    /// Triggering value: net exposure in USD, days to maturity, or signed
    /// shares to trade.
    pub value: Decimal,
    /// Threshold the value was compared against.
    pub threshold: Decimal,
}

impl Alert {
    /// Human-readable one-line description.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            AlertKind::ExposureBreach => format!(
                "{}: net equity exposure {} breaches {}",
                self.basket_id, self.value, self.threshold
            ),
            AlertKind::LifecycleApproaching => format!(
                "{}/{}: matures in {} days",
                self.basket_id,
                self.position_id.as_deref().unwrap_or("-"),
                self.value
            ),
            AlertKind::Rebalance => {
                let action = if self.value.is_sign_negative() { "SELL" } else { "BUY" };
                format!(
                    "{}/{}: {} share {action} needed",
                    self.basket_id,
                    self.position_id.as_deref().unwrap_or("-"),
                    self.value.abs()
                )
            }
        }
    }
}

/// Severity of a leg maturing in `days_to_end` days, or `None` outside
/// the lookahead window.
#[must_use]
pub fn lifecycle_severity(days_to_end: i64, config: &EngineConfig) -> Option<AlertSeverity> {
    if days_to_end < 0 || days_to_end > config.lifecycle_lookahead_days {
        None
    } else if days_to_end <= config.lifecycle_urgent_days {
        Some(AlertSeverity::High)
    } else {
        Some(AlertSeverity::Medium)
    }
}

/// Evaluates exposure and lifecycle alerts.
#[must_use]
pub fn evaluate_alerts(
    summaries: &[BasketSummary],
    positions: &[Position],
    reference_date: Date,
    config: &EngineConfig,
) -> Vec<Alert> {
    let mut exposure: Vec<Alert> = summaries
        .iter()
        .filter(|s| is_hedge_breach(s.net_exposure, config.alert_threshold_usd))
        .map(|s| Alert {
            basket_id: s.basket_id.clone(),
            position_id: None,
            kind: AlertKind::ExposureBreach,
            severity: AlertSeverity::High,
            value: s.net_exposure,
            threshold: config.alert_threshold_usd,
        })
        .collect();
    exposure.sort_by(|a, b| a.basket_id.cmp(&b.basket_id));

    let mut lifecycle: Vec<(i64, Alert)> = positions
        .iter()
        .filter_map(|p| {
            let days = p.days_to_maturity(reference_date);
            let severity = lifecycle_severity(days, config)?;
            Some((
                days,
                Alert {
                    basket_id: p.basket_id.clone(),
                    position_id: Some(p.position_id.clone()),
                    kind: AlertKind::LifecycleApproaching,
                    severity,
                    value: Decimal::from(days),
                    threshold: Decimal::from(config.lifecycle_lookahead_days),
                },
            ))
        })
        .collect();
    lifecycle.sort_by(|(da, a), (db, b)| {
        da.cmp(db)
            .then_with(|| a.basket_id.cmp(&b.basket_id))
            .then_with(|| a.position_id.cmp(&b.position_id))
    });

    log::debug!(
        "alerts: {} exposure, {} lifecycle",
        exposure.len(),
        lifecycle.len()
    );

    exposure
        .into_iter()
        .chain(lifecycle.into_iter().map(|(_, alert)| alert))
        .collect()
}

/// Turns flagged rebalancing needs into alerts.
#[must_use]
pub fn rebalancing_alerts(needs: &[RebalanceNeed], config: &EngineConfig) -> Vec<Alert> {
    needs
        .iter()
        .filter(|n| n.needs_rebalance)
        .map(|n| Alert {
            basket_id: n.basket_id.clone(),
            position_id: Some(n.position_id.clone()),
            kind: AlertKind::Rebalance,
            severity: AlertSeverity::Medium,
            value: Decimal::from(n.shares_delta),
            threshold: Decimal::from(config.rebalance_threshold_shares),
        })
        .collect()
}
