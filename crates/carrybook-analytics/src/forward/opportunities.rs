//! Calendar spread screening over a forward rate matrix.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ForwardRateMatrix;

/// Forward rate at or above which a spread is rich, in bps.
pub const DEFAULT_RICH_THRESHOLD_BPS: Decimal = dec!(100);

/// Forward rate at or below which a spread is cheap, in bps.
pub const DEFAULT_CHEAP_THRESHOLD_BPS: Decimal = dec!(20);

/// Relative value of an implied forward rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpreadSignal {
    /// Implied rate is high.
    Rich,
    /// Implied rate is low.
    Cheap,
}

/// Trade suggested by a [`SpreadSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpreadAction {
    /// Sell near, buy far.
    SellSpread,
    /// Buy near, sell far.
    BuySpread,
}

impl fmt::Display for SpreadSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpreadSignal::Rich => write!(f, "RICH"),
            SpreadSignal::Cheap => write!(f, "CHEAP"),
        }
    }
}

impl fmt::Display for SpreadAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpreadAction::SellSpread => write!(f, "SELL_SPREAD"),
            SpreadAction::BuySpread => write!(f, "BUY_SPREAD"),
        }
    }
}

/// Calendar distance between the two deliveries of a spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TenorBucket {
    /// Up to 90 days.
    #[serde(rename = "1-3M")]
    OneToThreeMonths,
    /// 91 to 180 days.
    #[serde(rename = "3-6M")]
    ThreeToSixMonths,
    /// 181 to 365 days.
    #[serde(rename = "6-12M")]
    SixToTwelveMonths,
    /// Over a year.
    #[serde(rename = "12M+")]
    TwelveMonthsPlus,
}

impl TenorBucket {
    /// Bucket for a spread whose deliveries are `days` apart.
    #[must_use]
    pub fn from_days(days: i64) -> Self {
        match days {
            ..=90 => TenorBucket::OneToThreeMonths,
            91..=180 => TenorBucket::ThreeToSixMonths,
            181..=365 => TenorBucket::SixToTwelveMonths,
            _ => TenorBucket::TwelveMonthsPlus,
        }
    }
}

impl fmt::Display for TenorBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenorBucket::OneToThreeMonths => write!(f, "1-3M"),
            TenorBucket::ThreeToSixMonths => write!(f, "3-6M"),
            TenorBucket::SixToTwelveMonths => write!(f, "6-12M"),
            TenorBucket::TwelveMonthsPlus => write!(f, "12M+"),
        }
    }
}

/// A flagged (FROM, TO) spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadOpportunity {
    /// Near-dated contract.
    pub from_contract: String,
    /// Far-dated contract.
    pub to_contract: String,
    /// Implied forward rate in bps.
    pub forward_rate: Decimal,
    /// Rich or cheap.
    pub signal: SpreadSignal,
    /// Suggested trade.
    pub action: SpreadAction,
    /// Distance between the two deliveries.
    pub tenor_bucket: TenorBucket,
}

impl SpreadOpportunity {
    /// Human-readable one-line description.
    #[must_use]
    pub fn description(&self) -> String {
        let (verb, level) = match self.action {
            SpreadAction::SellSpread => ("Sell", "high"),
            SpreadAction::BuySpread => ("Buy", "low"),
        };
        format!(
            "{verb} {}/{} spread - implied rate {:.1} bps is {level}",
            self.from_contract, self.to_contract, self.forward_rate
        )
    }
}

/// Flags computed cells at or above `rich_bps` as rich and at or below
/// `cheap_bps` as cheap.
///
/// Results are ordered by distance from the midpoint of the two
/// thresholds, most extreme first; ties keep row-major matrix order.
#[must_use]
pub fn identify_calendar_spread_opportunities(
    matrix: &ForwardRateMatrix,
    rich_bps: Decimal,
    cheap_bps: Decimal,
) -> Vec<SpreadOpportunity> {
    let mut opportunities: Vec<SpreadOpportunity> = matrix
        .computed_rates()
        .filter_map(|(from, to, rate)| {
            let (signal, action) = if rate >= rich_bps {
                (SpreadSignal::Rich, SpreadAction::SellSpread)
            } else if rate <= cheap_bps {
                (SpreadSignal::Cheap, SpreadAction::BuySpread)
            } else {
                return None;
            };
            Some(SpreadOpportunity {
                from_contract: from.ticker.clone(),
                to_contract: to.ticker.clone(),
                forward_rate: rate,
                signal,
                action,
                tenor_bucket: TenorBucket::from_days(
                    from.delivery_date.days_between(&to.delivery_date),
                ),
            })
        })
        .collect();

    let midpoint = (rich_bps + cheap_bps) / dec!(2);
    opportunities.sort_by(|a, b| {
        let da = (a.forward_rate - midpoint).abs();
        let db = (b.forward_rate - midpoint).abs();
        db.cmp(&da)
    });

    log::debug!("calendar spread screen: {} opportunities", opportunities.len());
    opportunities
}
