//! Configuration for basket aggregation and alert evaluation.

use carrybook_analytics::forward::{DEFAULT_CHEAP_THRESHOLD_BPS, DEFAULT_RICH_THRESHOLD_BPS};
use carrybook_analytics::metrics::{CarryContext, DEFAULT_REBALANCE_THRESHOLD_SHARES};
use carrybook_core::{Date, DayCountConvention};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Configuration for one evaluation pass over a book.
///
/// Every threshold is explicit; nothing is read from the environment.
/// Missing keys in a TOML file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Absolute net equity exposure (USD) at which a basket breaches.
    pub alert_threshold_usd: Decimal,

    /// Day count used to annualise carry and DV01.
    pub day_count: DayCountConvention,

    /// Days ahead of maturity at which lifecycle alerts start.
    pub lifecycle_lookahead_days: i64,

    /// Days ahead of maturity at which lifecycle alerts become high severity.
    pub lifecycle_urgent_days: i64,

    /// Reference funding rate (decimal fraction) netted against leg rates.
    pub funding_rate: Option<Decimal>,

    /// Forward rate (bps) at or above which a calendar spread is rich.
    pub rich_threshold_bps: Decimal,

    /// Forward rate (bps) at or below which a calendar spread is cheap.
    pub cheap_threshold_bps: Decimal,

    /// Share difference at which a constituent needs rebalancing.
    pub rebalance_threshold_shares: i64,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum basket count to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alert_threshold_usd: dec!(100_000),
            day_count: DayCountConvention::Act360,
            lifecycle_lookahead_days: 7,
            lifecycle_urgent_days: 3,
            funding_rate: None,
            rich_threshold_bps: DEFAULT_RICH_THRESHOLD_BPS,
            cheap_threshold_bps: DEFAULT_CHEAP_THRESHOLD_BPS,
            rebalance_threshold_shares: DEFAULT_REBALANCE_THRESHOLD_SHARES,
            parallel: true,
            parallel_threshold: 100,
        }
    }
}

impl EngineConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidConfig` if the document is not valid
    /// TOML, has a field of the wrong type, or fails [`Self::validate`].
    pub fn from_toml_str(s: &str) -> PortfolioResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| PortfolioError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that thresholds are consistent.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidConfig` on a negative threshold or
    /// window, an urgent window wider than the lookahead, a cheap
    /// threshold above the rich one, or a negative rebalance threshold.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.alert_threshold_usd < Decimal::ZERO {
            return Err(PortfolioError::invalid_config(format!(
                "alert_threshold_usd must not be negative, got {}",
                self.alert_threshold_usd
            )));
        }
        if self.lifecycle_lookahead_days < 0 || self.lifecycle_urgent_days < 0 {
            return Err(PortfolioError::invalid_config(
                "lifecycle windows must not be negative",
            ));
        }
        if self.lifecycle_urgent_days > self.lifecycle_lookahead_days {
            return Err(PortfolioError::invalid_config(format!(
                "lifecycle_urgent_days ({}) exceeds lifecycle_lookahead_days ({})",
                self.lifecycle_urgent_days, self.lifecycle_lookahead_days
            )));
        }
        if self.cheap_threshold_bps > self.rich_threshold_bps {
            return Err(PortfolioError::invalid_config(format!(
                "cheap_threshold_bps ({}) exceeds rich_threshold_bps ({})",
                self.cheap_threshold_bps, self.rich_threshold_bps
            )));
        }
        if self.rebalance_threshold_shares < 0 {
            return Err(PortfolioError::invalid_config(format!(
                "rebalance_threshold_shares must not be negative, got {}",
                self.rebalance_threshold_shares
            )));
        }
        Ok(())
    }

    /// Sets the exposure alert threshold.
    #[must_use]
    pub fn with_alert_threshold(mut self, threshold_usd: Decimal) -> Self {
        self.alert_threshold_usd = threshold_usd;
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the lifecycle lookahead window.
    #[must_use]
    pub fn with_lookahead_days(mut self, days: i64) -> Self {
        self.lifecycle_lookahead_days = days;
        self
    }

    /// Sets the lifecycle urgency window.
    #[must_use]
    pub fn with_urgent_days(mut self, days: i64) -> Self {
        self.lifecycle_urgent_days = days;
        self
    }

    /// Sets the reference funding rate.
    #[must_use]
    pub fn with_funding_rate(mut self, rate: Decimal) -> Self {
        self.funding_rate = Some(rate);
        self
    }

    /// Sets the rich/cheap forward rate thresholds.
    #[must_use]
    pub fn with_spread_thresholds(mut self, rich_bps: Decimal, cheap_bps: Decimal) -> Self {
        self.rich_threshold_bps = rich_bps;
        self.cheap_threshold_bps = cheap_bps;
        self
    }

    /// Sets the rebalance threshold in shares.
    #[must_use]
    pub fn with_rebalance_threshold(mut self, shares: i64) -> Self {
        self.rebalance_threshold_shares = shares;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Builds the carry context for `reference_date`.
    #[must_use]
    pub fn carry_context(&self, reference_date: Date) -> CarryContext {
        let ctx = CarryContext::new(reference_date).with_day_count(self.day_count);
        match self.funding_rate {
            Some(rate) => ctx.with_funding_rate(rate),
            None => ctx,
        }
    }
}
