//! # Carrybook Portfolio
//!
//! Basket-level analytics for equity-futures carry books.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Explicit reference date**: No function reads the system clock
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use carrybook_portfolio::prelude::*;
//!
//! let config = EngineConfig::default().with_funding_rate(dec!(0.05));
//! let summaries = aggregate_baskets(&positions, reference_date, &config)?;
//! let alerts = evaluate_alerts(&summaries, &positions, reference_date, &config);
//! ```
//!
//! ## Module Overview
//!
//! - [`basket`] - Basket aggregation and hedge-quality checks
//! - [`alerts`] - Exposure-breach, lifecycle and rebalance alerts
//! - [`rebalance`] - Constituent share targets from index weights
//! - [`types`] - Engine configuration
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel basket aggregation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod alerts;
pub mod basket;
pub mod error;
pub mod parallel;
pub mod rebalance;
pub mod types;

pub use error::{PortfolioError, PortfolioResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::alerts::{
        evaluate_alerts, rebalancing_alerts, Alert, AlertKind, AlertSeverity,
    };
    pub use crate::basket::{aggregate_baskets, is_hedge_breach, BasketSummary};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::rebalance::{rebalancing_needs, RebalanceAction, RebalanceNeed};
    pub use crate::types::EngineConfig;
}
