//! # Carrybook Ext File
//!
//! File-based inputs for the Carrybook engine.
//!
//! This crate loads the desk's end-of-day sheets:
//! - Position CSV (one row per leg, grouped into baskets by `BASKET_ID`)
//! - Futures price CSV (`Contract_Code`, `last_price`, `Maturity`)
//! - Index constituent CSV (`BLOOMBERG_TICKER`, `INDEX_WEIGHT`)
//!
//! Cells are cleaned the way the desk sheets format them: currency symbols
//! and thousands separators are stripped, `(x)` is negative, and feed error
//! markers such as `#N/A` become a missing price rather than a failure.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod index_weights;
mod market_data;
pub mod parse;
mod positions;

pub use error::{IngestError, IngestResult};
pub use index_weights::*;
pub use market_data::*;
pub use positions::*;
