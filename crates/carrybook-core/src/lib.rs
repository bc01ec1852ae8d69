//! # Carrybook Core
//!
//! Core types, day count conventions and errors shared by the Carrybook
//! equity-futures carry analytics crates.
//!
//! - **Types**: [`Date`], [`Direction`], basis-point constants
//! - **Day Count Conventions**: ACT/360 (default) and ACT/365F, always passed
//!   explicitly to annualising formulas
//! - **Errors**: [`CarryError`] with the data / data-integrity split
//!
//! ## Example
//!
//! ```rust
//! use carrybook_core::prelude::*;
//!
//! let reference = Date::from_ymd(2026, 2, 27).unwrap();
//! let delivery = Date::from_ymd(2026, 3, 20).unwrap();
//! assert_eq!(days_between(reference, delivery), 21);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::unreadable_literal)]

pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{day_count_fraction, days_between, DayCountConvention};
    pub use crate::error::{CarryError, CarryResult};
    pub use crate::types::{Date, Direction, BASIS_POINT, BPS_PER_UNIT};
}

// Re-export commonly used types at crate root
pub use daycounts::DayCountConvention;
pub use error::{CarryError, CarryResult};
pub use types::{Date, Direction};
