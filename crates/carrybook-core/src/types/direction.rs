//! Trade direction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CarryError;

/// Direction of a position leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Long the instrument.
    Long,
    /// Short the instrument.
    Short,
}

impl Direction {
    /// Returns +1 for long and -1 for short.
    #[must_use]
    pub fn sign(&self) -> Decimal {
        match self {
            Direction::Long => Decimal::ONE,
            Direction::Short => Decimal::NEGATIVE_ONE,
        }
    }

    /// Applies the direction sign to an unsigned amount.
    #[must_use]
    pub fn signed(&self, amount: Decimal) -> Decimal {
        amount.abs() * self.sign()
    }

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "LONG"),
            Direction::Short => write!(f, "SHORT"),
        }
    }
}

impl FromStr for Direction {
    type Err = CarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LONG" | "L" | "BUY" => Ok(Direction::Long),
            "SHORT" | "S" | "SELL" => Ok(Direction::Short),
            other => Err(CarryError::data_error(format!(
                "unknown direction '{other}', expected LONG or SHORT"
            ))),
        }
    }
}
