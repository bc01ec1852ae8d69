//! Position records as loaded from the desk's position sheet.

use carrybook_core::{CarryError, CarryResult, Date, Direction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of leg a position represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionType {
    /// Index future.
    Future,
    /// Single physical equity line.
    Equity,
    /// Physical equity basket held as one line.
    EquityBasket,
    /// Cash borrowed to fund the physical leg.
    CashBorrow,
    /// Cash lent out.
    CashLend,
    /// Stock borrowed to cover a physical short.
    StockBorrow,
}

impl PositionType {
    /// Returns true for futures legs.
    #[must_use]
    pub fn is_futures(&self) -> bool {
        matches!(self, PositionType::Future)
    }

    /// Returns true for physical equity legs.
    #[must_use]
    pub fn is_physical(&self) -> bool {
        matches!(self, PositionType::Equity | PositionType::EquityBasket)
    }

    /// Returns true for financing legs (no equity exposure).
    #[must_use]
    pub fn is_financing(&self) -> bool {
        matches!(
            self,
            PositionType::CashBorrow | PositionType::CashLend | PositionType::StockBorrow
        )
    }

    /// Returns the sheet code for this leg kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PositionType::Future => "FUTURE",
            PositionType::Equity => "EQUITY",
            PositionType::EquityBasket => "EQUITY_BASKET",
            PositionType::CashBorrow => "CASH_BORROW",
            PositionType::CashLend => "CASH_LEND",
            PositionType::StockBorrow => "STOCK_BORROW",
        }
    }
}

impl fmt::Display for PositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for PositionType {
    type Err = CarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace([' ', '-'], "_").as_str() {
            "FUTURE" | "FUTURES" => Ok(PositionType::Future),
            "EQUITY" | "PHYSICAL" => Ok(PositionType::Equity),
            "EQUITY_BASKET" => Ok(PositionType::EquityBasket),
            "CASH_BORROW" => Ok(PositionType::CashBorrow),
            "CASH_LEND" => Ok(PositionType::CashLend),
            "STOCK_BORROW" => Ok(PositionType::StockBorrow),
            other => Err(CarryError::data_error(format!(
                "unknown position type '{other}'"
            ))),
        }
    }
}

/// Strategy a basket is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// Long physical, short futures, borrow cash.
    SimpleCarry,
    /// Short physical, long futures, lend cash.
    ReverseCarry,
    /// Long near future, short far future.
    CalendarSpread,
}

impl StrategyType {
    /// Returns the display name used on the desk sheets.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            StrategyType::SimpleCarry => "Simple Carry",
            StrategyType::ReverseCarry => "Reverse Carry",
            StrategyType::CalendarSpread => "Calendar Spread",
        }
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StrategyType {
    type Err = CarryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "simple carry" | "carry" => Ok(StrategyType::SimpleCarry),
            "reverse carry" => Ok(StrategyType::ReverseCarry),
            "calendar spread" | "calendar" => Ok(StrategyType::CalendarSpread),
            other => Err(CarryError::data_error(format!(
                "unknown strategy type '{other}'"
            ))),
        }
    }
}

/// A single position leg.
///
/// Positions are snapshot records: the engine reads them and never writes
/// derived values back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Basket this leg belongs to.
    pub basket_id: String,

    /// Unique identifier for this leg.
    pub position_id: String,

    /// Leg kind.
    pub position_type: PositionType,

    /// Strategy of the basket.
    pub strategy: StrategyType,

    /// Long or short.
    pub direction: Direction,

    /// Unsigned notional in USD.
    pub notional: Decimal,

    /// Financing rate as a decimal fraction (0.0535 for 5.35%).
    pub financing_rate: Decimal,

    /// First day of the leg.
    pub start_date: Date,

    /// Maturity of the leg.
    pub end_date: Date,

    /// Realized P&L in USD.
    pub realized_pnl: Decimal,

    /// Underlying or instrument label, if any.
    pub underlying: Option<String>,

    /// Whether the leg is scheduled to be rolled before maturity.
    pub roll_flag: bool,

    /// Unsigned share or contract count, if the sheet carries one.
    pub quantity: Option<i64>,

    /// Local price per share or index level.
    pub price: Option<Decimal>,
}

impl Position {
    /// Creates a new position builder.
    #[must_use]
    pub fn builder() -> PositionBuilder {
        PositionBuilder::new()
    }

    /// Checks the record invariants.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::DataError` if the notional is not positive or the
    /// end date is not after the start date.
    pub fn validate(&self) -> CarryResult<()> {
        if self.notional <= Decimal::ZERO {
            return Err(CarryError::data_error(format!(
                "position '{}': notional must be positive, got {}",
                self.position_id, self.notional
            )));
        }
        if self.end_date <= self.start_date {
            return Err(CarryError::data_error(format!(
                "position '{}': end date {} is not after start date {}",
                self.position_id, self.end_date, self.start_date
            )));
        }
        Ok(())
    }

    /// Signed notional (+ long, - short).
    #[must_use]
    pub fn signed_notional(&self) -> Decimal {
        self.direction.signed(self.notional)
    }

    /// Signed share count (+ long, - short), zero when the sheet has none.
    #[must_use]
    pub fn signed_quantity(&self) -> i64 {
        let quantity = self.quantity.unwrap_or_default();
        match self.direction {
            Direction::Long => quantity,
            Direction::Short => -quantity,
        }
    }

    /// Total calendar days from start to end.
    #[must_use]
    pub fn term_days(&self) -> i64 {
        self.start_date.days_between(&self.end_date)
    }

    /// Signed calendar days from `reference_date` to maturity.
    #[must_use]
    pub fn days_to_maturity(&self, reference_date: Date) -> i64 {
        reference_date.days_between(&self.end_date)
    }
}

/// Builder for constructing a validated [`Position`].
#[derive(Debug, Clone, Default)]
pub struct PositionBuilder {
    basket_id: Option<String>,
    position_id: Option<String>,
    position_type: Option<PositionType>,
    strategy: Option<StrategyType>,
    direction: Option<Direction>,
    notional: Option<Decimal>,
    financing_rate: Decimal,
    start_date: Option<Date>,
    end_date: Option<Date>,
    realized_pnl: Decimal,
    underlying: Option<String>,
    roll_flag: bool,
    quantity: Option<i64>,
    price: Option<Decimal>,
}

impl PositionBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the basket identifier.
    #[must_use]
    pub fn basket_id(mut self, id: impl Into<String>) -> Self {
        self.basket_id = Some(id.into());
        self
    }

    /// Sets the position identifier.
    #[must_use]
    pub fn position_id(mut self, id: impl Into<String>) -> Self {
        self.position_id = Some(id.into());
        self
    }

    /// Sets the leg kind.
    #[must_use]
    pub fn position_type(mut self, position_type: PositionType) -> Self {
        self.position_type = Some(position_type);
        self
    }

    /// Sets the strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: StrategyType) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Sets the direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets the notional. The sign is dropped; direction carries it.
    #[must_use]
    pub fn notional(mut self, notional: Decimal) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the financing rate as a decimal fraction.
    #[must_use]
    pub fn financing_rate(mut self, rate: Decimal) -> Self {
        self.financing_rate = rate;
        self
    }

    /// Sets the start date.
    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the end date.
    #[must_use]
    pub fn end_date(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the realized P&L.
    #[must_use]
    pub fn realized_pnl(mut self, pnl: Decimal) -> Self {
        self.realized_pnl = pnl;
        self
    }

    /// Sets the underlying label.
    #[must_use]
    pub fn underlying(mut self, underlying: impl Into<String>) -> Self {
        self.underlying = Some(underlying.into());
        self
    }

    /// Sets the roll flag.
    #[must_use]
    pub fn roll_flag(mut self, roll: bool) -> Self {
        self.roll_flag = roll;
        self
    }

    /// Sets the share count. The sign is dropped; direction carries it.
    #[must_use]
    pub fn quantity(mut self, shares: i64) -> Self {
        self.quantity = Some(shares.abs());
        self
    }

    /// Sets the local price.
    #[must_use]
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Builds the position.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::DataError` if a required field is missing or an
    /// invariant does not hold.
    pub fn build(self) -> CarryResult<Position> {
        let position_id = self
            .position_id
            .ok_or_else(|| CarryError::data_error("position_id is required"))?;
        let missing = |field: &str| {
            CarryError::data_error(format!("position '{position_id}': {field} is required"))
        };

        let basket_id = self.basket_id.ok_or_else(|| missing("basket_id"))?;
        let position_type = self.position_type.ok_or_else(|| missing("position_type"))?;
        let strategy = self.strategy.ok_or_else(|| missing("strategy"))?;
        let direction = self.direction.ok_or_else(|| missing("direction"))?;
        let notional = self.notional.ok_or_else(|| missing("notional"))?.abs();
        let start_date = self.start_date.ok_or_else(|| missing("start_date"))?;
        let end_date = self.end_date.ok_or_else(|| missing("end_date"))?;

        let position = Position {
            basket_id,
            position_id,
            position_type,
            strategy,
            direction,
            notional,
            financing_rate: self.financing_rate,
            start_date,
            end_date,
            realized_pnl: self.realized_pnl,
            underlying: self.underlying,
            roll_flag: self.roll_flag,
            quantity: self.quantity,
            price: self.price,
        };

        position.validate()?;
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn builder() -> PositionBuilder {
        Position::builder()
            .basket_id("Basket1")
            .position_id("B1-FUT-1")
            .position_type(PositionType::Future)
            .strategy(StrategyType::SimpleCarry)
            .direction(Direction::Short)
            .notional(dec!(100_000_000))
            .financing_rate(dec!(0.0535))
            .start_date(Date::from_ymd(2026, 1, 2).unwrap())
            .end_date(Date::from_ymd(2026, 3, 20).unwrap())
    }

    #[test]
    fn test_build_valid() {
        let p = builder().build().unwrap();
        assert_eq!(p.signed_notional(), dec!(-100_000_000));
        assert_eq!(p.term_days(), 77);
        assert!(!p.roll_flag);
    }

    #[test]
    fn test_negative_notional_is_normalised() {
        let p = builder().notional(dec!(-5_000_000)).build().unwrap();
        assert_eq!(p.notional, dec!(5_000_000));
    }

    #[test]
    fn test_quantity_sign_follows_direction() {
        let p = builder().quantity(-1_200).price(dec!(187.3)).build().unwrap();
        assert_eq!(p.quantity, Some(1_200));
        assert_eq!(p.signed_quantity(), -1_200);
        assert_eq!(p.price, Some(dec!(187.3)));

        let p = builder().direction(Direction::Long).build().unwrap();
        assert_eq!(p.signed_quantity(), 0);
    }

    #[test]
    fn test_zero_notional_rejected() {
        let err = builder().notional(Decimal::ZERO).build().unwrap_err();
        assert!(err.is_data_error());
        assert!(err.to_string().contains("B1-FUT-1"));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err = builder()
            .end_date(Date::from_ymd(2026, 1, 2).unwrap())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("not after start"));
    }

    #[test]
    fn test_missing_field() {
        let err = Position::builder()
            .position_id("X")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("basket_id"));
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!(
            "cash borrow".parse::<PositionType>().unwrap(),
            PositionType::CashBorrow
        );
        assert_eq!(
            "EQUITY_BASKET".parse::<PositionType>().unwrap(),
            PositionType::EquityBasket
        );
        assert_eq!(
            "Reverse Carry".parse::<StrategyType>().unwrap(),
            StrategyType::ReverseCarry
        );
        assert!("swap".parse::<PositionType>().is_err());
        assert!(PositionType::StockBorrow.is_financing());
        assert!(PositionType::EquityBasket.is_physical());
    }
}
