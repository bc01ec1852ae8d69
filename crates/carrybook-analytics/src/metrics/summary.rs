//! Per-position metrics bundle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::carry::{accrued_carry, carry, daily_carry, expected_carry_to_maturity};
use super::exposure::{futures_equity_exposure, physical_equity_exposure};
use super::pnl::profit_and_loss;
use super::pricing::dv01;
use super::CarryContext;
use crate::types::Position;
use carrybook_core::CarryResult;

/// Every per-position metric at one reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionMetrics {
    /// Basket identifier.
    pub basket_id: String,
    /// Position identifier.
    pub position_id: String,
    /// Realized P&L in USD.
    pub pnl_usd: Decimal,
    /// Realized P&L in bps of notional.
    pub pnl_bps: Decimal,
    /// Total carry over the leg's life.
    pub carry: Decimal,
    /// Remaining carry per remaining day; `None` at or past maturity.
    pub daily_carry: Option<Decimal>,
    /// Carry earned to the reference date.
    pub accrued_carry: Decimal,
    /// Carry still to be earned.
    pub expected_carry_to_maturity: Decimal,
    /// Signed futures exposure.
    pub futures_exposure: Decimal,
    /// Signed physical exposure.
    pub physical_exposure: Decimal,
    /// Signed days from the reference date to maturity.
    pub days_to_maturity: i64,
    /// DV01 over the remaining life (zero once matured).
    pub dv01: Decimal,
}

impl PositionMetrics {
    /// Computes all metrics for `position` at `ctx`.
    ///
    /// # Errors
    ///
    /// Returns `CarryError::DataError` if the position violates its record
    /// invariants.
    pub fn calculate(position: &Position, ctx: &CarryContext) -> CarryResult<Self> {
        position.validate()?;
        let (pnl_usd, pnl_bps) = profit_and_loss(position)?;
        let days_to_maturity = position.days_to_maturity(ctx.reference_date);

        Ok(Self {
            basket_id: position.basket_id.clone(),
            position_id: position.position_id.clone(),
            pnl_usd,
            pnl_bps,
            carry: carry(position, ctx),
            daily_carry: daily_carry(position, ctx),
            accrued_carry: accrued_carry(position, ctx),
            expected_carry_to_maturity: expected_carry_to_maturity(position, ctx),
            futures_exposure: futures_equity_exposure(position),
            physical_exposure: physical_equity_exposure(position),
            days_to_maturity,
            dv01: dv01(position.notional, days_to_maturity.max(0), ctx.day_count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PositionType, StrategyType};
    use carrybook_core::{Date, Direction};
    use rust_decimal_macros::dec;

    fn future() -> Position {
        Position::builder()
            .basket_id("Basket1")
            .position_id("B1-FUT")
            .position_type(PositionType::Future)
            .strategy(StrategyType::SimpleCarry)
            .direction(Direction::Short)
            .notional(dec!(100_000_000))
            .financing_rate(dec!(0.0535))
            .start_date(Date::from_ymd(2026, 3, 20).unwrap())
            .end_date(Date::from_ymd(2026, 6, 18).unwrap())
            .realized_pnl(dec!(120_000))
            .build()
            .unwrap()
    }

    #[test]
    fn test_calculate() {
        let ctx = CarryContext::new(Date::from_ymd(2026, 3, 20).unwrap())
            .with_funding_rate(dec!(0.05));
        let m = PositionMetrics::calculate(&future(), &ctx).unwrap();

        assert_eq!(m.pnl_bps, dec!(12));
        assert_eq!(m.carry, dec!(87_500));
        assert_eq!(m.accrued_carry, Decimal::ZERO);
        assert_eq!(m.expected_carry_to_maturity, dec!(87_500));
        assert_eq!(m.futures_exposure, dec!(-100_000_000));
        assert_eq!(m.physical_exposure, Decimal::ZERO);
        assert_eq!(m.days_to_maturity, 90);
        assert_eq!(m.dv01, dec!(2500));
    }

    #[test]
    fn test_matured_position() {
        let ctx = CarryContext::new(Date::from_ymd(2026, 7, 1).unwrap());
        let m = PositionMetrics::calculate(&future(), &ctx).unwrap();
        assert!(m.daily_carry.is_none());
        assert_eq!(m.dv01, Decimal::ZERO);
        assert!(m.days_to_maturity < 0);
    }

    #[test]
    fn test_idempotent() {
        let ctx = CarryContext::new(Date::from_ymd(2026, 4, 15).unwrap())
            .with_funding_rate(dec!(0.05));
        let p = future();
        let a = PositionMetrics::calculate(&p, &ctx).unwrap();
        let b = PositionMetrics::calculate(&p, &ctx).unwrap();
        assert_eq!(a, b);
        assert_eq!(p, future());
    }

    #[test]
    fn test_invalid_record_rejected() {
        let mut p = future();
        p.notional = Decimal::ZERO;
        let ctx = CarryContext::new(Date::from_ymd(2026, 4, 15).unwrap());
        assert!(PositionMetrics::calculate(&p, &ctx).unwrap_err().is_data_error());
    }
}
