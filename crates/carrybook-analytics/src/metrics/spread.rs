//! Calendar spread carry.

use carrybook_core::types::BASIS_POINT;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Calendar days used to annualise spread roll-down.
const CALENDAR_DAYS_PER_YEAR: i64 = 365;

/// Carry profile of a long-near / short-far futures spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSpreadCarry {
    /// Spread locked in at inception (`to − from`), in bps.
    pub spread_bps: Decimal,
    /// Spread earned per day, in bps.
    pub daily_carry_bps: Decimal,
    /// Spread earned per day, in USD.
    pub daily_carry_usd: Decimal,
    /// Carry over the holding period, in bps.
    pub total_carry_bps: Decimal,
    /// Carry over the holding period, in USD.
    pub total_carry_usd: Decimal,
    /// Daily carry scaled to a calendar year, in bps.
    pub annualized_carry_bps: Decimal,
    /// Days the spread is held.
    pub holding_period_days: i64,
    /// Days between the two deliveries.
    pub days_between_contracts: i64,
}

/// Carry of a calendar spread quoted in basis points.
///
/// The spread rolls down linearly between the two deliveries. When the
/// deliveries coincide (or are reversed) the daily carry is zero. The
/// holding period defaults to the full gap between deliveries.
#[must_use]
pub fn calendar_spread_carry(
    from_price: Decimal,
    to_price: Decimal,
    days_between_contracts: i64,
    notional: Decimal,
    holding_period_days: Option<i64>,
) -> CalendarSpreadCarry {
    let holding_period_days = holding_period_days.unwrap_or(days_between_contracts);
    let spread_bps = to_price - from_price;

    let daily_carry_bps = if days_between_contracts > 0 {
        spread_bps / Decimal::from(days_between_contracts)
    } else {
        Decimal::ZERO
    };
    let daily_carry_usd = daily_carry_bps * BASIS_POINT * notional.abs();
    let holding = Decimal::from(holding_period_days);

    CalendarSpreadCarry {
        spread_bps,
        daily_carry_bps,
        daily_carry_usd,
        total_carry_bps: daily_carry_bps * holding,
        total_carry_usd: daily_carry_usd * holding,
        annualized_carry_bps: daily_carry_bps * Decimal::from(CALENDAR_DAYS_PER_YEAR),
        holding_period_days,
        days_between_contracts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_march_june_spread() {
        let c = calendar_spread_carry(dec!(44.5), dec!(51.5), 90, dec!(100_000_000), Some(20));
        assert_eq!(c.spread_bps, dec!(7));
        assert_eq!(c.holding_period_days, 20);
        assert_eq!(c.daily_carry_bps.round_dp(5), dec!(0.07778));
        assert_eq!(c.daily_carry_usd.round_dp(2), dec!(777.78));
        assert_eq!(c.total_carry_usd.round_dp(2), dec!(15555.56));
        assert_eq!(c.annualized_carry_bps.round_dp(2), dec!(28.39));
    }

    #[test]
    fn test_holding_defaults_to_gap() {
        let c = calendar_spread_carry(dec!(44.5), dec!(51.5), 90, dec!(100_000_000), None);
        assert_eq!(c.holding_period_days, 90);
        assert_eq!(c.total_carry_bps.round_dp(10), dec!(7));
    }

    #[test]
    fn test_zero_gap_has_no_daily_carry() {
        let c = calendar_spread_carry(dec!(44.5), dec!(51.5), 0, dec!(1_000_000), Some(10));
        assert_eq!(c.daily_carry_bps, Decimal::ZERO);
        assert_eq!(c.total_carry_usd, Decimal::ZERO);
        assert_eq!(c.spread_bps, dec!(7));
    }
}
