//! Property-based tests for the analytics invariants.
//!
//! - A forward rate cell is dark exactly when the pair is unordered, a price
//!   is missing, or TO delivers on the reference date
//! - Computed cells satisfy the forward rate identity
//! - Accrual stays within `[0, 1]` of total carry
//! - Net exposure is futures plus physical
//! - The implied financing rate inverts the futures fair value

use approx::assert_abs_diff_eq;
use carrybook_analytics::metrics::{futures_theoretical_price, implied_financing_rate};
use carrybook_analytics::prelude::*;
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn reference_date() -> Date {
    Date::from_ymd(2026, 2, 27).unwrap()
}

fn contract(ticker: &str, price: Option<Decimal>, days: i64) -> Contract {
    Contract::with_days(ticker, price, reference_date().add_days(days), days)
}

/// Price in bps with two decimals, or missing.
fn price_strategy() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::weighted(0.85, (0i64..20_000).prop_map(|cents| Decimal::new(cents, 2)))
}

/// Simple deterministic hash for test data generation.
fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x
}

/// Generates a basket of legs with varying kinds, directions and sizes.
fn generate_basket(n: usize, seed: u64) -> Vec<Position> {
    let kinds = [
        PositionType::Future,
        PositionType::Equity,
        PositionType::EquityBasket,
        PositionType::CashBorrow,
        PositionType::CashLend,
        PositionType::StockBorrow,
    ];

    (0..n)
        .map(|i| {
            let hash = simple_hash(seed, i as u64);
            let direction = if hash % 2 == 0 {
                Direction::Long
            } else {
                Direction::Short
            };
            Position::builder()
                .basket_id(if hash % 3 == 0 { "B2" } else { "B1" })
                .position_id(format!("P{i}"))
                .position_type(kinds[hash as usize % kinds.len()])
                .strategy(StrategyType::SimpleCarry)
                .direction(direction)
                .notional(Decimal::from(1_000 + (hash % 50_000_000) as i64))
                .financing_rate(Decimal::new((hash % 800) as i64, 4))
                .start_date(reference_date().add_days(-((hash % 200) as i64)))
                .end_date(reference_date().add_days(1 + (hash % 400) as i64))
                .build()
                .unwrap()
        })
        .collect()
}

// =============================================================================
// PROPERTY: DARK CELL RULES
// =============================================================================

proptest! {
    #[test]
    fn property_dark_iff_not_computable(
        days_from in -400i64..400,
        days_to in -400i64..400,
        price_from in price_strategy(),
        price_to in price_strategy(),
    ) {
        let from = contract("FROM", price_from, days_from);
        let to = contract("TO", price_to, days_to);
        let cell = implied_forward_rate(&from, &to);

        let expect_dark = days_from >= days_to
            || price_from.is_none()
            || price_to.is_none()
            || days_to == 0;
        prop_assert_eq!(cell.is_dark(), expect_dark);
    }

    #[test]
    fn property_forward_rate_identity(
        days_from in -400i64..400,
        gap in 1i64..400,
        price_from in (0i64..20_000).prop_map(|c| Decimal::new(c, 2)),
        price_to in (0i64..20_000).prop_map(|c| Decimal::new(c, 2)),
    ) {
        let days_to = days_from + gap;
        prop_assume!(days_to != 0);

        let rate = implied_forward_rate(
            &contract("FROM", Some(price_from), days_from),
            &contract("TO", Some(price_to), days_to),
        )
        .rate()
        .unwrap();

        // price(TO) = price(FROM) × time_ratio + rate × dcf
        let d_from = Decimal::from(days_from);
        let d_to = Decimal::from(days_to);
        let rebuilt = price_from * d_from / d_to + rate * (d_to - d_from) / d_to;
        prop_assert!((rebuilt - price_to).abs() < dec!(0.000001));
    }

    #[test]
    fn property_accrual_clamped(
        term in 1i64..1_000,
        offset in -2_000i64..2_000,
    ) {
        let start = reference_date();
        let leg = Position::builder()
            .basket_id("B1")
            .position_id("P1")
            .position_type(PositionType::CashBorrow)
            .strategy(StrategyType::SimpleCarry)
            .direction(Direction::Long)
            .notional(dec!(10_000_000))
            .financing_rate(dec!(0.0535))
            .start_date(start)
            .end_date(start.add_days(term))
            .build()
            .unwrap();

        let ctx = CarryContext::new(start.add_days(offset)).with_funding_rate(dec!(0.05));
        let total = carry(&leg, &ctx);
        let accrued = accrued_carry(&leg, &ctx);

        prop_assert!(accrued >= Decimal::ZERO);
        prop_assert!(accrued <= total);
        prop_assert_eq!(expected_carry_to_maturity(&leg, &ctx), total - accrued);
    }
}

// =============================================================================
// PROPERTY: NET = FUTURES + PHYSICAL
// =============================================================================

#[test]
fn property_net_is_futures_plus_physical() {
    for seed in 0..10 {
        for size in [1, 5, 25, 100] {
            let positions = generate_basket(size, seed);
            for basket in ["B1", "B2"] {
                let in_basket = positions.iter().filter(|p| p.basket_id == basket);
                let futures: Decimal = in_basket.clone().map(futures_equity_exposure).sum();
                let physical: Decimal = in_basket.map(physical_equity_exposure).sum();

                assert_eq!(
                    net_equity_exposure(&positions, basket),
                    futures + physical,
                    "seed={seed} size={size} basket={basket}"
                );
            }
        }
    }
}

#[test]
fn property_metrics_idempotent() {
    let ctx = CarryContext::new(reference_date()).with_funding_rate(dec!(0.05));
    for seed in 0..10 {
        let positions = generate_basket(20, seed);
        let snapshot = positions.clone();

        let first: Vec<_> = positions
            .iter()
            .map(|p| PositionMetrics::calculate(p, &ctx).unwrap())
            .collect();
        let second: Vec<_> = positions
            .iter()
            .map(|p| PositionMetrics::calculate(p, &ctx).unwrap())
            .collect();

        assert_eq!(first, second);
        assert_eq!(positions, snapshot);
    }
}

// =============================================================================
// PROPERTY: FAIR VALUE INVERSE
// =============================================================================

proptest! {
    #[test]
    fn property_implied_rate_inverts_fair_value(
        spot_cents in 100_000i64..700_000,
        rate_bp in -100i64..800,
        days in 1i64..400,
        dividend_cents in 0i64..5_000,
        act365 in any::<bool>(),
    ) {
        let spot = Decimal::new(spot_cents, 2);
        let rate = Decimal::new(rate_bp, 4);
        let dividends = Decimal::new(dividend_cents, 2);
        let convention = if act365 {
            DayCountConvention::Act365Fixed
        } else {
            DayCountConvention::Act360
        };

        let futures = futures_theoretical_price(spot, rate, days, dividends, convention).unwrap();
        let implied = implied_financing_rate(futures, spot, dividends, days, convention).unwrap();

        assert_abs_diff_eq!(
            implied.to_f64().unwrap(),
            rate.to_f64().unwrap(),
            epsilon = 1e-9
        );
    }
}
