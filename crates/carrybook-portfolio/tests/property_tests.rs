//! Property-based tests for basket aggregation and alerting.

use carrybook_analytics::types::{Position, PositionType, StrategyType};
use carrybook_core::{Date, Direction};
use carrybook_portfolio::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn reference_date() -> Date {
    Date::from_ymd(2026, 2, 27).unwrap()
}

fn leg(basket: &str, id: &str, kind: PositionType, signed: i64, end_offset: i64) -> Position {
    Position::builder()
        .basket_id(basket)
        .position_id(id)
        .position_type(kind)
        .strategy(StrategyType::SimpleCarry)
        .direction(if signed < 0 {
            Direction::Short
        } else {
            Direction::Long
        })
        .notional(Decimal::from(signed.abs()))
        .financing_rate(Decimal::new(535, 4))
        .start_date(reference_date().add_days(-60))
        .end_date(reference_date().add_days(end_offset))
        .build()
        .unwrap()
}

/// Signed notional, never zero.
fn signed_notional() -> impl Strategy<Value = i64> {
    prop_oneof![-50_000_000i64..-1, 1i64..50_000_000]
}

proptest! {
    #[test]
    fn property_breach_iff_net_at_threshold(
        futures in signed_notional(),
        physical in signed_notional(),
        threshold in 0i64..1_000_000,
    ) {
        let positions = vec![
            leg("B1", "FUT", PositionType::Future, futures, 30),
            leg("B1", "EQ", PositionType::Equity, physical, 30),
        ];
        let config = EngineConfig::default().with_alert_threshold(Decimal::from(threshold));
        let summaries = aggregate_baskets(&positions, reference_date(), &config).unwrap();

        let net = Decimal::from(futures + physical);
        prop_assert_eq!(summaries[0].net_exposure, net);
        prop_assert_eq!(summaries[0].hedge_breach, net.abs() >= Decimal::from(threshold));

        let alerts = evaluate_alerts(&summaries, &positions, reference_date(), &config);
        let breached = alerts.iter().any(|a| a.kind == AlertKind::ExposureBreach);
        prop_assert_eq!(breached, summaries[0].hedge_breach);
    }

    #[test]
    fn property_lifecycle_alerts_within_window(
        offsets in prop::collection::vec(-20i64..40, 1..12),
        lookahead in 0i64..30,
    ) {
        let positions: Vec<Position> = offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                let basket = format!("B{}", i % 3);
                leg(&basket, &format!("P{i}"), PositionType::Future, 1_000_000, *offset)
            })
            .collect();
        let config = EngineConfig::default()
            .with_lookahead_days(lookahead)
            .with_urgent_days(lookahead.min(3));
        let summaries = aggregate_baskets(&positions, reference_date(), &config).unwrap();
        let alerts = evaluate_alerts(&summaries, &positions, reference_date(), &config);

        let lifecycle: Vec<&Alert> = alerts
            .iter()
            .filter(|a| a.kind == AlertKind::LifecycleApproaching)
            .collect();
        let expected = offsets.iter().filter(|d| (0..=lookahead).contains(*d)).count();
        prop_assert_eq!(lifecycle.len(), expected);

        let days: Vec<Decimal> = lifecycle.iter().map(|a| a.value).collect();
        prop_assert!(days.windows(2).all(|w| w[0] <= w[1]));
    }
}
