//! Benchmarks for the forward rate matrix and position metrics.
//!
//! Run with: cargo bench -p carrybook-analytics

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use carrybook_analytics::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn reference_date() -> Date {
    Date::from_ymd(2026, 2, 27).unwrap()
}

/// A quarterly strip of `n` contracts, every seventh one unpriced.
fn create_strip(n: usize) -> Vec<Contract> {
    (0..n)
        .map(|i| {
            let days = -70 + 91 * i as i64;
            let price = if i % 7 == 6 {
                None
            } else {
                Some(dec!(40) + Decimal::from((i * 13 % 60) as i64))
            };
            Contract::with_days(
                format!("AXW{i:03}"),
                price,
                reference_date().add_days(days),
                days,
            )
        })
        .collect()
}

fn create_positions(n: usize) -> Vec<Position> {
    (0..n)
        .map(|i| {
            Position::builder()
                .basket_id(format!("Basket{}", i % 20))
                .position_id(format!("P{i:05}"))
                .position_type(if i % 2 == 0 {
                    PositionType::Future
                } else {
                    PositionType::EquityBasket
                })
                .strategy(StrategyType::SimpleCarry)
                .direction(if i % 2 == 0 { Direction::Short } else { Direction::Long })
                .notional(Decimal::from(10_000_000 + (i as i64) * 1_000))
                .financing_rate(dec!(0.0535))
                .realized_pnl(Decimal::from((i as i64 % 50) * 1_000))
                .start_date(reference_date().add_days(-30))
                .end_date(reference_date().add_days(60 + (i as i64 % 120)))
                .build()
                .unwrap()
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_matrix_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_matrix_build");
    group.sample_size(50);

    for size in [10, 40, 100].iter() {
        let strip = create_strip(*size);
        group.throughput(Throughput::Elements((*size * *size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &strip, |b, strip| {
            b.iter(|| ForwardRateMatrix::build(black_box(strip)))
        });
    }
    group.finish();
}

fn bench_opportunities(c: &mut Criterion) {
    let matrix = ForwardRateMatrix::build(&create_strip(40)).unwrap();

    c.bench_function("spread_opportunities_40", |b| {
        b.iter(|| {
            identify_calendar_spread_opportunities(black_box(&matrix), dec!(100), dec!(20))
        })
    });
}

fn bench_position_metrics(c: &mut Criterion) {
    let ctx = CarryContext::new(reference_date()).with_funding_rate(dec!(0.05));
    let mut group = c.benchmark_group("position_metrics");

    for size in [100, 1000].iter() {
        let positions = create_positions(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &positions,
            |b, positions| {
                b.iter(|| {
                    positions
                        .iter()
                        .map(|p| PositionMetrics::calculate(black_box(p), &ctx))
                        .collect::<Result<Vec<_>, _>>()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_matrix_build,
    bench_opportunities,
    bench_position_metrics
);
criterion_main!(benches);
