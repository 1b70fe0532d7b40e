//! Benchmarks for valuation and document resolution

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal_macros::dec;
use schrodinger_model::expr;
use schrodinger_model::model::{
    AssetParams, DiscountRate, FairValueModel, PresentValueModel, ProjectionSeries,
};
use schrodinger_model::scenario::{DocumentFormat, ScenarioBook};

fn assets() -> Vec<AssetParams> {
    let trillion = dec!(1000000000000);
    [
        ("Stocks", dec!(115), dec!(0.10), dec!(0.10), 20),
        ("Bonds", dec!(130), dec!(0.15), dec!(0.10), 20),
        ("Gold", dec!(18), dec!(0.90), dec!(0.30), 15),
        ("Silver", dec!(1.6), dec!(0.60), dec!(0.25), 15),
        ("Real Estate", dec!(330), dec!(0.15), dec!(0.10), 20),
        ("Crypto (ex-BTC)", dec!(1.2), dec!(0.50), dec!(0.40), 15),
        ("Fine Art", dec!(1.8), dec!(0.40), dec!(0.15), 15),
    ]
    .into_iter()
    .map(|(name, mcap, mp, prob, years)| AssetParams {
        name: name.to_string(),
        market_cap: mcap * trillion,
        monetary_premium: mp,
        capture_probability: prob,
        time_horizon_years: years,
    })
    .collect()
}

fn benchmark_present_value(c: &mut Criterion) {
    let model = PresentValueModel::new(dec!(21000000)).unwrap();
    let assets = assets();
    let rate = DiscountRate::from_percent(dec!(10)).unwrap();

    c.bench_function("present_value_seven_assets", |b| {
        b.iter(|| model.compute(black_box(&assets), black_box(rate)))
    });
}

fn benchmark_projection(c: &mut Criterion) {
    let rate = DiscountRate::from_percent(dec!(8)).unwrap();

    c.bench_function("projection_fifty_years", |b| {
        b.iter(|| ProjectionSeries::new(black_box(dec!(250000)), rate, 50))
    });
}

fn benchmark_expression(c: &mut Criterion) {
    c.bench_function("expr_evaluate", |b| {
        b.iter(|| expr::evaluate(black_box("(1.6 * 10 ** 12) * 1.25 / (1 + 0.08) ^ 15")))
    });
}

fn benchmark_document_resolution(c: &mut Criterion) {
    let content = include_str!("../scenarios.json");

    c.bench_function("resolve_scenarios_json", |b| {
        b.iter(|| ScenarioBook::parse(black_box(content), DocumentFormat::Json, Some(dec!(97000))))
    });
}

criterion_group!(
    benches,
    benchmark_present_value,
    benchmark_projection,
    benchmark_expression,
    benchmark_document_resolution
);
criterion_main!(benches);
