//! Criterion benchmarks for the stress engine.
//!
//! Benchmarks cover:
//! - Shock-point expansion for one- and two-dimensional grids
//! - Full scenario runs over portfolios of varying size
//! - Idiosyncratic (EPR) scenario runs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stress_core::{Instrument, InstrumentKind, ParamSet, RiskArray, RiskDimension};
use stress_risk::portfolio::{Portfolio, Position};
use stress_risk::scenarios::presets::{epr_stress_scenario, price_stress_scenario};
use stress_risk::scenarios::{PricerRegistry, StressScenario, StressTestEngine};

#[derive(Clone)]
struct Stock {
    symbol: String,
    price: f64,
}

impl Instrument<f64> for Stock {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::EQUITY
    }

    fn underlying(&self) -> &str {
        &self.symbol
    }

    fn price(&self) -> Option<f64> {
        Some(self.price)
    }
}

/// Generate a synthetic portfolio cycling over a handful of underlyings.
fn generate_portfolio(n_positions: usize) -> Portfolio<f64, Stock> {
    let symbols = ["AAPL", "MSFT", "NVDA", "AMZN", "GOOG"];
    let mut portfolio = Portfolio::new();
    for i in 0..n_positions {
        let symbol = symbols[i % symbols.len()];
        portfolio = portfolio.with_position(Position::new(
            format!("pos{i}"),
            Stock {
                symbol: symbol.to_string(),
                price: 100.0 + (i % 37) as f64,
            },
            ((i % 11) as f64 - 5.0) * 10.0,
        ));
    }
    portfolio
}

fn registry() -> PricerRegistry<f64, Stock> {
    PricerRegistry::new().with_pricer(InstrumentKind::EQUITY, |_s: &Stock, params: &ParamSet<f64>| {
        params.price().unwrap_or(0.0)
    })
}

/// Benchmark shock-point expansion.
fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("expansion");

    for n in [11usize, 41, 101] {
        let scenario = price_stress_scenario("bench", n / 2, n / 2, 0.01, None).unwrap();
        group.bench_with_input(BenchmarkId::new("price_grid", n), &scenario, |b, s| {
            b.iter(|| black_box(s.shock_points()));
        });
    }

    let two_dim = StressScenario::builder("bench_2d")
        .with_risk_array(RiskArray::equidistant(RiskDimension::Price, 10, 10, 0.01, true))
        .with_risk_array(RiskArray::equidistant(
            RiskDimension::Volatility,
            5,
            5,
            0.01,
            true,
        ))
        .build()
        .unwrap();
    group.bench_function("price_vol_grid_21x11", |b| {
        b.iter(|| black_box(two_dim.shock_points()));
    });

    group.finish();
}

/// Benchmark full scenario runs over varying portfolio sizes.
fn bench_run_scenario(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_scenario");

    for n_positions in [10usize, 100, 1000] {
        let engine = StressTestEngine::new(generate_portfolio(n_positions), registry());
        let scenario = price_stress_scenario("bench", 5, 5, 0.01, None).unwrap();

        group.bench_with_input(
            BenchmarkId::new("price_11pts", n_positions),
            &scenario,
            |b, s| {
                b.iter(|| black_box(engine.run_scenario(s)));
            },
        );
    }

    group.finish();
}

/// Benchmark idiosyncratic EPR runs.
fn bench_idiosyncratic(c: &mut Criterion) {
    let mut group = c.benchmark_group("idiosyncratic");

    let eprs = [
        ("AAPL", 0.20),
        ("MSFT", 0.15),
        ("NVDA", 0.40),
        ("AMZN", 0.25),
        ("GOOG", 0.18),
    ];
    for n_positions in [10usize, 100, 1000] {
        let engine = StressTestEngine::new(generate_portfolio(n_positions), registry());
        let scenario = epr_stress_scenario("bench_epr", &eprs, 4, false).unwrap();

        group.bench_with_input(
            BenchmarkId::new("epr_8pts", n_positions),
            &scenario,
            |b, s| {
                b.iter(|| black_box(engine.run_scenario(s)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_expansion,
    bench_run_scenario,
    bench_idiosyncratic
);
criterion_main!(benches);
