//! Stress Report Demo CLI
//!
//! Builds a toy equity/option portfolio, runs a price grid, a price ×
//! volatility grid and an idiosyncratic EPR scenario, and prints the
//! resulting tables.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use stress_core::{Instrument, InstrumentKind, ParamSet};
use stress_risk::portfolio::{Portfolio, Position};
use stress_risk::scenarios::presets::{
    beta_factor, epr_stress_scenario, price_stress_scenario, price_vol_stress_scenario,
};
use stress_risk::scenarios::{PricerRegistry, ScenarioTable, StressTestEngine};

#[derive(Parser, Debug)]
#[command(name = "stress-report", about = "Run sample stress scenarios")]
struct Args {
    /// Steps on each side of the price grid
    #[arg(long, default_value_t = 2)]
    steps: usize,

    /// Price grid step size as a fraction (0.05 = 5%)
    #[arg(long, default_value_t = 0.05)]
    step_pct: f64,

    /// Apply a sample beta factor to the price scenario
    #[arg(long, default_value_t = false)]
    beta: bool,
}

#[derive(Clone, Debug)]
enum Asset {
    Equity {
        symbol: &'static str,
        price: f64,
    },
    Call {
        underlying: &'static str,
        price: f64,
        iv: f64,
        dte: f64,
    },
}

impl Instrument<f64> for Asset {
    fn kind(&self) -> InstrumentKind {
        match self {
            Asset::Equity { .. } => InstrumentKind::EQUITY,
            Asset::Call { .. } => InstrumentKind::OPTION,
        }
    }

    fn underlying(&self) -> &str {
        match self {
            Asset::Equity { symbol, .. } => symbol,
            Asset::Call { underlying, .. } => underlying,
        }
    }

    fn price(&self) -> Option<f64> {
        match self {
            Asset::Equity { price, .. } => Some(*price),
            Asset::Call { price, .. } => Some(*price),
        }
    }

    fn volatility(&self) -> Option<f64> {
        match self {
            Asset::Equity { .. } => None,
            Asset::Call { iv, .. } => Some(*iv),
        }
    }

    fn time(&self) -> Option<f64> {
        match self {
            Asset::Equity { .. } => None,
            Asset::Call { dte, .. } => Some(*dte),
        }
    }
}

fn sample_portfolio() -> Portfolio<f64, Asset> {
    Portfolio::new()
        .with_position(Position::new(
            "pos1",
            Asset::Equity {
                symbol: "AAPL",
                price: 280.0,
            },
            100.0,
        ))
        .with_position(Position::new(
            "pos2",
            Asset::Call {
                underlying: "AAPL",
                price: 3.20,
                iv: 0.30,
                dte: 30.0,
            },
            -10.0,
        ))
        .with_position(Position::new(
            "pos3",
            Asset::Equity {
                symbol: "MSFT",
                price: 400.0,
            },
            50.0,
        ))
        .with_position(Position::new(
            "pos4",
            Asset::Equity {
                symbol: "NVDA",
                price: 800.0,
            },
            25.0,
        ))
}

fn sample_pricers() -> PricerRegistry<f64, Asset> {
    PricerRegistry::new()
        .with_pricer(
            InstrumentKind::EQUITY,
            |_a: &Asset, params: &ParamSet<f64>| params.price().unwrap_or(0.0),
        )
        .with_pricer(
            InstrumentKind::OPTION,
            |a: &Asset, params: &ParamSet<f64>| {
                // Toy premium model: premium moves proportionally with spot
                match a {
                    Asset::Call { price, .. } => {
                        *price * params.price().unwrap_or(*price) / *price
                    }
                    Asset::Equity { price, .. } => *price,
                }
            },
        )
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("stress_risk=debug".parse()?))
        .init();

    let args = Args::parse();
    tracing::info!(steps = args.steps, step_pct = args.step_pct, "stress report starting");

    let engine = StressTestEngine::new(sample_portfolio(), sample_pricers());

    let factor = args.beta.then(|| {
        beta_factor(
            &[("AAPL", 1.2), ("MSFT", 0.9), ("NVDA", 1.8)],
            "SPX",
        )
    });
    let scenarios = vec![
        price_stress_scenario("Price Stress", args.steps, args.steps, args.step_pct, factor)?,
        price_vol_stress_scenario(
            "Price+Vol Stress",
            (args.steps, args.steps, args.step_pct),
            (1, 1, 0.02),
        )?,
        epr_stress_scenario(
            "1-Day EPR Stress",
            &[("AAPL", 0.20), ("MSFT", 0.15), ("NVDA", 0.40)],
            2,
            false,
        )?,
    ];

    for scenario in &scenarios {
        let results = engine.run_scenario(scenario);
        let table = ScenarioTable::from_results(&results);
        println!("== {} ==", scenario.name());
        println!("{table}");
    }

    Ok(())
}
