//! # Stress Risk (L2: Application)
//!
//! Portfolio stress testing: scenario expansion, repricing and P&L
//! aggregation over pluggable instruments and pricers.
//!
//! This crate provides:
//! - Portfolio and position records over caller-supplied instruments
//! - Declarative stress scenarios (shared or per-underlying risk arrays)
//! - Shock-point expansion (cartesian grids, EPR fraction axes)
//! - A stress engine delegating valuation to injected pricers
//! - Bucketed P&L aggregation and tabular reports
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            stress_risk (L2)             │
//! ├─────────────────────────────────────────┤
//! │  portfolio/  - Position, Portfolio      │
//! │  scenarios/  - StressScenario, engine,  │
//! │                aggregation, presets     │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            stress_core (L1)             │
//! │  Risk arrays, factors, calculators      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use stress_core::{Instrument, InstrumentKind};
//! use stress_risk::portfolio::{Portfolio, Position};
//! use stress_risk::scenarios::presets::price_stress_scenario;
//! use stress_risk::scenarios::{PricerRegistry, StressTestEngine};
//!
//! struct Stock {
//!     symbol: &'static str,
//!     price: f64,
//! }
//!
//! impl Instrument<f64> for Stock {
//!     fn kind(&self) -> InstrumentKind {
//!         InstrumentKind::EQUITY
//!     }
//!     fn underlying(&self) -> &str {
//!         self.symbol
//!     }
//!     fn price(&self) -> Option<f64> {
//!         Some(self.price)
//!     }
//! }
//!
//! let portfolio = Portfolio::new().with_position(Position::new(
//!     "pos1",
//!     Stock { symbol: "AAPL", price: 280.0 },
//!     100.0,
//! ));
//! let pricers = PricerRegistry::new()
//!     .with_pricer(InstrumentKind::EQUITY, |_s: &Stock, params| {
//!         params.price().unwrap_or(0.0)
//!     });
//!
//! let engine = StressTestEngine::new(portfolio, pricers);
//! let scenario = price_stress_scenario("Price Stress", 2, 2, 0.05, None).unwrap();
//! let results = engine.run_scenario(&scenario);
//!
//! assert_eq!(results.stress_points.len(), 5);
//! assert_eq!(results.position_results.len(), 1);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod portfolio;
pub mod scenarios;

// Re-export commonly used types
pub use error::ScenarioError;
pub use portfolio::{Portfolio, Position};
pub use scenarios::{
    aggregate_pnl, PricerRegistry, ScenarioResults, ScenarioTable, ShockEntry, ShockPoint,
    StressResult, StressScenario, StressScenarioBuilder, StressTestEngine,
};
