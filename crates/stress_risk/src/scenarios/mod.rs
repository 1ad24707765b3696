//! Scenario definition, execution and aggregation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              Scenario Engine                 │
//! ├──────────────────────────────────────────────┤
//! │  StressScenario   - Declarative stress test  │
//! │  ShockPoint       - One expanded evaluation  │
//! │  StressTestEngine - Execution & results      │
//! │  aggregate_pnl    - Bucketed P&L reduction   │
//! │  presets          - Common scenario shapes   │
//! └──────────────────────────────────────────────┘
//! ```

mod aggregator;
mod engine;
pub mod presets;
mod result;
mod scenario;

pub use aggregator::aggregate_pnl;
pub use engine::{PricerFn, PricerRegistry, StressTestEngine};
pub use result::{ScenarioResults, ScenarioTable, StressResult};
pub use scenario::{ShockEntry, ShockPoint, StressScenario, StressScenarioBuilder};
