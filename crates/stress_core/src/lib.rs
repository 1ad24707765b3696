//! # Stress Core (L1: Foundation)
//!
//! Core value types and traits for portfolio stress testing.
//!
//! This crate provides:
//! - Risk dimensions and aggregation policies
//! - Risk arrays (ordered shock values along one dimension)
//! - Per-underlying factor tables (e.g. beta)
//! - Relative/absolute stress calculators
//! - The instrument capability trait and parameter set
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            stress_core (L1)             │
//! ├─────────────────────────────────────────┤
//! │  types/   - RiskDimension, RiskArray,   │
//! │             Factor, StressCalculator    │
//! │  traits/  - Float, Instrument, ParamSet │
//! └─────────────────────────────────────────┘
//!          ↑
//! ┌─────────────────────────────────────────┐
//! │            stress_risk (L2)             │
//! │  Scenarios, engine, aggregation         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use stress_core::types::{RiskArray, RiskDimension};
//!
//! let array = RiskArray::equidistant(RiskDimension::Price, 2, 2, 0.05_f64, true);
//! assert_eq!(array.values(), &[-0.10, -0.05, 0.0, 0.05, 0.10]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod traits;
pub mod types;

// Re-export commonly used types
pub use traits::instrument::{Instrument, InstrumentKind, ParamSet};
pub use traits::Float;
pub use types::{
    decayed_time, AggregationType, Factor, RiskArray, RiskDimension, StressCalculator,
};
