//! Scenario configuration error types.
//!
//! This module provides structured error types for scenario construction and
//! batch execution using `thiserror` for derivation.

use thiserror::Error;

/// Errors that can occur while building or batch-running scenarios.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Scenario populates both the shared and the per-underlying risk arrays.
    #[error("Scenario '{0}' defines both shared and per-underlying risk arrays")]
    MixedScenarioMode(String),

    /// Scenario populates neither the shared nor the per-underlying risk arrays.
    #[error("Scenario '{0}' defines no risk arrays")]
    EmptyScenario(String),

    /// Two scenarios in one batch run share a name.
    #[error("Duplicate scenario name: {0}")]
    DuplicateScenarioName(String),
}
