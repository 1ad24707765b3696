//! Preset builders for common scenario shapes.
//!
//! Pure functions constructing the scenarios most stress runs start from:
//! price-only grids, combined price/volatility grids, and EPR-based
//! idiosyncratic scenarios. Factor helpers live here too.

use stress_core::{AggregationType, Factor, Float, RiskArray, RiskDimension};

use super::scenario::StressScenario;
use crate::error::ScenarioError;

/// An equidistant grid specification: `(n_up, n_down, step_pct)`.
pub type GridSpec<T> = (usize, usize, T);

/// Build a price-only stress scenario over an equidistant grid.
///
/// The grid includes the unshocked base point. Attaching a factor switches
/// aggregation to the factor bucket; without one, P&L aggregates per
/// underlying.
pub fn price_stress_scenario<T: Float>(
    name: impl Into<String>,
    n_up: usize,
    n_down: usize,
    step_pct: T,
    factor: Option<Factor<T>>,
) -> Result<StressScenario<T>, ScenarioError> {
    let array = RiskArray::equidistant(RiskDimension::Price, n_up, n_down, step_pct, true);
    let aggregation = if factor.is_some() {
        AggregationType::ByFactor
    } else {
        AggregationType::ByUnderlying
    };

    let mut builder = StressScenario::builder(name)
        .with_risk_array(array)
        .with_aggregation(aggregation);
    if let Some(factor) = factor {
        builder = builder.with_factor(factor);
    }
    builder.build()
}

/// Build a combined price × volatility stress scenario.
///
/// Shock points are the cartesian product with price varying slowest.
pub fn price_vol_stress_scenario<T: Float>(
    name: impl Into<String>,
    price_range: GridSpec<T>,
    vol_range: GridSpec<T>,
) -> Result<StressScenario<T>, ScenarioError> {
    let (price_up, price_down, price_step) = price_range;
    let (vol_up, vol_down, vol_step) = vol_range;

    StressScenario::builder(name)
        .with_risk_array(RiskArray::equidistant(
            RiskDimension::Price,
            price_up,
            price_down,
            price_step,
            true,
        ))
        .with_risk_array(RiskArray::equidistant(
            RiskDimension::Volatility,
            vol_up,
            vol_down,
            vol_step,
            true,
        ))
        .with_aggregation(AggregationType::ByUnderlying)
        .build()
}

/// Build an idiosyncratic scenario from Expected Price Ranges.
///
/// Each underlying gets its own price array of `n_steps` equally spaced
/// fractions of its EPR on both sides, in ascending order, with an optional
/// base point. `n_steps == 0` uses the EPR bounds only.
///
/// # Examples
/// ```
/// use stress_risk::scenarios::presets::epr_stress_scenario;
///
/// let scenario = epr_stress_scenario("1-Day EPR", &[("AAPL", 0.20_f64)], 2, false).unwrap();
/// let (_, arrays) = &scenario.underlying_risk_arrays()[0];
/// assert_eq!(arrays[0].values(), &[-0.20, -0.10, 0.10, 0.20]);
/// ```
pub fn epr_stress_scenario<T: Float>(
    name: impl Into<String>,
    epr_map: &[(&str, T)],
    n_steps: usize,
    include_base: bool,
) -> Result<StressScenario<T>, ScenarioError> {
    let mut builder =
        StressScenario::builder(name).with_aggregation(AggregationType::ByUnderlying);

    for (symbol, epr) in epr_map {
        let values = epr_values(*epr, n_steps, include_base);
        builder = builder.with_underlying_risk_arrays(
            *symbol,
            vec![RiskArray::custom(RiskDimension::Price, values, true)],
        );
    }
    builder.build()
}

/// Grid specification for [`epr_stress_scenario_custom`].
#[derive(Clone, Debug)]
pub enum EprGrid<T: Float> {
    /// One fraction grid applied to every underlying's EPR.
    Shared(Vec<T>),
    /// Per-symbol fraction grids; absent symbols use the EPR bounds.
    PerSymbol(Vec<(String, Vec<T>)>),
}

impl<T: Float> EprGrid<T> {
    /// Fraction grid for a symbol.
    fn fractions_for(&self, symbol: &str) -> Vec<T> {
        match self {
            EprGrid::Shared(fractions) => fractions.clone(),
            EprGrid::PerSymbol(grids) => grids
                .iter()
                .find(|(s, _)| s == symbol)
                .map(|(_, fractions)| fractions.clone())
                .unwrap_or_else(|| vec![-T::one(), T::one()]),
        }
    }
}

/// Build an idiosyncratic scenario with caller-specified fraction grids.
///
/// Each underlying's shock values are its grid fractions scaled by its EPR,
/// taken in grid order.
pub fn epr_stress_scenario_custom<T: Float>(
    name: impl Into<String>,
    epr_map: &[(&str, T)],
    grid: &EprGrid<T>,
) -> Result<StressScenario<T>, ScenarioError> {
    let mut builder =
        StressScenario::builder(name).with_aggregation(AggregationType::ByUnderlying);

    for (symbol, epr) in epr_map {
        let values: Vec<T> = grid
            .fractions_for(symbol)
            .into_iter()
            .map(|fraction| fraction * *epr)
            .collect();
        builder = builder.with_underlying_risk_arrays(
            *symbol,
            vec![RiskArray::custom(RiskDimension::Price, values, true)],
        );
    }
    builder.build()
}

/// Create a beta factor table against a benchmark.
pub fn beta_factor<T: Float>(betas: &[(&str, T)], benchmark: impl Into<String>) -> Factor<T> {
    let mut factor = Factor::new("beta").with_benchmark(benchmark);
    for (symbol, beta) in betas {
        factor = factor.with_underlying(*symbol, *beta);
    }
    factor
}

/// Create a single-name factor for one underlying.
pub fn single_name_factor<T: Float>(symbol: &str, value: T) -> Factor<T> {
    Factor::new(format!("idio_{symbol}")).with_underlying(symbol, value)
}

/// EPR shock values: mirrored fractions of the range, ascending.
fn epr_values<T: Float>(epr: T, n_steps: usize, include_base: bool) -> Vec<T> {
    if n_steps == 0 {
        return vec![-epr, epr];
    }

    let steps = T::from(n_steps).unwrap_or_else(T::one);
    let mut values = Vec::with_capacity(2 * n_steps + usize::from(include_base));
    for i in (1..=n_steps).rev() {
        let fraction = T::from(i).unwrap_or_else(T::one) / steps;
        values.push(-(fraction * epr));
    }
    if include_base {
        values.push(T::zero());
    }
    for i in 1..=n_steps {
        let fraction = T::from(i).unwrap_or_else(T::one) / steps;
        values.push(fraction * epr);
    }
    values
}
