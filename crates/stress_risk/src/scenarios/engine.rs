//! Stress test execution engine.
//!
//! The engine owns read-only inputs (portfolio + pricer registry) and turns
//! scenarios into results. Each (position, shock point) evaluation reads
//! only immutable state, so positions are fanned out over Rayon; collection
//! preserves portfolio order, and shock-point order within a position stays
//! sequential so aggregation can rely on index alignment.

use std::collections::HashMap;
use std::fmt;

use rayon::prelude::*;
use tracing::debug;

use stress_core::{
    decayed_time, Factor, Float, Instrument, InstrumentKind, ParamSet, StressCalculator,
};

use super::result::{ScenarioResults, ScenarioTable, StressResult};
use super::scenario::{ShockEntry, ShockPoint, StressScenario};
use crate::error::ScenarioError;
use crate::portfolio::{Portfolio, Position};
use crate::scenarios::aggregator::aggregate_pnl;

/// Boxed pricing function: instrument plus stressed parameters to a
/// stressed unit price.
pub type PricerFn<T, I> = Box<dyn Fn(&I, &ParamSet<T>) -> T + Send + Sync>;

/// Pricer lookup keyed by instrument kind tag.
///
/// Resolution is an explicit tag→function map; pricer correctness is not
/// validated. Kinds without a registered pricer degrade silently: the
/// stressed `price` parameter is returned, or zero when the instrument
/// exposes no price at all.
pub struct PricerRegistry<T: Float, I> {
    pricers: HashMap<InstrumentKind, PricerFn<T, I>>,
}

impl<T: Float, I> Default for PricerRegistry<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float, I> PricerRegistry<T, I> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            pricers: HashMap::new(),
        }
    }

    /// Register a pricer for an instrument kind.
    pub fn with_pricer(
        mut self,
        kind: InstrumentKind,
        pricer: impl Fn(&I, &ParamSet<T>) -> T + Send + Sync + 'static,
    ) -> Self {
        self.pricers.insert(kind, Box::new(pricer));
        self
    }

    /// Check whether a kind has a registered pricer.
    pub fn contains(&self, kind: InstrumentKind) -> bool {
        self.pricers.contains_key(&kind)
    }

    /// Number of registered pricers.
    pub fn len(&self) -> usize {
        self.pricers.len()
    }

    /// Check if no pricer is registered.
    pub fn is_empty(&self) -> bool {
        self.pricers.is_empty()
    }
}

impl<T: Float, I: Instrument<T>> PricerRegistry<T, I> {
    /// Price an instrument under stressed parameters.
    pub fn price(&self, instrument: &I, params: &ParamSet<T>) -> T {
        match self.pricers.get(&instrument.kind()) {
            Some(pricer) => pricer(instrument, params),
            None => params.price().unwrap_or_else(T::zero),
        }
    }
}

impl<T: Float, I> fmt::Debug for PricerRegistry<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricerRegistry")
            .field("kinds", &self.pricers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Engine for running stress scenarios against a portfolio.
///
/// Stateless aside from its constructor inputs; every run produces fresh
/// results owned by the caller.
pub struct StressTestEngine<T: Float, I: Instrument<T>> {
    portfolio: Portfolio<T, I>,
    pricers: PricerRegistry<T, I>,
}

impl<T: Float, I: Instrument<T>> fmt::Debug for StressTestEngine<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StressTestEngine")
            .field("positions", &self.portfolio.len())
            .field("pricers", &self.pricers.len())
            .finish()
    }
}

impl<T, I> StressTestEngine<T, I>
where
    T: Float + Send + Sync,
    I: Instrument<T> + Sync,
{
    /// Create an engine over a portfolio and pricer registry.
    pub fn new(portfolio: Portfolio<T, I>, pricers: PricerRegistry<T, I>) -> Self {
        Self { portfolio, pricers }
    }

    /// The portfolio under test.
    pub fn portfolio(&self) -> &Portfolio<T, I> {
        &self.portfolio
    }

    /// The registered pricers.
    pub fn pricers(&self) -> &PricerRegistry<T, I> {
        &self.pricers
    }

    /// Run a single stress scenario.
    ///
    /// A panicking pricer aborts the whole run; no partial results are
    /// produced.
    pub fn run_scenario(&self, scenario: &StressScenario<T>) -> ScenarioResults<T> {
        if scenario.is_idiosyncratic() {
            return self.run_idiosyncratic_scenario(scenario);
        }

        let shock_points = scenario.shock_points();
        // Display axis: a single array shows its raw values; multi-array
        // scenarios show the price component (or first dimension) of each
        // point. P&L below always uses the full shock point.
        let stress_values: Vec<T> = if scenario.risk_arrays().len() == 1 {
            scenario.risk_arrays()[0].values().to_vec()
        } else {
            shock_points.iter().map(ShockPoint::display_value).collect()
        };

        debug!(
            scenario = scenario.name(),
            shock_points = shock_points.len(),
            positions = self.portfolio.len(),
            "running stress scenario"
        );

        let position_results: Vec<StressResult<T>> = self
            .portfolio
            .positions()
            .par_iter()
            .map(|position| {
                let pnl_values = self.position_pnl(position, &shock_points, scenario.factor());
                self.position_result(scenario.name(), position, stress_values.clone(), pnl_values)
            })
            .collect();

        let aggregation_results = aggregate_pnl(
            &position_results,
            scenario.aggregation_type(),
            scenario.factor(),
        );

        ScenarioResults {
            scenario_name: scenario.name().to_string(),
            stress_points: stress_values,
            position_results,
            aggregation_results,
        }
    }

    /// Run a scenario where each underlying carries its own risk array.
    ///
    /// Every position reports P&L against the canonical fraction axis; the
    /// dollar stress applied uses the position's own underlying values,
    /// index-aligned with that axis. Underlyings absent from the scenario
    /// get zero-filled P&L.
    fn run_idiosyncratic_scenario(&self, scenario: &StressScenario<T>) -> ScenarioResults<T> {
        let fraction_axis = scenario.fraction_axis();

        debug!(
            scenario = scenario.name(),
            underlyings = scenario.underlying_risk_arrays().len(),
            positions = self.portfolio.len(),
            "running idiosyncratic stress scenario"
        );

        let position_results: Vec<StressResult<T>> = self
            .portfolio
            .positions()
            .par_iter()
            .map(|position| {
                let underlying = position.instrument().underlying();
                let own_array = scenario
                    .arrays_for(underlying)
                    .and_then(|arrays| arrays.first());

                let pnl_values = match own_array {
                    None => vec![T::zero(); fraction_axis.len()],
                    Some(array) => {
                        let calculator = StressCalculator::for_relative(array.is_relative());
                        let points: Vec<ShockPoint<T>> = array
                            .values()
                            .iter()
                            .map(|&value| {
                                ShockPoint::new(vec![ShockEntry {
                                    dimension: array.dimension(),
                                    value,
                                    calculator,
                                }])
                            })
                            .collect();
                        self.position_pnl(position, &points, scenario.factor())
                    }
                };

                self.position_result(scenario.name(), position, fraction_axis.clone(), pnl_values)
            })
            .collect();

        let aggregation_results = aggregate_pnl(
            &position_results,
            scenario.aggregation_type(),
            scenario.factor(),
        );

        ScenarioResults {
            scenario_name: scenario.name().to_string(),
            stress_points: fraction_axis,
            position_results,
            aggregation_results,
        }
    }

    /// Run a batch of scenarios, one table per scenario name.
    ///
    /// # Errors
    ///
    /// [`ScenarioError::DuplicateScenarioName`] when two scenarios share a
    /// name; no scenario is run past the first duplicate.
    pub fn run_scenarios(
        &self,
        scenarios: &[StressScenario<T>],
    ) -> Result<HashMap<String, ScenarioTable>, ScenarioError>
    where
        T: fmt::Display,
    {
        let mut tables = HashMap::with_capacity(scenarios.len());
        for scenario in scenarios {
            if tables.contains_key(scenario.name()) {
                return Err(ScenarioError::DuplicateScenarioName(
                    scenario.name().to_string(),
                ));
            }
            let results = self.run_scenario(scenario);
            tables.insert(
                scenario.name().to_string(),
                ScenarioTable::from_results(&results),
            );
        }
        Ok(tables)
    }

    /// P&L of one position across a sequence of shock points.
    fn position_pnl(
        &self,
        position: &Position<T, I>,
        shock_points: &[ShockPoint<T>],
        factor: Option<&Factor<T>>,
    ) -> Vec<T> {
        let instrument = position.instrument();
        let base_params = ParamSet::of(instrument);
        let base_value = position.quantity() * base_unit_price(instrument);

        shock_points
            .iter()
            .map(|point| {
                let stressed =
                    apply_stress(&base_params, point, instrument.underlying(), factor);
                let stressed_unit = self.pricers.price(instrument, &stressed);
                position.quantity() * stressed_unit - base_value
            })
            .collect()
    }

    fn position_result(
        &self,
        scenario_name: &str,
        position: &Position<T, I>,
        stress_points: Vec<T>,
        pnl_values: Vec<T>,
    ) -> StressResult<T> {
        let instrument = position.instrument();
        StressResult {
            scenario_name: scenario_name.to_string(),
            position_id: position.id().to_string(),
            underlying: instrument.underlying().to_string(),
            instrument_kind: instrument.kind(),
            quantity: position.quantity(),
            base_value: position.quantity() * base_unit_price(instrument),
            stress_points,
            pnl_values,
        }
    }
}

/// Unshocked unit price, zero when the instrument exposes none.
fn base_unit_price<T: Float, I: Instrument<T>>(instrument: &I) -> T {
    instrument.price().unwrap_or_else(T::zero)
}

/// Apply one shock point to a base parameter set.
///
/// Dimensions absent from the base set are no-ops. Time decays by clamped
/// subtraction without the factor multiplier; every other dimension goes
/// through the entry's calculator scaled by the factor multiplier for the
/// instrument's underlying.
fn apply_stress<T: Float>(
    base: &ParamSet<T>,
    point: &ShockPoint<T>,
    underlying: &str,
    factor: Option<&Factor<T>>,
) -> ParamSet<T> {
    let mut stressed = *base;
    for entry in point.entries() {
        if let Some(base_value) = base.get(entry.dimension) {
            if entry.dimension.is_decay() {
                stressed.set(entry.dimension, decayed_time(base_value, entry.value));
            } else {
                let multiplier = factor
                    .map(|f| f.factor_for(underlying))
                    .unwrap_or_else(T::one);
                stressed.set(
                    entry.dimension,
                    entry.calculator.stressed_value(base_value, entry.value, multiplier),
                );
            }
        }
    }
    stressed
}
