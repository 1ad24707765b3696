//! Stress scenario definition and shock-point expansion.
//!
//! A scenario is a declarative description of a stress test: which
//! dimensions to shock (globally or per underlying), how to aggregate, and
//! an optional factor table. Scenarios are immutable once built; the
//! validating builder is the only way to construct one.

use stress_core::{AggregationType, Factor, Float, RiskArray, RiskDimension, StressCalculator};

use crate::error::ScenarioError;

/// One dimension's contribution to a shock point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShockEntry<T: Float> {
    /// The dimension being shocked.
    pub dimension: RiskDimension,
    /// The shock value.
    pub value: T,
    /// How the shock perturbs the base parameter.
    pub calculator: StressCalculator,
}

/// A complete assignment of shock values across all active dimensions.
///
/// Entries keep the order of the originating risk arrays, so the first
/// entry belongs to the scenario's first (slowest-varying) array.
#[derive(Clone, Debug, PartialEq)]
pub struct ShockPoint<T: Float> {
    entries: Vec<ShockEntry<T>>,
}

impl<T: Float> ShockPoint<T> {
    /// Create a shock point from ordered entries.
    pub fn new(entries: Vec<ShockEntry<T>>) -> Self {
        Self { entries }
    }

    /// The entries, in risk-array order.
    pub fn entries(&self) -> &[ShockEntry<T>] {
        &self.entries
    }

    /// Shock value for a dimension, if the point targets it.
    pub fn value_for(&self, dimension: RiskDimension) -> Option<T> {
        self.entries
            .iter()
            .find(|e| e.dimension == dimension)
            .map(|e| e.value)
    }

    /// Representative value for one-dimensional display axes.
    ///
    /// Prefers the price component when present, otherwise the first
    /// dimension's value. P&L always uses the full shock point.
    pub fn display_value(&self) -> T {
        self.value_for(RiskDimension::Price)
            .or_else(|| self.entries.first().map(|e| e.value))
            .unwrap_or_else(T::zero)
    }

    /// Number of shocked dimensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the point shocks no dimension.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A declarative stress test description.
///
/// Exactly one of the shared `risk_arrays` or the per-underlying mapping is
/// populated; a populated per-underlying mapping selects idiosyncratic
/// evaluation. Built through [`StressScenarioBuilder`].
#[derive(Clone, Debug)]
pub struct StressScenario<T: Float> {
    name: String,
    risk_arrays: Vec<RiskArray<T>>,
    factor: Option<Factor<T>>,
    aggregation_type: AggregationType,
    underlying_risk_arrays: Vec<(String, Vec<RiskArray<T>>)>,
}

impl<T: Float> StressScenario<T> {
    /// Start building a scenario.
    pub fn builder(name: impl Into<String>) -> StressScenarioBuilder<T> {
        StressScenarioBuilder::new(name)
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared risk arrays (empty in idiosyncratic mode).
    pub fn risk_arrays(&self) -> &[RiskArray<T>] {
        &self.risk_arrays
    }

    /// Attached factor table, if any.
    pub fn factor(&self) -> Option<&Factor<T>> {
        self.factor.as_ref()
    }

    /// Aggregation policy for position P&L.
    pub fn aggregation_type(&self) -> AggregationType {
        self.aggregation_type
    }

    /// Per-underlying risk arrays, in insertion order (idiosyncratic mode).
    pub fn underlying_risk_arrays(&self) -> &[(String, Vec<RiskArray<T>>)] {
        &self.underlying_risk_arrays
    }

    /// Whether each underlying carries its own risk arrays.
    pub fn is_idiosyncratic(&self) -> bool {
        !self.underlying_risk_arrays.is_empty()
    }

    /// Risk arrays for one underlying, if the scenario defines them.
    pub fn arrays_for(&self, symbol: &str) -> Option<&[RiskArray<T>]> {
        self.underlying_risk_arrays
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, arrays)| arrays.as_slice())
    }

    /// Expand the shared risk arrays into ordered shock points.
    ///
    /// A single array yields one point per value in array order. Multiple
    /// arrays yield their cartesian product with the first array varying
    /// slowest and the last fastest; downstream reporting zips shock points
    /// back to flat indices, so this order is load-bearing. Idiosyncratic
    /// scenarios expand per underlying instead and yield nothing here.
    pub fn shock_points(&self) -> Vec<ShockPoint<T>> {
        if self.is_idiosyncratic() || self.risk_arrays.is_empty() {
            return Vec::new();
        }
        if self.risk_arrays.iter().any(RiskArray::is_empty) {
            // An empty axis makes the whole product empty
            return Vec::new();
        }

        let total: usize = self.risk_arrays.iter().map(RiskArray::len).product();
        let mut points = Vec::with_capacity(total);
        let mut cursor = vec![0usize; self.risk_arrays.len()];

        for _ in 0..total {
            let entries = self
                .risk_arrays
                .iter()
                .zip(cursor.iter())
                .map(|(array, &i)| ShockEntry {
                    dimension: array.dimension(),
                    value: array.values()[i],
                    calculator: StressCalculator::for_relative(array.is_relative()),
                })
                .collect();
            points.push(ShockPoint::new(entries));

            // Odometer advance: last array ticks fastest
            for slot in (0..cursor.len()).rev() {
                cursor[slot] += 1;
                if cursor[slot] < self.risk_arrays[slot].len() {
                    break;
                }
                cursor[slot] = 0;
            }
        }
        points
    }

    /// Canonical display axis for idiosyncratic scenarios.
    ///
    /// Different underlyings carry different absolute shocks for the same
    /// relative stress, so the reporting axis is the first underlying's
    /// array normalized by its largest absolute value. A degenerate
    /// (all-zero or missing) first array falls back to `{-1, 1}`.
    pub fn fraction_axis(&self) -> Vec<T> {
        let first = self
            .underlying_risk_arrays
            .first()
            .and_then(|(_, arrays)| arrays.first());

        if let Some(array) = first {
            let max_abs = array.max_abs();
            if max_abs > T::zero() {
                return array.values().iter().map(|v| *v / max_abs).collect();
            }
        }
        vec![-T::one(), T::one()]
    }
}

/// Validating builder for [`StressScenario`].
#[derive(Clone, Debug)]
pub struct StressScenarioBuilder<T: Float> {
    name: String,
    risk_arrays: Vec<RiskArray<T>>,
    factor: Option<Factor<T>>,
    aggregation_type: AggregationType,
    underlying_risk_arrays: Vec<(String, Vec<RiskArray<T>>)>,
}

impl<T: Float> StressScenarioBuilder<T> {
    /// Create a builder for a named scenario.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            risk_arrays: Vec::new(),
            factor: None,
            aggregation_type: AggregationType::default(),
            underlying_risk_arrays: Vec::new(),
        }
    }

    /// Add a shared risk array.
    pub fn with_risk_array(mut self, array: RiskArray<T>) -> Self {
        self.risk_arrays.push(array);
        self
    }

    /// Add multiple shared risk arrays.
    pub fn with_risk_arrays(mut self, arrays: impl IntoIterator<Item = RiskArray<T>>) -> Self {
        self.risk_arrays.extend(arrays);
        self
    }

    /// Attach a factor table.
    pub fn with_factor(mut self, factor: Factor<T>) -> Self {
        self.factor = Some(factor);
        self
    }

    /// Set the aggregation policy.
    pub fn with_aggregation(mut self, aggregation_type: AggregationType) -> Self {
        self.aggregation_type = aggregation_type;
        self
    }

    /// Add per-underlying risk arrays (selects idiosyncratic mode).
    ///
    /// Insertion order is kept; the first underlying added defines the
    /// canonical fraction axis.
    pub fn with_underlying_risk_arrays(
        mut self,
        symbol: impl Into<String>,
        arrays: Vec<RiskArray<T>>,
    ) -> Self {
        self.underlying_risk_arrays.push((symbol.into(), arrays));
        self
    }

    /// Validate and build the scenario.
    ///
    /// # Errors
    ///
    /// - [`ScenarioError::MixedScenarioMode`] when both shared and
    ///   per-underlying arrays were added
    /// - [`ScenarioError::EmptyScenario`] when neither was added
    pub fn build(self) -> Result<StressScenario<T>, ScenarioError> {
        if !self.risk_arrays.is_empty() && !self.underlying_risk_arrays.is_empty() {
            return Err(ScenarioError::MixedScenarioMode(self.name));
        }
        if self.risk_arrays.is_empty() && self.underlying_risk_arrays.is_empty() {
            return Err(ScenarioError::EmptyScenario(self.name));
        }
        Ok(StressScenario {
            name: self.name,
            risk_arrays: self.risk_arrays,
            factor: self.factor,
            aggregation_type: self.aggregation_type,
            underlying_risk_arrays: self.underlying_risk_arrays,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn price_array(values: Vec<f64>) -> RiskArray<f64> {
        RiskArray::custom(RiskDimension::Price, values, true)
    }

    #[test]
    fn test_builder_rejects_mixed_mode() {
        let err = StressScenario::builder("mixed")
            .with_risk_array(price_array(vec![0.05]))
            .with_underlying_risk_arrays("AAPL", vec![price_array(vec![0.1])])
            .build()
            .unwrap_err();

        assert!(matches!(err, ScenarioError::MixedScenarioMode(_)));
    }

    #[test]
    fn test_builder_rejects_empty_scenario() {
        let err = StressScenario::<f64>::builder("noop").build().unwrap_err();

        assert!(matches!(err, ScenarioError::EmptyScenario(_)));
    }

    #[test]
    fn test_single_array_expansion_preserves_order() {
        let scenario = StressScenario::builder("price")
            .with_risk_array(price_array(vec![-0.05, 0.0, 0.05]))
            .build()
            .unwrap();

        let points = scenario.shock_points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].value_for(RiskDimension::Price), Some(-0.05));
        assert_eq!(points[1].value_for(RiskDimension::Price), Some(0.0));
        assert_eq!(points[2].value_for(RiskDimension::Price), Some(0.05));
    }

    #[test]
    fn test_cartesian_expansion_first_array_slowest() {
        let scenario = StressScenario::builder("price_vol")
            .with_risk_array(price_array(vec![-0.1, 0.1]))
            .with_risk_array(RiskArray::custom(
                RiskDimension::Volatility,
                vec![-0.02, 0.0, 0.02],
                true,
            ))
            .build()
            .unwrap();

        let points = scenario.shock_points();
        assert_eq!(points.len(), 6);

        let flat: Vec<(f64, f64)> = points
            .iter()
            .map(|p| {
                (
                    p.value_for(RiskDimension::Price).unwrap(),
                    p.value_for(RiskDimension::Volatility).unwrap(),
                )
            })
            .collect();
        assert_eq!(
            flat,
            vec![
                (-0.1, -0.02),
                (-0.1, 0.0),
                (-0.1, 0.02),
                (0.1, -0.02),
                (0.1, 0.0),
                (0.1, 0.02),
            ]
        );
    }

    #[test]
    fn test_expansion_carries_calculator_per_array() {
        let scenario = StressScenario::builder("mixed_semantics")
            .with_risk_array(price_array(vec![0.05]))
            .with_risk_array(RiskArray::custom(
                RiskDimension::InterestRate,
                vec![0.01],
                false,
            ))
            .build()
            .unwrap();

        let points = scenario.shock_points();
        assert_eq!(points[0].entries()[0].calculator, StressCalculator::Relative);
        assert_eq!(points[0].entries()[1].calculator, StressCalculator::Absolute);
    }

    #[test]
    fn test_empty_axis_yields_no_points() {
        let scenario = StressScenario::builder("degenerate")
            .with_risk_array(price_array(vec![0.05]))
            .with_risk_array(RiskArray::custom(RiskDimension::Volatility, vec![], true))
            .build()
            .unwrap();

        assert!(scenario.shock_points().is_empty());
    }

    #[test]
    fn test_display_value_prefers_price() {
        let scenario = StressScenario::builder("vol_price")
            .with_risk_array(RiskArray::custom(
                RiskDimension::Volatility,
                vec![0.02],
                true,
            ))
            .with_risk_array(price_array(vec![0.05]))
            .build()
            .unwrap();

        let points = scenario.shock_points();
        assert_eq!(points[0].display_value(), 0.05);
    }

    #[test]
    fn test_display_value_falls_back_to_first_dimension() {
        let scenario = StressScenario::builder("vol_rate")
            .with_risk_array(RiskArray::custom(
                RiskDimension::Volatility,
                vec![0.02],
                true,
            ))
            .with_risk_array(RiskArray::custom(
                RiskDimension::InterestRate,
                vec![0.01],
                false,
            ))
            .build()
            .unwrap();

        let points = scenario.shock_points();
        assert_eq!(points[0].display_value(), 0.02);
    }

    #[test]
    fn test_fraction_axis_normalizes_first_underlying() {
        let scenario = StressScenario::builder("epr")
            .with_underlying_risk_arrays("AAPL", vec![price_array(vec![-0.2, -0.1, 0.1, 0.2])])
            .with_underlying_risk_arrays("NVDA", vec![price_array(vec![-0.4, -0.2, 0.2, 0.4])])
            .build()
            .unwrap();

        assert_eq!(scenario.fraction_axis(), vec![-1.0, -0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_fraction_axis_zero_max_falls_back() {
        let scenario = StressScenario::builder("flat")
            .with_underlying_risk_arrays("AAPL", vec![price_array(vec![0.0, 0.0])])
            .build()
            .unwrap();

        assert_eq!(scenario.fraction_axis(), vec![-1.0, 1.0]);
    }

    #[test]
    fn test_arrays_for_lookup() {
        let scenario = StressScenario::builder("epr")
            .with_underlying_risk_arrays("AAPL", vec![price_array(vec![-0.2, 0.2])])
            .build()
            .unwrap();

        assert!(scenario.is_idiosyncratic());
        assert!(scenario.arrays_for("AAPL").is_some());
        assert!(scenario.arrays_for("MSFT").is_none());
    }

    proptest! {
        #[test]
        fn prop_cartesian_size_is_product(
            m in 1usize..6,
            n in 1usize..6,
            k in 1usize..4,
        ) {
            let scenario = StressScenario::builder("prod")
                .with_risk_array(price_array((0..m).map(|i| i as f64 * 0.01).collect()))
                .with_risk_array(RiskArray::custom(
                    RiskDimension::Volatility,
                    (0..n).map(|i| i as f64 * 0.01).collect(),
                    true,
                ))
                .with_risk_array(RiskArray::custom(
                    RiskDimension::Time,
                    (0..k).map(|i| i as f64).collect(),
                    false,
                ))
                .build()
                .unwrap();

            prop_assert_eq!(scenario.shock_points().len(), m * n * k);
        }

        #[test]
        fn prop_first_array_varies_slowest(
            m in 2usize..5,
            n in 2usize..5,
        ) {
            let scenario = StressScenario::builder("order")
                .with_risk_array(price_array((0..m).map(|i| i as f64).collect()))
                .with_risk_array(RiskArray::custom(
                    RiskDimension::Volatility,
                    (0..n).map(|i| i as f64).collect(),
                    true,
                ))
                .build()
                .unwrap();

            let points = scenario.shock_points();
            for (flat, point) in points.iter().enumerate() {
                let price = point.value_for(RiskDimension::Price).unwrap();
                let vol = point.value_for(RiskDimension::Volatility).unwrap();
                prop_assert_eq!(price as usize, flat / n);
                prop_assert_eq!(vol as usize, flat % n);
            }
        }
    }
}
