//! Per-underlying shock multiplier tables.

use serde::{Deserialize, Serialize};

use crate::traits::Float;

/// A per-underlying multiplier table used to scale shocks (e.g. beta).
///
/// Lookup never fails: unknown symbols map to the neutral multiplier `1.0`.
/// The table keeps insertion order so reporting over it is deterministic.
///
/// # Examples
/// ```
/// use stress_core::types::Factor;
///
/// let beta = Factor::new("beta")
///     .with_underlying("AAPL", 1.2_f64)
///     .with_underlying("KO", 0.6)
///     .with_benchmark("SPX");
///
/// assert_eq!(beta.factor_for("KO"), 0.6);
/// assert_eq!(beta.factor_for("MSFT"), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Factor<T: Float> {
    name: String,
    underlying_factors: Vec<(String, T)>,
    benchmark_symbol: Option<String>,
}

impl<T: Float> Factor<T> {
    /// Create an empty factor table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            underlying_factors: Vec::new(),
            benchmark_symbol: None,
        }
    }

    /// Add (or replace) the multiplier for one underlying.
    pub fn with_underlying(mut self, symbol: impl Into<String>, value: T) -> Self {
        let symbol = symbol.into();
        match self
            .underlying_factors
            .iter_mut()
            .find(|(s, _)| *s == symbol)
        {
            Some(entry) => entry.1 = value,
            None => self.underlying_factors.push((symbol, value)),
        }
        self
    }

    /// Set the benchmark symbol the multipliers are measured against.
    pub fn with_benchmark(mut self, symbol: impl Into<String>) -> Self {
        self.benchmark_symbol = Some(symbol.into());
        self
    }

    /// Factor name (e.g. `"beta"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Benchmark symbol, if one was set.
    pub fn benchmark_symbol(&self) -> Option<&str> {
        self.benchmark_symbol.as_deref()
    }

    /// The multiplier table, in insertion order.
    pub fn underlying_factors(&self) -> &[(String, T)] {
        &self.underlying_factors
    }

    /// Multiplier for a symbol, `1.0` when the symbol is absent.
    pub fn factor_for(&self, symbol: &str) -> T {
        self.underlying_factors
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, v)| *v)
            .unwrap_or_else(T::one)
    }

    /// Number of underlyings in the table.
    pub fn len(&self) -> usize {
        self.underlying_factors.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.underlying_factors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_lookup() {
        let factor = Factor::new("beta").with_underlying("AAPL", 0.5_f64);

        assert_eq!(factor.factor_for("AAPL"), 0.5);
    }

    #[test]
    fn test_unknown_symbol_is_neutral() {
        let factor = Factor::new("beta").with_underlying("AAPL", 0.5_f64);

        assert_eq!(factor.factor_for("MSFT"), 1.0);
    }

    #[test]
    fn test_empty_factor_is_neutral_everywhere() {
        let factor = Factor::<f64>::new("beta");

        assert!(factor.is_empty());
        assert_eq!(factor.factor_for("anything"), 1.0);
    }

    #[test]
    fn test_with_underlying_replaces() {
        let factor = Factor::new("beta")
            .with_underlying("AAPL", 0.5_f64)
            .with_underlying("AAPL", 0.8);

        assert_eq!(factor.len(), 1);
        assert_eq!(factor.factor_for("AAPL"), 0.8);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let factor = Factor::new("beta")
            .with_underlying("NVDA", 1.8_f64)
            .with_underlying("AAPL", 1.2)
            .with_underlying("KO", 0.6);

        let symbols: Vec<&str> = factor
            .underlying_factors()
            .iter()
            .map(|(s, _)| s.as_str())
            .collect();
        assert_eq!(symbols, vec!["NVDA", "AAPL", "KO"]);
    }

    #[test]
    fn test_benchmark_symbol() {
        let factor = Factor::<f64>::new("beta").with_benchmark("SPX");

        assert_eq!(factor.benchmark_symbol(), Some("SPX"));
        assert_eq!(Factor::<f64>::new("x").benchmark_symbol(), None);
    }
}
