//! Ordered shock values along one risk dimension.

use serde::{Deserialize, Serialize};

use super::dimension::RiskDimension;
use crate::traits::Float;

/// An ordered sequence of shock values for one risk dimension.
///
/// `is_relative` selects the stress semantics: `true` means the values are
/// fractional shocks (0.05 = +5%), `false` means absolute offsets. Values
/// carry no meaning outside their dimension.
///
/// # Examples
/// ```
/// use stress_core::types::{RiskArray, RiskDimension};
///
/// let vol = RiskArray::custom(RiskDimension::Volatility, vec![-0.02_f64, 0.02], false);
/// assert!(!vol.is_relative());
/// assert_eq!(vol.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskArray<T: Float> {
    dimension: RiskDimension,
    values: Vec<T>,
    is_relative: bool,
}

impl<T: Float> RiskArray<T> {
    /// Create an equidistant, relative risk array.
    ///
    /// Produces `n_down` values `{-n_down·step, …, -step}`, optionally `0`,
    /// then `n_up` values `{step, …, n_up·step}`, in ascending order.
    ///
    /// `n_up = 0, n_down = 0, include_base = false` yields an empty array;
    /// the engine treats an empty shock axis as zero stress points.
    pub fn equidistant(
        dimension: RiskDimension,
        n_up: usize,
        n_down: usize,
        step_pct: T,
        include_base: bool,
    ) -> Self {
        let mut values = Vec::with_capacity(n_down + n_up + usize::from(include_base));
        for i in (1..=n_down).rev() {
            let scale = T::from(i).unwrap_or_else(T::zero);
            values.push(-(step_pct * scale));
        }
        if include_base {
            values.push(T::zero());
        }
        for i in 1..=n_up {
            let scale = T::from(i).unwrap_or_else(T::zero);
            values.push(step_pct * scale);
        }
        Self {
            dimension,
            values,
            is_relative: true,
        }
    }

    /// Create a risk array from caller-ordered values, taken verbatim.
    pub fn custom(dimension: RiskDimension, values: Vec<T>, is_relative: bool) -> Self {
        Self {
            dimension,
            values,
            is_relative,
        }
    }

    /// The dimension these shocks apply to.
    pub fn dimension(&self) -> RiskDimension {
        self.dimension
    }

    /// The shock values, in evaluation order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Whether the values are fractional (relative) shocks.
    pub fn is_relative(&self) -> bool {
        self.is_relative
    }

    /// Number of shock values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the array holds no shock values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest absolute shock value, zero for an empty array.
    pub fn max_abs(&self) -> T {
        self.values
            .iter()
            .map(|v| v.abs())
            .fold(T::zero(), T::max)
    }
}
