//! Stress calculators: how a shock value perturbs a base parameter.

use serde::{Deserialize, Serialize};

use crate::traits::Float;

/// Stress application semantics for one risk array.
///
/// Selected from [`RiskArray::is_relative`](super::RiskArray::is_relative):
/// relative arrays hold fractional shocks, absolute arrays hold offsets.
/// The factor multiplier scales the shock in both cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressCalculator {
    /// `stressed = base × (1 + shock × multiplier)`
    Relative,
    /// `stressed = base + shock × multiplier`
    Absolute,
}

impl StressCalculator {
    /// Calculator for a risk array's relativity flag.
    pub fn for_relative(is_relative: bool) -> Self {
        if is_relative {
            StressCalculator::Relative
        } else {
            StressCalculator::Absolute
        }
    }

    /// Apply a shock to a base value.
    pub fn stressed_value<T: Float>(&self, base: T, shock: T, multiplier: T) -> T {
        match self {
            StressCalculator::Relative => base * (T::one() + shock * multiplier),
            StressCalculator::Absolute => base + shock * multiplier,
        }
    }
}

/// Time decay: absolute, non-negative-clamped subtraction.
///
/// Time always moves forward, so the shock is subtracted and the result
/// floors at zero. Factor multipliers do not apply to time.
pub fn decayed_time<T: Float>(base: T, shock: T) -> T {
    (base - shock).max(T::zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_relative_calculator() {
        let stressed = StressCalculator::Relative.stressed_value(100.0_f64, 0.05, 1.0);
        assert_relative_eq!(stressed, 105.0, epsilon = 1e-12);
    }

    #[test]
    fn test_relative_calculator_with_multiplier() {
        // beta 0.5 halves the effective shock
        let stressed = StressCalculator::Relative.stressed_value(100.0_f64, 0.05, 0.5);
        assert_relative_eq!(stressed, 102.5, epsilon = 1e-12);
    }

    #[test]
    fn test_absolute_calculator() {
        let stressed = StressCalculator::Absolute.stressed_value(0.04_f64, 0.01, 1.0);
        assert_relative_eq!(stressed, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_absolute_calculator_with_multiplier() {
        let stressed = StressCalculator::Absolute.stressed_value(0.30_f64, -0.10, 0.5);
        assert_relative_eq!(stressed, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_for_relative_flag() {
        assert_eq!(
            StressCalculator::for_relative(true),
            StressCalculator::Relative
        );
        assert_eq!(
            StressCalculator::for_relative(false),
            StressCalculator::Absolute
        );
    }

    #[test]
    fn test_decayed_time() {
        assert_relative_eq!(decayed_time(30.0_f64, 7.0), 23.0, epsilon = 1e-12);
    }

    #[test]
    fn test_decayed_time_floors_at_zero() {
        // Shocking past expiry yields exactly zero, never negative
        assert_eq!(decayed_time(5.0_f64, 10.0), 0.0);
        assert_eq!(decayed_time(0.0_f64, 1.0), 0.0);
    }
}
