//! Risk dimensions and aggregation policies.

use serde::{Deserialize, Serialize};

/// Named axes along which stress shocks apply.
///
/// Each dimension maps 1:1 to a named instrument parameter; the mapping is
/// exposed through [`RiskDimension::param_name`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskDimension {
    /// Underlying price.
    Price,
    /// Implied volatility.
    Volatility,
    /// Time to expiry (day decay).
    Time,
    /// Risk-free interest rate.
    InterestRate,
    /// Dividend yield.
    DividendYield,
}

impl RiskDimension {
    /// All dimensions, in canonical order.
    pub const ALL: [RiskDimension; 5] = [
        RiskDimension::Price,
        RiskDimension::Volatility,
        RiskDimension::Time,
        RiskDimension::InterestRate,
        RiskDimension::DividendYield,
    ];

    /// Name of the instrument parameter this dimension shocks.
    pub fn param_name(&self) -> &'static str {
        match self {
            RiskDimension::Price => "price",
            RiskDimension::Volatility => "volatility",
            RiskDimension::Time => "time",
            RiskDimension::InterestRate => "interest_rate",
            RiskDimension::DividendYield => "dividend_yield",
        }
    }

    /// Returns true for the time-decay dimension.
    ///
    /// Time is shocked by clamped subtraction rather than through the
    /// relative/absolute calculators.
    #[inline]
    pub fn is_decay(&self) -> bool {
        matches!(self, RiskDimension::Time)
    }
}

/// How per-position P&L arrays are summed into reporting buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AggregationType {
    /// One bucket per underlying symbol.
    #[default]
    ByUnderlying,
    /// Single bucket keyed by the scenario's factor name.
    ByFactor,
    /// Single `"total"` bucket across the whole portfolio.
    Total,
}

impl AggregationType {
    /// Get the name of this aggregation policy.
    pub fn name(&self) -> &'static str {
        match self {
            AggregationType::ByUnderlying => "by_underlying",
            AggregationType::ByFactor => "by_factor",
            AggregationType::Total => "total",
        }
    }
}
