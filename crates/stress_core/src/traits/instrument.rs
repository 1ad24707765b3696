//! Instrument capability trait and stress parameter set.
//!
//! Instruments are opaque to the engine: all it needs is a kind tag for
//! pricer lookup, an underlying symbol for grouping, and whichever of the
//! five named parameters the instrument exposes. Parameters are a capability
//! query, not a contract: an accessor returning `None` means the dimension is
//! a no-op for that instrument.

use serde::Serialize;

use super::Float;
use crate::types::RiskDimension;

/// Tag identifying an instrument kind for pricer registry lookup.
///
/// Kinds are interned string tags rather than a closed enum so callers can
/// plug in instrument types this crate has never heard of. Common kinds are
/// provided as constants.
///
/// # Examples
/// ```
/// use stress_core::InstrumentKind;
///
/// let custom = InstrumentKind::new("variance_swap");
/// assert_ne!(custom, InstrumentKind::EQUITY);
/// assert_eq!(custom.as_str(), "variance_swap");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct InstrumentKind(&'static str);

impl InstrumentKind {
    /// Cash equity.
    pub const EQUITY: InstrumentKind = InstrumentKind("equity");
    /// Listed option.
    pub const OPTION: InstrumentKind = InstrumentKind("option");
    /// Futures contract.
    pub const FUTURE: InstrumentKind = InstrumentKind("future");

    /// Create a kind tag from a static string.
    pub const fn new(tag: &'static str) -> Self {
        InstrumentKind(tag)
    }

    /// Get the tag as a string slice.
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Capability interface the engine prices against.
///
/// Implementors declare their kind tag and underlying symbol, and override
/// the parameter accessors for whichever of the five stress parameters they
/// carry. The defaults return `None`, so a minimal implementation is two
/// methods.
///
/// An instrument exposing no parameters at all still participates in a
/// scenario run; it reprices through the pricer's fallback behaviour.
pub trait Instrument<T: Float> {
    /// Kind tag used to select a pricer from the registry.
    fn kind(&self) -> InstrumentKind;

    /// Underlying symbol used for grouping and factor lookup.
    ///
    /// For delta-one instruments this is the instrument's own symbol.
    fn underlying(&self) -> &str;

    /// Current unit price.
    fn price(&self) -> Option<T> {
        None
    }

    /// Implied volatility.
    fn volatility(&self) -> Option<T> {
        None
    }

    /// Remaining time, in days to expiry.
    fn time(&self) -> Option<T> {
        None
    }

    /// Risk-free rate.
    fn interest_rate(&self) -> Option<T> {
        None
    }

    /// Continuous dividend yield.
    fn dividend_yield(&self) -> Option<T> {
        None
    }
}

/// The five named stress parameters of one instrument.
///
/// Built by probing an [`Instrument`]'s capabilities; absent parameters stay
/// `None` and pass through stress application untouched. Pricers receive a
/// stressed `ParamSet` and read whichever parameters they price off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSet<T: Float> {
    price: Option<T>,
    volatility: Option<T>,
    time: Option<T>,
    interest_rate: Option<T>,
    dividend_yield: Option<T>,
}

impl<T: Float> Default for ParamSet<T> {
    fn default() -> Self {
        Self {
            price: None,
            volatility: None,
            time: None,
            interest_rate: None,
            dividend_yield: None,
        }
    }
}

impl<T: Float> ParamSet<T> {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the parameters an instrument exposes.
    pub fn of<I: Instrument<T>>(instrument: &I) -> Self {
        Self {
            price: instrument.price(),
            volatility: instrument.volatility(),
            time: instrument.time(),
            interest_rate: instrument.interest_rate(),
            dividend_yield: instrument.dividend_yield(),
        }
    }

    /// Get the parameter for a risk dimension, if present.
    pub fn get(&self, dimension: RiskDimension) -> Option<T> {
        match dimension {
            RiskDimension::Price => self.price,
            RiskDimension::Volatility => self.volatility,
            RiskDimension::Time => self.time,
            RiskDimension::InterestRate => self.interest_rate,
            RiskDimension::DividendYield => self.dividend_yield,
        }
    }

    /// Set the parameter for a risk dimension.
    pub fn set(&mut self, dimension: RiskDimension, value: T) {
        match dimension {
            RiskDimension::Price => self.price = Some(value),
            RiskDimension::Volatility => self.volatility = Some(value),
            RiskDimension::Time => self.time = Some(value),
            RiskDimension::InterestRate => self.interest_rate = Some(value),
            RiskDimension::DividendYield => self.dividend_yield = Some(value),
        }
    }

    /// Unit price, if the instrument exposes one.
    pub fn price(&self) -> Option<T> {
        self.price
    }

    /// Implied volatility, if exposed.
    pub fn volatility(&self) -> Option<T> {
        self.volatility
    }

    /// Days to expiry, if exposed.
    pub fn time(&self) -> Option<T> {
        self.time
    }

    /// Risk-free rate, if exposed.
    pub fn interest_rate(&self) -> Option<T> {
        self.interest_rate
    }

    /// Dividend yield, if exposed.
    pub fn dividend_yield(&self) -> Option<T> {
        self.dividend_yield
    }

    /// Number of parameters present.
    pub fn len(&self) -> usize {
        RiskDimension::ALL
            .iter()
            .filter(|d| self.get(**d).is_some())
            .count()
    }

    /// Check whether no parameter is present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stock {
        symbol: String,
        price: f64,
    }

    impl Instrument<f64> for Stock {
        fn kind(&self) -> InstrumentKind {
            InstrumentKind::EQUITY
        }

        fn underlying(&self) -> &str {
            &self.symbol
        }

        fn price(&self) -> Option<f64> {
            Some(self.price)
        }
    }

    struct Opaque;

    impl Instrument<f64> for Opaque {
        fn kind(&self) -> InstrumentKind {
            InstrumentKind::new("opaque")
        }

        fn underlying(&self) -> &str {
            "OPQ"
        }
    }

    #[test]
    fn test_instrument_kind_constants() {
        assert_eq!(InstrumentKind::EQUITY.as_str(), "equity");
        assert_eq!(InstrumentKind::OPTION.as_str(), "option");
        assert_ne!(InstrumentKind::EQUITY, InstrumentKind::OPTION);
    }

    #[test]
    fn test_instrument_kind_display() {
        assert_eq!(format!("{}", InstrumentKind::FUTURE), "future");
    }

    #[test]
    fn test_param_set_of_partial_instrument() {
        let stock = Stock {
            symbol: "AAPL".to_string(),
            price: 280.0,
        };
        let params = ParamSet::of(&stock);

        assert_eq!(params.get(RiskDimension::Price), Some(280.0));
        assert_eq!(params.get(RiskDimension::Volatility), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_param_set_of_opaque_instrument() {
        let params = ParamSet::<f64>::of(&Opaque);
        assert!(params.is_empty());
    }

    #[test]
    fn test_param_set_set_and_get() {
        let mut params = ParamSet::<f64>::new();
        params.set(RiskDimension::Volatility, 0.3);
        params.set(RiskDimension::Time, 30.0);

        assert_eq!(params.volatility(), Some(0.3));
        assert_eq!(params.time(), Some(30.0));
        assert_eq!(params.price(), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_param_set_set_overwrites() {
        let mut params = ParamSet::<f64>::new();
        params.set(RiskDimension::Price, 100.0);
        params.set(RiskDimension::Price, 105.0);

        assert_eq!(params.price(), Some(105.0));
        assert_eq!(params.len(), 1);
    }
}
