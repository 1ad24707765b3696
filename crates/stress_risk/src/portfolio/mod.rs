//! Portfolio and position records.
//!
//! Thin ordered containers over caller-supplied instruments. The engine only
//! reads them; construction and ownership stay with the caller.

use stress_core::{Float, Instrument};

/// One holding: an instrument and a signed quantity.
#[derive(Clone, Debug)]
pub struct Position<T: Float, I: Instrument<T>> {
    id: String,
    instrument: I,
    quantity: T,
}

impl<T: Float, I: Instrument<T>> Position<T, I> {
    /// Create a position.
    pub fn new(id: impl Into<String>, instrument: I, quantity: T) -> Self {
        Self {
            id: id.into(),
            instrument,
            quantity,
        }
    }

    /// Position identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The held instrument.
    pub fn instrument(&self) -> &I {
        &self.instrument
    }

    /// Signed quantity (negative for shorts).
    pub fn quantity(&self) -> T {
        self.quantity
    }
}

/// An ordered collection of positions.
///
/// Position order is preserved; results are reported in the same order.
#[derive(Clone, Debug)]
pub struct Portfolio<T: Float, I: Instrument<T>> {
    positions: Vec<Position<T, I>>,
}

impl<T: Float, I: Instrument<T>> Default for Portfolio<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float, I: Instrument<T>> Portfolio<T, I> {
    /// Create an empty portfolio.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
        }
    }

    /// Add a position.
    pub fn with_position(mut self, position: Position<T, I>) -> Self {
        self.positions.push(position);
        self
    }

    /// Add multiple positions.
    pub fn with_positions(mut self, positions: impl IntoIterator<Item = Position<T, I>>) -> Self {
        self.positions.extend(positions);
        self
    }

    /// All positions, in insertion order.
    pub fn positions(&self) -> &[Position<T, I>] {
        &self.positions
    }

    /// Look up a position by identifier.
    pub fn position(&self, id: &str) -> Option<&Position<T, I>> {
        self.positions.iter().find(|p| p.id == id)
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the portfolio holds no positions.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
