//! Filtration numerical constants.

/// Turbidity term: weighting · 0.1 · tau / 0.3.
pub const TURBIDITY_NUMERATOR: f64 = 0.1;
pub const TURBIDITY_DENOMINATOR: f64 = 0.3;

/// Default weighting factor on the turbidity term.
pub const DEFAULT_WEIGHTING: f64 = 1.0;
