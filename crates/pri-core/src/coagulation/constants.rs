//! Coagulation numerical constants.
//!
//! Centralises the fixed values of the coagulation-resistance coefficient γ.

// -- Turbidity term --

/// Turbidity at or below which the term saturates at ln(40) [NTU].
pub const TURBIDITY_FLOOR: f64 = 1.0;

/// Turbidity at or above which the term vanishes [NTU].
pub const TURBIDITY_CEILING: f64 = 40.0;

// -- Chlorophyll term --

/// Chlorophyll-a scale: term = chla / 26.
pub const CHLOROPHYLL_SCALE: f64 = 26.0;

// -- Temperature term --

/// Temperature term: 1 - 0.2 · T^0.45.
pub const TEMPERATURE_COEFFICIENT: f64 = 0.2;
pub const TEMPERATURE_EXPONENT: f64 = 0.45;

// -- pH term --

/// pH window with no penalty, inclusive on both ends.
pub const PH_MIN: f64 = 6.0;
pub const PH_MAX: f64 = 9.0;

/// Penalty outside the pH window.
pub const PH_PENALTY: f64 = 1.0;

// -- Contract --

/// Status parameter names in the order of [`super::StatusVector`].
pub const STATUS_NAMES: &[&str] = &["tau", "chla", "temperature", "ph"];

/// Default weighting factor on the turbidity term.
pub const DEFAULT_WEIGHTING: f64 = 1.0;
