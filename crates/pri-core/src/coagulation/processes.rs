/// Coagulation process functions.
///
/// Pure functions for the four terms of the coagulation-resistance
/// coefficient γ and the validity gate applied before them.
use super::constants::{
    CHLOROPHYLL_SCALE, PH_MAX, PH_MIN, PH_PENALTY, STATUS_NAMES, TEMPERATURE_COEFFICIENT,
    TEMPERATURE_EXPONENT, TURBIDITY_CEILING, TURBIDITY_FLOOR,
};
use super::run::StatusVector;
use crate::error::{PriError, Result};

/// Reject a status vector with any negative component.
pub fn check_status(status: &StatusVector) -> Result<()> {
    for (name, value) in STATUS_NAMES.iter().copied().zip(status.to_array()) {
        if value < 0.0 {
            return Err(PriError::InvalidInput {
                parameter: name,
                value,
            });
        }
    }
    Ok(())
}

/// Turbidity term.
///
/// - `ln 40` for `0 <= tau <= 1`
/// - `ln(40 / tau)` for `1 < tau < 40`
/// - `0` for `tau >= 40`
pub fn turbidity_term(tau: f64) -> Result<f64> {
    if (0.0..=TURBIDITY_FLOOR).contains(&tau) {
        Ok(TURBIDITY_CEILING.ln())
    } else if tau >= TURBIDITY_CEILING {
        Ok(0.0)
    } else if tau > TURBIDITY_FLOOR && tau < TURBIDITY_CEILING {
        Ok((TURBIDITY_CEILING / tau).ln())
    } else {
        Err(PriError::DomainError {
            function: "turbidity term",
            value: tau,
        })
    }
}

pub fn chlorophyll_term(chla: f64) -> f64 {
    chla / CHLOROPHYLL_SCALE
}

pub fn temperature_term(temperature: f64) -> f64 {
    1.0 - TEMPERATURE_COEFFICIENT * temperature.powf(TEMPERATURE_EXPONENT)
}

/// Step penalty for pH outside [6, 9].
pub fn ph_term(ph: f64) -> f64 {
    if (PH_MIN..=PH_MAX).contains(&ph) {
        0.0
    } else {
        PH_PENALTY
    }
}

/// Coagulation-resistance coefficient γ, the sum of the four terms.
///
/// Validates the status vector first.
pub fn gamma(status: &StatusVector) -> Result<f64> {
    check_status(status)?;
    Ok(turbidity_term(status.tau)?
        + chlorophyll_term(status.chla)
        + temperature_term(status.temperature)
        + ph_term(status.ph))
}
