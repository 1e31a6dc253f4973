/// Disinfection sub-index.
///
/// r_d = (ce / cs + 7.16) · ca / r · ct / cts, with ct = 12 · e^(-0.072 T).
///
/// `cs`, `r` and `cts` are read by position from the disinfection table
/// (rows 1, 3 and 4), not by name.
use tracing::debug;

use super::constants::{
    AMMONIA_REFERENCE_ROW, COLIFORM_OFFSET, COLIFORM_STANDARD_ROW, CT_AT_ZERO, CT_DECAY,
    CT_STANDARD_ROW,
};
use crate::error::{PriError, Result};
use crate::reference::{LimitTable, ReferenceTables};
use crate::traits::SubIndex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisinfectionInput {
    /// Effluent colony count `ce`.
    pub coliforms: f64,
    /// Ammonia nitrogen `ca` [mg/L].
    pub ammonia: f64,
    /// Water temperature [°C].
    pub temperature: f64,
}

impl DisinfectionInput {
    pub fn new(coliforms: f64, ammonia: f64, temperature: f64) -> Self {
        Self {
            coliforms,
            ammonia,
            temperature,
        }
    }
}

/// The three positional constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisinfectionContext {
    pub coliform_standard: f64,
    pub ammonia_reference: f64,
    pub ct_standard: f64,
}

/// Disinfectant CT value at a water temperature.
pub fn ct_value(temperature: f64) -> f64 {
    CT_AT_ZERO * (-CT_DECAY * temperature).exp()
}

fn value_at(table: &LimitTable, index: usize) -> Result<f64> {
    table
        .row(index)
        .map(|r| r.value)
        .ok_or_else(|| PriError::MissingReferenceData {
            table: "disinfection",
            parameter: format!("row {}", index + 1),
        })
}

pub struct Disinfection;

impl SubIndex for Disinfection {
    const NAME: &'static str = "disinfection";
    type Input<'a> = DisinfectionInput;
    type Context = DisinfectionContext;

    fn prepare(tables: &ReferenceTables) -> Result<DisinfectionContext> {
        let table = &tables.disinfection;
        Ok(DisinfectionContext {
            coliform_standard: value_at(table, COLIFORM_STANDARD_ROW)?,
            ammonia_reference: value_at(table, AMMONIA_REFERENCE_ROW)?,
            ct_standard: value_at(table, CT_STANDARD_ROW)?,
        })
    }

    fn evaluate(input: &DisinfectionInput, context: &DisinfectionContext) -> Result<f64> {
        let ct = ct_value(input.temperature);
        let output = (input.coliforms / context.coliform_standard + COLIFORM_OFFSET)
            * input.ammonia
            / context.ammonia_reference
            * (ct / context.ct_standard);
        debug!(ct, output, "disinfection sub-index");
        Ok(output)
    }
}

/// Disinfection resistance r_d for one observation.
pub fn calc_disinfection(tables: &ReferenceTables, input: DisinfectionInput) -> Result<f64> {
    Disinfection::compute(tables, &input)
}
