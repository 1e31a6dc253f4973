/// Coagulation sub-index orchestration.
///
/// r_c = γ · (weighting · tau + Σ w_i · c_i / limit_i)
use tracing::debug;

use super::constants::DEFAULT_WEIGHTING;
use super::processes;
use crate::error::{PriError, Result};
use crate::observation::ParameterVector;
use crate::reference::ReferenceTables;
use crate::traits::SubIndex;
use crate::weights::{exceedance_ratio, WeightVector};

const TABLE: &str = "coagulation";

/// Water-state indicators feeding γ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusVector {
    /// Turbidity [NTU].
    pub tau: f64,
    /// Chlorophyll-a [µg/L].
    pub chla: f64,
    /// Water temperature [°C].
    pub temperature: f64,
    pub ph: f64,
}

impl StatusVector {
    pub fn new(tau: f64, chla: f64, temperature: f64, ph: f64) -> Self {
        Self {
            tau,
            chla,
            temperature,
            ph,
        }
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.tau, self.chla, self.temperature, self.ph]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoagulationOptions {
    /// Factor on the turbidity term; 1 adds it, 0 drops it.
    pub weighting: f64,
    /// Log γ, weights and exceedances at debug level.
    pub verbose: bool,
}

impl Default for CoagulationOptions {
    fn default() -> Self {
        Self {
            weighting: DEFAULT_WEIGHTING,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoagulationInput<'a> {
    pub status: StatusVector,
    /// Concentrations, looked up by the names of the pollutant rows.
    pub concentrations: &'a ParameterVector,
    pub options: CoagulationOptions,
}

/// Pollutant limits and their reduction-rate weights.
///
/// The first table row belongs to the status parameter and is not part of
/// either.
#[derive(Debug, Clone)]
pub struct CoagulationContext {
    limits: Vec<(String, f64)>,
    weights: WeightVector,
}

impl CoagulationContext {
    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.limits.iter().map(|(n, _)| n.as_str())
    }

    /// Exceedance ratios in table order.
    pub fn exceedances(&self, concentrations: &ParameterVector) -> Vec<Option<f64>> {
        self.limits
            .iter()
            .map(|(name, limit)| exceedance_ratio(concentrations.get(name), *limit))
            .collect()
    }
}

pub struct Coagulation;

impl SubIndex for Coagulation {
    const NAME: &'static str = TABLE;
    type Input<'a> = CoagulationInput<'a>;
    type Context = CoagulationContext;

    fn prepare(tables: &ReferenceTables) -> Result<CoagulationContext> {
        let rows = tables.coagulation.rows();
        if rows.len() < 2 {
            return Err(PriError::MissingReferenceData {
                table: TABLE,
                parameter: "pollutant rows".to_string(),
            });
        }
        let pollutants = &rows[1..];

        let rates = pollutants
            .iter()
            .map(|r| {
                r.reduction_rate.ok_or_else(|| PriError::MissingReferenceData {
                    table: TABLE,
                    parameter: format!("reduction rate for {}", r.name),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        let weights = WeightVector::from_reduction_rates(&rates)?;

        let limits = pollutants
            .iter()
            .map(|r| (r.name.clone(), r.value))
            .collect();

        Ok(CoagulationContext { limits, weights })
    }

    fn evaluate(input: &CoagulationInput<'_>, context: &CoagulationContext) -> Result<f64> {
        let gamma = processes::gamma(&input.status)?;
        let exceedances = context.exceedances(input.concentrations);
        let weighted = context.weights.weighted_sum(&exceedances)?;

        let output = gamma * (input.options.weighting * input.status.tau + weighted);

        if input.options.verbose {
            debug!(
                gamma,
                weights = ?context.weights.as_slice(),
                exceedances = ?exceedances,
                output,
                "coagulation sub-index"
            );
        }
        Ok(output)
    }
}

/// Coagulation resistance r_c for one observation.
pub fn calc_coagulation(
    tables: &ReferenceTables,
    status: StatusVector,
    concentrations: &ParameterVector,
    options: CoagulationOptions,
) -> Result<f64> {
    Coagulation::compute(
        tables,
        &CoagulationInput {
            status,
            concentrations,
            options,
        },
    )
}
