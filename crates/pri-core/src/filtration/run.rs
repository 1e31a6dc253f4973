/// Filtration sub-index orchestration.
///
/// r_f = weighting · 0.1 · tau / 0.3 + Σ w_g · c_g / limit_g
use tracing::debug;

use super::constants::{DEFAULT_WEIGHTING, TURBIDITY_DENOMINATOR, TURBIDITY_NUMERATOR};
use super::partition::partition_weights;
use crate::error::{PriError, Result};
use crate::observation::ParameterVector;
use crate::reference::ReferenceTables;
use crate::traits::SubIndex;
use crate::weights::{exceedance_ratio, WeightVector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiltrationOptions {
    /// Add the turbidity term.
    pub include_turbidity: bool,
    /// Factor on the turbidity term.
    pub weighting: f64,
    pub verbose: bool,
}

impl Default for FiltrationOptions {
    fn default() -> Self {
        Self {
            include_turbidity: true,
            weighting: DEFAULT_WEIGHTING,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FiltrationInput<'a> {
    /// Turbidity [NTU].
    pub tau: f64,
    pub concentrations: &'a ParameterVector,
    pub options: FiltrationOptions,
}

/// Filtration limits paired by position with the partition group weights.
#[derive(Debug, Clone)]
pub struct FiltrationContext {
    limits: Vec<(String, f64)>,
    weights: WeightVector,
}

impl FiltrationContext {
    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.limits.iter().map(|(n, _)| n.as_str())
    }
}

pub struct Filtration;

impl SubIndex for Filtration {
    const NAME: &'static str = "filtration";
    type Input<'a> = FiltrationInput<'a>;
    type Context = FiltrationContext;

    fn prepare(tables: &ReferenceTables) -> Result<FiltrationContext> {
        let weights = partition_weights(&tables.partition)?;
        let rows = tables.filtration.rows();
        if rows.len() != weights.len() {
            return Err(PriError::LengthMismatch {
                what: "filtration limits vs. partition groups",
                expected: weights.len(),
                actual: rows.len(),
            });
        }
        let limits = rows.iter().map(|r| (r.name.clone(), r.value)).collect();
        Ok(FiltrationContext { limits, weights })
    }

    fn evaluate(input: &FiltrationInput<'_>, context: &FiltrationContext) -> Result<f64> {
        let exceedances: Vec<Option<f64>> = context
            .limits
            .iter()
            .map(|(name, limit)| exceedance_ratio(input.concentrations.get(name), *limit))
            .collect();
        let weighted = context.weights.weighted_sum(&exceedances)?;

        let output = if input.options.include_turbidity {
            input.options.weighting * TURBIDITY_NUMERATOR * input.tau / TURBIDITY_DENOMINATOR
                + weighted
        } else {
            weighted
        };

        if input.options.verbose {
            debug!(
                weights = ?context.weights.as_slice(),
                exceedances = ?exceedances,
                output,
                "filtration sub-index"
            );
        }
        Ok(output)
    }
}

/// Filtration resistance r_f for one observation.
pub fn calc_filtration(
    tables: &ReferenceTables,
    tau: f64,
    concentrations: &ParameterVector,
    options: FiltrationOptions,
) -> Result<f64> {
    Filtration::compute(
        tables,
        &FiltrationInput {
            tau,
            concentrations,
            options,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{LimitRow, LimitTable};
    use approx::assert_relative_eq;

    fn concentrations() -> ParameterVector {
        // V_phen limit 0.005 -> 2.0; An_SAA limit 0.2 -> 0.5; Oils missing
        ParameterVector::new()
            .with("V_phen", Some(0.01))
            .with("An_SAA", Some(0.1))
            .with("Oils", None)
    }

    #[test]
    fn known_value_with_turbidity() {
        let t = ReferenceTables::bundled().unwrap();
        let w = Filtration::prepare(&t).unwrap().weights().clone();
        let w = w.as_slice();

        let r = calc_filtration(&t, 3.0, &concentrations(), FiltrationOptions::default()).unwrap();
        assert_relative_eq!(r, 1.0 + w[0] * 2.0 + w[1] * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn turbidity_term_can_be_disabled() {
        let t = ReferenceTables::bundled().unwrap();
        let opts = FiltrationOptions {
            include_turbidity: false,
            ..FiltrationOptions::default()
        };
        let with = calc_filtration(&t, 3.0, &concentrations(), FiltrationOptions::default()).unwrap();
        let without = calc_filtration(&t, 3.0, &concentrations(), opts).unwrap();
        assert_relative_eq!(with - without, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn weighting_scales_turbidity_only() {
        let t = ReferenceTables::bundled().unwrap();
        let empty = ParameterVector::new();
        let opts = FiltrationOptions {
            weighting: 0.5,
            ..FiltrationOptions::default()
        };
        let r = calc_filtration(&t, 3.0, &empty, opts).unwrap();
        assert_relative_eq!(r, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn limit_count_must_match_groups() {
        let mut t = ReferenceTables::bundled().unwrap();
        t.filtration = LimitTable::new(vec![LimitRow::new("V_phen", 0.005)]);
        assert!(matches!(
            Filtration::prepare(&t),
            Err(PriError::LengthMismatch {
                expected: 3,
                actual: 1,
                ..
            })
        ));
    }
}
