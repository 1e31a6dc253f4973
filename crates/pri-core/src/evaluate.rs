/// Per-observation PRI pipeline.
///
/// - `Evaluator::evaluate()`: gate on vital parameters, compute the four
///   sub-indices, classify r_a and format the PRI label
/// - `Evaluator::evaluate_batch()`: the same over many observations,
///   collected into columns
use pri_macros::Series;
use tracing::{debug, warn};

use crate::advanced::{Advanced, AdvancedContext};
use crate::classify::{classify, Category};
use crate::coagulation::{
    Coagulation, CoagulationContext, CoagulationInput, CoagulationOptions, StatusVector,
};
use crate::compose::format_pri;
use crate::disinfection::{Disinfection, DisinfectionContext, DisinfectionInput};
use crate::error::Result;
use crate::filtration::{Filtration, FiltrationContext, FiltrationInput, FiltrationOptions};
use crate::observation::{
    ParameterVector, AMMONIA, CHLOROPHYLL, COLIFORMS, PERMANGANATE_INDEX, PH, TURBIDITY,
    VITAL_PARAMETERS, WATER_TEMP,
};
use crate::reference::ReferenceTables;
use crate::traits::SubIndex;

/// The four sub-index values of one observation.
#[derive(Debug, Clone, Copy, PartialEq, Series)]
pub struct SubIndexScores {
    pub coagulation: f64,
    pub filtration: f64,
    pub disinfection: f64,
    pub advanced: f64,
}

impl SubIndexScores {
    /// r_c + r_f + r_d.
    pub fn additive_sum(&self) -> f64 {
        self.coagulation + self.filtration + self.disinfection
    }
}

/// Whether an observation carried everything needed to be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    Pass,
    Fail,
}

impl Warning {
    pub fn label(self) -> &'static str {
        match self {
            Warning::Pass => "Pass",
            Warning::Fail => "Fail",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriRecord {
    pub scores: SubIndexScores,
    pub category: Category,
    /// e.g. `3.42b`.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub warning: Warning,
    /// Vital parameters that were missing, empty on `Pass`.
    pub missing: Vec<&'static str>,
    /// `None` on `Fail`.
    pub record: Option<PriRecord>,
}

impl Assessment {
    fn failed(missing: Vec<&'static str>) -> Self {
        Self {
            warning: Warning::Fail,
            missing,
            record: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvaluationOptions {
    pub coagulation: CoagulationOptions,
    pub filtration: FiltrationOptions,
}

/// Columnar results of a batch, one entry per observation.
///
/// Failed observations hold NaN scores and `None` category and label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutput {
    pub scores: SubIndexScoresSeries,
    pub categories: Vec<Option<Category>>,
    pub labels: Vec<Option<String>>,
    pub warnings: Vec<Warning>,
}

impl BatchOutput {
    fn with_capacity(n: usize) -> Self {
        Self {
            scores: SubIndexScoresSeries::with_capacity(n),
            categories: Vec::with_capacity(n),
            labels: Vec::with_capacity(n),
            warnings: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, assessment: Assessment) {
        self.warnings.push(assessment.warning);
        match assessment.record {
            Some(record) => {
                self.scores.push(&record.scores);
                self.categories.push(Some(record.category));
                self.labels.push(Some(record.label));
            }
            None => {
                self.scores.push_undefined();
                self.categories.push(None);
                self.labels.push(None);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn n_failed(&self) -> usize {
        self.warnings.iter().filter(|w| **w == Warning::Fail).count()
    }
}

/// Prepared contexts for all four sub-indices.
///
/// Weight vectors and positional constants are derived once here and reused
/// for every observation.
#[derive(Debug, Clone)]
pub struct Evaluator {
    coagulation: CoagulationContext,
    filtration: FiltrationContext,
    disinfection: DisinfectionContext,
    advanced: AdvancedContext,
    options: EvaluationOptions,
}

impl Evaluator {
    pub fn new(tables: &ReferenceTables) -> Result<Self> {
        Self::with_options(tables, EvaluationOptions::default())
    }

    pub fn with_options(tables: &ReferenceTables, options: EvaluationOptions) -> Result<Self> {
        Ok(Self {
            coagulation: Coagulation::prepare(tables)?,
            filtration: Filtration::prepare(tables)?,
            disinfection: Disinfection::prepare(tables)?,
            advanced: Advanced::prepare(tables)?,
            options,
        })
    }

    pub fn options(&self) -> &EvaluationOptions {
        &self.options
    }

    /// Score one observation.
    ///
    /// A missing vital parameter yields `Warning::Fail` rather than an error.
    /// A missing chlorophyll-a leaves r_c undefined (NaN), which carries into
    /// the additive sum and the label; the other status values are still
    /// checked. Sub-index errors are returned as is.
    pub fn evaluate(&self, values: &ParameterVector) -> Result<Assessment> {
        let (Some(tau), Some(temperature), Some(ph), Some(coliforms), Some(ammonia), Some(_)) = (
            values.get(TURBIDITY),
            values.get(WATER_TEMP),
            values.get(PH),
            values.get(COLIFORMS),
            values.get(AMMONIA),
            values.get(PERMANGANATE_INDEX),
        ) else {
            let missing = values.missing(VITAL_PARAMETERS);
            warn!(missing = ?missing, "observation skipped");
            return Ok(Assessment::failed(missing));
        };

        let chla = values.get(CHLOROPHYLL).unwrap_or_else(|| {
            debug!("chlorophyll-a missing, coagulation sub-index undefined");
            f64::NAN
        });
        let coagulation = Coagulation::evaluate(
            &CoagulationInput {
                status: StatusVector::new(tau, chla, temperature, ph),
                concentrations: values,
                options: self.options.coagulation,
            },
            &self.coagulation,
        )?;

        let filtration = Filtration::evaluate(
            &FiltrationInput {
                tau,
                concentrations: values,
                options: self.options.filtration,
            },
            &self.filtration,
        )?;

        let disinfection = Disinfection::evaluate(
            &DisinfectionInput::new(coliforms, ammonia, temperature),
            &self.disinfection,
        )?;

        let advanced = Advanced::evaluate(&values, &self.advanced)?;

        let scores = SubIndexScores {
            coagulation,
            filtration,
            disinfection,
            advanced,
        };
        let category = classify(advanced);
        let label = format_pri(scores.additive_sum(), category);

        Ok(Assessment {
            warning: Warning::Pass,
            missing: Vec::new(),
            record: Some(PriRecord {
                scores,
                category,
                label,
            }),
        })
    }

    /// Score many observations, stopping at the first sub-index error.
    pub fn evaluate_batch<'a, I>(&self, observations: I) -> Result<BatchOutput>
    where
        I: IntoIterator<Item = &'a ParameterVector>,
    {
        let observations = observations.into_iter();
        let mut output = BatchOutput::with_capacity(observations.size_hint().0);

        for (row, values) in observations.enumerate() {
            let assessment = self.evaluate(values).inspect_err(|e| {
                warn!(row, error = %e, "observation failed");
            })?;
            output.push(assessment);
        }

        debug!(
            n = output.len(),
            failed = output.n_failed(),
            "batch evaluated"
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PriError;
    use approx::assert_relative_eq;

    fn observation() -> ParameterVector {
        ParameterVector::new()
            .with(TURBIDITY, Some(20.0))
            .with(CHLOROPHYLL, Some(4.0))
            .with(WATER_TEMP, Some(23.0))
            .with(PH, Some(7.6))
            .with(COLIFORMS, Some(1400.0))
            .with(AMMONIA, Some(0.64))
            .with(PERMANGANATE_INDEX, Some(3.1))
            .with("V_phen", Some(0.001))
            .with("An_SAA", Some(0.05))
            .with("Oils", Some(0.01))
    }

    #[test]
    fn passing_observation_is_scored() {
        let t = ReferenceTables::bundled().unwrap();
        let a = Evaluator::new(&t).unwrap().evaluate(&observation()).unwrap();
        assert_eq!(a.warning, Warning::Pass);
        let r = a.record.unwrap();
        assert_eq!(r.category, Category::A);
        assert_relative_eq!(r.scores.disinfection, 3.5675589936558283, epsilon = 1e-12);
        assert!(r.label.ends_with('a'));
    }

    #[test]
    fn sub_indices_match_direct_calls() {
        let t = ReferenceTables::bundled().unwrap();
        let obs = observation();
        let r = Evaluator::new(&t)
            .unwrap()
            .evaluate(&obs)
            .unwrap()
            .record
            .unwrap();
        let rc = crate::coagulation::calc_coagulation(
            &t,
            StatusVector::new(20.0, 4.0, 23.0, 7.6),
            &obs,
            CoagulationOptions::default(),
        )
        .unwrap();
        let rf = crate::filtration::calc_filtration(&t, 20.0, &obs, FiltrationOptions::default())
            .unwrap();
        assert_eq!(r.scores.coagulation, rc);
        assert_eq!(r.scores.filtration, rf);
    }

    #[test]
    fn missing_vital_parameter_fails() {
        let t = ReferenceTables::bundled().unwrap();
        let obs = observation().with(COLIFORMS, None);
        let a = Evaluator::new(&t).unwrap().evaluate(&obs).unwrap();
        assert_eq!(a.warning, Warning::Fail);
        assert_eq!(a.missing, [COLIFORMS]);
        assert!(a.record.is_none());
    }

    #[test]
    fn missing_chlorophyll_leaves_coagulation_undefined() {
        let t = ReferenceTables::bundled().unwrap();
        let obs = observation().with(CHLOROPHYLL, None);
        let r = Evaluator::new(&t)
            .unwrap()
            .evaluate(&obs)
            .unwrap()
            .record
            .unwrap();
        assert!(r.scores.coagulation.is_nan());
        assert!(r.scores.filtration.is_finite());
        assert_eq!(r.label, "nana");
    }

    #[test]
    fn nan_vital_parameter_fails() {
        let t = ReferenceTables::bundled().unwrap();
        let obs = observation().with(WATER_TEMP, Some(f64::NAN));
        let a = Evaluator::new(&t).unwrap().evaluate(&obs).unwrap();
        assert_eq!(a.warning, Warning::Fail);
        assert_eq!(a.missing, [WATER_TEMP]);
        assert!(a.record.is_none());
    }

    #[test]
    fn missing_chlorophyll_still_checks_status() {
        let t = ReferenceTables::bundled().unwrap();
        let obs = observation()
            .with(CHLOROPHYLL, None)
            .with(TURBIDITY, Some(-5.0));
        let err = Evaluator::new(&t).unwrap().evaluate(&obs).unwrap_err();
        assert!(matches!(err, PriError::InvalidInput { parameter: "tau", .. }));
    }

    #[test]
    fn negative_status_propagates() {
        let t = ReferenceTables::bundled().unwrap();
        let obs = observation().with(PH, Some(-1.0));
        let err = Evaluator::new(&t).unwrap().evaluate(&obs).unwrap_err();
        assert!(matches!(err, PriError::InvalidInput { parameter: "ph", .. }));
    }

    #[test]
    fn batch_keeps_row_alignment() {
        let t = ReferenceTables::bundled().unwrap();
        let rows = vec![observation(), observation().with(PH, None), observation()];
        let out = Evaluator::new(&t).unwrap().evaluate_batch(&rows).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out.scores.len(), 3);
        assert_eq!(out.n_failed(), 1);
        assert_eq!(out.warnings, [Warning::Pass, Warning::Fail, Warning::Pass]);
        assert!(out.scores.coagulation[1].is_nan());
        assert!(out.labels[1].is_none());
        assert_eq!(out.labels[0], out.labels[2]);
    }

    #[test]
    fn batch_stops_at_first_error() {
        let t = ReferenceTables::bundled().unwrap();
        let rows = vec![observation(), observation().with(TURBIDITY, Some(-3.0))];
        assert!(Evaluator::new(&t).unwrap().evaluate_batch(&rows).is_err());
    }

    #[test]
    fn score_field_names() {
        assert_eq!(
            SubIndexScores::field_names(),
            &["coagulation", "filtration", "disinfection", "advanced"]
        );
    }
}
