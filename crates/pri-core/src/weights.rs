//! Normalized weight vectors and the skip-undefined weighted sum shared by
//! the coagulation and filtration sub-indices.
use smallvec::SmallVec;

use crate::error::{PriError, Result};

/// Non-negative weights summing to 1, in reference-table row order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector {
    weights: SmallVec<[f64; 8]>,
}

impl WeightVector {
    /// Weights proportional to `1 - rate`: parameters that are historically
    /// harder to remove weigh more.
    pub fn from_reduction_rates(rates: &[f64]) -> Result<Self> {
        let complements: SmallVec<[f64; 8]> = rates.iter().map(|r| 1.0 - r).collect();
        Self::proportional(&complements)
    }

    /// `x_i / Σx`.
    pub fn proportional(values: &[f64]) -> Result<Self> {
        let total: f64 = values.iter().sum();
        if total == 0.0 || !total.is_finite() {
            return Err(PriError::DomainError {
                function: "weight normalisation",
                value: total,
            });
        }
        Ok(Self {
            weights: values.iter().map(|v| v / total).collect(),
        })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// `Σ w_i · x_i`, skipping positions where `x_i` is undefined.
    pub fn weighted_sum(&self, values: &[Option<f64>]) -> Result<f64> {
        if values.len() != self.weights.len() {
            return Err(PriError::LengthMismatch {
                what: "weighted values",
                expected: self.weights.len(),
                actual: values.len(),
            });
        }
        Ok(self
            .weights
            .iter()
            .zip(values)
            .filter_map(|(w, x)| x.map(|x| w * x))
            .filter(|term| !term.is_nan())
            .sum())
    }
}

/// Observed concentration over its regulatory limit.
///
/// Undefined (`None`) when the observation is missing, the limit is zero, or
/// the quotient is NaN.
pub fn exceedance_ratio(observed: Option<f64>, limit: f64) -> Option<f64> {
    let observed = observed?;
    if limit == 0.0 {
        return None;
    }
    let ratio = observed / limit;
    (!ratio.is_nan()).then_some(ratio)
}
