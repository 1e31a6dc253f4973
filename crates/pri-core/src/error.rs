//! Error taxonomy for sub-index evaluation.
//!
//! Undefined exceedance ratios are not errors: they surface as `None` and are
//! skipped in weighted sums. Everything here is fatal for the sub-index that
//! raised it and is propagated to the caller unchanged.
use thiserror::Error;

/// Errors raised while evaluating a sub-index or loading reference tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriError {
    /// A status parameter that must be non-negative was negative.
    #[error("invalid input: status parameter {parameter} = {value} is negative")]
    InvalidInput {
        /// Name of the offending status parameter.
        parameter: &'static str,
        /// The value supplied.
        value: f64,
    },

    /// A piecewise formula was evaluated outside its defined domain.
    #[error("domain error: {function} is undefined at {value}")]
    DomainError {
        function: &'static str,
        value: f64,
    },

    /// A reference table lacks a row or column a formula needs.
    #[error("missing reference data: {table} table has no {parameter}")]
    MissingReferenceData {
        table: &'static str,
        parameter: String,
    },

    /// Two sequences paired by position have different lengths.
    #[error("{what}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Reference tables could not be read or parsed.
    #[error("reference table configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PriError>;
