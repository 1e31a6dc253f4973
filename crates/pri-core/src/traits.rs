use crate::error::Result;
use crate::reference::ReferenceTables;

/// Core trait for the PRI sub-indices.
///
/// Every sub-index splits into a `prepare` phase that derives run-constant
/// data from the reference tables (limits, weight vectors) and a pure
/// `evaluate` phase applied per observation.
pub trait SubIndex {
    /// Short name used in logs and error messages.
    const NAME: &'static str;

    /// Per-observation input, borrowing from the caller where possible.
    type Input<'a>;

    /// Precomputed context derived from the tables, constant for a given run.
    type Context;

    /// Derive the run-constant context. Fails on malformed reference data.
    fn prepare(tables: &ReferenceTables) -> Result<Self::Context>;

    /// Evaluate one observation against a prepared context.
    fn evaluate(input: &Self::Input<'_>, context: &Self::Context) -> Result<f64>;

    /// Prepare and evaluate in one call.
    ///
    /// Convenient for single observations; batch callers should prepare once
    /// and reuse the context.
    fn compute(tables: &ReferenceTables, input: &Self::Input<'_>) -> Result<f64> {
        let context = Self::prepare(tables)?;
        Self::evaluate(input, &context)
    }
}
