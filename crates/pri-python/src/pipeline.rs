use numpy::PyReadonlyArray1;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use pri_core::evaluate::SubIndexScoresSeries;
use pri_core::{observation, Evaluator, ParameterVector};

use crate::convert::{contiguous_slice, to_py_err};
use crate::tables::PyReferenceTables;

// ---------------------------------------------------------------------------
// Typed pyclass result objects
// ---------------------------------------------------------------------------

define_series_result! {
    /// Per-observation sub-index values as numpy arrays, NaN for failed rows.
    pub struct SubIndexArrays from SubIndexScoresSeries {
        coagulation, filtration, disinfection, advanced,
    }
}

/// Turn `{name: ndarray}` columns into one `ParameterVector` per row.
fn rows_from_columns(columns: &Bound<'_, PyDict>) -> PyResult<Vec<ParameterVector>> {
    let mut arrays: Vec<(String, PyReadonlyArray1<'_, f64>)> = Vec::with_capacity(columns.len());
    for (key, value) in columns.iter() {
        arrays.push((key.extract()?, value.extract()?));
    }
    let named = arrays
        .iter()
        .map(|(name, arr)| Ok::<_, PyErr>((name.as_str(), contiguous_slice(arr)?)))
        .collect::<PyResult<Vec<(&str, &[f64])>>>()?;
    observation::rows_from_columns(&named).map_err(to_py_err)
}

/// Score a table of observations given as `{column name: ndarray}`.
///
/// Returns a dict with one numpy array per sub-index plus `category`, `pri`
/// and `warning` lists.
#[pyfunction]
fn evaluate_batch<'py>(
    py: Python<'py>,
    tables: &PyReferenceTables,
    columns: &Bound<'py, PyDict>,
) -> PyResult<Bound<'py, PyDict>> {
    let rows = rows_from_columns(columns)?;
    let evaluator = Evaluator::new(&tables.inner).map_err(to_py_err)?;
    let out = evaluator.evaluate_batch(&rows).map_err(to_py_err)?;

    let dict = series_to_dict!(
        py, out.scores,
        coagulation, filtration, disinfection, advanced,
    );
    let categories: Vec<Option<&'static str>> =
        out.categories.iter().map(|c| c.map(|c| c.label())).collect();
    let warnings: Vec<&'static str> = out.warnings.iter().map(|w| w.label()).collect();
    dict.set_item("category", categories)?;
    dict.set_item("pri", out.labels)?;
    dict.set_item("warning", warnings)?;
    Ok(dict)
}

/// Like `evaluate_batch`, returning only the typed sub-index arrays.
#[pyfunction]
fn evaluate_scores(
    py: Python<'_>,
    tables: &PyReferenceTables,
    columns: &Bound<'_, PyDict>,
) -> PyResult<SubIndexArrays> {
    let rows = rows_from_columns(columns)?;
    let evaluator = Evaluator::new(&tables.inner).map_err(to_py_err)?;
    let out = evaluator.evaluate_batch(&rows).map_err(to_py_err)?;
    Ok(SubIndexArrays::from_series(py, out.scores))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "pipeline")?;
    m.add_function(wrap_pyfunction!(evaluate_batch, &m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_scores, &m)?)?;
    m.add_class::<SubIndexArrays>()?;
    parent.add_submodule(&m)?;
    Ok(())
}
