use numpy::PyReadonlyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use pri_core::{ParameterVector, PriError};

/// Surface a core error as `ValueError`.
pub fn to_py_err(e: PriError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Validate that a numpy array is C-contiguous and return its slice.
pub fn contiguous_slice<'py>(arr: &'py PyReadonlyArray1<'py, f64>) -> PyResult<&'py [f64]> {
    arr.as_slice()
        .map_err(|_| PyValueError::new_err("array must be C-contiguous"))
}

/// Validate length + contiguity of a numpy array.
pub fn checked_slice<'py>(
    arr: &'py PyReadonlyArray1<'py, f64>,
    expected_len: usize,
    name: &str,
) -> PyResult<&'py [f64]> {
    let slice = contiguous_slice(arr)?;
    if slice.len() != expected_len {
        return Err(PyValueError::new_err(format!(
            "{} must have {} elements, got {}",
            name,
            expected_len,
            slice.len()
        )));
    }
    Ok(slice)
}

/// Build a `ParameterVector` from a `{name: float | None}` dict. NaN reads as
/// missing.
pub fn parameter_vector(dict: &Bound<'_, PyDict>) -> PyResult<ParameterVector> {
    let mut pv = ParameterVector::new();
    for (key, value) in dict.iter() {
        let name: String = key.extract()?;
        let value: Option<f64> = value.extract()?;
        pv = pv.with(name, value);
    }
    Ok(pv)
}
