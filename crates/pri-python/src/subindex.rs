use numpy::PyReadonlyArray1;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use pri_core::coagulation::{calc_coagulation, CoagulationOptions, StatusVector};
use pri_core::compose::format_pri;
use pri_core::disinfection::{calc_disinfection, DisinfectionInput};
use pri_core::filtration::{calc_filtration, FiltrationOptions};
use pri_core::{advanced, classify};

use crate::convert::{checked_slice, parameter_vector, to_py_err};
use crate::tables::PyReferenceTables;

/// r_c from `p_status = [tau, chla, T, pH]` and a `{name: value}` dict.
#[pyfunction]
#[pyo3(name = "calc_coagulation", signature = (tables, p_status, p_in, weighting=1.0, verbose=false))]
fn py_calc_coagulation<'py>(
    tables: &PyReferenceTables,
    p_status: PyReadonlyArray1<'py, f64>,
    p_in: &Bound<'py, PyDict>,
    weighting: f64,
    verbose: bool,
) -> PyResult<f64> {
    let s = checked_slice(&p_status, 4, "p_status")?;
    let status = StatusVector::new(s[0], s[1], s[2], s[3]);
    let concentrations = parameter_vector(p_in)?;
    calc_coagulation(
        &tables.inner,
        status,
        &concentrations,
        CoagulationOptions { weighting, verbose },
    )
    .map_err(to_py_err)
}

#[pyfunction]
#[pyo3(name = "calc_filtration", signature = (tables, tau, p_in, include_turbidity=true, weighting=1.0, verbose=false))]
fn py_calc_filtration<'py>(
    tables: &PyReferenceTables,
    tau: f64,
    p_in: &Bound<'py, PyDict>,
    include_turbidity: bool,
    weighting: f64,
    verbose: bool,
) -> PyResult<f64> {
    let concentrations = parameter_vector(p_in)?;
    let options = FiltrationOptions {
        include_turbidity,
        weighting,
        verbose,
    };
    calc_filtration(&tables.inner, tau, &concentrations, options).map_err(to_py_err)
}

/// r_d from `p_in = [ce, ca, T]`.
#[pyfunction]
#[pyo3(name = "calc_disinfection")]
fn py_calc_disinfection<'py>(
    tables: &PyReferenceTables,
    p_in: PyReadonlyArray1<'py, f64>,
) -> PyResult<f64> {
    let p = checked_slice(&p_in, 3, "p_in")?;
    calc_disinfection(&tables.inner, DisinfectionInput::new(p[0], p[1], p[2])).map_err(to_py_err)
}

#[pyfunction]
#[pyo3(name = "calc_advanced")]
fn py_calc_advanced<'py>(tables: &PyReferenceTables, p_in: &Bound<'py, PyDict>) -> PyResult<f64> {
    let concentrations = parameter_vector(p_in)?;
    advanced::calc_advanced(&tables.inner, &concentrations).map_err(to_py_err)
}

/// Category label of r_a: "a", "b", "c" or "E".
#[pyfunction]
fn ra_class(r_a: f64) -> &'static str {
    classify(r_a).label()
}

/// PRI label such as "3.42b".
#[pyfunction]
fn pri_label(r_c: f64, r_f: f64, r_d: f64, r_a: f64) -> String {
    format_pri(r_c + r_f + r_d, classify(r_a))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "subindex")?;
    m.add_function(wrap_pyfunction!(py_calc_coagulation, &m)?)?;
    m.add_function(wrap_pyfunction!(py_calc_filtration, &m)?)?;
    m.add_function(wrap_pyfunction!(py_calc_disinfection, &m)?)?;
    m.add_function(wrap_pyfunction!(py_calc_advanced, &m)?)?;
    m.add_function(wrap_pyfunction!(ra_class, &m)?)?;
    m.add_function(wrap_pyfunction!(pri_label, &m)?)?;
    parent.add_submodule(&m)?;
    Ok(())
}
