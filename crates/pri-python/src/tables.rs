use std::path::PathBuf;

use pyo3::prelude::*;

use crate::convert::to_py_err;

/// Reference limit tables for one run.
#[pyclass(name = "ReferenceTables", frozen)]
pub struct PyReferenceTables {
    pub inner: pri_core::ReferenceTables,
}

#[pymethods]
impl PyReferenceTables {
    #[staticmethod]
    fn from_toml(source: &str) -> PyResult<Self> {
        let inner = pri_core::ReferenceTables::from_toml_str(source).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[staticmethod]
    fn from_path(path: PathBuf) -> PyResult<Self> {
        let inner = pri_core::ReferenceTables::from_path(&path).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Sample tables shipped with the extension.
    #[staticmethod]
    fn bundled() -> PyResult<Self> {
        let inner = pri_core::ReferenceTables::bundled().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// `$PRI_REFERENCE_TABLES`, then `./reference_tables.toml`, then bundled.
    #[staticmethod]
    fn load() -> PyResult<Self> {
        let inner = pri_core::ReferenceTables::load().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn to_toml(&self) -> PyResult<String> {
        self.inner.to_toml_string().map_err(to_py_err)
    }

    /// Parameter names of one table: coagulation, filtration, disinfection or advanced.
    fn names(&self, table: &str) -> PyResult<Vec<String>> {
        let t = match table {
            "coagulation" => &self.inner.coagulation,
            "filtration" => &self.inner.filtration,
            "disinfection" => &self.inner.disinfection,
            "advanced" => &self.inner.advanced,
            other => {
                return Err(pyo3::exceptions::PyKeyError::new_err(format!(
                    "unknown table {}",
                    other
                )))
            }
        };
        Ok(t.names().map(str::to_string).collect())
    }
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "tables")?;
    m.add_class::<PyReferenceTables>()?;
    parent.add_submodule(&m)?;
    Ok(())
}
