//! Per-observation parameter values and the cleaning rules applied to raw
//! monitoring rows before they reach the sub-index formulas.
use crate::error::{PriError, Result};

// -- Canonical parameter names --

pub const TURBIDITY: &str = "Turbid";
pub const TRANSPARENCY: &str = "Transp";
pub const CHLOROPHYLL: &str = "Chl_a";
pub const WATER_TEMP: &str = "W_temp";
pub const PH: &str = "pH";
pub const COLIFORMS: &str = "Colo_org";
pub const AMMONIA: &str = "NH4-N";
pub const PERMANGANATE_INDEX: &str = "CODMn";

/// Parameters an observation must carry to be scored at all.
pub const VITAL_PARAMETERS: &[&str] = &[
    TURBIDITY,
    WATER_TEMP,
    PH,
    COLIFORMS,
    AMMONIA,
    PERMANGANATE_INDEX,
];

/// Column order of a raw monitoring row: site, date, then measurements.
pub const RAW_COLUMNS: &[&str] = &[
    "Sites", "Date", "W_temp", "pH", "CODMn", "NH4-N", "F", "As", "Cd", "Cn_total", "V_phen",
    "Oils", "An_SAA", "Colo_org", "SO4", "Cl", "NO3_n", "W_Fe", "W_Mn", "Transp", "Chl_a",
];

/// Raw value that marks a measurement as not taken.
pub const MISSING_SENTINEL: f64 = -1.0;

/// Ordered mapping from parameter name to a measurement or an explicit gap.
///
/// A name that was never inserted reads as missing, the same as one inserted
/// with `None` or NaN. Values are never defaulted to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterVector {
    entries: Vec<(String, Option<f64>)>,
}

impl ParameterVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. Re-inserting a name replaces its value in place.
    ///
    /// NaN is stored as missing.
    pub fn with(mut self, name: impl Into<String>, value: Option<f64>) -> Self {
        let name = name.into();
        let value = value.filter(|v| !v.is_nan());
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    /// Value for `name`, `None` when missing or never supplied.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| *v)
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names from `names` that are missing in this vector.
    pub fn missing<'a>(&self, names: &[&'a str]) -> Vec<&'a str> {
        names
            .iter()
            .copied()
            .filter(|n| !self.is_present(n))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Option<f64>)> for ParameterVector {
    fn from_iter<I: IntoIterator<Item = (S, Option<f64>)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |pv, (name, value)| pv.with(name, value))
    }
}

/// Transpose named columns into one `ParameterVector` per row.
///
/// All columns must have the same length as the first. NaN cells read as
/// missing.
pub fn rows_from_columns<S: AsRef<str>>(columns: &[(S, &[f64])]) -> Result<Vec<ParameterVector>> {
    let n = columns.first().map_or(0, |(_, col)| col.len());
    if let Some((_, col)) = columns.iter().find(|(_, col)| col.len() != n) {
        return Err(PriError::LengthMismatch {
            what: "observation column",
            expected: n,
            actual: col.len(),
        });
    }

    Ok((0..n)
        .map(|i| {
            columns
                .iter()
                .map(|(name, col)| (name.as_ref(), Some(col[i])))
                .collect()
        })
        .collect())
}

/// One monitoring record: where and when it was taken, plus its values.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub site: String,
    pub date: String,
    pub values: ParameterVector,
}

impl Observation {
    pub fn new(site: impl Into<String>, date: impl Into<String>, values: ParameterVector) -> Self {
        Self {
            site: site.into(),
            date: date.into(),
            values,
        }
    }

    /// Build an observation from a raw row laid out as [`RAW_COLUMNS`].
    ///
    /// Every measurement cell goes through [`parse_measurement`] and
    /// [`drop_sentinel`], and turbidity is derived from transparency.
    pub fn from_raw_row(fields: &[&str]) -> Result<Self> {
        if fields.len() != RAW_COLUMNS.len() {
            return Err(PriError::LengthMismatch {
                what: "raw observation row",
                expected: RAW_COLUMNS.len(),
                actual: fields.len(),
            });
        }

        let mut values: ParameterVector = RAW_COLUMNS[2..]
            .iter()
            .zip(&fields[2..])
            .map(|(name, cell)| (*name, parse_measurement(cell).and_then(drop_sentinel)))
            .collect();

        let turbidity = values
            .get(TRANSPARENCY)
            .and_then(turbidity_from_transparency);
        values = values.with(TURBIDITY, turbidity);

        Ok(Self::new(fields[0].trim(), fields[1].trim(), values))
    }
}

/// Parse a raw measurement cell.
///
/// Laboratories report results below the detection limit with a trailing
/// `L` (e.g. `0.01L`). Each `L` is replaced by `0` before parsing, so `0.01L`
/// reads as `0.010` and a bare `L` as `0`. Anything still unparsable, and
/// empty cells, are missing.
pub fn parse_measurement(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    let cleaned = cell.replace('L', "0");
    cleaned.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Map the `-1` "not measured" sentinel to missing.
pub fn drop_sentinel(value: f64) -> Option<f64> {
    if value == MISSING_SENTINEL {
        None
    } else {
        Some(value)
    }
}

/// Turbidity [NTU] from Secchi transparency [cm]: `4686 · transp^-1.532`.
///
/// Returns `None` where the power law is undefined (negative transparency).
/// Zero transparency gives infinite turbidity.
pub fn turbidity_from_transparency(transparency: f64) -> Option<f64> {
    let turbidity = 4686.0 * transparency.powf(-1.532);
    if turbidity.is_nan() {
        None
    } else {
        Some(turbidity)
    }
}
