//! Reference limit tables, one per sub-index, plus the partition-coefficient
//! table behind the filtration weights.
//!
//! Tables are configuration: they are deserialized from TOML once per run and
//! passed explicitly into every sub-index. Row order is significant, since
//! the coagulation table reserves its first row for the status parameter and
//! the disinfection constants are read by position.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PriError, Result};

/// Environment variable naming a reference table file.
pub const TABLES_ENV_VAR: &str = "PRI_REFERENCE_TABLES";

/// File looked up in the working directory when the env var is unset.
pub const TABLES_FILE_NAME: &str = "reference_tables.toml";

/// Sample tables bundled with the crate, used when nothing else is found.
pub const BUNDLED_TABLES: &str = include_str!("../data/reference_tables.toml");

/// One row of a limit table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitRow {
    pub name: String,
    /// Effluent limit (or positional constant for the disinfection table).
    pub value: f64,
    /// Historical reduction rate in `[0, 1)`; coagulation table only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduction_rate: Option<f64>,
    /// Integer severity weight; advanced table only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_class: Option<u32>,
}

impl LimitRow {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            reduction_rate: None,
            complexity_class: None,
        }
    }

    pub fn with_reduction_rate(mut self, rate: f64) -> Self {
        self.reduction_rate = Some(rate);
        self
    }

    pub fn with_complexity_class(mut self, class: u32) -> Self {
        self.complexity_class = Some(class);
        self
    }
}

/// Ordered parameter-name → limit mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LimitTable {
    rows: Vec<LimitRow>,
}

impl LimitTable {
    pub fn new(rows: Vec<LimitRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LimitRow] {
        &self.rows
    }

    /// Row at a 0-based position.
    pub fn row(&self, index: usize) -> Option<&LimitRow> {
        self.rows.get(index)
    }

    pub fn get(&self, name: &str) -> Option<&LimitRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Physico-chemical group a filtration contaminant belongs to.
///
/// Groups are always visited in declaration order, which must match the row
/// order of the filtration limit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionGroup {
    VolatilePhenols,
    /// Linear alkylbenzene sulfonates.
    Surfactants,
    PetroleumHydrocarbons,
}

impl PartitionGroup {
    pub const ALL: [PartitionGroup; 3] = [
        PartitionGroup::VolatilePhenols,
        PartitionGroup::Surfactants,
        PartitionGroup::PetroleumHydrocarbons,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PartitionGroup::VolatilePhenols => "volatile phenols",
            PartitionGroup::Surfactants => "LAS",
            PartitionGroup::PetroleumHydrocarbons => "petroleum hydrocarbons",
        }
    }
}

/// One compound's octanol-water partition coefficient and its weight
/// within its group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionRow {
    pub name: String,
    pub log_kow: f64,
    pub weight: f64,
    pub group: PartitionGroup,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionTable {
    rows: Vec<PartitionRow>,
}

impl PartitionTable {
    pub fn new(rows: Vec<PartitionRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[PartitionRow] {
        &self.rows
    }

    /// Rows of one group, in table order.
    pub fn group(&self, group: PartitionGroup) -> impl Iterator<Item = &PartitionRow> {
        self.rows.iter().filter(move |r| r.group == group)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The full set of tables a run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub coagulation: LimitTable,
    pub filtration: LimitTable,
    pub disinfection: LimitTable,
    pub advanced: LimitTable,
    pub partition: PartitionTable,
}

impl ReferenceTables {
    /// Parse tables from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| PriError::Config(e.to_string()))
    }

    /// Read and parse a TOML table file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| PriError::Config(format!("{}: {}", path.display(), e)))?;
        let tables = Self::from_toml_str(&source)?;
        info!(path = %path.display(), "loaded reference tables");
        Ok(tables)
    }

    /// The sample tables shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_TABLES)
    }

    /// Locate and load reference tables.
    ///
    /// Search order:
    /// 1. `$PRI_REFERENCE_TABLES`
    /// 2. `./reference_tables.toml`
    /// 3. the bundled sample tables
    pub fn load() -> Result<Self> {
        match Self::locate() {
            Some(path) => Self::from_path(&path),
            None => {
                info!("no reference table file found, using bundled sample tables");
                Self::bundled()
            }
        }
    }

    fn locate() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(TABLES_ENV_VAR) {
            debug!(%path, "reference tables from {}", TABLES_ENV_VAR);
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(TABLES_FILE_NAME);
        local.exists().then_some(local)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PriError::Config(e.to_string()))
    }
}
