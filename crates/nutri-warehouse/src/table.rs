//! Table references and load results.

use std::fmt;
use std::str::FromStr;

use crate::error::WarehouseError;

/// A fully qualified table reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub project: String,
    pub dataset: String,
    pub table: String,
}

impl TableRef {
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        }
    }

    pub fn from_config(config: &nutri_model::WarehouseConfig) -> Self {
        Self::new(&config.project_id, &config.dataset_id, &config.table_id)
    }

    /// Points `config` at this table.
    pub fn apply_to(&self, config: &mut nutri_model::WarehouseConfig) {
        config.project_id.clone_from(&self.project);
        config.dataset_id.clone_from(&self.dataset);
        config.table_id.clone_from(&self.table);
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}

impl FromStr for TableRef {
    type Err = WarehouseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        match parts.as_slice() {
            [project, dataset, table]
                if [project, dataset, table].iter().all(|p| !p.is_empty()) =>
            {
                Ok(Self::new(*project, *dataset, *table))
            }
            _ => Err(WarehouseError::InvalidTableRef {
                reference: s.to_string(),
            }),
        }
    }
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows_loaded: usize,
    pub columns: usize,
    pub bad_records: usize,
}
