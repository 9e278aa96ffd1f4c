//! In-memory warehouse.

use std::collections::HashMap;
use std::path::Path;

use polars::prelude::DataFrame;
use tracing::info;

use nutri_ingest::{CsvReadOptions, read_csv_table};

use crate::error::{Result, WarehouseError};
use crate::table::{LoadSummary, TableRef};
use crate::Warehouse;

/// Holds loaded tables for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryWarehouse {
    tables: HashMap<TableRef, DataFrame>,
    max_bad_records: usize,
}

impl MemoryWarehouse {
    pub fn new(max_bad_records: usize) -> Self {
        Self {
            tables: HashMap::new(),
            max_bad_records,
        }
    }

    pub fn contains(&self, table: &TableRef) -> bool {
        self.tables.contains_key(table)
    }
}

impl Warehouse for MemoryWarehouse {
    fn load_csv(&mut self, path: &Path, table: &TableRef) -> Result<LoadSummary> {
        let load = read_csv_table(path, &CsvReadOptions::bulk_load(self.max_bad_records))?;
        let summary = LoadSummary {
            rows_loaded: load.data.height(),
            columns: load.data.width(),
            bad_records: load.skipped_records,
        };
        info!(table = %table, rows = summary.rows_loaded, "loaded table");
        self.tables.insert(table.clone(), load.data);
        Ok(summary)
    }

    fn fetch_all(&self, table: &TableRef) -> Result<DataFrame> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| WarehouseError::TableNotFound {
                table: table.to_string(),
            })
    }
}
