//! Directory-backed warehouse.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::info;

use nutri_ingest::{CsvReadOptions, read_csv_table, write_csv_table};

use crate::error::{Result, WarehouseError};
use crate::table::{LoadSummary, TableRef};
use crate::Warehouse;

/// Stores each table as `<root>/<project>/<dataset>/<table>.csv`.
#[derive(Debug, Clone)]
pub struct LocalWarehouse {
    root: PathBuf,
    max_bad_records: usize,
}

impl LocalWarehouse {
    pub fn new(root: impl Into<PathBuf>, max_bad_records: usize) -> Self {
        Self {
            root: root.into(),
            max_bad_records,
        }
    }

    pub fn table_path(&self, table: &TableRef) -> PathBuf {
        self.root
            .join(&table.project)
            .join(&table.dataset)
            .join(format!("{}.csv", table.table))
    }
}

impl Warehouse for LocalWarehouse {
    fn load_csv(&mut self, path: &Path, table: &TableRef) -> Result<LoadSummary> {
        let load = read_csv_table(path, &CsvReadOptions::bulk_load(self.max_bad_records))?;
        let target = self.table_path(table);
        let staging = target.with_extension("csv.partial");
        write_csv_table(&load.data, &staging)?;
        std::fs::rename(&staging, &target).map_err(|source| WarehouseError::Io {
            path: target.clone(),
            source,
        })?;

        let summary = LoadSummary {
            rows_loaded: load.data.height(),
            columns: load.data.width(),
            bad_records: load.skipped_records,
        };
        info!(
            table = %table,
            rows = summary.rows_loaded,
            bad_records = summary.bad_records,
            "loaded table"
        );
        Ok(summary)
    }

    fn fetch_all(&self, table: &TableRef) -> Result<DataFrame> {
        let path = self.table_path(table);
        if !path.is_file() {
            return Err(WarehouseError::TableNotFound {
                table: table.to_string(),
            });
        }
        let load = read_csv_table(&path, &CsvReadOptions::default())?;
        info!(table = %table, rows = load.data.height(), "fetched table");
        Ok(load.data)
    }
}
