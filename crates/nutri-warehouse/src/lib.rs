//! Warehouse round trip.
//!
//! A cleaned CSV is bulk-loaded into a table (whole-table replace) and later
//! read back in full. [`LocalWarehouse`] keeps tables as CSV files under a
//! root directory; [`MemoryWarehouse`] keeps them in memory.

mod error;
mod local;
mod memory;
mod table;

pub use error::{Result, WarehouseError};
pub use local::LocalWarehouse;
pub use memory::MemoryWarehouse;
pub use table::{LoadSummary, TableRef};

use std::path::Path;

use polars::prelude::DataFrame;

/// A columnar store addressed by `project.dataset.table` references.
pub trait Warehouse {
    /// Loads a CSV file into `table`, replacing its previous contents.
    ///
    /// The schema is inferred from the file. Up to the configured number of
    /// malformed records are skipped; values past the last header column are
    /// ignored.
    fn load_csv(&mut self, path: &Path, table: &TableRef) -> Result<LoadSummary>;

    /// Returns every row of `table`.
    fn fetch_all(&self, table: &TableRef) -> Result<DataFrame>;
}

impl<W: Warehouse + ?Sized> Warehouse for Box<W> {
    fn load_csv(&mut self, path: &Path, table: &TableRef) -> Result<LoadSummary> {
        (**self).load_csv(path, table)
    }

    fn fetch_all(&self, table: &TableRef) -> Result<DataFrame> {
        (**self).fetch_all(table)
    }
}
