//! The cleaning stage.
//!
//! Repairs a freshly extracted or externally persisted table before it is
//! written out: column labels are cleaned, text cells normalized, nutrient
//! columns coerced to numbers and mostly-empty rows dropped.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use polars::prelude::*;
use tracing::{debug, info, info_span};

use nutri_ingest::{CsvReadOptions, is_numeric_dtype, read_csv_table, write_csv_table};
use nutri_model::columns::CLEANING_NUMERIC_COLUMNS;

use crate::error::{Result, TransformError};
use crate::frame_utils::drop_sparse_rows;
use crate::normalization::{clean_column_name, coerce_numeric, normalize_value};

/// Rows need at least this share of non-null cells to survive cleaning.
pub const CLEAN_MIN_FILL_RATIO: f64 = 0.3;

/// Runs the cleaning stage over an in-memory table.
pub fn clean_table(df: DataFrame) -> Result<DataFrame> {
    let span = info_span!("clean", rows = df.height(), columns = df.width());
    let _guard = span.enter();
    let start = Instant::now();
    let rows_in = df.height();

    let mut df = rename_columns(df)?;
    normalize_text_columns(&mut df)?;
    for name in CLEANING_NUMERIC_COLUMNS {
        if let Ok(column) = df.column(name) {
            let coerced = coerce_numeric(column)?;
            df.with_column(coerced)?;
        }
    }
    let df = drop_sparse_rows(&df, CLEAN_MIN_FILL_RATIO)?;

    info!(
        rows_in,
        rows_out = df.height(),
        duration_ms = start.elapsed().as_millis(),
        "cleaning complete"
    );
    Ok(df)
}

/// Reads `input`, cleans it and writes the result to `output`.
///
/// Malformed lines in `input` are skipped; an unreadable file is an error.
pub fn clean_csv_file(input: &Path, output: &Path) -> Result<DataFrame> {
    let load = read_csv_table(input, &CsvReadOptions::default())?;
    info!(
        path = %input.display(),
        rows = load.data.height(),
        skipped = load.skipped_records,
        "loaded CSV for cleaning"
    );
    let cleaned = clean_table(load.data)?;
    write_csv_table(&cleaned, output)?;
    info!(path = %output.display(), rows = cleaned.height(), "saved cleaned CSV");
    Ok(cleaned)
}

fn rename_columns(df: DataFrame) -> Result<DataFrame> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(df.width());
    for column in df.take_columns() {
        let name = clean_column_name(column.name());
        if !seen.insert(name.clone()) {
            return Err(TransformError::DuplicateColumn { name });
        }
        if name != column.name().as_str() {
            debug!(from = %column.name(), to = %name, "renamed column");
        }
        columns.push(column.with_name(name.into()));
    }
    Ok(DataFrame::new(columns)?)
}

/// Normalizes every column that is neither numeric nor boolean.
fn normalize_text_columns(df: &mut DataFrame) -> Result<()> {
    let names: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|c| !is_numeric_dtype(c.dtype()) && c.dtype() != &DataType::Boolean)
        .map(|c| c.name().clone())
        .collect();

    for name in names {
        let column = df.column(name.as_str())?;
        let mut values = Vec::with_capacity(column.len());
        for idx in 0..column.len() {
            values.push(normalize_value(column.get(idx)?));
        }
        df.with_column(Column::new(name, values))?;
    }
    Ok(())
}
