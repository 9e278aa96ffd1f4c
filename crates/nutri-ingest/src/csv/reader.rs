//! Tolerant CSV reading into Polars DataFrames.
//!
//! Malformed records are skipped and counted instead of aborting the load;
//! only an unreadable file or a missing header row is fatal.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, warn};

use nutri_model::columns::CODE;

use crate::error::{IngestError, Result};
use crate::polars_utils::parse_f64;

/// Cell values read as null.
pub const NULL_TOKENS: [&str; 10] = [
    "", "NA", "N/A", "n/a", "#N/A", "NULL", "null", "NaN", "nan", "<NA>",
];

/// How strictly [`read_csv_table`] treats malformed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvReadOptions {
    /// Maximum number of skipped records before the read fails. `None` means
    /// unbounded.
    pub max_bad_records: Option<usize>,
    /// Truncate records with more fields than the header instead of skipping them.
    pub ignore_unknown_values: bool,
    /// Pad records with fewer fields than the header with nulls instead of
    /// skipping them.
    pub allow_jagged_rows: bool,
    /// Columns always read as text, whatever their values look like.
    pub text_columns: &'static [&'static str],
}

/// Identifier columns whose leading zeros must survive a round trip.
const IDENTIFIER_COLUMNS: &[&str] = &[CODE];

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            max_bad_records: None,
            ignore_unknown_values: false,
            allow_jagged_rows: true,
            text_columns: IDENTIFIER_COLUMNS,
        }
    }
}

impl CsvReadOptions {
    /// Bulk-load semantics: bounded bad records, unknown trailing values ignored,
    /// short records rejected.
    pub fn bulk_load(max_bad_records: usize) -> Self {
        Self {
            max_bad_records: Some(max_bad_records),
            ignore_unknown_values: true,
            allow_jagged_rows: false,
            text_columns: IDENTIFIER_COLUMNS,
        }
    }
}

/// A table read from CSV plus the number of records that were skipped.
#[derive(Debug, Clone)]
pub struct CsvLoad {
    pub data: DataFrame,
    pub skipped_records: usize,
}

/// Reads a CSV file with a header row into a DataFrame.
///
/// Column types are inferred per column: `Int64` when every value is an
/// integer, `Float64` when every value is a number, `String` otherwise.
/// Columns listed in [`CsvReadOptions::text_columns`] are always `String`.
pub fn read_csv_table(path: &Path, options: &CsvReadOptions) -> Result<CsvLoad> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .iter()
        .map(str::to_string)
        .collect();
    if raw_headers.is_empty() || raw_headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    let headers = disambiguate_headers(&raw_headers);
    let width = headers.len();

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    let mut skipped = 0usize;

    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(IngestError::CsvParse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
            }
            Err(e) => {
                skipped += 1;
                debug!(path = %path.display(), record = index + 1, error = %e, "skipping undecodable record");
                continue;
            }
        };

        let len = record.len();
        let accepted = len == width
            || (len > width && options.ignore_unknown_values)
            || (len < width && options.allow_jagged_rows);
        if !accepted {
            skipped += 1;
            let line = record.position().map_or(0, |p| p.line());
            debug!(
                path = %path.display(),
                line,
                expected = width,
                found = len,
                "skipping malformed record"
            );
            continue;
        }

        for (col, column_cells) in cells.iter_mut().enumerate() {
            let value = record
                .get(col)
                .filter(|value| !NULL_TOKENS.contains(value))
                .map(str::to_string);
            column_cells.push(value);
        }
    }

    if let Some(max) = options.max_bad_records
        && skipped > max
    {
        return Err(IngestError::TooManyBadRecords {
            path: path.to_path_buf(),
            bad_records: skipped,
            max_bad_records: max,
        });
    }
    if skipped > 0 {
        warn!(path = %path.display(), skipped, "skipped malformed CSV records");
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(cells)
        .map(|(name, values)| {
            if options.text_columns.contains(&name.as_str()) {
                Column::new(name.as_str().into(), values)
            } else {
                typed_column(name, values)
            }
        })
        .collect();
    let data = DataFrame::new(columns)?;

    debug!(
        path = %path.display(),
        rows = data.height(),
        columns = data.width(),
        "read CSV table"
    );
    Ok(CsvLoad {
        data,
        skipped_records: skipped,
    })
}

/// Makes header names unique and non-blank.
fn disambiguate_headers(raw: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (index, name) in raw.iter().enumerate() {
        let name = if index == 0 {
            name.strip_prefix('\u{feff}').unwrap_or(name)
        } else {
            name.as_str()
        };
        let base = if name.trim().is_empty() {
            format!("Unnamed: {index}")
        } else {
            name.to_string()
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}

/// Builds a column with the narrowest type that holds every value.
fn typed_column(name: &str, values: Vec<Option<String>>) -> Column {
    let present = || values.iter().flatten();

    if present().next().is_none() {
        let nulls: Vec<Option<f64>> = vec![None; values.len()];
        return Column::new(name.into(), nulls);
    }
    if present().all(|v| v.trim().parse::<i64>().is_ok()) {
        let ints: Vec<Option<i64>> = values
            .iter()
            .map(|v| v.as_deref().and_then(|s| s.trim().parse::<i64>().ok()))
            .collect();
        return Column::new(name.into(), ints);
    }
    if present().all(|v| parse_f64(v).is_some()) {
        let floats: Vec<Option<f64>> = values
            .iter()
            .map(|v| v.as_deref().and_then(parse_f64))
            .collect();
        return Column::new(name.into(), floats);
    }
    Column::new(name.into(), values)
}
