//! Fully quoted CSV output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::polars_utils::any_to_string;

/// Writes `df` to `path`, creating parent directories as needed.
///
/// Every field is quoted. Nulls are written as empty fields.
pub fn write_csv_table(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| IngestError::FileWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| IngestError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(df, file)?;
    tracing::debug!(path = %path.display(), rows = df.height(), "wrote CSV table");
    Ok(())
}

/// Writes `df` as fully quoted CSV to any writer.
pub fn write_csv<W: Write>(df: &DataFrame, writer: W) -> Result<()> {
    let mut out = ::csv::WriterBuilder::new()
        .quote_style(::csv::QuoteStyle::Always)
        .from_writer(writer);

    let header: Vec<&str> = df.get_column_names().into_iter().map(|n| n.as_str()).collect();
    out.write_record(&header).map_err(csv_write_error)?;

    let columns = df.get_columns();
    let mut row: Vec<String> = Vec::with_capacity(columns.len());
    for idx in 0..df.height() {
        row.clear();
        for column in columns {
            row.push(any_to_string(column.get(idx)?));
        }
        out.write_record(&row).map_err(csv_write_error)?;
    }
    out.flush().map_err(|e| IngestError::CsvWrite {
        message: e.to_string(),
    })?;
    Ok(())
}

fn csv_write_error(err: ::csv::Error) -> IngestError {
    IngestError::CsvWrite {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::{CsvReadOptions, read_csv_table};

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Series::new("name".into(), &[Some("Yaourt \"nature\""), None]).into_column(),
            Series::new("energy".into(), &[Some(80.0), Some(7.5)]).into_column(),
            Series::new("bio".into(), &[true, false]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_write_quotes_every_field() {
        let mut buffer = Vec::new();
        write_csv(&sample(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        insta::assert_snapshot!(text, @r#"
        "name","energy","bio"
        "Yaourt ""nature""","80","True"
        "","7.5","False"
        "#);
    }

    #[test]
    fn test_write_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.csv");
        write_csv_table(&sample(), &path).unwrap();

        let load = read_csv_table(&path, &CsvReadOptions::default()).unwrap();
        let names: Vec<&str> = load
            .data
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(names, vec!["name", "energy", "bio"]);
        assert_eq!(load.data.height(), 2);
        assert_eq!(load.data.column("name").unwrap().null_count(), 1);
    }
}
