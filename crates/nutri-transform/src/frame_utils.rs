//! Row-wise helpers over DataFrames.

use polars::prelude::*;

use nutri_ingest::{any_to_f64, any_to_string};

/// Number of non-null cells in every row.
pub fn row_non_null_counts(df: &DataFrame) -> Vec<usize> {
    let mut counts = vec![0usize; df.height()];
    for column in df.get_columns() {
        let present = column.as_materialized_series().is_not_null();
        for (count, is_present) in counts.iter_mut().zip(&present) {
            if is_present == Some(true) {
                *count += 1;
            }
        }
    }
    counts
}

/// Keeps the rows whose mask entry is true.
pub fn filter_rows(df: &DataFrame, keep: &[bool]) -> PolarsResult<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    df.filter(&mask)
}

/// Drops rows with fewer than `ratio × width` non-null cells.
pub fn drop_sparse_rows(df: &DataFrame, ratio: f64) -> PolarsResult<DataFrame> {
    let threshold = ratio * df.width() as f64;
    let keep: Vec<bool> = row_non_null_counts(df)
        .into_iter()
        .map(|count| count as f64 >= threshold)
        .collect();
    filter_rows(df, &keep)
}

/// Column values as strings; null stays `None`. `None` if the column is absent.
pub fn string_values(df: &DataFrame, name: &str) -> PolarsResult<Option<Vec<Option<String>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        values.push(match column.get(idx)? {
            AnyValue::Null => None,
            other => Some(any_to_string(other)),
        });
    }
    Ok(Some(values))
}

/// Column values as numbers. An absent column reads as all null.
pub fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let Ok(column) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        values.push(any_to_f64(column.get(idx)?));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("a".into(), &[Some(1.0), None, None]).into_column(),
            Series::new("b".into(), &[Some("x"), Some("y"), None]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn counts_non_null_cells() {
        assert_eq!(row_non_null_counts(&frame()), vec![2, 1, 0]);
    }

    #[test]
    fn drops_rows_below_threshold() {
        let kept = drop_sparse_rows(&frame(), 0.5).unwrap();
        assert_eq!(kept.height(), 2);
    }

    #[test]
    fn absent_columns() {
        let df = frame();
        assert!(string_values(&df, "missing").unwrap().is_none());
        assert_eq!(f64_values(&df, "missing").unwrap(), vec![None, None, None]);
        assert_eq!(
            string_values(&df, "b").unwrap().unwrap(),
            vec![Some("x".to_string()), Some("y".to_string()), None]
        );
    }
}
