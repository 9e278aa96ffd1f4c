//! Lenient numeric coercion.

use polars::prelude::*;

use nutri_ingest::any_to_f64;

/// Coerces a column to `Float64`.
///
/// Values that are not numbers (including NaN) become null; booleans become
/// 1 and 0.
pub fn coerce_numeric(column: &Column) -> PolarsResult<Column> {
    let mut values: Vec<Option<f64>> = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        let value = match column.get(idx)? {
            AnyValue::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
            other => any_to_f64(other),
        };
        values.push(value);
    }
    Ok(Column::new(column.name().clone(), values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_mixed_text() {
        let column = Series::new("fat".into(), &[Some("1.5"), Some("abc"), None, Some(" 2 ")])
            .into_column();
        let coerced = coerce_numeric(&column).unwrap();
        let values: Vec<Option<f64>> = coerced.f64().unwrap().into_iter().collect();

        assert_eq!(coerced.name().as_str(), "fat");
        assert_eq!(values, vec![Some(1.5), None, None, Some(2.0)]);
    }

    #[test]
    fn nan_becomes_null() {
        let column = Series::new("x".into(), &[1.0, f64::NAN]).into_column();
        let coerced = coerce_numeric(&column).unwrap();
        assert_eq!(coerced.null_count(), 1);
    }

    #[test]
    fn integers_are_widened() {
        let column = Series::new("x".into(), &[3i64, 4]).into_column();
        let coerced = coerce_numeric(&column).unwrap();
        assert_eq!(coerced.dtype(), &DataType::Float64);
    }
}
