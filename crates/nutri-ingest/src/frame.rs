//! Building product tables from extracted rows.

use polars::prelude::*;

use nutri_model::ProductRow;
use nutri_model::columns::{CLEANING_NUMERIC_COLUMNS, PRODUCT_COLUMNS};

/// Builds the 17-column product table. Numeric columns are `Float64`,
/// the rest `String`.
pub fn products_to_frame(rows: &[ProductRow]) -> PolarsResult<DataFrame> {
    let mut text: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut numeric: Vec<(&str, Vec<Option<f64>>)> = Vec::new();
    for name in PRODUCT_COLUMNS {
        if CLEANING_NUMERIC_COLUMNS.contains(&name) {
            numeric.push((name, Vec::with_capacity(rows.len())));
        } else {
            text.push((name, Vec::with_capacity(rows.len())));
        }
    }

    for row in rows {
        for ((_, values), (_, value)) in text.iter_mut().zip(row.text_fields()) {
            values.push(value);
        }
        for ((_, values), (_, value)) in numeric.iter_mut().zip(row.numeric_fields()) {
            values.push(value);
        }
    }

    let mut text = text.into_iter();
    let mut numeric = numeric.into_iter();
    let columns: Vec<Column> = PRODUCT_COLUMNS
        .iter()
        .filter_map(|name| {
            if CLEANING_NUMERIC_COLUMNS.contains(name) {
                numeric
                    .next()
                    .map(|(name, values)| Column::new(name.into(), values))
            } else {
                text.next()
                    .map(|(name, values)| Column::new(name.into(), values))
            }
        })
        .collect();

    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_has_product_schema() {
        let rows = vec![
            ProductRow {
                product_name: "Pain".to_string(),
                energy_kcal: Some(250.0),
                ..ProductRow::default()
            },
            ProductRow::default(),
        ];
        let df = products_to_frame(&rows).unwrap();

        let names: Vec<&str> = df.get_column_names().into_iter().map(|n| n.as_str()).collect();
        assert_eq!(names, PRODUCT_COLUMNS.to_vec());
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("energy_kcal").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("product_name").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("energy_kcal").unwrap().null_count(), 1);
    }

    #[test]
    fn empty_rows_keep_schema() {
        let df = products_to_frame(&[]).unwrap();
        assert_eq!(df.width(), PRODUCT_COLUMNS.len());
        assert_eq!(df.height(), 0);
        assert_eq!(df.column("fat_100g").unwrap().dtype(), &DataType::Float64);
    }
}
