//! The transform stage.
//!
//! Turns a cleaned table into the analytical table: numeric coercion,
//! text canonicalization, three row filters, dictionary translation of the
//! free-text columns and four derived columns appended at the end.
//!
//! Columns the input lacks are never created, with the exception of the
//! derived columns. A missing nutrient column reads as all null, a missing
//! grade column classifies every row as unknown.

use std::time::Instant;

use polars::prelude::*;
use tracing::{debug, info, info_span};

use nutri_model::NutritionQuality;
use nutri_model::columns::{
    CUSTOM_NUTRITION_SCORE, ENERGY_KCAL, FAT, FIBER, FREE_TEXT_COLUMNS, HAS_LABEL_BIO, LABELS,
    NUTRIENT_DENSITY, NUTRISCORE_GRADE, NUTRITION_QUALITY, PRODUCT_NAME, PROTEINS,
    REQUIRED_NUTRIENT_COLUMNS, SATURATED_FAT, SUGARS, TRANSFORM_NUMERIC_COLUMNS,
    UNKNOWN_PRODUCT_NAME, is_unknown_name,
};

use crate::classify::classify_grade;
use crate::error::Result;
use crate::frame_utils::{drop_sparse_rows, f64_values, filter_rows, string_values};
use crate::normalization::coerce_numeric;
use crate::translate::{title_case, translate_text, transliterate_text};

/// Rows need at least this share of non-null cells to survive the transform.
pub const TRANSFORM_MIN_FILL_RATIO: f64 = 0.5;

/// Runs the transform stage. An empty table is returned unchanged.
pub fn transform_table(df: DataFrame) -> Result<DataFrame> {
    if df.height() == 0 || df.width() == 0 {
        info!(columns = df.width(), "empty table, nothing to transform");
        return Ok(df);
    }

    let span = info_span!("transform", rows = df.height(), columns = df.width());
    let _guard = span.enter();
    let start = Instant::now();
    let rows_in = df.height();

    let mut df = df;
    for name in TRANSFORM_NUMERIC_COLUMNS {
        if let Ok(column) = df.column(name) {
            let coerced = coerce_numeric(column)?;
            df.with_column(coerced)?;
        }
    }

    map_text_column(&mut df, NUTRISCORE_GRADE, |grade| {
        grade.unwrap_or_default().to_uppercase()
    })?;
    map_text_column(&mut df, PRODUCT_NAME, |name| {
        name.unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string())
    })?;
    for name in FREE_TEXT_COLUMNS {
        map_text_column(&mut df, name, |value| {
            value.unwrap_or_default().to_lowercase().trim().to_string()
        })?;
    }

    let df = drop_unknown_names(df)?;
    let df = drop_sparse_rows(&df, TRANSFORM_MIN_FILL_RATIO)?;
    debug!(rows = df.height(), "after fill-ratio filter");
    let mut df = drop_missing_nutrients(df)?;
    debug!(rows = df.height(), "after required-nutrient filter");

    for name in FREE_TEXT_COLUMNS {
        map_text_column(&mut df, name, |value| {
            let translated = transliterate_text(&translate_text(&value.unwrap_or_default()));
            title_case(&translated).trim().to_string()
        })?;
    }

    add_derived_columns(&mut df)?;

    info!(
        rows_in,
        rows_out = df.height(),
        duration_ms = start.elapsed().as_millis(),
        "transform complete"
    );
    Ok(df)
}

/// Replaces a column with `f` applied to every cell. Absent columns are skipped.
fn map_text_column<F>(df: &mut DataFrame, name: &str, f: F) -> Result<()>
where
    F: Fn(Option<String>) -> String,
{
    let Some(values) = string_values(df, name)? else {
        return Ok(());
    };
    let mapped: Vec<String> = values.into_iter().map(f).collect();
    df.with_column(Column::new(name.into(), mapped))?;
    Ok(())
}

fn drop_unknown_names(df: DataFrame) -> Result<DataFrame> {
    let Some(names) = string_values(&df, PRODUCT_NAME)? else {
        return Ok(df);
    };
    let keep: Vec<bool> = names
        .iter()
        .map(|name| !name.as_deref().is_some_and(is_unknown_name))
        .collect();
    let kept = filter_rows(&df, &keep)?;
    debug!(dropped = df.height() - kept.height(), "dropped unknown products");
    Ok(kept)
}

fn drop_missing_nutrients(df: DataFrame) -> Result<DataFrame> {
    let mut keep = vec![true; df.height()];
    let mut constrained = false;
    for name in REQUIRED_NUTRIENT_COLUMNS {
        let Ok(column) = df.column(name) else {
            continue;
        };
        constrained = true;
        let present = column.as_materialized_series().is_not_null();
        for (row, is_present) in keep.iter_mut().zip(&present) {
            *row &= is_present == Some(true);
        }
    }
    if !constrained {
        return Ok(df);
    }
    Ok(filter_rows(&df, &keep)?)
}

fn add_derived_columns(df: &mut DataFrame) -> Result<()> {
    let height = df.height();

    let has_label_bio: Vec<bool> = match string_values(df, LABELS)? {
        Some(labels) => labels
            .iter()
            .map(|label| {
                label
                    .as_deref()
                    .is_some_and(|l| l.to_lowercase().contains("bio"))
            })
            .collect(),
        None => vec![false; height],
    };

    let energy = f64_values(df, ENERGY_KCAL)?;
    let proteins = f64_values(df, PROTEINS)?;
    let fat = f64_values(df, FAT)?;
    let sugars = f64_values(df, SUGARS)?;
    let saturated_fat = f64_values(df, SATURATED_FAT)?;
    let fiber = f64_values(df, FIBER)?;
    let zero = |v: Option<f64>| v.unwrap_or(0.0);

    let mut density: Vec<Option<f64>> = Vec::with_capacity(height);
    let mut score: Vec<f64> = Vec::with_capacity(height);
    for i in 0..height {
        let mass = zero(proteins[i]) + zero(fat[i]) + zero(sugars[i]);
        let denominator = if mass == 0.0 { 1.0 } else { mass };
        density.push(energy[i].map(|e| e / denominator));
        score.push(
            zero(energy[i]) + zero(sugars[i]) + zero(saturated_fat[i])
                - (zero(proteins[i]) + zero(fiber[i])),
        );
    }

    let quality: Vec<&str> = match df.column(NUTRISCORE_GRADE) {
        Ok(grades) => {
            let mut labels = Vec::with_capacity(height);
            for idx in 0..height {
                labels.push(classify_grade(grades.get(idx)?).as_str());
            }
            labels
        }
        Err(_) => vec![NutritionQuality::Inconnu.as_str(); height],
    };

    df.with_column(Column::new(HAS_LABEL_BIO.into(), has_label_bio))?;
    df.with_column(Column::new(NUTRIENT_DENSITY.into(), density))?;
    df.with_column(Column::new(CUSTOM_NUTRITION_SCORE.into(), score))?;
    df.with_column(Column::new(NUTRITION_QUALITY.into(), quality))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_grade_column_is_unknown_quality() {
        let df = DataFrame::new(vec![
            Series::new("product_name".into(), &["Pomme"]).into_column(),
        ])
        .unwrap();
        let out = transform_table(df).unwrap();

        let quality = out.column(NUTRITION_QUALITY).unwrap().str().unwrap();
        assert_eq!(quality.get(0), Some("Inconnu"));
        let bio = out.column(HAS_LABEL_BIO).unwrap().bool().unwrap();
        assert_eq!(bio.get(0), Some(false));
        let density = out.column(NUTRIENT_DENSITY).unwrap().f64().unwrap();
        assert_eq!(density.get(0), None);
        assert!(out.column(LABELS).is_err());
    }

    #[test]
    fn nulls_in_required_nutrients_drop_rows() {
        let df = DataFrame::new(vec![
            Series::new("product_name".into(), &["A", "B"]).into_column(),
            Series::new("energy_kcal".into(), &[Some(10.0), None]).into_column(),
            Series::new("sugars_100g".into(), &[Some(1.0), Some(1.0)]).into_column(),
        ])
        .unwrap();
        let out = transform_table(df).unwrap();
        assert_eq!(out.height(), 1);
    }

    #[test]
    fn negative_mass_is_not_floored() {
        let df = DataFrame::new(vec![
            Series::new("product_name".into(), &["A"]).into_column(),
            Series::new("energy_kcal".into(), &[10.0]).into_column(),
            Series::new("fat_100g".into(), &[-2.0]).into_column(),
        ])
        .unwrap();
        let out = transform_table(df).unwrap();
        let density = out.column(NUTRIENT_DENSITY).unwrap().f64().unwrap();
        assert_eq!(density.get(0), Some(-5.0));
    }
}
