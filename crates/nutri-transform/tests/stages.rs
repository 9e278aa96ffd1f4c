//! Cleaning and transform stage scenarios.

use nutri_ingest::{extract_product, products_to_frame, write_csv_table};
use nutri_transform::{clean_csv_file, clean_table, transform_table};
use polars::prelude::*;
use serde_json::json;

fn nine_column_frame(rows: &[[Option<&str>; 9]]) -> DataFrame {
    let columns = (0..9)
        .map(|col| {
            let values: Vec<Option<&str>> = rows.iter().map(|row| row[col]).collect();
            Column::new(format!("c{col}").into(), values)
        })
        .collect();
    DataFrame::new(columns).unwrap()
}

#[test]
fn cleaning_keeps_rows_at_the_fill_threshold() {
    let numeric = |name: &str, values: &[Option<f64>]| {
        Series::new(name.into(), values).into_column()
    };
    let df = DataFrame::new(vec![
        numeric("energy_kcal", &[Some(1.0), Some(1.0)]),
        numeric("fat_100g", &[Some(1.0), Some(1.0)]),
        numeric("saturated_fat_100g", &[Some(1.0), None]),
        numeric("sugars_100g", &[None, None]),
        numeric("salt_100g", &[None, None]),
        numeric("fiber_100g", &[None, None]),
        numeric("proteins_100g", &[None, None]),
        numeric("nutrition_score_fr", &[None, None]),
        numeric("extra", &[None, None]),
    ])
    .unwrap();

    // 0.3 × 9 = 2.7: three non-null cells survive, two do not.
    let cleaned = clean_table(df).unwrap();
    assert_eq!(cleaned.height(), 1);
}

#[test]
fn mostly_null_column_does_not_drop_filled_rows() {
    let full = [Some("x"); 9];
    let mut sparse = [Some("y"); 9];
    sparse[8] = None;
    let cleaned = clean_table(nine_column_frame(&[full, sparse, full])).unwrap();
    assert_eq!(cleaned.height(), 3);
}

#[test]
fn empty_table_passes_through_transform() {
    let df = products_to_frame(&[]).unwrap();
    let out = transform_table(df.clone()).unwrap();
    assert!(out.equals_missing(&df));

    let no_columns = DataFrame::empty();
    assert_eq!(transform_table(no_columns).unwrap().width(), 0);
}

#[test]
fn unknown_products_are_always_dropped() {
    let records = [
        json!({
            "product_name": "UNKNOWN",
            "brands": "x",
            "nutriscore_grade": "a",
            "nutriments": {
                "energy-kcal_100g": 1, "fat_100g": 1, "saturated-fat_100g": 1,
                "sugars_100g": 1, "salt_100g": 1, "fiber_100g": 1, "proteins_100g": 1
            }
        }),
        json!({ "product_name": "Inconnu" }),
        json!({}),
    ];
    let rows: Vec<_> = records.iter().map(extract_product).collect();
    let mut df = products_to_frame(&rows).unwrap();
    // A missing name becomes null on the way through CSV.
    let names = Series::new("product_name".into(), &[Some("UNKNOWN"), Some("Inconnu"), None]);
    df.with_column(names).unwrap();

    let out = transform_table(df).unwrap();
    assert_eq!(out.height(), 0);
}

#[test]
fn zero_macronutrients_floor_the_density_denominator() {
    let df = DataFrame::new(vec![
        Series::new("product_name".into(), &["Eau"]).into_column(),
        Series::new("energy_kcal".into(), &[100.0]).into_column(),
        Series::new("proteins_100g".into(), &[0.0]).into_column(),
        Series::new("fat_100g".into(), &[0.0]).into_column(),
        Series::new("sugars_100g".into(), &[0.0]).into_column(),
    ])
    .unwrap();
    let out = transform_table(df).unwrap();

    let density = out.column("nutrient_density").unwrap().f64().unwrap();
    assert_eq!(density.get(0), Some(100.0));
}

#[test]
fn custom_score_adds_negatives_and_subtracts_positives() {
    let df = DataFrame::new(vec![
        Series::new("product_name".into(), &["Biscuit"]).into_column(),
        Series::new("energy_kcal".into(), &[50.0]).into_column(),
        Series::new("sugars_100g".into(), &[10.0]).into_column(),
        Series::new("saturated_fat_100g".into(), &[5.0]).into_column(),
        Series::new("proteins_100g".into(), &[2.0]).into_column(),
        Series::new("fiber_100g".into(), &[1.0]).into_column(),
    ])
    .unwrap();
    let out = transform_table(df).unwrap();

    let score = out.column("custom_nutrition_score").unwrap().f64().unwrap();
    assert_eq!(score.get(0), Some(62.0));
}

#[test]
fn transform_drops_rows_below_half_filled() {
    let df = DataFrame::new(vec![
        Series::new("product_name".into(), &["Pomme", "Poire"]).into_column(),
        Series::new("url".into(), &[Some("https://example.org/pomme"), None]).into_column(),
        Series::new("salt_100g".into(), &[None::<f64>, None]).into_column(),
        Series::new("code".into(), &[None::<&str>, None]).into_column(),
    ])
    .unwrap();
    let out = transform_table(df).unwrap();

    assert_eq!(out.height(), 1);
    let names = out.column("product_name").unwrap().str().unwrap();
    assert_eq!(names.get(0), Some("Pomme"));
}

#[test]
fn organic_yogurt_end_to_end() {
    let record = json!({
        "product_name": "Bio Yaourt",
        "labels": "organic",
        "nutriscore_grade": "a",
        "nutriments": {
            "energy-kcal_100g": 80,
            "proteins_100g": 5,
            "fat_100g": 2,
            "sugars_100g": 4,
            "fiber_100g": 1,
            "saturated-fat_100g": 1
        }
    });
    let row = extract_product(&record);
    assert_eq!(row.labels, "organic");

    let dir = tempfile::tempdir().unwrap();
    let original = dir.path().join("original.csv");
    let cleaned_path = dir.path().join("cleaned.csv");
    let df = clean_table(products_to_frame(&[row]).unwrap()).unwrap();
    write_csv_table(&df, &original).unwrap();
    let cleaned = clean_csv_file(&original, &cleaned_path).unwrap();
    assert_eq!(cleaned.height(), 1);

    let out = transform_table(cleaned).unwrap();
    assert_eq!(out.height(), 1);

    let labels = out.column("labels").unwrap().str().unwrap();
    assert_eq!(labels.get(0), Some("Bio"));
    let bio = out.column("has_label_bio").unwrap().bool().unwrap();
    assert_eq!(bio.get(0), Some(true));
    let quality = out.column("nutrition_quality").unwrap().str().unwrap();
    assert_eq!(quality.get(0), Some("Excellent"));
    let density = out.column("nutrient_density").unwrap().f64().unwrap();
    let expected = 80.0 / 11.0;
    assert!((density.get(0).unwrap() - expected).abs() < 1e-9);
    assert!((expected - 7.27).abs() < 0.01);
    let score = out.column("custom_nutrition_score").unwrap().f64().unwrap();
    assert_eq!(score.get(0), Some(79.0));
    let grade = out.column("nutriscore_grade").unwrap().str().unwrap();
    assert_eq!(grade.get(0), Some("A"));
}

#[test]
fn free_text_is_translated_and_title_cased() {
    let df = DataFrame::new(vec![
        Series::new("product_name".into(), &["Soupe"]).into_column(),
        Series::new("categories".into(), &["  Ready-Meals, Soups "]).into_column(),
        Series::new("stores".into(), &["كارفور"]).into_column(),
        Series::new("origins".into(), &[None::<&str>]).into_column(),
    ])
    .unwrap();
    let out = transform_table(df).unwrap();

    let categories = out.column("categories").unwrap().str().unwrap();
    assert_eq!(categories.get(0), Some("Plats Prepares, Soups"));
    let stores = out.column("stores").unwrap().str().unwrap();
    assert_eq!(stores.get(0), Some("Carrefour"));
    let origins = out.column("origins").unwrap().str().unwrap();
    assert_eq!(origins.get(0), Some(""));
}

#[test]
fn output_appends_derived_columns() {
    let df = products_to_frame(&[nutri_model::ProductRow {
        product_name: "Pain".to_string(),
        energy_kcal: Some(250.0),
        sugars_100g: Some(3.0),
        saturated_fat_100g: Some(0.5),
        proteins_100g: Some(8.0),
        fiber_100g: Some(6.0),
        ..Default::default()
    }])
    .unwrap();
    let out = transform_table(df).unwrap();
    let names: Vec<&str> = out.get_column_names().into_iter().map(|n| n.as_str()).collect();

    assert_eq!(names.len(), 21);
    assert_eq!(
        &names[17..],
        &["has_label_bio", "nutrient_density", "custom_nutrition_score", "nutrition_quality"]
    );
}
