//! Flattening of raw product records.

use serde_json::Value;

use nutri_model::ProductRow;

use crate::polars_utils::parse_f64;

/// Keys read from a record's `nutriments` mapping, in [`ProductRow`] order:
/// energy, fat, saturated fat, sugars, salt, fiber, proteins.
pub const NUTRIMENT_KEYS: [&str; 7] = [
    "energy-kcal_100g",
    "fat_100g",
    "saturated-fat_100g",
    "sugars_100g",
    "salt_100g",
    "fiber_100g",
    "proteins_100g",
];

/// Flattens one raw product record into the fixed row schema.
///
/// Missing text keys become empty strings and missing or non-numeric
/// nutrient values become `None`. Never fails.
pub fn extract_product(record: &Value) -> ProductRow {
    let empty = serde_json::Map::new();
    let nutriments = record
        .get("nutriments")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let nutrient = |key: &str| nutriments.get(key).and_then(number_value);
    let [energy, fat, saturated_fat, sugars, salt, fiber, proteins] = NUTRIMENT_KEYS;

    ProductRow {
        product_name: text_value(record, "product_name"),
        brands: text_value(record, "brands"),
        stores: text_value(record, "stores"),
        nutriscore_grade: text_value(record, "nutriscore_grade"),
        nutrition_score_fr: record.get("nutrition_score_fr").and_then(number_value),
        energy_kcal: nutrient(energy),
        fat_100g: nutrient(fat),
        saturated_fat_100g: nutrient(saturated_fat),
        sugars_100g: nutrient(sugars),
        salt_100g: nutrient(salt),
        fiber_100g: nutrient(fiber),
        proteins_100g: nutrient(proteins),
        labels: text_value(record, "labels"),
        origins: text_value(record, "origins"),
        categories: text_value(record, "categories"),
        url: text_value(record, "url"),
        code: text_value(record, "code"),
    }
}

fn text_value(record: &Value, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => if *b { "True" } else { "False" }.to_string(),
        Some(other) => other.to_string(),
    }
}

fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_f64(s),
        _ => None,
    }
}
