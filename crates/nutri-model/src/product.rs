//! The flat product row produced by record extraction.

use serde::{Deserialize, Serialize};

/// One product flattened into the fixed 17-field schema.
///
/// Text fields are empty when the source record lacks them; numeric fields
/// are `None`. Field order matches [`crate::columns::PRODUCT_COLUMNS`].
/// `code` identifies a product but is not unique across a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub product_name: String,
    pub brands: String,
    pub stores: String,
    pub nutriscore_grade: String,
    pub nutrition_score_fr: Option<f64>,
    pub energy_kcal: Option<f64>,
    pub fat_100g: Option<f64>,
    pub saturated_fat_100g: Option<f64>,
    pub sugars_100g: Option<f64>,
    pub salt_100g: Option<f64>,
    pub fiber_100g: Option<f64>,
    pub proteins_100g: Option<f64>,
    pub labels: String,
    pub origins: String,
    pub categories: String,
    pub url: String,
    pub code: String,
}

impl ProductRow {
    /// Text fields in table order, paired with their column names.
    pub fn text_fields(&self) -> [(&'static str, &str); 9] {
        use crate::columns::{
            BRANDS, CATEGORIES, CODE, LABELS, NUTRISCORE_GRADE, ORIGINS, PRODUCT_NAME, STORES,
            URL,
        };
        [
            (PRODUCT_NAME, self.product_name.as_str()),
            (BRANDS, self.brands.as_str()),
            (STORES, self.stores.as_str()),
            (NUTRISCORE_GRADE, self.nutriscore_grade.as_str()),
            (LABELS, self.labels.as_str()),
            (ORIGINS, self.origins.as_str()),
            (CATEGORIES, self.categories.as_str()),
            (URL, self.url.as_str()),
            (CODE, self.code.as_str()),
        ]
    }

    /// Numeric fields in table order, paired with their column names.
    pub fn numeric_fields(&self) -> [(&'static str, Option<f64>); 8] {
        use crate::columns::{
            ENERGY_KCAL, FAT, FIBER, NUTRITION_SCORE_FR, PROTEINS, SALT, SATURATED_FAT, SUGARS,
        };
        [
            (NUTRITION_SCORE_FR, self.nutrition_score_fr),
            (ENERGY_KCAL, self.energy_kcal),
            (FAT, self.fat_100g),
            (SATURATED_FAT, self.saturated_fat_100g),
            (SUGARS, self.sugars_100g),
            (SALT, self.salt_100g),
            (FIBER, self.fiber_100g),
            (PROTEINS, self.proteins_100g),
        ]
    }
}
