//! Column catalogue for product tables.
//!
//! Every stage addresses columns by these names. The order of
//! [`PRODUCT_COLUMNS`] is the order of a freshly extracted table and is
//! preserved through cleaning, persistence and transformation.

pub const PRODUCT_NAME: &str = "product_name";
pub const BRANDS: &str = "brands";
pub const STORES: &str = "stores";
pub const NUTRISCORE_GRADE: &str = "nutriscore_grade";
pub const NUTRITION_SCORE_FR: &str = "nutrition_score_fr";
pub const ENERGY_KCAL: &str = "energy_kcal";
pub const FAT: &str = "fat_100g";
pub const SATURATED_FAT: &str = "saturated_fat_100g";
pub const SUGARS: &str = "sugars_100g";
pub const SALT: &str = "salt_100g";
pub const FIBER: &str = "fiber_100g";
pub const PROTEINS: &str = "proteins_100g";
pub const LABELS: &str = "labels";
pub const ORIGINS: &str = "origins";
pub const CATEGORIES: &str = "categories";
pub const URL: &str = "url";
pub const CODE: &str = "code";

/// Derived by the transform stage.
pub const HAS_LABEL_BIO: &str = "has_label_bio";
pub const NUTRIENT_DENSITY: &str = "nutrient_density";
pub const CUSTOM_NUTRITION_SCORE: &str = "custom_nutrition_score";
pub const NUTRITION_QUALITY: &str = "nutrition_quality";

/// The 17 fields of a flat product row, in table order.
pub const PRODUCT_COLUMNS: [&str; 17] = [
    PRODUCT_NAME,
    BRANDS,
    STORES,
    NUTRISCORE_GRADE,
    NUTRITION_SCORE_FR,
    ENERGY_KCAL,
    FAT,
    SATURATED_FAT,
    SUGARS,
    SALT,
    FIBER,
    PROTEINS,
    LABELS,
    ORIGINS,
    CATEGORIES,
    URL,
    CODE,
];

/// Per-100g nutrient columns.
pub const NUTRIENT_COLUMNS: [&str; 7] = [
    ENERGY_KCAL,
    FAT,
    SATURATED_FAT,
    SUGARS,
    SALT,
    FIBER,
    PROTEINS,
];

/// Columns coerced to numbers by the cleaning stage: the nutrients plus the
/// numeric nutrition score.
pub const CLEANING_NUMERIC_COLUMNS: [&str; 8] = [
    ENERGY_KCAL,
    FAT,
    SATURATED_FAT,
    SUGARS,
    SALT,
    FIBER,
    PROTEINS,
    NUTRITION_SCORE_FR,
];

/// Columns coerced to numbers by the transform stage.
pub const TRANSFORM_NUMERIC_COLUMNS: [&str; 7] = NUTRIENT_COLUMNS;

/// Free-text columns that are lowercased, translated and title-cased.
pub const FREE_TEXT_COLUMNS: [&str; 5] = [LABELS, BRANDS, CATEGORIES, ORIGINS, STORES];

/// A row missing any of these (when the column exists) is dropped by the
/// transform stage.
pub const REQUIRED_NUTRIENT_COLUMNS: [&str; 5] =
    [ENERGY_KCAL, SUGARS, SATURATED_FAT, PROTEINS, FIBER];

/// Fill value for a missing product name.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown";

/// Names treated as the missing-name sentinel (compared case-insensitively).
pub const UNKNOWN_NAME_SENTINELS: [&str; 2] = ["unknown", "inconnu"];

/// Returns true if `name` is one of the missing-name sentinels.
pub fn is_unknown_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    UNKNOWN_NAME_SENTINELS.contains(&lowered.as_str())
}
