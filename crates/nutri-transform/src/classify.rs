//! Nutri-Score grade classification.

use polars::prelude::AnyValue;

use nutri_ingest::any_to_string;
use nutri_model::NutritionQuality;

/// Classifies a grade cell of any type. Null and unrecognized values are
/// [`NutritionQuality::Inconnu`].
pub fn classify_grade(value: AnyValue<'_>) -> NutritionQuality {
    match value {
        AnyValue::Null => NutritionQuality::Inconnu,
        other => NutritionQuality::from_grade(Some(&any_to_string(other))),
    }
}
