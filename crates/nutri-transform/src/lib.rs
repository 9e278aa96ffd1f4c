//! Cleaning and transformation of product tables.
//!
//! - **normalization**: text normalization, column naming and numeric coercion
//! - **translate**: lexical translation and transliteration of free text
//! - **classify**: Nutri-Score grade classification
//! - **clean**: the cleaning stage (structural repair before persistence)
//! - **transform**: the transform stage (filtering, enrichment, derived metrics)

pub mod classify;
pub mod clean;
mod error;
mod frame_utils;
pub mod normalization;
pub mod transform;
pub mod translate;

pub use classify::classify_grade;
pub use clean::{CLEAN_MIN_FILL_RATIO, clean_csv_file, clean_table};
pub use error::{Result, TransformError};
pub use normalization::{clean_column_name, coerce_numeric, normalize_text};
pub use transform::{TRANSFORM_MIN_FILL_RATIO, transform_table};
pub use translate::{title_case, translate_text, transliterate_text};
