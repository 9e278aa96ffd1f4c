//! Value-level normalization used by both stages.
//!
//! - **text**: control-character removal, whitespace collapsing, truncation
//! - **column_name**: column label cleaning
//! - **numeric**: lenient numeric coercion of whole columns

pub mod column_name;
pub mod numeric;
pub mod text;

pub use column_name::clean_column_name;
pub use numeric::coerce_numeric;
pub use text::{MAX_TEXT_CHARS, normalize_text, normalize_value};
