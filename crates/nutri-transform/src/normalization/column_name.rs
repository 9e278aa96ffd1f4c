//! Column label cleaning.

use std::sync::LazyLock;

use regex::Regex;

static UNDERSCORE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__+").expect("Invalid underscore regex"));

/// Cleans a column label: trim, replace every character other than
/// `[A-Za-z0-9_]` with `_`, collapse underscore runs and strip underscores
/// from both ends. Idempotent.
pub fn clean_column_name(name: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    UNDERSCORE_RUN
        .replace_all(&replaced, "_")
        .trim_matches('_')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_labels() {
        assert_eq!(clean_column_name(" energy-kcal_100g "), "energy_kcal_100g");
        assert_eq!(clean_column_name("Unnamed: 0"), "Unnamed_0");
        assert_eq!(clean_column_name("__a  b__"), "a_b");
        assert_eq!(clean_column_name("énergie"), "nergie");
        assert_eq!(clean_column_name("???"), "");
    }
}
