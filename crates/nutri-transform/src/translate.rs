//! Lexical translation of free-text product fields.
//!
//! Two static dictionaries are applied in order: English food, region and
//! retailer terms to French (whole word, case-insensitive), then
//! Arabic-script brand and retailer names to Latin script (whole word, exact
//! case).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// English term to French term, applied in this order.
pub const TRANSLATIONS: &[(&str, &str)] = &[
    ("organic", "bio"),
    ("gluten-free", "sans gluten"),
    ("vegetarian", "vegetarien"),
    ("vegan", "vegetalien"),
    ("non-gmo", "sans OGM"),
    ("halal", "halal"),
    ("kosher", "kasher"),
    ("beverages", "boissons"),
    ("dairies", "produits laitiers"),
    ("sodas", "sodas"),
    ("snacks", "snacks"),
    ("cereals", "cereales"),
    ("meats", "viandes"),
    ("ready-meals", "plats prepares"),
    ("breakfasts", "petits-dejeuners"),
    ("cheeses", "fromages"),
    ("desserts", "desserts"),
    ("france", "France"),
    ("germany", "Allemagne"),
    ("italy", "Italie"),
    ("spain", "Espagne"),
    ("carrefour", "Carrefour"),
    ("leclerc", "Leclerc"),
    ("lidl", "Lidl"),
    ("auchan", "Auchan"),
    ("monoprix", "Monoprix"),
];

/// Arabic-script token to Latin-script equivalent, applied in this order.
pub const TRANSLITERATIONS: &[(&str, &str)] = &[
    ("سلطان", "Sultan"),
    ("الراية", "Al-Raya"),
    ("كارفور", "Carrefour"),
    ("أوشان", "Auchan"),
    ("ليدل", "Lidl"),
];

static TRANSLATION_RULES: LazyLock<Vec<(Regex, &'static str)>> =
    LazyLock::new(|| compile_rules(TRANSLATIONS, true));

static TRANSLITERATION_RULES: LazyLock<Vec<(Regex, &'static str)>> =
    LazyLock::new(|| compile_rules(TRANSLITERATIONS, false));

fn compile_rules(
    dictionary: &'static [(&'static str, &'static str)],
    ignore_case: bool,
) -> Vec<(Regex, &'static str)> {
    let flags = if ignore_case { "(?i)" } else { "" };
    dictionary
        .iter()
        .map(|(term, replacement)| {
            let pattern = format!(r"{flags}\b{}\b", regex::escape(term));
            let regex = Regex::new(&pattern).expect("Invalid dictionary term regex");
            (regex, *replacement)
        })
        .collect()
}

fn apply_rules(text: &str, rules: &[(Regex, &'static str)]) -> String {
    let mut current = text.to_string();
    for (regex, replacement) in rules {
        let replaced = match regex.replace_all(&current, NoExpand(*replacement)) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(replaced) => replaced,
        };
        current = replaced;
    }
    current
}

/// Replaces whole-word English terms with their French equivalents.
pub fn translate_text(text: &str) -> String {
    apply_rules(text, &TRANSLATION_RULES)
}

/// Replaces whole-word Arabic-script tokens with Latin-script equivalents.
pub fn transliterate_text(text: &str) -> String {
    apply_rules(text, &TRANSLITERATION_RULES)
}

/// Title-cases text: the first cased letter after any uncased character is
/// uppercased, every other cased letter is lowercased.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;
    for c in text.chars() {
        if previous_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_cased = c.is_lowercase() || c.is_uppercase();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_whole_words_only() {
        assert_eq!(translate_text("organic, vegan"), "bio, vegetalien");
        assert_eq!(translate_text("Organic Cereals"), "bio cereales");
        assert_eq!(translate_text("organically grown"), "organically grown");
        assert_eq!(translate_text("en:gluten-free"), "en:sans gluten");
    }

    #[test]
    fn translates_retailers_and_regions() {
        assert_eq!(translate_text("lidl,carrefour"), "Lidl,Carrefour");
        assert_eq!(translate_text("spain"), "Espagne");
    }

    #[test]
    fn transliterates_arabic_tokens() {
        assert_eq!(transliterate_text("كارفور"), "Carrefour");
        assert_eq!(transliterate_text("سلطان, ليدل"), "Sultan, Lidl");
        assert_eq!(transliterate_text("plain text"), "plain text");
    }

    #[test]
    fn title_cases_like_words() {
        assert_eq!(title_case("bio"), "Bio");
        assert_eq!(title_case("sans OGM, petits-dejeuners"), "Sans Ogm, Petits-Dejeuners");
        assert_eq!(title_case("en:bio"), "En:Bio");
        assert_eq!(title_case("3 pommes"), "3 Pommes");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn dictionaries_have_unique_terms() {
        for dictionary in [TRANSLATIONS, TRANSLITERATIONS] {
            for (i, (term, _)) in dictionary.iter().enumerate() {
                assert!(
                    dictionary[i + 1..].iter().all(|(other, _)| other != term),
                    "{term}"
                );
            }
        }
    }
}
