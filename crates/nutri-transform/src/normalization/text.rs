//! Free-text normalization for CSV-safe values.

use std::sync::LazyLock;

use polars::prelude::AnyValue;
use regex::Regex;

use nutri_ingest::any_to_string;

/// Longest normalized text kept before truncation.
pub const MAX_TEXT_CHARS: usize = 1000;

const ELLIPSIS: &str = "...";

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Returns true for C0 controls (`0x00..=0x1F`), DEL and C1 controls
/// (`0x7F..=0x9F`).
fn is_control(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{1F}' | '\u{7F}'..='\u{9F}')
}

/// Normalizes text so it survives quoted CSV serialization.
///
/// Removes control characters, replaces `"` with `'`, collapses whitespace
/// runs to one space and trims. Text longer than [`MAX_TEXT_CHARS`] is cut and
/// suffixed with `...`.
pub fn normalize_text(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !is_control(*c))
        .map(|c| if c == '"' { '\'' } else { c })
        .collect();
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    let trimmed = collapsed.trim();

    match trimmed.char_indices().nth(MAX_TEXT_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Normalizes any cell value. Null becomes the empty string.
pub fn normalize_value(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        other => normalize_text(&any_to_string(other)),
    }
}
