//! Locale-aware string ordering for report rows.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Accent- and case-insensitive comparison key ("Combustível" -> "combustivel").
pub fn collation_key(input: &str) -> String {
    input
        .nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Orders by [`collation_key`], falling back to raw order so equal keys still
/// compare deterministically.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}
