//! Month keys (`YYYY-MM`) and the month a receipt date falls in.

use std::sync::LazyLock;

use chrono::Utc;
use chrono_tz::Tz;
use regex::Regex;

// ASCII digits only; `\d` is Unicode-aware.
static MONTH_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])$").expect("month key pattern is a valid regex"));

/// True for a well-formed `YYYY-MM` key.
pub fn is_month_key(s: &str) -> bool {
    MONTH_KEY_RE.is_match(s)
}

/// The month a `YYYY-MM-DD` date belongs to: its first 7 characters.
///
/// Pure substring, no parsing. A date without a valid `YYYY-MM` prefix yields
/// something that is not a month key, so the receipt never groups under any
/// month.
pub fn month_of(date: &str) -> &str {
    match date.char_indices().nth(7) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}

/// Today's month in the given timezone.
pub fn current_month(tz: Tz) -> String {
    Utc::now().with_timezone(&tz).format("%Y-%m").to_string()
}
