//! Currency display: `CAD 1.234,56`.

use budget_core::Money;

/// Formats with two decimals, `,` as decimal separator and `.` between
/// thousands. An empty prefix yields just the number.
pub fn format_currency(amount: Money, prefix: &str) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let abs = amount.cents().unsigned_abs();
    let units = (abs / 100).to_string();
    let cents = abs % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if prefix.is_empty() {
        format!("{sign}{grouped},{cents:02}")
    } else {
        format!("{prefix} {sign}{grouped},{cents:02}")
    }
}
