//! Horizontal bar chart of planned vs actual spending per category.

use budget_core::{CategoryChart, Money};

use crate::currency::format_currency;

const PLANNED_BAR: char = '░';
const ACTUAL_BAR: char = '█';

/// Length of the bar for `value` when `max` fills `width` columns.
/// Bars start at zero, so negative values draw nothing.
fn bar_len(value: Money, max: Money, width: usize) -> usize {
    if max.cents() <= 0 || value.cents() <= 0 {
        return 0;
    }
    let scaled = (i128::from(value.cents()) * width as i128 + i128::from(max.cents()) / 2)
        / i128::from(max.cents());
    scaled.clamp(0, width as i128) as usize
}

pub fn render_chart(chart: &CategoryChart, width: usize, prefix: &str) -> String {
    if chart.labels.is_empty() {
        return "Nothing to chart for this month.\n".to_string();
    }

    let max = chart
        .planned
        .iter()
        .chain(&chart.actual)
        .copied()
        .max()
        .unwrap_or(Money::ZERO);
    let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = format!("{PLANNED_BAR} planned   {ACTUAL_BAR} actual\n");
    for (i, label) in chart.labels.iter().enumerate() {
        let planned = chart.planned.get(i).copied().unwrap_or_default();
        let actual = chart.actual.get(i).copied().unwrap_or_default();
        for (name, value, glyph) in [(label.as_str(), planned, PLANNED_BAR), ("", actual, ACTUAL_BAR)] {
            let bar: String = std::iter::repeat_n(glyph, bar_len(value, max, width)).collect();
            out.push_str(&format!(
                "{name:<label_width$} |{bar:<width$} {}\n",
                format_currency(value, prefix)
            ));
        }
    }
    out
}
