//! Plain-text tables for the month views.

use std::fmt;

use budget_core::{Balances, CategoryRow, LineItemRow, PlannedItem, Receipt, Totals};

use crate::currency::format_currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Column-aligned text table; widths follow the widest cell.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// `numeric` marks right-aligned columns.
    pub fn new(headers: &[&str], numeric: &[bool]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            align: (0..headers.len())
                .map(|i| if numeric.get(i).copied().unwrap_or(false) { Align::Right } else { Align::Left })
                .collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.chars().count());
            if i > 0 {
                line.push_str("  ");
            }
            match self.align[i] {
                Align::Left => {
                    line.push_str(cell);
                    line.push_str(&" ".repeat(pad));
                }
                Align::Right => {
                    line.push_str(&" ".repeat(pad));
                    line.push_str(cell);
                }
            }
        }
        writeln!(f, "{}", line.trim_end())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        self.write_row(f, &self.headers, &widths)?;
        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(f, "{}", "-".repeat(total))?;
        for row in &self.rows {
            self.write_row(f, row, &widths)?;
        }
        Ok(())
    }
}

pub fn render_summary(month: &str, totals: &Totals, balances: &Balances, prefix: &str) -> String {
    let title = if month.is_empty() { "(no month selected)" } else { month };
    let lines = [
        ("Income", totals.income),
        ("Planned expenses", totals.planned),
        ("Actual expenses", totals.actual),
        ("Projected balance", balances.projected),
        ("Actual balance", balances.actual),
        ("Difference", balances.difference),
    ];
    let amounts: Vec<String> = lines.iter().map(|(_, m)| format_currency(*m, prefix)).collect();
    let width = amounts.iter().map(|a| a.chars().count()).max().unwrap_or(0);

    let mut out = format!("Summary {title}\n");
    for ((label, _), amount) in lines.iter().zip(&amounts) {
        out.push_str(&format!("{label:<18} {amount:>width$}\n"));
    }
    out
}

pub fn render_categories(rows: &[CategoryRow], prefix: &str) -> String {
    if rows.is_empty() {
        return "No planned or actual expenses for this month.\n".to_string();
    }
    let mut table = Table::new(&["Category", "Planned", "Actual", "Planned - Actual"], &[false, true, true, true]);
    for r in rows {
        table.push(vec![
            r.category.clone(),
            format_currency(r.planned, prefix),
            format_currency(r.actual, prefix),
            format_currency(r.diff, prefix),
        ]);
    }
    table.to_string()
}

pub fn render_comparison(rows: &[LineItemRow], prefix: &str) -> String {
    if rows.is_empty() {
        return "No budget or receipt data for this month.\n".to_string();
    }
    let mut table = Table::new(
        &["Category", "Item", "Planned", "Actual", "Planned - Actual"],
        &[false, false, true, true, true],
    );
    for r in rows {
        table.push(vec![
            r.category.clone(),
            r.description.clone(),
            format_currency(r.planned, prefix),
            format_currency(r.actual, prefix),
            format_currency(r.diff, prefix),
        ]);
    }
    table.to_string()
}

pub fn render_planned(items: &[&PlannedItem], prefix: &str) -> String {
    if items.is_empty() {
        return "No budget lines for this month.\n".to_string();
    }
    let mut table = Table::new(
        &["#", "Category", "Description", "Amount", "Owner", "Fixed"],
        &[true, false, false, true, false, false],
    );
    for p in items {
        table.push(vec![
            p.id.to_string(),
            p.category.clone(),
            p.description.clone(),
            format_currency(p.amount, prefix),
            p.owner.to_string(),
            if p.fixed { "Sim" } else { "Não" }.to_string(),
        ]);
    }
    table.to_string()
}

/// `2025-11-05` -> `05/11/2025`.
fn display_date(date: &str) -> String {
    date.split('-').rev().collect::<Vec<_>>().join("/")
}

pub fn render_receipts(receipts: &[&Receipt], prefix: &str) -> String {
    if receipts.is_empty() {
        return "No receipts for this month.\n".to_string();
    }
    let mut table = Table::new(&["#", "Receipt", "Details", "Amount"], &[true, false, false, true]);
    for r in receipts {
        let fixed = if r.fixed { " • Fixo" } else { "" };
        table.push(vec![
            r.id.to_string(),
            format!("{} • {}", r.merchant, r.category),
            format!("{} • {}{}", display_date(&r.date), r.owner, fixed),
            format_currency(r.amount, prefix),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_core::{Money, PlannedFields, ReceiptFields, RecordStore, load_demo, month_report};

    #[test]
    fn test_table_alignment() {
        let mut t = Table::new(&["Name", "Value"], &[false, true]);
        t.push(vec!["a".into(), "1,00".into()]);
        t.push(vec!["longer".into(), "100,00".into()]);
        assert_eq!(
            t.to_string(),
            "Name     Value\n--------------\na         1,00\nlonger  100,00\n"
        );
    }

    #[test]
    fn test_summary_for_demo_month() {
        let mut store = RecordStore::new();
        let month = load_demo(&mut store).unwrap();
        let report = month_report(&store, month);
        let text = render_summary(month, &report.totals, &report.balances, "CAD");

        assert!(text.starts_with("Summary 2025-11\n"));
        assert!(text.contains("Income             CAD 6.500,00"));
        assert!(text.contains("Projected balance  CAD 3.632,86"));
        assert!(text.contains("Difference           CAD 263,88"));
    }

    #[test]
    fn test_summary_without_month_is_zero() {
        let text = render_summary("", &Totals::default(), &Balances::default(), "CAD");
        assert!(text.starts_with("Summary (no month selected)"));
        assert_eq!(text.matches("CAD 0,00").count(), 6);
    }

    #[test]
    fn test_category_table_shows_signed_diff() {
        let rows = vec![CategoryRow {
            category: "Contas".into(),
            planned: Money::units(100),
            actual: Money::units(130),
            diff: Money::units(-30),
        }];
        let text = render_categories(&rows, "CAD");
        assert!(text.contains("Contas"));
        assert!(text.contains("CAD -30,00"));
        assert_eq!(render_categories(&[], "CAD"), "No planned or actual expenses for this month.\n");
    }

    #[test]
    fn test_receipt_lines() {
        let mut store = RecordStore::new();
        store
            .create_receipt(
                ReceiptFields::new("2025-11-02", "Contas", "LUZ", Money::units(130))
                    .with_fixed(true),
            )
            .unwrap();
        let text = render_receipts(&store.receipts_for("2025-11"), "CAD");
        assert!(text.contains("LUZ • Contas"));
        assert!(text.contains("02/11/2025 • Ambos • Fixo"));
        assert!(text.contains("CAD 130,00"));
    }

    #[test]
    fn test_planned_fixed_column() {
        let mut store = RecordStore::new();
        store
            .create_planned(PlannedFields::new("2025-11", "Contas", "Internet", Money::units(90)))
            .unwrap();
        let text = render_planned(&store.planned_for("2025-11"), "CAD");
        assert!(text.contains("Internet"));
        assert!(text.trim_end().ends_with("Não"));
        assert_eq!(render_planned(&[], "CAD"), "No budget lines for this month.\n");
    }
}
