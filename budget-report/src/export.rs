//! CSV export of a month's comparison tables.

use std::path::Path;

use anyhow::{Context, Result};
use budget_core::{MonthReport, Money};
use tracing::info;

/// Writes category rows then line-item rows; returns how many rows were
/// written (header excluded).
pub fn export_csv(report: &MonthReport, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("create {}", path.display()))?;

    wtr.write_record(["section", "category", "description", "planned", "actual", "diff"])?;

    let categories = report
        .categories
        .iter()
        .map(|r| row("category", &r.category, "", [r.planned, r.actual, r.diff]));
    let items = report
        .line_items
        .iter()
        .map(|r| row("item", &r.category, &r.description, [r.planned, r.actual, r.diff]));

    let mut count = 0;
    for record in categories.chain(items) {
        wtr.write_record(&record)?;
        count += 1;
    }

    wtr.flush().with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), rows = count, month = %report.month, "month exported");
    Ok(count)
}

fn row(section: &str, category: &str, description: &str, amounts: [Money; 3]) -> [String; 6] {
    let [planned, actual, diff] = amounts.map(|m| m.to_string());
    [section.to_string(), category.to_string(), description.to_string(), planned, actual, diff]
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_core::{RecordStore, load_demo, month_report};

    #[test]
    fn test_export_demo_month() {
        let mut store = RecordStore::new();
        let month = load_demo(&mut store).unwrap();
        let report = month_report(&store, month);

        let path = std::env::temp_dir().join(format!("budget-export-{}.csv", std::process::id()));
        let rows = export_csv(&report, &path).unwrap();
        assert_eq!(rows, 3 + 6);

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(&headers[0], "section");
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 9);
        assert_eq!(&records[0][1], "Contas");
        assert_eq!(&records[0][5], "-1892.76");
        assert_eq!(&records[8][2], "IGA");
        assert_eq!(&records[8][4], "620.50");

        std::fs::remove_file(&path).ok();
    }
}
