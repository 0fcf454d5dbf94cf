//! Everything a screen needs for one month, as text or JSON.

use anyhow::{Context, Result};
use budget_core::{MonthReport, PlannedItem, Receipt, RecordStore, month_report};
use serde::Serialize;

use crate::chart::render_chart;
use crate::tables::{render_categories, render_comparison, render_planned, render_receipts, render_summary};

#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    #[serde(flatten)]
    pub report: MonthReport,
    pub planned: Vec<PlannedItem>,
    pub receipts: Vec<Receipt>,
}

impl MonthView {
    pub fn build(store: &RecordStore, month: &str) -> Self {
        Self {
            report: month_report(store, month),
            planned: store.planned_for(month).into_iter().cloned().collect(),
            receipts: store.receipts_for(month).into_iter().cloned().collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize month view")
    }

    /// All sections, one after the other.
    pub fn render_text(&self, prefix: &str, chart_width: usize) -> String {
        let r = &self.report;
        let planned: Vec<&PlannedItem> = self.planned.iter().collect();
        let receipts: Vec<&Receipt> = self.receipts.iter().collect();

        let sections = [
            render_summary(&r.month, &r.totals, &r.balances, prefix),
            format!("By category\n{}", render_categories(&r.categories, prefix)),
            format!("Budget lines\n{}", render_planned(&planned, prefix)),
            format!("Receipts\n{}", render_receipts(&receipts, prefix)),
            format!("Planned vs actual by item\n{}", render_comparison(&r.line_items, prefix)),
            format!("Chart\n{}", render_chart(&r.chart, chart_width, prefix)),
        ];
        sections.join("\n")
    }
}
