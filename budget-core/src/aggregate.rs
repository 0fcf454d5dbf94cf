//! Month aggregates: totals, balances, per-category and per-line-item
//! planned-vs-actual comparisons.
//!
//! Everything here is recomputed from the store on every call. Nothing is
//! cached and nothing fails: a month that is not a `YYYY-MM` key simply has no
//! records, so every figure is zero and every table is empty.
//!
//! Differences are always `planned - actual`; a positive value means less was
//! spent than planned.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::collate::locale_cmp;
use crate::money::Money;
use crate::store::RecordStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income: Money,
    pub planned: Money,
    pub actual: Money,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    /// Income minus planned expenses ("saldo previsto").
    pub projected: Money,
    /// Income minus actual expenses ("saldo real").
    pub actual: Money,
    /// `actual - projected`; positive means more was saved than planned.
    pub difference: Money,
}

impl Balances {
    pub fn from_totals(totals: &Totals) -> Self {
        let projected = totals.income - totals.planned;
        let actual = totals.income - totals.actual;
        Self {
            projected,
            actual,
            difference: actual - projected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    pub planned: Money,
    pub actual: Money,
    pub diff: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemRow {
    pub category: String,
    /// Planned description or receipt merchant, as first seen.
    pub description: String,
    pub planned: Money,
    pub actual: Money,
    pub diff: Money,
}

/// Bar chart series, one bar pair per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChart {
    pub labels: Vec<String>,
    pub planned: Vec<Money>,
    pub actual: Vec<Money>,
}

/// Every aggregate of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthReport {
    pub month: String,
    pub totals: Totals,
    pub balances: Balances,
    pub categories: Vec<CategoryRow>,
    pub line_items: Vec<LineItemRow>,
    pub chart: CategoryChart,
}

pub fn totals(store: &RecordStore, month: &str) -> Totals {
    Totals {
        income: store.income_for(month).iter().map(|i| i.amount).sum(),
        planned: store.planned_for(month).iter().map(|p| p.amount).sum(),
        actual: store.receipts_for(month).iter().map(|r| r.amount).sum(),
    }
}

pub fn balances(store: &RecordStore, month: &str) -> Balances {
    Balances::from_totals(&totals(store, month))
}

/// Planned vs actual per category, keyed by the raw category string.
pub fn category_breakdown(store: &RecordStore, month: &str) -> Vec<CategoryRow> {
    let mut groups: HashMap<&str, (Money, Money)> = HashMap::new();

    for p in store.planned_for(month) {
        groups.entry(p.category.as_str()).or_default().0 += p.amount;
    }
    for r in store.receipts_for(month) {
        groups.entry(r.category.as_str()).or_default().1 += r.amount;
    }

    let mut rows: Vec<CategoryRow> = groups
        .into_iter()
        .map(|(category, (planned, actual))| CategoryRow {
            category: category.to_string(),
            planned,
            actual,
            diff: planned - actual,
        })
        .collect();

    rows.sort_by(|a, b| locale_cmp(&a.category, &b.category));
    rows
}

/// Join key for line items: trimmed, lowercased category and description.
fn line_key(category: &str, description: &str) -> (String, String) {
    (
        category.trim().to_lowercase(),
        description.trim().to_lowercase(),
    )
}

/// Planned vs actual per (category, description), matching planned
/// descriptions to receipt merchants case- and whitespace-insensitively.
pub fn line_item_reconciliation(store: &RecordStore, month: &str) -> Vec<LineItemRow> {
    let mut rows: Vec<LineItemRow> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    let mut row_for = |category: &str, description: &str, rows: &mut Vec<LineItemRow>| -> usize {
        *index.entry(line_key(category, description)).or_insert_with(|| {
            rows.push(LineItemRow {
                category: category.to_string(),
                description: description.to_string(),
                planned: Money::ZERO,
                actual: Money::ZERO,
                diff: Money::ZERO,
            });
            rows.len() - 1
        })
    };

    for p in store.planned_for(month) {
        let i = row_for(&p.category, &p.description, &mut rows);
        rows[i].planned += p.amount;
    }
    for r in store.receipts_for(month) {
        let i = row_for(&r.category, &r.merchant, &mut rows);
        rows[i].actual += r.amount;
    }

    for row in &mut rows {
        row.diff = row.planned - row.actual;
    }
    rows.sort_by(|a, b| {
        locale_cmp(&a.category, &b.category).then_with(|| locale_cmp(&a.description, &b.description))
    });
    rows
}

pub fn category_chart(store: &RecordStore, month: &str) -> CategoryChart {
    chart_from_rows(&category_breakdown(store, month))
}

fn chart_from_rows(rows: &[CategoryRow]) -> CategoryChart {
    CategoryChart {
        labels: rows.iter().map(|r| r.category.clone()).collect(),
        planned: rows.iter().map(|r| r.planned).collect(),
        actual: rows.iter().map(|r| r.actual).collect(),
    }
}

pub fn month_report(store: &RecordStore, month: &str) -> MonthReport {
    let totals = totals(store, month);
    let categories = category_breakdown(store, month);
    MonthReport {
        month: month.to_string(),
        balances: Balances::from_totals(&totals),
        totals,
        chart: chart_from_rows(&categories),
        line_items: line_item_reconciliation(store, month),
        categories,
    }
}
