//! budget-report: text tables, bar chart, JSON view and CSV export of month aggregates

pub mod chart;
pub mod currency;
pub mod export;
pub mod tables;
pub mod view;

pub use chart::render_chart;
pub use currency::format_currency;
pub use export::export_csv;
pub use tables::{Table, render_categories, render_comparison, render_planned, render_receipts, render_summary};
pub use view::MonthView;
