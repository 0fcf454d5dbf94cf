//! budget-core: records, month aggregates and edit sessions for the household budget

pub mod aggregate;
pub mod collate;
pub mod directory;
pub mod error;
pub mod form;
pub mod money;
pub mod month;
pub mod records;
pub mod seed;
pub mod session;
pub mod store;

pub use aggregate::{
    Balances, CategoryChart, CategoryRow, LineItemRow, MonthReport, Totals, balances,
    category_breakdown, category_chart, line_item_reconciliation, month_report, totals,
};
pub use directory::{CATEGORIES, CompanyDirectory};
pub use error::{BudgetError, Result};
pub use form::FieldBag;
pub use money::Money;
pub use month::{current_month, is_month_key, month_of};
pub use records::{Income, Owner, PlannedFields, PlannedItem, Receipt, ReceiptFields, RecordId};
pub use seed::{DEMO_MONTH, load_demo};
pub use session::{EditSession, Editable, PlannedSession, ReceiptSession, SessionState, Submission};
pub use store::RecordStore;
