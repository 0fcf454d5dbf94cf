//! RecordStore: the three flat collections behind every budget view.
//!
//! - Planned items and receipts are kept in insertion order and get ids from a
//!   single per-store sequence.
//! - Incomes carry no id; saving the income of a month replaces every income
//!   record of that month.
//! - Validation runs before any write, so a failed call leaves the store as it
//!   was.
//!
//! Month queries return nothing for an argument that is not a `YYYY-MM` key.

use tracing::debug;

use crate::error::{BudgetError, Result};
use crate::money::Money;
use crate::month::{is_month_key, month_of};
use crate::records::{
    Income, Owner, PlannedFields, PlannedItem, Receipt, ReceiptFields, RecordId,
};

#[derive(Debug, Clone)]
pub struct RecordStore {
    planned: Vec<PlannedItem>,
    receipts: Vec<Receipt>,
    incomes: Vec<Income>,
    next_id: u64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            planned: Vec::new(),
            receipts: Vec::new(),
            incomes: Vec::new(),
            next_id: 1,
        }
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every record and restarts the id sequence.
    pub fn clear(&mut self) {
        *self = Self::default();
        debug!("store cleared");
    }

    fn issue_id(&mut self) -> RecordId {
        let id = RecordId(self.next_id);
        self.next_id += 1;
        id
    }

    // ----- planned items -----

    pub fn create_planned(&mut self, fields: PlannedFields) -> Result<RecordId> {
        let fields = fields.validated()?;
        let id = self.issue_id();
        debug!(%id, month = %fields.month, category = %fields.category, amount = %fields.amount, "planned item created");
        self.planned.push(PlannedItem::new(id, fields));
        Ok(id)
    }

    pub fn update_planned(&mut self, id: RecordId, fields: PlannedFields) -> Result<()> {
        let fields = fields.validated()?;
        let item = self
            .planned
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| BudgetError::not_found(format!("planned item #{id}")))?;
        item.apply(fields);
        debug!(%id, "planned item updated");
        Ok(())
    }

    /// Removes the item if present; unknown ids are ignored.
    pub fn delete_planned(&mut self, id: RecordId) {
        let before = self.planned.len();
        self.planned.retain(|p| p.id != id);
        if self.planned.len() != before {
            debug!(%id, "planned item deleted");
        }
    }

    pub fn planned(&self, id: RecordId) -> Option<&PlannedItem> {
        self.planned.iter().find(|p| p.id == id)
    }

    pub fn all_planned(&self) -> &[PlannedItem] {
        &self.planned
    }

    /// Planned items of `month`, in insertion order.
    pub fn planned_for(&self, month: &str) -> Vec<&PlannedItem> {
        if !is_month_key(month) {
            return vec![];
        }
        self.planned.iter().filter(|p| p.month == month).collect()
    }

    // ----- receipts -----

    pub fn create_receipt(&mut self, fields: ReceiptFields) -> Result<RecordId> {
        let fields = fields.validated()?;
        let id = self.issue_id();
        debug!(%id, date = %fields.date, category = %fields.category, amount = %fields.amount, "receipt created");
        self.receipts.push(Receipt::new(id, fields));
        Ok(id)
    }

    pub fn update_receipt(&mut self, id: RecordId, fields: ReceiptFields) -> Result<()> {
        let fields = fields.validated()?;
        let receipt = self
            .receipts
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| BudgetError::not_found(format!("receipt #{id}")))?;
        receipt.apply(fields);
        debug!(%id, "receipt updated");
        Ok(())
    }

    /// Removes the receipt if present; unknown ids are ignored.
    pub fn delete_receipt(&mut self, id: RecordId) {
        let before = self.receipts.len();
        self.receipts.retain(|r| r.id != id);
        if self.receipts.len() != before {
            debug!(%id, "receipt deleted");
        }
    }

    pub fn receipt(&self, id: RecordId) -> Option<&Receipt> {
        self.receipts.iter().find(|r| r.id == id)
    }

    pub fn all_receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// Receipts whose date falls in `month`, oldest first.
    pub fn receipts_for(&self, month: &str) -> Vec<&Receipt> {
        if !is_month_key(month) {
            return vec![];
        }
        let mut out: Vec<&Receipt> = self
            .receipts
            .iter()
            .filter(|r| month_of(&r.date) == month)
            .collect();
        out.sort_by(|a, b| a.date.cmp(&b.date));
        out
    }

    // ----- incomes -----

    /// Replaces the income of `month` with one record per earner.
    pub fn replace_income(&mut self, month: &str, luana: Money, gabriel: Money) -> Result<()> {
        let month = month.trim();
        if month.is_empty() {
            return Err(BudgetError::validation("month is required"));
        }
        self.incomes.retain(|i| i.month != month);
        for (owner, amount) in Owner::EARNERS.into_iter().zip([luana, gabriel]) {
            self.incomes.push(Income {
                month: month.to_string(),
                owner,
                amount,
            });
        }
        debug!(month, %luana, %gabriel, "income replaced");
        Ok(())
    }

    /// Like [`replace_income`](Self::replace_income) but takes raw form input;
    /// anything that does not parse counts as zero.
    pub fn replace_income_input(&mut self, month: &str, luana: &str, gabriel: &str) -> Result<()> {
        let parse = |s: &str| s.parse::<Money>().unwrap_or(Money::ZERO);
        self.replace_income(month, parse(luana), parse(gabriel))
    }

    pub fn all_incomes(&self) -> &[Income] {
        &self.incomes
    }

    pub fn income_for(&self, month: &str) -> Vec<&Income> {
        if !is_month_key(month) {
            return vec![];
        }
        self.incomes.iter().filter(|i| i.month == month).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn internet() -> PlannedFields {
        PlannedFields::new("2025-11", "Contas", "Internet", Money::units(90))
            .with_owner(Owner::Gabriel)
            .with_fixed(true)
    }

    fn luz() -> ReceiptFields {
        ReceiptFields::new("2025-11-02", "Contas", "LUZ", Money::units(130))
    }

    #[test]
    fn test_create_planned_round_trip() {
        let mut store = RecordStore::new();
        let id = store.create_planned(internet()).unwrap();

        let items = store.planned_for("2025-11");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].fields(), internet());
    }

    #[test]
    fn test_ids_are_shared_and_never_reused() {
        let mut store = RecordStore::new();
        let a = store.create_planned(internet()).unwrap();
        let b = store.create_receipt(luz()).unwrap();
        store.delete_planned(a);
        let c = store.create_planned(internet()).unwrap();

        assert_eq!(a, RecordId(1));
        assert_eq!(b, RecordId(2));
        assert_eq!(c, RecordId(3));
    }

    #[test]
    fn test_create_rejects_empty_fields_without_writing() {
        let mut store = RecordStore::new();
        let err = store
            .create_planned(PlannedFields::new("2025-11", "", "Internet", Money::units(90)))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(store.all_planned().is_empty());

        // the failed call must not burn an id
        assert_eq!(store.create_receipt(luz()).unwrap(), RecordId(1));
    }

    #[test]
    fn test_update_preserves_identity() {
        let mut store = RecordStore::new();
        let id = store.create_planned(internet()).unwrap();
        let new_fields = PlannedFields::new("2025-11", "Contas", "Fibra", Money::units(110));
        store.update_planned(id, new_fields.clone()).unwrap();

        let items = store.planned_for("2025-11");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].fields(), new_fields);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut store = RecordStore::new();
        let err = store.update_planned(RecordId(9), internet()).unwrap_err();
        assert!(err.is_not_found());
        let err = store.update_receipt(RecordId(9), luz()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_validates_before_lookup() {
        let mut store = RecordStore::new();
        let id = store.create_receipt(luz()).unwrap();
        let err = store
            .update_receipt(id, ReceiptFields::new("2025-11-02", "Contas", " ", Money::ZERO))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.receipt(id).unwrap().merchant, "LUZ");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = RecordStore::new();
        let keep = store.create_planned(internet()).unwrap();
        let gone = store.create_planned(internet()).unwrap();

        store.delete_planned(gone);
        let once: Vec<_> = store.all_planned().to_vec();
        store.delete_planned(gone);
        assert_eq!(store.all_planned(), once.as_slice());
        assert_eq!(store.all_planned()[0].id, keep);

        store.delete_receipt(RecordId(42));
        assert!(store.all_receipts().is_empty());
    }

    #[test]
    fn test_receipts_for_matches_prefix_and_sorts_by_date() {
        let mut store = RecordStore::new();
        store.create_receipt(ReceiptFields::new("2025-11-20", "Lojas", "IKEA", Money::units(10))).unwrap();
        store.create_receipt(ReceiptFields::new("2025-11-02", "Contas", "LUZ", Money::units(130))).unwrap();
        store.create_receipt(ReceiptFields::new("2025-12-01", "Contas", "LUZ", Money::units(120))).unwrap();
        store.create_receipt(ReceiptFields::new("02/11/2025", "Contas", "LUZ", Money::units(5))).unwrap();

        let nov = store.receipts_for("2025-11");
        let dates: Vec<_> = nov.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-11-02", "2025-11-20"]);
    }

    #[test]
    fn test_receipts_on_the_same_date_keep_creation_order() {
        let mut store = RecordStore::new();
        let first = store.create_receipt(ReceiptFields::new("2025-11-05", "Supermercado", "IGA", Money::units(60))).unwrap();
        store.create_receipt(ReceiptFields::new("2025-11-01", "Contas", "LUZ", Money::units(130))).unwrap();
        let second = store.create_receipt(ReceiptFields::new("2025-11-05", "Lojas", "IKEA", Money::units(20))).unwrap();
        let third = store.create_receipt(ReceiptFields::new("2025-11-05", "Contas", "BELL", Money::units(90))).unwrap();

        let ids: Vec<_> = store.receipts_for("2025-11").iter().skip(1).map(|r| r.id).collect();
        assert_eq!(ids, vec![first, second, third]);
    }

    #[test]
    fn test_invalid_month_queries_are_empty() {
        let mut store = RecordStore::new();
        store.create_planned(internet()).unwrap();
        store.create_receipt(luz()).unwrap();
        store.replace_income("2025-11", Money::units(1), Money::units(2)).unwrap();

        for month in ["", "2025", "2025-1"] {
            assert!(store.planned_for(month).is_empty());
            assert!(store.receipts_for(month).is_empty());
            assert!(store.income_for(month).is_empty());
        }
    }

    #[test]
    fn test_replace_income_does_not_accumulate() {
        let mut store = RecordStore::new();
        store.replace_income("2025-11", Money::units(4000), Money::units(2500)).unwrap();
        store.replace_income("2025-11", Money::units(4100), Money::units(2600)).unwrap();
        store.replace_income("2025-12", Money::units(1), Money::units(1)).unwrap();

        let nov = store.income_for("2025-11");
        assert_eq!(nov.len(), 2);
        assert_eq!(nov[0].owner, Owner::Luana);
        assert_eq!(nov[0].amount, Money::units(4100));
        assert_eq!(nov[1].owner, Owner::Gabriel);
        assert_eq!(nov[1].amount, Money::units(2600));
        assert_eq!(store.all_incomes().len(), 4);
    }

    #[test]
    fn test_replace_income_requires_month() {
        let mut store = RecordStore::new();
        let err = store.replace_income("  ", Money::ZERO, Money::ZERO).unwrap_err();
        assert!(err.is_validation());
        assert!(store.all_incomes().is_empty());
    }

    #[test]
    fn test_replace_income_input_defaults_to_zero() {
        let mut store = RecordStore::new();
        store.replace_income_input("2025-11", "4000,50", "n/a").unwrap();
        let nov = store.income_for("2025-11");
        assert_eq!(nov[0].amount, Money::from_cents(400050));
        assert_eq!(nov[1].amount, Money::ZERO);
    }

    #[test]
    fn test_clear_restarts_sequence() {
        let mut store = RecordStore::new();
        store.create_planned(internet()).unwrap();
        store.clear();
        assert!(store.all_planned().is_empty());
        assert_eq!(store.create_receipt(luz()).unwrap(), RecordId(1));
    }
}
