//! Record types: planned budget lines, purchase receipts and monthly income.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, Result};
use crate::money::Money;
use crate::month::month_of;

/// Identifier issued by a [`RecordStore`](crate::RecordStore).
///
/// Stable for the life of the record and never reused. Planned items and
/// receipts draw from the same sequence, so ids are not contiguous within
/// one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        s.trim_start_matches('#')
            .parse()
            .map(RecordId)
            .map_err(|_| BudgetError::validation(format!("\"{s}\" is not a record id")))
    }
}

/// Who an expense or an income belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Luana,
    Gabriel,
    /// Shared by both.
    #[default]
    Ambos,
}

impl Owner {
    /// Owners that declare an income each month, in insertion order.
    pub const EARNERS: [Owner; 2] = [Owner::Luana, Owner::Gabriel];

    pub fn name(&self) -> &'static str {
        match self {
            Owner::Luana => "Luana",
            Owner::Gabriel => "Gabriel",
            Owner::Ambos => "Ambos",
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Owner {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "luana" => Ok(Owner::Luana),
            "gabriel" => Ok(Owner::Gabriel),
            "ambos" | "both" => Ok(Owner::Ambos),
            other => Err(BudgetError::validation(format!("unknown owner \"{other}\""))),
        }
    }
}

/// Editable fields of a planned budget line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedFields {
    /// `YYYY-MM`
    pub month: String,
    pub category: String,
    pub description: String,
    pub amount: Money,
    pub owner: Owner,
    /// Recurring every month (rent, subscriptions, ...).
    pub fixed: bool,
}

impl PlannedFields {
    pub fn new(
        month: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            month: month.into(),
            category: category.into(),
            description: description.into(),
            amount,
            owner: Owner::default(),
            fixed: false,
        }
    }

    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    /// Trims text fields and checks the required ones.
    pub(crate) fn validated(mut self) -> Result<Self> {
        self.month = self.month.trim().to_string();
        self.category = required("category", &self.category)?;
        self.description = required("description", &self.description)?;
        Ok(self)
    }
}

/// A planned expense for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedItem {
    pub id: RecordId,
    pub month: String,
    pub category: String,
    pub description: String,
    pub amount: Money,
    pub owner: Owner,
    pub fixed: bool,
}

impl PlannedItem {
    pub(crate) fn new(id: RecordId, fields: PlannedFields) -> Self {
        let PlannedFields { month, category, description, amount, owner, fixed } = fields;
        Self { id, month, category, description, amount, owner, fixed }
    }

    /// Overwrites every mutable field, keeping the id.
    pub(crate) fn apply(&mut self, fields: PlannedFields) {
        *self = Self::new(self.id, fields);
    }

    pub fn fields(&self) -> PlannedFields {
        PlannedFields {
            month: self.month.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            amount: self.amount,
            owner: self.owner,
            fixed: self.fixed,
        }
    }
}

/// Editable fields of a purchase receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptFields {
    /// `YYYY-MM-DD`
    pub date: String,
    pub category: String,
    /// Company the purchase was made at; any name is valid.
    pub merchant: String,
    pub amount: Money,
    pub owner: Owner,
    pub fixed: bool,
}

impl ReceiptFields {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        merchant: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            merchant: merchant.into(),
            amount,
            owner: Owner::default(),
            fixed: false,
        }
    }

    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub(crate) fn validated(mut self) -> Result<Self> {
        self.date = required("date", &self.date)?;
        self.category = required("category", &self.category)?;
        self.merchant = required("merchant", &self.merchant)?;
        Ok(self)
    }
}

/// An actual purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: RecordId,
    pub date: String,
    pub category: String,
    pub merchant: String,
    pub amount: Money,
    pub owner: Owner,
    pub fixed: bool,
}

impl Receipt {
    pub(crate) fn new(id: RecordId, fields: ReceiptFields) -> Self {
        let ReceiptFields { date, category, merchant, amount, owner, fixed } = fields;
        Self { id, date, category, merchant, amount, owner, fixed }
    }

    pub(crate) fn apply(&mut self, fields: ReceiptFields) {
        *self = Self::new(self.id, fields);
    }

    pub fn fields(&self) -> ReceiptFields {
        ReceiptFields {
            date: self.date.clone(),
            category: self.category.clone(),
            merchant: self.merchant.clone(),
            amount: self.amount,
            owner: self.owner,
            fixed: self.fixed,
        }
    }

    /// Derived from `date`, never stored.
    pub fn month(&self) -> &str {
        month_of(&self.date)
    }
}

/// Income declared by one earner for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub month: String,
    pub owner: Owner,
    pub amount: Money,
}

fn required(name: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::validation(format!("{name} is required")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_parsing() {
        assert_eq!("luana".parse::<Owner>().unwrap(), Owner::Luana);
        assert_eq!(" GABRIEL ".parse::<Owner>().unwrap(), Owner::Gabriel);
        assert_eq!("Ambos".parse::<Owner>().unwrap(), Owner::Ambos);
        assert!("Maria".parse::<Owner>().unwrap_err().is_validation());
        assert_eq!(Owner::default(), Owner::Ambos);
    }

    #[test]
    fn test_record_id_parsing() {
        assert_eq!("12".parse::<RecordId>().unwrap(), RecordId(12));
        assert_eq!("#3".parse::<RecordId>().unwrap(), RecordId(3));
        assert!("x".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_planned_validation_trims() {
        let fields = PlannedFields::new(" 2025-11 ", " Contas ", " Internet ", Money::units(90))
            .validated()
            .unwrap();
        assert_eq!(fields.month, "2025-11");
        assert_eq!(fields.category, "Contas");
        assert_eq!(fields.description, "Internet");

        let err = PlannedFields::new("2025-11", "Contas", "   ", Money::units(90))
            .validated()
            .unwrap_err();
        assert_eq!(err, BudgetError::validation("description is required"));
    }

    #[test]
    fn test_receipt_validation_requires_date_and_merchant() {
        let err = ReceiptFields::new("", "Contas", "LUZ", Money::units(130))
            .validated()
            .unwrap_err();
        assert_eq!(err, BudgetError::validation("date is required"));

        let err = ReceiptFields::new("2025-11-02", "Contas", "", Money::units(130))
            .validated()
            .unwrap_err();
        assert_eq!(err, BudgetError::validation("merchant is required"));
    }

    #[test]
    fn test_receipt_month_is_derived() {
        let r = Receipt::new(
            RecordId(1),
            ReceiptFields::new("2025-11-05", "Supermercado", "IGA", Money::from_cents(62050)),
        );
        assert_eq!(r.month(), "2025-11");
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut item = PlannedItem::new(
            RecordId(4),
            PlannedFields::new("2025-11", "Contas", "Internet", Money::units(90)),
        );
        item.apply(
            PlannedFields::new("2025-12", "Contas", "Fibra", Money::units(95))
                .with_owner(Owner::Gabriel)
                .with_fixed(true),
        );
        assert_eq!(item.id, RecordId(4));
        assert_eq!(item.description, "Fibra");
        assert_eq!(item.owner, Owner::Gabriel);
        assert!(item.fixed);
    }
}
