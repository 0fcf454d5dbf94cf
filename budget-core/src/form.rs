//! Flat string field bags coming from a form, a shell line or a test.
//!
//! Conversion into typed fields happens here: amounts accept `.` or `,` as
//! decimal separator, owners are matched case-insensitively, flags accept the
//! usual truthy spellings.

use std::collections::BTreeMap;

use crate::error::{BudgetError, Result};
use crate::money::Money;
use crate::records::{Owner, PlannedFields, ReceiptFields};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBag {
    fields: BTreeMap<String, String>,
}

impl FieldBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Value of `key`, or `""` when missing.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Checkbox-style flag; missing means unchecked.
    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.get(key).trim().to_lowercase().as_str(),
            "true" | "1" | "yes" | "y" | "on" | "sim" | "x"
        )
    }

    /// Overwrites this bag's values with every value in `other`.
    pub fn merge(&mut self, other: &FieldBag) {
        for (k, v) in &other.fields {
            self.fields.insert(k.clone(), v.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn amount(&self, key: &str) -> Result<Money> {
        self.get(key).parse()
    }

    fn owner(&self, key: &str) -> Result<Owner> {
        let raw = self.get(key);
        if raw.trim().is_empty() {
            return Ok(Owner::default());
        }
        raw.parse()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = FieldBag::new();
        for (k, v) in iter {
            bag.set(k, v);
        }
        bag
    }
}

/// Reads `month, category, description, amount, owner, fixed`.
pub fn planned_from_form(bag: &FieldBag) -> Result<PlannedFields> {
    if bag.get("month").trim().is_empty() {
        return Err(BudgetError::validation("month is required"));
    }
    Ok(PlannedFields {
        month: bag.get("month").to_string(),
        category: bag.get("category").to_string(),
        description: bag.get("description").to_string(),
        amount: bag.amount("amount")?,
        owner: bag.owner("owner")?,
        fixed: bag.flag("fixed"),
    })
}

pub fn planned_to_form(fields: &PlannedFields) -> FieldBag {
    FieldBag::new()
        .with("month", fields.month.as_str())
        .with("category", fields.category.as_str())
        .with("description", fields.description.as_str())
        .with("amount", fields.amount.to_string())
        .with("owner", fields.owner.name())
        .with("fixed", fields.fixed.to_string())
}

/// Reads `date, category, merchant, amount, owner, fixed`.
pub fn receipt_from_form(bag: &FieldBag) -> Result<ReceiptFields> {
    Ok(ReceiptFields {
        date: bag.get("date").to_string(),
        category: bag.get("category").to_string(),
        merchant: bag.get("merchant").to_string(),
        amount: bag.amount("amount")?,
        owner: bag.owner("owner")?,
        fixed: bag.flag("fixed"),
    })
}

pub fn receipt_to_form(fields: &ReceiptFields) -> FieldBag {
    FieldBag::new()
        .with("date", fields.date.as_str())
        .with("category", fields.category.as_str())
        .with("merchant", fields.merchant.as_str())
        .with("amount", fields.amount.to_string())
        .with("owner", fields.owner.name())
        .with("fixed", fields.fixed.to_string())
}
