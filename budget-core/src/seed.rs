//! Demo data set for trying the app out.

use tracing::info;

use crate::error::Result;
use crate::money::Money;
use crate::records::{Owner, PlannedFields, ReceiptFields};
use crate::store::RecordStore;

pub const DEMO_MONTH: &str = "2025-11";

/// Replaces the whole store with the demo month and returns that month.
pub fn load_demo(store: &mut RecordStore) -> Result<&'static str> {
    let month = DEMO_MONTH;
    store.clear();

    store.replace_income(month, Money::units(4000), Money::units(2500))?;

    let planned = [
        ("Moradia", "Hipoteca", Money::from_cents(185276), Owner::Ambos),
        ("Moradia", "Luz", Money::from_cents(12438), Owner::Ambos),
        ("Contas", "Internet", Money::units(90), Owner::Gabriel),
        ("Supermercado", "IGA", Money::units(800), Owner::Luana),
    ];
    for (category, description, amount, owner) in planned {
        store.create_planned(
            PlannedFields::new(month, category, description, amount)
                .with_owner(owner)
                .with_fixed(true),
        )?;
    }

    let receipts = [
        ("01", "Contas", "HIPOTECA", Money::from_cents(185276), Owner::Ambos, true),
        ("02", "Contas", "LUZ", Money::units(130), Owner::Ambos, true),
        ("05", "Supermercado", "IGA", Money::from_cents(62050), Owner::Luana, false),
    ];
    for (day, category, merchant, amount, owner, fixed) in receipts {
        store.create_receipt(
            ReceiptFields::new(format!("{month}-{day}"), category, merchant, amount)
                .with_owner(owner)
                .with_fixed(fixed),
        )?;
    }

    info!(month, "demo data loaded");
    Ok(month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordId;

    #[test]
    fn test_demo_replaces_existing_data() {
        let mut store = RecordStore::new();
        store
            .create_planned(PlannedFields::new("2024-01", "Lojas", "IKEA", Money::units(1)))
            .unwrap();

        let month = load_demo(&mut store).unwrap();
        assert_eq!(month, "2025-11");
        assert_eq!(store.all_planned().len(), 4);
        assert_eq!(store.all_receipts().len(), 3);
        assert_eq!(store.income_for(month).len(), 2);
        assert_eq!(store.all_planned()[0].id, RecordId(1));
        assert_eq!(store.all_receipts()[2].id, RecordId(7));
    }
}
