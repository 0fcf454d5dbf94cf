use budget_core::{
    CategoryRow, FieldBag, Money, PlannedSession, ReceiptSession, RecordStore, Submission,
    balances, category_breakdown, line_item_reconciliation, load_demo, month_report, totals,
};

fn cents(c: i64) -> Money {
    Money::from_cents(c)
}

/// Demo household month: incomes, four planned lines, three receipts.
#[test]
fn test_demo_month_totals_and_balances() {
    let mut store = RecordStore::new();
    let month = load_demo(&mut store).unwrap();

    let t = totals(&store, month);
    assert_eq!(t.income, Money::units(6500));
    assert_eq!(t.planned, cents(286714));
    assert_eq!(t.actual, cents(260326));

    let b = balances(&store, month);
    assert_eq!(b.projected, cents(363286));
    assert_eq!(b.actual, cents(389674));
    assert_eq!(b.difference, cents(26388));
}

#[test]
fn test_demo_month_category_rows() {
    let mut store = RecordStore::new();
    let month = load_demo(&mut store).unwrap();

    let rows = category_breakdown(&store, month);
    assert_eq!(
        rows,
        vec![
            CategoryRow {
                category: "Contas".into(),
                planned: Money::units(90),
                actual: cents(198276),
                diff: cents(-189276),
            },
            CategoryRow {
                category: "Moradia".into(),
                planned: cents(197714),
                actual: Money::ZERO,
                diff: cents(197714),
            },
            CategoryRow {
                category: "Supermercado".into(),
                planned: Money::units(800),
                actual: cents(62050),
                diff: cents(17950),
            },
        ]
    );

    // category diffs add up to the total planned - actual
    let sum: Money = rows.iter().map(|r| r.diff).sum();
    let t = totals(&store, month);
    assert_eq!(sum, t.planned - t.actual);
}

#[test]
fn test_demo_month_line_items() {
    let mut store = RecordStore::new();
    let month = load_demo(&mut store).unwrap();

    let rows = line_item_reconciliation(&store, month);
    let view: Vec<_> = rows
        .iter()
        .map(|r| (r.category.as_str(), r.description.as_str(), r.planned, r.actual))
        .collect();
    assert_eq!(
        view,
        vec![
            ("Contas", "HIPOTECA", Money::ZERO, cents(185276)),
            ("Contas", "Internet", Money::units(90), Money::ZERO),
            ("Contas", "LUZ", Money::ZERO, Money::units(130)),
            ("Moradia", "Hipoteca", cents(185276), Money::ZERO),
            ("Moradia", "Luz", cents(12438), Money::ZERO),
            ("Supermercado", "IGA", Money::units(800), cents(62050)),
        ]
    );

    let planned: Money = rows.iter().map(|r| r.planned).sum();
    let actual: Money = rows.iter().map(|r| r.actual).sum();
    let t = totals(&store, month);
    assert_eq!((planned, actual), (t.planned, t.actual));
}

/// Form-driven flow: create through the sessions, edit, delete, and watch the
/// report follow.
#[test]
fn test_forms_drive_the_report() {
    let mut store = RecordStore::new();
    let mut planned = PlannedSession::new();
    let mut receipts = ReceiptSession::new();

    store.replace_income_input("2025-11", "4000", "2500").unwrap();

    let iga = planned
        .submit_form(
            &mut store,
            &FieldBag::new()
                .with("month", "2025-11")
                .with("category", "Supermercado")
                .with("description", "IGA")
                .with("amount", "800")
                .with("owner", "Luana"),
        )
        .unwrap();
    assert!(matches!(iga, Submission::Created(_)));

    let receipt = receipts
        .submit_form(
            &mut store,
            &FieldBag::new()
                .with("date", "2025-11-05")
                .with("category", "Supermercado")
                .with("merchant", "iga ")
                .with("amount", "620,50"),
        )
        .unwrap()
        .id();

    let report = month_report(&store, "2025-11");
    assert_eq!(report.line_items.len(), 1);
    assert_eq!(report.balances.difference, cents(17950));

    // correct the receipt amount through an edit
    let mut form = receipts.pending_form(&store).unwrap_or_default();
    assert!(form.is_empty());
    receipts.begin_edit(&store, receipt).unwrap();
    form = receipts.pending_form(&store).unwrap();
    form.merge(&FieldBag::new().with("amount", "700"));
    let out = receipts.submit_form(&mut store, &form).unwrap();
    assert_eq!(out, Submission::Updated(receipt));

    let report = month_report(&store, "2025-11");
    assert_eq!(report.line_items[0].actual, Money::units(700));
    assert_eq!(report.totals.actual, Money::units(700));

    planned.delete(&mut store, iga.id());
    planned.delete(&mut store, iga.id());
    let report = month_report(&store, "2025-11");
    assert_eq!(report.totals.planned, Money::ZERO);
    assert_eq!(report.balances.projected, Money::units(6500));
}
