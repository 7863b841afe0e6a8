use chrono::NaiveDate;
use flow_core::cut_vault;
use flow_model::{EntryKind, LedgerEntry, Transfer};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
}

fn entry(id: &str, kind: EntryKind, destination: &str, amount: f64, d: u32) -> LedgerEntry {
    LedgerEntry {
        id: id.to_string(),
        date: Some(day(d)),
        kind,
        destination: destination.to_string(),
        origin: None,
        concept: String::new(),
        category: None,
        amount,
        reference: None,
    }
}

fn transfer(id: &str, from: &str, to: &str, amount: f64, d: u32) -> Transfer {
    Transfer {
        id: id.to_string(),
        date: Some(day(d)),
        from_vault: from.to_string(),
        to_vault: to.to_string(),
        amount,
        concept: String::new(),
    }
}

#[test]
fn balance_combines_ledger_and_transfers() {
    let ledger = vec![
        entry("G-1", EntryKind::Income, "Bóveda Monte", 4800.0, 1),
        entry("G-2", EntryKind::Payment, "Bóveda Monte", 1000.0, 2),
        entry("G-3", EntryKind::Expense, "Bóveda Monte", 300.0, 3),
        entry("G-4", EntryKind::Income, "Utilidades", 999.0, 3),
        entry("G-5", EntryKind::Transfer, "Bóveda Monte", 50.0, 3),
    ];
    let transfers = vec![
        transfer("T-1", "Utilidades", "Bóveda Monte", 200.0, 4),
        transfer("T-2", "Bóveda Monte", "Flete Sur", 700.0, 5),
    ];

    let cut = cut_vault(&ledger, &transfers, "bóveda monte", None);
    assert_eq!(cut.income, 5800.0);
    assert_eq!(cut.expense, 300.0);
    assert_eq!(cut.transfers_in, 200.0);
    assert_eq!(cut.transfers_out, 700.0);
    assert_eq!(cut.balance, 5000.0);
    assert_eq!(cut.entry_count, 5);
}

#[test]
fn rows_after_the_cut_date_are_ignored() {
    let ledger = vec![
        entry("G-1", EntryKind::Income, "Utilidades", 100.0, 1),
        entry("G-2", EntryKind::Income, "Utilidades", 100.0, 10),
    ];
    let transfers = vec![transfer("T-1", "Utilidades", "Flete Sur", 40.0, 11)];

    let cut = cut_vault(&ledger, &transfers, "Utilidades", Some(day(5)));
    assert_eq!(cut.balance, 100.0);
    assert_eq!(cut.entry_count, 1);
    assert_eq!(cut.as_of, Some(day(5)));
}

#[test]
fn unknown_vault_has_zero_balance() {
    let cut = cut_vault(&[], &[], "Nowhere", None);
    assert_eq!(cut.balance, 0.0);
    assert_eq!(cut.entry_count, 0);
}

#[test]
fn vault_names_fold_accented_capitals() {
    let ledger = vec![entry("G-1", EntryKind::Income, "Bóveda Monte", 1200.0, 1)];
    let transfers = vec![transfer("T-1", "BÓVEDA MONTE", "Flete Sur", 200.0, 2)];

    let cut = cut_vault(&ledger, &transfers, "BÓVEDA MONTE", None);
    assert_eq!(cut.income, 1200.0);
    assert_eq!(cut.transfers_out, 200.0);
    assert_eq!(cut.balance, 1000.0);
}
