//! Action handling and the bookkeeping it keeps consistent.

use chrono::NaiveDate;
use flow_core::{Action, AppState, StateError};
use flow_model::{
    Client, Collection, EntryKind, InventoryItem, LedgerEntry, LineItem, Sale, SaleStatus,
    SplitConfig, Transfer,
};
use flow_split::{SaleIssue, SplitCalculator};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

fn client(id: &str, name: &str) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        active: true,
        ..Client::default()
    }
}

fn sale(id: &str, status: SaleStatus) -> Sale {
    Sale {
        id: id.to_string(),
        date: Some(day(15)),
        client: "C-1".to_string(),
        quantity: 12,
        line_items: vec![LineItem::new(400.0, 12)],
        sale_price: 15_000.0,
        status,
        ..Sale::default()
    }
}

fn state() -> AppState {
    let mut state = AppState::new(SplitCalculator::new(SplitConfig::default()));
    state.apply(Action::AddClient(client("C-1", "Ana"))).unwrap();
    state
}

#[test]
fn paid_sale_stores_split_and_posts_entries() {
    let mut state = state();
    state.apply(Action::AddSale(sale("V-1", SaleStatus::Paid))).unwrap();

    let stored = state.sale("V-1").unwrap();
    assert_eq!(stored.freight, 6000.0);
    assert_eq!(stored.vault_allocation, 4800.0);
    assert_eq!(stored.profit, 4200.0);
    assert_eq!(stored.amount_paid, 15_000.0);

    let ledger = &state.snapshot().ledger;
    let ids: Vec<&str> = ledger.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["BM-V-1", "FL-V-1", "UT-V-1"]);
    assert_eq!(state.client("C-1").unwrap().debt, 0.0);
}

#[test]
fn pending_sale_adds_debt_without_postings() {
    let mut state = state();
    let mut pending = sale("V-1", SaleStatus::Pending);
    pending.amount_paid = 5000.0;
    state.apply(Action::AddSale(pending)).unwrap();

    assert!(state.snapshot().ledger.is_empty());
    assert_eq!(state.client("C-1").unwrap().debt, 10_000.0);
}

#[test]
fn settling_payment_marks_paid_and_posts() {
    let mut state = state();
    state.apply(Action::AddSale(sale("V-1", SaleStatus::Pending))).unwrap();

    state
        .apply(Action::RecordPayment {
            sale_id: "V-1".to_string(),
            amount: 10_000.0,
            date: Some(day(20)),
        })
        .unwrap();
    assert_eq!(state.sale("V-1").unwrap().status, SaleStatus::Pending);
    assert_eq!(state.client("C-1").unwrap().debt, 5000.0);
    assert!(state.snapshot().ledger.is_empty());

    state
        .apply(Action::RecordPayment {
            sale_id: "V-1".to_string(),
            amount: 7000.0,
            date: Some(day(21)),
        })
        .unwrap();
    let settled = state.sale("V-1").unwrap();
    assert_eq!(settled.status, SaleStatus::Paid);
    assert_eq!(settled.amount_paid, 15_000.0);
    assert_eq!(state.client("C-1").unwrap().debt, 0.0);
    assert_eq!(state.snapshot().ledger.len(), 3);

    let err = state
        .apply(Action::RecordPayment {
            sale_id: "V-1".to_string(),
            amount: 1.0,
            date: None,
        })
        .unwrap_err();
    assert!(matches!(err, StateError::AlreadyPaid { .. }));
}

#[test]
fn updating_a_sale_replaces_its_effects() {
    let mut state = state();
    state.apply(Action::AddSale(sale("V-1", SaleStatus::Pending))).unwrap();
    assert_eq!(state.client("C-1").unwrap().debt, 15_000.0);

    let mut paid = sale("V-1", SaleStatus::Paid);
    paid.sale_price = 10_000.0;
    state.apply(Action::UpdateSale(paid)).unwrap();
    assert_eq!(state.client("C-1").unwrap().debt, 0.0);
    assert_eq!(state.snapshot().ledger.len(), 3);

    // 10000 - 6000 - 4800
    let profit = state
        .snapshot()
        .ledger
        .iter()
        .find(|e| e.id == "UT-V-1")
        .unwrap();
    assert_eq!(profit.kind, EntryKind::Expense);
    assert_eq!(profit.amount, 800.0);

    let mut repriced = sale("V-1", SaleStatus::Paid);
    repriced.sale_price = 12_000.0;
    state.apply(Action::UpdateSale(repriced)).unwrap();
    assert_eq!(state.snapshot().ledger.len(), 3);
}

#[test]
fn duplicate_and_unknown_ids_are_rejected() {
    let mut state = state();
    state.apply(Action::AddSale(sale("V-1", SaleStatus::Paid))).unwrap();

    let err = state
        .apply(Action::AddSale(sale("V-1", SaleStatus::Paid)))
        .unwrap_err();
    assert!(matches!(
        err,
        StateError::DuplicateId { collection: Collection::Sales, .. }
    ));

    let err = state
        .apply(Action::UpdateClient(client("C-9", "Nadie")))
        .unwrap_err();
    assert!(matches!(err, StateError::UnknownId { .. }));
    assert_eq!(err.to_string(), "clientes has no record with id C-9");
}

#[test]
fn incomplete_sale_is_rejected_without_side_effects() {
    let mut state = state();
    let mut incomplete = sale("V-1", SaleStatus::Pending);
    incomplete.sale_price = 0.0;

    let err = state.apply(Action::AddSale(incomplete)).unwrap_err();
    assert!(matches!(
        err,
        StateError::InvalidSale { issue: SaleIssue::NoSalePrice, .. }
    ));
    assert!(state.snapshot().sales.is_empty());
    assert_eq!(state.client("C-1").unwrap().debt, 0.0);
}

#[test]
fn sale_can_reference_client_by_name() {
    let mut state = state();
    let mut by_name = sale("V-1", SaleStatus::Pending);
    by_name.client = "ana".to_string();
    state.apply(Action::AddSale(by_name)).unwrap();
    assert_eq!(state.client("C-1").unwrap().debt, 15_000.0);
}

#[test]
fn transfer_between_same_vault_is_rejected() {
    let mut state = state();
    let transfer = Transfer {
        id: "T-1".to_string(),
        date: Some(day(2)),
        from_vault: "Bóveda Monte".to_string(),
        to_vault: "bóveda monte".to_string(),
        amount: 100.0,
        concept: String::new(),
    };
    let err = state.apply(Action::AddTransfer(transfer)).unwrap_err();
    assert!(matches!(err, StateError::InvalidTransfer { .. }));
}

#[test]
fn settling_payment_absorbs_rounding_remainder() {
    let mut state = state();
    let mut small = sale("V-1", SaleStatus::Pending);
    small.quantity = 0;
    small.line_items = vec![LineItem::new(1.0, 1)];
    small.sale_price = 401.2;
    state.apply(Action::AddSale(small)).unwrap();

    for amount in [96.15, 1000.0] {
        state
            .apply(Action::RecordPayment {
                sale_id: "V-1".to_string(),
                amount,
                date: Some(day(20)),
            })
            .unwrap();
    }

    let settled = state.sale("V-1").unwrap();
    assert_eq!(settled.status, SaleStatus::Paid);
    assert_eq!(settled.amount_paid, 401.2);
    assert_eq!(state.snapshot().ledger.len(), 3);
    assert_eq!(state.client("C-1").unwrap().debt, 0.0);
}

fn stocked(id: &str, name: &str, stock: i64) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        stock,
        unit_cost: 400.0,
        ..InventoryItem::default()
    }
}

fn stock_of(state: &AppState, key: &str) -> i64 {
    state.inventory_item(key).unwrap().stock
}

#[test]
fn sale_draws_its_units_from_stock() {
    let mut state = state();
    let mut snapshot = state.snapshot().clone();
    snapshot.inventory.push(stocked("P-1", "Caja 20L", 30));
    state.apply(Action::LoadSnapshot(snapshot)).unwrap();

    let mut first = sale("V-1", SaleStatus::Paid);
    first.product = Some("P-1".to_string());
    state.apply(Action::AddSale(first)).unwrap();
    assert_eq!(stock_of(&state, "P-1"), 18);

    let mut by_name = sale("V-2", SaleStatus::Pending);
    by_name.product = Some("CAJA 20l".to_string());
    by_name.line_items = vec![LineItem::new(400.0, 5)];
    by_name.quantity = 5;
    state.apply(Action::AddSale(by_name)).unwrap();
    assert_eq!(stock_of(&state, "Caja 20L"), 13);

    let mut resized = state.sale("V-1").unwrap().clone();
    resized.line_items = vec![LineItem::new(400.0, 20)];
    resized.quantity = 20;
    state.apply(Action::UpdateSale(resized)).unwrap();
    assert_eq!(stock_of(&state, "P-1"), 5);
}

#[test]
fn sale_beyond_stock_is_rejected_without_side_effects() {
    let mut state = state();
    let mut snapshot = state.snapshot().clone();
    snapshot.inventory.push(stocked("P-1", "Caja 20L", 10));
    state.apply(Action::LoadSnapshot(snapshot)).unwrap();

    let mut oversized = sale("V-1", SaleStatus::Pending);
    oversized.product = Some("P-1".to_string());
    let err = state.apply(Action::AddSale(oversized)).unwrap_err();
    assert!(matches!(
        err,
        StateError::InsufficientStock { available: 10, requested: 12, .. }
    ));
    assert!(state.snapshot().sales.is_empty());
    assert_eq!(stock_of(&state, "P-1"), 10);
    assert_eq!(state.client("C-1").unwrap().debt, 0.0);
}

fn transfer(id: &str, from: &str, to: &str, amount: f64) -> Transfer {
    Transfer {
        id: id.to_string(),
        date: Some(day(3)),
        from_vault: from.to_string(),
        to_vault: to.to_string(),
        amount,
        concept: String::new(),
    }
}

#[test]
fn transfer_cannot_overdraw_its_source_vault() {
    let mut state = state();
    state
        .apply(Action::AddLedgerEntry(LedgerEntry {
            id: "G-1".to_string(),
            date: Some(day(1)),
            kind: EntryKind::Income,
            destination: "Bóveda Monte".to_string(),
            origin: None,
            concept: "Capital inicial".to_string(),
            category: None,
            amount: 1000.0,
            reference: None,
        }))
        .unwrap();

    state
        .apply(Action::AddTransfer(transfer("T-1", "BÓVEDA MONTE", "Flete Sur", 600.0)))
        .unwrap();
    assert_eq!(state.vault_balance("Bóveda Monte"), 400.0);
    assert_eq!(state.vault_balance("Flete Sur"), 600.0);

    let err = state
        .apply(Action::AddTransfer(transfer("T-2", "Bóveda Monte", "Utilidades", 400.5)))
        .unwrap_err();
    assert!(matches!(err, StateError::InsufficientFunds { .. }));
    assert_eq!(state.snapshot().transfers.len(), 1);

    let err = state
        .apply(Action::AddTransfer(transfer("T-3", "Bóveda USA", "Utilidades", 1.0)))
        .unwrap_err();
    assert!(matches!(err, StateError::InsufficientFunds { .. }));
}

#[test]
fn client_names_match_across_accented_capitals() {
    let mut state = state();
    state.apply(Action::AddClient(client("C-2", "Ángel Núñez"))).unwrap();
    assert_eq!(state.client("ÁNGEL NÚÑEZ").map(|c| c.id.as_str()), Some("C-2"));
}
