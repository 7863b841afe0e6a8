//! Ledger postings generated by a settled sale.

use flow_model::{EntryKind, LedgerEntry, Sale};

use crate::calculator::SaleSplit;

/// Vault receiving the purchase cost of sold goods (BM).
pub const BOVEDA_MONTE: &str = "Bóveda Monte";
/// Bucket charged with shipping (FL).
pub const FLETE_SUR: &str = "Flete Sur";
/// Bucket receiving net profit (UT).
pub const UTILIDADES: &str = "Utilidades";

const SALE_CATEGORY: &str = "venta";

/// Entries posted when a sale is paid: BM income, FL expense, and UT income.
///
/// A loss posts UT as an expense of the missing amount. Pending sales post
/// nothing until they are settled.
pub fn accounting_entries(sale: &Sale, split: &SaleSplit) -> Vec<LedgerEntry> {
    if !sale.is_paid() {
        return Vec::new();
    }
    let units = sale.line_item_units().max(u64::from(sale.quantity));
    let profit_kind = if split.profit < 0.0 {
        EntryKind::Expense
    } else {
        EntryKind::Income
    };
    vec![
        posting(
            sale,
            "BM",
            EntryKind::Income,
            BOVEDA_MONTE,
            split.vault_allocation,
            format!("Venta {} - {units} pzas", sale.client),
        ),
        posting(
            sale,
            "FL",
            EntryKind::Expense,
            FLETE_SUR,
            split.freight,
            format!("Flete venta {} - {units} pzas", sale.client),
        ),
        posting(
            sale,
            "UT",
            profit_kind,
            UTILIDADES,
            split.profit.abs(),
            format!(
                "Utilidad venta {} (margen {:.2}%)",
                sale.client,
                split.margin_percentage()
            ),
        ),
    ]
}

fn posting(
    sale: &Sale,
    prefix: &str,
    kind: EntryKind,
    destination: &str,
    amount: f64,
    concept: String,
) -> LedgerEntry {
    LedgerEntry {
        id: format!("{prefix}-{}", sale.id),
        date: sale.date,
        kind,
        destination: destination.to_string(),
        origin: Some(sale.client.clone()),
        concept,
        category: Some(SALE_CATEGORY.to_string()),
        amount,
        reference: Some(sale.id.clone()),
    }
}
