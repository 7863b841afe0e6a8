//! Vault cuts ("cortes"): the balance of one vault as of a date.

use chrono::NaiveDate;
use tracing::debug;

use flow_model::{EntryKind, LedgerEntry, Transfer, VaultCut, same_name};

/// Balance of `vault` from the ledger and transfers dated on or before `as_of`.
///
/// Income and payment entries addressed to the vault count as income and
/// expense entries addressed to it as expense; transfer-kind ledger entries
/// are ignored in favour of the transfer records. Undated rows always count.
/// Vault names compare case-insensitively, accents included.
pub fn cut_vault(
    ledger: &[LedgerEntry],
    transfers: &[Transfer],
    vault: &str,
    as_of: Option<NaiveDate>,
) -> VaultCut {
    let vault = vault.trim();
    let in_range = |date: Option<NaiveDate>| match (date, as_of) {
        (Some(date), Some(limit)) => date <= limit,
        _ => true,
    };
    let names = |name: &str| same_name(name, vault);

    let mut cut = VaultCut {
        vault: vault.to_string(),
        as_of,
        income: 0.0,
        expense: 0.0,
        transfers_in: 0.0,
        transfers_out: 0.0,
        balance: 0.0,
        entry_count: 0,
    };
    for entry in ledger
        .iter()
        .filter(|entry| names(&entry.destination) && in_range(entry.date))
    {
        let amount = finite(entry.amount);
        match entry.kind {
            EntryKind::Income | EntryKind::Payment => cut.income += amount,
            EntryKind::Expense => cut.expense += amount,
            EntryKind::Transfer => continue,
        }
        cut.entry_count += 1;
    }
    for transfer in transfers.iter().filter(|t| in_range(t.date)) {
        let amount = finite(transfer.amount);
        if names(&transfer.to_vault) {
            cut.transfers_in += amount;
            cut.entry_count += 1;
        }
        if names(&transfer.from_vault) {
            cut.transfers_out += amount;
            cut.entry_count += 1;
        }
    }
    cut.balance = cut.income - cut.expense + cut.transfers_in - cut.transfers_out;
    debug!(vault = %cut.vault, balance = cut.balance, entries = cut.entry_count, "vault cut computed");
    cut
}

fn finite(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
