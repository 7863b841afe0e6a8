//! Application state and the actions that change it.
//!
//! All writes go through [`AppState::apply`], which keeps the derived
//! bookkeeping consistent: a sale's FL/BM/UT buckets, the ledger postings of
//! paid sales, the running debt of each client, and the stock a sale draws
//! from inventory. Transfers may not overdraw their source vault.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use flow_model::sale::sanitize_amount;
use flow_model::{
    Client, Collection, InventoryItem, LedgerEntry, Sale, SaleStatus, Snapshot, Transfer,
    same_name,
};
use flow_split::{SplitCalculator, accounting_entries, outstanding_debt, validate_sale};

use crate::cut::cut_vault;
use crate::error::{Result, StateError};

/// A requested change to the application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace every collection with a freshly loaded snapshot.
    LoadSnapshot(Snapshot),
    AddSale(Sale),
    /// Replace the sale with the same id, undoing its previous effects.
    UpdateSale(Sale),
    RecordPayment {
        sale_id: String,
        amount: f64,
        date: Option<NaiveDate>,
    },
    AddClient(Client),
    UpdateClient(Client),
    AddLedgerEntry(LedgerEntry),
    AddTransfer(Transfer),
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Self::LoadSnapshot(_) => "load_snapshot",
            Self::AddSale(_) => "add_sale",
            Self::UpdateSale(_) => "update_sale",
            Self::RecordPayment { .. } => "record_payment",
            Self::AddClient(_) => "add_client",
            Self::UpdateClient(_) => "update_client",
            Self::AddLedgerEntry(_) => "add_ledger_entry",
            Self::AddTransfer(_) => "add_transfer",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    snapshot: Snapshot,
    calculator: SplitCalculator,
}

impl AppState {
    pub fn new(calculator: SplitCalculator) -> Self {
        Self {
            snapshot: Snapshot::default(),
            calculator,
        }
    }

    pub fn with_snapshot(calculator: SplitCalculator, snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            calculator,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn calculator(&self) -> &SplitCalculator {
        &self.calculator
    }

    pub fn sale(&self, id: &str) -> Option<&Sale> {
        self.snapshot.sales.iter().find(|sale| sale.id == id)
    }

    /// Look a client up by id, falling back to a case-insensitive name match.
    pub fn client(&self, key: &str) -> Option<&Client> {
        client_index(&self.snapshot.clients, key).map(|idx| &self.snapshot.clients[idx])
    }

    /// Look an inventory item up by id, falling back to a case-insensitive name match.
    pub fn inventory_item(&self, key: &str) -> Option<&InventoryItem> {
        inventory_index(&self.snapshot.inventory, key).map(|idx| &self.snapshot.inventory[idx])
    }

    /// Current balance of a vault from the ledger and transfers.
    pub fn vault_balance(&self, vault: &str) -> f64 {
        cut_vault(&self.snapshot.ledger, &self.snapshot.transfers, vault, None).balance
    }

    /// Apply one action. On error nothing has been changed.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        let name = action.name();
        match action {
            Action::LoadSnapshot(snapshot) => {
                self.snapshot = snapshot;
                info!(
                    sales = self.snapshot.sales.len(),
                    clients = self.snapshot.clients.len(),
                    ledger = self.snapshot.ledger.len(),
                    "snapshot replaced"
                );
            }
            Action::AddSale(sale) => self.add_sale(sale)?,
            Action::UpdateSale(sale) => self.update_sale(sale)?,
            Action::RecordPayment {
                sale_id,
                amount,
                date,
            } => self.record_payment(&sale_id, amount, date)?,
            Action::AddClient(client) => {
                ensure_new(&self.snapshot.clients, Collection::Clients, &client.id, |c| &c.id)?;
                self.snapshot.clients.push(client);
            }
            Action::UpdateClient(client) => {
                let idx = position(&self.snapshot.clients, Collection::Clients, &client.id, |c| {
                    &c.id
                })?;
                self.snapshot.clients[idx] = client;
            }
            Action::AddLedgerEntry(entry) => {
                ensure_new(&self.snapshot.ledger, Collection::Ledger, &entry.id, |e| &e.id)?;
                self.snapshot.ledger.push(entry);
            }
            Action::AddTransfer(transfer) => self.add_transfer(transfer)?,
        }
        debug!(action = name, "action applied");
        Ok(())
    }

    fn add_sale(&mut self, mut sale: Sale) -> Result<()> {
        ensure_new(&self.snapshot.sales, Collection::Sales, &sale.id, |s| &s.id)?;
        self.prepare_sale(&mut sale)?;
        self.check_stock(&sale, None)?;
        self.post_sale_effects(&sale);
        info!(sale = %sale.id, status = %sale.status, price = sale.sale_price, "sale recorded");
        self.snapshot.sales.push(sale);
        Ok(())
    }

    fn update_sale(&mut self, mut sale: Sale) -> Result<()> {
        let idx = position(&self.snapshot.sales, Collection::Sales, &sale.id, |s| &s.id)?;
        self.prepare_sale(&mut sale)?;
        let previous = self.snapshot.sales[idx].clone();
        self.check_stock(&sale, Some(&previous))?;
        self.revert_sale_effects(&previous);
        self.post_sale_effects(&sale);
        info!(sale = %sale.id, status = %sale.status, "sale updated");
        self.snapshot.sales[idx] = sale;
        Ok(())
    }

    fn record_payment(&mut self, sale_id: &str, amount: f64, date: Option<NaiveDate>) -> Result<()> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(StateError::InvalidAmount { amount });
        }
        let idx = position(&self.snapshot.sales, Collection::Sales, sale_id, |s| &s.id)?;
        let sale = &self.snapshot.sales[idx];
        if sale.is_paid() {
            return Err(StateError::AlreadyPaid {
                id: sale_id.to_string(),
            });
        }

        let owed = outstanding_debt(sale.sale_price, sale.amount_paid);
        if amount > owed {
            warn!(sale = %sale_id, amount, owed, "payment exceeds outstanding balance, capped");
        }
        // A remainder below the tolerance is rounding, not debt.
        let settled = owed - amount.min(owed) < self.calculator.tolerance();
        let applied = if settled { owed } else { amount };
        let client = sale.client.clone();
        self.adjust_debt(&client, -applied);

        let sale = &mut self.snapshot.sales[idx];
        if settled {
            sale.amount_paid = sale.sale_price;
            sale.status = SaleStatus::Paid;
            if sale.date.is_none() {
                sale.date = date;
            }
            let split = self.calculator.split_sale(sale);
            let entries = accounting_entries(sale, &split);
            self.snapshot.ledger.extend(entries);
        } else {
            sale.amount_paid = sanitize_amount(sale.amount_paid) + applied;
        }
        info!(sale = %sale_id, applied, settled, "payment recorded");
        Ok(())
    }

    fn add_transfer(&mut self, transfer: Transfer) -> Result<()> {
        ensure_new(&self.snapshot.transfers, Collection::Transfers, &transfer.id, |t| &t.id)?;
        if !(transfer.amount.is_finite() && transfer.amount > 0.0) {
            return Err(StateError::InvalidAmount {
                amount: transfer.amount,
            });
        }
        if same_name(&transfer.from_vault, &transfer.to_vault) {
            return Err(StateError::InvalidTransfer {
                id: transfer.id,
                reason: "origin and destination are the same vault",
            });
        }
        let available = self.vault_balance(&transfer.from_vault);
        if transfer.amount - available >= self.calculator.tolerance() {
            return Err(StateError::InsufficientFunds {
                vault: transfer.from_vault,
                available: available.max(0.0),
                amount: transfer.amount,
            });
        }
        info!(
            transfer = %transfer.id,
            from = %transfer.from_vault,
            to = %transfer.to_vault,
            amount = transfer.amount,
            "transfer recorded"
        );
        self.snapshot.transfers.push(transfer);
        Ok(())
    }

    /// Reject incomplete sales and store a freshly computed split on the rest.
    fn prepare_sale(&self, sale: &mut Sale) -> Result<()> {
        let validation = validate_sale(sale, &self.calculator);
        if let Some(issue) = validation.errors().next() {
            return Err(StateError::InvalidSale {
                id: sale.id.clone(),
                issue: issue.clone(),
            });
        }
        for issue in validation.warnings() {
            warn!(sale = %sale.id, %issue, "sale accepted with warning");
        }
        let split = self.calculator.split_sale(sale);
        split.apply_to(sale);
        if sale.is_paid() {
            sale.amount_paid = sale.sale_price;
        }
        Ok(())
    }

    /// Reject a sale that ships more units than its product has in stock.
    /// Units held by the version of the sale being replaced count as available.
    fn check_stock(&self, sale: &Sale, previous: Option<&Sale>) -> Result<()> {
        let Some(product) = sale.product.as_deref() else {
            return Ok(());
        };
        let inventory = &self.snapshot.inventory;
        let Some(idx) = inventory_index(inventory, product) else {
            return Ok(());
        };
        let returned = previous
            .filter(|prev| {
                prev.product
                    .as_deref()
                    .and_then(|key| inventory_index(inventory, key))
                    == Some(idx)
            })
            .map_or(0, units_of);
        let available = inventory[idx].stock.max(0).saturating_add(returned);
        let requested = units_of(sale);
        if requested > available {
            return Err(StateError::InsufficientStock {
                product: product.to_string(),
                available,
                requested,
            });
        }
        Ok(())
    }

    fn post_sale_effects(&mut self, sale: &Sale) {
        self.move_stock(sale, -1);
        if sale.is_paid() {
            let split = self.calculator.split_sale(sale);
            self.snapshot.ledger.extend(accounting_entries(sale, &split));
        } else {
            let owed = outstanding_debt(sale.sale_price, sale.amount_paid);
            self.adjust_debt(&sale.client, owed);
        }
    }

    fn revert_sale_effects(&mut self, sale: &Sale) {
        self.move_stock(sale, 1);
        if sale.is_paid() {
            let posted = posting_ids(&sale.id);
            self.snapshot
                .ledger
                .retain(|entry| !posted.contains(&entry.id));
        } else {
            let owed = outstanding_debt(sale.sale_price, sale.amount_paid);
            self.adjust_debt(&sale.client, -owed);
        }
    }

    /// Take a sale's units out of stock (`direction` -1) or put them back (+1).
    fn move_stock(&mut self, sale: &Sale, direction: i64) {
        let Some(product) = sale.product.as_deref() else {
            return;
        };
        let units = units_of(sale);
        if units == 0 {
            return;
        }
        match inventory_index(&self.snapshot.inventory, product) {
            Some(idx) => {
                let item = &mut self.snapshot.inventory[idx];
                item.stock = item.stock.saturating_add(direction.saturating_mul(units));
                debug!(product = %item.id, stock = item.stock, "stock moved");
            }
            None => {
                warn!(sale = %sale.id, product, "sale references an unknown product, stock not tracked");
            }
        }
    }

    fn adjust_debt(&mut self, client_key: &str, delta: f64) {
        match client_index(&self.snapshot.clients, client_key) {
            Some(idx) => {
                let client = &mut self.snapshot.clients[idx];
                client.debt = (sanitize_amount(client.debt) + delta).max(0.0);
            }
            None if delta != 0.0 => {
                warn!(client = %client_key, delta, "sale references an unknown client, debt not tracked");
            }
            None => {}
        }
    }
}

fn posting_ids(sale_id: &str) -> [String; 3] {
    ["BM", "FL", "UT"].map(|prefix| format!("{prefix}-{sale_id}"))
}

fn units_of(sale: &Sale) -> i64 {
    i64::try_from(sale.shipped_units()).unwrap_or(i64::MAX)
}

fn client_index(clients: &[Client], key: &str) -> Option<usize> {
    let key = key.trim();
    clients
        .iter()
        .position(|client| client.id == key)
        .or_else(|| clients.iter().position(|client| same_name(&client.name, key)))
}

fn inventory_index(inventory: &[InventoryItem], key: &str) -> Option<usize> {
    let key = key.trim();
    inventory
        .iter()
        .position(|item| item.id == key)
        .or_else(|| inventory.iter().position(|item| same_name(&item.name, key)))
}

fn ensure_new<T>(
    records: &[T],
    collection: Collection,
    id: &str,
    id_of: impl Fn(&T) -> &String,
) -> Result<()> {
    if records.iter().any(|record| id_of(record) == id) {
        return Err(StateError::DuplicateId {
            collection,
            id: id.to_string(),
        });
    }
    Ok(())
}

fn position<T>(
    records: &[T],
    collection: Collection,
    id: &str,
    id_of: impl Fn(&T) -> &String,
) -> Result<usize> {
    records
        .iter()
        .position(|record| id_of(record) == id)
        .ok_or_else(|| StateError::UnknownId {
            collection,
            id: id.to_string(),
        })
}
