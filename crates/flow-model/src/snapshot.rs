//! An in-memory copy of every collection the dashboard reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::{ModelError, Result};
use crate::inventory::InventoryItem;
use crate::ledger::LedgerEntry;
use crate::sale::Sale;
use crate::transfer::Transfer;
use crate::vault::Vault;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Sales,
    Clients,
    Inventory,
    Transfers,
    Ledger,
    Vaults,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Self::Sales,
        Self::Clients,
        Self::Inventory,
        Self::Transfers,
        Self::Ledger,
        Self::Vaults,
    ];

    /// Firestore collection name.
    #[must_use]
    pub const fn document_name(&self) -> &'static str {
        match self {
            Self::Sales => "ventas",
            Self::Clients => "clientes",
            Self::Inventory => "almacen",
            Self::Transfers => "transferencias",
            Self::Ledger => "gya",
            Self::Vaults => "bancos",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.document_name())
    }
}

impl FromStr for Collection {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "ventas" | "sales" => Ok(Self::Sales),
            "clientes" | "clients" => Ok(Self::Clients),
            "almacen" | "inventario" | "inventory" => Ok(Self::Inventory),
            "transferencias" | "transfers" => Ok(Self::Transfers),
            "gya" | "gastos" | "ledger" => Ok(Self::Ledger),
            "bancos" | "bovedas" | "vaults" => Ok(Self::Vaults),
            _ => Err(ModelError::UnknownCollection(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub transfers: Vec<Transfer>,
    #[serde(default)]
    pub ledger: Vec<LedgerEntry>,
    #[serde(default)]
    pub vaults: Vec<Vault>,
}

impl Snapshot {
    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Sales => self.sales.len(),
            Collection::Clients => self.clients.len(),
            Collection::Inventory => self.inventory.len(),
            Collection::Transfers => self.transfers.len(),
            Collection::Ledger => self.ledger.len(),
            Collection::Vaults => self.vaults.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Collection::ALL.iter().all(|c| self.len(*c) == 0)
    }

    /// Replace each collection that `other` carries, keeping the rest.
    pub fn merge(&mut self, other: Snapshot) {
        if !other.sales.is_empty() {
            self.sales = other.sales;
        }
        if !other.clients.is_empty() {
            self.clients = other.clients;
        }
        if !other.inventory.is_empty() {
            self.inventory = other.inventory;
        }
        if !other.transfers.is_empty() {
            self.transfers = other.transfers;
        }
        if !other.ledger.is_empty() {
            self.ledger = other.ledger;
        }
        if !other.vaults.is_empty() {
            self.vaults = other.vaults;
        }
    }
}
