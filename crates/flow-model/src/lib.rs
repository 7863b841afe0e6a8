pub mod client;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod options;
pub mod record;
pub mod sale;
pub mod snapshot;
pub mod transfer;
pub mod value;
pub mod vault;
pub mod view;

pub use client::Client;
pub use error::{ModelError, Result};
pub use inventory::InventoryItem;
pub use ledger::{EntryKind, LedgerEntry};
pub use options::{
    DEFAULT_FREIGHT_RATE_PER_UNIT, DEFAULT_PAGE_SIZE, DEFAULT_TOLERANCE, SplitConfig, ViewConfig,
};
pub use record::{Listable, Record};
pub use sale::{LineItem, Sale, SaleStatus};
pub use snapshot::{Collection, Snapshot};
pub use transfer::Transfer;
pub use value::{FieldValue, parse_date, parse_number, same_name};
pub use vault::{Vault, VaultCut};
pub use view::{
    DateRange, FieldFilter, FilterState, PageState, SortDirection, SortState, parse_filter,
};
