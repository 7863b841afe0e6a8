use std::path::Path;

use tracing::{debug, info, warn};

use flow_model::{Collection, Record, Snapshot};

use crate::discovery::{collection_for_path, list_snapshot_files};
use crate::error::{IngestError, Result};
use crate::normalize::{
    client_from, inventory_from, ledger_from, record_from, sale_from, transfer_from, vault_from,
};
use crate::reader::read_documents;

/// Load a snapshot from a directory of collection files or from one file.
///
/// In a directory, files for the same collection are appended in filename
/// order and files whose names match no collection are skipped with a
/// warning. A single file must match a collection.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    if path.is_dir() {
        let mut snapshot = Snapshot::default();
        for file in list_snapshot_files(path)? {
            let Some(collection) = file.collection else {
                warn!(path = %file.path.display(), "skipping file with no matching collection");
                continue;
            };
            load_collection_into(&mut snapshot, &file.path, collection)?;
        }
        info!(
            path = %path.display(),
            sales = snapshot.sales.len(),
            clients = snapshot.clients.len(),
            ledger = snapshot.ledger.len(),
            "snapshot loaded"
        );
        return Ok(snapshot);
    }

    let collection = collection_for_path(path).ok_or_else(|| IngestError::UnknownCollection {
        path: path.to_path_buf(),
    })?;
    load_collection(path, collection)
}

/// Load one file as the given collection.
pub fn load_collection(path: &Path, collection: Collection) -> Result<Snapshot> {
    let mut snapshot = Snapshot::default();
    load_collection_into(&mut snapshot, path, collection)?;
    Ok(snapshot)
}

fn load_collection_into(snapshot: &mut Snapshot, path: &Path, collection: Collection) -> Result<()> {
    let documents = read_documents(path)?;
    let read = documents.len();
    match collection {
        Collection::Sales => {
            snapshot
                .sales
                .extend(documents.iter().enumerate().map(|(i, d)| sale_from(d, i)));
        }
        Collection::Clients => {
            snapshot
                .clients
                .extend(documents.iter().enumerate().map(|(i, d)| client_from(d, i)));
        }
        Collection::Inventory => {
            snapshot
                .inventory
                .extend(documents.iter().enumerate().map(|(i, d)| inventory_from(d, i)));
        }
        Collection::Transfers => {
            snapshot
                .transfers
                .extend(documents.iter().enumerate().map(|(i, d)| transfer_from(d, i)));
        }
        Collection::Ledger => {
            snapshot
                .ledger
                .extend(documents.iter().enumerate().filter_map(|(i, d)| ledger_from(d, i)));
        }
        Collection::Vaults => {
            snapshot
                .vaults
                .extend(documents.iter().enumerate().map(|(i, d)| vault_from(d, i)));
        }
    }
    debug!(
        path = %path.display(),
        collection = %collection,
        documents = read,
        total = snapshot.len(collection),
        "collection file loaded"
    );
    Ok(())
}

/// Load any snapshot file as schemaless records.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let documents = read_documents(path)?;
    Ok(documents
        .iter()
        .enumerate()
        .map(|(i, d)| record_from(d, i))
        .collect())
}
