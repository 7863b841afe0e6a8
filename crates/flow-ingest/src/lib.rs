//! Snapshot ingestion.
//!
//! Collection exports arrive as JSON arrays or CSV files named after the
//! collection they hold (`ventas.json`, `gya.csv`, ...). They are read into raw
//! documents and normalized into the typed records of `flow-model`.

pub mod discovery;
pub mod document;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod reader;

pub use discovery::{DiscoveredFile, collection_for_path, list_snapshot_files};
pub use error::{IngestError, Result};
pub use loader::{load_collection, load_records, load_snapshot};
pub use reader::{Document, SnapshotFormat, read_documents};
