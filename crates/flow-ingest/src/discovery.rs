//! Snapshot file discovery and collection matching.

use std::path::{Path, PathBuf};

use flow_model::Collection;

use crate::error::{IngestError, Result};
use crate::reader::SnapshotFormat;

/// A snapshot file with the collection its name points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub format: SnapshotFormat,
    /// `None` when the file stem names no known collection.
    pub collection: Option<Collection>,
}

/// Lists `.json` and `.csv` files in a directory, sorted by filename.
pub fn list_snapshot_files(dir: &Path) -> Result<Vec<DiscoveredFile>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IngestError::io(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(format) = SnapshotFormat::from_path(&path) {
            files.push(DiscoveredFile {
                collection: collection_for_path(&path),
                path,
                format,
            });
        }
    }
    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

/// Match a file stem such as `ventas`, `sales_2025-01`, or `GYA` to a collection.
///
/// Only the part before the first `_`, `-`, or `.` is considered.
pub fn collection_for_path(path: &Path) -> Option<Collection> {
    let stem = path.file_stem()?.to_str()?;
    let head = stem
        .split(['_', '-', '.'])
        .next()
        .unwrap_or(stem)
        .trim();
    head.parse().ok()
}
