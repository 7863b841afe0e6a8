//! Raw document readers. Each snapshot file becomes a list of loosely typed
//! documents; typing happens in [`crate::normalize`].

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};

/// One exported document, keyed by its stored field names.
pub type Document = Map<String, Value>;

/// Snapshot file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// Read a `.json` or `.csv` snapshot file.
pub fn read_documents(path: &Path) -> Result<Vec<Document>> {
    match SnapshotFormat::from_path(path) {
        Some(SnapshotFormat::Json) => read_json_documents(path),
        Some(SnapshotFormat::Csv) => read_csv_documents(path),
        None => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Read a JSON array of objects. Non-object elements are skipped.
pub fn read_json_documents(path: &Path) -> Result<Vec<Document>> {
    let text = fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(items) = value else {
        return Err(IngestError::NotAnArray {
            path: path.to_path_buf(),
        });
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect())
}

/// Read a CSV export with a header row. Every cell is kept as text; blank
/// rows are dropped and short rows are padded with empty cells.
pub fn read_csv_documents(path: &Path) -> Result<Vec<Document>> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(csv_error)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();

    let mut documents = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut document = Document::new();
        for (idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let cell = record.get(idx).unwrap_or("").trim();
            document.insert(header.clone(), Value::String(cell.to_string()));
        }
        documents.push(document);
    }
    Ok(documents)
}

/// Strip a UTF-8 BOM and surrounding whitespace from a header cell.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}
