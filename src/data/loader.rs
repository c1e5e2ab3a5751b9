use std::io::Read;
use std::path::Path;

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Dataset, RawRow, RawValue};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Whether the source could not be read at all or was read but is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    LoadFailure,
    ParseFailure,
}

/// Terminal failure while loading the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JSON: expected an array of row objects, {0}")]
    NotARecordArray(String),
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::Io { .. } | LoadError::UnsupportedFormat(_) => LoadErrorKind::LoadFailure,
            LoadError::Csv(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                LoadErrorKind::LoadFailure
            }
            LoadError::Csv(_) | LoadError::Json(_) | LoadError::NotARecordArray(_) => {
                LoadErrorKind::ParseFailure
            }
        }
    }

    /// The message shown in the blocking error view.
    pub fn user_message(&self) -> String {
        format!("Villa við að hlaða gögnum: {self}")
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and normalize a dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with `sveitarfelag, ar, hluti, name, y, is_percent`
/// * `.json` – `[{ "sveitarfelag": "...", "ar": 2020, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let io_err = |source: std::io::Error| LoadError::Io {
        path: path.display().to_string(),
        source,
    };

    let rows = match ext.as_str() {
        "csv" | "txt" => {
            let file = std::fs::File::open(path).map_err(io_err)?;
            read_csv_rows(file)?
        }
        "json" => {
            let text = std::fs::read_to_string(path).map_err(io_err)?;
            read_json_rows(&text)?
        }
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let dataset = Dataset::from_raw_rows(&rows);
    if dataset.is_empty() {
        log::warn!("{} contains no valid observations", path.display());
    }
    log::info!(
        "Loaded {} observations from {} ({} rows dropped): {} municipalities, {} segments, {} metrics",
        dataset.len(),
        path.display(),
        dataset.dropped_rows,
        dataset.domains.municipalities.len(),
        dataset.domains.segments.len(),
        dataset.domains.metrics.len(),
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read CSV text into raw rows.
///
/// Headers and cells are trimmed and blank lines skipped. Cells stay text
/// (blank cells become `Null`); the normalizer interprets them. Rows with a
/// different field count than the header are a structural error and abort the
/// load.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(col, cell)| (col.clone(), RawValue::from_cell(cell)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "sveitarfelag": "Garðabær", "ar": 2021, "hluti": "A-hluti",
///     "name": "Skuldahlutfall", "y": 0.82, "is_percent": true },
///   ...
/// ]
/// ```
pub fn read_json_rows(text: &str) -> Result<Vec<RawRow>, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::NotARecordArray("top level is not an array".into()))?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .ok_or_else(|| LoadError::NotARecordArray(format!("row {i} is not an object")))?;
            Ok(obj
                .iter()
                .map(|(key, val)| (key.trim().to_string(), json_to_raw(val)))
                .collect())
        })
        .collect()
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::from_cell(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                RawValue::Float(f)
            } else {
                RawValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => RawValue::Bool(*b),
        JsonValue::Null => RawValue::Null,
        other => RawValue::String(other.to_string()),
    }
}
