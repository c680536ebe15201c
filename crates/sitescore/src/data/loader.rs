//! Dataset loading from spreadsheets and record arrays
//!
//! Spreadsheets (`.xlsx`, `.xlsm`) are read from their first sheet, whose
//! first row holds the column names. JSON and YAML files hold an array of row
//! objects keyed by column name:
//!
//! ```json
//! [
//!   {"PSTATABB": "TX", "Plant county name": "Harris", "PNAME": "Alpha", "GEN": 5, "PIPE": 4},
//!   {"PSTATABB": "TX", "Plant county name": "Travis", "PNAME": "Bravo", "GEN": "3", "PIPE": null}
//! ]
//! ```

use std::fs;
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use sitescore_core::{Cell, Dataset, Record};

#[derive(Debug)]
pub enum LoadError {
    Io(String),
    Parse(String),
    UnsupportedFormat(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "IO error: {msg}"),
            LoadError::Parse(msg) => write!(f, "Parse error: {msg}"),
            LoadError::UnsupportedFormat(ext) => write!(
                f,
                "Unsupported dataset format '{ext}' (expected .xlsx, .xlsm, .json, .yaml or .yml)"
            ),
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Xlsx,
    Json,
    Yaml,
}

impl DatasetFormat {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" => Ok(DatasetFormat::Xlsx),
            "json" => Ok(DatasetFormat::Json),
            "yaml" | "yml" => Ok(DatasetFormat::Yaml),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }
}

fn parse_error(e: impl std::fmt::Display) -> LoadError {
    LoadError::Parse(format!("Failed to parse dataset: {e}"))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(x) => Cell::Number(*x),
        Data::Bool(b) => Cell::Flag(*b),
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

/// First worksheet of a workbook; rows with no values are skipped
fn parse_workbook(bytes: &[u8]) -> Result<Dataset, LoadError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(parse_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::Parse("workbook has no worksheets".to_string()))?
        .map_err(parse_error)?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Dataset::default());
    };
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, data)| match data.to_string().trim() {
            "" => format!("Unnamed: {i}"),
            name => name.to_string(),
        })
        .collect();

    let cells: Vec<Vec<Cell>> = rows
        .filter(|row| row.iter().any(|d| !matches!(d, Data::Empty)))
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    Dataset::new(columns, cells).map_err(parse_error)
}

/// Parse dataset file contents in the given format
pub fn parse_dataset(bytes: &[u8], format: DatasetFormat) -> Result<Dataset, LoadError> {
    match format {
        DatasetFormat::Xlsx => parse_workbook(bytes),
        DatasetFormat::Json => {
            let records: Vec<Record> = serde_json::from_slice(bytes).map_err(parse_error)?;
            Ok(Dataset::from_records(records))
        }
        DatasetFormat::Yaml => {
            let text = std::str::from_utf8(bytes).map_err(parse_error)?;
            let records: Vec<Record> = serde_saphyr::from_str(text).map_err(parse_error)?;
            Ok(Dataset::from_records(records))
        }
    }
}

/// Read a dataset file, picking the parser from its extension
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let format = DatasetFormat::from_path(path)?;
    let bytes = fs::read(path)
        .map_err(|e| LoadError::Io(format!("Failed to read {}: {e}", path.display())))?;

    let dataset = parse_dataset(&bytes, format)?;
    tracing::info!(
        path = %path.display(),
        ?format,
        rows = dataset.len(),
        columns = dataset.columns().len(),
        "loaded dataset"
    );
    Ok(dataset)
}
