use std::fmt;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// State code column
pub const STATE_COLUMN: &str = "PSTATABB";
/// County name column
pub const COUNTY_COLUMN: &str = "Plant county name";
/// Plant name column
pub const PLANT_COLUMN: &str = "PNAME";

/// Columns every dataset must carry to identify a site
pub const IDENTITY_COLUMNS: [&str; 3] = [STATE_COLUMN, COUNTY_COLUMN, PLANT_COLUMN];

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Flag(bool),
    Text(String),
    #[default]
    Empty,
}

impl Cell {
    /// Numeric value of the cell. Numeric text is accepted, flags map to 0/1.
    /// NaN and infinities are not numbers here.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Cell::Number(n) => Some(*n),
            Cell::Flag(b) => Some(if *b { 1.0 } else { 0.0 }),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Empty => None,
        };
        value.filter(|v: &f64| v.is_finite())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Flag(b) => write!(f, "{b}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Empty => Ok(()),
        }
    }
}

/// One row as loaded from a file: column name to cell, in file order
pub type Record = IndexMap<String, Cell>;

/// Identifying attributes of a candidate site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteIdentity {
    pub state: String,
    pub county: String,
    pub plant: String,
}

/// In-memory table of candidate sites.
///
/// Row order is the order rows were supplied in and is preserved by every
/// operation that returns row indices.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    index: FxHashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Build from a header and row-major cells. Every row must have one cell per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, DatasetError> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(DatasetError::RaggedRow {
                    row: i,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }

        let index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    /// Build from keyed records. Columns appear in first-seen order; a key
    /// missing from a record becomes an empty cell.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        for record in &records {
            for key in record.keys() {
                if !index.contains_key(key) {
                    index.insert(key.clone(), columns.len());
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|name| record.swap_remove(name).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self {
            columns,
            index,
            rows,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Fail with every missing name if any of `names` is absent
    pub fn require_columns(&self, names: &[&str]) -> Result<(), DatasetError> {
        let missing: Vec<String> = names
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| (*name).to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DatasetError::MissingColumns(missing))
        }
    }

    pub fn cell(&self, row: usize, column: &str) -> Result<&Cell, DatasetError> {
        let col = self
            .column_index(column)
            .ok_or_else(|| DatasetError::UnknownColumn(column.to_string()))?;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .ok_or(DatasetError::RowOutOfRange(row))
    }

    /// Cell rendered as text (numbers keep their natural formatting)
    pub fn text(&self, row: usize, column: &str) -> Result<String, DatasetError> {
        self.cell(row, column).map(ToString::to_string)
    }

    pub fn number(&self, row: usize, column: &str) -> Result<f64, DatasetError> {
        self.cell(row, column)?
            .as_number()
            .ok_or_else(|| DatasetError::NonNumeric {
                column: column.to_string(),
                row,
            })
    }

    pub fn site(&self, row: usize) -> Result<SiteIdentity, DatasetError> {
        Ok(SiteIdentity {
            state: self.text(row, STATE_COLUMN)?,
            county: self.text(row, COUNTY_COLUMN)?,
            plant: self.text(row, PLANT_COLUMN)?,
        })
    }

    /// Indices of every row, in order
    #[must_use]
    pub fn all_rows(&self) -> Vec<usize> {
        (0..self.rows.len()).collect()
    }
}
