//! Where normalized tables are read from

use crate::error::{GlobefinError, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// One parsed row of a normalized table
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub year: i32,
    /// Values for every non-`Year` column, in header order; empty cells are `None`
    pub values: Vec<Option<f64>>,
}

/// A normalized table as read back from CSV.
///
/// Rows are kept in file order; the reader does not re-sort.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    columns: Vec<String>,
    rows: Vec<TableRow>,
}

impl NormalizedTable {
    /// Parse CSV with a `Year` column followed by numeric columns
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = rdr.headers()?.clone();
        let year_idx = headers
            .iter()
            .position(|h| h.trim() == "Year")
            .ok_or_else(|| GlobefinError::MalformedArtifact("Column 'Year' not found".into()))?;

        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != year_idx)
            .map(|(_, h)| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;

            let year_cell = record.get(year_idx).unwrap_or("").trim();
            let year: i32 = year_cell.parse().map_err(|_| {
                GlobefinError::MalformedArtifact(format!("Invalid year: '{}'", year_cell))
            })?;

            let values = (0..headers.len())
                .filter(|idx| *idx != year_idx)
                .map(|idx| {
                    record
                        .get(idx)
                        .and_then(|cell| cell.trim().parse::<f64>().ok())
                        .filter(|v| v.is_finite())
                })
                .collect();

            rows.push(TableRow { year, values });
        }

        Ok(Self { columns, rows })
    }

    /// Non-`Year` column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index into [`TableRow::values`] for a column
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| GlobefinError::MalformedArtifact(format!("Column '{}' not found", name)))
    }

    /// `(year, value)` for every row where the column has a value
    pub fn column(&self, name: &str) -> Result<Vec<(i32, f64)>> {
        let idx = self.column_index(name)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| row.values.get(idx).copied().flatten().map(|v| (row.year, v)))
            .collect())
    }
}

/// Trait for loading a normalized table.
///
/// Implementations re-read their backing data on every call; nothing is cached.
pub trait TableSource: Send + Sync {
    /// Load the whole table
    fn load(&self) -> Result<NormalizedTable>;

    /// Human-readable location for logs
    fn describe(&self) -> String;
}

/// Table stored as a CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTableSource {
    path: PathBuf,
}

impl FileTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for FileTableSource {
    fn load(&self) -> Result<NormalizedTable> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                log::warn!("CSV file not found at {}", self.path.display());
                GlobefinError::MissingArtifact {
                    path: self.path.clone(),
                }
            }
            _ => GlobefinError::IoError(e),
        })?;

        NormalizedTable::from_reader(io::BufReader::new(file))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Table held as CSV text, for tests and embedding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryTableSource {
    csv: String,
}

impl InMemoryTableSource {
    pub fn new(csv: impl Into<String>) -> Self {
        Self { csv: csv.into() }
    }
}

impl TableSource for InMemoryTableSource {
    fn load(&self) -> Result<NormalizedTable> {
        NormalizedTable::from_reader(self.csv.as_bytes())
    }

    fn describe(&self) -> String {
        format!("<in-memory table, {} bytes>", self.csv.len())
    }
}
