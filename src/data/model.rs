use std::collections::BTreeSet;
use std::fmt;

use super::error::{ReconcileError, Result};
use super::{BARCODE_COLUMN, STATUS_COLUMN};

// ---------------------------------------------------------------------------
// Cell – a single field of a delimited file
// ---------------------------------------------------------------------------

/// One field of a loaded table.
///
/// Fields are never type-guessed: a barcode such as `"00042"` must keep its
/// leading zeros, so anything that is not empty stays verbatim text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cell {
    /// Empty field in the source file.
    Missing,
    Text(String),
}

impl Cell {
    /// Build a cell from a raw field. Empty fields become [`Cell::Missing`].
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(field.to_string())
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

/// Missing cells render as an empty field, which is also how they are exported.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Missing => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – header plus rows, in file order
// ---------------------------------------------------------------------------

/// A loaded delimited file: unique column names and rows in input order.
///
/// Every row has exactly `columns.len()` cells; [`Table::new`] is the only
/// constructor and the loader guarantees the shape before calling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Table { columns, rows }
    }

    /// A table with the given header and no rows.
    pub fn empty(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Resolve a column name to its index, or fail with a schema error naming it.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ReconcileError::schema(name))
    }

    /// Required columns of `source` that this table lacks, in declaration order.
    pub fn missing_required(&self, source: Source) -> Vec<&'static str> {
        source
            .required_columns()
            .iter()
            .copied()
            .filter(|name| self.column_index(name).is_none())
            .collect()
    }

    /// Iterate over one column's cells, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Sorted distinct non-missing values of a column.
    pub fn distinct_values(&self, name: &str) -> Result<BTreeSet<String>> {
        let idx = self.require_column(name)?;
        Ok(self
            .column(idx)
            .filter_map(Cell::as_str)
            .map(str::to_string)
            .collect())
    }

    /// New table with the same header and only the rows for which `keep` is true.
    pub fn retain_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[Cell]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| keep(row.as_slice()))
            .cloned()
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// New table with one column's cells rewritten by `f`.
    pub fn map_column<F>(&self, idx: usize, mut f: F) -> Table
    where
        F: FnMut(&Cell) -> Cell,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                let cell = f(&row[idx]);
                row[idx] = cell;
                row
            })
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Source – which of the two inputs a file is
// ---------------------------------------------------------------------------

/// The two inputs of a comparison and their fixed file conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Library-system export (Horizon), tab-separated.
    Export,
    /// Inventory wand scan, comma-separated.
    Scanned,
}

impl Source {
    pub fn label(self) -> &'static str {
        match self {
            Source::Export => "export",
            Source::Scanned => "scanned",
        }
    }

    pub fn delimiter(self) -> u8 {
        match self {
            Source::Export => b'\t',
            Source::Scanned => b',',
        }
    }

    /// File extensions offered in the open dialog. Content is never checked against these.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Source::Export => &["txt", "tsv"],
            Source::Scanned => &["csv", "txt"],
        }
    }

    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Source::Export => &[BARCODE_COLUMN, STATUS_COLUMN],
            Source::Scanned => &[BARCODE_COLUMN],
        }
    }

    pub fn dialog_title(self) -> &'static str {
        match self {
            Source::Export => "Open Horizon export file (TSV)",
            Source::Scanned => "Open scanned inventory file (CSV)",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
