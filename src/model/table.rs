//! Table, Record, and Cell data structures

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::{Column, ColumnKind};
use crate::config::LoadOptions;
use crate::error::{DataSourceError, Result};
use crate::parser::CsvLoader;

/// A single typed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Integer(i64),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl Cell {
    /// Kind of the column this cell belongs to
    pub fn kind(&self) -> ColumnKind {
        match self {
            Cell::Integer(_) => ColumnKind::Integer,
            Cell::Double(_) => ColumnKind::Double,
            Cell::Boolean(_) => ColumnKind::Boolean,
            Cell::String(_) => ColumnKind::String,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Cell::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Cell::Double(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value widened to f64, for Integer and Double cells
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(i) => Some(*i as f64),
            Cell::Double(f) => Some(*f),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Integer(i) => write!(f, "{}", i),
            Cell::Double(d) => write!(f, "{}", d),
            Cell::Boolean(b) => write!(f, "{}", b),
            Cell::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Integer(i)
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::Double(f)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Boolean(b)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::String(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::String(s)
    }
}

/// One row of the table
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Cells in column order
    pub cells: Vec<Cell>,
    /// Physical line number in the source file (1-indexed)
    pub source_line: usize,
}

impl Record {
    pub fn new(cells: Vec<Cell>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell by column index
    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Column-oriented in-memory table owning every cell
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    kinds: IndexMap<String, ColumnKind>,
    rows: Vec<Record>,
}

impl Table {
    /// Create an empty table from `(name, kind)` pairs in column order
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, ColumnKind)>,
        S: Into<String>,
    {
        let mut table = Table::default();
        for (name, kind) in columns {
            let name = name.into();
            if table.kinds.insert(name.clone(), kind).is_some() {
                return Err(DataSourceError::DuplicateColumn(name));
            }
            table.headers.push(name);
        }
        Ok(table)
    }

    /// Load a CSV file with the given options
    pub fn load(path: &Path, options: &LoadOptions) -> Result<Self> {
        CsvLoader::new(options.clone()).load(path)
    }

    /// Append a record; its width must match the column count
    pub fn push_record(&mut self, record: Record) -> Result<()> {
        if record.len() != self.column_count() {
            return Err(DataSourceError::FieldCount {
                line: record.source_line,
                expected: self.column_count(),
                found: record.len(),
            });
        }
        debug_assert!(record
            .cells
            .iter()
            .zip(self.kinds.values())
            .all(|(cell, kind)| cell.kind() == *kind));
        self.rows.push(record);
        Ok(())
    }

    /// Column names in file order
    pub fn column_names(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Kind of a column, or `ColumnNotFound`
    pub fn type_name(&self, name: &str) -> Result<ColumnKind> {
        self.kinds
            .get(name)
            .copied()
            .ok_or_else(|| DataSourceError::ColumnNotFound(name.to_string()))
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.kinds.get_index_of(name)
    }

    /// Kind of the column at `index`
    pub fn kind_at(&self, index: usize) -> Option<ColumnKind> {
        self.kinds.get_index(index).map(|(_, kind)| *kind)
    }

    /// Column metadata in order
    pub fn columns(&self) -> Vec<Column> {
        self.kinds
            .iter()
            .enumerate()
            .map(|(index, (name, kind))| Column::new(name.clone(), index, *kind))
            .collect()
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn record(&self, row: usize) -> Option<&Record> {
        self.rows.get(row)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}
