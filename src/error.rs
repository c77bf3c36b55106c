//! Error types for loading and iterating a CSV data source

use std::path::PathBuf;

use thiserror::Error;

use crate::model::ColumnKind;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, DataSourceError>;

/// Coarse classification of a [`DataSourceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// File could not be opened or read
    Io,
    /// File content does not fit the inferred schema
    Parse,
    /// Unknown column, row or slot
    Lookup,
    /// Slot configuration misuse
    Configuration,
}

/// Errors raised by the data source
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// File could not be opened.
    #[error("failed to open CSV file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be read after opening.
    #[error("failed to read CSV file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A header line was requested but the file is empty.
    #[error("error reading headers of CSV file {path}: file is empty")]
    MissingHeader { path: PathBuf },

    /// A field does not convert to its column's kind.
    #[error("line {line}: cannot parse {value:?} as {kind} for column '{column}'")]
    InvalidValue {
        line: usize,
        column: String,
        kind: ColumnKind,
        value: String,
    },

    /// A row has a different number of fields than the table has columns.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("the dataset does not have column '{0}'")]
    ColumnNotFound(String),

    #[error("row {row} out of range (table has {row_count} rows)")]
    RowOutOfRange { row: usize, row_count: usize },

    #[error("slot {slot} out of range ({slot_count} slots configured)")]
    SlotOutOfRange { slot: usize, slot_count: usize },

    #[error("number of slots must be greater than zero")]
    ZeroSlots,

    #[error("number of slots already set to {0}")]
    SlotsAlreadyConfigured(usize),

    #[error("number of slots has not been set")]
    SlotsNotConfigured,
}

impl DataSourceError {
    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            DataSourceError::Open { .. }
            | DataSourceError::Read { .. }
            | DataSourceError::MissingHeader { .. } => ErrorCategory::Io,
            DataSourceError::InvalidValue { .. }
            | DataSourceError::FieldCount { .. }
            | DataSourceError::DuplicateColumn(_) => ErrorCategory::Parse,
            DataSourceError::ColumnNotFound(_)
            | DataSourceError::RowOutOfRange { .. }
            | DataSourceError::SlotOutOfRange { .. } => ErrorCategory::Lookup,
            DataSourceError::ZeroSlots
            | DataSourceError::SlotsAlreadyConfigured(_)
            | DataSourceError::SlotsNotConfigured => ErrorCategory::Configuration,
        }
    }

    /// True when the error reports a missing column
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataSourceError::ColumnNotFound(_))
    }
}
