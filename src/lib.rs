//! csvsource - in-memory typed CSV data source
//!
//! Loads a delimited text file into a typed table, infers one kind per column
//! from the first data row, and exposes per-slot cursors and entry ranges so a
//! parallel host can scan disjoint row chunks without locks.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;
pub mod scan;
pub mod source;

pub use config::{Config, LoadOptions};
pub use error::{DataSourceError, ErrorCategory, Result};
pub use model::{Cell, ColumnKind, Record, Table};
pub use source::{ColumnReader, CsvDataSource, EntryRange};
