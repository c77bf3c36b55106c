//! Data model for the in-memory typed table

mod schema;
mod table;

pub use schema::{Column, ColumnKind};
pub use table::{Cell, Record, Table};
