//! Host-facing data source: slot configuration, entry ranges and cursors
//!
//! The lifecycle is load, then [`CsvDataSource::configure_slots`] once, then
//! any number of [`CsvDataSource::set_entry`] calls. Readers returned by
//! [`CsvDataSource::column_addresses`] borrow the source, so the slot count
//! cannot change while a scan holds them.

mod ranges;
mod slots;

use std::path::Path;

use tracing::debug;

use crate::config::LoadOptions;
use crate::error::{DataSourceError, Result};
use crate::model::{ColumnKind, Table};

pub use ranges::{is_exact_partition, partition, EntryRange};
pub use slots::{ColumnReader, IndirectionCell, SlotAddressTable};

/// A loaded table plus the per-slot state a parallel host needs
#[derive(Debug)]
pub struct CsvDataSource {
    table: Table,
    ranges: Vec<EntryRange>,
    addresses: Option<SlotAddressTable>,
}

impl CsvDataSource {
    /// Load `path` and wrap it
    pub fn open(path: &Path, options: &LoadOptions) -> Result<Self> {
        Table::load(path, options).map(Self::new)
    }

    pub fn new(table: Table) -> Self {
        Self {
            table,
            ranges: Vec::new(),
            addresses: None,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn column_names(&self) -> &[String] {
        self.table.column_names()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.table.has_column(name)
    }

    pub fn type_name(&self, name: &str) -> Result<ColumnKind> {
        self.table.type_name(name)
    }

    /// Ranges computed by `configure_slots`; empty before that
    pub fn entry_ranges(&self) -> &[EntryRange] {
        &self.ranges
    }

    /// Number of configured slots, zero before `configure_slots`
    pub fn slot_count(&self) -> usize {
        self.addresses.as_ref().map_or(0, SlotAddressTable::slot_count)
    }

    /// Allocate the indirection cells and entry ranges for `slot_count` slots.
    ///
    /// May only be called once.
    pub fn configure_slots(&mut self, slot_count: usize) -> Result<()> {
        if let Some(addresses) = &self.addresses {
            return Err(DataSourceError::SlotsAlreadyConfigured(addresses.slot_count()));
        }

        let ranges = partition(self.table.row_count(), slot_count)?;
        debug_assert!(
            is_exact_partition(&ranges, self.table.row_count()),
            "entry ranges must cover every row exactly once"
        );
        debug!(slots = slot_count, ranges = ?ranges, "configured slots");

        self.addresses = Some(SlotAddressTable::new(self.table.column_count(), slot_count));
        self.ranges = ranges;
        Ok(())
    }

    /// Point every column's cursor for `slot` at `row`.
    ///
    /// Different slots may call this concurrently. Calls for the same slot must
    /// come from one thread at a time, and `row` must lie in the slot's range.
    pub fn set_entry(&self, slot: usize, row: usize) -> Result<()> {
        let addresses = self.addresses()?;
        if slot >= addresses.slot_count() {
            return Err(DataSourceError::SlotOutOfRange {
                slot,
                slot_count: addresses.slot_count(),
            });
        }
        if row >= self.table.row_count() {
            return Err(DataSourceError::RowOutOfRange {
                row,
                row_count: self.table.row_count(),
            });
        }
        debug_assert!(
            self.ranges[slot].contains(row),
            "row {} is outside the entry range {:?} of slot {}",
            row,
            self.ranges[slot],
            slot
        );

        addresses.retarget(slot, row);
        Ok(())
    }

    /// One reader per slot for `name`, backed by that slot's stable cursor
    pub fn column_addresses(&self, name: &str) -> Result<Vec<ColumnReader<'_>>> {
        let addresses = self.addresses()?;
        let column = self
            .table
            .column_index(name)
            .ok_or_else(|| DataSourceError::ColumnNotFound(name.to_string()))?;
        let kind = self.table.type_name(name)?;

        Ok(addresses
            .column(column)
            .iter()
            .enumerate()
            .map(|(slot, cursor)| ColumnReader::new(column, slot, kind, self.table.rows(), cursor))
            .collect())
    }

    fn addresses(&self) -> Result<&SlotAddressTable> {
        self.addresses
            .as_ref()
            .ok_or(DataSourceError::SlotsNotConfigured)
    }
}

impl From<Table> for CsvDataSource {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}
