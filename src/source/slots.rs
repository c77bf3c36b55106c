//! Per-slot, per-column indirection cells

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::model::{Cell, ColumnKind, Record};

const UNSET: usize = usize::MAX;

/// Holds which row a (column, slot) pair currently points at.
///
/// Only the owning slot writes it, so a plain atomic store is enough to
/// retarget it while other slots read and write their own cells.
#[derive(Debug)]
pub struct IndirectionCell {
    row: AtomicUsize,
}

impl IndirectionCell {
    fn new() -> Self {
        Self {
            row: AtomicUsize::new(UNSET),
        }
    }

    /// Currently selected row, `None` before the first retarget
    pub fn row(&self) -> Option<usize> {
        match self.row.load(Ordering::Acquire) {
            UNSET => None,
            row => Some(row),
        }
    }

    fn point_to(&self, row: usize) {
        self.row.store(row, Ordering::Release);
    }
}

/// Matrix of `columns × slots` indirection cells, sized once
#[derive(Debug)]
pub struct SlotAddressTable {
    column_count: usize,
    slot_count: usize,
    // column-major: all slots of column 0, then column 1, ...
    cells: Box<[IndirectionCell]>,
}

impl SlotAddressTable {
    pub fn new(column_count: usize, slot_count: usize) -> Self {
        let cells = (0..column_count * slot_count)
            .map(|_| IndirectionCell::new())
            .collect();
        Self {
            column_count,
            slot_count,
            cells,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Indirection cells of one column, indexed by slot
    pub fn column(&self, column: usize) -> &[IndirectionCell] {
        let start = column * self.slot_count;
        &self.cells[start..start + self.slot_count]
    }

    pub fn cell(&self, column: usize, slot: usize) -> Option<&IndirectionCell> {
        if column < self.column_count && slot < self.slot_count {
            Some(&self.cells[column * self.slot_count + slot])
        } else {
            None
        }
    }

    /// Point every column's cell for `slot` at `row`
    pub fn retarget(&self, slot: usize, row: usize) {
        for column in 0..self.column_count {
            self.cells[column * self.slot_count + slot].point_to(row);
        }
    }
}

/// A slot's view of one column
#[derive(Debug, Clone, Copy)]
pub struct ColumnReader<'a> {
    column: usize,
    slot: usize,
    kind: ColumnKind,
    rows: &'a [Record],
    cursor: &'a IndirectionCell,
}

impl<'a> ColumnReader<'a> {
    pub(crate) fn new(
        column: usize,
        slot: usize,
        kind: ColumnKind,
        rows: &'a [Record],
        cursor: &'a IndirectionCell,
    ) -> Self {
        Self {
            column,
            slot,
            kind,
            rows,
            cursor,
        }
    }

    /// Cell of the row this slot currently points at
    pub fn get(&self) -> Option<&'a Cell> {
        let row = self.cursor.row()?;
        self.rows.get(row).and_then(|record| record.get(self.column))
    }

    pub fn row(&self) -> Option<usize> {
        self.cursor.row()
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// The stable indirection cell behind this reader
    pub fn cursor(&self) -> &'a IndirectionCell {
        self.cursor
    }
}
