//! Splitting the row range into one contiguous chunk per slot

use serde::{Deserialize, Serialize};

use crate::error::{DataSourceError, Result};

/// Half-open row interval `[start, end)` assigned to one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryRange {
    pub start: usize,
    pub end: usize,
}

impl EntryRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, row: usize) -> bool {
        (self.start..self.end).contains(&row)
    }

    /// Iterate over the row indices of this range
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<(usize, usize)> for EntryRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<EntryRange> for (usize, usize) {
    fn from(range: EntryRange) -> Self {
        (range.start, range.end)
    }
}

/// Partition `row_count` rows into `slot_count` contiguous ranges.
///
/// Every range gets `row_count / slot_count` rows and the last one also takes
/// the remainder.
pub fn partition(row_count: usize, slot_count: usize) -> Result<Vec<EntryRange>> {
    if slot_count == 0 {
        return Err(DataSourceError::ZeroSlots);
    }

    let chunk = row_count / slot_count;
    let remainder = if slot_count == 1 {
        0
    } else {
        row_count % slot_count
    };

    let mut ranges: Vec<EntryRange> = (0..slot_count)
        .map(|slot| EntryRange::new(slot * chunk, (slot + 1) * chunk))
        .collect();
    if let Some(last) = ranges.last_mut() {
        last.end += remainder;
    }

    Ok(ranges)
}

/// Whether `ranges` cover `[0, row_count)` exactly once, in order
pub fn is_exact_partition(ranges: &[EntryRange], row_count: usize) -> bool {
    let mut expected_start = 0;
    for range in ranges {
        if range.start != expected_start || range.end < range.start {
            return false;
        }
        expected_start = range.end;
    }
    expected_start == row_count
}
