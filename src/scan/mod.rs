//! Parallel scan over a configured data source
//!
//! Plays the part of the batch-processing host: one rayon task per slot, each
//! walking its own entry range through `set_entry` and reading the per-slot
//! column readers it was handed up front.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{DataSourceError, Result};
use crate::model::{Cell, ColumnKind};
use crate::source::{ColumnReader, CsvDataSource, EntryRange};

/// Aggregates collected for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub kind: ColumnKind,
    /// Number of rows visited
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub true_count: Option<usize>,
    /// Longest string, in characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_len: Option<usize>,
}

impl ColumnSummary {
    pub fn new(column: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            column: column.into(),
            kind,
            count: 0,
            min: None,
            max: None,
            sum: kind.is_numeric().then_some(0.0),
            true_count: (kind == ColumnKind::Boolean).then_some(0),
            max_len: (kind == ColumnKind::String).then_some(0),
        }
    }

    /// Fold one cell into the summary
    pub fn observe(&mut self, cell: &Cell) {
        self.count += 1;
        match cell {
            Cell::Integer(_) | Cell::Double(_) => {
                let value = cell.as_f64().unwrap_or_default();
                self.min = Some(self.min.map_or(value, |m| m.min(value)));
                self.max = Some(self.max.map_or(value, |m| m.max(value)));
                self.sum = Some(self.sum.unwrap_or_default() + value);
            }
            Cell::Boolean(b) => {
                if *b {
                    self.true_count = Some(self.true_count.unwrap_or_default() + 1);
                }
            }
            Cell::String(s) => {
                let len = s.chars().count();
                self.max_len = Some(self.max_len.unwrap_or_default().max(len));
            }
        }
    }

    /// Combine with the summary of a later slot
    pub fn merge(&mut self, other: &ColumnSummary) {
        debug_assert_eq!(self.column, other.column);
        self.count += other.count;
        self.min = merge_option(self.min, other.min, f64::min);
        self.max = merge_option(self.max, other.max, f64::max);
        self.sum = merge_option(self.sum, other.sum, |a, b| a + b);
        self.true_count = merge_option(self.true_count, other.true_count, |a, b| a + b);
        self.max_len = merge_option(self.max_len, other.max_len, usize::max);
    }

    /// Arithmetic mean of a numeric column
    pub fn mean(&self) -> Option<f64> {
        match (self.sum, self.count) {
            (Some(sum), count) if count > 0 => Some(sum / count as f64),
            _ => None,
        }
    }
}

fn merge_option<T>(a: Option<T>, b: Option<T>, f: impl Fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Summarize `columns` (all columns when empty) using every configured slot
pub fn scan(source: &CsvDataSource, columns: &[String]) -> Result<Vec<ColumnSummary>> {
    let slot_count = source.slot_count();
    if slot_count == 0 {
        return Err(DataSourceError::SlotsNotConfigured);
    }

    let names: Vec<&str> = if columns.is_empty() {
        source.column_names().iter().map(String::as_str).collect()
    } else {
        columns.iter().map(String::as_str).collect()
    };
    let kinds = names
        .iter()
        .map(|name| source.type_name(name))
        .collect::<Result<Vec<_>>>()?;
    let readers = names
        .iter()
        .map(|name| source.column_addresses(name))
        .collect::<Result<Vec<_>>>()?;
    let ranges = source.entry_ranges();

    debug!(slots = slot_count, columns = ?names, "scanning");

    let partials = (0..slot_count)
        .into_par_iter()
        .map(|slot| scan_slot(source, slot, ranges[slot], &readers, &names, &kinds))
        .collect::<Vec<_>>();

    let mut totals: Vec<ColumnSummary> = names
        .iter()
        .zip(&kinds)
        .map(|(name, kind)| ColumnSummary::new(*name, *kind))
        .collect();
    for partial in partials {
        for (total, summary) in totals.iter_mut().zip(partial?) {
            total.merge(&summary);
        }
    }

    Ok(totals)
}

fn scan_slot(
    source: &CsvDataSource,
    slot: usize,
    range: EntryRange,
    readers: &[Vec<ColumnReader<'_>>],
    names: &[&str],
    kinds: &[ColumnKind],
) -> Result<Vec<ColumnSummary>> {
    trace!(slot, start = range.start, end = range.end, "scanning slot");

    let mut summaries: Vec<ColumnSummary> = names
        .iter()
        .zip(kinds)
        .map(|(name, kind)| ColumnSummary::new(*name, *kind))
        .collect();

    for row in range.rows() {
        source.set_entry(slot, row)?;
        for (summary, column) in summaries.iter_mut().zip(readers) {
            if let Some(cell) = column[slot].get() {
                summary.observe(cell);
            }
        }
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadOptions;
    use crate::parser::CsvLoader;
    use std::path::Path;

    fn source(text: &str, slots: usize) -> CsvDataSource {
        let table = CsvLoader::new(LoadOptions::default().with_header(true))
            .read(text.as_bytes(), Path::new("scan.csv"))
            .unwrap();
        let mut source = CsvDataSource::new(table);
        source.configure_slots(slots).unwrap();
        source
    }

    #[test]
    fn test_scan_all_columns() {
        let source = source(
            "n,x,flag,name\n1,0.5,true,a\n2,1.5,false,bbb\n3,2.5,true,cc\n4,3.5,true,d\n5,4.5,false,e\n",
            2,
        );
        let summaries = scan(&source, &[]).unwrap();
        assert_eq!(summaries.len(), 4);

        let n = &summaries[0];
        assert_eq!(n.count, 5);
        assert_eq!(n.min, Some(1.0));
        assert_eq!(n.max, Some(5.0));
        assert_eq!(n.sum, Some(15.0));
        assert_eq!(n.mean(), Some(3.0));

        assert_eq!(summaries[1].sum, Some(12.5));
        assert_eq!(summaries[2].true_count, Some(3));
        assert_eq!(summaries[3].max_len, Some(3));
        assert_eq!(summaries[3].min, None);
    }

    #[test]
    fn test_result_independent_of_slot_count() {
        let mut text = String::from("v\n");
        for i in 0..97 {
            text.push_str(&format!("{}\n", i));
        }
        let one = scan(&source(&text, 1), &[]).unwrap();
        let many = scan(&source(&text, 8), &[]).unwrap();
        assert_eq!(one, many);
        assert_eq!(one[0].count, 97);
        assert_eq!(one[0].sum, Some((0..97).sum::<i32>() as f64));
    }

    #[test]
    fn test_selected_columns_and_errors() {
        let source = source("a,b\n1,x\n2,y\n", 2);
        let summaries = scan(&source, &["b".to_string()]).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].kind, ColumnKind::String);

        let err = scan(&source, &["missing".to_string()]).unwrap_err();
        assert!(err.is_not_found());

        let unconfigured = CsvDataSource::new(source.table().clone());
        assert!(matches!(
            scan(&unconfigured, &[]),
            Err(DataSourceError::SlotsNotConfigured)
        ));
    }

    #[test]
    fn test_more_slots_than_rows() {
        let source = source("a\n1\n2\n", 4);
        let summaries = scan(&source, &[]).unwrap();
        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[0].max, Some(2.0));
    }
}
