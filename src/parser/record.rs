//! Converting raw fields into typed records

use tracing::debug;

use crate::error::{DataSourceError, Result};
use crate::model::{Cell, ColumnKind, Record};

/// Builds records against a fixed set of column kinds
#[derive(Debug, Clone)]
pub struct RecordBuilder<'a> {
    names: &'a [String],
    kinds: &'a [ColumnKind],
}

impl<'a> RecordBuilder<'a> {
    /// `names` and `kinds` are in column order and of equal length
    pub fn new(names: &'a [String], kinds: &'a [ColumnKind]) -> Self {
        debug_assert_eq!(names.len(), kinds.len());
        Self { names, kinds }
    }

    /// Convert one row of raw fields read from `line`
    pub fn build<S: AsRef<str>>(&self, fields: &[S], line: usize) -> Result<Record> {
        if fields.len() != self.kinds.len() {
            return Err(DataSourceError::FieldCount {
                line,
                expected: self.kinds.len(),
                found: fields.len(),
            });
        }

        let cells = fields
            .iter()
            .enumerate()
            .map(|(index, field)| self.convert(index, field.as_ref(), line))
            .collect::<Result<Vec<_>>>()?;

        Ok(Record::new(cells, line))
    }

    fn convert(&self, index: usize, raw: &str, line: usize) -> Result<Cell> {
        let kind = self.kinds[index];

        let cell = match kind {
            ColumnKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Cell::Integer)
                .map_err(|_| self.invalid(index, kind, raw, line))?,
            ColumnKind::Double => raw
                .trim()
                .parse::<f64>()
                .map(Cell::Double)
                .map_err(|_| self.invalid(index, kind, raw, line))?,
            ColumnKind::Boolean => Cell::Boolean(parse_bool_or_false(
                raw.trim(),
                &self.names[index],
                line,
            )),
            ColumnKind::String => Cell::String(raw.to_string()),
        };

        Ok(cell)
    }

    fn invalid(&self, index: usize, kind: ColumnKind, raw: &str, line: usize) -> DataSourceError {
        DataSourceError::InvalidValue {
            line,
            column: self.names[index].clone(),
            kind,
            value: raw.to_string(),
        }
    }
}

/// Anything other than `true`/`false` (any case) reads as `false`
fn parse_bool_or_false(text: &str, column: &str, line: usize) -> bool {
    if text.eq_ignore_ascii_case("true") {
        true
    } else if text.eq_ignore_ascii_case("false") {
        false
    } else {
        debug!(line, column, value = text, "non-boolean value read as false");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Col{}", i)).collect()
    }

    #[test]
    fn test_build_typed_record() {
        let names = names(4);
        let kinds = [
            ColumnKind::Integer,
            ColumnKind::Double,
            ColumnKind::Boolean,
            ColumnKind::String,
        ];
        let builder = RecordBuilder::new(&names, &kinds);

        let record = builder.build(&["-3", " 2.5", "TRUE", "hello"], 7).unwrap();
        assert_eq!(
            record.cells,
            vec![
                Cell::Integer(-3),
                Cell::Double(2.5),
                Cell::Boolean(true),
                Cell::String("hello".into())
            ]
        );
        assert_eq!(record.source_line, 7);
    }

    #[test]
    fn test_string_cell_keeps_parsed_quotes() {
        let names = names(1);
        let kinds = [ColumnKind::String];
        let record = RecordBuilder::new(&names, &kinds)
            .build(&["\"hi\""], 2)
            .unwrap();
        assert_eq!(record.cells, vec![Cell::String("\"hi\"".into())]);
    }

    #[test]
    fn test_integer_column_accepts_plain_digits_in_double_column() {
        let names = names(1);
        let kinds = [ColumnKind::Double];
        let record = RecordBuilder::new(&names, &kinds).build(&["2"], 1).unwrap();
        assert_eq!(record.cells, vec![Cell::Double(2.0)]);
    }

    #[test]
    fn test_numeric_failure_is_an_error() {
        let names = vec!["Age".to_string()];
        let kinds = [ColumnKind::Integer];
        let err = RecordBuilder::new(&names, &kinds)
            .build(&["thirty"], 3)
            .unwrap_err();
        match err {
            DataSourceError::InvalidValue {
                line,
                column,
                kind,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Age");
                assert_eq!(kind, ColumnKind::Integer);
                assert_eq!(value, "thirty");
            }
            other => panic!("unexpected error: {other}"),
        }

        let kinds = [ColumnKind::Double];
        assert!(RecordBuilder::new(&names, &kinds).build(&[""], 4).is_err());
    }

    #[test]
    fn test_integer_overflow_is_an_error() {
        let names = names(1);
        let kinds = [ColumnKind::Integer];
        assert!(RecordBuilder::new(&names, &kinds)
            .build(&["99999999999999999999"], 2)
            .is_err());
    }

    #[test]
    fn test_malformed_boolean_defaults_to_false() {
        let names = names(1);
        let kinds = [ColumnKind::Boolean];
        let builder = RecordBuilder::new(&names, &kinds);
        assert_eq!(builder.build(&["yes"], 2).unwrap().cells, vec![Cell::Boolean(false)]);
        assert_eq!(builder.build(&["False"], 3).unwrap().cells, vec![Cell::Boolean(false)]);
        assert_eq!(builder.build(&["tRuE"], 4).unwrap().cells, vec![Cell::Boolean(true)]);
    }

    #[test]
    fn test_string_keeps_whitespace() {
        let names = names(1);
        let kinds = [ColumnKind::String];
        let record = RecordBuilder::new(&names, &kinds).build(&[" a b "], 1).unwrap();
        assert_eq!(record.cells, vec![Cell::String(" a b ".into())]);
    }

    #[test]
    fn test_field_count_mismatch() {
        let names = names(2);
        let kinds = [ColumnKind::Integer, ColumnKind::Integer];
        let err = RecordBuilder::new(&names, &kinds)
            .build(&["1", "2", "3"], 5)
            .unwrap_err();
        assert!(matches!(
            err,
            DataSourceError::FieldCount {
                line: 5,
                expected: 2,
                found: 3
            }
        ));
    }
}
