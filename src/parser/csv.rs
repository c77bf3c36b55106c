//! CSV file loader

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tracing::{debug, info};

use super::infer::TypeInferencer;
use super::line::split_line;
use super::record::RecordBuilder;
use crate::config::LoadOptions;
use crate::error::{DataSourceError, Result};
use crate::model::{Column, ColumnKind, Table};

/// Loads a delimited text file fully into a [`Table`]
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    options: LoadOptions,
    inferencer: TypeInferencer,
}

impl CsvLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            inferencer: TypeInferencer::new(),
        }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Open and load a file
    pub fn load(&self, path: &Path) -> Result<Table> {
        info!(path = %path.display(), "loading CSV file");

        let file = File::open(path).map_err(|source| DataSourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let table = self.read(BufReader::new(file), path)?;

        info!(
            path = %path.display(),
            columns = table.column_count(),
            rows = table.row_count(),
            "loaded CSV file"
        );
        Ok(table)
    }

    /// Load from any buffered reader; `path` only labels errors
    pub fn read<R: BufRead>(&self, reader: R, path: &Path) -> Result<Table> {
        let delimiter = self.options.delimiter;
        let mut lines = DataLines::new(reader, path);

        // The header is the first physical line even when it is blank
        let headers = if self.options.has_header {
            match lines.next_physical() {
                Some(line) => Some(split_line(&line?.1, delimiter)),
                None => {
                    return Err(DataSourceError::MissingHeader {
                        path: path.to_path_buf(),
                    })
                }
            }
        } else {
            None
        };

        // The first data row fixes the kind of every column
        let Some((line_number, line)) = lines.next().transpose()? else {
            let names = headers.unwrap_or_default();
            return Table::new(names.into_iter().map(|name| (name, ColumnKind::String)));
        };
        let fields = split_line(&line, delimiter);
        let kinds = self.inferencer.infer_row(&fields);

        let names = match headers {
            Some(names) if names.len() != kinds.len() => {
                return Err(DataSourceError::FieldCount {
                    line: line_number,
                    expected: names.len(),
                    found: kinds.len(),
                })
            }
            Some(names) => names,
            None => (0..kinds.len()).map(Column::generated_name).collect(),
        };
        debug!(columns = ?names, kinds = ?kinds, "inferred column kinds");

        let mut table = Table::new(names.iter().cloned().zip(kinds.iter().copied()))?;
        let builder = RecordBuilder::new(&names, &kinds);
        table.push_record(builder.build(&fields, line_number)?)?;

        for line in lines {
            let (line_number, line) = line?;
            let fields = split_line(&line, delimiter);
            table.push_record(builder.build(&fields, line_number)?)?;
        }

        Ok(table)
    }
}

/// Non-blank physical lines with their 1-based line numbers.
///
/// `next_physical` reads one line without skipping blanks.
struct DataLines<'p, R> {
    inner: Lines<R>,
    line_number: usize,
    path: &'p Path,
}

impl<'p, R: BufRead> DataLines<'p, R> {
    fn new(reader: R, path: &'p Path) -> Self {
        Self {
            inner: reader.lines(),
            line_number: 0,
            path,
        }
    }

    /// The next physical line, blank or not, without its trailing `\r`
    fn next_physical(&mut self) -> Option<Result<(usize, String)>> {
        let line = self.inner.next()?;
        self.line_number += 1;

        let mut line = match line {
            Ok(line) => line,
            Err(source) => {
                return Some(Err(DataSourceError::Read {
                    path: self.path.to_path_buf(),
                    source,
                }))
            }
        };
        if line.ends_with('\r') {
            line.pop();
        }
        Some(Ok((self.line_number, line)))
    }
}

impl<R: BufRead> Iterator for DataLines<'_, R> {
    type Item = Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.next_physical()? {
                Ok((line_number, line)) if line.is_empty() => {
                    debug!(line = line_number, "skipping blank line");
                }
                item => return Some(item),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorCategory;
    use crate::model::Cell;

    fn read(text: &str, options: LoadOptions) -> Result<Table> {
        CsvLoader::new(options).read(text.as_bytes(), Path::new("test.csv"))
    }

    fn with_header() -> LoadOptions {
        LoadOptions::default().with_header(true)
    }

    #[test]
    fn test_header_and_rows() {
        let table = read("Name,Age\nAlice,30\nBob,25\n", with_header()).unwrap();
        assert_eq!(table.column_names(), ["Name", "Age"]);
        assert_eq!(table.type_name("Name").unwrap(), ColumnKind::String);
        assert_eq!(table.type_name("Age").unwrap(), ColumnKind::Integer);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, 0), Some(&Cell::String("Alice".into())));
        assert_eq!(table.cell(1, 1), Some(&Cell::Integer(25)));
        assert_eq!(table.record(1).unwrap().source_line, 3);
    }

    #[test]
    fn test_generated_headers() {
        let table = read("1,2.5,true\n2,3.5,false\n", LoadOptions::default()).unwrap();
        assert_eq!(table.column_names(), ["Col0", "Col1", "Col2"]);
        assert_eq!(table.type_name("Col1").unwrap(), ColumnKind::Double);
        assert_eq!(table.type_name("Col2").unwrap(), ColumnKind::Boolean);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_kinds_fixed_from_first_row() {
        // Second row looks like a different type but the column stays a string
        let table = read("a,b\nx,1\n3,2\n", with_header()).unwrap();
        assert_eq!(table.type_name("a").unwrap(), ColumnKind::String);
        assert_eq!(table.cell(1, 0), Some(&Cell::String("3".into())));
        assert_eq!(table.type_name("b").unwrap(), ColumnKind::Integer);
    }

    #[test]
    fn test_later_row_fails_numeric_conversion() {
        let err = read("a\n1\nnope\n", with_header()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert!(matches!(err, DataSourceError::InvalidValue { line: 3, .. }));
    }

    #[test]
    fn test_quoted_fields() {
        let table = read(
            "id,text\n1,\"hello, world\"\n2,\"he said \"\"hi\"\"\"\n",
            with_header(),
        )
        .unwrap();
        assert_eq!(table.cell(0, 1), Some(&Cell::String("hello, world".into())));
        assert_eq!(table.cell(1, 1), Some(&Cell::String("he said \"hi\"".into())));
    }

    #[test]
    fn test_quoted_field_with_escaped_edge_quotes() {
        let table = read("id,text\n1,\"\"\"hi\"\"\"\n", with_header()).unwrap();
        assert_eq!(table.type_name("text").unwrap(), ColumnKind::String);
        assert_eq!(table.cell(0, 1), Some(&Cell::String("\"hi\"".into())));
    }

    #[test]
    fn test_blank_first_line_is_the_header() {
        let err = read("\na,b\n1,2\n", with_header()).unwrap_err();
        assert!(matches!(
            err,
            DataSourceError::FieldCount {
                line: 2,
                expected: 1,
                found: 2
            }
        ));

        let table = read("\n7\n\n8\n", with_header()).unwrap();
        assert_eq!(table.column_names(), [""]);
        assert_eq!(table.type_name("").unwrap(), ColumnKind::Integer);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.record(1).unwrap().source_line, 4);
    }

    #[test]
    fn test_custom_delimiter_and_crlf() {
        let table = read("x;y\r\n1;2.5\r\n\r\n3;4\r\n", with_header().with_delimiter(';')).unwrap();
        assert_eq!(table.column_names(), ["x", "y"]);
        assert_eq!(table.type_name("y").unwrap(), ColumnKind::Double);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, 1), Some(&Cell::Double(4.0)));
        assert_eq!(table.record(1).unwrap().source_line, 4);
    }

    #[test]
    fn test_missing_header() {
        let err = read("", with_header()).unwrap_err();
        assert!(matches!(err, DataSourceError::MissingHeader { .. }));
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn test_header_without_rows() {
        let table = read("a,b\n", with_header()).unwrap();
        assert_eq!(table.column_names(), ["a", "b"]);
        assert_eq!(table.type_name("a").unwrap(), ColumnKind::String);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_empty_file_without_header() {
        let table = read("", LoadOptions::default()).unwrap();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = read("a,b\n1,2\n3\n", with_header()).unwrap_err();
        assert!(matches!(
            err,
            DataSourceError::FieldCount {
                line: 3,
                expected: 2,
                found: 1
            }
        ));

        let err = read("a,b\n1,2,3\n", with_header()).unwrap_err();
        assert!(matches!(err, DataSourceError::FieldCount { line: 2, .. }));
    }

    #[test]
    fn test_duplicate_header() {
        let err = read("a,a\n1,2\n", with_header()).unwrap_err();
        assert!(matches!(err, DataSourceError::DuplicateColumn(_)));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "A,B").unwrap();
        writeln!(file, "1,2.0").unwrap();
        writeln!(file, "3,4.5").unwrap();

        let table = CsvLoader::new(with_header()).load(file.path()).unwrap();
        assert_eq!(table.type_name("B").unwrap(), ColumnKind::Double);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvLoader::default()
            .load(&dir.path().join("missing.csv"))
            .unwrap_err();
        assert!(matches!(err, DataSourceError::Open { .. }));
        assert_eq!(err.category(), ErrorCategory::Io);
    }
}
