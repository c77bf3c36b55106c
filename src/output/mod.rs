//! Output formatting for load and scan reports

mod json;
mod terminal;

use std::io::IsTerminal;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::config::OutputFormat;
use crate::model::Column;
use crate::scan::ColumnSummary;
use crate::source::{CsvDataSource, EntryRange};

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Everything printed about one loaded file
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub file: String,
    pub row_count: usize,
    pub slot_count: usize,
    pub columns: Vec<Column>,
    pub ranges: Vec<EntryRange>,
    pub summaries: Vec<ColumnSummary>,
}

impl Report {
    pub fn new(path: &Path, source: &CsvDataSource, summaries: Vec<ColumnSummary>) -> Self {
        Self {
            file: path.display().to_string(),
            row_count: source.table().row_count(),
            slot_count: source.slot_count(),
            columns: source.table().columns(),
            ranges: source.entry_ranges().to_vec(),
            summaries,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a report to a writer
    fn render(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render a report to stdout, coloured only when stdout is a terminal
pub fn render_to_stdout(report: &Report, format: OutputFormat) -> Result<()> {
    let choice = if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let formatter = OutputFactory::create(format);
    let mut stdout = StandardStream::stdout(choice);
    formatter.render(report, &mut stdout)
}
