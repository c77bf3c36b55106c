//! Colored terminal output

use std::io::Write;

use anyhow::Result;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::model::ColumnKind;
use crate::scan::ColumnSummary;

use super::{OutputFormatter, Report};

/// Terminal output with colors
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn write_header(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            writer,
            " csvsource: {} ({} rows, {} slots)",
            report.file, report.row_count, report.slot_count
        )?;
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_heading(&self, title: &str, writer: &mut dyn WriteColor) -> Result<()> {
        writer.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(writer, "{}:", title)?;
        writer.reset()?;
        Ok(())
    }

    fn write_columns(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        if report.columns.is_empty() {
            writeln!(writer, "No columns.")?;
            return Ok(());
        }

        self.write_heading("Columns", writer)?;
        let width = report
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);
        for column in &report.columns {
            write!(writer, "  {:width$}  ", column.name, width = width)?;
            writer.set_color(ColorSpec::new().set_fg(Some(kind_color(column.kind))))?;
            write!(writer, "{}", column.kind)?;
            writer.reset()?;
            writeln!(writer)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_ranges(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        if report.ranges.is_empty() {
            return Ok(());
        }

        self.write_heading("Entry Ranges", writer)?;
        for (slot, range) in report.ranges.iter().enumerate() {
            writeln!(
                writer,
                "  slot {}: [{}, {}) {} rows",
                slot,
                range.start,
                range.end,
                range.len()
            )?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_summaries(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        if report.summaries.is_empty() {
            return Ok(());
        }

        self.write_heading("Summary", writer)?;
        let mut table_data: Vec<Vec<String>> = vec![[
            "column", "kind", "count", "min", "max", "mean", "true", "max len",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect()];
        table_data.extend(report.summaries.iter().map(summary_row));

        write!(writer, "{}", build_table(&table_data))?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        self.write_header(report, writer)?;
        self.write_columns(report, writer)?;
        self.write_ranges(report, writer)?;
        self.write_summaries(report, writer)?;
        Ok(())
    }
}

fn kind_color(kind: ColumnKind) -> Color {
    match kind {
        ColumnKind::Integer => Color::Cyan,
        ColumnKind::Double => Color::Blue,
        ColumnKind::Boolean => Color::Magenta,
        ColumnKind::String => Color::Green,
    }
}

fn summary_row(summary: &ColumnSummary) -> Vec<String> {
    let opt = |v: Option<f64>| v.map(|v| format!("{}", v)).unwrap_or_default();
    vec![
        summary.column.clone(),
        summary.kind.to_string(),
        summary.count.to_string(),
        opt(summary.min),
        opt(summary.max),
        summary.mean().map(|m| format!("{:.3}", m)).unwrap_or_default(),
        summary.true_count.map(|c| c.to_string()).unwrap_or_default(),
        summary.max_len.map(|c| c.to_string()).unwrap_or_default(),
    ]
}

/// Build a formatted table from data; the first row is the header
fn build_table(data: &[Vec<String>]) -> String {
    if data.is_empty() || data[0].is_empty() {
        return String::new();
    }

    let mut col_widths: Vec<usize> = vec![0; data[0].len()];
    for row in data {
        for (width, cell) in col_widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = |left: char, mid: char, right: char| {
        let segments: Vec<String> = col_widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(&mid.to_string()), right)
    };
    let line = |row: &[String]| {
        let mut out = String::from("│");
        for (cell, width) in row.iter().zip(&col_widths) {
            out.push_str(&format!(" {:width$} │", cell, width = width));
        }
        out.push('\n');
        out
    };

    let mut output = border('┌', '┬', '┐');
    output.push_str(&line(&data[0]));
    output.push_str(&border('├', '┼', '┤'));
    for row in &data[1..] {
        output.push_str(&line(row));
    }
    output.push_str(&border('└', '┴', '┘'));

    output
}
