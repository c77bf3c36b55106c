//! csvsource - load a CSV file and scan it in parallel slots

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use csvsource::config::{Config, LoadOptions, OutputFormat};
use csvsource::logging::init_logging;
use csvsource::output::{render_to_stdout, Report};
use csvsource::scan::scan;
use csvsource::CsvDataSource;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Load a CSV file into typed columns and scan it with parallel slots
#[derive(Parser, Debug)]
#[command(name = "csvsource")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file to load
    file: PathBuf,

    /// Treat the first line as column names
    #[arg(long)]
    header: bool,

    /// Field delimiter (a single character)
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Number of parallel slots (defaults to the number of worker threads)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    slots: Option<u32>,

    /// Column(s) to summarize (comma-separated, default: all)
    #[arg(short, long, value_delimiter = ',')]
    column: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let mut config = Config::new(cli.file)
        .with_load_options(
            LoadOptions::default()
                .with_header(cli.header)
                .with_delimiter(cli.delimiter),
        )
        .with_columns(cli.column)
        .with_output_format(cli.format.into());
    if let Some(slots) = cli.slots {
        config = config.with_slots(slots as usize);
    }

    let mut source = CsvDataSource::open(&config.file, &config.load)
        .with_context(|| format!("Failed to load file: {}", config.file.display()))?;
    source
        .configure_slots(config.resolved_slots())
        .context("Failed to configure slots")?;

    let summaries = scan(&source, &config.columns).context("Failed to scan file")?;
    let report = Report::new(&config.file, &source, summaries);

    render_to_stdout(&report, config.output_format)
}
