//! Configuration handling for csvsource

use std::path::PathBuf;

/// Output format for the scan report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// How a CSV file is read into a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Treat the first line as column names
    pub has_header: bool,
    /// Single field separator character
    pub delimiter: char,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            has_header: false,
            delimiter: ',',
        }
    }
}

impl LoadOptions {
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Configuration for a load-and-scan run
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Path to the CSV file
    pub file: PathBuf,
    /// Load options
    pub load: LoadOptions,
    /// Number of slots; `None` means one per rayon worker thread
    pub slots: Option<usize>,
    /// Columns to summarize; empty means all columns
    pub columns: Vec<String>,
    /// Output format
    pub output_format: OutputFormat,
}

impl Config {
    /// Create a new Config for a file
    pub fn new(file: PathBuf) -> Self {
        Self {
            file,
            ..Default::default()
        }
    }

    pub fn with_load_options(mut self, load: LoadOptions) -> Self {
        self.load = load;
        self
    }

    pub fn with_slots(mut self, slots: usize) -> Self {
        self.slots = Some(slots);
        self
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Slot count to configure, resolving the default.
    ///
    /// An explicit zero is passed through for `configure_slots` to reject.
    pub fn resolved_slots(&self) -> usize {
        self.slots.unwrap_or_else(rayon::current_num_threads)
    }
}
