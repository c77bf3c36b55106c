//! Column metadata and type information

use serde::{Deserialize, Serialize};

/// Scalar kind of a column, fixed from the first data row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Double,
    Boolean,
    String,
}

impl ColumnKind {
    /// Whether values of this kind take part in numeric summaries
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Double)
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Integer => write!(f, "integer"),
            ColumnKind::Double => write!(f, "double"),
            ColumnKind::Boolean => write!(f, "boolean"),
            ColumnKind::String => write!(f, "string"),
        }
    }
}

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (from header, or `Col{index}`)
    pub name: String,
    /// Column index (0-based position)
    pub index: usize,
    /// Kind inferred from the first data row
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, index: usize, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            index,
            kind,
        }
    }

    /// Synthetic name used when the file has no header line
    pub fn generated_name(index: usize) -> String {
        format!("Col{}", index)
    }
}
