//! Column kind inference from the first data row

use regex::Regex;

use crate::model::ColumnKind;

/// Classifies raw fields into column kinds.
///
/// Patterns are tried in order: signed integer, unsigned decimal, boolean,
/// then string. A negative decimal such as `-2.5` is therefore a string.
#[derive(Debug, Clone)]
pub struct TypeInferencer {
    integer: Regex,
    double: Regex,
    boolean: Regex,
}

impl Default for TypeInferencer {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInferencer {
    pub fn new() -> Self {
        Self {
            integer: Regex::new(r"^-?[0-9]+$").expect("valid integer regex"),
            double: Regex::new(r"^[0-9]+\.?[0-9]*$").expect("valid double regex"),
            boolean: Regex::new(r"(?i)^(true|false)$").expect("valid boolean regex"),
        }
    }

    /// Infer the kind of a single raw field
    pub fn infer(&self, raw: &str) -> ColumnKind {
        let value = raw.trim();

        if self.integer.is_match(value) {
            ColumnKind::Integer
        } else if self.double.is_match(value) {
            ColumnKind::Double
        } else if self.boolean.is_match(value) {
            ColumnKind::Boolean
        } else {
            ColumnKind::String
        }
    }

    /// Infer one kind per field of the sample row
    pub fn infer_row<S: AsRef<str>>(&self, fields: &[S]) -> Vec<ColumnKind> {
        fields.iter().map(|f| self.infer(f.as_ref())).collect()
    }
}
