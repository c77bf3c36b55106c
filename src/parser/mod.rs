//! Parser layer: line splitting, kind inference, record building and loading

mod csv;
mod infer;
mod line;
mod record;

pub use self::csv::CsvLoader;
pub use self::infer::TypeInferencer;
pub use self::line::split_line;
pub use self::record::RecordBuilder;
