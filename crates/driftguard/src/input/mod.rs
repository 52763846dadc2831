//! Dataset reading.

mod reader;
mod table;

pub use reader::{Dataset, DatasetFingerprint, Delimiter, read_dataset};
pub use table::DataTable;
