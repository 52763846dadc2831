//! Structural validation of datasets.

mod structural;

pub use structural::{missing_columns, validate_column_count, validate_column_existence};
