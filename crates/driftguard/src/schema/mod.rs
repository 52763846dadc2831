//! Declared dataset schema.

mod dataset;

pub use dataset::{ColumnEntry, DatasetSchema};
