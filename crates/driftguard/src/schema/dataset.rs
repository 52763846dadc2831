//! Declared dataset schema loaded from YAML.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DriftguardError, Result};

/// One entry of the `columns` list.
///
/// Accepts both a bare name and a single-entry `name: dtype` map:
///
/// ```yaml
/// columns:
///   - case_id: category
///   - no_of_employees
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnEntry {
    Name(String),
    Typed(IndexMap<String, String>),
}

/// The declared contract for a dataset's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSchema {
    /// All columns; only the length is used for validation.
    pub columns: Vec<ColumnEntry>,
    /// Columns holding numeric features.
    pub numerical_columns: Vec<String>,
    /// Columns holding categorical features.
    pub categorical_columns: Vec<String>,
}

impl DatasetSchema {
    /// Build a schema from column names.
    pub fn new(columns: &[&str], numerical_columns: &[&str], categorical_columns: &[&str]) -> Self {
        Self {
            columns: columns
                .iter()
                .map(|c| ColumnEntry::Name(c.to_string()))
                .collect(),
            numerical_columns: owned_names(numerical_columns),
            categorical_columns: owned_names(categorical_columns),
        }
    }

    /// Load a schema file.
    ///
    /// A missing file is an IO fault; a malformed document or a missing
    /// `columns`, `numerical_columns` or `categorical_columns` key is a
    /// configuration fault.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DriftguardError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let schema: DatasetSchema =
            serde_yaml::from_str(&text).map_err(|source| DriftguardError::SchemaParse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            path = %path.display(),
            columns = schema.expected_column_count(),
            numerical = schema.numerical_columns.len(),
            categorical = schema.categorical_columns.len(),
            "Loaded dataset schema"
        );

        Ok(schema)
    }

    /// Number of columns a conforming dataset must have.
    pub fn expected_column_count(&self) -> usize {
        self.columns.len()
    }

    /// Every name a dataset must contain: numerical first, then categorical.
    pub fn required_columns(&self) -> impl Iterator<Item = &str> {
        self.numerical_columns
            .iter()
            .chain(self.categorical_columns.iter())
            .map(|c| c.as_str())
    }

}

fn owned_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
