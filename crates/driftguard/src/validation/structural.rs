//! Shape checks of a dataset against its declared schema.
//!
//! These are cheap predicates run before any statistical work. A failed
//! check is a normal outcome and is reported as `false`, never as an error.

use crate::input::DataTable;
use crate::schema::DatasetSchema;

/// Check that the dataset has exactly as many columns as the schema declares.
///
/// Only the counts are compared; names are not consulted.
pub fn validate_column_count(table: &DataTable, schema: &DatasetSchema) -> bool {
    let expected = schema.expected_column_count();
    let actual = table.column_count();
    let status = expected == actual;

    tracing::info!(expected, actual, "Column count validation: {}", status);
    status
}

/// Every numerical or categorical column the dataset lacks, in declared order.
pub fn missing_columns(table: &DataTable, schema: &DatasetSchema) -> Vec<String> {
    schema
        .required_columns()
        .filter(|name| !table.has_column(name))
        .map(|name| name.to_string())
        .collect()
}

/// Check that every numerical and categorical column is present.
///
/// All missing names are collected and logged, not just the first one.
pub fn validate_column_existence(table: &DataTable, schema: &DatasetSchema) -> bool {
    let missing = missing_columns(table, schema);
    if missing.is_empty() {
        return true;
    }

    tracing::error!("Missing columns: {:?}", missing);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> DatasetSchema {
        DatasetSchema::new(
            &["age", "income", "visa_type"],
            &["age", "income"],
            &["visa_type"],
        )
    }

    #[test]
    fn test_column_count_exact_match() {
        let table = DataTable::from_rows(&["age", "income", "visa_type"], &[]);
        assert!(validate_column_count(&table, &schema()));
    }

    #[test]
    fn test_column_count_extra_column() {
        let table = DataTable::from_rows(&["age", "income", "visa_type", "extra"], &[]);
        assert!(!validate_column_count(&table, &schema()));
        assert!(validate_column_existence(&table, &schema()));
    }

    #[test]
    fn test_column_count_ignores_names() {
        let table = DataTable::from_rows(&["x", "y", "z"], &[]);
        assert!(validate_column_count(&table, &schema()));
        assert!(!validate_column_existence(&table, &schema()));
    }

    #[test]
    fn test_missing_columns_lists_every_name() {
        let table = DataTable::from_rows(&["income"], &[]);
        assert_eq!(missing_columns(&table, &schema()), vec!["age", "visa_type"]);
        assert!(!validate_column_existence(&table, &schema()));
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let table = DataTable::from_rows(&["Age", "income", "visa_type"], &[]);
        assert_eq!(missing_columns(&table, &schema()), vec!["age"]);
    }
}
