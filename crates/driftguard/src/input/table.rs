//! In-memory tabular dataset.

/// A delimited dataset held in memory as strings.
///
/// Every row has exactly one cell per header.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers in file order.
    pub headers: Vec<String>,
    /// Row-major cell values.
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Build a table, padding or truncating each row to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Build a table from string slices.
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by exact, case-sensitive name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// All cells of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map_or("", String::as_str))
    }

    /// Whether a cell holds one of the usual missing-value markers.
    pub fn is_null_value(value: &str) -> bool {
        const NULL_TOKENS: &[&str] = &["na", "n/a", "nan", "null", "none", "nil"];

        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed == "."
            || trimmed == "-"
            || NULL_TOKENS.iter().any(|t| trimmed.eq_ignore_ascii_case(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fits_rows_to_headers() {
        let table = DataTable::from_rows(&["a", "b", "c"], &[&["1", "2"], &["4", "5", "6", "7"]]);

        assert_eq!(table.rows[0], vec!["1", "2", ""]);
        assert_eq!(table.rows[1], vec!["4", "5", "6"]);
    }

    #[test]
    fn test_column_lookup_is_case_sensitive() {
        let table = DataTable::from_rows(&["age", "income"], &[&["30", "50000"]]);

        assert_eq!(table.column_index("income"), Some(1));
        assert!(!table.has_column("Age"));
        assert_eq!(table.column_values(1).collect::<Vec<_>>(), vec!["50000"]);
    }

    #[test]
    fn test_is_null_value() {
        for token in ["", "  ", "NA", "n/a", "NaN", "NULL", "None", ".", "-"] {
            assert!(DataTable::is_null_value(token), "{token:?}");
        }
        assert!(!DataTable::is_null_value("0"));
        assert!(!DataTable::is_null_value("H1B"));
    }
}
