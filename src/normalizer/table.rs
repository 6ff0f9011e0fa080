//! Normalized table representation

use serde_json::Value;

/// One normalized row: cleaned column name to typed value.
pub type Row = serde_json::Map<String, Value>;

/// An ordered sequence of rows with a uniform, cleaned schema.
///
/// Row order matches the source file; the merge engine relies on it to
/// keep surviving registration rows in their original relative order.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl NormalizedTable {
    /// Build a table from its final column list and rows.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Final (prefixed) column names, in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether the table carries the named column.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// The rows, in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consume the table, yielding its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
