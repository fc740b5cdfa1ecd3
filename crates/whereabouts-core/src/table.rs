// ── Flat table ──
//
// The flattened dataset: one ordered column set plus the flattened rows.
// Columns are derived once, from the first row, and never re-derived --
// all records are assumed to share the first record's nested shape.

use crate::flatten::FlatRow;
use crate::model::FieldValue;

/// Flattened rows with a fixed, ordered column set.
#[derive(Debug, Clone, Default)]
pub struct FlatTable {
    columns: Vec<String>,
    rows: Vec<FlatRow>,
}

impl FlatTable {
    /// Build a table from flattened rows.
    ///
    /// The column set is the first row's key sequence in first-encounter
    /// order. An empty input yields an empty table with no columns --
    /// a zero-record fetch renders as an empty table, it does not fault.
    pub fn from_rows(rows: Vec<FlatRow>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell value at (row, column name). `None` when the row's shape
    /// lacks the column; renderers show such cells blank.
    pub fn value(&self, row: usize, column: &str) -> Option<&FieldValue> {
        self.rows.get(row)?.get(column)
    }

    /// A row's values concatenated (no separator) and lowercased, the
    /// haystack for substring filtering.
    pub(crate) fn haystack(row: &FlatRow) -> String {
        let mut joined = String::new();
        for value in row.values() {
            joined.push_str(&value.to_string());
        }
        joined.to_lowercase()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::flatten::flatten;

    fn row(json: &str) -> FlatRow {
        flatten(&serde_json::from_str(json).unwrap()).unwrap()
    }

    #[test]
    fn columns_come_from_the_first_row_only() {
        let table = FlatTable::from_rows(vec![
            row(r#"{"city":"Austin","state":"TX"}"#),
            row(r#"{"city":"Lyon","region":"ARA"}"#),
        ]);

        assert_eq!(table.columns(), ["city", "state"]);
        // The second row's extra key is simply never displayed.
        assert_eq!(table.column_index("region"), None);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = FlatTable::from_rows(Vec::new());
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn missing_cells_resolve_to_none() {
        let table = FlatTable::from_rows(vec![
            row(r#"{"city":"Austin","state":"TX"}"#),
            row(r#"{"city":"Lyon"}"#),
        ]);

        assert!(table.value(0, "state").is_some());
        assert!(table.value(1, "state").is_none());
    }

    #[test]
    fn haystack_concatenates_without_separator() {
        let r = row(r#"{"city":"Boston","number":52}"#);
        assert_eq!(FlatTable::haystack(&r), "boston52");
    }
}
