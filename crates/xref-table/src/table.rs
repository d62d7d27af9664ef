//! The in-memory table model.

use std::collections::HashSet;

use serde::Serialize;

use crate::TableError;

/// A named column of text cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Column name (header).
    pub name: String,
    /// Cell values, one per row.
    pub cells: Vec<String>,
}

impl Column {
    /// Creates a column from a name and its cells.
    pub fn new(name: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }
}

/// An ordered set of equally long named columns.
///
/// Rows are identified by their 0-based index, which stays stable for the lifetime of the
/// table. Filtering never mutates a table; [`Table::select_rows`] copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Columns in display order.
    columns: Vec<Column>,
    /// Number of rows (length of every column).
    row_count: usize,
}

impl Table {
    /// Builds a table, checking that columns have equal lengths and distinct names.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let row_count = columns.first().map_or(0, |c| c.cells.len());
        let mut seen = HashSet::new();
        for column in &columns {
            if column.cells.len() != row_count {
                return Err(TableError::RaggedColumns {
                    column: column.name.clone(),
                    expected: row_count,
                    found: column.cells.len(),
                });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self { columns, row_count })
    }

    /// Builds a table from a header row and data rows.
    ///
    /// Short rows are padded with empty cells; cells beyond the header are dropped.
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Result<Self, TableError>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|h| Column::new(h, Vec::new()))
            .collect();

        for row in rows {
            let mut cells = row.into_iter().map(Into::into);
            for column in &mut columns {
                column.cells.push(cells.next().unwrap_or_default());
            }
        }

        Self::new(columns)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns the column at `index`.
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Returns one cell, or `None` if out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.columns
            .get(column)
            .and_then(|c| c.cells.get(row))
            .map(String::as_str)
    }

    /// Returns the cells of one row in column order.
    pub fn row(&self, row: usize) -> Option<Vec<&str>> {
        (row < self.row_count).then(|| {
            self.columns
                .iter()
                .map(|c| c.cells[row].as_str())
                .collect()
        })
    }

    /// Iterates over all rows.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> {
        (0..self.row_count).filter_map(|i| self.row(i))
    }

    /// Copies the given rows, in the given order, into a new table.
    ///
    /// Indices out of range are skipped.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        let rows: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&r| r < self.row_count)
            .collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), rows.iter().map(|&r| c.cells[r].clone()).collect()))
            .collect();
        Self {
            columns,
            row_count: rows.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            ["name", "desc"],
            [
                vec!["router", "Cisco Router 16 ports"],
                vec!["switch", "Managed Switch"],
                vec!["cable", "Cable"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn from_rows_builds_columns() {
        let t = sample();
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.column_names().collect::<Vec<_>>(), vec!["name", "desc"]);
        assert_eq!(t.cell(1, 1), Some("Managed Switch"));
        assert_eq!(t.row(2), Some(vec!["cable", "Cable"]));
        assert_eq!(t.row(3), None);
    }

    #[test]
    fn short_rows_are_padded() {
        let t = Table::from_rows(["a", "b"], [vec!["1"], vec!["2", "3", "4"]]).unwrap();
        assert_eq!(t.row(0), Some(vec!["1", ""]));
        assert_eq!(t.row(1), Some(vec!["2", "3"]));
    }

    #[test]
    fn ragged_columns_rejected() {
        let err = Table::new(vec![
            Column::new("a", vec!["1".into(), "2".into()]),
            Column::new("b", vec!["1".into()]),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            TableError::RaggedColumns {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_columns_rejected() {
        let err = Table::new(vec![Column::new("a", vec![]), Column::new("a", vec![])]).unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn select_rows_copies_in_order() {
        let t = sample();
        let picked = t.select_rows(&[2, 0, 9]);
        assert_eq!(picked.row_count(), 2);
        assert_eq!(picked.cell(0, 0), Some("cable"));
        assert_eq!(picked.cell(1, 0), Some("router"));
        // Source is untouched.
        assert_eq!(t.row_count(), 3);
    }
}
