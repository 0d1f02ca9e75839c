//! Ordered column list backing the persisted header row.

use crate::row::Row;
use indexmap::IndexSet;

/// The declared, ordered set of columns of a table.
///
/// Serialization writes exactly these columns in this order, whatever
/// keys individual rows carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: IndexSet<String>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered union of all rows' keys, by first appearance.
    #[must_use]
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let mut schema = Schema::new();
        for row in rows {
            schema.extend_from(row);
        }
        schema
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Append a column if it is not already present. Returns `true` if added.
    pub fn push(&mut self, column: &str) -> bool {
        if self.columns.contains(column) {
            return false;
        }
        self.columns.insert(column.to_string())
    }

    /// Append every key of `row` not yet known.
    pub fn extend_from(&mut self, row: &Row) {
        for column in row.keys() {
            self.push(column);
        }
    }

    /// Drop a column, keeping the order of the rest. Returns `true` if removed.
    pub fn remove(&mut self, column: &str) -> bool {
        self.columns.shift_remove(column)
    }
}
