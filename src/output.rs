//! Per-call results of the read and mutation operations.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Rows and column names produced by a read statement.
///
/// `columns` is only filled when at least one row was produced.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryOutput {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value of `column` in row `row`, looked up by column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl IntoIterator for QueryOutput {
    type Item = Vec<Value>;
    type IntoIter = std::vec::IntoIter<Vec<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Execution metadata of a mutation statement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecOutcome {
    /// Rows inserted, updated or deleted by the statement. Zero for DDL and other statements.
    pub affected_rows: usize,
    /// Row id of the inserted row. `None` unless the statement inserted at least one row.
    pub last_insert_rowid: Option<i64>,
}
