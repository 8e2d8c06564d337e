use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::CellValue;
use crate::error::{PlotError, PlotResult};

/// Parsed tabular source addressable by name.
///
/// Columns keep header order. Columns are allowed to be ragged: a row that is
/// shorter than the longest column reads as `Null` in the missing cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    name: String,
    columns: IndexMap<String, Vec<CellValue>>,
}

impl Dataset {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
        }
    }

    /// Builds a dataset from `(column name, values)` pairs.
    ///
    /// A repeated column name replaces the earlier values but keeps the
    /// earlier column slot.
    #[must_use]
    pub fn from_columns<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<CellValue>)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns
                .into_iter()
                .map(|(column, values)| (column.into(), values))
                .collect(),
        }
    }

    /// Transposes header + rows into column-major storage.
    ///
    /// Cells past the header width are dropped, short rows leave their
    /// remaining columns shorter.
    #[must_use]
    pub fn from_rows(
        name: impl Into<String>,
        header: Vec<String>,
        rows: impl IntoIterator<Item = Vec<CellValue>>,
    ) -> Self {
        let mut columns: IndexMap<String, Vec<CellValue>> = header
            .into_iter()
            .map(|column| (column, Vec::new()))
            .collect();
        for row in rows {
            for (cell, values) in row.into_iter().zip(columns.values_mut()) {
                values.push(cell);
            }
        }
        Self {
            name: name.into(),
            columns,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a copy under another name, used when a load ticket decides the key.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn first_column(&self) -> Option<&str> {
        self.columns.keys().next().map(String::as_str)
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn column(&self, column: &str) -> PlotResult<&[CellValue]> {
        self.columns
            .get(column)
            .map(Vec::as_slice)
            .ok_or_else(|| PlotError::ColumnNotFound {
                dataset: self.name.clone(),
                column: column.to_owned(),
            })
    }

    /// Length of the longest column.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }
}
