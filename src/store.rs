//! Ordered column store and a config-driven host built on it.
//!
//! The store is the single owner of column order. The grid never reorders it;
//! the host applies committed swaps through [`ColumnStore::swap_columns`].

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::host::GridHost;
use crate::types::{GridConfig, GridCoordinate, Size};

/// Column-major table with one header per column and one per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStore<T> {
    column_headers: Vec<T>,
    row_headers: Vec<T>,
    /// `columns[c][r]`
    columns: Vec<Vec<T>>,
}

impl<T> ColumnStore<T> {
    /// Build a store. Every column must hold one item per row header, and
    /// there must be one column header per column.
    pub fn new(column_headers: Vec<T>, row_headers: Vec<T>, columns: Vec<Vec<T>>) -> Result<Self> {
        if column_headers.len() != columns.len() {
            return Err(GridError::Other(format!(
                "{} column headers for {} columns",
                column_headers.len(),
                columns.len()
            )));
        }
        let expected = row_headers.len();
        if let Some((column, found)) = columns
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(GridError::RaggedColumns {
                column,
                expected,
                found,
            });
        }
        Ok(Self {
            column_headers,
            row_headers,
            columns,
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_headers.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_header(&self, column: usize) -> Option<&T> {
        self.column_headers.get(column)
    }

    pub fn row_header(&self, row: usize) -> Option<&T> {
        self.row_headers.get(row)
    }

    pub fn item(&self, row: usize, column: usize) -> Option<&T> {
        self.columns.get(column)?.get(row)
    }

    pub fn column_headers(&self) -> &[T] {
        &self.column_headers
    }

    /// Swap two columns together with their headers.
    pub fn swap_columns(&mut self, a: usize, b: usize) -> Result<()> {
        let len = self.columns.len();
        for index in [a, b] {
            if index >= len {
                return Err(GridError::ColumnOutOfRange { index, len });
            }
        }
        self.columns.swap(a, b);
        self.column_headers.swap(a, b);
        Ok(())
    }
}

impl ColumnStore<String> {
    /// Labelled sample table: headers `C0..`, `R0..` and items `r:c`.
    pub fn sample(rows: usize, columns: usize) -> Self {
        Self {
            column_headers: (0..columns).map(|c| format!("C{c}")).collect(),
            row_headers: (0..rows).map(|r| format!("R{r}")).collect(),
            columns: (0..columns)
                .map(|c| (0..rows).map(|r| format!("{r}:{c}")).collect())
                .collect(),
        }
    }
}

/// [`GridHost`] answering sizes and flags from a [`GridConfig`] and content
/// from a [`ColumnStore`]. Committed swaps are applied to the store.
#[derive(Debug, Clone)]
pub struct ConfigHost<T> {
    config: GridConfig,
    store: ColumnStore<T>,
}

impl<T> ConfigHost<T> {
    pub fn new(config: GridConfig, store: ColumnStore<T>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn store(&self) -> &ColumnStore<T> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ColumnStore<T> {
        &mut self.store
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl<T: Clone> GridHost for ConfigHost<T> {
    type Cell = T;

    fn number_of_rows(&self) -> u32 {
        count(self.store.row_count())
    }

    fn number_of_columns(&self) -> u32 {
        count(self.store.column_count())
    }

    fn includes_header_row(&self) -> bool {
        self.config.includes_header_row
    }

    fn includes_header_column(&self) -> bool {
        self.config.includes_header_column
    }

    fn size_for_cell(&self, _coordinate: GridCoordinate) -> Size {
        self.config.item_size
    }

    fn row_header_width(&self) -> f32 {
        self.config.row_header_width
    }

    fn column_header_height(&self) -> f32 {
        self.config.column_header_height
    }

    fn row_header_cell(&self, row: u32) -> Option<T> {
        self.store.row_header(row as usize).cloned()
    }

    fn column_header_cell(&self, column: u32) -> Option<T> {
        self.store.column_header(column as usize).cloned()
    }

    fn cell(&self, coordinate: GridCoordinate) -> Option<T> {
        self.store
            .item(coordinate.row as usize, coordinate.column as usize)
            .cloned()
    }

    fn on_columns_swapped(&mut self, source: u32, destination: u32) {
        if let Err(e) = self
            .store
            .swap_columns(source as usize, destination as usize)
        {
            tracing::warn!(source, destination, error = %e, "store.swap_rejected");
        }
    }
}
