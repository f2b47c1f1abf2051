//! Translation between grid coordinates and storage coordinates.
//!
//! Grid coordinates address content cells only. Storage coordinates address
//! every slot of the layout table, where the column-header band (if any)
//! occupies row 0 and the row-header band (if any) occupies column 0.

use serde::{Deserialize, Serialize};

use crate::types::{CellRole, GridCoordinate, StorageCoordinate};

/// Which header bands are present in the layout table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HeaderFlags {
    /// Storage row 0 is a column-header band
    pub header_row: bool,
    /// Storage column 0 is a row-header band
    pub header_column: bool,
}

impl HeaderFlags {
    pub fn new(header_row: bool, header_column: bool) -> Self {
        Self {
            header_row,
            header_column,
        }
    }

    pub fn row_offset(&self) -> u32 {
        u32::from(self.header_row)
    }

    pub fn column_offset(&self) -> u32 {
        u32::from(self.header_column)
    }

    /// Storage table dimensions for a grid of `rows` x `columns` content cells.
    pub fn storage_dimensions(&self, rows: u32, columns: u32) -> (u32, u32) {
        (
            rows.saturating_add(self.row_offset()),
            columns.saturating_add(self.column_offset()),
        )
    }

    pub fn to_storage(&self, grid: GridCoordinate) -> StorageCoordinate {
        StorageCoordinate::new(self.storage_row(grid.row), self.storage_column(grid.column))
    }

    /// Map a storage coordinate back to content space.
    ///
    /// Returns `None` for cells on a header band, which have no grid coordinate.
    pub fn to_grid(&self, storage: StorageCoordinate) -> Option<GridCoordinate> {
        Some(GridCoordinate::new(
            self.grid_row(storage.row)?,
            self.grid_column(storage.column)?,
        ))
    }

    pub fn storage_row(&self, grid_row: u32) -> u32 {
        grid_row.saturating_add(self.row_offset())
    }

    pub fn storage_column(&self, grid_column: u32) -> u32 {
        grid_column.saturating_add(self.column_offset())
    }

    /// Grid row for a storage row, `None` for the column-header band.
    pub fn grid_row(&self, storage_row: u32) -> Option<u32> {
        storage_row.checked_sub(self.row_offset())
    }

    /// Grid column for a storage column, `None` for the row-header band.
    pub fn grid_column(&self, storage_column: u32) -> Option<u32> {
        storage_column.checked_sub(self.column_offset())
    }

    pub fn is_corner_cell(&self, storage: StorageCoordinate) -> bool {
        self.header_row && self.header_column && storage.row == 0 && storage.column == 0
    }

    pub fn is_column_header_cell(&self, storage: StorageCoordinate) -> bool {
        self.header_row && storage.row == 0 && !self.is_corner_cell(storage)
    }

    pub fn is_row_header_cell(&self, storage: StorageCoordinate) -> bool {
        self.header_column && storage.column == 0 && !self.is_corner_cell(storage)
    }

    /// Resolve the capability tag of a storage cell.
    pub fn role(&self, storage: StorageCoordinate) -> CellRole {
        if self.is_corner_cell(storage) {
            CellRole::Corner
        } else if self.is_column_header_cell(storage) {
            CellRole::ColumnHeader
        } else if self.is_row_header_cell(storage) {
            CellRole::RowHeader
        } else {
            CellRole::Regular
        }
    }
}
