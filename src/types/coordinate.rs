use serde::{Deserialize, Serialize};

/// Logical cell address in content space (header bands excluded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub row: u32,
    pub column: u32,
}

impl GridCoordinate {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// Physical cell address in the layout table.
///
/// Row 0 holds the column-header band and column 0 the row-header band when
/// those bands are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StorageCoordinate {
    pub row: u32,
    pub column: u32,
}

impl StorageCoordinate {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

/// Capability tag for a storage cell, resolved from its coordinate and the
/// header flags rather than from whatever view happens to render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRole {
    /// Top-left cell where both header bands meet
    Corner,
    /// Cell in the row-header band (storage column 0)
    RowHeader,
    /// Cell in the column-header band (storage row 0)
    ColumnHeader,
    /// Ordinary content cell
    Regular,
}

impl CellRole {
    /// Stacking priority so header bands render above content scrolled under them.
    pub fn z_index(self) -> i32 {
        match self {
            CellRole::Corner => 1024,
            CellRole::RowHeader | CellRole::ColumnHeader => 1023,
            CellRole::Regular => 0,
        }
    }

    /// Only column headers can be dragged to reorder columns.
    pub fn is_reorderable(self) -> bool {
        matches!(self, CellRole::ColumnHeader)
    }
}
