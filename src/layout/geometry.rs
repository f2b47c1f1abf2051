//! Per-role cell sizes.

use serde::Serialize;

use crate::coords::HeaderFlags;
use crate::types::{CellRole, GridConfig, Size, StorageCoordinate};

/// Resolved sizes for every cell role, captured once per layout build
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridMetrics {
    /// Regular cell size
    pub item_size: Size,
    /// `{row_header_width, item_size.height}`
    pub row_header_size: Size,
    /// `{item_size.width, column_header_height}`
    pub column_header_size: Size,
    /// Header bands present in the table
    pub flags: HeaderFlags,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

impl GridMetrics {
    /// Derive header sizes from the item size. Negative inputs clamp to zero.
    pub fn new(
        item_size: Size,
        row_header_width: f32,
        column_header_height: f32,
        flags: HeaderFlags,
    ) -> Self {
        let item_size = item_size.clamped();
        Self {
            item_size,
            row_header_size: Size::new(row_header_width, item_size.height).clamped(),
            column_header_size: Size::new(item_size.width, column_header_height).clamped(),
            flags,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(
            config.item_size,
            config.row_header_width,
            config.column_header_height,
            HeaderFlags::new(config.includes_header_row, config.includes_header_column),
        )
    }

    pub fn corner_size(&self) -> Size {
        Size::new(self.row_header_size.width, self.column_header_size.height)
    }

    /// Size for a cell role. Roles only exist for bands that are enabled, so a
    /// lone header band at the origin resolves to that band's size.
    pub fn size_for_role(&self, role: CellRole) -> Size {
        match role {
            CellRole::Corner => self.corner_size(),
            CellRole::ColumnHeader => self.column_header_size,
            CellRole::RowHeader => self.row_header_size,
            CellRole::Regular => self.item_size,
        }
    }

    pub fn size_for(&self, storage: StorageCoordinate) -> Size {
        self.size_for_role(self.flags.role(storage))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn metrics(header_row: bool, header_column: bool) -> GridMetrics {
        GridMetrics::new(
            Size::new(160.0, 47.0),
            200.0,
            80.0,
            HeaderFlags::new(header_row, header_column),
        )
    }

    #[test_case(true, true => Size::new(200.0, 80.0); "both bands")]
    #[test_case(true, false => Size::new(160.0, 80.0); "only header row")]
    #[test_case(false, true => Size::new(200.0, 47.0); "only header column")]
    #[test_case(false, false => Size::new(160.0, 47.0); "no bands")]
    fn test_origin_size(header_row: bool, header_column: bool) -> Size {
        metrics(header_row, header_column).size_for(StorageCoordinate::new(0, 0))
    }

    #[test]
    fn test_band_sizes() {
        let m = metrics(true, true);
        assert_eq!(m.size_for(StorageCoordinate::new(0, 3)), Size::new(160.0, 80.0));
        assert_eq!(m.size_for(StorageCoordinate::new(3, 0)), Size::new(200.0, 47.0));
        assert_eq!(m.size_for(StorageCoordinate::new(3, 3)), Size::new(160.0, 47.0));

        let bare = metrics(false, false);
        assert_eq!(bare.size_for(StorageCoordinate::new(0, 3)), bare.item_size);
        assert_eq!(bare.size_for(StorageCoordinate::new(3, 0)), bare.item_size);
    }

    #[test]
    fn test_negative_sizes_clamp_to_zero() {
        let m = GridMetrics::new(Size::new(-10.0, 20.0), -5.0, 30.0, HeaderFlags::new(true, true));
        assert_eq!(m.item_size, Size::new(0.0, 20.0));
        assert_eq!(m.row_header_size, Size::new(0.0, 20.0));
        assert_eq!(m.column_header_size, Size::new(0.0, 30.0));
    }
}
