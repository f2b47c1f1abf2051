//! Callbacks a host application implements to drive a [`GridView`](crate::GridView).
//!
//! All callbacks are synchronous pulls. Sizes and header flags are read once
//! per full layout build and cached until the next [`reload`](crate::GridView::reload).

use crate::types::{
    GridCoordinate, Size, StorageCoordinate, DEFAULT_COLUMN_HEADER_HEIGHT, DEFAULT_ITEM_HEIGHT,
    DEFAULT_ITEM_WIDTH, DEFAULT_ROW_HEADER_WIDTH,
};

/// Data source and sizing delegate for a grid
pub trait GridHost {
    /// Content descriptor handed to the renderer for one cell
    type Cell: Clone;

    /// Number of content rows (header band excluded)
    fn number_of_rows(&self) -> u32;

    /// Number of content columns (header band excluded)
    fn number_of_columns(&self) -> u32;

    /// Whether a column-header band occupies storage row 0
    fn includes_header_row(&self) -> bool {
        false
    }

    /// Whether a row-header band occupies storage column 0
    fn includes_header_column(&self) -> bool {
        false
    }

    /// Size of a regular cell. Queried once per build, at grid coordinate (0, 0).
    fn size_for_cell(&self, _coordinate: GridCoordinate) -> Size {
        Size::new(DEFAULT_ITEM_WIDTH, DEFAULT_ITEM_HEIGHT)
    }

    fn row_header_width(&self) -> f32 {
        DEFAULT_ROW_HEADER_WIDTH
    }

    fn column_header_height(&self) -> f32 {
        DEFAULT_COLUMN_HEADER_HEIGHT
    }

    /// Content of the top-left corner cell (empty by default)
    fn corner_cell(&self) -> Option<Self::Cell> {
        None
    }

    fn row_header_cell(&self, row: u32) -> Option<Self::Cell>;

    fn column_header_cell(&self, column: u32) -> Option<Self::Cell>;

    fn cell(&self, coordinate: GridCoordinate) -> Option<Self::Cell>;

    /// Called once per committed swap, after its visual transaction completes.
    /// Indices are grid (content) column indices.
    fn on_columns_swapped(&mut self, source: u32, destination: u32);

    /// Redirect or veto a proposed drop target. Returning `origin` vetoes the move.
    fn resolve_drop_target(
        &self,
        _origin: StorageCoordinate,
        proposed: StorageCoordinate,
    ) -> StorageCoordinate {
        proposed
    }
}
