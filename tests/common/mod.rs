//! Common test utilities: a recording grid host and point helpers.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss
)]

use std::cell::Cell;

use gridview::{GridCoordinate, GridHost, GridView, Point, Size, StorageCoordinate};

/// Host with labelled content that records every callback the grid makes.
///
/// Column content follows `order`, so a committed swap is visible in the
/// labels exactly as a real data source would show it.
pub struct RecordingHost {
    pub rows: u32,
    pub columns: u32,
    pub header_row: bool,
    pub header_column: bool,
    pub item_size: Size,
    pub row_header_width: f32,
    pub column_header_height: f32,
    /// `order[c]` is the original column shown at grid column `c`
    pub order: Vec<u32>,
    pub swaps: Vec<(u32, u32)>,
    /// Veto every drop when set
    pub veto_drops: bool,
    pub size_queries: Cell<u32>,
}

impl RecordingHost {
    /// Default metrics: 160x47 items, 200-wide row header, 80-tall column header.
    pub fn new(rows: u32, columns: u32) -> Self {
        Self {
            rows,
            columns,
            header_row: true,
            header_column: true,
            item_size: Size::new(160.0, 47.0),
            row_header_width: 200.0,
            column_header_height: 80.0,
            order: (0..columns).collect(),
            swaps: Vec::new(),
            veto_drops: false,
            size_queries: Cell::new(0),
        }
    }

    pub fn with_headers(mut self, header_row: bool, header_column: bool) -> Self {
        self.header_row = header_row;
        self.header_column = header_column;
        self
    }

    fn original(&self, column: u32) -> u32 {
        self.order[column as usize]
    }
}

impl GridHost for RecordingHost {
    type Cell = String;

    fn number_of_rows(&self) -> u32 {
        self.rows
    }

    fn number_of_columns(&self) -> u32 {
        self.columns
    }

    fn includes_header_row(&self) -> bool {
        self.header_row
    }

    fn includes_header_column(&self) -> bool {
        self.header_column
    }

    fn size_for_cell(&self, _coordinate: GridCoordinate) -> Size {
        self.size_queries.set(self.size_queries.get() + 1);
        self.item_size
    }

    fn row_header_width(&self) -> f32 {
        self.row_header_width
    }

    fn column_header_height(&self) -> f32 {
        self.column_header_height
    }

    fn corner_cell(&self) -> Option<String> {
        Some("corner".to_string())
    }

    fn row_header_cell(&self, row: u32) -> Option<String> {
        Some(format!("R{row}"))
    }

    fn column_header_cell(&self, column: u32) -> Option<String> {
        Some(format!("C{}", self.original(column)))
    }

    fn cell(&self, coordinate: GridCoordinate) -> Option<String> {
        Some(format!("{}:{}", coordinate.row, self.original(coordinate.column)))
    }

    fn on_columns_swapped(&mut self, source: u32, destination: u32) {
        self.order.swap(source as usize, destination as usize);
        self.swaps.push((source, destination));
    }

    fn resolve_drop_target(
        &self,
        origin: StorageCoordinate,
        proposed: StorageCoordinate,
    ) -> StorageCoordinate {
        if self.veto_drops {
            origin
        } else {
            proposed
        }
    }
}

/// Grid over a [`RecordingHost`] with the layout already built
pub fn grid(rows: u32, columns: u32) -> GridView<RecordingHost> {
    let mut grid = GridView::new(RecordingHost::new(rows, columns));
    grid.reload();
    grid
}

/// Center of a storage cell's current frame
pub fn center_of(grid: &GridView<RecordingHost>, row: u32, column: u32) -> Point {
    grid.frame_for(StorageCoordinate::new(row, column))
        .expect("cell in table")
        .center()
}

/// Label shown in a column header slot
pub fn header_label(grid: &GridView<RecordingHost>, storage_column: u32) -> String {
    grid.cell_content(StorageCoordinate::new(0, storage_column))
        .expect("header content")
}
