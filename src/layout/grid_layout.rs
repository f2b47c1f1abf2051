//! Pre-computed layout table for a grid.
//!
//! The table holds one frame per storage cell, in row-major order. It is built
//! once per structural change; scrolling only re-pins the header bands, which
//! touches row 0 and column 0 and nothing else.

use serde::Serialize;

use super::GridMetrics;
use crate::coords::HeaderFlags;
use crate::host::GridHost;
use crate::types::{CellRole, Frame, GridCoordinate, Point, Size, StorageCoordinate};

/// Layout attributes of one storage cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellAttributes {
    pub coordinate: StorageCoordinate,
    pub role: CellRole,
    pub frame: Frame,
    /// Stacking priority; headers draw above content
    pub z_index: i32,
}

/// Frames for every storage cell plus the content size
#[derive(Debug, Clone)]
pub struct GridLayout {
    rows: u32,
    columns: u32,
    metrics: GridMetrics,
    cells: Vec<CellAttributes>,
    /// Unpinned top edge of each row, plus the final bottom edge
    row_positions: Vec<f32>,
    /// Unpinned left edge of each column, plus the final right edge
    col_positions: Vec<f32>,
    content_size: Size,
    pinned_offset: Point,
}

/// Serializable view of a layout table
#[derive(Debug, Serialize)]
pub struct LayoutSnapshot<'a> {
    pub rows: u32,
    pub columns: u32,
    pub flags: HeaderFlags,
    pub content_size: Size,
    pub cells: &'a [CellAttributes],
}

impl GridLayout {
    /// Lay out a `rows` x `columns` storage table (header bands included).
    ///
    /// Cells are placed left to right, rows top to bottom; frames are snapped
    /// to whole pixels. Header bands are not pinned here, see [`Self::repin`].
    pub fn new(rows: u32, columns: u32, metrics: GridMetrics) -> Self {
        let mut cells = Vec::with_capacity((rows as usize).saturating_mul(columns as usize));
        let mut row_positions = Vec::with_capacity(rows as usize + 1);
        let mut col_positions = Vec::with_capacity(columns as usize + 1);

        let mut y_offset: f32 = 0.0;
        let mut content_width: f32 = 0.0;
        let mut last_row_bottom: f32 = 0.0;

        for row in 0..rows {
            let mut x_offset: f32 = 0.0;
            let mut row_height: f32 = 0.0;
            let mut row_right: f32 = 0.0;
            last_row_bottom = y_offset;

            for column in 0..columns {
                let coordinate = StorageCoordinate::new(row, column);
                let role = metrics.flags.role(coordinate);
                let size = metrics.size_for_role(role);
                let frame = Frame::new(x_offset, y_offset, size.width, size.height).integral();

                if row == 0 {
                    col_positions.push(frame.x);
                }
                if column == 0 {
                    row_positions.push(frame.y);
                }

                cells.push(CellAttributes {
                    coordinate,
                    role,
                    frame,
                    z_index: role.z_index(),
                });

                x_offset += size.width;
                row_height = row_height.max(size.height);
                row_right = frame.max_x();
                last_row_bottom = last_row_bottom.max(frame.max_y());
            }

            if row == 0 {
                col_positions.push(row_right);
            }
            content_width = content_width.max(row_right);
            y_offset += row_height;
        }
        if rows > 0 {
            row_positions.push(last_row_bottom);
        }

        let content_height = cells.last().map(|c| c.frame.max_y()).unwrap_or(0.0);

        GridLayout {
            rows,
            columns,
            metrics,
            cells,
            row_positions,
            col_positions,
            content_size: Size::new(content_width, content_height),
            pinned_offset: Point::ORIGIN,
        }
    }

    /// Move the header bands to track the scroll offset.
    ///
    /// The column-header band gets `offset.y` as its top edge and the
    /// row-header band gets `offset.x` as its left edge. Sizes, interior
    /// frames and the content size are untouched.
    pub fn repin(&mut self, offset: Point) {
        self.pinned_offset = offset;
        let flags = self.metrics.flags;
        if self.columns == 0 || (!flags.header_row && !flags.header_column) {
            return;
        }

        let columns = self.columns as usize;
        if let Some(first_row) = self.cells.get_mut(..columns) {
            for cell in first_row {
                pin(cell, flags, offset);
            }
        }
        for cell in self.cells.iter_mut().step_by(columns).skip(1) {
            pin(cell, flags, offset);
        }
        tracing::trace!(x = offset.x, y = offset.y, "layout.repin");
    }

    fn index_of(&self, coordinate: StorageCoordinate) -> Option<usize> {
        if coordinate.row >= self.rows || coordinate.column >= self.columns {
            return None;
        }
        Some(coordinate.row as usize * self.columns as usize + coordinate.column as usize)
    }

    pub fn attributes(&self, coordinate: StorageCoordinate) -> Option<&CellAttributes> {
        self.cells.get(self.index_of(coordinate)?)
    }

    /// Frame of a storage cell, `None` when outside the table.
    pub fn frame_for(&self, coordinate: StorageCoordinate) -> Option<Frame> {
        self.attributes(coordinate).map(|c| c.frame)
    }

    /// Cells whose frame intersects `rect`, in row-major order.
    pub fn attributes_intersecting(
        &self,
        rect: Frame,
    ) -> impl Iterator<Item = &CellAttributes> + '_ {
        self.candidates(rect)
            .filter(move |cell| cell.frame.intersects(&rect))
    }

    /// `(coordinate, frame)` pairs whose frame intersects `rect`, in row-major order.
    pub fn frames_intersecting(
        &self,
        rect: Frame,
    ) -> impl Iterator<Item = (StorageCoordinate, Frame)> + '_ {
        self.attributes_intersecting(rect)
            .map(|cell| (cell.coordinate, cell.frame))
    }

    /// Hit test: the topmost cell containing `point`.
    ///
    /// Pinned headers overlap the content scrolled under them, so the cell
    /// with the highest stacking priority wins.
    pub fn cell_at(&self, point: Point) -> Option<StorageCoordinate> {
        self.candidates(Frame::new(point.x, point.y, 1.0, 1.0))
            .filter(|cell| cell.frame.contains(point))
            .max_by_key(|cell| cell.z_index)
            .map(|cell| cell.coordinate)
    }

    /// Cells that may intersect `rect`: the unpinned rows/columns overlapping it
    /// (binary search over the cumulative edges) plus row 0 and column 0, which
    /// may have been pinned anywhere.
    fn candidates(&self, rect: Frame) -> impl Iterator<Item = &CellAttributes> + '_ {
        let (row_start, row_end) = span(&self.row_positions, rect.y, rect.max_y());
        let (col_start, col_end) = span(&self.col_positions, rect.x, rect.max_x());
        with_leading_zero(row_start, row_end).flat_map(move |row| {
            with_leading_zero(col_start, col_end)
                .filter_map(move |column| self.attributes(StorageCoordinate::new(row, column)))
        })
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn flags(&self) -> HeaderFlags {
        self.metrics.flags
    }

    pub fn cells(&self) -> &[CellAttributes] {
        &self.cells
    }

    /// Scroll offset the header bands were last pinned to
    pub fn pinned_offset(&self) -> Point {
        self.pinned_offset
    }

    pub fn snapshot(&self) -> LayoutSnapshot<'_> {
        LayoutSnapshot {
            rows: self.rows,
            columns: self.columns,
            flags: self.metrics.flags,
            content_size: self.content_size,
            cells: &self.cells,
        }
    }
}

fn pin(cell: &mut CellAttributes, flags: HeaderFlags, offset: Point) {
    if flags.header_row && cell.coordinate.row == 0 {
        cell.frame.y = offset.y;
    }
    if flags.header_column && cell.coordinate.column == 0 {
        cell.frame.x = offset.x;
    }
}

/// Index range `[start, end)` of the cells between `lo` and `hi`, given the
/// ascending cell edges (`n + 1` entries for `n` cells).
fn span(edges: &[f32], lo: f32, hi: f32) -> (u32, u32) {
    let Some(last) = edges.len().checked_sub(1) else {
        return (0, 0);
    };
    let right_edges = edges.get(1..).unwrap_or(&[]);
    let left_edges = edges.get(..last).unwrap_or(&[]);
    let start = right_edges.partition_point(|&edge| edge <= lo);
    let end = left_edges.partition_point(|&edge| edge < hi);
    (
        u32::try_from(start).unwrap_or(u32::MAX),
        u32::try_from(end).unwrap_or(u32::MAX),
    )
}

fn with_leading_zero(start: u32, end: u32) -> impl Iterator<Item = u32> {
    std::iter::once(0)
        .filter(move |_| start > 0)
        .chain(start..end)
}

/// Outcome of [`LayoutEngine::prepare`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPass {
    /// No table existed; a full build ran
    Built,
    /// A table existed; only the header bands moved
    Repinned,
    /// The host reported no cells; nothing to lay out
    Empty,
}

/// Owns the single layout table of a grid and decides between a full build
/// and a cheap re-pin.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    table: Option<GridLayout>,
    build_count: u64,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the table up to date for the given scroll offset.
    ///
    /// The host is only queried when no table exists; sizes and header flags
    /// stay cached with the table until [`Self::invalidate`].
    pub fn prepare<H: GridHost + ?Sized>(&mut self, host: &H, offset: Point) -> LayoutPass {
        if let Some(table) = self.table.as_mut() {
            table.repin(offset);
            return LayoutPass::Repinned;
        }

        let flags = HeaderFlags::new(host.includes_header_row(), host.includes_header_column());
        let (rows, columns) =
            flags.storage_dimensions(host.number_of_rows(), host.number_of_columns());
        if rows == 0 || columns == 0 {
            return LayoutPass::Empty;
        }

        let metrics = GridMetrics::new(
            host.size_for_cell(GridCoordinate::new(0, 0)),
            host.row_header_width(),
            host.column_header_height(),
            flags,
        );
        let mut table = GridLayout::new(rows, columns, metrics);
        table.repin(offset);

        let content = table.content_size();
        tracing::debug!(
            rows,
            columns,
            width = content.width,
            height = content.height,
            "layout.full_build"
        );
        self.table = Some(table);
        self.build_count += 1;
        LayoutPass::Built
    }

    /// Discard the table so the next [`Self::prepare`] runs a full build.
    pub fn invalidate(&mut self) {
        self.table = None;
    }

    pub fn table(&self) -> Option<&GridLayout> {
        self.table.as_ref()
    }

    pub fn frame_for(&self, coordinate: StorageCoordinate) -> Option<Frame> {
        self.table.as_ref()?.frame_for(coordinate)
    }

    pub fn content_size(&self) -> Size {
        self.table
            .as_ref()
            .map(GridLayout::content_size)
            .unwrap_or(Size::ZERO)
    }

    /// Number of full builds run so far
    pub fn build_count(&self) -> u64 {
        self.build_count
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::Size;

    fn layout(rows: u32, columns: u32, header_row: bool, header_column: bool) -> GridLayout {
        let metrics = GridMetrics::new(
            Size::new(160.0, 47.0),
            200.0,
            80.0,
            HeaderFlags::new(header_row, header_column),
        );
        GridLayout::new(rows, columns, metrics)
    }

    #[test]
    fn test_basic_layout() {
        // 15 content rows, 8 content columns, both bands
        let layout = layout(16, 9, true, true);

        assert_eq!(layout.content_size(), Size::new(1480.0, 785.0));
        assert_eq!(layout.cells().len(), 16 * 9);
    }

    #[test]
    fn test_cell_frames() {
        let layout = layout(16, 9, true, true);

        let corner = layout.attributes(StorageCoordinate::new(0, 0)).unwrap();
        assert_eq!(corner.frame, Frame::new(0.0, 0.0, 200.0, 80.0));
        assert_eq!(corner.z_index, 1024);

        let header = layout.attributes(StorageCoordinate::new(0, 2)).unwrap();
        assert_eq!(header.frame, Frame::new(360.0, 0.0, 160.0, 80.0));
        assert_eq!(header.z_index, 1023);

        let cell = layout.attributes(StorageCoordinate::new(2, 1)).unwrap();
        assert_eq!(cell.frame, Frame::new(200.0, 127.0, 160.0, 47.0));
        assert_eq!(cell.z_index, 0);
    }

    #[test]
    fn test_frame_for_out_of_bounds() {
        let layout = layout(3, 3, false, false);
        assert!(layout.frame_for(StorageCoordinate::new(3, 0)).is_none());
        assert!(layout.frame_for(StorageCoordinate::new(0, 3)).is_none());
    }

    #[test]
    fn test_repin_moves_only_bands() {
        let mut layout = layout(5, 5, true, true);
        let before = layout.frame_for(StorageCoordinate::new(2, 2)).unwrap();
        layout.repin(Point::new(30.0, 90.0));

        assert_eq!(
            layout.frame_for(StorageCoordinate::new(0, 0)).unwrap().origin(),
            Point::new(30.0, 90.0)
        );
        assert_eq!(
            layout.frame_for(StorageCoordinate::new(0, 3)).unwrap().origin(),
            Point::new(520.0, 90.0)
        );
        assert_eq!(
            layout.frame_for(StorageCoordinate::new(3, 0)).unwrap().origin(),
            Point::new(30.0, 174.0)
        );
        assert_eq!(layout.frame_for(StorageCoordinate::new(2, 2)).unwrap(), before);
        assert_eq!(layout.content_size(), Size::new(840.0, 268.0));
    }

    #[test]
    fn test_repin_without_bands_is_noop() {
        let mut layout = layout(3, 3, false, false);
        let before = layout.cells().to_vec();
        layout.repin(Point::new(50.0, 50.0));
        assert_eq!(layout.cells(), &before[..]);
    }

    #[test]
    fn test_hit_test_prefers_pinned_header() {
        let mut layout = layout(10, 5, true, true);
        layout.repin(Point::new(0.0, 100.0));

        // Pinned header band spans y 100..180, over storage rows 1 and 2
        assert_eq!(
            layout.cell_at(Point::new(250.0, 150.0)),
            Some(StorageCoordinate::new(0, 1))
        );
        assert_eq!(
            layout.cell_at(Point::new(250.0, 200.0)),
            Some(StorageCoordinate::new(3, 1))
        );
        assert_eq!(layout.cell_at(Point::new(10_000.0, 10.0)), None);
    }

    #[test]
    fn test_frames_intersecting_row_major() {
        let layout = layout(6, 6, false, false);
        let hits: Vec<_> = layout
            .frames_intersecting(Frame::new(170.0, 50.0, 200.0, 50.0))
            .map(|(c, _)| (c.row, c.column))
            .collect();
        assert_eq!(hits, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }
}
