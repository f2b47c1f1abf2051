//! `GridView` - the facade composing layout, coordinate translation and
//! column reordering behind a host-provided data source.
//!
//! This module provides:
//! - Structural reloads (full layout builds) and cheap scroll re-pins
//! - Visibility queries for the renderer
//! - Cell content routed to the host provider for each role
//! - Swap completion handling that notifies the host once per committed swap

mod events;
mod scroll;

use serde::Serialize;

pub use events::{PointerPhase, PointerResponse};

use crate::coords::HeaderFlags;
use crate::host::GridHost;
use crate::layout::{GridLayout, LayoutEngine, LayoutPass, Viewport};
use crate::reorder::{
    Completion, DragGhost, ReorderConfig, ReorderContext, ReorderController, ReorderState,
};
use crate::types::{CellRole, Frame, GridConfig, GridCoordinate, Point, Size, StorageCoordinate};

/// A cell intersecting the viewport, as handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisibleCell {
    pub coordinate: StorageCoordinate,
    pub role: CellRole,
    pub frame: Frame,
    pub z_index: i32,
    /// The live view is hidden while the drag ghost stands in for it
    pub hidden: bool,
}

/// Scrollable grid with sticky header bands and drag-to-reorder columns
pub struct GridView<H: GridHost> {
    host: H,
    config: GridConfig,
    engine: LayoutEngine,
    viewport: Viewport,
    reorder: ReorderController<Option<H::Cell>>,
}

impl<H: GridHost> GridView<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, GridConfig::default())
    }

    /// Create a grid with explicit drag tuning. Sizes and header flags always
    /// come from the host.
    pub fn with_config(host: H, config: GridConfig) -> Self {
        let reorder = ReorderController::new(ReorderConfig::from(&config));
        Self {
            host,
            config,
            engine: LayoutEngine::new(),
            viewport: Viewport::new(),
            reorder,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the data source. Structural changes only show up
    /// after [`Self::reload`].
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Discard cached structure and run a full layout build.
    ///
    /// An active drag session survives the reload; its hidden cell and
    /// in-flight swaps are re-evaluated against the new table.
    pub fn reload(&mut self) -> LayoutPass {
        self.engine.invalidate();
        let pass = self.ensure_layout();
        tracing::debug!(
            dragging = self.reorder.state() == ReorderState::Dragging,
            builds = self.engine.build_count(),
            "grid.reload"
        );
        pass
    }

    /// Build the layout table if none exists, otherwise re-pin the header bands
    /// to the current scroll offset.
    pub fn ensure_layout(&mut self) -> LayoutPass {
        let pass = self.engine.prepare(&self.host, self.viewport.offset());
        if pass == LayoutPass::Built {
            let before = self.viewport.offset();
            self.viewport.clamp_scroll(self.engine.content_size());
            if self.viewport.offset() != before {
                self.engine.prepare(&self.host, self.viewport.offset());
            }
        }
        pass
    }

    pub fn layout(&self) -> Option<&GridLayout> {
        self.engine.table()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn content_size(&self) -> Size {
        self.engine.content_size()
    }

    /// Number of full layout builds run so far
    pub fn build_count(&self) -> u64 {
        self.engine.build_count()
    }

    pub fn flags(&self) -> Option<HeaderFlags> {
        self.engine.table().map(GridLayout::flags)
    }

    pub fn frame_for(&self, coordinate: StorageCoordinate) -> Option<Frame> {
        self.engine.frame_for(coordinate)
    }

    /// Topmost cell under a point in content coordinates
    pub fn cell_at(&self, point: Point) -> Option<StorageCoordinate> {
        self.engine.table()?.cell_at(point)
    }

    /// Cells intersecting the viewport, row-major. Empty before the first build.
    pub fn visible_cells(&self) -> Vec<VisibleCell> {
        let Some(table) = self.engine.table() else {
            return Vec::new();
        };
        let hidden = self.reorder.hidden_cell();
        table
            .attributes_intersecting(self.viewport.visible_rect())
            .map(|cell| VisibleCell {
                coordinate: cell.coordinate,
                role: cell.role,
                frame: cell.frame,
                z_index: cell.z_index,
                hidden: hidden == Some(cell.coordinate),
            })
            .collect()
    }

    /// Content for a storage cell, routed to the host provider for its role.
    ///
    /// Columns taking part in an in-flight swap are shown at their new slot.
    pub fn cell_content(&self, coordinate: StorageCoordinate) -> Option<H::Cell> {
        let table = self.engine.table()?;
        if table.attributes(coordinate).is_none() {
            return None;
        }
        route_content(&self.host, table.flags(), coordinate, |column| {
            self.reorder.display_column(column)
        })
    }

    pub fn reorder_state(&self) -> ReorderState {
        self.reorder.state()
    }

    pub fn ghost(&self) -> Option<&DragGhost<Option<H::Cell>>> {
        self.reorder.session().map(|s| s.ghost())
    }

    /// Number of submitted swaps whose completion has not fired yet
    pub fn pending_swaps(&self) -> usize {
        self.reorder.pending().len()
    }

    /// Fire the oldest pending swap completion. A committed swap is reported
    /// to the host; a stale one is dropped.
    pub fn complete_next_swap(&mut self) -> Option<Completion> {
        let completion = self.reorder.complete_next()?;
        if let Completion::Committed(swap) = completion {
            self.host
                .on_columns_swapped(swap.source_column, swap.destination_column);
        }
        Some(completion)
    }

    /// Fire every pending completion in submission order.
    ///
    /// Completions are drained before the host hears about any of them, so the
    /// host callback never runs while the queue is being walked.
    pub fn complete_pending_swaps(&mut self) -> Vec<Completion> {
        let completions: Vec<Completion> =
            std::iter::from_fn(|| self.reorder.complete_next()).collect();
        for completion in &completions {
            if let Completion::Committed(swap) = completion {
                self.host
                    .on_columns_swapped(swap.source_column, swap.destination_column);
            }
        }
        completions
    }
}

/// Look up host content for a storage cell. `column_map` maps a grid column to
/// the host column currently displayed there.
fn route_content<H, F>(
    host: &H,
    flags: HeaderFlags,
    coordinate: StorageCoordinate,
    column_map: F,
) -> Option<H::Cell>
where
    H: GridHost + ?Sized,
    F: Fn(u32) -> u32,
{
    match flags.role(coordinate) {
        CellRole::Corner => host.corner_cell(),
        CellRole::ColumnHeader => {
            let column = flags.grid_column(coordinate.column)?;
            host.column_header_cell(column_map(column))
        }
        CellRole::RowHeader => host.row_header_cell(flags.grid_row(coordinate.row)?),
        CellRole::Regular => {
            let grid = flags.to_grid(coordinate)?;
            host.cell(GridCoordinate::new(grid.row, column_map(grid.column)))
        }
    }
}

/// Borrowed view of the grid handed to the reorder state machine
struct DragContext<'a, H: GridHost> {
    host: &'a H,
    table: &'a GridLayout,
}

impl<H: GridHost> ReorderContext for DragContext<'_, H> {
    type Snapshot = Option<H::Cell>;

    fn cell_at(&self, point: Point) -> Option<StorageCoordinate> {
        self.table.cell_at(point)
    }

    fn role_of(&self, cell: StorageCoordinate) -> CellRole {
        self.table.flags().role(cell)
    }

    fn frame_for(&self, cell: StorageCoordinate) -> Option<Frame> {
        self.table.frame_for(cell)
    }

    fn grid_column(&self, cell: StorageCoordinate) -> Option<u32> {
        self.table.flags().grid_column(cell.column)
    }

    /// Columns only move along their own row and never into the row-header
    /// band; the host gets the final say on anything that passes.
    fn resolve_drop_target(
        &self,
        origin: StorageCoordinate,
        proposed: StorageCoordinate,
    ) -> StorageCoordinate {
        let flags = self.table.flags();
        if proposed.row != origin.row || (flags.header_column && proposed.column == 0) {
            return origin;
        }
        self.host.resolve_drop_target(origin, proposed)
    }

    fn snapshot(&self, cell: StorageCoordinate) -> Option<H::Cell> {
        route_content(self.host, self.table.flags(), cell, |column| column)
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

    /// 3 content rows x 4 content columns, both bands, cells labelled by position
    struct Labels {
        order: Vec<u32>,
        swaps: Vec<(u32, u32)>,
    }

    impl Labels {
        fn new() -> Self {
            Self {
                order: vec![0, 1, 2, 3],
                swaps: Vec::new(),
            }
        }
    }

    impl GridHost for Labels {
        type Cell = String;

        fn number_of_rows(&self) -> u32 {
            3
        }

        fn number_of_columns(&self) -> u32 {
            4
        }

        fn includes_header_row(&self) -> bool {
            true
        }

        fn includes_header_column(&self) -> bool {
            true
        }

        fn row_header_cell(&self, row: u32) -> Option<String> {
            Some(format!("R{row}"))
        }

        fn column_header_cell(&self, column: u32) -> Option<String> {
            Some(format!("C{}", self.order[column as usize]))
        }

        fn cell(&self, coordinate: GridCoordinate) -> Option<String> {
            Some(format!(
                "{}:{}",
                coordinate.row, self.order[coordinate.column as usize]
            ))
        }

        fn on_columns_swapped(&mut self, source: u32, destination: u32) {
            self.order.swap(source as usize, destination as usize);
            self.swaps.push((source, destination));
        }
    }

    #[test]
    fn test_content_routing_by_role() {
        let mut grid = GridView::new(Labels::new());
        grid.reload();

        assert_eq!(grid.cell_content(StorageCoordinate::new(0, 0)), None);
        assert_eq!(
            grid.cell_content(StorageCoordinate::new(0, 2)).as_deref(),
            Some("C1")
        );
        assert_eq!(
            grid.cell_content(StorageCoordinate::new(2, 0)).as_deref(),
            Some("R1")
        );
        assert_eq!(
            grid.cell_content(StorageCoordinate::new(3, 4)).as_deref(),
            Some("2:3")
        );
        assert_eq!(grid.cell_content(StorageCoordinate::new(4, 0)), None);
    }

    #[test]
    fn test_visible_cells_before_layout_is_empty() {
        let grid = GridView::new(Labels::new());
        assert!(grid.visible_cells().is_empty());
        assert_eq!(grid.content_size(), Size::ZERO);
    }

    #[test]
    fn test_in_flight_swap_shows_columns_exchanged() {
        let mut grid = GridView::new(Labels::new());
        grid.reload();

        // Column header for grid column 0 spans x 200..360
        assert!(grid.begin_drag(Point::new(280.0, 40.0)));
        let header = |grid: &GridView<Labels>, column| {
            grid.cell_content(StorageCoordinate::new(0, column))
        };
        grid.drag_moved(Point::new(600.0, 40.0));
        assert_eq!(header(&grid, 1).as_deref(), Some("C2"));
        assert_eq!(header(&grid, 3).as_deref(), Some("C0"));

        let completions = grid.complete_pending_swaps();
        assert_eq!(completions.len(), 1);
        assert_eq!(grid.host().swaps, vec![(0, 2)]);
        assert_eq!(header(&grid, 1).as_deref(), Some("C2"));
        assert_eq!(header(&grid, 3).as_deref(), Some("C0"));
    }

    #[test]
    fn test_drop_guard_keeps_columns_out_of_row_header_band() {
        let mut grid = GridView::new(Labels::new());
        grid.reload();
        grid.begin_drag(Point::new(280.0, 40.0));

        let outcome = grid.drag_moved(Point::new(50.0, 40.0));
        assert_eq!(outcome, crate::reorder::MoveOutcome::Unchanged);
        let outcome = grid.drag_moved(Point::new(600.0, 120.0));
        assert_eq!(outcome, crate::reorder::MoveOutcome::Unchanged);
        assert_eq!(grid.pending_swaps(), 0);
    }
}
