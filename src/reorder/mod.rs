//! Drag-to-reorder state machine for column headers.
//!
//! `Idle -> Dragging -> Idle`. A drag starts on a column-header cell, turns
//! pointer moves into discrete column swaps, and ends with `end` or `cancel`.
//!
//! Swaps are asynchronous: [`ReorderController::update`] only submits a swap to
//! a FIFO queue. The host drives completions later (after its swap animation)
//! through [`ReorderController::complete_next`]. More moves may arrive in
//! between; the per-session active set keeps at most one swap per column pair
//! in flight.

mod swap;

use std::collections::HashSet;

use serde::Serialize;

pub use swap::{PendingSwap, SwapQueue, SwapRecord};

use crate::types::{CellRole, Frame, GridConfig, Point, StorageCoordinate, DEFAULT_MIN_TRAVEL};

/// Tuning for drag handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderConfig {
    /// Minimum pointer travel between two moves before hit testing again
    pub min_travel: f32,
    /// Scale of the floating ghost relative to the source cell
    pub ghost_scale: f32,
    /// Opacity of the floating ghost
    pub ghost_alpha: f32,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            min_travel: DEFAULT_MIN_TRAVEL,
            ghost_scale: 1.4,
            ghost_alpha: 0.8,
        }
    }
}

impl From<&GridConfig> for ReorderConfig {
    fn from(config: &GridConfig) -> Self {
        Self {
            min_travel: config.min_travel.max(0.0),
            ghost_scale: config.ghost_scale,
            ghost_alpha: config.ghost_alpha,
        }
    }
}

/// What the state machine needs from the grid: hit testing, roles, frames and
/// the drop-target policy.
pub trait ReorderContext {
    /// Visual copy of the dragged cell
    type Snapshot;

    fn cell_at(&self, point: Point) -> Option<StorageCoordinate>;

    fn role_of(&self, cell: StorageCoordinate) -> CellRole;

    fn frame_for(&self, cell: StorageCoordinate) -> Option<Frame>;

    /// Grid column index of a storage cell, `None` on the row-header band
    fn grid_column(&self, cell: StorageCoordinate) -> Option<u32>;

    /// Final destination for a proposed target; returning `origin` vetoes the move.
    fn resolve_drop_target(
        &self,
        origin: StorageCoordinate,
        proposed: StorageCoordinate,
    ) -> StorageCoordinate;

    fn snapshot(&self, cell: StorageCoordinate) -> Self::Snapshot;
}

/// Floating proxy that follows the pointer during a drag
#[derive(Debug, Clone, Serialize)]
pub struct DragGhost<S> {
    pub snapshot: S,
    /// Frame of the source cell when the drag started
    pub source_frame: Frame,
    /// Current frame, scaled and centered on the pointer
    pub frame: Frame,
    pub alpha: f32,
}

/// Transient state of one drag gesture
#[derive(Debug, Clone)]
pub struct InteractiveSession<S> {
    id: u64,
    origin: StorageCoordinate,
    /// Host column of the dragged content; follows it through committed swaps
    dragged: u32,
    /// Storage column minus grid column (1 with a row-header band)
    band_offset: u32,
    pointer: Point,
    last_point: Point,
    ghost: DragGhost<S>,
    active_swaps: HashSet<SwapRecord>,
}

impl<S> InteractiveSession<S> {
    /// Cell the next swap will move from
    pub fn origin(&self) -> StorageCoordinate {
        self.origin
    }

    /// Host column holding the dragged content
    pub fn dragged_column(&self) -> u32 {
        self.dragged
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn ghost(&self) -> &DragGhost<S> {
        &self.ghost
    }

    pub fn active_swaps(&self) -> &HashSet<SwapRecord> {
        &self.active_swaps
    }

    pub fn is_active(&self, record: &SwapRecord) -> bool {
        self.active_swaps.contains(record)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderState {
    Idle,
    Dragging,
}

/// Result of feeding one pointer move to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No drag in progress
    Inactive,
    /// Pointer travel below the minimum; only the ghost moved
    Debounced,
    /// Pointer is not over any cell
    Missed,
    /// Destination resolved to the origin (vetoed or same cell)
    Unchanged,
    /// A swap for this pair is already in flight
    Duplicate(SwapRecord),
    /// A new swap was queued
    Submitted(PendingSwap),
}

/// Result of one completion callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The swap belonged to the live session; the host must apply it
    Committed(PendingSwap),
    /// The session ended (or moved on) before the swap finished; ignore it
    Stale(PendingSwap),
}

/// Session torn down by `end` or `cancel`
#[derive(Debug, Clone)]
pub struct EndedSession<S> {
    /// Slot whose live cell must be shown again
    pub hidden_cell: StorageCoordinate,
    pub ghost: DragGhost<S>,
    /// Swaps still in flight when the session ended; their completions will be stale
    pub abandoned: usize,
}

/// Column reorder state machine
#[derive(Debug)]
pub struct ReorderController<S> {
    config: ReorderConfig,
    session: Option<InteractiveSession<S>>,
    queue: SwapQueue,
    next_session: u64,
}

impl<S> Default for ReorderController<S> {
    fn default() -> Self {
        Self::new(ReorderConfig::default())
    }
}

impl<S> ReorderController<S> {
    pub fn new(config: ReorderConfig) -> Self {
        Self {
            config,
            session: None,
            queue: SwapQueue::default(),
            next_session: 0,
        }
    }

    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    pub fn state(&self) -> ReorderState {
        if self.session.is_some() {
            ReorderState::Dragging
        } else {
            ReorderState::Idle
        }
    }

    pub fn session(&self) -> Option<&InteractiveSession<S>> {
        self.session.as_ref()
    }

    /// Swaps submitted but not yet completed, stale ones included
    pub fn pending(&self) -> &SwapQueue {
        &self.queue
    }

    /// Start a drag at `point`.
    ///
    /// Returns `false` (and stays idle) unless the point hits a column-header
    /// cell. A drag already in progress is left alone.
    pub fn begin<C>(&mut self, point: Point, ctx: &C) -> bool
    where
        C: ReorderContext<Snapshot = S>,
    {
        if self.session.is_some() {
            return false;
        }
        let Some(cell) = ctx.cell_at(point) else {
            return false;
        };
        if !ctx.role_of(cell).is_reorderable() {
            return false;
        }
        let (Some(source_frame), Some(dragged)) = (ctx.frame_for(cell), ctx.grid_column(cell))
        else {
            return false;
        };

        self.next_session += 1;
        let ghost = DragGhost {
            snapshot: ctx.snapshot(cell),
            source_frame,
            frame: source_frame.scaled_around(point, self.config.ghost_scale),
            alpha: self.config.ghost_alpha,
        };
        self.session = Some(InteractiveSession {
            id: self.next_session,
            origin: cell,
            dragged,
            band_offset: cell.column.saturating_sub(dragged),
            pointer: point,
            last_point: point,
            ghost,
            active_swaps: HashSet::new(),
        });
        tracing::debug!(
            session = self.next_session,
            row = cell.row,
            column = cell.column,
            "reorder.begin"
        );
        true
    }

    /// Feed a pointer move.
    ///
    /// The ghost always follows the pointer. A swap is only considered when the
    /// pointer travelled at least `min_travel` since the previous move.
    pub fn update<C>(&mut self, point: Point, ctx: &C) -> MoveOutcome
    where
        C: ReorderContext<Snapshot = S>,
    {
        let Some(session) = self.session.as_mut() else {
            return MoveOutcome::Inactive;
        };

        let travel = session.last_point.distance_to(point);
        session.last_point = point;
        session.pointer = point;
        session.ghost.frame = session
            .ghost
            .source_frame
            .scaled_around(point, self.config.ghost_scale);

        if travel < self.config.min_travel {
            tracing::trace!(travel, "reorder.debounced");
            return MoveOutcome::Debounced;
        }

        let Some(target) = ctx.cell_at(point) else {
            return MoveOutcome::Missed;
        };
        let origin = session.origin;
        let destination = ctx.resolve_drop_target(origin, target);
        if destination == origin {
            return MoveOutcome::Unchanged;
        }
        let (Some(source_column), Some(destination_column)) =
            (ctx.grid_column(origin), ctx.grid_column(destination))
        else {
            return MoveOutcome::Unchanged;
        };
        let Some(record) = SwapRecord::new(source_column, destination_column) else {
            return MoveOutcome::Unchanged;
        };
        if !session.active_swaps.insert(record) {
            return MoveOutcome::Duplicate(record);
        }

        let swap = PendingSwap {
            session: session.id,
            record,
            source: origin,
            destination,
            source_column,
            destination_column,
        };
        self.queue.push(swap);
        tracing::debug!(
            source = source_column,
            destination = destination_column,
            in_flight = self.queue.len(),
            "reorder.swap_submitted"
        );
        MoveOutcome::Submitted(swap)
    }

    /// Fire the completion callback of the oldest submitted swap.
    ///
    /// A swap commits only if its session is still live and its pair is still
    /// marked active; on commit the session's origin moves to the destination.
    pub fn complete_next(&mut self) -> Option<Completion> {
        let swap = self.queue.pop()?;
        let live = self
            .session
            .as_mut()
            .filter(|session| session.id == swap.session && session.is_active(&swap.record));

        let Some(session) = live else {
            tracing::debug!(
                source = swap.source_column,
                destination = swap.destination_column,
                "reorder.swap_stale"
            );
            return Some(Completion::Stale(swap));
        };
        session.active_swaps.remove(&swap.record);
        session.origin = swap.destination;
        session.dragged = swap.record.apply(session.dragged);
        tracing::debug!(
            source = swap.source_column,
            destination = swap.destination_column,
            "reorder.swap_committed"
        );
        Some(Completion::Committed(swap))
    }

    /// Finish the drag. In-flight swaps are not awaited; their completions
    /// will come back stale.
    pub fn end(&mut self) -> Option<EndedSession<S>> {
        let ended = self.teardown();
        if ended.is_some() {
            tracing::debug!("reorder.end");
        }
        ended
    }

    /// Abort the drag. Swaps that already committed stay applied.
    pub fn cancel(&mut self) -> Option<EndedSession<S>> {
        let ended = self.teardown();
        if ended.is_some() {
            tracing::debug!("reorder.cancel");
        }
        ended
    }

    fn teardown(&mut self) -> Option<EndedSession<S>> {
        let hidden_cell = self.hidden_cell()?;
        let session = self.session.take()?;
        Some(EndedSession {
            hidden_cell,
            ghost: session.ghost,
            abandoned: session.active_swaps.len(),
        })
    }

    /// Host column currently displayed in grid column `column`.
    ///
    /// Submitted swaps are shown immediately while the host order only changes
    /// on commit, so the display is the host order composed with the live
    /// session's in-flight swaps (newest applied first).
    pub fn display_column(&self, column: u32) -> u32 {
        let Some(session) = self.session.as_ref() else {
            return column;
        };
        self.in_flight(session)
            .rev()
            .fold(column, |index, swap| swap.record.apply(index))
    }

    /// Slot whose live cell is hidden while the ghost stands in for it.
    ///
    /// This is wherever the display currently shows the dragged column, so it
    /// moves with every submitted swap involving that column and stays put
    /// for swaps that do not.
    pub fn hidden_cell(&self) -> Option<StorageCoordinate> {
        let session = self.session.as_ref()?;
        let column = self
            .in_flight(session)
            .fold(session.dragged, |index, swap| swap.record.apply(index));
        Some(StorageCoordinate::new(
            session.origin.row,
            column + session.band_offset,
        ))
    }

    /// The live session's swaps still awaiting completion, oldest first
    fn in_flight<'a>(
        &'a self,
        session: &'a InteractiveSession<S>,
    ) -> impl DoubleEndedIterator<Item = &'a PendingSwap> + 'a {
        self.queue
            .iter()
            .filter(move |swap| swap.session == session.id && session.is_active(&swap.record))
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

    /// One header row of 100px cells, no row-header band, columns 0..6.
    struct Strip {
        row_header: bool,
    }

    impl ReorderContext for Strip {
        type Snapshot = u32;

        fn cell_at(&self, point: Point) -> Option<StorageCoordinate> {
            if point.x < 0.0 || point.y < 0.0 || point.x >= 600.0 || point.y >= 200.0 {
                return None;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let column = (point.x / 100.0) as u32;
            let row = u32::from(point.y >= 100.0);
            Some(StorageCoordinate::new(row, column))
        }

        fn role_of(&self, cell: StorageCoordinate) -> CellRole {
            if self.row_header && cell.column == 0 {
                CellRole::RowHeader
            } else if cell.row == 0 {
                CellRole::ColumnHeader
            } else {
                CellRole::Regular
            }
        }

        fn frame_for(&self, cell: StorageCoordinate) -> Option<Frame> {
            Some(Frame::new(
                cell.column as f32 * 100.0,
                cell.row as f32 * 100.0,
                100.0,
                100.0,
            ))
        }

        fn grid_column(&self, cell: StorageCoordinate) -> Option<u32> {
            cell.column.checked_sub(u32::from(self.row_header))
        }

        fn resolve_drop_target(
            &self,
            origin: StorageCoordinate,
            proposed: StorageCoordinate,
        ) -> StorageCoordinate {
            if proposed.row != origin.row || (self.row_header && proposed.column == 0) {
                origin
            } else {
                proposed
            }
        }

        fn snapshot(&self, cell: StorageCoordinate) -> u32 {
            cell.column
        }
    }

    fn at_column(column: u32) -> Point {
        Point::new(column as f32 * 100.0 + 50.0, 50.0)
    }

    #[test]
    fn test_begin_requires_column_header() {
        let ctx = Strip { row_header: false };
        let mut reorder = ReorderController::<u32>::default();
        assert!(!reorder.begin(Point::new(50.0, 150.0), &ctx));
        assert_eq!(reorder.state(), ReorderState::Idle);
        assert!(!reorder.begin(Point::new(-5.0, 50.0), &ctx));

        assert!(reorder.begin(at_column(2), &ctx));
        assert_eq!(reorder.state(), ReorderState::Dragging);
        assert_eq!(reorder.session().unwrap().ghost().snapshot, 2);
    }

    #[test]
    fn test_small_moves_are_debounced() {
        let ctx = Strip { row_header: false };
        let mut reorder = ReorderController::<u32>::default();
        reorder.begin(at_column(2), &ctx);

        let p = at_column(2);
        let outcome = reorder.update(Point::new(p.x + 1.0, p.y), &ctx);
        assert_eq!(outcome, MoveOutcome::Debounced);
        assert!(reorder.pending().is_empty());
        assert_eq!(
            reorder.session().unwrap().ghost().frame.center(),
            Point::new(p.x + 1.0, p.y)
        );
    }

    #[test]
    fn test_swap_commits_and_moves_origin() {
        let ctx = Strip { row_header: false };
        let mut reorder = ReorderController::<u32>::default();
        reorder.begin(at_column(2), &ctx);

        let MoveOutcome::Submitted(swap) = reorder.update(at_column(4), &ctx) else {
            panic!("expected a swap");
        };
        assert_eq!(swap.record, SwapRecord::new(2, 4).unwrap());
        assert_eq!(reorder.display_column(2), 4);
        assert_eq!(reorder.display_column(4), 2);

        assert_eq!(reorder.complete_next(), Some(Completion::Committed(swap)));
        assert_eq!(
            reorder.session().unwrap().origin(),
            StorageCoordinate::new(0, 4)
        );
        assert_eq!(reorder.display_column(2), 2);
        assert_eq!(reorder.complete_next(), None);
    }

    #[test]
    fn test_duplicate_pair_is_skipped_while_in_flight() {
        let ctx = Strip { row_header: false };
        let mut reorder = ReorderController::<u32>::default();
        reorder.begin(at_column(2), &ctx);

        assert!(matches!(
            reorder.update(at_column(4), &ctx),
            MoveOutcome::Submitted(_)
        ));
        let wiggle = Point::new(at_column(4).x + 10.0, 60.0);
        assert_eq!(
            reorder.update(wiggle, &ctx),
            MoveOutcome::Duplicate(SwapRecord::new(2, 4).unwrap())
        );
        assert_eq!(reorder.pending().len(), 1);
    }

    #[test]
    fn test_row_header_band_vetoes_drop() {
        let ctx = Strip { row_header: true };
        let mut reorder = ReorderController::<u32>::default();
        assert!(!reorder.begin(at_column(0), &ctx));
        assert!(reorder.begin(at_column(1), &ctx));
        assert_eq!(reorder.update(at_column(0), &ctx), MoveOutcome::Unchanged);
        assert_eq!(
            reorder.update(Point::new(350.0, 150.0), &ctx),
            MoveOutcome::Unchanged
        );
    }

    #[test]
    fn test_hidden_cell_follows_dragged_column() {
        let ctx = Strip { row_header: false };
        let mut reorder = ReorderController::<u32>::default();
        reorder.begin(at_column(2), &ctx);
        assert_eq!(reorder.hidden_cell(), Some(StorageCoordinate::new(0, 2)));

        // {2, 4} then {2, 5} before anything completes
        reorder.update(at_column(4), &ctx);
        reorder.update(at_column(5), &ctx);
        assert_eq!(reorder.pending().len(), 2);
        assert_eq!(reorder.display_column(4), 2);
        assert_eq!(reorder.hidden_cell(), Some(StorageCoordinate::new(0, 4)));

        reorder.complete_next();
        assert_eq!(reorder.session().unwrap().dragged_column(), 4);
        assert_eq!(reorder.hidden_cell(), Some(StorageCoordinate::new(0, 4)));
        reorder.complete_next();
        assert_eq!(reorder.hidden_cell(), Some(StorageCoordinate::new(0, 4)));
    }

    #[test]
    fn test_end_makes_in_flight_swaps_stale() {
        let ctx = Strip { row_header: false };
        let mut reorder = ReorderController::<u32>::default();
        reorder.begin(at_column(1), &ctx);
        let MoveOutcome::Submitted(swap) = reorder.update(at_column(3), &ctx) else {
            panic!("expected a swap");
        };

        let ended = reorder.end().unwrap();
        assert_eq!(ended.abandoned, 1);
        assert_eq!(ended.hidden_cell, StorageCoordinate::new(0, 3));
        assert_eq!(reorder.complete_next(), Some(Completion::Stale(swap)));
        assert!(reorder.end().is_none());
    }

    #[test]
    fn test_stale_swap_does_not_leak_into_next_session() {
        let ctx = Strip { row_header: false };
        let mut reorder = ReorderController::<u32>::default();
        reorder.begin(at_column(1), &ctx);
        reorder.update(at_column(3), &ctx);
        reorder.cancel();

        reorder.begin(at_column(1), &ctx);
        let MoveOutcome::Submitted(fresh) = reorder.update(at_column(3), &ctx) else {
            panic!("expected a swap");
        };
        assert!(matches!(reorder.complete_next(), Some(Completion::Stale(_))));
        assert_eq!(reorder.complete_next(), Some(Completion::Committed(fresh)));
    }

    #[test]
    fn test_update_without_session() {
        let ctx = Strip { row_header: false };
        let mut reorder = ReorderController::<u32>::default();
        assert_eq!(reorder.update(at_column(3), &ctx), MoveOutcome::Inactive);
    }
}
