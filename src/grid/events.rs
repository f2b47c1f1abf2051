//! Pointer event handlers for `GridView`.
//!
//! Points are in content coordinates. The platform's gesture recognizer
//! supplies the phase; everything after that is the reorder state machine.

use super::{DragContext, GridView};
use crate::host::GridHost;
use crate::reorder::MoveOutcome;
use crate::types::Point;

/// Phase of a long-press-and-drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Began,
    Changed,
    Ended,
    /// Any other signal, e.g. the recognizer failed
    Cancelled,
}

/// What a pointer event did to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerResponse {
    /// No drag session was affected
    Ignored,
    DragStarted,
    Moved(MoveOutcome),
    DragEnded,
    DragCancelled,
}

impl<H: GridHost> GridView<H> {
    /// Dispatch one gesture event by phase.
    pub fn handle_pointer(&mut self, phase: PointerPhase, point: Point) -> PointerResponse {
        match phase {
            PointerPhase::Began => {
                if self.begin_drag(point) {
                    PointerResponse::DragStarted
                } else {
                    PointerResponse::Ignored
                }
            }
            PointerPhase::Changed => match self.drag_moved(point) {
                MoveOutcome::Inactive => PointerResponse::Ignored,
                outcome => PointerResponse::Moved(outcome),
            },
            PointerPhase::Ended => {
                if self.end_drag() {
                    PointerResponse::DragEnded
                } else {
                    PointerResponse::Ignored
                }
            }
            PointerPhase::Cancelled => {
                if self.cancel_drag() {
                    PointerResponse::DragCancelled
                } else {
                    PointerResponse::Ignored
                }
            }
        }
    }

    /// Start dragging the column header under `point`.
    ///
    /// Returns `false` when nothing reorderable is there; the rest of that
    /// gesture is then ignored.
    pub fn begin_drag(&mut self, point: Point) -> bool {
        self.ensure_layout();
        let Some(table) = self.engine.table() else {
            return false;
        };
        let ctx = DragContext {
            host: &self.host,
            table,
        };
        self.reorder.begin(point, &ctx)
    }

    pub fn drag_moved(&mut self, point: Point) -> MoveOutcome {
        let Some(table) = self.engine.table() else {
            return MoveOutcome::Inactive;
        };
        let ctx = DragContext {
            host: &self.host,
            table,
        };
        self.reorder.update(point, &ctx)
    }

    /// Finish the drag: show the hidden cell again, drop the ghost and reload
    /// everything, since columns may have changed order.
    pub fn end_drag(&mut self) -> bool {
        if self.reorder.end().is_none() {
            return false;
        }
        self.reload();
        true
    }

    /// Abort the drag. Swaps already committed stay applied; nothing reloads.
    pub fn cancel_drag(&mut self) -> bool {
        self.reorder.cancel().is_some()
    }
}
