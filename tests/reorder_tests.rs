//! Column reorder tests
//!
//! Drag lifecycle through the grid facade: start rules, debouncing, in-flight
//! swap bookkeeping, completion order and teardown while swaps are pending.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{center_of, header_label, RecordingHost};
use gridview::{
    Completion, GridView, MoveOutcome, Point, PointerPhase, PointerResponse, ReorderState, Size,
    StorageCoordinate, SwapRecord,
};
use proptest::prelude::*;

/// Header of grid column `c` lives in storage column `c + 1` (row-header band).
fn header(grid: &GridView<RecordingHost>, grid_column: u32) -> Point {
    center_of(grid, 0, grid_column + 1)
}

#[test]
fn test_one_pixel_move_does_not_swap() {
    let mut grid = common::grid(15, 8);
    let start = header(&grid, 2);
    assert!(grid.begin_drag(start));

    let outcome = grid.drag_moved(Point::new(start.x + 1.0, start.y));
    assert_eq!(outcome, MoveOutcome::Debounced);
    assert_eq!(grid.pending_swaps(), 0);
    assert!(grid.complete_pending_swaps().is_empty());
    assert!(grid.host().swaps.is_empty());
}

#[test]
fn test_hover_over_other_header_swaps_once() {
    let mut grid = common::grid(15, 8);
    grid.begin_drag(header(&grid, 2));

    let target = header(&grid, 4);
    let MoveOutcome::Submitted(swap) = grid.drag_moved(target) else {
        panic!("expected a submitted swap");
    };
    assert_eq!(swap.record, SwapRecord::new(2, 4).unwrap());
    assert_eq!(swap.destination, StorageCoordinate::new(0, 5));
    assert!(grid.host().swaps.is_empty(), "host notified before completion");

    let completions = grid.complete_pending_swaps();
    assert_eq!(completions, vec![Completion::Committed(swap)]);
    assert_eq!(grid.host().swaps, vec![(2, 4)]);

    // Origin followed the column: moving back proposes {4, 2} from the new slot
    let back = header(&grid, 2);
    let MoveOutcome::Submitted(swap) = grid.drag_moved(back) else {
        panic!("expected a submitted swap");
    };
    assert_eq!(swap.source, StorageCoordinate::new(0, 5));
    assert_eq!((swap.source_column, swap.destination_column), (4, 2));
}

#[test]
fn test_drag_on_regular_cell_never_starts() {
    let mut grid = common::grid(15, 8);
    let cell = center_of(&grid, 3, 3);

    assert_eq!(
        grid.handle_pointer(PointerPhase::Began, cell),
        PointerResponse::Ignored
    );
    assert_eq!(grid.reorder_state(), ReorderState::Idle);
    assert_eq!(
        grid.handle_pointer(PointerPhase::Changed, header(&grid, 5)),
        PointerResponse::Ignored
    );
    let builds = grid.build_count();
    assert_eq!(
        grid.handle_pointer(PointerPhase::Ended, header(&grid, 5)),
        PointerResponse::Ignored
    );
    assert_eq!(grid.build_count(), builds);
    assert!(grid.host().swaps.is_empty());
}

#[test]
fn test_headers_that_cannot_be_dragged() {
    let mut grid = common::grid(15, 8);
    assert!(!grid.begin_drag(center_of(&grid, 0, 0)), "corner");
    assert!(!grid.begin_drag(center_of(&grid, 4, 0)), "row header");
    assert!(!grid.begin_drag(Point::new(-20.0, -20.0)), "miss");
    assert_eq!(grid.reorder_state(), ReorderState::Idle);
}

#[test]
fn test_ghost_follows_pointer() {
    let mut grid = common::grid(15, 8);
    let start = header(&grid, 1);
    grid.begin_drag(start);

    let ghost = grid.ghost().unwrap();
    assert_eq!(ghost.snapshot.as_deref(), Some("C1"));
    assert_eq!(ghost.alpha, 0.8);
    assert_eq!(ghost.frame.size(), Size::new(224.0, 112.0));
    assert_eq!(ghost.frame.center(), start);

    let moved = Point::new(start.x + 0.5, start.y + 0.5);
    grid.drag_moved(moved);
    assert_eq!(grid.ghost().unwrap().frame.center(), moved);
}

#[test]
fn test_duplicate_pair_skipped_until_completion() {
    let mut grid = common::grid(15, 8);
    grid.begin_drag(header(&grid, 2));
    let target = header(&grid, 4);

    assert!(matches!(grid.drag_moved(target), MoveOutcome::Submitted(_)));
    let wiggle = Point::new(target.x + 30.0, target.y);
    assert!(matches!(grid.drag_moved(wiggle), MoveOutcome::Duplicate(_)));
    assert_eq!(grid.pending_swaps(), 1);

    grid.complete_pending_swaps();
    assert_eq!(grid.host().swaps, vec![(2, 4)]);
}

#[test]
fn test_hit_miss_and_veto_are_silent() {
    let mut grid = common::grid(15, 8);
    grid.begin_drag(header(&grid, 2));

    assert_eq!(
        grid.drag_moved(Point::new(99_999.0, 40.0)),
        MoveOutcome::Missed
    );
    assert_eq!(grid.drag_moved(center_of(&grid, 6, 6)), MoveOutcome::Unchanged);

    grid.host_mut().veto_drops = true;
    assert_eq!(grid.drag_moved(header(&grid, 6)), MoveOutcome::Unchanged);
    assert_eq!(grid.pending_swaps(), 0);
    assert_eq!(grid.reorder_state(), ReorderState::Dragging);
}

#[test]
fn test_overlapping_swaps_complete_in_submission_order() {
    let mut grid = common::grid(15, 8);
    grid.begin_drag(header(&grid, 2));

    grid.drag_moved(header(&grid, 4));
    grid.drag_moved(header(&grid, 5));
    assert_eq!(grid.pending_swaps(), 2);

    // Both visual swaps show before either commits
    let shown: Vec<String> = [2, 4, 5].map(|c| header_label(&grid, c + 1)).to_vec();
    assert_eq!(shown, ["C5", "C2", "C4"]);

    // C2 now shows at grid column 4, so that slot is the hidden one
    let hidden: Vec<_> = grid.visible_cells().into_iter().filter(|c| c.hidden).collect();
    assert_eq!(hidden.len(), 1);
    assert_eq!(hidden[0].coordinate, StorageCoordinate::new(0, 5));

    grid.complete_pending_swaps();
    assert_eq!(grid.host().swaps, vec![(2, 4), (2, 5)]);
    let committed: Vec<String> = [2, 4, 5].map(|c| header_label(&grid, c + 1)).to_vec();
    assert_eq!(committed, shown);
}

/// Storage cells hidden behind the ghost, and the labels they show
fn hidden_slots(grid: &GridView<RecordingHost>) -> Vec<(StorageCoordinate, String)> {
    grid.visible_cells()
        .into_iter()
        .filter(|c| c.hidden)
        .map(|c| (c.coordinate, header_label(grid, c.coordinate.column)))
        .collect()
}

#[test]
fn test_hidden_cell_follows_dragged_column_across_overlapping_swaps() {
    let mut grid = common::grid(15, 8);
    grid.resize(2000.0, 600.0);
    let start = header(&grid, 2);
    grid.begin_drag(start);

    grid.drag_moved(header(&grid, 4));
    let pointer = header(&grid, 5);
    grid.drag_moved(pointer);
    assert_eq!(grid.pending_swaps(), 2);

    assert_eq!(
        hidden_slots(&grid),
        vec![(StorageCoordinate::new(0, 5), "C2".to_string())]
    );
    let ghost = grid.ghost().unwrap();
    assert_eq!(ghost.snapshot.as_deref(), Some("C2"));
    assert_eq!(ghost.frame.center(), pointer);

    // Completions move the data, not the hidden slot
    grid.complete_next_swap();
    assert_eq!(
        hidden_slots(&grid),
        vec![(StorageCoordinate::new(0, 5), "C2".to_string())]
    );
    grid.complete_next_swap();
    assert_eq!(
        hidden_slots(&grid),
        vec![(StorageCoordinate::new(0, 5), "C2".to_string())]
    );
}

#[test]
fn test_committed_swap_exchanges_content() {
    let mut grid = common::grid(15, 8);
    grid.begin_drag(header(&grid, 2));
    grid.drag_moved(header(&grid, 4));
    grid.complete_pending_swaps();
    assert!(grid.end_drag());

    assert_eq!(header_label(&grid, 3), "C4");
    assert_eq!(header_label(&grid, 5), "C2");
    assert_eq!(
        grid.cell_content(StorageCoordinate::new(7, 3)).as_deref(),
        Some("6:4")
    );
    assert_eq!(grid.host().swaps.len(), 1);
}

#[test]
fn test_end_before_completion_makes_swap_stale() {
    let mut grid = common::grid(15, 8);
    grid.begin_drag(header(&grid, 1));
    grid.drag_moved(header(&grid, 3));

    let builds = grid.build_count();
    assert_eq!(
        grid.handle_pointer(PointerPhase::Ended, header(&grid, 3)),
        PointerResponse::DragEnded
    );
    assert_eq!(grid.build_count(), builds + 1, "end reloads");
    assert_eq!(grid.reorder_state(), ReorderState::Idle);

    let completions = grid.complete_pending_swaps();
    assert!(matches!(completions[..], [Completion::Stale(_)]));
    assert!(grid.host().swaps.is_empty());
    assert_eq!(header_label(&grid, 2), "C1");
    assert!(grid.visible_cells().iter().all(|c| !c.hidden));
}

#[test]
fn test_cancel_keeps_committed_swaps_without_reload() {
    let mut grid = common::grid(15, 8);
    grid.begin_drag(header(&grid, 0));
    grid.drag_moved(header(&grid, 1));
    grid.complete_next_swap();
    grid.drag_moved(header(&grid, 3));

    let builds = grid.build_count();
    assert_eq!(
        grid.handle_pointer(PointerPhase::Cancelled, Point::ORIGIN),
        PointerResponse::DragCancelled
    );
    assert_eq!(grid.build_count(), builds, "cancel does not reload");

    grid.complete_pending_swaps();
    assert_eq!(grid.host().swaps, vec![(0, 1)]);
    assert_eq!(header_label(&grid, 1), "C1");
    assert_eq!(header_label(&grid, 2), "C0");
    assert_eq!(header_label(&grid, 4), "C3");
}

#[test]
fn test_hidden_cell_tracks_swap_destination() {
    let mut grid = common::grid(15, 8);
    grid.resize(2000.0, 600.0);
    grid.begin_drag(header(&grid, 2));

    let hidden = |grid: &GridView<RecordingHost>| {
        grid.visible_cells()
            .into_iter()
            .filter(|c| c.hidden)
            .map(|c| c.coordinate)
            .collect::<Vec<_>>()
    };
    assert_eq!(hidden(&grid), vec![StorageCoordinate::new(0, 3)]);
    grid.drag_moved(header(&grid, 4));
    assert_eq!(hidden(&grid), vec![StorageCoordinate::new(0, 5)]);
}

proptest! {
    #[test]
    fn moves_below_min_travel_never_swap(
        first in 0_u32..8,
        dx in -1.4_f32..1.4,
        dy in -1.4_f32..1.4,
    ) {
        let mut grid = common::grid(15, 8);
        let start = header(&grid, first);
        prop_assert!(grid.begin_drag(start));

        let nudged = Point::new(start.x + dx, start.y + dy);
        prop_assert_eq!(grid.drag_moved(nudged), MoveOutcome::Debounced);
        prop_assert_eq!(grid.pending_swaps(), 0);
    }

    #[test]
    fn jitter_after_a_move_never_swaps(
        first in 0_u32..8,
        second in 0_u32..8,
        dx in -1.4_f32..1.4,
        dy in -1.4_f32..1.4,
    ) {
        let mut grid = common::grid(15, 8);
        grid.begin_drag(header(&grid, first));
        let target = header(&grid, second);
        grid.drag_moved(target);
        let pending = grid.pending_swaps();

        let outcome = grid.drag_moved(Point::new(target.x + dx, target.y + dy));
        prop_assert_eq!(outcome, MoveOutcome::Debounced);
        prop_assert_eq!(grid.pending_swaps(), pending);
    }

    #[test]
    fn each_committed_swap_notifies_host_once(
        targets in proptest::collection::vec(0_u32..8, 1..12),
        complete_every in 1_usize..4,
    ) {
        let mut grid = common::grid(15, 8);
        grid.begin_drag(header(&grid, 0));
        let mut submitted = 0;
        let mut committed = 0;
        for (i, target) in targets.into_iter().enumerate() {
            if let MoveOutcome::Submitted(_) = grid.drag_moved(header(&grid, target)) {
                submitted += 1;
            }
            if i % complete_every == 0 {
                committed += grid
                    .complete_pending_swaps()
                    .iter()
                    .filter(|c| matches!(c, Completion::Committed(_)))
                    .count();
            }
        }
        committed += grid.complete_pending_swaps().len();
        prop_assert_eq!(submitted, committed);
        prop_assert_eq!(grid.host().swaps.len(), committed);

        let mut labels: Vec<String> = (1..=8).map(|c| header_label(&grid, c)).collect();
        labels.sort();
        let expected: Vec<String> = (0..8).map(|c| format!("C{c}")).collect();
        prop_assert_eq!(labels, expected);
    }
}
