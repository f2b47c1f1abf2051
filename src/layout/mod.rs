//! Layout engine for computing cell frames and viewport management.
//!
//! This module handles:
//! - Resolving per-role cell sizes (corner, header bands, regular cells)
//! - Building the layout table once per structural change
//! - Re-pinning sticky header bands on every scroll change
//! - Hit testing and visibility queries over the table

mod geometry;
mod grid_layout;
mod viewport;

pub use geometry::GridMetrics;
pub use grid_layout::{CellAttributes, GridLayout, LayoutEngine, LayoutPass, LayoutSnapshot};
pub use viewport::Viewport;
