//! gridview - scrollable grid core with sticky headers and column reordering
//!
//! Computes cell geometry for a spreadsheet-like grid and drives its
//! interactions; drawing is left to the host:
//! - Per-role cell sizes (corner, row/column header bands, regular cells)
//! - One layout build per structural change, cheap header re-pin on scroll
//! - Grid <-> storage coordinate translation around the header bands
//! - Long-press-and-drag column reordering with debounced, asynchronous swaps
//!
//! # Usage (Rust)
//!
//! ```
//! use gridview::{ColumnStore, ConfigHost, GridConfig, GridView, Point};
//!
//! let host = ConfigHost::new(GridConfig::default(), ColumnStore::sample(15, 8));
//! let mut grid = GridView::new(host);
//! grid.reload();
//! assert_eq!(grid.content_size().width, 1480.0);
//!
//! grid.set_content_offset(Point::new(0.0, 120.0));
//! let visible = grid.visible_cells();
//! assert!(!visible.is_empty());
//! ```

pub mod coords;
pub mod error;
pub mod grid;
pub mod host;
pub mod layout;
pub mod reorder;
pub mod store;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use coords::HeaderFlags;
pub use error::{GridError, Result};
pub use grid::{GridView, PointerPhase, PointerResponse, VisibleCell};
pub use host::GridHost;
pub use layout::{GridLayout, GridMetrics, LayoutPass, Viewport};
pub use reorder::{Completion, MoveOutcome, ReorderState, SwapRecord};
pub use store::{ColumnStore, ConfigHost};
pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use web::WasmGrid;

/// Lay out a `rows` x `columns` grid from a JSON config and return the layout
/// table as a JSON string.
///
/// # Errors
/// Returns an error if the config JSON is invalid.
#[wasm_bindgen]
pub fn layout_json(
    config_json: &str,
    rows: u32,
    columns: u32,
) -> std::result::Result<String, JsValue> {
    let config =
        GridConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let metrics = GridMetrics::from_config(&config);
    let (rows, columns) = metrics.flags.storage_dimensions(rows, columns);
    let table = GridLayout::new(rows, columns, metrics);

    serde_json::to_string(&table.snapshot())
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
