use serde::{Deserialize, Serialize};

use super::Size;
use crate::error::Result;

/// Default regular cell width in pixels
pub const DEFAULT_ITEM_WIDTH: f32 = 160.0;

/// Default regular cell height in pixels
pub const DEFAULT_ITEM_HEIGHT: f32 = 47.0;

/// Default width of the row-header band in pixels
pub const DEFAULT_ROW_HEADER_WIDTH: f32 = 200.0;

/// Default height of the column-header band in pixels
pub const DEFAULT_COLUMN_HEADER_HEIGHT: f32 = 80.0;

/// Minimum pointer travel between two moves before a new drop target is considered
pub const DEFAULT_MIN_TRAVEL: f32 = 2.0;

/// Configuration for a grid: per-role sizes, header bands and drag tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Size of a regular cell
    pub item_size: Size,
    /// Width of the row-header band
    pub row_header_width: f32,
    /// Height of the column-header band
    pub column_header_height: f32,
    /// Whether storage row 0 is a column-header band
    pub includes_header_row: bool,
    /// Whether storage column 0 is a row-header band
    pub includes_header_column: bool,
    /// Debounce distance for drag moves
    pub min_travel: f32,
    /// Scale applied to the floating drag ghost
    pub ghost_scale: f32,
    /// Opacity of the floating drag ghost
    pub ghost_alpha: f32,
    /// Duration of the visual swap before its completion fires (browser host only)
    pub swap_animation_ms: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            item_size: Size::new(DEFAULT_ITEM_WIDTH, DEFAULT_ITEM_HEIGHT),
            row_header_width: DEFAULT_ROW_HEADER_WIDTH,
            column_header_height: DEFAULT_COLUMN_HEADER_HEIGHT,
            includes_header_row: true,
            includes_header_column: true,
            min_travel: DEFAULT_MIN_TRAVEL,
            ghost_scale: 1.4,
            ghost_alpha: 0.8,
            swap_animation_ms: 250,
        }
    }
}

impl GridConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
