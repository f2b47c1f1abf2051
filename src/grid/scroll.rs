//! Scroll handling for `GridView`.
//!
//! Scrolling never rebuilds the layout; it only re-pins the header bands.

use super::GridView;
use crate::host::GridHost;
use crate::layout::LayoutPass;
use crate::types::Point;

impl<H: GridHost> GridView<H> {
    /// Set the absolute scroll offset, clamped to the content.
    pub fn set_content_offset(&mut self, offset: Point) -> LayoutPass {
        let content = self.engine.content_size();
        self.viewport.set_scroll(offset.x, offset.y, content);
        self.ensure_layout()
    }

    /// Scroll by a delta. Returns the applied delta after clamping, or `None`
    /// when the offset did not change.
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32) -> Option<(f32, f32)> {
        let before = self.viewport.offset();
        let content = self.engine.content_size();
        self.viewport.scroll_by(delta_x, delta_y, content);
        let after = self.viewport.offset();
        let dx = after.x - before.x;
        let dy = after.y - before.y;
        if dx.abs() <= f32::EPSILON && dy.abs() <= f32::EPSILON {
            return None;
        }
        self.ensure_layout();
        Some((dx, dy))
    }

    /// Resize the visible window. The offset is re-clamped and the bands re-pinned.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        self.viewport.clamp_scroll(self.engine.content_size());
        self.ensure_layout();
    }
}
