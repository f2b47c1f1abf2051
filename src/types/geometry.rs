//! Pixel geometry primitives: sizes, points and frames.

use serde::{Deserialize, Serialize};

/// Width and height in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Clamp negative or non-finite dimensions to zero.
    ///
    /// Host callbacks are not trusted to return sane sizes; a negative width
    /// would make frames overlap, so it is treated as an empty extent.
    pub fn clamped(self) -> Self {
        Self {
            width: clamp_extent(self.width),
            height: clamp_extent(self.height),
        }
    }
}

pub(crate) fn clamp_extent(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// A position in content coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.hypot(dy)
    }
}

/// Axis-aligned rectangle in content coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Snap every edge to the nearest whole pixel.
    ///
    /// Edges are rounded independently, so two frames sharing an edge before
    /// snapping still share it afterwards.
    pub fn integral(&self) -> Self {
        let x = self.x.round();
        let y = self.y.round();
        Self {
            x,
            y,
            width: (self.max_x().round() - x).max(0.0),
            height: (self.max_y().round() - y).max(0.0),
        }
    }

    /// True if the two frames share interior area (touching edges do not count).
    pub fn intersects(&self, other: &Frame) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }

    /// Scale around a new center point.
    pub fn scaled_around(&self, center: Point, scale: f32) -> Self {
        let width = self.width * scale;
        let height = self.height * scale;
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_snaps_edges() {
        let f = Frame::new(0.4, 1.6, 10.2, 4.0).integral();
        assert_eq!(f, Frame::new(0.0, 2.0, 11.0, 4.0));

        // Neighbours keep their shared edge
        let a = Frame::new(0.0, 0.0, 10.5, 1.0).integral();
        let b = Frame::new(10.5, 0.0, 10.5, 1.0).integral();
        assert_eq!(a.max_x(), b.x);
    }

    #[test]
    fn test_touching_frames_do_not_intersect() {
        let a = Frame::new(0.0, 0.0, 10.0, 10.0);
        let b = Frame::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Frame::new(9.0, 9.0, 5.0, 5.0)));
    }

    #[test]
    fn test_contains_is_half_open() {
        let f = Frame::new(0.0, 0.0, 10.0, 10.0);
        assert!(f.contains(Point::new(0.0, 0.0)));
        assert!(!f.contains(Point::new(10.0, 5.0)));
    }

    #[test]
    fn test_clamped_size() {
        let s = Size::new(-5.0, f32::NAN).clamped();
        assert_eq!(s, Size::ZERO);
        assert_eq!(Size::new(3.0, 4.0).clamped(), Size::new(3.0, 4.0));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0);
    }
}
