//! Axis-aligned rectangle geometry
//!
//! Screen space: origin at the top-left corner, y grows downward.

use glam::Vec2;

/// An axis-aligned rectangle (top-left position + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height, both strictly positive
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "rect size must be positive");
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Horizontal center line
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// AABB overlap test.
    ///
    /// Both axis intervals must intersect with non-zero measure; rectangles
    /// that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_partial() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_contained() {
        let outer = Rect::new(0.0, 0.0, 50.0, 50.0);
        let inner = Rect::new(20.0, 20.0, 3.0, 5.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_edge_touching_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_disjoint_on_one_axis() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Overlaps horizontally, far apart vertically
        let b = Rect::new(2.0, 40.0, 4.0, 4.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(100.0, 50.0, 25.0, 18.0);
        assert_eq!(r.left(), 100.0);
        assert_eq!(r.right(), 125.0);
        assert_eq!(r.top(), 50.0);
        assert_eq!(r.bottom(), 68.0);
        assert_eq!(r.center_x(), 112.5);
    }
}
