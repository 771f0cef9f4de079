//! Axis-aligned rectangle geometry for every body in the arena
//!
//! Origin is the lower-left corner, y grows upward:
//! - right = x + width
//! - top = y + height
//! - center = (x + width/2, y + height/2)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Negative sizes are clamped to zero
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Build a rect of the given size centered on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        let mut rect = Self::new(0.0, 0.0, width, height);
        rect.set_center(center);
        rect
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    pub fn set_center_x(&mut self, cx: f32) {
        self.x = cx - self.width / 2.0;
    }

    pub fn set_center_y(&mut self, cy: f32) {
        self.y = cy - self.height / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Overlap test; touching edges count as overlapping
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.top() < other.y
            || self.y > other.top())
    }

    /// Strict interior test; points on the boundary are not inside
    pub fn contains_strict(&self, p: Vec2) -> bool {
        self.x < p.x && p.x < self.right() && self.y < p.y && p.y < self.top()
    }

    /// Clamp a point onto the closed rectangle
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.x, self.right()),
            p.y.clamp(self.y, self.top()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_negative_size_clamped() {
        let r = Rect::new(0.0, 0.0, -5.0, 3.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 3.0);
    }

    #[test]
    fn test_overlap_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(10.5, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_contains_strict_excludes_boundary() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_strict(Vec2::new(5.0, 5.0)));
        assert!(!r.contains_strict(Vec2::new(0.0, 5.0)));
        assert!(!r.contains_strict(Vec2::new(5.0, 10.0)));
    }

    #[test]
    fn test_centered_roundtrip() {
        let r = Rect::centered(Vec2::new(50.0, 50.0), 20.0, 10.0);
        assert_eq!(r.x, 40.0);
        assert_eq!(r.y, 45.0);
        assert_eq!(r.center(), Vec2::new(50.0, 50.0));
    }
}
