//! Collision shapes for tile-grid physics
//!
//! The only collision primitive is the axis-aligned bounding box: bodies are
//! non-rotating rectangles described by a center and half-extents. Boxes are
//! recomputed on demand from body state and never persisted.

use tilebox_math::Vec2;

/// A 2D axis-aligned bounding box with immutable shape and movable center
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Center of the box in world coordinates
    pub center: Vec2,
    /// Half the size in each dimension, both components >= 0
    pub half: Vec2,
}

impl Aabb {
    /// Create a new AABB from a center and half-extents
    ///
    /// Negative half-extents are a programming error in the caller and
    /// panic immediately rather than producing inside-out geometry.
    pub fn new(center: Vec2, half: Vec2) -> Self {
        assert!(
            half.x >= 0.0 && half.y >= 0.0,
            "AABB half-extents must be non-negative, got ({}, {})",
            half.x,
            half.y
        );
        Self { center, half }
    }

    /// Create an AABB from min and max corners
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    /// Minimum corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    /// Maximum corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Full size in each dimension
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half * 2.0
    }

    /// Check if a point is inside or on the box
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Overlap test against another box (touching edges do not overlap)
    pub fn overlaps(&self, other: &Self) -> bool {
        let min_a = self.min();
        let max_a = self.max();
        let min_b = other.min();
        let max_b = other.max();
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }

    /// Translate the box by a delta
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            center: self.center + delta,
            half: self.half,
        }
    }

    /// Scale the half-extents by a non-negative factor, keeping the center
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.center, self.half * factor.max(0.0))
    }

    /// Grow (or with negative amounts shrink) the half-extents
    ///
    /// Shrinking clamps at zero extent instead of inverting the box.
    #[must_use]
    pub fn inflated(&self, amount: Vec2) -> Self {
        Self::new(
            self.center,
            (self.half + amount).max_components(Vec2::ZERO),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        let aabb = Aabb::new(Vec2::new(1.0, 2.0), Vec2::new(0.5, 0.25));
        assert_eq!(aabb.min(), Vec2::new(0.5, 1.75));
        assert_eq!(aabb.max(), Vec2::new(1.5, 2.25));
        assert_eq!(aabb.size(), Vec2::new(1.0, 0.5));
    }

    #[test]
    fn test_from_min_max() {
        let aabb = Aabb::from_min_max(Vec2::new(0.0, 0.0), Vec2::new(2.0, 4.0));
        assert_eq!(aabb.center, Vec2::new(1.0, 2.0));
        assert_eq!(aabb.half, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_contains() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        assert!(aabb.contains(Vec2::new(0.5, 0.5)));
        assert!(aabb.contains(Vec2::new(1.0, 1.0))); // corner
        assert!(!aabb.contains(Vec2::new(1.1, 0.0)));
    }

    #[test]
    fn test_overlaps() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let b = Aabb::new(Vec2::new(1.5, 0.0), Vec2::new(1.0, 1.0));
        let c = Aabb::new(Vec2::new(3.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let b = Aabb::new(Vec2::new(2.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_translated() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let moved = aabb.translated(Vec2::new(2.0, -1.0));
        assert_eq!(moved.center, Vec2::new(2.0, -1.0));
        assert_eq!(moved.half, aabb.half);
    }

    #[test]
    fn test_scaled() {
        let aabb = Aabb::new(Vec2::new(1.0, 1.0), Vec2::new(2.0, 1.0));
        let scaled = aabb.scaled(0.5);
        assert_eq!(scaled.half, Vec2::new(1.0, 0.5));
        assert_eq!(scaled.center, aabb.center);
    }

    #[test]
    fn test_inflated() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let grown = aabb.inflated(Vec2::new(0.5, 0.25));
        assert_eq!(grown.half, Vec2::new(1.5, 1.25));

        // Shrinking past zero clamps instead of inverting
        let shrunk = aabb.inflated(Vec2::new(-2.0, -0.5));
        assert_eq!(shrunk.half, Vec2::new(0.0, 0.5));
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_half_extents_panic() {
        let _ = Aabb::new(Vec2::ZERO, Vec2::new(-0.1, 1.0));
    }
}
