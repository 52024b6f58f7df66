//! Axis-aligned rectangles in world pixel space.
//!
//! `y` grows downwards, matching screen coordinates. Overlap is strict:
//! rectangles that merely share an edge do not intersect, so a body snapped
//! onto a floor is not considered to be inside it.

use glam::Vec2;

/// Axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    /// Top-left corner.
    pub min: Vec2,
    /// Width and height; never negative.
    pub size: Vec2,
}

impl Aabb {
    /// Builds a rectangle from its top-left corner and size.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec2;
    /// use tilehop::geometry::Aabb;
    ///
    /// let rect = Aabb::new(Vec2::new(10.0, 20.0), Vec2::new(4.0, 8.0));
    /// assert_eq!(rect.right(), 14.0);
    /// assert_eq!(rect.bottom(), 28.0);
    /// ```
    #[must_use]
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            size: size.max(Vec2::ZERO),
        }
    }

    /// Builds a rectangle from raw components.
    #[must_use]
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(width, height))
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.min.x
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.min.y
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Moves the rectangle so its left edge sits at `x`.
    pub fn set_left(&mut self, x: f32) {
        self.min.x = x;
    }

    /// Moves the rectangle so its right edge sits at `x`.
    pub fn set_right(&mut self, x: f32) {
        self.min.x = x - self.size.x;
    }

    /// Moves the rectangle so its top edge sits at `y`.
    pub fn set_top(&mut self, y: f32) {
        self.min.y = y;
    }

    /// Moves the rectangle so its bottom edge sits at `y`.
    pub fn set_bottom(&mut self, y: f32) {
        self.min.y = y - self.size.y;
    }

    /// Moves the rectangle so its centre sits at `center`.
    pub fn set_center(&mut self, center: Vec2) {
        self.min = center - self.size * 0.5;
    }

    /// Returns the rectangle translated by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            size: self.size,
        }
    }

    /// Returns the rectangle grown by `amount` on every side.
    #[must_use]
    pub fn inflated(&self, amount: f32) -> Self {
        Self::new(
            self.min - Vec2::splat(amount),
            self.size + Vec2::splat(amount * 2.0),
        )
    }

    /// Strict overlap test; shared edges do not count.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilehop::geometry::Aabb;
    ///
    /// let floor = Aabb::from_xywh(0.0, 100.0, 96.0, 96.0);
    /// let resting = Aabb::from_xywh(0.0, 20.0, 80.0, 80.0);
    /// assert!(!resting.intersects(&floor));
    /// assert!(resting.translated(glam::Vec2::Y).intersects(&floor));
    /// ```
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Whether `other` lies entirely inside `self` (edges inclusive).
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.left() <= other.left()
            && self.top() <= other.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn unit_at(x: f32, y: f32) -> Aabb {
        Aabb::from_xywh(x, y, 10.0, 10.0)
    }

    #[rstest]
    #[case::overlapping(unit_at(5.0, 5.0), true)]
    #[case::touching_right(unit_at(10.0, 0.0), false)]
    #[case::touching_below(unit_at(0.0, 10.0), false)]
    #[case::touching_corner(unit_at(10.0, 10.0), false)]
    #[case::inside(Aabb::from_xywh(2.0, 2.0, 1.0, 1.0), true)]
    #[case::apart(unit_at(30.0, 0.0), false)]
    fn intersection_is_strict(#[case] other: Aabb, #[case] expected: bool) {
        let base = unit_at(0.0, 0.0);
        assert_eq!(base.intersects(&other), expected);
        assert_eq!(other.intersects(&base), expected);
    }

    #[test]
    fn edge_setters_keep_size() {
        let mut rect = Aabb::from_xywh(0.0, 0.0, 8.0, 4.0);
        rect.set_right(20.0);
        rect.set_bottom(10.0);
        assert_eq!(rect.min, Vec2::new(12.0, 6.0));
        assert_eq!(rect.size, Vec2::new(8.0, 4.0));
        rect.set_center(Vec2::ZERO);
        assert_eq!(rect.min, Vec2::new(-4.0, -2.0));
    }

    #[test]
    fn negative_sizes_are_clamped() {
        let rect = Aabb::from_xywh(0.0, 0.0, -5.0, 3.0);
        assert_eq!(rect.size, Vec2::new(0.0, 3.0));
    }

    #[test]
    fn inflation_grows_every_side() {
        let rect = unit_at(0.0, 0.0).inflated(2.0);
        assert_eq!(rect, Aabb::from_xywh(-2.0, -2.0, 14.0, 14.0));
        assert!(rect.contains(&unit_at(0.0, 0.0)));
    }
}
