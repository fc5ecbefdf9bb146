//! Geometric primitives for cable drawing layout.
//!
//! This module provides the types every layout pass speaks in: positions,
//! extents, and axis-aligned boxes in viewport coordinates.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in drawing space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A box defined by minimum and maximum coordinates, used for overlap tests
//! - [`Rect`] - A box defined by its top-left corner and extents, as emitted to callers
//! - [`Axis`] - One of the two drawing axes
//!
//! # Coordinate System
//!
//! Cabledraw uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! # Precision
//!
//! Intermediate arithmetic is kept exact in `f64`. Values that leave a layout
//! pass are rounded once with [`round2`].

use serde::{Deserialize, Serialize};

/// Rounds a coordinate to two decimal places.
///
/// Negative zero is normalized to positive zero so that serialized output
/// never carries a stray sign.
///
/// # Examples
///
/// ```
/// # use cabledraw_core::geometry::round2;
/// assert_eq!(round2(1.23456), 1.23);
/// assert_eq!(round2(2.005_1), 2.01);
/// assert!(round2(-0.001).is_sign_positive());
/// ```
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}

/// One of the two drawing axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A 2D point representing a position in drawing coordinate space.
///
/// # Examples
///
/// ```
/// # use cabledraw_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the coordinate along the given axis
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Checks if both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Moves the point by `delta` along a single axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cabledraw_core::geometry::{Axis, Point};
    /// let p = Point::new(1.0, 2.0).shift(Axis::Vertical, -4.0);
    /// assert_eq!(p, Point::new(1.0, -2.0));
    /// ```
    pub fn shift(self, axis: Axis, delta: f64) -> Self {
        match axis {
            Axis::Horizontal => self.with_x(self.x + delta),
            Axis::Vertical => self.with_y(self.y + delta),
        }
    }

    /// Returns the point with both coordinates passed through [`round2`]
    pub fn rounded(self) -> Self {
        Self {
            x: round2(self.x),
            y: round2(self.y),
        }
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the extent along the given axis
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns how far the two bounds penetrate each other along each axis.
    ///
    /// Returns `None` unless the interiors intersect on both axes. Boxes that
    /// merely share an edge do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cabledraw_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    /// let b = Bounds::new_from_top_left(Point::new(6.0, 8.0), Size::new(10.0, 10.0));
    /// let c = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
    ///
    /// assert_eq!(a.overlap(&b), Some(Size::new(4.0, 2.0)));
    /// assert_eq!(a.overlap(&c), None);
    /// ```
    pub fn overlap(&self, other: &Self) -> Option<Size> {
        let dx = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let dy = self.max_y.min(other.max_y) - self.min_y.max(other.min_y);
        (dx > 0.0 && dy > 0.0).then(|| Size::new(dx, dy))
    }

    /// Returns true if the interiors of the two bounds intersect
    pub fn intersects(&self, other: &Self) -> bool {
        self.overlap(other).is_some()
    }
}

/// An axis-aligned box given by its top-left corner and extents.
///
/// This is the shape emitted for connectors and the cable region. Serializes
/// as `{x, y, width, height}`.
///
/// # Examples
///
/// ```
/// # use cabledraw_core::geometry::Rect;
/// let rect = Rect::new(40.0, 35.0, 20.0, 15.0);
/// assert_eq!(rect.right(), 60.0);
/// assert_eq!(rect.bottom(), 50.0);
/// assert_eq!(rect.center_x(), 50.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the left edge
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the top edge
    pub fn y(self) -> f64 {
        self.y
    }

    pub fn width(self) -> f64 {
        self.width
    }

    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns the right edge (`x + width`)
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottom edge (`y + height`)
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Returns the horizontal center
    pub fn center_x(self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Returns the rectangle with every field passed through [`round2`]
    pub fn rounded(self) -> Self {
        Self {
            x: round2(self.x),
            y: round2(self.y),
            width: round2(self.width),
            height: round2(self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(42.5), 42.5);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(-1.0 / 3.0), -0.33);
        assert_eq!(round2(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_round2_normalizes_negative_zero() {
        let value = round2(-0.004);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_point_shift() {
        let point = Point::new(3.0, 4.0);
        assert_eq!(point.shift(Axis::Horizontal, 2.0), Point::new(5.0, 4.0));
        assert_eq!(point.shift(Axis::Vertical, -1.5), Point::new(3.0, 2.5));
    }

    #[test]
    fn test_point_along() {
        let point = Point::new(3.0, 4.0);
        assert_eq!(point.along(Axis::Horizontal), 3.0);
        assert_eq!(point.along(Axis::Vertical), 4.0);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_point_to_bounds() {
        let bounds = Point::new(10.0, 20.0).to_bounds(Size::new(6.0, 8.0));

        assert_eq!(bounds.min_x(), 7.0);
        assert_eq!(bounds.min_y(), 16.0);
        assert_eq!(bounds.max_x(), 13.0);
        assert_eq!(bounds.max_y(), 24.0);
    }

    #[test]
    fn test_bounds_new_from_center() {
        let center = Point::new(50.0, 60.0);
        let bounds = Bounds::new_from_center(center, Size::new(20.0, 30.0));

        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.min_y(), 45.0);
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.max_y(), 75.0);
        assert_eq!(bounds.center(), center);
    }

    #[test]
    fn test_bounds_overlap_identical() {
        let a = Point::new(0.0, 0.0).to_bounds(Size::new(40.0, 8.0));
        assert_eq!(a.overlap(&a), Some(Size::new(40.0, 8.0)));
    }

    #[test]
    fn test_bounds_overlap_contained() {
        let outer = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 100.0));
        let inner = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(5.0, 6.0));

        let overlap = outer.overlap(&inner).expect("contained box must overlap");
        assert_approx_eq!(f64, overlap.width(), 5.0);
        assert_approx_eq!(f64, overlap.height(), 6.0);
    }

    #[test]
    fn test_bounds_touching_edges_do_not_overlap() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let right = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
        let below = Bounds::new_from_top_left(Point::new(0.0, 10.0), Size::new(10.0, 10.0));

        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(60.0, 30.0, 280.0, 40.0);
        assert_eq!(rect.right(), 340.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.center_x(), 200.0);
    }

    #[test]
    fn test_rect_rounded() {
        let rect = Rect::new(1.0 / 3.0, 2.0 / 3.0, 10.004, 0.1 + 0.2).rounded();
        assert_eq!(rect, Rect::new(0.33, 0.67, 10.0, 0.3));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f64..1000.0,
            -1000.0f64..1000.0,
            1.0f64..500.0,
            1.0f64..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    fn coordinate_strategy() -> impl Strategy<Value = f64> {
        -100_000.0f64..100_000.0
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Overlap should be symmetric: a.overlap(b) == b.overlap(a).
    fn check_overlap_is_symmetric(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        prop_assert_eq!(b1.overlap(&b2), b2.overlap(&b1));
        Ok(())
    }

    /// Penetration depth never exceeds the smaller box on either axis.
    fn check_overlap_bounded_by_extents(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        if let Some(overlap) = b1.overlap(&b2) {
            prop_assert!(overlap.width() <= b1.width().min(b2.width()) + 1e-9);
            prop_assert!(overlap.height() <= b1.height().min(b2.height()) + 1e-9);
        }
        Ok(())
    }

    /// Rounding is idempotent and stays within half a hundredth.
    fn check_round2_is_idempotent(value: f64) -> Result<(), TestCaseError> {
        let once = round2(value);
        prop_assert_eq!(round2(once), once);
        prop_assert!(approx_eq!(f64, once, value, epsilon = 0.005 + 1e-9));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn overlap_is_symmetric(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_overlap_is_symmetric(b1, b2)?;
        }

        #[test]
        fn overlap_bounded_by_extents(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_overlap_bounded_by_extents(b1, b2)?;
        }

        #[test]
        fn round2_is_idempotent(value in coordinate_strategy()) {
            check_round2_is_idempotent(value)?;
        }
    }
}
