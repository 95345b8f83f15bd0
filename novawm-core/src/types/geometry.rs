//! Geometric primitives: points, sizes, and rectangles.
//!
//! The toolkit uses `Point<f64>` for pointer positions and `Rect<i32>` for
//! element and output geometry.

use num_traits::{Num, Zero};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point with generic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Num + Copy",
    deserialize = "T: Deserialize<'de> + Num + Copy"
))]
pub struct Point<T: Num + Copy> {
    /// The x-coordinate of the point.
    pub x: T,
    /// The y-coordinate of the point.
    pub y: T,
}

impl<T: Num + Copy + Eq> Eq for Point<T> {}

impl<T: Num + Copy> Point<T> {
    /// Creates a new point with the given coordinates.
    pub const fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

impl<T: Num + Copy> Add for Point<T> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Num + Copy> Sub for Point<T> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// A 2D size (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Num + Copy",
    deserialize = "T: Deserialize<'de> + Num + Copy"
))]
pub struct Size<T: Num + Copy> {
    /// The width component of the size.
    pub width: T,
    /// The height component of the size.
    pub height: T,
}

impl<T: Num + Copy + Eq> Eq for Size<T> {}

impl<T: Num + Copy> Size<T> {
    /// Creates a new size with the given width and height.
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }

    /// Checks if the area is zero (width or height is zero).
    pub fn is_empty(&self) -> bool
    where
        T: Zero,
    {
        self.width.is_zero() || self.height.is_zero()
    }
}

/// A 2D rectangle defined by an origin point and a size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Num + Copy",
    deserialize = "T: Deserialize<'de> + Num + Copy"
))]
pub struct Rect<T: Num + Copy> {
    /// The origin point (top-left corner) of the rectangle.
    pub origin: Point<T>,
    /// The size (width and height) of the rectangle.
    pub size: Size<T>,
}

impl<T: Num + Copy + Eq> Eq for Rect<T> {}

impl<T: Num + Copy> Rect<T> {
    /// Creates a new rectangle from an origin point and a size.
    pub const fn new(origin: Point<T>, size: Size<T>) -> Self {
        Rect { origin, size }
    }

    /// Creates a new rectangle from individual coordinate and dimension values.
    pub const fn from_coords(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Creates the rectangle spanning `left..right` and `top..bottom`.
    pub fn from_extents(left: T, top: T, right: T, bottom: T) -> Self {
        Rect::from_coords(left, top, right - left, bottom - top)
    }

    pub fn x(&self) -> T {
        self.origin.x
    }

    pub fn y(&self) -> T {
        self.origin.y
    }

    pub fn width(&self) -> T {
        self.size.width
    }

    pub fn height(&self) -> T {
        self.size.height
    }

    pub fn left(&self) -> T {
        self.origin.x
    }

    pub fn top(&self) -> T {
        self.origin.y
    }

    /// The x-coordinate of the right edge (exclusive).
    pub fn right(&self) -> T {
        self.origin.x + self.size.width
    }

    /// The y-coordinate of the bottom edge (exclusive).
    pub fn bottom(&self) -> T {
        self.origin.y + self.size.height
    }

    /// Checks if a point lies within the rectangle. Left and top edges are
    /// inclusive, right and bottom edges exclusive.
    pub fn contains_point(&self, point: &Point<T>) -> bool
    where
        T: PartialOrd,
    {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Checks if this rectangle overlaps another one.
    pub fn intersects(&self, other: &Rect<T>) -> bool
    where
        T: PartialOrd,
    {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// The smallest rectangle containing both this and `other`.
    ///
    /// Empty rectangles contribute nothing, wherever they are placed.
    pub fn union(&self, other: &Rect<T>) -> Rect<T>
    where
        T: PartialOrd,
    {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let x1 = if self.left() < other.left() { self.left() } else { other.left() };
        let y1 = if self.top() < other.top() { self.top() } else { other.top() };
        let x2 = if self.right() > other.right() { self.right() } else { other.right() };
        let y2 = if self.bottom() > other.bottom() { self.bottom() } else { other.bottom() };
        Rect::from_extents(x1, y1, x2, y2)
    }

    /// Returns this rectangle moved by `delta`.
    pub fn translated(&self, delta: &Point<T>) -> Rect<T> {
        Rect::new(self.origin + *delta, self.size)
    }

    /// True if width or height is zero.
    pub fn is_empty(&self) -> bool
    where
        T: Zero,
    {
        self.size.is_empty()
    }
}

impl Rect<i32> {
    /// Converts to `f64` coordinates, for hit-testing pointer positions.
    pub fn to_f64(&self) -> Rect<f64> {
        Rect::from_coords(
            f64::from(self.x()),
            f64::from(self.y()),
            f64::from(self.width()),
            f64::from(self.height()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, true)]
    #[case(9.999, 19.999, true)]
    #[case(10.0, 5.0, false)]
    #[case(5.0, 20.0, false)]
    #[case(-0.1, 5.0, false)]
    fn test_rect_contains_point_edges(#[case] x: f64, #[case] y: f64, #[case] inside: bool) {
        let rect = Rect::from_coords(0.0, 0.0, 10.0, 20.0);
        assert_eq!(rect.contains_point(&Point::new(x, y)), inside);
    }

    #[test]
    fn test_rect_extents() {
        let rect = Rect::from_coords(10, 20, 30, 40);
        assert_eq!((rect.left(), rect.top(), rect.right(), rect.bottom()), (10, 20, 40, 60));
        assert_eq!(Rect::from_extents(10, 20, 40, 60), rect);
    }

    #[test]
    fn test_rect_union_and_intersects() {
        let a = Rect::from_coords(0, 0, 1024, 768);
        let b = Rect::from_coords(1024, 0, 1920, 1080);
        assert!(!a.intersects(&b));
        assert_eq!(a.union(&b), Rect::from_coords(0, 0, 2944, 1080));
    }

    #[test]
    fn test_rect_union_skips_empty_operands() {
        let a = Rect::from_coords(10, 10, 5, 5);
        let far_away = Rect::from_coords(-100, 200, 0, 0);
        assert_eq!(a.union(&far_away), a);
        assert_eq!(far_away.union(&a), a);
        assert_eq!(far_away.union(&far_away), far_away);
    }

    #[test]
    fn test_rect_translated_and_to_f64() {
        let rect = Rect::from_coords(1, 2, 3, 4).translated(&Point::new(10, 10));
        assert_eq!(rect, Rect::from_coords(11, 12, 3, 4));
        assert_eq!(rect.to_f64(), Rect::from_coords(11.0, 12.0, 3.0, 4.0));
        assert!(Rect::from_coords(0, 0, 0, 5).is_empty());
    }
}
