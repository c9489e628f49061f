//! Geometry types for cell-grid positioning and clipping.
//!
//! This module provides the two primitives every drawing operation is built on:
//! - [`Point`]: a 2D integer point, also used as a 2D size
//! - [`Rect`]: a rectangle made of a position and a (possibly negative) size
//!
//! All operations are pure and allocation-free. Arithmetic saturates instead of
//! overflowing, and division by zero yields zero, so no geometry call can panic.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A 2D point with signed integer coordinates.
///
/// Points order by `x` first, then `y`.
///
/// # Examples
///
/// ```
/// use cellgrid_core::geometry::Point;
///
/// let p1 = Point::new(10, 20);
/// let p2 = Point::new(5, 5);
///
/// assert_eq!(p1 + p2, Point::new(15, 25));
/// assert_eq!(p1 - p2, Point::new(5, 15));
/// assert_eq!(p2 * 2, Point::new(10, 10));
/// assert_eq!(-p2, Point::new(-5, -5));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Point {
    /// The x coordinate (column position).
    pub x: i32,
    /// The y coordinate (row position).
    pub y: i32,
}

impl Point {
    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// The point (1, 1).
    pub const ONE: Self = Self { x: 1, y: 1 };

    /// Creates a new point at the given coordinates.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point offset by the given amounts.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Returns the component-wise absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Self {
            x: self.x.saturating_abs(),
            y: self.y.saturating_abs(),
        }
    }

    /// Clamps this point component-wise between `min` and `max`.
    ///
    /// Never panics; when `min > max` on an axis, `max` wins.
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Returns the component-wise minimum of two points.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Returns the component-wise maximum of two points.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x.saturating_sub(rhs.x),
            y: self.y.saturating_sub(rhs.y),
        }
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for Point {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self::Output {
        Self {
            x: self.x.saturating_mul(rhs),
            y: self.y.saturating_mul(rhs),
        }
    }
}

impl Div<i32> for Point {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self::Output {
        Self {
            x: self.x.checked_div(rhs).unwrap_or(0),
            y: self.y.checked_div(rhs).unwrap_or(0),
        }
    }
}

impl Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: self.x.saturating_neg(),
            y: self.y.saturating_neg(),
        }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// A rectangle defined by a position and a size.
///
/// The size may be negative on either axis, describing a rectangle that
/// extends left of or above its position. The corner accessors normalize
/// this, so `top_left()` is always component-wise less than or equal to
/// `bottom_right()`. The bottom-right corner is exclusive.
///
/// ```text
/// (0,0) ──────► x
///   │
///   │
///   ▼
///   y
/// ```
///
/// # Examples
///
/// ```
/// use cellgrid_core::geometry::{Point, Rect};
///
/// let rect = Rect::new(10, 5, -4, 3);
/// assert_eq!(rect.top_left(), Point::new(6, 5));
/// assert_eq!(rect.bottom_right(), Point::new(10, 8));
///
/// let other = Rect::new(8, 6, 10, 10);
/// assert_eq!(rect.intersect(other), Rect::new(8, 6, 2, 2));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Rect {
    /// The anchor position.
    pub position: Point,
    /// The signed extent from the anchor.
    pub size: Point,
}

impl Rect {
    /// The canonical zero rectangle at the origin.
    pub const ZERO: Self = Self {
        position: Point::ZERO,
        size: Point::ZERO,
    };

    /// Creates a new rectangle from coordinates and a signed size.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: Point::new(x, y),
            size: Point::new(width, height),
        }
    }

    /// Creates a rectangle from a position and a size.
    #[inline]
    pub const fn from_parts(position: Point, size: Point) -> Self {
        Self { position, size }
    }

    /// Creates a rectangle at the origin with the given size.
    #[inline]
    pub const fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// The x coordinate of the anchor.
    #[inline]
    pub const fn x(&self) -> i32 {
        self.position.x
    }

    /// The y coordinate of the anchor.
    #[inline]
    pub const fn y(&self) -> i32 {
        self.position.y
    }

    /// The signed width.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.size.x
    }

    /// The signed height.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.size.y
    }

    /// Returns the top-left corner, normalized for negative size.
    #[inline]
    pub const fn top_left(&self) -> Point {
        Point::new(
            if self.size.x < 0 {
                self.position.x.saturating_add(self.size.x)
            } else {
                self.position.x
            },
            if self.size.y < 0 {
                self.position.y.saturating_add(self.size.y)
            } else {
                self.position.y
            },
        )
    }

    /// Returns the top-right corner, normalized for negative size.
    #[inline]
    pub const fn top_right(&self) -> Point {
        Point::new(self.bottom_right().x, self.top_left().y)
    }

    /// Returns the bottom-left corner, normalized for negative size.
    #[inline]
    pub const fn bottom_left(&self) -> Point {
        Point::new(self.top_left().x, self.bottom_right().y)
    }

    /// Returns the exclusive bottom-right corner, normalized for negative size.
    #[inline]
    pub const fn bottom_right(&self) -> Point {
        Point::new(
            if self.size.x < 0 {
                self.position.x
            } else {
                self.position.x.saturating_add(self.size.x)
            },
            if self.size.y < 0 {
                self.position.y
            } else {
                self.position.y.saturating_add(self.size.y)
            },
        )
    }

    /// Returns the equivalent rectangle with non-negative size.
    #[inline]
    pub fn normalized(&self) -> Self {
        let top_left = self.top_left();
        Self::from_parts(top_left, self.bottom_right() - top_left)
    }

    /// Returns whether the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size.x == 0 || self.size.y == 0
    }

    /// Returns the number of cells covered.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.size.x.unsigned_abs()) * u64::from(self.size.y.unsigned_abs())
    }

    /// Returns whether the point lies inside the rectangle.
    ///
    /// The top-left edge is inclusive and the bottom-right edge exclusive.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        let top_left = self.top_left();
        let bottom_right = self.bottom_right();
        point.x >= top_left.x
            && point.x < bottom_right.x
            && point.y >= top_left.y
            && point.y < bottom_right.y
    }

    /// Returns whether the two rectangles share at least one cell.
    ///
    /// Rectangles that only touch at an edge do not collide, and a
    /// zero-width or zero-height rectangle never collides.
    #[inline]
    pub fn collides(&self, other: Self) -> bool {
        let (min, max) = self.overlap(other);
        min.x < max.x && min.y < max.y
    }

    /// Returns the overlapping rectangle, or [`Rect::ZERO`] when the
    /// rectangles do not collide.
    ///
    /// The result is always normalized and the operation is symmetric.
    #[inline]
    pub fn intersect(&self, other: Self) -> Self {
        let (min, max) = self.overlap(other);
        if min.x < max.x && min.y < max.y {
            Self::from_parts(min, max - min)
        } else {
            Self::ZERO
        }
    }

    #[inline]
    fn overlap(&self, other: Self) -> (Point, Point) {
        (
            self.top_left().max(other.top_left()),
            self.bottom_right().min(other.bottom_right()),
        )
    }

    /// Returns the rectangle moved by `offset`.
    #[inline]
    pub fn translate(&self, offset: Point) -> Self {
        Self::from_parts(self.position + offset, self.size)
    }

    /// Returns the rectangle shrunk by `amount` cells on every side.
    ///
    /// The size never drops below zero.
    #[inline]
    pub fn inset(&self, amount: i32) -> Self {
        let normalized = self.normalized();
        Self::from_parts(
            normalized.position.offset(amount, amount),
            (normalized.size - Point::new(amount, amount) * 2).max(Point::ZERO),
        )
    }

    /// Returns the component-wise minimum of position and size.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::from_parts(self.position.min(other.position), self.size.min(other.size))
    }

    /// Returns the component-wise maximum of position and size.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::from_parts(self.position.max(other.position), self.size.max(other.size))
    }

    /// Clamps position and size component-wise between `min` and `max`.
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }
}

impl Add for Rect {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::from_parts(self.position + rhs.position, self.size + rhs.size)
    }
}

impl Sub for Rect {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_parts(self.position - rhs.position, self.size - rhs.size)
    }
}

impl Mul<i32> for Rect {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self::Output {
        Self::from_parts(self.position * rhs, self.size * rhs)
    }
}

impl Div<i32> for Rect {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self::Output {
        Self::from_parts(self.position / rhs, self.size / rhs)
    }
}

impl Neg for Rect {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::from_parts(-self.position, -self.size)
    }
}
