#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops;

/// Fixed point coordinate type, 1 unit = 1 micrometer.
pub type Coord = i64;

/// Number of coordinate units per millimeter.
pub const UNITS_PER_MM: f64 = 1000.0;

/// Convert millimeters into fixed point coordinate units.
#[inline]
pub fn mm_to_coord(mm: f64) -> Coord {
    (mm * UNITS_PER_MM).round() as Coord
}

/// Convert a squared-unit area (µm²) into mm².
#[inline]
pub fn area_to_mm2(area: f64) -> f64 {
    area * 1.0e-6
}

/// 2D point with fixed point integer coordinates.
///
/// Points are ordered by `x` then `y`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Point { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Point::new(0, 0)
    }

    #[inline]
    pub fn dot(&self, other: Point) -> Coord {
        self.x * other.x + self.y * other.y
    }

    /// Perpendicular dot product (z component of the 3D cross product).
    #[inline]
    pub fn cross(&self, other: Point) -> Coord {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length_squared(&self) -> Coord {
        self.dot(*self)
    }

    /// Squared length computed in floating point, no overflow for far apart points.
    #[inline]
    pub fn length_squared_f64(&self) -> f64 {
        let x = self.x as f64;
        let y = self.y as f64;
        x * x + y * y
    }

    /// Length rounded to the nearest coordinate unit.
    #[inline]
    pub fn length(&self) -> Coord {
        self.length_f64().round() as Coord
    }

    #[inline]
    pub fn length_f64(&self) -> f64 {
        self.length_squared_f64().sqrt()
    }

    /// Returns `true` if the vector length is at most `len`, checking the per axis bounds first.
    #[inline]
    pub fn shorter_than(&self, len: Coord) -> bool {
        if self.x > len || self.x < -len {
            return false;
        }
        if self.y > len || self.y < -len {
            return false;
        }
        self.length_squared() <= len * len
    }

    /// Vector with the same direction and the given `length`. A vector shorter than 1 unit maps
    /// to `(length, 0)`.
    #[inline]
    pub fn normal(&self, length: Coord) -> Point {
        let len = self.length();
        if len < 1 {
            return Point::new(length, 0);
        }
        *self * length / len
    }

    #[inline]
    pub fn turn_90_ccw(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Rotate counter clockwise about the origin by `angle` radians.
    #[inline]
    pub fn rotate(&self, angle: f64) -> Point {
        let (s, c) = angle.sin_cos();
        let x = self.x as f64;
        let y = self.y as f64;
        Point::new((c * x - s * y).round() as Coord, (s * x + c * y).round() as Coord)
    }

    /// Multiply by a floating point factor, rounding to the nearest unit.
    #[inline]
    pub fn scale_f64(&self, factor: f64) -> Point {
        Point::new(
            (self.x as f64 * factor).round() as Coord,
            (self.y as f64 * factor).round() as Coord,
        )
    }
}

impl From<(Coord, Coord)> for Point {
    #[inline]
    fn from(value: (Coord, Coord)) -> Self {
        Point::new(value.0, value.1)
    }
}

impl From<Point> for [f64; 2] {
    #[inline]
    fn from(p: Point) -> Self {
        [p.x as f64, p.y as f64]
    }
}

macro_rules! ImplPointOp {
    ($op_trait:ident, $op_func:ident, $assign_trait:ident, $assign_func:ident, $op:tt) => {
        impl ops::$op_trait<Point> for Point {
            type Output = Point;
            #[inline]
            fn $op_func(self, rhs: Point) -> Self::Output {
                Point::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl ops::$op_trait<&Point> for Point {
            type Output = Point;
            #[inline]
            fn $op_func(self, rhs: &Point) -> Self::Output {
                Point::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl ops::$assign_trait<Point> for Point {
            #[inline]
            fn $assign_func(&mut self, rhs: Point) {
                self.x = self.x $op rhs.x;
                self.y = self.y $op rhs.y;
            }
        }
    };
}

ImplPointOp!(Add, add, AddAssign, add_assign, +);
ImplPointOp!(Sub, sub, SubAssign, sub_assign, -);

macro_rules! ImplScalarOp {
    ($op_trait:ident, $op_func:ident, $op:tt) => {
        impl ops::$op_trait<Coord> for Point {
            type Output = Point;
            #[inline]
            fn $op_func(self, rhs: Coord) -> Self::Output {
                Point::new(self.x $op rhs, self.y $op rhs)
            }
        }
    };
}

ImplScalarOp!(Mul, mul, *);
ImplScalarOp!(Div, div, /);

impl ops::Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Self::Output {
        Point::new(-self.x, -self.y)
    }
}
