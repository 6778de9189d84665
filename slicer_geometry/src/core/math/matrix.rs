use super::{Coord, Point};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row major 2x2 matrix applied to fixed point coordinates (rotation, uniform scale).
///
/// Results are rounded to the nearest coordinate unit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointMatrix {
    pub matrix: [f64; 4],
}

impl Default for PointMatrix {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl PointMatrix {
    #[inline]
    pub const fn identity() -> Self {
        PointMatrix {
            matrix: [1.0, 0.0, 0.0, 1.0],
        }
    }

    /// Counter clockwise rotation by `degrees`. [PointMatrix::unapply] reverts it.
    pub fn from_rotation_degrees(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        PointMatrix {
            matrix: [c, -s, s, c],
        }
    }

    /// Matrix that maps `direction` onto the positive x axis.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::core::math::*;
    /// let m = PointMatrix::from_direction(Point::new(0, 100));
    /// assert_eq!(m.apply(Point::new(0, 100)), Point::new(100, 0));
    /// assert_eq!(m.unapply(Point::new(100, 0)), Point::new(0, 100));
    /// ```
    pub fn from_direction(direction: Point) -> Self {
        let x = direction.x as f64;
        let y = direction.y as f64;
        let f = (x * x + y * y).sqrt();
        if f == 0.0 {
            return Self::identity();
        }
        let (x, y) = (x / f, y / f);
        PointMatrix {
            matrix: [x, y, -y, x],
        }
    }

    #[inline]
    pub fn scale(s: f64) -> Self {
        PointMatrix {
            matrix: [s, 0.0, 0.0, s],
        }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        let m = &self.matrix;
        let x = p.x as f64;
        let y = p.y as f64;
        Point::new(
            (x * m[0] + y * m[1]).round() as Coord,
            (x * m[2] + y * m[3]).round() as Coord,
        )
    }

    /// Apply the transpose. Only the inverse of [PointMatrix::apply] for rotation matrices.
    #[inline]
    pub fn unapply(&self, p: Point) -> Point {
        let m = &self.matrix;
        let x = p.x as f64;
        let y = p.y as f64;
        Point::new(
            (x * m[0] + y * m[2]).round() as Coord,
            (x * m[1] + y * m[3]).round() as Coord,
        )
    }

    pub fn inverse(&self) -> Self {
        let m = &self.matrix;
        let det = m[0] * m[3] - m[1] * m[2];
        PointMatrix {
            matrix: [m[3] / det, -m[1] / det, -m[2] / det, m[0] / det],
        }
    }
}

/// Row major 3x3 homogeneous matrix for affine transforms of fixed point coordinates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point3Matrix {
    pub matrix: [f64; 9],
}

impl Default for Point3Matrix {
    #[inline]
    fn default() -> Self {
        Self::identity()
    }
}

impl From<PointMatrix> for Point3Matrix {
    #[inline]
    fn from(value: PointMatrix) -> Self {
        Point3Matrix::from_point_matrix(&value)
    }
}

impl Point3Matrix {
    #[inline]
    pub const fn identity() -> Self {
        Point3Matrix {
            matrix: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// Upper left 2x2 block from `b`, identity elsewhere.
    pub fn from_point_matrix(b: &PointMatrix) -> Self {
        let m = &b.matrix;
        Point3Matrix {
            matrix: [m[0], m[1], 0.0, m[2], m[3], 0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn translate(p: Point) -> Self {
        let mut ret = Self::identity();
        ret.matrix[2] = p.x as f64;
        ret.matrix[5] = p.y as f64;
        ret
    }

    #[inline]
    pub fn scale(s: f64) -> Self {
        Self::from_point_matrix(&PointMatrix::scale(s))
    }

    /// Rotation by `degrees` about `middle`.
    pub fn rotate_around(middle: Point, degrees: f64) -> Self {
        let rotation = Self::from_point_matrix(&PointMatrix::from_rotation_degrees(degrees));
        Self::translate(middle)
            .compose(&rotation)
            .compose(&Self::translate(-middle))
    }

    /// Matrix product `self * b`, so `b` is applied first.
    pub fn compose(&self, b: &Point3Matrix) -> Self {
        let mut matrix = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                matrix[row * 3 + col] = (0..3)
                    .map(|i| self.matrix[row * 3 + i] * b.matrix[i * 3 + col])
                    .sum();
            }
        }
        Point3Matrix { matrix }
    }

    /// Apply to `p` as the homogeneous coordinate `(x, y, 1)`.
    pub fn apply(&self, p: Point) -> Point {
        let m = &self.matrix;
        let x = p.x as f64;
        let y = p.y as f64;
        let rx = (x * m[0] + y * m[1] + m[2]).round() as Coord;
        let ry = (x * m[3] + y * m[4] + m[5]).round() as Coord;
        let rz = (x * m[6] + y * m[7] + m[8]).round() as Coord;
        debug_assert!(rz != 0, "degenerate homogeneous transform");
        if rz == 0 {
            return Point::new(rx, ry);
        }
        Point::new(rx / rz, ry / rz)
    }
}
