use crate::core::math::{Point, Point3Matrix, PointMatrix};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Ordered, mutable sequence of points. Base storage of every line like type, no closure is
/// implied by the storage itself.
///
/// Dereferences to `Vec<Point>` so the usual vector operations (`push`, `pop`, `insert`,
/// `remove`, `resize`, indexing, slicing) are available directly. Out of range indexes panic.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct PointsSet {
    points: Vec<Point>,
}

impl PointsSet {
    #[inline]
    pub fn new() -> Self {
        PointsSet { points: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        PointsSet {
            points: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn from_vec(points: Vec<Point>) -> Self {
        PointsSet { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn points_mut(&mut self) -> &mut Vec<Point> {
        &mut self.points
    }

    #[inline]
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Point> {
        self.points
    }

    /// Point at `index`, debug asserts the index is in bounds.
    #[inline]
    pub fn at(&self, index: usize) -> Point {
        debug_assert!(
            index < self.points.len(),
            "index {index} out of bounds for {} points",
            self.points.len()
        );
        self.points[index]
    }

    /// Move every point by `delta`.
    pub fn translate(&mut self, delta: Point) {
        if delta == Point::zero() {
            return;
        }
        for p in self.points.iter_mut() {
            *p += delta;
        }
    }

    pub fn apply_matrix(&mut self, matrix: &PointMatrix) {
        for p in self.points.iter_mut() {
            *p = matrix.apply(*p);
        }
    }

    pub fn apply_matrix3(&mut self, matrix: &Point3Matrix) {
        for p in self.points.iter_mut() {
            *p = matrix.apply(*p);
        }
    }

    /// Axis aligned bounding box as `(min, max)`, `None` if empty.
    pub fn extents(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().skip(1).fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }
}

impl Deref for PointsSet {
    type Target = Vec<Point>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl DerefMut for PointsSet {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.points
    }
}

impl From<Vec<Point>> for PointsSet {
    #[inline]
    fn from(points: Vec<Point>) -> Self {
        PointsSet { points }
    }
}

impl FromIterator<Point> for PointsSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        PointsSet {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PointsSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_and_extents() {
        let mut set: PointsSet = vec![Point::new(0, 0), Point::new(10, -5)].into();
        set.translate(Point::new(5, 5));
        assert_eq!(set.points(), &[Point::new(5, 5), Point::new(15, 0)]);
        assert_eq!(set.extents(), Some((Point::new(5, 0), Point::new(15, 5))));
        assert_eq!(PointsSet::new().extents(), None);
    }

    #[test]
    fn vector_operations_through_deref() {
        let mut set = PointsSet::new();
        set.push(Point::new(1, 1));
        set.push(Point::new(3, 3));
        set.insert(1, Point::new(2, 2));
        assert_eq!(set.len(), 3);
        assert_eq!(set.at(1), Point::new(2, 2));
        set.remove(0);
        set.resize(4, Point::zero());
        assert_eq!(set[3], Point::zero());
    }

    #[test]
    fn matrix_scale() {
        let mut set: PointsSet = vec![Point::new(10, 20)].into();
        set.apply_matrix(&PointMatrix::scale(2.0));
        assert_eq!(set[0], Point::new(20, 40));
        set.apply_matrix3(&Point3Matrix::translate(Point::new(1, 1)));
        assert_eq!(set[0], Point::new(21, 41));
    }
}
