use crate::{
    core::math::Point,
    lines_set::Shape,
    polyline::Polyline,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// One outline polygon followed by the holes directly inside of it.
///
/// The layout is established by whoever builds the value (e.g. `Shape::split_into_parts`) and
/// is not checked.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SingleShape {
    shape: Shape,
}

impl SingleShape {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `shape`, its first polygon is taken as the outline and the rest as holes.
    #[inline]
    pub fn from_shape(shape: Shape) -> Self {
        Self { shape }
    }

    #[inline]
    pub fn into_shape(self) -> Shape {
        self.shape
    }

    #[inline]
    pub fn outline(&self) -> Option<&Polyline> {
        self.shape.first()
    }

    #[inline]
    pub fn holes(&self) -> &[Polyline] {
        self.shape.get(1..).unwrap_or(&[])
    }

    /// `true` if `point` is inside the outline and inside none of the holes. `border_result` is
    /// used for points exactly on a contour.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::lines_set::Shape;
    /// # use slicer_geometry::shape::SingleShape;
    /// # use slicer_geometry::core::math::Point;
    /// let square = |x: i64, size: i64| {
    ///     vec![Point::new(x, x), Point::new(x + size, x), Point::new(x + size, x + size), Point::new(x, x + size)]
    /// };
    /// let mut hole = square(20, 60);
    /// hole.reverse();
    /// let part = SingleShape::from_shape(Shape::from_paths(vec![square(0, 100), hole]));
    ///
    /// assert!(part.inside(Point::new(10, 10), false));
    /// assert!(!part.inside(Point::new(50, 50), false));
    /// assert!(!part.inside(Point::new(150, 50), false));
    /// ```
    pub fn inside(&self, point: Point, border_result: bool) -> bool {
        let Some(outline) = self.outline() else {
            return false;
        };
        if !outline.inside(point, border_result) {
            return false;
        }

        // a point on a hole border is on the border of the part
        self.holes()
            .iter()
            .all(|hole| !hole.inside(point, !border_result))
    }
}

impl Deref for SingleShape {
    type Target = Shape;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.shape
    }
}

impl DerefMut for SingleShape {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.shape
    }
}

impl From<SingleShape> for Shape {
    #[inline]
    fn from(value: SingleShape) -> Self {
        value.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hole_border_uses_border_result() {
        let outline = vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 100),
        ];
        let hole = vec![
            Point::new(25, 25),
            Point::new(25, 75),
            Point::new(75, 75),
            Point::new(75, 25),
        ];
        let part = SingleShape::from_shape(Shape::from_paths(vec![outline, hole]));
        let on_hole_border = Point::new(25, 50);
        assert!(part.inside(on_hole_border, true));
        assert!(!part.inside(on_hole_border, false));
        assert_eq!(part.holes().len(), 1);
    }

    #[test]
    fn empty_part_contains_nothing() {
        let part = SingleShape::new();
        assert!(part.outline().is_none());
        assert!(part.holes().is_empty());
        assert!(!part.inside(Point::new(0, 0), true));
    }
}
