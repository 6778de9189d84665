//! Region operations on [Shape]: booleans, nesting decomposition and repair.
//!
//! A [Shape] is a set of filled contours describing a (possibly disjoint, possibly multiply
//! connected) region. Outer contours wind counter clockwise and holes clockwise as produced by
//! the boolean engine, but most operations accept any orientation and resolve the region with
//! the fill rule they document.
mod boolean;
mod nesting;
mod parts_view;
mod repair;
mod single_shape;

pub use parts_view::*;
pub use repair::{CONVEX_HULL_OVERSHOOT, MANIFOLD_DOT_SIZE, SELF_INTERSECTION_SCALE};
pub use single_shape::*;

use crate::{
    core::math::{point_lies_on_right_of_line, Coord, Point, PointContainment, PointMatrix},
    lines_set::Shape,
};

impl Shape {
    /// Sum of the signed areas of all polygons, holes (clockwise) count negative.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::lines_set::Shape;
    /// # use slicer_geometry::core::math::Point;
    /// let outline = vec![Point::new(0, 0), Point::new(10, 0), Point::new(10, 10), Point::new(0, 10)];
    /// let hole = vec![Point::new(2, 2), Point::new(2, 8), Point::new(8, 8), Point::new(8, 2)];
    /// let shape = Shape::from_paths(vec![outline, hole]);
    /// assert_eq!(shape.area(), 64.0);
    /// ```
    pub fn area(&self) -> f64 {
        self.iter().map(|poly| poly.area()).sum()
    }

    /// `true` if `point` is inside the region under the even-odd rule. A point on any contour
    /// returns `border_result`.
    pub fn inside(&self, point: Point, border_result: bool) -> bool {
        let mut count = 0;
        for poly in self.iter() {
            match poly.containment(point) {
                PointContainment::Inside => count += 1,
                PointContainment::OnBorder => return border_result,
                PointContainment::Outside => {}
            }
        }
        count % 2 == 1
    }

    /// Index of the innermost polygon enclosing `point`.
    ///
    /// A ray cast in the positive x direction is tested against every polygon, a polygon crossed
    /// an odd number of times encloses the point. Of those the one crossed closest to `point` is
    /// returned. `None` is returned when an even number of polygons enclose the point (it lies in
    /// a hole or outside) or the shape is empty. If `border_result` is true a polygon with
    /// `point` on its border is returned immediately.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::lines_set::Shape;
    /// # use slicer_geometry::core::math::Point;
    /// let outline = vec![Point::new(0, 0), Point::new(10, 0), Point::new(10, 10), Point::new(0, 10)];
    /// let hole = vec![Point::new(2, 2), Point::new(2, 8), Point::new(8, 8), Point::new(8, 2)];
    /// let shape = Shape::from_paths(vec![outline, hole]);
    /// assert_eq!(shape.find_inside(Point::new(1, 1), false), Some(0));
    /// assert_eq!(shape.find_inside(Point::new(5, 5), false), None);
    /// assert_eq!(shape.find_inside(Point::new(2, 5), true), Some(1));
    /// ```
    pub fn find_inside(&self, point: Point, border_result: bool) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let mut min_x = vec![Coord::MAX; self.len()];
        let mut crossings = vec![0usize; self.len()];

        for (poly_idx, poly) in self.iter().enumerate() {
            let Some(&last) = poly.last() else {
                continue;
            };
            let mut p0 = last;
            for &p1 in poly.iter() {
                match point_lies_on_right_of_line(point, p0, p1) {
                    1 => {
                        crossings[poly_idx] += 1;
                        let x = if p1.y == p0.y {
                            p0.x
                        } else {
                            p0.x + (p1.x - p0.x) * (point.y - p0.y) / (p1.y - p0.y)
                        };
                        min_x[poly_idx] = min_x[poly_idx].min(x);
                    }
                    0 if border_result => return Some(poly_idx),
                    _ => {}
                }
                p0 = p1;
            }
        }

        let mut result = None;
        let mut min_x_uneven = Coord::MAX;
        let mut n_unevens = 0;
        for (poly_idx, &count) in crossings.iter().enumerate() {
            if count % 2 == 1 {
                n_unevens += 1;
                if min_x[poly_idx] < min_x_uneven {
                    min_x_uneven = min_x[poly_idx];
                    result = Some(poly_idx);
                }
            }
        }

        if n_unevens % 2 == 0 {
            return None;
        }
        result
    }

    /// Scale all coordinates about the origin by `ratio`.
    pub fn scale(&mut self, ratio: f64) {
        if ratio == 1.0 {
            return;
        }
        self.apply_matrix(&PointMatrix::scale(ratio));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: Coord, y: Coord, size: Coord) -> Vec<Point> {
        vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ]
    }

    #[test]
    fn find_inside_picks_innermost_outline() {
        let mut hole = square(100, 100, 800);
        hole.reverse();
        let shape = Shape::from_paths(vec![
            square(0, 0, 1000),
            hole,
            square(300, 300, 400),
        ]);
        assert_eq!(shape.find_inside(Point::new(500, 500), false), Some(2));
        assert_eq!(shape.find_inside(Point::new(50, 500), false), Some(0));
        assert_eq!(shape.find_inside(Point::new(200, 500), false), None);
        assert_eq!(shape.find_inside(Point::new(2000, 500), false), None);
    }

    #[test]
    fn inside_uses_even_odd() {
        let shape = Shape::from_paths(vec![square(0, 0, 100), square(50, 0, 100)]);
        assert!(shape.inside(Point::new(25, 50), false));
        assert!(!shape.inside(Point::new(75, 50), false));
        assert!(shape.inside(Point::new(125, 50), false));
        assert!(shape.inside(Point::new(0, 50), true));
        assert!(!Shape::new().inside(Point::new(0, 0), true));
    }

    #[test]
    fn inside_on_hole_border_returns_border_result() {
        let mut hole = square(250, 250, 500);
        hole.reverse();
        let shape = Shape::from_paths(vec![square(0, 0, 1000), hole]);
        assert!(shape.inside(Point::new(250, 500), true));
        assert!(!shape.inside(Point::new(250, 500), false));
        assert!(shape.inside(Point::new(0, 500), true));
        assert!(!shape.inside(Point::new(0, 500), false));
        assert!(shape.inside(Point::new(100, 500), false));
        assert!(!shape.inside(Point::new(500, 500), true));
    }

    #[test]
    fn scale_multiplies_coordinates() {
        let mut shape = Shape::from_paths(vec![square(0, 0, 10)]);
        shape.scale(2.0);
        assert_eq!(shape.area(), 400.0);
    }
}
