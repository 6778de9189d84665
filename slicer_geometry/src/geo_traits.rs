//! Boundary to generic geometry code: per container traits describing point order, closure and
//! axis access, plus conversions to and from the [geo] crate types.
//!
//! Polygons crossing into `geo` are split into parts first (outline plus direct holes) since a
//! `geo::Polygon` carries its holes explicitly while a [Shape] only implies them through nesting.
use crate::{
    core::math::{Coord, Point},
    lines_set::Shape,
    polyline::{Polyline, PolylineKind},
    shape::SingleShape,
};
use geo::{LineString, MultiPolygon, Polygon};

/// Winding order of the points of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointOrder {
    Clockwise,
    CounterClockwise,
    /// Open lines have no winding.
    Unspecified,
}

/// Whether the last point of a closed container repeats the first point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Closure {
    /// Closing segment implied, the first point is not repeated.
    Open,
    /// The last point duplicates the first point.
    Closed,
}

/// Indexed view of a point container for generic geometry algorithms.
///
/// # Examples
///
/// ```
/// # use slicer_geometry::geo_traits::*;
/// # use slicer_geometry::polyline::Polyline;
/// # use slicer_geometry::core::math::Point;
/// let mut square = Polyline::polygon(vec![
///     Point::new(0, 0),
///     Point::new(10, 0),
///     Point::new(10, 10),
///     Point::new(0, 10),
/// ]);
/// assert_eq!(square.point_order(), PointOrder::CounterClockwise);
/// assert_eq!(square.closure(), Closure::Open);
/// assert_eq!(square.get(2, 1), 10);
/// square.set(2, 0, 20);
/// assert_eq!(square[2], Point::new(20, 10));
/// ```
pub trait PointContainer {
    /// Coordinate type of each axis.
    type Scalar: Copy;

    /// Number of axes of each point.
    const DIMENSION: usize = 2;

    fn point_order(&self) -> PointOrder;

    fn closure(&self) -> Closure;

    fn point_count(&self) -> usize;

    /// Coordinate of point `index` along `axis` (0 is x, 1 is y).
    fn get(&self, index: usize, axis: usize) -> Self::Scalar;

    fn set(&mut self, index: usize, axis: usize, value: Self::Scalar);
}

impl PointContainer for Polyline {
    type Scalar = Coord;

    fn point_order(&self) -> PointOrder {
        if !self.is_closed() {
            return PointOrder::Unspecified;
        }
        if self.orientation() {
            PointOrder::CounterClockwise
        } else {
            PointOrder::Clockwise
        }
    }

    #[inline]
    fn closure(&self) -> Closure {
        if self.kind() == PolylineKind::ExplicitlyClosed {
            Closure::Closed
        } else {
            Closure::Open
        }
    }

    #[inline]
    fn point_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn get(&self, index: usize, axis: usize) -> Coord {
        debug_assert!(axis < Self::DIMENSION, "axis out of range");
        let p = self[index];
        if axis == 0 { p.x } else { p.y }
    }

    #[inline]
    fn set(&mut self, index: usize, axis: usize, value: Coord) {
        debug_assert!(axis < Self::DIMENSION, "axis out of range");
        let p = &mut self[index];
        if axis == 0 {
            p.x = value;
        } else {
            p.y = value;
        }
    }
}

impl From<Point> for geo::Coord<f64> {
    #[inline]
    fn from(p: Point) -> Self {
        geo::Coord {
            x: p.x as f64,
            y: p.y as f64,
        }
    }
}

impl From<geo::Coord<f64>> for Point {
    /// Rounds to the nearest unit.
    #[inline]
    fn from(c: geo::Coord<f64>) -> Self {
        Point::new(c.x.round() as Coord, c.y.round() as Coord)
    }
}

/// Line string through the points, closed rings get their first point repeated at the end.
pub fn to_line_string(polyline: &Polyline) -> LineString<f64> {
    let mut line: LineString<f64> = polyline.iter().map(|&p| geo::Coord::from(p)).collect();
    if polyline.is_closed() {
        line.close();
    }
    line
}

/// Implicitly closed ring of the line string, the repeated end point is dropped.
fn ring_points(line: &LineString<f64>) -> Vec<Point> {
    let mut points: Vec<Point> = line.coords().map(|&c| Point::from(c)).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

impl SingleShape {
    /// Outline and holes as a `geo` polygon, `None` if there is no outline.
    pub fn to_geo(&self) -> Option<Polygon<f64>> {
        let outline = self.outline()?;
        let holes = self.holes().iter().map(to_line_string).collect();
        Some(Polygon::new(to_line_string(outline), holes))
    }
}

impl Shape {
    /// Region as a `geo` multi polygon, see [Shape::split_into_parts] for how parts are formed
    /// (even-odd).
    pub fn to_geo(&self) -> MultiPolygon<f64> {
        self.split_into_parts(false)
            .iter()
            .filter_map(SingleShape::to_geo)
            .collect()
    }

    /// All rings of all polygons of `multi_polygon`, rounded to the nearest unit. Rings left with
    /// less than 3 points are dropped.
    pub fn from_geo(multi_polygon: &MultiPolygon<f64>) -> Shape {
        let mut result = Shape::new();
        for polygon in multi_polygon {
            let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
            for ring in rings {
                let points = ring_points(ring);
                if points.len() >= 3 {
                    result.push_points(points);
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: Coord, size: Coord) -> Vec<Point> {
        vec![
            Point::new(x, x),
            Point::new(x + size, x),
            Point::new(x + size, x + size),
            Point::new(x, x + size),
        ]
    }

    #[test]
    fn closure_and_order() {
        let mut ring = Polyline::closed(square(0, 10));
        ring.reverse();
        assert_eq!(ring.point_order(), PointOrder::Clockwise);
        assert_eq!(ring.closure(), Closure::Open);

        let open = Polyline::open(square(0, 10));
        assert_eq!(open.point_order(), PointOrder::Unspecified);

        let mut explicit = square(0, 10);
        explicit.push(explicit[0]);
        let explicit = Polyline::from_points(explicit, PolylineKind::ExplicitlyClosed);
        assert_eq!(explicit.closure(), Closure::Closed);
        assert_eq!(to_line_string(&explicit).0.len(), 5);
    }

    #[test]
    fn geo_round_trip_keeps_holes() {
        let mut hole = square(20, 60);
        hole.reverse();
        let shape = Shape::from_paths(vec![square(0, 100), hole]);
        let multi_polygon = shape.to_geo();
        assert_eq!(multi_polygon.0.len(), 1);
        assert_eq!(multi_polygon.0[0].interiors().len(), 1);

        let back = Shape::from_geo(&multi_polygon);
        assert_eq!(back.len(), 2);
        assert_eq!(back.iter().map(|p| p.len()).collect::<Vec<_>>(), vec![4, 4]);
        assert_eq!(back.area(), shape.area());
    }
}
