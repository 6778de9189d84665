use slicer_geometry::{
    core::math::{Coord, Point},
    lines_set::Shape,
    polyline::Polyline,
};

/// Counter clockwise axis aligned rectangle with its lower left corner at (`x`, `y`).
pub fn rect_points(x: Coord, y: Coord, width: Coord, height: Coord) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + width, y),
        Point::new(x + width, y + height),
        Point::new(x, y + height),
    ]
}

/// Counter clockwise square polygon.
pub fn square(x: Coord, y: Coord, size: Coord) -> Polyline {
    Polyline::polygon(rect_points(x, y, size, size))
}

/// Clockwise square polygon (a hole).
pub fn square_hole(x: Coord, y: Coord, size: Coord) -> Polyline {
    let mut points = rect_points(x, y, size, size);
    points.reverse();
    Polyline::polygon(points)
}

pub fn shape_of<I>(polygons: I) -> Shape
where
    I: IntoIterator<Item = Polyline>,
{
    polygons.into_iter().collect()
}

/// Square from 0 to `size` with a square hole from `margin` to `size - margin`.
pub fn square_with_hole(size: Coord, margin: Coord) -> Shape {
    shape_of([
        square(0, 0, size),
        square_hole(margin, margin, size - 2 * margin),
    ])
}
