mod test_utils;

use slicer_geometry::{
    assert_fuzzy_eq,
    clipping::{JoinType, DEFAULT_MITER_LIMIT},
    core::{math::Point, traits::FuzzyEq},
    lines_set::Shape,
};
use test_utils::{
    create_property_set, init_logging, property_sets_match, shape_of, square, square_with_hole,
    PolygonProperties,
};

fn run_shape_offset_test(input: &Shape, offset: i64, expected: &[PolygonProperties]) {
    let result = input.offset(offset, JoinType::Miter, DEFAULT_MITER_LIMIT);
    let result_properties = create_property_set(&result);
    assert!(
        property_sets_match(&result_properties, expected),
        "result property sets do not match"
    );
}

macro_rules! declare_offset_tests {
    ($($name:ident { $($value:expr => $expected:expr),+ $(,)? })*) => {
        $(
            #[test]
            fn $name() {
                $(
                    run_shape_offset_test(&$value.0, $value.1, &$expected);
                )+
            }
        )+
    };
}

mod test_miter {
    use super::*;

    declare_offset_tests!(
        empty_returns_empty {
            (Shape::new(), 50) => []
        }
        square_grows {
            (shape_of([square(0, 0, 1000)]), 100) =>
            [PolygonProperties::new(4, 1_440_000.0, 4800, (-100, -100), (1100, 1100))]
        }
        square_shrinks {
            (shape_of([square(0, 0, 1000)]), -100) =>
            [PolygonProperties::new(4, 640_000.0, 3200, (100, 100), (900, 900))]
        }
        square_collapses {
            (shape_of([square(0, 0, 1000)]), -600) => []
        }
        hole_shrinks_when_growing {
            (square_with_hole(1000, 200), 50) =>
            [PolygonProperties::new(4, 1_210_000.0, 4400, (-50, -50), (1050, 1050)),
             PolygonProperties::new(4, -250_000.0, 2000, (250, 250), (750, 750))]
        }
        hole_closes {
            (square_with_hole(1000, 400), 150) =>
            [PolygonProperties::new(4, 1_690_000.0, 5200, (-150, -150), (1150, 1150))]
        }
    );
}

#[test]
fn zero_offset_keeps_polygons() {
    let shape = square_with_hole(1000, 200);
    let result = shape.offset(0, JoinType::Miter, DEFAULT_MITER_LIMIT);
    assert_eq!(result, shape);
}

#[test]
fn round_offset_bounds() {
    init_logging();
    let shape = shape_of([square(0, 0, 1000)]);
    let grown = shape.offset(100, JoinType::Round, DEFAULT_MITER_LIMIT);
    assert_eq!(grown.len(), 1);
    // between the square grown by its side bands and the mitered square
    assert!(grown.area() > 1000.0 * 1000.0 + 4.0 * 1000.0 * 100.0);
    assert!(grown.area() < 1200.0 * 1200.0);
    assert!(grown.inside(Point::new(-99, 500), false));
    assert!(!grown.inside(Point::new(-99, -99), true));
}

#[test]
fn offset_merges_close_polygons() {
    let shape = shape_of([square(0, 0, 1000), square(1100, 0, 1000)]);
    let grown = shape.offset(60, JoinType::Miter, DEFAULT_MITER_LIMIT);
    assert_eq!(grown.len(), 1);
    assert_fuzzy_eq!(grown.area(), 2220.0 * 1120.0);
}

#[test]
fn tube_around_region() {
    let shape = shape_of([square(0, 0, 1000)]);
    let tube = shape.create_tube_shape(100, 100);
    assert_eq!(tube.len(), 2);
    assert_fuzzy_eq!(tube.area(), 1_440_000.0 - 640_000.0);
    assert!(tube.inside(Point::new(-50, 500), false));
    assert!(!tube.inside(Point::new(500, 500), false));
}

#[test]
fn convex_hull_fills_notch() {
    let l_shape = shape_of([slicer_geometry::polygon![
        (0, 0),
        (2000, 0),
        (2000, 1000),
        (1000, 1000),
        (1000, 2000),
        (0, 2000)
    ]]);
    let hull = l_shape.approx_convex_hull(0);
    assert_eq!(hull.len(), 1);
    // a large but finite overshoot leaves the diagonal slightly curved
    assert!(hull.area() > 3_400_000.0);
    assert!(hull.area() < 3_600_000.0);
    assert!(hull.inside(Point::new(1400, 1400), false));

    let grown = l_shape.approx_convex_hull(100);
    assert!(grown.area() > hull.area());
}

#[test]
fn offset_multi_matches_uniform_offset() {
    let shape = shape_of([square(0, 0, 1000)]);
    let distances = vec![100; shape.point_count()];
    let result = shape.offset_multi(&distances);
    assert_eq!(result.len(), 1);
    // corners are cut straight between the moved segments
    assert!(result.area() > 1_000_000.0 + 4.0 * 100_000.0);
    assert!(result.area() <= 1_440_000.0);
}
