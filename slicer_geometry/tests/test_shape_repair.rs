mod test_utils;

use slicer_geometry::{
    assert_fuzzy_eq,
    core::{
        math::{point_is_left_of_line, Point},
        traits::FuzzyEq,
    },
    lines_set::Shape,
    polygon,
    polyline::DEFAULT_MAX_DEVIATION_ANGLE,
};
use test_utils::{
    cycle_start_index_forward, init_logging, shape_of, square, square_hole, square_with_hole,
};

fn l_shape() -> Shape {
    shape_of([polygon![
        (0, 0),
        (2000, 0),
        (2000, 1000),
        (1000, 1000),
        (1000, 2000),
        (0, 2000)
    ]])
}

#[test]
fn make_convex_of_l_shape() {
    let input = l_shape();
    let mut hull = input.clone();
    hull.make_convex();

    assert_eq!(hull.len(), 1);
    assert_eq!(hull[0].len(), 5);
    assert_fuzzy_eq!(hull.area(), 4_000_000.0 - 500_000.0);

    // counter clockwise with every turn to the left
    let points = hull[0].points();
    let n = points.len();
    for i in 0..n {
        let (a, b, c) = (points[i], points[(i + 1) % n], points[(i + 2) % n]);
        assert!(point_is_left_of_line(c, a, b) > 0);
    }

    // made of input points and covering all of them
    for p in points {
        assert!(input[0].contains(p));
    }
    for p in input[0].iter() {
        assert!(hull.inside(*p, true));
    }
}

#[test]
fn make_convex_is_idempotent() {
    let mut hull = l_shape();
    hull.make_convex();
    let once = hull.clone();
    hull.make_convex();
    assert_fuzzy_eq!(hull.area(), once.area());
    assert_eq!(hull[0].len(), once[0].len());
}

#[test]
fn make_convex_spans_all_polygons() {
    let mut shape = shape_of([square(0, 0, 100), square(1000, 0, 100)]);
    shape.make_convex();
    assert_eq!(shape.len(), 1);
    assert_fuzzy_eq!(shape.area(), 1100.0 * 100.0);
}

#[test]
fn colinear_removal_on_shape() {
    let mut shape = shape_of([
        polygon![(0, 0), (500, 0), (1000, 0), (1000, 1000), (0, 1000)],
        // only colinear points, removed entirely
        polygon![(0, 2000), (100, 2000), (200, 2000), (300, 2000)],
    ]);
    let point_count = shape.point_count();
    shape.remove_colinear_edges(DEFAULT_MAX_DEVIATION_ANGLE);
    assert_eq!(shape.len(), 1);
    assert_eq!(shape[0].len(), 4);
    assert!(shape.point_count() <= point_count);

    let once = shape.clone();
    shape.remove_colinear_edges(DEFAULT_MAX_DEVIATION_ANGLE);
    assert_eq!(shape, once);
}

#[test]
fn near_self_intersections_idempotent() {
    init_logging();
    let shape = square_with_hole(1000, 200);
    let once = shape.remove_near_self_intersections();
    assert_fuzzy_eq!(once.area(), shape.area());
    assert_eq!(once.len(), 2);

    let twice = once.remove_near_self_intersections();
    assert_fuzzy_eq!(twice.area(), once.area());
    assert_eq!(twice.point_count(), once.point_count());
}

#[test]
fn near_self_intersections_merges_touching_parts() {
    // a 2 unit gap disappears on the coarser grid
    let shape = shape_of([square(0, 0, 1000), square(1002, 0, 1000)]);
    let result = shape.remove_near_self_intersections();
    assert_eq!(result.len(), 1);
}

#[test]
fn near_self_intersections_resolve_overlaps_even_odd() {
    // the overlap of the two squares is covered twice and drops out
    let shape = shape_of([square(0, 0, 1000), square(500, 0, 1000)]);
    let result = shape.remove_near_self_intersections();
    assert_eq!(result.len(), 2);
    assert_fuzzy_eq!(result.area(), 1_000_000.0);
    assert!(!result.inside(Point::new(750, 500), false));
    assert!(result.inside(Point::new(250, 500), false));
    assert!(result.inside(Point::new(1250, 500), false));
}

#[test]
fn remove_small_areas_keeps_large_outline_and_holes() {
    // 1 mm2 limit, the hole is small but its outline stays
    let mut shape = shape_of([
        square(0, 0, 5000),
        square_hole(1000, 1000, 500),
        square(10_000, 0, 500),
    ]);
    shape.remove_small_areas(1.0, false);
    assert_eq!(shape.len(), 2);
    assert_fuzzy_eq!(shape.area(), 25_000_000.0 - 250_000.0);

    shape.remove_small_areas(1.0, true);
    assert_eq!(shape.len(), 1);
    assert_fuzzy_eq!(shape.area(), 25_000_000.0);
}

#[test]
fn remove_polygon_ignores_start_index() {
    let target = square(1000, 0, 100);
    let shape = shape_of([square(0, 0, 100), target.clone()]);
    let shifted = cycle_start_index_forward(&target, 2);
    let result = shape.remove_polygon(&shape_of([shifted]), 1);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0], shape[0]);

    let far = shape_of([square(1005, 0, 100)]);
    assert_eq!(shape.remove_polygon(&far, 1).len(), 2);
    assert_eq!(shape.remove_polygon(&far, 10).len(), 1);
}

#[test]
fn ensure_manifold_cuts_shared_corner() {
    let mut shape = shape_of([square(0, 0, 100), square(100, 100, 100)]);
    shape.ensure_manifold();
    // two opposite quarters of a 5 unit diamond are cut out
    assert_fuzzy_eq!(shape.area(), 20_000.0 - 25.0);
    assert!(!shape.inside(Point::new(100, 100), true));

    let mut separate = shape_of([square(0, 0, 100), square(200, 0, 100)]);
    let before = separate.clone();
    separate.ensure_manifold();
    assert_eq!(separate, before);
}

#[test]
fn smooth_keeps_plain_square() {
    let shape = shape_of([square(0, 0, 1000)]);
    let smoothed = shape.smooth(50);
    assert_eq!(smoothed.len(), 1);
    assert_fuzzy_eq!(smoothed.area(), shape.area());

    let thinned = shape.smooth2(50, 0.0);
    assert_eq!(thinned, shape);
}

#[test]
fn segment_crossings() {
    let shape = square_with_hole(1000, 250);
    let mut params = shape.intersections_with_segment(Point::new(-1000, 500), Point::new(3000, 500));
    params.sort_by(|a, b| a.total_cmp(b));
    let expected = [0.25, 0.3125, 0.4375, 0.5];
    assert_eq!(params.len(), expected.len());
    for (t, e) in params.iter().zip(expected) {
        assert_fuzzy_eq!(*t, e);
    }
}
