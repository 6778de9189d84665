mod test_utils;

use slicer_geometry::{
    assert_fuzzy_eq,
    clipping::{JoinType, DEFAULT_MITER_LIMIT},
    core::{math::Point, traits::FuzzyEq},
    lines_set::{ClosedLinesSet, OpenLinesSet},
    mixed_lines_set::{MixedLinesSet, PolylineHandle},
    pline_closed, pline_open,
    polyline::Polyline,
};
use std::sync::Arc;
use test_utils::{shape_of, square};

/// One open segment, one closed ring and one polygon, far apart from each other.
fn mixed_input() -> MixedLinesSet {
    let mut open = OpenLinesSet::new();
    open.add_segment(Point::new(0, 0), Point::new(1000, 0));
    let mut closed = ClosedLinesSet::new();
    closed.push(pline_closed![(0, 5000), (1000, 5000), (1000, 6000), (0, 6000)]);

    let mut mixed = MixedLinesSet::new();
    mixed.push_open_lines(open);
    mixed.push_closed_lines(closed);
    mixed.push_shape(&shape_of([square(5000, 5000, 1000)]));
    mixed
}

#[test]
fn totals_over_all_kinds() {
    let mixed = mixed_input();
    assert_eq!(mixed.len(), 3);
    assert_eq!(mixed.point_count(), 2 + 4 + 4);
    assert_eq!(mixed.length(), 1000 + 4000 + 4000);
    assert!(mixed[2].is_filled());
}

#[test]
fn zero_offset_of_mixed_input() {
    let result = mixed_input().offset(0, JoinType::Miter, DEFAULT_MITER_LIMIT);
    // only the filled square survives, the open segment and the closed ring are dropped
    assert_eq!(result.len(), 1);
    assert!(result[0].is_filled());
    assert_fuzzy_eq!(result.area(), 1_000_000.0);
}

#[test]
fn offset_of_mixed_input() {
    let result = mixed_input().offset(50, JoinType::Miter, DEFAULT_MITER_LIMIT);
    let segment_band = 1100.0 * 100.0;
    let ring_band = 1100.0 * 1100.0 - 900.0 * 900.0;
    let grown_polygon = 1100.0 * 1100.0;
    assert_eq!(result.len(), 4);
    assert_fuzzy_eq!(result.area(), segment_band + ring_band + grown_polygon, 1.0);
}

#[test]
fn overlapping_polygons_offset_as_one_region() {
    let mut mixed = MixedLinesSet::new();
    mixed.push_polyline(square(0, 0, 1000));
    mixed.push_polyline(square(500, 0, 1000));
    let result = mixed.offset(100, JoinType::Miter, DEFAULT_MITER_LIMIT);
    assert_eq!(result.len(), 1);
    assert_fuzzy_eq!(result.area(), 1700.0 * 1200.0);
}

#[test]
fn handles_are_shared_until_written() {
    let ring: PolylineHandle = Arc::new(Polyline::closed(vec![
        Point::new(0, 0),
        Point::new(100, 0),
        Point::new(100, 100),
    ]));
    let mut first: MixedLinesSet = [ring.clone()].into_iter().collect();
    let second: MixedLinesSet = [ring.clone(), Arc::new(pline_open![(0, 0), (1, 1)])]
        .into_iter()
        .collect();
    assert!(Arc::ptr_eq(&first[0], &second[0]));

    first.make_mut(0).translate(Point::new(10, 10));
    assert!(!Arc::ptr_eq(&first[0], &second[0]));
    assert_eq!(first[0][0], Point::new(10, 10));
    assert_eq!(second[0][0], Point::new(0, 0));
    assert_eq!(ring[0], Point::new(0, 0));
}

#[test]
fn iterate_by_reference() {
    let mixed: MixedLinesSet = [pline_open![(0, 0), (10, 0)], pline_closed![(0, 0), (10, 0), (10, 10)]]
        .into_iter()
        .collect();
    let closed_count = (&mixed).into_iter().filter(|line| line.is_closed()).count();
    assert_eq!(closed_count, 1);
}
