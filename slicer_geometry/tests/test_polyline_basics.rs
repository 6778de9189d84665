mod test_utils;

use slicer_geometry::{
    assert_fuzzy_eq,
    core::{math::Point, traits::FuzzyEq},
    pline_closed, pline_open, polygon,
    polyline::{Polyline, PolylineKind, DEFAULT_MAX_DEVIATION_ANGLE},
};
use test_utils::all_cycles;

#[test]
fn segments_count_by_kind() {
    let open = pline_open![(0, 0), (100, 0), (100, 100), (0, 100)];
    assert_eq!(open.segments_count(), 3);
    assert_eq!(open.segments().count(), 3);

    let closed = pline_closed![(0, 0), (100, 0), (100, 100), (0, 100)];
    assert_eq!(closed.segments_count(), 4);
    assert_eq!(closed.segments().count(), 4);

    let explicit = Polyline::from_points(
        vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 100),
            Point::new(0, 0),
        ],
        PolylineKind::ExplicitlyClosed,
    );
    assert_eq!(explicit.segments_count(), 4);
    assert_eq!(explicit.segments().count(), 4);
}

#[test]
fn segments_count_degenerate() {
    assert_eq!(pline_open![].segments_count(), 0);
    assert_eq!(pline_open![(5, 5)].segments_count(), 0);
    assert_eq!(pline_closed![].segments_count(), 0);
    let explicit = Polyline::from_points(
        vec![Point::new(0, 0), Point::new(0, 0)],
        PolylineKind::ExplicitlyClosed,
    );
    assert_eq!(explicit.segments_count(), 0);
    assert!(!explicit.is_valid());
}

#[test]
fn closing_segment_visits_last_to_first() {
    let closed = pline_closed![(0, 0), (100, 0), (100, 100)];
    let last = closed.segments().last().map(|seg| (*seg.start, *seg.end));
    assert_eq!(last, Some((Point::new(100, 100), Point::new(0, 0))));

    let open = pline_open![(0, 0), (100, 0), (100, 100)];
    let last = open.segments().last().map(|seg| (*seg.start, *seg.end));
    assert_eq!(last, Some((Point::new(100, 0), Point::new(100, 100))));
}

#[test]
fn length_and_area_by_kind() {
    let open = pline_open![(0, 0), (100, 0), (100, 100), (0, 100)];
    assert_eq!(open.length(), 300);
    assert_eq!(open.area(), 0.0);

    let square = polygon![(0, 0), (100, 0), (100, 100), (0, 100)];
    assert_eq!(square.length(), 400);
    assert_fuzzy_eq!(square.area(), 10000.0);
    assert!(square.shorter_than(401));
    assert!(!square.shorter_than(400));
}

#[test]
fn area_and_length_do_not_depend_on_start_or_direction() {
    let shape = polygon![(0, 0), (300, 0), (300, 100), (100, 100), (100, 250), (0, 250)];
    let expected_area = shape.area();
    let expected_length = shape.length();
    for cycled in all_cycles(&shape) {
        assert_fuzzy_eq!(cycled.area().abs(), expected_area);
        assert_eq!(cycled.length(), expected_length);
    }
}

#[test]
fn inside_on_border_uses_border_result() {
    let square = polygon![(0, 0), (100, 0), (100, 100), (0, 100)];
    assert!(square.inside(Point::new(50, 50), false));
    assert!(!square.inside(Point::new(150, 50), true));
    assert!(square.inside(Point::new(0, 50), true));
    assert!(!square.inside(Point::new(0, 50), false));
    assert!(square.inside(Point::new(100, 100), true));
}

#[test]
fn pseudo_open_appends_first_point() {
    let closed = pline_closed![(0, 0), (100, 0), (100, 100)];
    let open = closed.to_pseudo_open_polyline();
    assert_eq!(open.kind(), PolylineKind::Open);
    assert_eq!(open.len(), 4);
    assert_eq!(open.first(), open.last());
    assert_eq!(open.length(), closed.length());
}

#[test]
fn into_polygon_drops_explicit_closing_point() {
    let explicit = Polyline::from_points(
        vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 0),
        ],
        PolylineKind::ExplicitlyClosed,
    );
    assert_eq!(explicit.engine_points().len(), 3);
    let polygon = explicit.into_polygon();
    assert!(polygon.is_filled());
    assert_eq!(polygon.len(), 3);
    assert_fuzzy_eq!(polygon.area(), 5000.0);
}

#[test]
fn colinear_removal_never_adds_points_and_is_idempotent() {
    let mut square = polygon![
        (0, 0),
        (50, 0),
        (100, 0),
        (100, 50),
        (100, 100),
        (50, 100),
        (0, 100)
    ];
    let area = square.area();
    square.remove_colinear_edges(DEFAULT_MAX_DEVIATION_ANGLE);
    assert_eq!(square.len(), 4);
    assert_fuzzy_eq!(square.area(), area);

    let once = square.clone();
    square.remove_colinear_edges(DEFAULT_MAX_DEVIATION_ANGLE);
    assert_eq!(square, once);
}

#[test]
fn colinear_removal_keeps_open_end_points() {
    let mut open = pline_open![(0, 0), (50, 0), (100, 0), (100, 100)];
    open.remove_colinear_edges(DEFAULT_MAX_DEVIATION_ANGLE);
    assert_eq!(open.len(), 3);
    assert_eq!(open.first(), Some(&Point::new(0, 0)));
    assert_eq!(open.last(), Some(&Point::new(100, 100)));

    // 3 or fewer points are left as is
    let mut short = pline_open![(0, 0), (50, 0), (100, 0)];
    short.remove_colinear_edges(DEFAULT_MAX_DEVIATION_ANGLE);
    assert_eq!(short.len(), 3);
}

#[test]
fn split_into_segments_per_kind() {
    let closed = pline_closed![(0, 0), (100, 0), (100, 100)];
    let segments = closed.split_into_segments();
    assert_eq!(segments.len(), 3);
    assert!(segments.iter().all(|seg| seg.len() == 2 && !seg.is_closed()));
    assert_eq!(segments.length(), closed.length());
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip_keeps_kind() {
    let square = polygon![(0, 0), (100, 0), (100, 100), (0, 100)];
    let json = serde_json::to_string(&square).unwrap();
    let back: Polyline = serde_json::from_str(&json).unwrap();
    assert_eq!(back, square);
}
