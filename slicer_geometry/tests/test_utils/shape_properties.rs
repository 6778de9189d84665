use slicer_geometry::{
    core::{math::Point, traits::FuzzyEq},
    lines_set::Shape,
    polyline::{Polyline, DEFAULT_MAX_DEVIATION_ANGLE},
};

/// Holds a set of properties of a polygon for comparison in tests
#[derive(Debug, Copy, Clone)]
pub struct PolygonProperties {
    pub point_count: usize,
    pub area: f64,
    pub path_length: i64,
    pub extents: (Point, Point),
}

impl PolygonProperties {
    // area comparer epsilon (square units)
    pub const AREA_CMP_EPS: f64 = 1e-6;
    // path length comparer epsilon (units, rounding of segment lengths)
    pub const LENGTH_CMP_EPS: i64 = 4;

    pub fn new(
        point_count: usize,
        area: f64,
        path_length: i64,
        min: (i64, i64),
        max: (i64, i64),
    ) -> Self {
        Self {
            point_count,
            area,
            path_length,
            extents: (Point::new(min.0, min.1), Point::new(max.0, max.1)),
        }
    }

    pub fn from_polygon(polygon: &Polyline) -> Self {
        // remove colinear vertexes for consistent point counts
        let mut polygon = polygon.clone();
        polygon.remove_colinear_edges(DEFAULT_MAX_DEVIATION_ANGLE);
        Self {
            point_count: polygon.len(),
            area: polygon.area(),
            path_length: polygon.length(),
            extents: polygon
                .extents()
                .unwrap_or((Point::zero(), Point::zero())),
        }
    }

    pub fn matches(&self, other: &Self) -> bool {
        self.point_count == other.point_count
            && self.area.fuzzy_eq_eps(other.area, Self::AREA_CMP_EPS)
            && (self.path_length - other.path_length).abs() <= Self::LENGTH_CMP_EPS
            && self.extents == other.extents
    }
}

pub fn create_property_set(shape: &Shape) -> Vec<PolygonProperties> {
    shape.iter().map(PolygonProperties::from_polygon).collect()
}

/// Compare property sets ignoring order, every expected entry must match exactly one result.
pub fn property_sets_match(
    result_set: &[PolygonProperties],
    expected_set: &[PolygonProperties],
) -> bool {
    let mut sets_match = result_set.len() == expected_set.len();
    if sets_match {
        for properties_expected in expected_set {
            let match_count = result_set
                .iter()
                .filter(|properties_result| properties_expected.matches(properties_result))
                .count();

            if match_count != 1 {
                sets_match = false;
                break;
            }
        }
    }

    if !sets_match {
        eprintln!("result:\n{:?}", result_set);
        eprintln!("expected:\n{:?}", expected_set);
    }

    sets_match
}

/// Sum of the signed areas in square millimeters.
pub fn area_mm2(shape: &Shape) -> f64 {
    slicer_geometry::core::math::area_to_mm2(shape.area())
}
