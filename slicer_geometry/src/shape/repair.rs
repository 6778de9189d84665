//! Clean up and approximation of regions: small area and duplicate polygon removal, smoothing,
//! self intersection and manifold repair, convex hulls and per vertex offsetting.
use crate::{
    clipping::{ClipperOffset, EndType, FillRule, JoinType, OffsetOptions, DEFAULT_MITER_LIMIT},
    core::math::{area_to_mm2, point_is_left_of_line, segment_segment_intersection, Coord, Point},
    lines_set::Shape,
    polyline::{Polyline, DEFAULT_MAX_DEVIATION_ANGLE},
};
use geo::{BooleanOps, LineString, MultiPolygon, Polygon};
use std::collections::HashSet;

/// Coordinates are divided by this factor before resolving near self intersections and
/// multiplied back after.
pub const SELF_INTERSECTION_SCALE: Coord = 4;

/// Distance every polygon is grown by (and shrunk back by) when approximating the convex hull.
pub const CONVEX_HULL_OVERSHOOT: Coord = 100_000;

/// Half diagonal of the diamond cut out around vertices shared between polygons.
pub const MANIFOLD_DOT_SIZE: Coord = 5;

/// Segments shorter than this are skipped by [Shape::offset_multi].
const MIN_MULTI_OFFSET_SEGMENT: Coord = 10;

impl Shape {
    /// Remove polygons with an absolute area below `min_area_mm2` (square millimeters).
    ///
    /// If `remove_holes` is false only outlines (counter clockwise) are judged by their area;
    /// small holes are removed only when their first point lies inside a removed outline. The
    /// order of the remaining polygons is not preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::lines_set::Shape;
    /// # use slicer_geometry::core::math::Point;
    /// let square = |x: i64, size: i64| {
    ///     vec![Point::new(x, x), Point::new(x + size, x), Point::new(x + size, x + size), Point::new(x, x + size)]
    /// };
    /// let mut shape = Shape::from_paths(vec![square(0, 2000), square(5000, 100)]);
    /// shape.remove_small_areas(1.0, false);
    /// assert_eq!(shape.len(), 1);
    /// assert_eq!(shape.area(), 2000.0 * 2000.0);
    /// ```
    pub fn remove_small_areas(&mut self, min_area_mm2: f64, remove_holes: bool) {
        let mut new_end = self.len();
        if remove_holes {
            let mut i = 0;
            while i < new_end {
                if area_to_mm2(self[i].area()).abs() < min_area_mm2 {
                    new_end -= 1;
                    self.swap(i, new_end);
                    continue;
                }
                i += 1;
            }
        } else {
            let mut small_holes = Vec::new();
            let mut i = 0;
            while i < new_end {
                let area = area_to_mm2(self[i].area());
                if area.abs() < min_area_mm2 {
                    if area >= 0.0 {
                        new_end -= 1;
                        if i < new_end {
                            self.swap(i, new_end);
                            continue;
                        }
                        break;
                    }
                    small_holes.push(i);
                }
                i += 1;
            }

            // reverse order so holes still to be checked are never the ones moved
            let removed_outlines_start = new_end;
            for &hole_idx in small_holes.iter().rev() {
                let Some(&first) = self[hole_idx].first() else {
                    continue;
                };
                let in_removed_outline = self[removed_outlines_start..]
                    .iter()
                    .any(|outline| outline.inside(first, false));
                if in_removed_outline {
                    new_end -= 1;
                    self.swap(hole_idx, new_end);
                }
            }
        }

        log::trace!("removed {} small polygons", self.len() - new_end);
        self.truncate(new_end);
    }

    /// Copy of the shape without the polygons that match a polygon of `to_be_removed`.
    ///
    /// Polygons match when they have the same point count and, starting from the point of the
    /// candidate closest to the first point, every point pair is within `same_distance`.
    pub fn remove_polygon(&self, to_be_removed: &Shape, same_distance: Coord) -> Shape {
        let same_distance2 = same_distance * same_distance;
        let matches = |keep: &Polyline, remove: &Polyline| -> bool {
            if remove.len() != keep.len() || remove.is_empty() {
                return false;
            }
            let Some((closest_idx, smallest_dist2)) = remove
                .iter()
                .enumerate()
                .map(|(i, &p)| (i, (p - keep[0]).length_squared()))
                .min_by_key(|&(_, d)| d)
            else {
                return false;
            };
            if smallest_dist2 > same_distance2 {
                return false;
            }
            let n = remove.len();
            (0..n).all(|i| (remove[(closest_idx + i) % n] - keep[i]).length_squared() <= same_distance2)
        };

        self.iter()
            .filter(|keep| keep.is_empty() || !to_be_removed.iter().any(|remove| matches(keep, remove)))
            .cloned()
            .collect()
    }

    /// Remove vertices whose corner deviates less than `max_deviation_angle` from straight (see
    /// [Polyline::remove_colinear_edges]), dropping polygons left with less than 3 points.
    pub fn remove_colinear_edges(&mut self, max_deviation_angle: f64) {
        let mut i = 0;
        while i < self.len() {
            self[i].remove_colinear_edges(max_deviation_angle);
            if self[i].len() < 3 {
                self.remove_at(i);
                continue;
            }
            i += 1;
        }
    }

    /// Copy with small outward zigzags removed from every polygon (see [Polyline::smooth]).
    /// Polygons with less than 3 points are dropped, triangles are kept as is.
    pub fn smooth(&self, remove_length: Coord) -> Shape {
        let mut result = Shape::with_capacity(self.len());
        for poly in self.iter() {
            if poly.len() < 3 {
                continue;
            }
            if poly.len() == 3 {
                result.push(poly.clone());
                continue;
            }
            let smoothed = poly.smooth(remove_length);
            if smoothed.len() >= 3 {
                result.push(smoothed);
            }
        }
        result
    }

    /// Copy with short segment runs thinned in every polygon (see [Polyline::smooth2]). Polygons
    /// with an area below `min_area` or at most 5 points are kept unchanged.
    pub fn smooth2(&self, remove_length: Coord, min_area: f64) -> Shape {
        let mut result = Shape::with_capacity(self.len());
        for poly in self.iter() {
            if poly.is_empty() {
                continue;
            }
            if poly.area() < min_area || poly.len() <= 5 {
                result.push(poly.clone());
            } else {
                result.push(poly.smooth2(remove_length));
            }
        }
        result
    }

    /// Resolve vertices and edges that nearly touch or cross.
    ///
    /// Every polygon is snapped to a grid [SELF_INTERSECTION_SCALE] units wide and the snapped
    /// rings are resolved together under the even-odd rule. The result is scaled back, united
    /// (non zero) and cleaned of colinear vertices. Applying it to its own output only moves
    /// points by rounding.
    pub fn remove_near_self_intersections(&self) -> Shape {
        let region = self
            .iter()
            .filter(|poly| poly.len() >= 3)
            .map(|poly| {
                let ring = poly.iter().map(|&p| geo::Coord::from(p / SELF_INTERSECTION_SCALE));
                MultiPolygon::new(vec![Polygon::new(LineString::from_iter(ring), Vec::new())])
            })
            .fold(MultiPolygon::<f64>::new(Vec::new()), |region, ring| {
                region.xor(&ring)
            });

        let mut result = Shape::from_geo(&region);
        for poly in result.iter_mut() {
            for p in poly.iter_mut() {
                *p = *p * SELF_INTERSECTION_SCALE;
            }
        }

        let mut result = result.union_self();
        result.remove_colinear_edges(DEFAULT_MAX_DEVIATION_ANGLE);
        log::debug!(
            "resolved near self intersections: {} polygons in, {} out",
            self.len(),
            result.len()
        );
        result
    }

    /// Separate polygons touching in a single vertex by cutting a small diamond out around every
    /// location shared by more than one vertex.
    pub fn ensure_manifold(&mut self) {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for p in self.iter().flat_map(|poly| poly.iter()) {
            if !seen.insert(*p) {
                duplicates.push(*p);
            }
        }
        if duplicates.is_empty() {
            return;
        }

        let d = MANIFOLD_DOT_SIZE;
        let dots: Shape = duplicates
            .iter()
            .map(|&p| {
                Polyline::polygon(vec![
                    p + Point::new(0, d),
                    p + Point::new(d, 0),
                    p + Point::new(0, -d),
                    p + Point::new(-d, 0),
                ])
            })
            .collect();
        log::debug!("cutting {} non manifold vertexes", duplicates.len());
        *self = self.difference(&dots);
    }

    /// Replace the polygons by their exact convex hull (monotone chain over all points).
    ///
    /// The hull is counter clockwise, made of input vertices only and has no colinear vertices.
    /// If all points are colinear the shape ends up empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::lines_set::Shape;
    /// # use slicer_geometry::core::math::Point;
    /// let mut shape = Shape::from_paths(vec![vec![
    ///     Point::new(0, 0),
    ///     Point::new(100, 0),
    ///     Point::new(50, 20),
    ///     Point::new(100, 100),
    ///     Point::new(0, 100),
    /// ]]);
    /// shape.make_convex();
    /// assert_eq!(shape.len(), 1);
    /// assert_eq!(shape[0].len(), 4);
    /// assert_eq!(shape.area(), 10000.0);
    /// ```
    pub fn make_convex(&mut self) {
        if self.is_empty() {
            return;
        }

        let mut points: Vec<Point> = self.iter().flat_map(|poly| poly.iter().copied()).collect();
        points.sort_unstable();
        points.dedup();

        // positive if o -> a -> b turns left
        let turn = |o: Point, a: Point, b: Point| point_is_left_of_line(b, o, a);

        let mut hull: Vec<Point> = Vec::with_capacity(points.len() + 1);
        for &p in &points {
            while hull.len() >= 2 && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
                hull.pop();
            }
            hull.push(p);
        }
        let lower_len = hull.len() + 1;
        for &p in points.iter().rev().skip(1) {
            while hull.len() >= lower_len && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
            {
                hull.pop();
            }
            hull.push(p);
        }
        // last point repeats the first
        hull.pop();

        self.clear();
        if hull.len() >= 3 {
            self.push_points(hull);
        }
    }

    /// Approximate convex hull grown by `extra_outset`.
    ///
    /// Every polygon is grown by [CONVEX_HULL_OVERSHOOT] with round joins, the results united and
    /// shrunk back by `CONVEX_HULL_OVERSHOOT - extra_outset`. This is best effort: concavities
    /// wider than the overshoot survive and the result may not be convex.
    pub fn approx_convex_hull(&self, extra_outset: Coord) -> Shape {
        let options = OffsetOptions {
            join_type: JoinType::Round,
            miter_limit: DEFAULT_MITER_LIMIT,
            arc_tolerance: 10.0,
        };

        // one polygon at a time, overlapping polygons are resolved by the union after
        let mut grown = Shape::new();
        for poly in self.iter() {
            let mut offsetter = ClipperOffset::new(options);
            offsetter.add_path(poly.engine_points(), EndType::ClosedPolygon);
            grown.extend(
                offsetter
                    .execute(CONVEX_HULL_OVERSHOOT as f64)
                    .into_iter()
                    .map(Polyline::polygon),
            );
        }

        let result = grown.union_self().offset(
            -CONVEX_HULL_OVERSHOOT + extra_outset,
            JoinType::Round,
            DEFAULT_MITER_LIMIT,
        );
        log::debug!(
            "approximated convex hull of {} polygons: {} polygons",
            self.len(),
            result.len()
        );
        result
    }

    /// Offset every vertex by its own distance, `offset_dists` holds one distance per point in
    /// polygon order (see [LinesSet::point_count](crate::lines_set::LinesSet::point_count)).
    ///
    /// Each segment is moved sideways (to the right of its direction, outward for counter
    /// clockwise polygons) with its end points shifted by their own distances, the moved
    /// segments are chained and the result is united with the positive fill rule. Segments
    /// shorter than 10 units are skipped.
    pub fn offset_multi(&self, offset_dists: &[Coord]) -> Shape {
        debug_assert_eq!(
            self.point_count(),
            offset_dists.len(),
            "one offset distance per point required"
        );

        let mut paths = Shape::with_capacity(self.len());
        let mut i = 0;
        for poly in self.iter().filter(|poly| !poly.is_empty()) {
            let size = poly.len();
            let Some(&last) = poly.last() else {
                continue;
            };
            let mut prev_p = last;
            let mut prev_dist = offset_dists.get(i + size - 1).copied().unwrap_or(0);

            let mut moved = Vec::with_capacity(size * 2);
            for &p in poly.iter() {
                let dist = offset_dists.get(i).copied().unwrap_or(0);
                let dir = prev_p - p;
                if dir.length_squared() > MIN_MULTI_OFFSET_SEGMENT * MIN_MULTI_OFFSET_SEGMENT {
                    moved.push(prev_p + dir.normal(prev_dist).turn_90_ccw());
                    moved.push(p + dir.normal(dist).turn_90_ccw());
                }
                prev_p = p;
                prev_dist = dist;
                i += 1;
            }
            paths.push_points(moved);
        }

        paths.simplify(FillRule::Positive);
        paths
    }

    /// Parameters along `start -> end` (0 at `start`, 1 at `end`) of every crossing with a
    /// polygon segment, in polygon order.
    pub fn intersections_with_segment(&self, start: Point, end: Point) -> Vec<f64> {
        let mut result = Vec::new();
        for poly in self.iter() {
            for seg in poly.segments() {
                if let Some((t, _)) = segment_segment_intersection(start, end, *seg.start, *seg.end)
                {
                    result.push(t);
                }
            }
        }
        result
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

    fn clockwise(mut points: Vec<Point>) -> Vec<Point> {
        points.reverse();
        points
    }

    #[test]
    fn small_hole_inside_small_outline_is_removed() {
        let mut shape = Shape::from_paths(vec![
            square(0, 0, 5000),
            clockwise(square(1000, 1000, 100)),
            square(10000, 0, 500),
            clockwise(square(10100, 100, 100)),
        ]);
        shape.remove_small_areas(1.0, false);
        assert_eq!(shape.len(), 2);
        assert_eq!(shape.area(), 5000.0 * 5000.0 - 100.0 * 100.0);
    }

    #[test]
    fn remove_holes_removes_all_small() {
        let mut shape = Shape::from_paths(vec![
            square(0, 0, 5000),
            clockwise(square(1000, 1000, 100)),
            square(10000, 0, 500),
        ]);
        shape.remove_small_areas(1.0, true);
        assert_eq!(shape.len(), 1);
        assert_eq!(shape.area(), 5000.0 * 5000.0);
    }

    #[test]
    fn remove_polygon_matches_rotated_points() {
        let shape = Shape::from_paths(vec![square(0, 0, 100), square(500, 0, 100)]);
        let mut rotated = square(1, 0, 100);
        rotated.rotate_left(2);
        let to_remove = Shape::from_paths(vec![rotated]);

        let result = shape.remove_polygon(&to_remove, 2);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0][0], Point::new(500, 0));

        let too_far = shape.remove_polygon(&to_remove, 0);
        assert_eq!(too_far.len(), 2);
    }

    #[test]
    fn ensure_manifold_separates_touching_squares() {
        let mut shape = Shape::from_paths(vec![square(0, 0, 100), square(100, 100, 100)]);
        shape.ensure_manifold();
        assert_eq!(shape.len(), 2);
        let cut = 2.0 * (5.0 * 5.0 / 2.0);
        assert_eq!(shape.area(), 20000.0 - cut);
    }

    #[test]
    fn make_convex_of_colinear_points_is_empty() {
        let mut shape = Shape::from_paths(vec![vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(20, 0),
        ]]);
        shape.make_convex();
        assert!(shape.is_empty());
    }

    #[test]
    fn intersections_with_segment_params() {
        let shape = Shape::from_paths(vec![square(0, 0, 100)]);
        let mut params = shape.intersections_with_segment(Point::new(-100, 50), Point::new(200, 50));
        params.sort_by(f64::total_cmp);
        assert_eq!(params.len(), 2);
        assert!((params[0] - 1.0 / 3.0).abs() < 1e-9);
        assert!((params[1] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn offset_multi_uniform_distance_grows_square() {
        let shape = Shape::from_paths(vec![square(0, 0, 1000)]);
        let result = shape.offset_multi(&[100; 4]);
        assert_eq!(result.len(), 1);
        assert!(result.area() >= 1000.0 * 1000.0 + 4.0 * 1000.0 * 100.0);
        assert!(result.area() <= 1200.0 * 1200.0);
    }
}
