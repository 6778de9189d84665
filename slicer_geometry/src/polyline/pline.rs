use super::{
    internal::{colinear, simplify::simplify_points, smooth},
    PointsSet, PolylineKind, Segment, SegmentIndexIter, SegmentIter, SimplifyOptions,
};
use crate::{
    clipping::{ClipType, Clipper, ClipperOffset, EndType, FillRule, JoinType, OffsetOptions, PathRole},
    core::{
        math::{point_in_polygon, signed_area, Coord, Point, PointContainment},
        traits::ControlFlow,
        Control,
    },
    lines_set::{OpenLinesSet, Shape},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// A point sequence tagged with its closure/fill [PolylineKind].
///
/// Dereferences to [PointsSet] for point storage operations (indexing, `push`, `translate`,
/// `apply_matrix`, ...).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polyline {
    pub points: PointsSet,
    pub kind: PolylineKind,
}

impl Default for Polyline {
    #[inline]
    fn default() -> Self {
        Self::new(PolylineKind::Open)
    }
}

impl Deref for Polyline {
    type Target = PointsSet;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl DerefMut for Polyline {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.points
    }
}

impl Polyline {
    /// Create a new empty polyline of the given `kind`.
    #[inline]
    pub fn new(kind: PolylineKind) -> Self {
        Polyline {
            points: PointsSet::new(),
            kind,
        }
    }

    #[inline]
    pub fn from_points(points: Vec<Point>, kind: PolylineKind) -> Self {
        Polyline {
            points: PointsSet::from_vec(points),
            kind,
        }
    }

    #[inline]
    pub fn open(points: Vec<Point>) -> Self {
        Self::from_points(points, PolylineKind::Open)
    }

    /// Implicitly closed (non filled) polyline.
    #[inline]
    pub fn closed(points: Vec<Point>) -> Self {
        Self::from_points(points, PolylineKind::ImplicitlyClosed)
    }

    /// Filled polygon contour.
    #[inline]
    pub fn polygon(points: Vec<Point>) -> Self {
        Self::from_points(points, PolylineKind::Filled)
    }

    #[inline]
    pub fn kind(&self) -> PolylineKind {
        self.kind
    }

    /// Change the kind, the point data is not transformed (see [PolylineKind]).
    #[inline]
    pub fn set_kind(&mut self, kind: PolylineKind) {
        self.kind = kind;
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.kind.is_closed()
    }

    #[inline]
    pub fn has_closing_segment(&self) -> bool {
        self.kind.has_closing_segment()
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.kind.is_filled()
    }

    /// Number of segments of the polyline.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::polyline::*;
    /// # use slicer_geometry::core::math::Point;
    /// let pts = vec![Point::new(0, 0), Point::new(10, 0), Point::new(10, 10)];
    /// assert_eq!(Polyline::open(pts.clone()).segments_count(), 2);
    /// assert_eq!(Polyline::polygon(pts.clone()).segments_count(), 3);
    ///
    /// let mut explicit = pts.clone();
    /// explicit.push(pts[0]);
    /// let explicit = Polyline::from_points(explicit, PolylineKind::ExplicitlyClosed);
    /// assert_eq!(explicit.segments_count(), 3);
    /// ```
    pub fn segments_count(&self) -> usize {
        let n = self.len();
        match self.kind {
            PolylineKind::Open => n.saturating_sub(1),
            PolylineKind::ImplicitlyClosed | PolylineKind::Filled => n,
            PolylineKind::ExplicitlyClosed => {
                if n >= 3 {
                    n - 1
                } else {
                    0
                }
            }
        }
    }

    /// `true` if there are enough points to form a line of this kind: 2 for open lines, 3 for
    /// implicitly closed lines and polygons, 4 for explicitly closed lines.
    #[inline]
    pub fn is_valid(&self) -> bool {
        let min = match self.kind {
            PolylineKind::Open => 2,
            PolylineKind::ImplicitlyClosed | PolylineKind::Filled => 3,
            PolylineKind::ExplicitlyClosed => 4,
        };
        self.len() >= min
    }

    /// Iterate over all the segments, the last segment of a line with a closing segment ends at
    /// the first point.
    #[inline]
    pub fn segments(&self) -> SegmentIter<'_> {
        SegmentIter::new(self.points.points(), self.segments_count())
    }

    /// Iterate over the point index pairs of all the segments.
    #[inline]
    pub fn segment_indexes(&self) -> SegmentIndexIter {
        SegmentIndexIter::new(self.len(), self.segments_count())
    }

    /// Visit all the segments, stopping early if the visitor returns a breaking control value.
    ///
    /// Returns the control value of the last visit (or the continuing value if nothing was
    /// visited).
    pub fn visit_segments<C, F>(&self, visitor: &mut F) -> C
    where
        C: ControlFlow,
        F: FnMut(Segment<'_>) -> C,
    {
        for seg in self.segments() {
            let control = visitor(seg);
            if control.should_break() {
                return control;
            }
        }

        C::continuing()
    }

    /// Total length of all segments (each segment length rounded).
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::polyline::*;
    /// # use slicer_geometry::core::math::Point;
    /// let pts = vec![Point::new(0, 0), Point::new(100, 0), Point::new(100, 100)];
    /// assert_eq!(Polyline::open(pts.clone()).length(), 200);
    /// assert_eq!(Polyline::closed(pts).length(), 341);
    /// ```
    pub fn length(&self) -> Coord {
        self.segments().map(|seg| seg.length()).sum()
    }

    /// `true` if the total length is less than `check_length`, stops summing as soon as the
    /// threshold is reached.
    pub fn shorter_than(&self, check_length: Coord) -> bool {
        let mut length = 0;
        let control = self.visit_segments(&mut |seg| {
            length += seg.length();
            if length >= check_length {
                Control::Break(())
            } else {
                Control::Continue
            }
        });

        !control.should_break()
    }

    /// Signed area enclosed, counter clockwise positive. Open polylines have no area.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::polyline::*;
    /// # use slicer_geometry::core::math::Point;
    /// let mut square = Polyline::polygon(vec![
    ///     Point::new(0, 0),
    ///     Point::new(10, 0),
    ///     Point::new(10, 10),
    ///     Point::new(0, 10),
    /// ]);
    /// assert_eq!(square.area(), 100.0);
    /// assert!(square.orientation());
    /// square.reverse();
    /// assert_eq!(square.area(), -100.0);
    /// assert!(!square.orientation());
    /// ```
    pub fn area(&self) -> f64 {
        if !self.is_closed() {
            return 0.0;
        }
        signed_area(self.points.points())
    }

    /// `true` if counter clockwise (signed area is not negative).
    #[inline]
    pub fn orientation(&self) -> bool {
        signed_area(self.points.points()) >= 0.0
    }

    /// Area centroid of the enclosed region. A single point returns itself and an empty polyline
    /// returns the origin.
    pub fn center_of_mass(&self) -> Point {
        let Some(&first) = self.first() else {
            return Point::zero();
        };

        let size = self.len();
        if size == 1 {
            return first;
        }

        let mut p0 = first;
        let mut x = 0.0;
        let mut y = 0.0;
        for n in 1..=size {
            let p1 = self[n % size];
            let second_factor = (p0.x as f64) * (p1.y as f64) - (p1.x as f64) * (p0.y as f64);
            x += (p0.x + p1.x) as f64 * second_factor;
            y += (p0.y + p1.y) as f64 * second_factor;
            p0 = p1;
        }

        let area = signed_area(self.points.points());
        if area == 0.0 {
            return first;
        }

        x = x / 6.0 / area;
        y = y / 6.0 / area;
        Point::new(x.round() as Coord, y.round() as Coord)
    }

    /// Even-odd containment of `point` in the closed polyline.
    #[inline]
    pub fn containment(&self, point: Point) -> PointContainment {
        point_in_polygon(point, self.points.points())
    }

    /// `true` if `point` is inside the closed polyline, `border_result` is returned if the point
    /// lies exactly on the border.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::polyline::*;
    /// # use slicer_geometry::core::math::Point;
    /// let square = Polyline::polygon(vec![
    ///     Point::new(0, 0),
    ///     Point::new(10, 0),
    ///     Point::new(10, 10),
    ///     Point::new(0, 10),
    /// ]);
    /// assert!(square.inside(Point::new(5, 5), false));
    /// assert!(!square.inside(Point::new(15, 5), true));
    /// assert!(square.inside(Point::new(10, 5), true));
    /// assert!(!square.inside(Point::new(10, 5), false));
    /// ```
    pub fn inside(&self, point: Point, border_result: bool) -> bool {
        match self.containment(point) {
            PointContainment::Inside => true,
            PointContainment::Outside => false,
            PointContainment::OnBorder => border_result,
        }
    }

    /// Reverse the direction of the polyline in place.
    #[inline]
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Open polyline tracing the same path, the first point is appended when there is a closing
    /// segment.
    pub fn to_pseudo_open_polyline(&self) -> Polyline {
        let mut result = Polyline::from_points(self.points.to_vec(), PolylineKind::Open);
        if self.has_closing_segment() {
            if let Some(&first) = self.first() {
                result.push(first);
            }
        }
        result
    }

    /// Points as handed to the clipping engine (implicitly closed convention), the duplicated
    /// last point of an explicitly closed polyline is left out.
    pub fn engine_points(&self) -> &[Point] {
        let pts = self.points.points();
        if self.kind == PolylineKind::ExplicitlyClosed && pts.len() > 1 && pts.first() == pts.last()
        {
            &pts[..pts.len() - 1]
        } else {
            pts
        }
    }

    /// Append every segment as a 2 point open polyline to `result`.
    pub fn split_into_segments_into(&self, result: &mut OpenLinesSet) {
        result.reserve(self.segments_count());
        for seg in self.segments() {
            result.add_segment(*seg.start, *seg.end);
        }
    }

    /// Every segment as a 2 point open polyline.
    pub fn split_into_segments(&self) -> OpenLinesSet {
        let mut result = OpenLinesSet::new();
        self.split_into_segments_into(&mut result);
        result
    }

    /// Offset the region enclosed by this polygon by `distance` (positive grows). A zero distance
    /// returns the polygon unchanged.
    pub fn offset(&self, distance: Coord, join_type: JoinType, miter_limit: f64) -> Shape {
        if distance == 0 {
            let mut result = Shape::new();
            result.push(self.clone().into_polygon());
            return result;
        }

        let options = OffsetOptions {
            join_type,
            miter_limit,
            ..Default::default()
        };
        let mut offsetter = ClipperOffset::new(options);
        offsetter.add_path(self.engine_points(), EndType::ClosedPolygon);
        Shape::from_paths(offsetter.execute(distance as f64))
    }

    /// Intersection of the regions enclosed by two polygons (even-odd fill).
    pub fn intersection(&self, other: &Polyline) -> Shape {
        let mut clipper = Clipper::new();
        clipper.add_path(self.engine_points(), PathRole::Subject, true);
        clipper.add_path(other.engine_points(), PathRole::Clip, true);
        Shape::from_paths(clipper.execute(ClipType::Intersection, FillRule::EvenOdd))
    }

    /// Same polyline tagged as [PolylineKind::Filled].
    #[inline]
    pub fn into_polygon(mut self) -> Polyline {
        if self.kind == PolylineKind::ExplicitlyClosed && self.len() > 1 && self.first() == self.last()
        {
            self.pop();
        }
        self.kind = PolylineKind::Filled;
        self
    }

    /// Remove vertices whose corner is within `max_deviation_angle` (radians) of straight or of a
    /// spike, repeating until nothing changes. Polylines of 3 or fewer points are left unchanged
    /// and open polylines keep their end points.
    pub fn remove_colinear_edges(&mut self, max_deviation_angle: f64) {
        let before = self.len();
        if self.has_closing_segment() {
            colinear::remove_colinear_edges_closed(self.points.points_mut(), max_deviation_angle);
        } else {
            colinear::remove_colinear_edges_open(self.points.points_mut(), max_deviation_angle);
        }
        log::trace!("removed {} colinear vertexes", before - self.len());
    }

    /// Best effort vertex reduction, see [SimplifyOptions]. Open (and explicitly closed) polylines
    /// keep their end points. A polyline too small to keep its shape ends up empty.
    pub fn simplify(&mut self, options: &SimplifyOptions) {
        let simplified = simplify_points(self.points.points(), self.has_closing_segment(), options);
        self.points.set_points(simplified);
    }

    /// Polygon with small outward zigzags removed, see [smooth::smooth_ring].
    pub fn smooth(&self, remove_length: Coord) -> Polyline {
        Polyline::from_points(smooth::smooth_ring(self, remove_length), self.kind)
    }

    /// Polygon with runs of short segments thinned, see [smooth::smooth2_ring].
    pub fn smooth2(&self, remove_length: Coord) -> Polyline {
        Polyline::from_points(smooth::smooth2_ring(self, remove_length), self.kind)
    }
}

impl From<Vec<Point>> for Polyline {
    /// Points become an open polyline.
    #[inline]
    fn from(points: Vec<Point>) -> Self {
        Polyline::open(points)
    }
}
