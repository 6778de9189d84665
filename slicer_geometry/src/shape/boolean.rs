use crate::{
    clipping::{ClipType, Clipper, FillRule, PathRole},
    core::math::Coord,
    lines_set::{LineKind, LinesSet, OpenLinesSet, Shape, StitchOptions},
    polyline::Polyline,
};

/// Snap distance used when restitching clipped lines.
const RESTITCH_SNAP_DISTANCE: Coord = 10;

impl Shape {
    fn clip_with(&self, other: &Shape, clip_type: ClipType, fill_rule: FillRule) -> Shape {
        let mut clipper = Clipper::new();
        self.add_paths(&mut clipper, PathRole::Subject);
        other.add_paths(&mut clipper, PathRole::Clip);
        Shape::from_paths(clipper.execute(clip_type, fill_rule))
    }

    fn clip_self(&self, clip_type: ClipType, fill_rule: FillRule) -> Shape {
        let mut clipper = Clipper::new();
        self.add_paths(&mut clipper, PathRole::Subject);
        Shape::from_paths(clipper.execute(clip_type, fill_rule))
    }

    /// Region of `self` not covered by `other` (both resolved even-odd).
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::lines_set::Shape;
    /// # use slicer_geometry::core::math::Point;
    /// let square = |x: i64, size: i64| {
    ///     vec![Point::new(x, x), Point::new(x + size, x), Point::new(x + size, x + size), Point::new(x, x + size)]
    /// };
    /// let a = Shape::from_paths(vec![square(0, 100)]);
    /// let b = Shape::from_paths(vec![square(25, 50)]);
    /// let ring = a.difference(&b);
    /// assert_eq!(ring.len(), 2);
    /// assert_eq!(ring.area(), 7500.0);
    /// assert_eq!(a.difference(&a).area(), 0.0);
    /// ```
    pub fn difference(&self, other: &Shape) -> Shape {
        if self.is_empty() {
            return Shape::new();
        }
        if other.is_empty() {
            return self.clone();
        }
        self.clip_with(other, ClipType::Difference, FillRule::EvenOdd)
    }

    /// Region covered by `self` or `other`, both are added as subject and resolved together with
    /// `fill_rule`.
    pub fn union_polygons(&self, other: &Shape, fill_rule: FillRule) -> Shape {
        if self.is_empty() && other.is_empty() {
            return Shape::new();
        }
        let mut clipper = Clipper::new();
        self.add_paths(&mut clipper, PathRole::Subject);
        other.add_paths(&mut clipper, PathRole::Subject);
        Shape::from_paths(clipper.execute(ClipType::Union, fill_rule))
    }

    /// Union of the polygons of `self` with the non zero fill rule, overlapping polygons merge.
    #[inline]
    pub fn union_self(&self) -> Shape {
        self.union_polygons(&Shape::new(), FillRule::NonZero)
    }

    /// Region covered by both `self` and `other` (both resolved even-odd).
    pub fn intersection(&self, other: &Shape) -> Shape {
        if self.is_empty() || other.is_empty() {
            return Shape::new();
        }
        self.clip_with(other, ClipType::Intersection, FillRule::EvenOdd)
    }

    /// Region covered by exactly one of `self` and `other`.
    pub fn xor_polygons(&self, other: &Shape, fill_rule: FillRule) -> Shape {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        self.clip_with(other, ClipType::Xor, fill_rule)
    }

    /// Region of the polygons of `self` resolved with `fill_rule` through an exclusive or
    /// against nothing.
    pub fn execute(&self, fill_rule: FillRule) -> Shape {
        self.clip_self(ClipType::Xor, fill_rule)
    }

    /// Region of the polygons of `self` resolved with `fill_rule` through a union, even-odd by
    /// default at the call sites.
    pub fn process_even_odd(&self, fill_rule: FillRule) -> Shape {
        self.clip_self(ClipType::Union, fill_rule)
    }

    /// Replace the polygons by the region they describe under `fill_rule`, removing self
    /// intersections and overlaps.
    pub fn simplify(&mut self, fill_rule: FillRule) {
        if self.is_empty() {
            return;
        }
        *self = self.clip_self(ClipType::Union, fill_rule);
    }

    /// Parts of `lines` inside the region (even-odd), as open lines.
    ///
    /// The lines are split into single segments before clipping. With `restitch` the clipped
    /// pieces are joined back where their ends are within `max_stitch_distance`; chains that
    /// close are returned as open lines ending at their start point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::lines_set::*;
    /// # use slicer_geometry::core::math::Point;
    /// let square = vec![Point::new(0, 0), Point::new(100, 0), Point::new(100, 100), Point::new(0, 100)];
    /// let shape = Shape::from_paths(vec![square]);
    ///
    /// let mut lines = OpenLinesSet::new();
    /// lines.push_points(vec![Point::new(-50, 50), Point::new(50, 50), Point::new(150, 50)]);
    ///
    /// let inside = shape.intersection_lines(&lines, true, 10);
    /// assert_eq!(inside.len(), 1);
    /// assert_eq!(inside[0].points(), &[Point::new(100, 50), Point::new(50, 50), Point::new(0, 50)]);
    ///
    /// let pieces = shape.intersection_lines(&lines, false, 10);
    /// assert_eq!(pieces.len(), 2);
    /// ```
    pub fn intersection_lines<K: LineKind>(
        &self,
        lines: &LinesSet<K>,
        restitch: bool,
        max_stitch_distance: Coord,
    ) -> OpenLinesSet {
        if self.is_empty() || lines.is_empty() {
            return OpenLinesSet::new();
        }

        let segments = lines.split_into_segments();
        let mut clipper = Clipper::new();
        segments.add_paths(&mut clipper, PathRole::Subject);
        self.add_paths(&mut clipper, PathRole::Clip);
        let clipped =
            OpenLinesSet::from_paths(clipper.execute_lines(ClipType::Intersection, FillRule::EvenOdd));

        if !restitch {
            return clipped;
        }

        let options = StitchOptions {
            max_stitch_distance,
            snap_distance: RESTITCH_SNAP_DISTANCE,
        };
        let (mut result, closed) = clipped.stitch(&options);
        for closed_line in closed {
            if closed_line.is_empty() {
                continue;
            }
            let mut points = closed_line.points.into_vec();
            if points.len() > 2 {
                points.push(points[0]);
            }
            result.push(Polyline::open(points));
        }
        result
    }
}
