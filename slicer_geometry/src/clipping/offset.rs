//! Offsetting (buffering) of closed polygons and lines.
//!
//! The offset region is built from swept pieces: a two sided band of half width `|delta|` around
//! every edge plus a join piece at every corner that opens a gap (and cap pieces at open line
//! ends). Growing unions the pieces with the region, shrinking subtracts them from it. The band
//! pieces cover exactly the points within `|delta|` of an edge, so the result matches the
//! Minkowski sum/difference with a disk up to the chosen corner style.
use super::{overlay, overlay_f64, ClipType, EndType, FillRule, JoinType};
use crate::core::math::{signed_area, vec2, Point, Vector2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Offsets below this magnitude are treated as no offset.
const MIN_OFFSET: f64 = 0.5;

/// Miter limit used when none is given.
pub const DEFAULT_MITER_LIMIT: f64 = 1.2;

/// Options for [ClipperOffset].
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetOptions {
    /// Corner style.
    pub join_type: JoinType,
    /// Maximum ratio of miter length to offset distance before a miter corner is squared off.
    /// Values below 2 behave as 2.
    pub miter_limit: f64,
    /// Maximum distance (in coordinate units) the arc approximation of round corners and ends may
    /// deviate from the true arc. Clamped to a quarter of the offset distance, non positive values
    /// use 0.25.
    pub arc_tolerance: f64,
}

impl OffsetOptions {
    pub fn new() -> Self {
        Self {
            join_type: JoinType::Miter,
            miter_limit: DEFAULT_MITER_LIMIT,
            arc_tolerance: 10.0,
        }
    }
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Offsets closed polygons and lines by a distance.
///
/// Closed polygons ([EndType::ClosedPolygon]) are combined into one region (orientation is fixed
/// so the bottom most ring is counter clockwise, then rings are united with the positive fill
/// rule) which grows for positive and shrinks for negative distances. Lines (all other end types)
/// only produce output for positive distances.
///
/// # Examples
///
/// ```
/// # use slicer_geometry::clipping::*;
/// # use slicer_geometry::core::math::{signed_area, Point};
/// let square = vec![Point::new(0, 0), Point::new(100, 0), Point::new(100, 100), Point::new(0, 100)];
/// let mut offsetter = ClipperOffset::new(OffsetOptions::new());
/// offsetter.add_path(&square, EndType::ClosedPolygon);
///
/// let grown = offsetter.execute(10.0);
/// assert_eq!(grown.len(), 1);
/// // miter corners stay sharp for right angles
/// assert_eq!(signed_area(&grown[0]), 120.0 * 120.0);
///
/// let shrunk = offsetter.execute(-10.0);
/// assert_eq!(signed_area(&shrunk[0]), 80.0 * 80.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClipperOffset {
    options: OffsetOptions,
    polygons: Vec<Vec<Point>>,
    lines: Vec<(Vec<Point>, EndType)>,
}

impl ClipperOffset {
    pub fn new(options: OffsetOptions) -> Self {
        Self {
            options,
            polygons: Vec::new(),
            lines: Vec::new(),
        }
    }

    #[inline]
    pub fn options(&self) -> &OffsetOptions {
        &self.options
    }

    /// Add a path. Consecutive duplicate points are skipped; polygons need at least 3 distinct
    /// points, closed lines at least 2 and open lines at least 1.
    pub fn add_path(&mut self, path: &[Point], end_type: EndType) {
        let mut points: Vec<Point> = Vec::with_capacity(path.len());
        for &p in path {
            if points.last() != Some(&p) {
                points.push(p);
            }
        }
        if end_type == EndType::ClosedPolygon || end_type == EndType::ClosedLine {
            while points.len() > 1 && points.first() == points.last() {
                points.pop();
            }
        }

        match end_type {
            EndType::ClosedPolygon => {
                if points.len() >= 3 {
                    self.polygons.push(points);
                }
            }
            EndType::ClosedLine => {
                if points.len() >= 2 {
                    self.lines.push((points, end_type));
                }
            }
            _ => {
                if !points.is_empty() {
                    self.lines.push((points, end_type));
                }
            }
        }
    }

    pub fn add_paths<'a, I>(&mut self, paths: I, end_type: EndType)
    where
        I: IntoIterator<Item = &'a [Point]>,
    {
        for path in paths {
            self.add_path(path, end_type);
        }
    }

    /// Remove all added paths, keeping the options.
    pub fn clear(&mut self) {
        self.polygons.clear();
        self.lines.clear();
    }

    /// Offset all added paths by `delta`, returning normalized closed rings (outer contours
    /// counter clockwise followed by their clockwise holes).
    pub fn execute(&self, delta: f64) -> Vec<Vec<Point>> {
        let region = self.polygon_region();
        let radius = delta.abs();
        if radius < MIN_OFFSET {
            return region.into_iter().flatten().collect();
        }

        let mut pieces = PieceBuilder::new(radius, &self.options);
        let side = delta.signum();
        for ring in region.iter().flatten() {
            pieces.add_polygon_ring(ring, side);
        }
        if delta > 0.0 {
            for (line, end_type) in &self.lines {
                pieces.add_line(line, *end_type);
            }
        }

        let mut region_paths: Vec<Vec<[f64; 2]>> = region
            .iter()
            .flatten()
            .map(|ring| ring.iter().map(|&p| p.into()).collect())
            .collect();

        let result = if delta > 0.0 {
            region_paths.extend(pieces.pieces);
            overlay_f64(&region_paths, &Vec::new(), ClipType::Union, FillRule::NonZero)
        } else {
            overlay_f64(&region_paths, &pieces.pieces, ClipType::Difference, FillRule::NonZero)
        };

        log::debug!(
            "offset {} polygons and {} lines by {}: {} parts",
            self.polygons.len(),
            self.lines.len(),
            delta,
            result.len()
        );
        result.into_iter().flatten().collect()
    }

    fn polygon_region(&self) -> Vec<Vec<Vec<Point>>> {
        if self.polygons.is_empty() {
            return Vec::new();
        }

        // bottom most (then left most) point belongs to an outer contour
        let mut lowest: Option<(usize, Point)> = None;
        for (i, poly) in self.polygons.iter().enumerate() {
            for &p in poly {
                let is_lower = lowest.is_none_or(|(_, l)| p.y < l.y || (p.y == l.y && p.x < l.x));
                if is_lower {
                    lowest = Some((i, p));
                }
            }
        }

        let reverse_all = lowest.is_some_and(|(i, _)| signed_area(&self.polygons[i]) < 0.0);
        if reverse_all {
            let reversed: Vec<Vec<Point>> = self
                .polygons
                .iter()
                .map(|p| p.iter().rev().copied().collect())
                .collect();
            overlay(&reversed, &[], ClipType::Union, FillRule::Positive)
        } else {
            overlay(&self.polygons, &[], ClipType::Union, FillRule::Positive)
        }
    }
}

struct PieceBuilder {
    radius: f64,
    join_type: JoinType,
    miter_limit: f64,
    circle_steps: usize,
    pieces: Vec<Vec<[f64; 2]>>,
}

impl PieceBuilder {
    fn new(radius: f64, options: &OffsetOptions) -> Self {
        let tolerance = if options.arc_tolerance <= 0.0 {
            0.25
        } else {
            options.arc_tolerance.min(radius * 0.25)
        };
        let steps = std::f64::consts::PI / (1.0 - tolerance / radius).acos();
        let circle_steps = if steps.is_finite() {
            (steps.ceil() as usize).clamp(4, 4096)
        } else {
            4
        };

        Self {
            radius,
            join_type: options.join_type,
            miter_limit: options.miter_limit.max(2.0),
            circle_steps,
            pieces: Vec::new(),
        }
    }

    /// Ring of a normalized region (filled side on the left). `side` is 1 when growing, -1 when
    /// shrinking.
    fn add_polygon_ring(&mut self, ring: &[Point], side: f64) {
        let n = ring.len();
        for i in 0..n {
            self.add_band(ring[i], ring[(i + 1) % n], 0.0, 0.0);
        }
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            self.add_corner(prev, ring[i], next, Some(side));
        }
    }

    fn add_line(&mut self, line: &[Point], end_type: EndType) {
        let n = line.len();
        if n == 1 {
            let c = Vector2::from_point(line[0]);
            match end_type {
                EndType::OpenRound => self.add_disk(c),
                EndType::OpenSquare => {
                    let r = self.radius;
                    self.push_piece(vec![
                        c + vec2(-r, -r),
                        c + vec2(r, -r),
                        c + vec2(r, r),
                        c + vec2(-r, r),
                    ]);
                }
                _ => {}
            }
            return;
        }

        if end_type == EndType::ClosedLine {
            for i in 0..n {
                self.add_band(line[i], line[(i + 1) % n], 0.0, 0.0);
            }
            for i in 0..n {
                let prev = line[(i + n - 1) % n];
                let next = line[(i + 1) % n];
                self.add_corner(prev, line[i], next, None);
            }
            return;
        }

        let square_ends = end_type == EndType::OpenSquare;
        let ext = if square_ends { self.radius } else { 0.0 };
        for i in 0..n - 1 {
            let ext_start = if i == 0 { ext } else { 0.0 };
            let ext_end = if i == n - 2 { ext } else { 0.0 };
            self.add_band(line[i], line[i + 1], ext_start, ext_end);
        }
        for i in 1..n - 1 {
            self.add_corner(line[i - 1], line[i], line[i + 1], None);
        }
        if end_type == EndType::OpenRound {
            self.add_disk(Vector2::from_point(line[0]));
            self.add_disk(Vector2::from_point(line[n - 1]));
        }
    }

    fn add_band(&mut self, a: Point, b: Point, ext_start: f64, ext_end: f64) {
        if a == b {
            return;
        }
        let a = Vector2::from_point(a);
        let b = Vector2::from_point(b);
        let u = (b - a).normalize();
        let n = u.unit_right_normal().scale(self.radius);
        let a = a - u.scale(ext_start);
        let b = b + u.scale(ext_end);
        self.push_piece(vec![a + n, b + n, b - n, a - n]);
    }

    /// Corner piece at `v`. For polygon rings `side` selects the side that is offset (only corners
    /// turning away from that side get a piece), lines fill the outer side of every turn.
    fn add_corner(&mut self, prev: Point, v: Point, next: Point, side: Option<f64>) {
        if prev == v || v == next {
            return;
        }
        let c = Vector2::from_point(v);
        if self.join_type == JoinType::Round {
            self.add_disk(c);
            return;
        }

        let u1 = (c - Vector2::from_point(prev)).normalize();
        let u2 = (Vector2::from_point(next) - c).normalize();
        let cross = u1.perp_dot(u2);
        let dot = u1.dot(u2);

        if dot < 0.0 && cross.abs() < 1e-9 {
            self.add_spike(c, u1);
            return;
        }

        let s = match side {
            Some(s) if s * cross > 0.0 => s,
            Some(_) => return,
            None if cross > 0.0 => 1.0,
            None if cross < 0.0 => -1.0,
            None => return,
        };

        let r = self.radius;
        let n1 = u1.unit_right_normal().scale(s);
        let n2 = u2.unit_right_normal().scale(s);
        let m = (n1 + n2).normalize();
        let cos_half = n1.dot(m);

        if self.join_type == JoinType::Miter && cos_half > 0.0 && 1.0 / cos_half <= self.miter_limit
        {
            let tip = c + m.scale(r / cos_half);
            self.push_piece(vec![c, c + n1.scale(r), tip, c + n2.scale(r)]);
            return;
        }

        // squared off at distance r along the bisector
        let along = u1.dot(m);
        if along <= 0.0 {
            self.add_spike(c, u1);
            return;
        }
        let t = r * (1.0 - cos_half) / along;
        self.push_piece(vec![
            c,
            c + n1.scale(r),
            c + n1.scale(r) + u1.scale(t),
            c + n2.scale(r) - u2.scale(t),
            c + n2.scale(r),
        ]);
    }

    /// Line doubling back on itself at `c`, arriving with direction `u`.
    fn add_spike(&mut self, c: Vector2, u: Vector2) {
        if self.join_type == JoinType::Round {
            self.add_disk(c);
            return;
        }
        let r = self.radius;
        let n = u.unit_right_normal().scale(r);
        let ahead = u.scale(r);
        self.push_piece(vec![c + n, c + n + ahead, c - n + ahead, c - n]);
    }

    fn add_disk(&mut self, c: Vector2) {
        let step = std::f64::consts::TAU / self.circle_steps as f64;
        let r = self.radius;
        let points = (0..self.circle_steps)
            .map(|k| {
                let angle = step * k as f64;
                c + vec2(r * angle.cos(), r * angle.sin())
            })
            .collect();
        self.push_piece(points);
    }

    /// Store a piece counter clockwise so all pieces add up under the non zero fill rule.
    fn push_piece(&mut self, points: Vec<Vector2>) {
        let mut double_area = 0.0;
        let count = points.len();
        for i in 0..count {
            let a = points[i];
            let b = points[(i + 1) % count];
            double_area += a.perp_dot(b);
        }
        if double_area == 0.0 {
            return;
        }
        let mut piece: Vec<[f64; 2]> = points.into_iter().map(|p| [p.x, p.y]).collect();
        if double_area < 0.0 {
            piece.reverse();
        }
        self.pieces.push(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: i64) -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(size, 0),
            Point::new(size, size),
            Point::new(0, size),
        ]
    }

    fn offset_area(path: &[Point], end_type: EndType, options: OffsetOptions, delta: f64) -> f64 {
        let mut offsetter = ClipperOffset::new(options);
        offsetter.add_path(path, end_type);
        offsetter.execute(delta).iter().map(|r| signed_area(r)).sum()
    }

    #[test]
    fn square_join_cuts_corners() {
        let options = OffsetOptions {
            join_type: JoinType::Square,
            ..Default::default()
        };
        let area = offset_area(&square(1000), EndType::ClosedPolygon, options, 100.0);
        // each corner loses a triangle of the full miter square
        let cut = 100.0 * (2.0 - std::f64::consts::SQRT_2);
        let expected = 1200.0 * 1200.0 - 4.0 * cut * cut / 2.0;
        assert!((area - expected).abs() < 500.0, "area {area}, expected {expected}");
    }

    #[test]
    fn round_join_area() {
        let options = OffsetOptions {
            join_type: JoinType::Round,
            arc_tolerance: 1.0,
            ..Default::default()
        };
        let area = offset_area(&square(1000), EndType::ClosedPolygon, options, 100.0);
        let expected = 1000.0 * 1000.0 + 4.0 * 1000.0 * 100.0 + std::f64::consts::PI * 100.0 * 100.0;
        assert!(area < expected);
        assert!((area - expected).abs() / expected < 0.002, "area {area}");
    }

    #[test]
    fn shrink_past_size_removes_polygon() {
        let mut offsetter = ClipperOffset::new(OffsetOptions::new());
        offsetter.add_path(&square(100), EndType::ClosedPolygon);
        assert!(offsetter.execute(-60.0).is_empty());
    }

    #[test]
    fn clockwise_input_is_fixed() {
        let mut cw = square(100);
        cw.reverse();
        let area = offset_area(&cw, EndType::ClosedPolygon, OffsetOptions::new(), 10.0);
        assert_eq!(area, 120.0 * 120.0);
    }

    #[test]
    fn open_line_ends() {
        let line = vec![Point::new(0, 0), Point::new(1000, 0)];
        let butt = offset_area(&line, EndType::OpenButt, OffsetOptions::new(), 50.0);
        assert_eq!(butt, 1000.0 * 100.0);
        let square_ends = offset_area(&line, EndType::OpenSquare, OffsetOptions::new(), 50.0);
        assert_eq!(square_ends, 1100.0 * 100.0);
        let round_ends = offset_area(&line, EndType::OpenRound, OffsetOptions::new(), 50.0);
        assert!(round_ends > butt && round_ends < square_ends);
    }

    #[test]
    fn lines_do_not_shrink() {
        let line = vec![Point::new(0, 0), Point::new(1000, 0)];
        assert_eq!(offset_area(&line, EndType::OpenSquare, OffsetOptions::new(), -50.0), 0.0);
    }

    #[test]
    fn closed_line_makes_band() {
        let area = offset_area(&square(1000), EndType::ClosedLine, OffsetOptions::new(), 50.0);
        assert_eq!(area, 1100.0 * 1100.0 - 900.0 * 900.0);
    }

    #[test]
    fn miter_limit_falls_back_to_square() {
        // sharp spike
        let triangle = vec![Point::new(0, 0), Point::new(1000, 0), Point::new(0, 100)];
        let mitered = offset_area(
            &triangle,
            EndType::ClosedPolygon,
            OffsetOptions {
                miter_limit: 100.0,
                ..Default::default()
            },
            10.0,
        );
        let squared = offset_area(&triangle, EndType::ClosedPolygon, OffsetOptions::new(), 10.0);
        assert!(squared < mitered);
    }
}
