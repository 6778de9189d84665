//! Homogeneous collections of polylines.
//!
//! [LinesSet] holds polylines of one static [LineKind]; bulk operations (offset, length,
//! degenerate vertex removal, segment splitting) are written once and dispatched on the kind at
//! compile time. The concrete collections are [OpenLinesSet], [ClosedLinesSet] and [Shape].
mod stitch;

pub use stitch::*;

use crate::{
    clipping::{
        ClipType, Clipper, ClipperOffset, EndType, FillRule, JoinType, OffsetOptions, PathRole,
        DEFAULT_MITER_LIMIT,
    },
    core::math::{Coord, Point, Point3Matrix, PointMatrix},
    polyline::{CheckNonEmpty, Polyline, PolylineKind},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

/// Static element kind of a [LinesSet].
pub trait LineKind: Copy + Default + std::fmt::Debug + Send + Sync + 'static {
    /// Kind given to lines created by the collection.
    const KIND: PolylineKind;

    /// Returns `true` if a polyline of `kind` may be stored in the collection.
    #[inline]
    fn accepts(kind: PolylineKind) -> bool {
        kind == Self::KIND
    }
}

/// Marker for collections of open polylines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OpenLines;

/// Marker for collections of closed (not filled) polylines, implicitly or explicitly closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClosedLines;

/// Marker for collections of filled polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Polygons;

impl LineKind for OpenLines {
    const KIND: PolylineKind = PolylineKind::Open;
}

impl LineKind for ClosedLines {
    const KIND: PolylineKind = PolylineKind::ImplicitlyClosed;

    #[inline]
    fn accepts(kind: PolylineKind) -> bool {
        matches!(
            kind,
            PolylineKind::ImplicitlyClosed | PolylineKind::ExplicitlyClosed
        )
    }
}

impl LineKind for Polygons {
    const KIND: PolylineKind = PolylineKind::Filled;
}

/// Ordered collection of polylines of the static kind `K`.
///
/// Dereferences to `Vec<Polyline>` for read access and in place edits of the lines. Lines added
/// through the collection's own methods are checked (in debug builds) to be of a kind the
/// collection accepts.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(transparent, bound = "")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinesSet<K: LineKind> {
    lines: Vec<Polyline>,
    #[cfg_attr(feature = "serde", serde(skip))]
    marker: PhantomData<K>,
}

/// Collection of open polylines.
pub type OpenLinesSet = LinesSet<OpenLines>;

/// Collection of closed, non filled polylines.
pub type ClosedLinesSet = LinesSet<ClosedLines>;

/// Collection of filled polygons representing a 2D region (outlines and holes).
pub type Shape = LinesSet<Polygons>;

impl<K: LineKind> Default for LinesSet<K> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: LineKind> Deref for LinesSet<K> {
    type Target = Vec<Polyline>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

impl<K: LineKind> DerefMut for LinesSet<K> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.lines
    }
}

impl<K: LineKind> LinesSet<K> {
    #[inline]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            marker: PhantomData,
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
            marker: PhantomData,
        }
    }

    /// Create from existing polylines.
    pub fn from_lines(lines: Vec<Polyline>) -> Self {
        debug_assert!(
            lines.iter().all(|l| K::accepts(l.kind())),
            "polyline kind not accepted by collection"
        );
        Self {
            lines,
            marker: PhantomData,
        }
    }

    /// Create from raw point paths, each becoming a line of kind `K::KIND`.
    pub fn from_paths(paths: Vec<Vec<Point>>) -> Self {
        paths
            .into_iter()
            .map(|p| Polyline::from_points(p, K::KIND))
            .collect()
    }

    #[inline]
    pub fn lines(&self) -> &[Polyline] {
        &self.lines
    }

    #[inline]
    pub fn into_lines(self) -> Vec<Polyline> {
        self.lines
    }

    /// Add a line.
    #[inline]
    pub fn push(&mut self, line: Polyline) {
        debug_assert!(
            K::accepts(line.kind()),
            "polyline kind {:?} not accepted by collection",
            line.kind()
        );
        self.lines.push(line);
    }

    /// Add a line made of `points` with the collection's kind.
    #[inline]
    pub fn push_points(&mut self, points: Vec<Point>) {
        self.lines.push(Polyline::from_points(points, K::KIND));
    }

    /// Add a line if it passes `check`. Returns `true` if the line was added.
    pub fn push_checked(&mut self, line: Polyline, check: CheckNonEmpty) -> bool {
        let add = match check {
            CheckNonEmpty::EvenIfEmpty => true,
            CheckNonEmpty::OnlyIfNotEmpty => !line.is_empty(),
            CheckNonEmpty::OnlyIfValid => line.is_valid(),
        };
        if add {
            self.push(line);
        }
        add
    }

    /// Move all lines of `other` to the end of this collection.
    pub fn append(&mut self, other: LinesSet<K>) {
        self.lines.extend(other.lines);
    }

    /// Total number of points over all lines.
    pub fn point_count(&self) -> usize {
        self.lines.iter().map(|l| l.len()).sum()
    }

    /// Remove the line at `index` by moving the last line into its place (order is not
    /// preserved).
    pub fn remove_at(&mut self, index: usize) {
        debug_assert!(index < self.lines.len(), "index out of bounds");
        if index < self.lines.len() {
            self.lines.swap_remove(index);
        }
    }

    /// Sum of the lengths of all lines.
    pub fn length(&self) -> Coord {
        self.lines.iter().map(|l| l.length()).sum()
    }

    /// Every segment of every line as a 2 point open polyline.
    pub fn split_into_segments(&self) -> OpenLinesSet {
        let mut result = OpenLinesSet::new();
        self.split_into_segments_into(&mut result);
        result
    }

    pub fn split_into_segments_into(&self, result: &mut OpenLinesSet) {
        for line in &self.lines {
            line.split_into_segments_into(result);
        }
    }

    /// Move all lines by `delta`.
    pub fn translate(&mut self, delta: Point) {
        if delta == Point::zero() {
            return;
        }
        for line in &mut self.lines {
            line.translate(delta);
        }
    }

    pub fn apply_matrix(&mut self, matrix: &PointMatrix) {
        for line in &mut self.lines {
            line.apply_matrix(matrix);
        }
    }

    pub fn apply_matrix3(&mut self, matrix: &Point3Matrix) {
        for line in &mut self.lines {
            line.apply_matrix3(matrix);
        }
    }

    /// Hand all lines to a boolean operation, only filled polygons are surfaces.
    pub fn add_paths(&self, clipper: &mut Clipper, role: PathRole) {
        for line in &self.lines {
            clipper.add_polyline(line, role);
        }
    }

    /// Area covered by offsetting the lines by `distance`.
    ///
    /// - Polygons are united (non zero fill) then grown or shrunk. A zero distance returns the
    ///   polygons unchanged.
    /// - Closed lines become a band around the ring. A zero distance returns the rings as
    ///   polygons.
    /// - Open lines become a band with square ends for [JoinType::Miter] and round ends
    ///   otherwise. A zero or negative distance returns nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::lines_set::*;
    /// # use slicer_geometry::clipping::JoinType;
    /// # use slicer_geometry::core::math::Point;
    /// let mut lines = OpenLinesSet::new();
    /// lines.add_segment(Point::new(0, 0), Point::new(1000, 0));
    /// let band = lines.offset(50, JoinType::Miter, 1.2);
    /// assert_eq!(band.area(), 1100.0 * 100.0);
    /// assert!(lines.offset(0, JoinType::Miter, 1.2).is_empty());
    /// ```
    pub fn offset(&self, distance: Coord, join_type: JoinType, miter_limit: f64) -> Shape {
        if self.lines.is_empty() {
            return Shape::new();
        }

        let options = OffsetOptions {
            join_type,
            miter_limit,
            ..Default::default()
        };
        let mut offsetter = ClipperOffset::new(options);

        match K::KIND {
            PolylineKind::Filled => {
                if distance == 0 {
                    return self.lines.iter().cloned().map(Polyline::into_polygon).collect();
                }
                let mut clipper = Clipper::new();
                self.add_paths(&mut clipper, PathRole::Subject);
                for path in clipper.execute(ClipType::Union, FillRule::NonZero) {
                    offsetter.add_path(&path, EndType::ClosedPolygon);
                }
            }
            PolylineKind::ImplicitlyClosed | PolylineKind::ExplicitlyClosed => {
                if distance == 0 {
                    return self.lines.iter().cloned().map(Polyline::into_polygon).collect();
                }
                for line in &self.lines {
                    offsetter.add_path(line.engine_points(), EndType::ClosedLine);
                }
            }
            PolylineKind::Open => {
                if distance <= 0 {
                    return Shape::new();
                }
                let end_type = if join_type == JoinType::Miter {
                    EndType::OpenSquare
                } else {
                    EndType::OpenRound
                };
                for line in &self.lines {
                    offsetter.add_path(line.points(), end_type);
                }
            }
        }

        Shape::from_paths(offsetter.execute(distance as f64))
    }

    /// Band between the lines offset outward by `outer_offset` and inward by `inner_offset`.
    pub fn create_tube_shape(&self, inner_offset: Coord, outer_offset: Coord) -> Shape {
        let outer = self.offset(outer_offset, JoinType::Miter, DEFAULT_MITER_LIMIT);
        let inner = self.offset(-inner_offset, JoinType::Miter, DEFAULT_MITER_LIMIT);
        outer.difference(&inner)
    }

    /// Remove vertices forming zero area spikes (the path doubles back on itself), rolling back
    /// earlier vertices that become spikes after a removal. Open lines keep their end points,
    /// closed lines wrap around and are removed when 2 or fewer points remain.
    pub fn remove_degenerate_verts(&mut self) {
        let mut line_idx = 0;
        while line_idx < self.lines.len() {
            let line = &mut self.lines[line_idx];
            let is_open = line.kind() == PolylineKind::Open;
            if is_open && line.len() < 3 {
                line_idx += 1;
                continue;
            }

            let points = line.points();
            let count = points.len();
            let (start, end) = if is_open { (1, count - 1) } else { (0, count) };
            let mut result: Vec<Point> = Vec::with_capacity(count);
            result.extend_from_slice(&points[..start]);

            let mut changed = false;
            for idx in start..end {
                let last = result.last().copied().unwrap_or(points[count - 1]);
                if idx + 1 >= count && result.is_empty() {
                    break;
                }
                let next = if idx + 1 >= count {
                    result[0]
                } else {
                    points[idx + 1]
                };

                if is_degenerate(last, points[idx], next) {
                    changed = true;
                    while result.len() > 1
                        && is_degenerate(result[result.len() - 2], result[result.len() - 1], next)
                    {
                        result.pop();
                    }
                } else {
                    result.push(points[idx]);
                }
            }
            result.extend_from_slice(&points[end..]);

            if changed {
                if is_open || result.len() > 2 {
                    line.set_points(result);
                } else {
                    // swapped in line is processed at the same index
                    self.remove_at(line_idx);
                    continue;
                }
            }
            line_idx += 1;
        }
    }
}

#[inline]
fn is_degenerate(last: Point, now: Point, next: Point) -> bool {
    let last_line = now - last;
    let next_line = next - now;
    last_line.dot(next_line) == -(last_line.length() * next_line.length())
}

impl OpenLinesSet {
    /// Add a 2 point open line.
    #[inline]
    pub fn add_segment(&mut self, from: Point, to: Point) {
        self.lines.push(Polyline::open(vec![from, to]));
    }
}

impl<K: LineKind> FromIterator<Polyline> for LinesSet<K> {
    fn from_iter<T: IntoIterator<Item = Polyline>>(iter: T) -> Self {
        let mut result = Self::new();
        for line in iter {
            result.push(line);
        }
        result
    }
}

impl<K: LineKind> Extend<Polyline> for LinesSet<K> {
    fn extend<T: IntoIterator<Item = Polyline>>(&mut self, iter: T) {
        for line in iter {
            self.push(line);
        }
    }
}

impl<K: LineKind> IntoIterator for LinesSet<K> {
    type Item = Polyline;
    type IntoIter = std::vec::IntoIter<Polyline>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a, K: LineKind> IntoIterator for &'a LinesSet<K> {
    type Item = &'a Polyline;
    type IntoIter = std::slice::Iter<'a, Polyline>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl<'a, K: LineKind> IntoIterator for &'a mut LinesSet<K> {
    type Item = &'a mut Polyline;
    type IntoIter = std::slice::IterMut<'a, Polyline>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter_mut()
    }
}

impl<K: LineKind> From<Polyline> for LinesSet<K> {
    fn from(line: Polyline) -> Self {
        let mut result = Self::new();
        result.push(line);
        result
    }
}
