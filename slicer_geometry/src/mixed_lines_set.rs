//! Heterogeneous collection of shared polylines.
use crate::{
    clipping::{ClipperOffset, EndType, JoinType, OffsetOptions},
    core::math::Coord,
    lines_set::{ClosedLinesSet, LineKind, LinesSet, OpenLinesSet, Shape},
    polyline::Polyline,
};
use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

/// Shared, reference counted polyline.
///
/// Several collections may hold the same polyline. Writes through [MixedLinesSet::make_mut]
/// copy the polyline first if it is shared, so other holders never observe the change.
pub type PolylineHandle = Arc<Polyline>;

/// Ordered collection of polylines of any kind (open, closed and filled mixed).
///
/// # Examples
///
/// ```
/// # use slicer_geometry::mixed_lines_set::*;
/// # use slicer_geometry::polyline::Polyline;
/// # use slicer_geometry::core::math::Point;
/// let square = vec![Point::new(0, 0), Point::new(100, 0), Point::new(100, 100), Point::new(0, 100)];
/// let mut mixed = MixedLinesSet::new();
/// mixed.push_polyline(Polyline::open(vec![Point::new(0, 0), Point::new(50, 0)]));
/// mixed.push_polyline(Polyline::polygon(square));
///
/// assert_eq!(mixed.length(), 450);
/// assert_eq!(mixed.point_count(), 6);
/// // a zero offset keeps only the polygon
/// assert_eq!(mixed.offset(0, Default::default(), 1.2).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MixedLinesSet {
    lines: Vec<PolylineHandle>,
}

impl MixedLinesSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
        }
    }

    /// Add an owned polyline of any kind.
    #[inline]
    pub fn push_polyline(&mut self, line: Polyline) {
        self.lines.push(Arc::new(line));
    }

    /// Add a shared polyline, the collection becomes one more holder of it.
    #[inline]
    pub fn push_handle(&mut self, line: PolylineHandle) {
        self.lines.push(line);
    }

    /// Move all lines of `lines_set` into the collection.
    pub fn push_lines_set<K: LineKind>(&mut self, lines_set: LinesSet<K>) {
        self.lines.reserve(lines_set.len());
        self.lines
            .extend(lines_set.into_lines().into_iter().map(Arc::new));
    }

    /// Copy all lines of `lines_set` into the collection.
    pub fn push_lines_set_ref<K: LineKind>(&mut self, lines_set: &LinesSet<K>) {
        self.lines.reserve(lines_set.len());
        self.lines
            .extend(lines_set.iter().cloned().map(Arc::new));
    }

    #[inline]
    pub fn push_open_lines(&mut self, lines: OpenLinesSet) {
        self.push_lines_set(lines);
    }

    #[inline]
    pub fn push_closed_lines(&mut self, lines: ClosedLinesSet) {
        self.push_lines_set(lines);
    }

    #[inline]
    pub fn push_shape(&mut self, shape: &Shape) {
        self.push_lines_set_ref(shape);
    }

    /// Mutable access to the polyline at `index`, copying it first if it is shared.
    #[inline]
    pub fn make_mut(&mut self, index: usize) -> &mut Polyline {
        Arc::make_mut(&mut self.lines[index])
    }

    /// Sum of the lengths of all lines.
    pub fn length(&self) -> Coord {
        self.lines.iter().map(|line| line.length()).sum()
    }

    /// Total number of points over all lines.
    pub fn point_count(&self) -> usize {
        self.lines.iter().map(|line| line.len()).sum()
    }

    /// Area covered by offsetting every line by `distance`.
    ///
    /// Polygons are united first and offset as regions, closed lines become bands around the
    /// ring and open lines get square ends for [JoinType::Miter] and round ends otherwise. A
    /// zero distance returns only the filled elements, open and closed lines are dropped.
    pub fn offset(&self, distance: Coord, join_type: JoinType, miter_limit: f64) -> Shape {
        if distance == 0 {
            return self
                .lines
                .iter()
                .filter(|line| line.is_filled())
                .map(|line| line.as_ref().clone())
                .collect();
        }

        let options = OffsetOptions {
            join_type,
            miter_limit,
            ..Default::default()
        };
        let mut offsetter = ClipperOffset::new(options);
        let mut polygons = Shape::new();
        for line in &self.lines {
            if line.is_filled() {
                polygons.push(line.as_ref().clone());
            } else if line.has_closing_segment() {
                offsetter.add_path(line.engine_points(), EndType::ClosedLine);
            } else {
                let end_type = if join_type == JoinType::Miter {
                    EndType::OpenSquare
                } else {
                    EndType::OpenRound
                };
                offsetter.add_path(line.points(), end_type);
            }
        }

        if !polygons.is_empty() {
            for polygon in polygons.union_self().iter() {
                offsetter.add_path(polygon.points(), EndType::ClosedPolygon);
            }
        }

        Shape::from_paths(offsetter.execute(distance as f64))
    }
}

impl Deref for MixedLinesSet {
    type Target = Vec<PolylineHandle>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

impl DerefMut for MixedLinesSet {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.lines
    }
}

impl FromIterator<Polyline> for MixedLinesSet {
    fn from_iter<I: IntoIterator<Item = Polyline>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

impl FromIterator<PolylineHandle> for MixedLinesSet {
    fn from_iter<I: IntoIterator<Item = PolylineHandle>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MixedLinesSet {
    type Item = &'a PolylineHandle;
    type IntoIter = std::slice::Iter<'a, PolylineHandle>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
