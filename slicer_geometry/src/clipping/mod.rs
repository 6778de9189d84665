//! Boundary to the boolean clipping engine.
//!
//! Paths are handed in as subject or clip, as surfaces (closed regions) or lines (open paths),
//! and executed with a [ClipType] and [FillRule]. Surfaces go through `i_overlay`; open lines are
//! split against the clip region here (see [line_clip]). Offsetting lives in [ClipperOffset] and
//! the containment hierarchy output mode in [PolyTree].
//!
//! All paths crossing this boundary are implicitly closed rings of fixed point [Point]s. Output
//! rings are normalized: outer contours are counter clockwise and holes clockwise, consecutive
//! duplicate points are removed and rings with less than 3 points are dropped.
mod line_clip;
mod offset;
mod poly_tree;

pub use offset::*;
pub use poly_tree::*;

use crate::{
    core::math::{signed_area, Point},
    polyline::Polyline,
};
use i_overlay::{
    core::{fill_rule::FillRule as EngineFillRule, overlay_rule::OverlayRule},
    float::single::SingleFloatOverlay,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use static_aabb2d_index::{
    IndexableNum, StaticAABB2DIndex, StaticAABB2DIndexBuildError, StaticAABB2DIndexBuilder,
};
use std::sync::OnceLock;

/// Boolean operation to execute.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ClipType {
    Intersection,
    Union,
    Difference,
    Xor,
}

/// Rule deciding which regions of a set of (possibly overlapping) rings are filled, based on the
/// winding number of the region.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum FillRule {
    /// Odd winding numbers are filled.
    #[default]
    EvenOdd,
    /// Non zero winding numbers are filled.
    NonZero,
    /// Winding numbers greater than zero are filled (counter clockwise rings add).
    Positive,
    /// Winding numbers less than zero are filled (clockwise rings add).
    Negative,
}

impl FillRule {
    /// Returns `true` if a region with the given winding number is filled under this rule.
    #[inline]
    pub fn is_filled(self, winding_number: i32) -> bool {
        match self {
            FillRule::EvenOdd => winding_number % 2 != 0,
            FillRule::NonZero => winding_number != 0,
            FillRule::Positive => winding_number > 0,
            FillRule::Negative => winding_number < 0,
        }
    }
}

/// Role of a path in a boolean operation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PathRole {
    Subject,
    Clip,
}

/// Corner style used when offsetting.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum JoinType {
    /// Corners are cut off at the offset distance, perpendicular to the corner bisector.
    Square,
    /// Corners are rounded with an arc of the offset distance.
    Round,
    /// Corners are extended to a sharp point, falling back to [JoinType::Square] past the miter
    /// limit.
    #[default]
    Miter,
}

/// How the ends of a path are treated when offsetting.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EndType {
    /// Path is a filled polygon, offsetting grows or shrinks the region.
    ClosedPolygon,
    /// Path is a closed line, offsetting creates a band around the ring.
    ClosedLine,
    /// Open line, ends are cut off flat at the end points.
    OpenButt,
    /// Open line, ends are extended by the offset distance and squared off.
    OpenSquare,
    /// Open line, ends are rounded.
    OpenRound,
}

/// Boolean operation executor.
///
/// # Examples
///
/// ```
/// # use slicer_geometry::clipping::*;
/// # use slicer_geometry::core::math::{signed_area, Point};
/// let a = vec![Point::new(0, 0), Point::new(10, 0), Point::new(10, 10), Point::new(0, 10)];
/// let b = vec![Point::new(5, 5), Point::new(15, 5), Point::new(15, 15), Point::new(5, 15)];
/// let mut clipper = Clipper::new();
/// clipper.add_path(&a, PathRole::Subject, true);
/// clipper.add_path(&b, PathRole::Clip, true);
/// let result = clipper.execute(ClipType::Intersection, FillRule::EvenOdd);
/// assert_eq!(result.len(), 1);
/// assert_eq!(signed_area(&result[0]), 25.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Clipper {
    subject_surfaces: Vec<Vec<Point>>,
    clip_surfaces: Vec<Vec<Point>>,
    subject_lines: Vec<Vec<Point>>,
}

impl Clipper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path to the operation. Surfaces with less than 3 points and clip lines are ignored.
    pub fn add_path(&mut self, path: &[Point], role: PathRole, is_surface: bool) {
        if is_surface {
            if path.len() < 3 {
                return;
            }
            match role {
                PathRole::Subject => self.subject_surfaces.push(path.to_vec()),
                PathRole::Clip => self.clip_surfaces.push(path.to_vec()),
            }
        } else {
            match role {
                PathRole::Subject => {
                    if path.len() >= 2 {
                        self.subject_lines.push(path.to_vec());
                    }
                }
                PathRole::Clip => {
                    log::debug!("open clip paths are not supported, ignoring path");
                }
            }
        }
    }

    /// Add many paths sharing a role and surface flag.
    pub fn add_paths<'a, I>(&mut self, paths: I, role: PathRole, is_surface: bool)
    where
        I: IntoIterator<Item = &'a [Point]>,
    {
        for path in paths {
            self.add_path(path, role, is_surface);
        }
    }

    /// Add a polyline according to its kind: filled polylines are surfaces, closed lines are
    /// added as lines running back to their first point, open lines as is.
    pub fn add_polyline(&mut self, polyline: &Polyline, role: PathRole) {
        if polyline.is_filled() {
            self.add_path(polyline.engine_points(), role, true);
        } else if polyline.has_closing_segment() {
            let pseudo_open = polyline.to_pseudo_open_polyline();
            self.add_path(pseudo_open.points(), role, false);
        } else {
            self.add_path(polyline.points(), role, false);
        }
    }

    /// Returns `true` if open subject lines were added.
    #[inline]
    pub fn has_lines(&self) -> bool {
        !self.subject_lines.is_empty()
    }

    /// Execute the boolean operation on the surfaces, returning normalized closed rings (outer
    /// contours followed by their holes, per resulting part).
    pub fn execute(&self, clip_type: ClipType, fill_rule: FillRule) -> Vec<Vec<Point>> {
        let shapes = self.execute_shapes(clip_type, fill_rule);
        shapes.into_iter().flatten().collect()
    }

    /// Execute the operation on the open subject lines, clipped against the clip surfaces.
    ///
    /// For [ClipType::Intersection] the parts of lines inside the clip region are kept, for the
    /// other operations the parts outside of it.
    pub fn execute_lines(&self, clip_type: ClipType, fill_rule: FillRule) -> Vec<Vec<Point>> {
        let keep_inside = clip_type == ClipType::Intersection;
        let result =
            line_clip::clip_lines(&self.subject_lines, &self.clip_surfaces, fill_rule, keep_inside);
        log::debug!(
            "clipped {} open lines against {} rings: {} lines kept",
            self.subject_lines.len(),
            self.clip_surfaces.len(),
            result.len()
        );
        result
    }

    /// Execute the operation returning the containment hierarchy of the result. Open subject
    /// lines are clipped and stored as the tree's open paths.
    pub fn execute_tree(&self, clip_type: ClipType, fill_rule: FillRule) -> PolyTree {
        let shapes = self.execute_shapes(clip_type, fill_rule);
        let mut tree = PolyTree::from_shapes(shapes);
        if self.has_lines() {
            tree.set_open_paths(self.execute_lines(clip_type, fill_rule));
        }
        tree
    }

    fn execute_shapes(&self, clip_type: ClipType, fill_rule: FillRule) -> Vec<Vec<Vec<Point>>> {
        let result = match clip_type {
            ClipType::Union => {
                let mut subject = self.subject_surfaces.clone();
                subject.extend(self.clip_surfaces.iter().cloned());
                overlay(&subject, &[], ClipType::Union, fill_rule)
            }
            _ => overlay(&self.subject_surfaces, &self.clip_surfaces, clip_type, fill_rule),
        };

        log::debug!(
            "executed {:?} ({:?}) on {} subject and {} clip rings: {} parts",
            clip_type,
            fill_rule,
            self.subject_surfaces.len(),
            self.clip_surfaces.len(),
            result.len()
        );
        result
    }
}

/// Run the overlay engine on fixed point rings, returning normalized parts (outer contour first,
/// holes after).
pub(crate) fn overlay(
    subject: &[Vec<Point>],
    clip: &[Vec<Point>],
    clip_type: ClipType,
    fill_rule: FillRule,
) -> Vec<Vec<Vec<Point>>> {
    let subject = to_engine_paths(subject);
    let clip = to_engine_paths(clip);
    overlay_f64(&subject, &clip, clip_type, fill_rule)
}

/// Run the overlay engine on floating point rings, rounding the output to fixed point.
#[allow(clippy::ptr_arg)]
pub(crate) fn overlay_f64(
    subject: &Vec<Vec<[f64; 2]>>,
    clip: &Vec<Vec<[f64; 2]>>,
    clip_type: ClipType,
    fill_rule: FillRule,
) -> Vec<Vec<Vec<Point>>> {
    let subject_required = matches!(clip_type, ClipType::Intersection | ClipType::Difference);
    if subject.is_empty() && (clip.is_empty() || subject_required) {
        return Vec::new();
    }

    let overlay_rule = match clip_type {
        ClipType::Intersection => OverlayRule::Intersect,
        ClipType::Union => OverlayRule::Union,
        ClipType::Difference => OverlayRule::Difference,
        ClipType::Xor => OverlayRule::Xor,
    };

    let shapes = subject.overlay(clip, overlay_rule, engine_fill_rule(fill_rule));
    normalize_shapes(shapes)
}

fn to_engine_paths(paths: &[Vec<Point>]) -> Vec<Vec<[f64; 2]>> {
    paths
        .iter()
        .filter(|p| p.len() >= 3)
        .map(|p| p.iter().map(|&pt| pt.into()).collect())
        .collect()
}

fn engine_fill_rule(fill_rule: FillRule) -> EngineFillRule {
    match fill_rule {
        FillRule::EvenOdd => EngineFillRule::EvenOdd,
        FillRule::NonZero => EngineFillRule::NonZero,
        FillRule::Positive if counter_clockwise_is_positive() => EngineFillRule::Positive,
        FillRule::Positive => EngineFillRule::Negative,
        FillRule::Negative if counter_clockwise_is_positive() => EngineFillRule::Negative,
        FillRule::Negative => EngineFillRule::Positive,
    }
}

/// Winding sign convention of the overlay engine, probed once with a counter clockwise square.
fn counter_clockwise_is_positive() -> bool {
    static CCW_POSITIVE: OnceLock<bool> = OnceLock::new();
    *CCW_POSITIVE.get_or_init(|| {
        let square = vec![vec![[0.0, 0.0], [16.0, 0.0], [16.0, 16.0], [0.0, 16.0]]];
        let empty: Vec<Vec<[f64; 2]>> = Vec::new();
        let filled = !square
            .overlay(&empty, OverlayRule::Union, EngineFillRule::Positive)
            .is_empty();
        log::trace!("overlay engine counter clockwise winding is positive: {filled}");
        filled
    })
}

fn normalize_shapes(shapes: Vec<Vec<Vec<[f64; 2]>>>) -> Vec<Vec<Vec<Point>>> {
    let mut result = Vec::with_capacity(shapes.len());
    for shape in shapes {
        let mut part = Vec::with_capacity(shape.len());
        for (i, contour) in shape.into_iter().enumerate() {
            let is_outer = i == 0;
            let ring = normalize_ring(&contour);
            if ring.len() < 3 {
                if is_outer {
                    // holes without an outer contour are meaningless
                    break;
                }
                continue;
            }
            let mut ring = ring;
            let area = signed_area(&ring);
            if area == 0.0 {
                if is_outer {
                    break;
                }
                continue;
            }
            if (area > 0.0) != is_outer {
                ring.reverse();
            }
            part.push(ring);
        }
        if !part.is_empty() {
            result.push(part);
        }
    }
    result
}

/// Round to fixed point and remove consecutive (and wrap around) duplicates.
fn normalize_ring(contour: &[[f64; 2]]) -> Vec<Point> {
    let mut ring: Vec<Point> = Vec::with_capacity(contour.len());
    for &[x, y] in contour {
        let p = Point::new(x.round() as i64, y.round() as i64);
        if ring.last() != Some(&p) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Helper function to unwrap a spatial index from a builder or panic for the unexpected case of
/// failure.
pub(crate) fn unwrap_spatial_index<T>(builder: StaticAABB2DIndexBuilder<T>) -> StaticAABB2DIndex<T>
where
    T: IndexableNum,
{
    match builder.build() {
        Ok(x) => x,
        Err(e) => match e {
            StaticAABB2DIndexBuildError::ItemCountError { .. } => {
                unreachable!("internal library error: count mismatch when building spatial index")
            }
            StaticAABB2DIndexBuildError::NumericCastError => {
                panic!("failed to cast coordinate for spatial index: {e}")
            }
        },
    }
}
