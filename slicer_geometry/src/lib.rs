//! 2D fixed point polygon kernel for slicing.
//!
//! Coordinates are integer microns ([core::math::Point]). Point sequences are [polyline::Polyline]s
//! tagged with a [polyline::PolylineKind] (open, implicitly closed, explicitly closed or filled),
//! collected into homogeneous [lines_set::LinesSet]s ([lines_set::OpenLinesSet],
//! [lines_set::ClosedLinesSet] and the region type [lines_set::Shape]) or into the heterogeneous
//! [mixed_lines_set::MixedLinesSet].
//!
//! Regions support boolean operations, offsetting, nesting decomposition and repair (see
//! [shape]), all built on the boolean engine boundary in [clipping].

#[macro_use]
mod macros;

pub mod clipping;
pub mod core;
pub mod geo_traits;
pub mod lines_set;
pub mod mixed_lines_set;
pub mod polyline;
pub mod shape;
