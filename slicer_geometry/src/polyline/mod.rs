//! Point containers: the [PointsSet] storage, the [Polyline] type tagged with its
//! [PolylineKind], and segment iteration.
pub mod internal;
mod pline;
mod pline_types;
mod points_set;
mod segment_iter;

pub use internal::simplify::MIN_RESOLUTION;
pub use pline::*;
pub use pline_types::*;
pub use points_set::*;
pub use segment_iter::*;
