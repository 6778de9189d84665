//! Point sequence algorithms behind the [Polyline](crate::polyline::Polyline) operations.
//!
//! Public for testing and experimentation, not expected to be used directly.
pub mod colinear;
pub mod simplify;
pub mod smooth;
