//! Core math for fixed point coordinates: points, float vectors, matrices and the line/segment
//! predicates the polygon algorithms are built on.
mod base_math;
mod matrix;
mod point;
mod vector2;

pub use base_math::*;
pub use matrix::{Point3Matrix, PointMatrix};
pub use point::{area_to_mm2, mm_to_coord, Coord, Point, UNITS_PER_MM};
pub use vector2::{vec2, Vector2};
