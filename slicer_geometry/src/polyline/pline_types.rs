use crate::core::math::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default maximum angle deviation (radians) used when removing colinear edges.
pub const DEFAULT_MAX_DEVIATION_ANGLE: f64 = 0.0005;

/// Closure and fill kind of a [Polyline](super::Polyline).
///
/// Changing the kind of an existing polyline does not touch its points, e.g. switching an
/// [PolylineKind::ExplicitlyClosed] line to [PolylineKind::ImplicitlyClosed] leaves the duplicated
/// last point in place (now forming a zero length closing segment).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolylineKind {
    /// Open path, no segment between the last and first point.
    Open,
    /// Closed path, a closing segment from the last point back to the first point is implied.
    ImplicitlyClosed,
    /// Closed path whose last point duplicates the first point.
    ExplicitlyClosed,
    /// Implicitly closed contour bounding a filled region (a polygon).
    Filled,
}

impl PolylineKind {
    /// `true` for every kind except [PolylineKind::Open].
    #[inline]
    pub fn is_closed(self) -> bool {
        !matches!(self, PolylineKind::Open)
    }

    /// `true` if a segment between the last and first point is implied.
    #[inline]
    pub fn has_closing_segment(self) -> bool {
        matches!(self, PolylineKind::ImplicitlyClosed | PolylineKind::Filled)
    }

    #[inline]
    pub fn is_filled(self) -> bool {
        matches!(self, PolylineKind::Filled)
    }
}

/// Condition checked before adding a line to a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckNonEmpty {
    /// Always add.
    #[default]
    EvenIfEmpty,
    /// Add only if the line has at least one point.
    OnlyIfNotEmpty,
    /// Add only if [Polyline::is_valid](super::Polyline::is_valid).
    OnlyIfValid,
}

/// Parameters for [Polyline::simplify](super::Polyline::simplify).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplifyOptions {
    /// Squared length below which a segment counts as short and may be removed.
    pub smallest_line_segment_squared: Coord,
    /// Squared distance a removed or moved vertex may deviate from the original shape.
    pub allowed_error_distance_squared: Coord,
}

impl SimplifyOptions {
    #[inline]
    pub fn new() -> Self {
        Self {
            smallest_line_segment_squared: 100 * 100,
            allowed_error_distance_squared: 25,
        }
    }
}

impl Default for SimplifyOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
