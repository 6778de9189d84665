/// Trait for control flow inside visiting methods.
///
/// Visitor closures return a value implementing this trait to signal whether the visiting
/// method should keep going or stop early, e.g. [Polyline::visit_segments] used by
/// [Polyline::shorter_than] to stop summing lengths once the threshold is reached.
///
/// [Polyline::visit_segments]: crate::polyline::Polyline::visit_segments
/// [Polyline::shorter_than]: crate::polyline::Polyline::shorter_than
///
/// # Examples
///
/// ```
/// # use slicer_geometry::core::*;
/// # use slicer_geometry::polyline::*;
/// # use slicer_geometry::core::math::Point;
/// let pline = Polyline::from_points(
///     vec![Point::new(0, 0), Point::new(10, 0), Point::new(10, 10), Point::new(0, 10)],
///     PolylineKind::Open,
/// );
///
/// let mut visited = 0;
/// pline.visit_segments(&mut |_seg| {
///     visited += 1;
///     // Return Control::Break to stop iteration early
///     Control::Break(())
/// });
///
/// assert_eq!(visited, 1);
/// ```
pub trait ControlFlow {
    /// Constructs state indicating to continue iteration/visiting.
    fn continuing() -> Self;

    /// Returns `true` if control flow should break/stop iteration.
    fn should_break(&self) -> bool;
}

impl ControlFlow for () {
    #[inline]
    fn continuing() -> Self {}

    #[inline]
    fn should_break(&self) -> bool {
        false
    }
}
