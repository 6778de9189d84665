/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Macro used for implementing the polyline macros. Used for extracting macro repetition count
/// for reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct an open polyline with the points given as a list of (x, y) tuples.
///
/// # Examples
///
/// ```
/// # use slicer_geometry::pline_open;
/// # use slicer_geometry::polyline::*;
/// # use slicer_geometry::core::math::Point;
/// let polyline = pline_open![(0, 10), (20, 0)];
/// assert!(!polyline.is_closed());
/// assert_eq!(polyline[0], Point::new(0, 10));
/// assert_eq!(polyline[1], Point::new(20, 0));
/// ```
#[macro_export]
macro_rules! pline_open {
    ($( $x:expr ),* $(,)?) => {
        $crate::pline_with_kind!($crate::polyline::PolylineKind::Open; $( $x ),*)
    };
}

/// Construct an implicitly closed (not filled) polyline with the points given as a list of
/// (x, y) tuples.
///
/// # Examples
///
/// ```
/// # use slicer_geometry::pline_closed;
/// # use slicer_geometry::polyline::*;
/// let polyline = pline_closed![(0, 0), (10, 0), (10, 10)];
/// assert!(polyline.has_closing_segment());
/// assert!(!polyline.is_filled());
/// assert_eq!(polyline.segments_count(), 3);
/// ```
#[macro_export]
macro_rules! pline_closed {
    ($( $x:expr ),* $(,)?) => {
        $crate::pline_with_kind!($crate::polyline::PolylineKind::ImplicitlyClosed; $( $x ),*)
    };
}

/// Construct a filled polygon with the points given as a list of (x, y) tuples.
///
/// # Examples
///
/// ```
/// # use slicer_geometry::polygon;
/// # use slicer_geometry::polyline::*;
/// let square = polygon![(0, 0), (10, 0), (10, 10), (0, 10)];
/// assert!(square.is_filled());
/// assert_eq!(square.area(), 100.0);
/// ```
#[macro_export]
macro_rules! polygon {
    ($( $x:expr ),* $(,)?) => {
        $crate::pline_with_kind!($crate::polyline::PolylineKind::Filled; $( $x ),*)
    };
}

/// Macro used for implementing the polyline macros.
#[doc(hidden)]
#[macro_export]
macro_rules! pline_with_kind {
    ($kind:expr; $( $x:expr ),*) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut points = ::std::vec::Vec::with_capacity(size);
            $(
                points.push($crate::core::math::Point::new($x.0, $x.1));
            )*
            $crate::polyline::Polyline::from_points(points, $kind)
        }
    };
}
