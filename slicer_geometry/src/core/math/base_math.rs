use super::{Coord, Point};
use std::f64::consts::PI;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use slicer_geometry::core::math::*;
/// let (min_val, max_val) = min_max(8, 4);
/// assert_eq!(min_val, 4);
/// assert_eq!(max_val, 8);
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Angle of the corner at `b` measured on the left side when walking `a -> b -> c`, in the range
/// `[0, 2PI)`.
///
/// A spike (`c` doubling back over `a`) gives `0` and a straight continuation gives `PI`.
///
/// # Examples
///
/// ```
/// # use slicer_geometry::core::math::*;
/// use std::f64::consts::PI;
/// let a = Point::new(0, 0);
/// let b = Point::new(100, 0);
/// assert_eq!(angle_left(a, b, Point::new(200, 0)), PI);
/// assert_eq!(angle_left(a, b, Point::new(50, 0)), 0.0);
/// // left turn
/// assert!((angle_left(a, b, Point::new(100, 100)) - PI / 2.0).abs() < 1e-9);
/// ```
pub fn angle_left(a: Point, b: Point, c: Point) -> f64 {
    let ba = a - b;
    let bc = c - b;
    let dot = ba.dot(bc);
    let det = ba.cross(bc);
    if det == 0 {
        let same_direction = if ba.x != 0 {
            (ba.x > 0) == (bc.x > 0)
        } else {
            (ba.y > 0) == (bc.y > 0)
        };
        return if same_direction { 0.0 } else { PI };
    }

    let angle = -(det as f64).atan2(dot as f64);
    if angle >= 0.0 {
        angle
    } else {
        2.0 * PI + angle
    }
}

/// Twice the signed area of the triangle `a, b, p`. Positive if `p` is left of the directed line
/// `a -> b`, negative if right and zero if on the line.
#[inline]
pub fn point_is_left_of_line(p: Point, a: Point, b: Point) -> Coord {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Classify a horizontal positive x ray cast from `p` against the segment `p0 -> p1`.
///
/// Returns `1` if the ray crosses the segment, `0` if `p` lies on the segment and `-1` otherwise.
/// The half open y interval test makes every crossing of a closed ring count once.
pub fn point_lies_on_right_of_line(p: Point, p0: Point, p1: Point) -> i8 {
    // no tests unless the segment is at least partly at or to the right of p.x
    if p0.x.max(p1.x) < p.x {
        return -1;
    }

    let pd_y = p1.y - p0.y;
    if pd_y < 0 {
        if p1.y <= p.y && p0.y > p.y {
            let dx = (p1.x - p0.x) * (p1.y - p.y) - (p1.x - p.x) * pd_y;
            if dx == 0 {
                return 0;
            }
            if dx > 0 {
                return 1;
            }
        }
    } else if p.y >= p0.y {
        if p.y < p1.y {
            let dx = (p1.x - p0.x) * (p.y - p0.y) - (p.x - p0.x) * pd_y;
            if dx == 0 {
                return 0;
            }
            if dx > 0 {
                return 1;
            }
        } else if p.y == p1.y && (p.x == p1.x || (pd_y == 0 && p0.x.min(p1.x) <= p.x)) {
            return 0;
        }
    }

    -1
}

/// Parametric intersection of the infinite lines through `p1 -> p2` and `p3 -> p4`.
///
/// Returns `(t, u)` such that the intersect is `p1 + t * (p2 - p1) = p3 + u * (p4 - p3)`, or
/// `None` if the lines are parallel.
pub fn line_line_intersection_params(
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
) -> Option<(f64, f64)> {
    let x1mx2 = (p1.x - p2.x) as f64;
    let x1mx3 = (p1.x - p3.x) as f64;
    let x3mx4 = (p3.x - p4.x) as f64;
    let y1my2 = (p1.y - p2.y) as f64;
    let y1my3 = (p1.y - p3.y) as f64;
    let y3my4 = (p3.y - p4.y) as f64;

    let div = x1mx2 * y3my4 - y1my2 * x3mx4;
    if div == 0.0 {
        return None;
    }

    let t = (x1mx3 * y3my4 - y1my3 * x3mx4) / div;
    let u = (x1mx3 * y1my2 - y1my3 * x1mx2) / div;
    Some((t, u))
}

/// Same as [line_line_intersection_params] but only returns the parameters when both lie within
/// `[0, 1]` (the segments touch or cross).
///
/// # Examples
///
/// ```
/// # use slicer_geometry::core::math::*;
/// let (t, u) = segment_segment_intersection(
///     Point::new(0, 0),
///     Point::new(100, 0),
///     Point::new(25, -50),
///     Point::new(25, 50),
/// )
/// .unwrap();
/// assert_eq!(t, 0.25);
/// assert_eq!(u, 0.5);
/// ```
pub fn segment_segment_intersection(
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
) -> Option<(f64, f64)> {
    line_line_intersection_params(p1, p2, p3, p4)
        .filter(|&(t, u)| (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u))
}

/// Intersect point of the infinite lines through `a -> b` and `c -> d`.
///
/// Lines that are so close to parallel the intersect lands beyond the 32 bit coordinate range are
/// treated as parallel (`None`).
pub fn line_line_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let (t, _) = line_line_intersection_params(a, b, c, d)?;
    let result = a + (b - a).scale_f64(t);
    let limit = i32::MAX as Coord;
    if result.x.abs() > limit || result.y.abs() > limit {
        return None;
    }
    Some(result)
}

/// Distance from `p` to the infinite line through `a` and `b` (rounded down). A zero length line
/// measures the distance to `a`.
pub fn dist_from_line(p: Point, a: Point, b: Point) -> Coord {
    let ab_size = (b - a).length_f64();
    if ab_size == 0.0 {
        return (p - a).length();
    }
    let area_times_two = ((p.x - b.x) * (p.y - a.y) + (a.x - p.x) * (p.y - b.y)).abs();
    (area_times_two as f64 / ab_size) as Coord
}

/// Squared [dist_from_line].
#[inline]
pub fn dist2_from_line(p: Point, a: Point, b: Point) -> Coord {
    let dist = dist_from_line(p, a, b);
    dist * dist
}

/// Squared distance from `b` to the segment `a -> c`.
pub fn dist2_from_line_segment(a: Point, b: Point, c: Point) -> Coord {
    let ac = c - a;
    let ab = b - a;
    let ac_size = ac.length();
    if ac_size == 0 {
        return ab.length_squared();
    }

    let ax_size = ab.dot(ac) / ac_size;
    if ax_size < 0 {
        return ab.length_squared();
    }
    if ax_size > ac_size {
        return (b - c).length_squared();
    }

    let ax = ac * ax_size / ac_size;
    (ab - ax).length_squared()
}

/// Where a point lies relative to a closed ring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointContainment {
    Outside,
    Inside,
    OnBorder,
}

/// Even-odd containment of `pt` in the implicitly closed ring `path`. Rings with less than 3
/// points contain nothing.
pub fn point_in_polygon(pt: Point, path: &[Point]) -> PointContainment {
    let count = path.len();
    if count < 3 {
        return PointContainment::Outside;
    }

    let mut inside = false;
    let mut ip = path[0];
    for i in 1..=count {
        let ip_next = if i == count { path[0] } else { path[i] };
        if ip_next.y == pt.y
            && (ip_next.x == pt.x || (ip.y == pt.y && ((ip_next.x > pt.x) == (ip.x < pt.x))))
        {
            return PointContainment::OnBorder;
        }

        if (ip.y < pt.y) != (ip_next.y < pt.y) {
            if ip.x >= pt.x && ip_next.x > pt.x {
                inside = !inside;
            } else if ip.x >= pt.x || ip_next.x > pt.x {
                let d = (ip.x - pt.x) as f64 * (ip_next.y - pt.y) as f64
                    - (ip_next.x - pt.x) as f64 * (ip.y - pt.y) as f64;
                if d == 0.0 {
                    return PointContainment::OnBorder;
                }
                if (d > 0.0) == (ip_next.y > ip.y) {
                    inside = !inside;
                }
            }
        }
        ip = ip_next;
    }

    if inside {
        PointContainment::Inside
    } else {
        PointContainment::Outside
    }
}

/// Winding number of the implicitly closed ring `path` around `pt`. Counter clockwise rings wind
/// positively.
pub fn winding_number(pt: Point, path: &[Point]) -> i32 {
    let count = path.len();
    if count < 3 {
        return 0;
    }

    let mut winding = 0;
    for i in 0..count {
        let v1 = path[i];
        let v2 = path[(i + 1) % count];
        if v1.y <= pt.y {
            if v2.y > pt.y && point_is_left_of_line(pt, v1, v2) > 0 {
                winding += 1;
            }
        } else if v2.y <= pt.y && point_is_left_of_line(pt, v1, v2) < 0 {
            winding -= 1;
        }
    }

    winding
}

/// Shoelace signed area of the implicitly closed ring `path`, counter clockwise is positive.
pub fn signed_area(path: &[Point]) -> f64 {
    let count = path.len();
    if count < 3 {
        return 0.0;
    }

    let mut double_area = 0.0;
    let mut prev = path[count - 1];
    for &p in path {
        double_area += (prev.x as f64 + p.x as f64) * (p.y as f64 - prev.y as f64);
        prev = p;
    }

    double_area / 2.0
}
