//! Removal of small zigzags and short segment runs from closed rings.
use crate::core::math::{Coord, Point};

/// Remove the middle vertex of small outward zigzags.
///
/// ```text
///          3
///          |
/// inside   |   outside
///     1----2
///     |
///     0
/// ```
///
/// Vertex `1` is dropped when segment `1-2` is at most `remove_length` long and both corners are
/// sharper than 60 degrees. The vertex following a removed one is always kept.
pub fn smooth_ring(points: &[Point], remove_length: Coord) -> Vec<Point> {
    let size = points.len();
    if size < 3 {
        return points.to_vec();
    }

    let is_zigzag = |v02_size: Coord, v12_size: Coord, v13_size: Coord, dot1: Coord, dot2: Coord| {
        if v12_size > remove_length {
            return false;
        }
        // p1 must be left of v02 for the removal to smooth outward
        if dot1 >= 0 {
            return false;
        }
        // p2 left of v13 means no zigzag
        if dot2 > 0 {
            return false;
        }
        -dot1 > v02_size * v12_size / 2 && -dot2 > v13_size * v12_size / 2
    };

    let mut result = Vec::with_capacity(size);
    result.push(points[0]);

    let v02 = points[2] - points[0];
    let mut v02_t = v02.turn_90_ccw();
    let mut v02_size = v02.length();
    let mut force_push = false;
    for poly_idx in 1..size {
        let p1 = points[poly_idx];
        let p2 = points[(poly_idx + 1) % size];
        let p3 = points[(poly_idx + 2) % size];
        let v12 = p2 - p1;
        let v12_size = v12.length();
        let v13 = p3 - p1;
        let v13_size = v13.length();

        let dot1 = v02_t.dot(v12);
        let v13_t = v13.turn_90_ccw();
        let dot2 = v13_t.dot(v12);
        let push_point = force_push || !is_zigzag(v02_size, v12_size, v13_size, dot1, dot2);
        force_push = false;
        if push_point {
            result.push(p1);
        } else {
            // the next point cannot also be a zigzag
            force_push = true;
        }

        v02_t = v13_t;
        v02_size = v13_size;
    }

    result
}

/// Drop every vertex whose two adjacent segments are both shorter than `remove_length`, skipping
/// the vertex after each removal so runs of short segments are thinned instead of erased.
pub fn smooth2_ring(points: &[Point], remove_length: Coord) -> Vec<Point> {
    let size = points.len();
    let mut result = Vec::with_capacity(size);
    if size == 0 {
        return result;
    }

    result.push(points[0]);
    let mut poly_idx = 1;
    while poly_idx < size {
        let last = points[poly_idx - 1];
        let now = points[poly_idx];
        let next = points[(poly_idx + 1) % size];
        if (last - now).shorter_than(remove_length) && (now - next).shorter_than(remove_length) {
            poly_idx += 1;
            if poly_idx < size {
                result.push(points[poly_idx]);
            }
        } else {
            result.push(now);
        }
        poly_idx += 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_zigzag_is_removed() {
        // square with a 10 unit step on the right side
        let pts = vec![
            Point::new(0, 0),
            Point::new(1000, 0),
            Point::new(1000, 500),
            Point::new(1010, 500),
            Point::new(1010, 1000),
            Point::new(0, 1000),
        ];
        let result = smooth_ring(&pts, 50);
        assert!(result.len() < pts.len());
        assert_eq!(result[0], pts[0]);
    }

    #[test]
    fn large_features_are_kept() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(1000, 0),
            Point::new(1000, 1000),
            Point::new(0, 1000),
        ];
        assert_eq!(smooth_ring(&pts, 50), pts);
        assert_eq!(smooth2_ring(&pts, 50), pts);
    }

    #[test]
    fn smooth2_thins_short_runs() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(20, 0),
            Point::new(30, 0),
            Point::new(1000, 0),
            Point::new(1000, 1000),
        ];
        let result = smooth2_ring(&pts, 50);
        assert_eq!(
            result,
            vec![
                Point::new(0, 0),
                Point::new(20, 0),
                Point::new(30, 0),
                Point::new(1000, 0),
                Point::new(1000, 1000)
            ]
        );
    }
}
