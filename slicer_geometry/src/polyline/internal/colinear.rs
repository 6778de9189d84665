//! Removal of vertices whose corner is (nearly) straight or a spike.
use crate::core::math::{angle_left, Point};
use std::f64::consts::PI;

/// Corner angle folded into `[0, PI)`, straight corners and spikes both map near `0` or `PI`.
#[inline]
fn folded_angle(prev: Point, pt: Point, next: Point) -> f64 {
    let angle = angle_left(prev, pt, next);
    if angle >= PI {
        angle - PI
    } else {
        angle
    }
}

#[inline]
fn is_significant(angle: f64, max_deviation_angle: f64) -> bool {
    angle > max_deviation_angle && angle < PI - max_deviation_angle
}

/// Remove vertices of a closed ring whose corner angle is within `max_deviation_angle` of `0` or
/// `PI`, repeating until nothing changes. Rings of 3 or fewer points are left unchanged.
///
/// After a vertex is removed its successor is kept for the current pass and only re-examined in
/// the next pass, so long runs of nearly colinear points do not collapse in one sweep.
pub fn remove_colinear_edges_closed(points: &mut Vec<Point>, max_deviation_angle: f64) {
    loop {
        let mut num_removed_in_iteration = 0;
        let mut process_indices = vec![true; points.len()];

        let mut go = true;
        while go {
            go = false;

            let pathlen = points.len();
            if pathlen <= 3 {
                return;
            }

            let mut skip_indices = vec![false; pathlen];
            let mut new_path = Vec::with_capacity(pathlen);
            let mut point_idx = 0;
            while point_idx < pathlen {
                if !process_indices[point_idx] {
                    new_path.push(points[point_idx]);
                    point_idx += 1;
                    continue;
                }

                // the old first point was removed, the last point waits for the next pass
                if point_idx == pathlen - 1 && skip_indices[0] {
                    skip_indices[new_path.len()] = true;
                    go = true;
                    new_path.push(points[point_idx]);
                    break;
                }

                let prev = points[(point_idx + pathlen - 1) % pathlen];
                let pt = points[point_idx];
                let next = points[(point_idx + 1) % pathlen];

                if is_significant(folded_angle(prev, pt, next), max_deviation_angle) {
                    new_path.push(pt);
                } else if point_idx != pathlen - 1 {
                    skip_indices[new_path.len()] = true;
                    go = true;
                    new_path.push(next);
                    point_idx += 1;
                }
                point_idx += 1;
            }

            num_removed_in_iteration += pathlen - new_path.len();
            *points = new_path;
            process_indices = skip_indices;
        }

        if num_removed_in_iteration == 0 {
            break;
        }
    }
}

/// Open line variant of [remove_colinear_edges_closed], the first and last point are always kept
/// and no corner wraps around the ends.
pub fn remove_colinear_edges_open(points: &mut Vec<Point>, max_deviation_angle: f64) {
    loop {
        if points.len() <= 3 {
            return;
        }

        let mut new_path = Vec::with_capacity(points.len());
        new_path.push(points[0]);
        let mut i = 1;
        while i + 1 < points.len() {
            let prev = *new_path.last().unwrap_or(&points[0]);
            let pt = points[i];
            let next = points[i + 1];
            if is_significant(folded_angle(prev, pt, next), max_deviation_angle) {
                new_path.push(pt);
            }
            i += 1;
        }
        new_path.push(points[points.len() - 1]);

        let removed = points.len() - new_path.len();
        *points = new_path;
        if removed == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_midpoints_of_square_edges() {
        let mut pts = vec![
            Point::new(0, 0),
            Point::new(50, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 100),
            Point::new(0, 50),
        ];
        remove_colinear_edges_closed(&mut pts, 0.0005);
        assert_eq!(pts.len(), 4);
        assert!(!pts.contains(&Point::new(50, 0)));
        assert!(!pts.contains(&Point::new(0, 50)));
    }

    #[test]
    fn triangle_is_untouched() {
        let mut pts = vec![Point::new(0, 0), Point::new(50, 0), Point::new(100, 0)];
        remove_colinear_edges_closed(&mut pts, 0.0005);
        assert_eq!(pts.len(), 3);
    }

    #[test]
    fn open_keeps_end_points() {
        let mut pts = vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(20, 0),
            Point::new(30, 0),
            Point::new(30, 10),
        ];
        remove_colinear_edges_open(&mut pts, 0.0005);
        assert_eq!(pts, vec![Point::new(0, 0), Point::new(30, 0), Point::new(30, 10)]);
    }
}
