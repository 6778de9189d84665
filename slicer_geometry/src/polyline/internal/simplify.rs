//! Importance driven vertex reduction.
//!
//! Every vertex gets an importance, the squared distance it deviates from the line through its
//! neighbors. The least important vertices are removed first, re-evaluating importances as
//! neighbors disappear. Short segments next to long ones are removed by moving the adjacent
//! vertex to the intersect of the surrounding long segments.
use crate::{
    core::math::{dist2_from_line, dist2_from_line_segment, line_line_intersection, Coord, Point},
    polyline::SimplifyOptions,
};
use std::{cmp::Reverse, collections::BinaryHeap};

/// Deviation (in coordinate units) below which a vertex is always removed, covers rounding noise.
pub const MIN_RESOLUTION: Coord = 5;

const MIN_RESOLUTION_SQUARED: Coord = MIN_RESOLUTION * MIN_RESOLUTION;

struct Simplifier<'a> {
    points: Vec<Point>,
    to_delete: Vec<bool>,
    is_closed: bool,
    options: &'a SimplifyOptions,
}

impl Simplifier<'_> {
    fn next_not_deleted(&self, mut index: usize) -> usize {
        let size = self.to_delete.len();
        index = (index + 1) % size;
        while self.to_delete[index] {
            index = (index + 1) % size;
        }
        index
    }

    fn previous_not_deleted(&self, mut index: usize) -> usize {
        let size = self.to_delete.len();
        index = (index + size - 1) % size;
        while self.to_delete[index] {
            index = (index + size - 1) % size;
        }
        index
    }

    fn importance(&self, index: usize) -> Coord {
        let size = self.points.len();
        if !self.is_closed && (index == 0 || index == size - 1) {
            return Coord::MAX;
        }

        let vertex = self.points[index];
        let before = self.points[self.previous_not_deleted(index)];
        let after = self.points[self.next_not_deleted(index)];
        let deviation2 = dist2_from_line(vertex, before, after);
        if deviation2 <= MIN_RESOLUTION_SQUARED {
            return deviation2;
        }

        let max_resolution2 = self.options.smallest_line_segment_squared;
        if (before - vertex).length_squared() > max_resolution2
            && (after - vertex).length_squared() > max_resolution2
        {
            // both segments long, nothing to gain
            return Coord::MAX;
        }

        deviation2
    }

    /// Returns `true` if the vertex was removed.
    fn remove(&mut self, vertex: usize, deviation2: Coord) -> bool {
        if deviation2 <= MIN_RESOLUTION_SQUARED {
            self.to_delete[vertex] = true;
            return true;
        }

        let before = self.previous_not_deleted(vertex);
        let after = self.next_not_deleted(vertex);
        let vertex_position = self.points[vertex];
        let before_position = self.points[before];
        let after_position = self.points[after];
        let length2_before = (vertex_position - before_position).length_squared();
        let length2_after = (vertex_position - after_position).length_squared();

        let max_resolution2 = self.options.smallest_line_segment_squared;
        if length2_before <= max_resolution2 && length2_after <= max_resolution2 {
            self.to_delete[vertex] = true;
            return true;
        }

        // one adjacent segment is long, replace the short one by the intersect of its neighbors
        let shorter_before = length2_before <= length2_after;
        let (before_from, before_to, after_from, after_to) = if shorter_before {
            if !self.is_closed && before == 0 {
                return false;
            }
            let before_before = self.previous_not_deleted(before);
            (
                self.points[before_before],
                before_position,
                vertex_position,
                after_position,
            )
        } else {
            if !self.is_closed && after == self.points.len() - 1 {
                return false;
            }
            let after_after = self.next_not_deleted(after);
            (
                before_position,
                vertex_position,
                after_position,
                self.points[after_after],
            )
        };

        let Some(intersection) = line_line_intersection(before_from, before_to, after_from, after_to)
        else {
            return false;
        };

        let intersection_deviation = dist2_from_line_segment(before_to, intersection, after_from);
        if intersection_deviation <= self.options.allowed_error_distance_squared {
            self.to_delete[vertex] = true;
            let moved = if shorter_before { before } else { after };
            self.points[moved] = intersection;
            return true;
        }

        false
    }
}

/// `true` if `points` cannot form a meaningful line of at least `min_size` points.
fn detect_small(points: &[Point], min_size: usize) -> bool {
    if points.len() < min_size {
        return true;
    }

    if points.len() == min_size {
        let a = points[0];
        let b = points[1];
        let c = points[points.len() - 1];
        let longest = (b - a)
            .length_squared()
            .max((c - a).length_squared())
            .max((c - b).length_squared());
        return longest < MIN_RESOLUTION_SQUARED;
    }

    false
}

/// Simplify `points`, a closed ring if `is_closed` (never reduced below 3 points) or an open line
/// (end points kept, never reduced below 2 points).
///
/// Returns an empty vector if the input is too small to be meaningful. Best effort, the output may
/// still contain vertices a more thorough search would remove.
pub fn simplify_points(points: &[Point], is_closed: bool, options: &SimplifyOptions) -> Vec<Point> {
    let min_size = if is_closed { 3 } else { 2 };
    if detect_small(points, min_size) {
        return Vec::new();
    }

    if points.len() == min_size {
        return points.to_vec();
    }

    let size = points.len() as i64;
    let min_size_i = min_size as i64;
    let mut s = Simplifier {
        points: points.to_vec(),
        to_delete: vec![false; points.len()],
        is_closed,
        options,
    };

    let mut by_importance = BinaryHeap::new();
    let mut current_removed: i64 = -1;
    while size - current_removed > min_size_i && current_removed != 0 {
        current_removed = 0;
        by_importance.clear();
        for i in 0..s.points.len() {
            if !s.to_delete[i] {
                by_importance.push(Reverse((s.importance(i), i)));
            }
        }

        while size - current_removed > min_size_i {
            let Some(Reverse((stored_importance, index))) = by_importance.pop() else {
                break;
            };

            if s.to_delete[index] {
                continue;
            }

            // neighbors may have changed since insertion
            let vertex_importance = s.importance(index);
            if vertex_importance != stored_importance {
                by_importance.push(Reverse((vertex_importance, index)));
                continue;
            }

            if vertex_importance <= options.allowed_error_distance_squared
                && s.remove(index, vertex_importance)
            {
                current_removed += 1;
            }
        }
    }

    let filtered: Vec<Point> = s
        .points
        .iter()
        .zip(s.to_delete.iter())
        .filter_map(|(p, deleted)| (!deleted).then_some(*p))
        .collect();

    if detect_small(&filtered, min_size) {
        log::trace!("simplify collapsed {} points to nothing", points.len());
        return Vec::new();
    }

    filtered
}
