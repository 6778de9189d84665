use super::{ClosedLinesSet, OpenLinesSet};
use crate::{
    clipping::unwrap_spatial_index,
    core::math::{Coord, Point},
    polyline::{Polyline, PolylineKind},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use static_aabb2d_index::StaticAABB2DIndexBuilder;

/// Distance preference (in coordinate units) given to continuing a chain over closing it.
const CLOSING_PENALTY: Coord = 10;

/// Parameters for [OpenLinesSet::stitch].
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StitchOptions {
    /// Maximum gap between line end points that may be bridged.
    pub max_stitch_distance: Coord,
    /// End points closer than this are merged into one point, and a chain ending this close to
    /// its start is closed.
    pub snap_distance: Coord,
}

impl StitchOptions {
    #[inline]
    pub fn new() -> Self {
        Self {
            max_stitch_distance: 10,
            snap_distance: 10,
        }
    }
}

impl Default for StitchOptions {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct EndPoint {
    line: usize,
    at_start: bool,
}

impl OpenLinesSet {
    /// Join lines whose end points lie within `max_stitch_distance` of each other into longer
    /// lines, reversing lines where needed. Chains that come back to their own start are returned
    /// as closed lines.
    ///
    /// Small chains are not closed (a chain must be at least 3 times the stitch distance long and
    /// have more than 2 points), and continuing a chain is preferred over closing it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::lines_set::*;
    /// # use slicer_geometry::core::math::Point;
    /// let mut lines = OpenLinesSet::new();
    /// lines.add_segment(Point::new(0, 0), Point::new(100, 0));
    /// lines.add_segment(Point::new(205, 0), Point::new(105, 0));
    /// lines.add_segment(Point::new(500, 0), Point::new(600, 0));
    ///
    /// let (open, closed) = lines.stitch(&StitchOptions::new());
    /// assert!(closed.is_empty());
    /// assert_eq!(open.len(), 2);
    /// assert_eq!(open[0].len(), 3);
    /// assert_eq!(open[0].length(), 205);
    /// ```
    pub fn stitch(&self, options: &StitchOptions) -> (OpenLinesSet, ClosedLinesSet) {
        let mut result_lines = OpenLinesSet::new();
        let mut result_closed = ClosedLinesSet::new();
        if self.is_empty() {
            return (result_lines, result_closed);
        }

        let max_dist = options.max_stitch_distance;
        let snap_dist = options.snap_distance;

        let mut end_points = Vec::with_capacity(self.len() * 2);
        for (line, pline) in self.iter().enumerate() {
            if pline.is_empty() {
                continue;
            }
            end_points.push(EndPoint {
                line,
                at_start: true,
            });
            end_points.push(EndPoint {
                line,
                at_start: false,
            });
        }
        if end_points.is_empty() {
            return (result_lines, result_closed);
        }

        let end_point_pos = |e: &EndPoint| -> Point {
            let points = self[e.line].points();
            if e.at_start {
                points[0]
            } else {
                points[points.len() - 1]
            }
        };

        let aabb_index = {
            let mut builder = StaticAABB2DIndexBuilder::new(end_points.len());
            for e in &end_points {
                let p = end_point_pos(e);
                builder.add(p.x as f64, p.y as f64, p.x as f64, p.y as f64);
            }
            unwrap_spatial_index(builder)
        };

        let mut processed = vec![false; self.len()];
        let mut query_results = Vec::new();
        let mut query_stack = Vec::with_capacity(8);

        for line_idx in 0..self.len() {
            if processed[line_idx] || self[line_idx].is_empty() {
                continue;
            }
            processed[line_idx] = true;

            let mut chain: Vec<Point> = self[line_idx].points().to_vec();
            let mut closing = false;
            for go_in_reverse in [false, true] {
                if go_in_reverse {
                    chain.reverse();
                }
                let mut chain_length = Polyline::open(chain.clone()).length();

                loop {
                    let Some(&from) = chain.last() else {
                        break;
                    };
                    query_results.clear();
                    aabb_index.visit_query_with_stack(
                        (from.x - max_dist) as f64,
                        (from.y - max_dist) as f64,
                        (from.x + max_dist) as f64,
                        (from.y + max_dist) as f64,
                        &mut |i: usize| {
                            query_results.push(i);
                        },
                        &mut query_stack,
                    );
                    query_results.sort_unstable();

                    let mut closest: Option<(EndPoint, Coord)> = None;
                    let mut closest_is_closing = false;
                    for &i in &query_results {
                        let nearby = end_points[i];
                        let p = end_point_pos(&nearby);
                        let mut dist = (p - from).length();
                        if dist > max_dist {
                            continue;
                        }

                        let mut is_closing = false;
                        if (p - chain[0]).length_squared() < snap_dist * snap_dist {
                            if chain_length + dist < 3 * max_dist || chain.len() <= 2 {
                                continue;
                            }
                            is_closing = true;
                            dist += CLOSING_PENALTY;
                        } else if processed[nearby.line] {
                            continue;
                        }

                        if closest.is_none_or(|(_, d)| dist < d) {
                            closest = Some((nearby, dist));
                            closest_is_closing = is_closing;
                        }
                        if dist < snap_dist {
                            break;
                        }
                    }

                    let Some((next, _)) = closest else {
                        break;
                    };
                    if closest_is_closing {
                        closing = true;
                        break;
                    }

                    let next_points = self[next.line].points();
                    let segment_dist = (from - end_point_pos(&next)).length();
                    let skip = usize::from(segment_dist < snap_dist);
                    let old_len = chain.len();
                    if next.at_start {
                        chain.extend(next_points.iter().skip(skip).copied());
                    } else {
                        chain.extend(next_points.iter().rev().skip(skip).copied());
                    }
                    for i in old_len.max(1)..chain.len() {
                        chain_length += (chain[i] - chain[i - 1]).length();
                    }
                    processed[next.line] = true;
                }

                if closing {
                    if go_in_reverse {
                        chain.reverse();
                    }
                    break;
                }
            }

            if closing {
                if chain.len() > 1 && chain.first() == chain.last() {
                    chain.pop();
                }
                result_closed.push(Polyline::from_points(chain, PolylineKind::ImplicitlyClosed));
            } else {
                result_lines.push(Polyline::open(chain));
            }
        }

        log::debug!(
            "stitched {} lines into {} open and {} closed lines",
            self.len(),
            result_lines.len(),
            result_closed.len()
        );
        (result_lines, result_closed)
    }
}
