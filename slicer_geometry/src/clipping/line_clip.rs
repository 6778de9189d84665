//! Clipping of open lines against a closed region.
//!
//! Every line segment is split at its crossings with the region's edges (found through a spatial
//! index of the edges), then each piece is classified by the winding number of the region at the
//! piece midpoint. Consecutive kept pieces are merged back into lines.
use super::{unwrap_spatial_index, FillRule};
use crate::core::math::{segment_segment_intersection, Point};
use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder};

struct RegionEdges<'a> {
    rings: &'a [Vec<Point>],
    /// (ring index, start point index) for every edge in the index
    edges: Vec<(usize, usize)>,
    index: StaticAABB2DIndex<f64>,
    max_x: f64,
}

impl<'a> RegionEdges<'a> {
    fn new(rings: &'a [Vec<Point>]) -> Option<Self> {
        let edge_count: usize = rings.iter().filter(|r| r.len() >= 3).map(|r| r.len()).sum();
        if edge_count == 0 {
            return None;
        }

        let mut edges = Vec::with_capacity(edge_count);
        let mut builder = StaticAABB2DIndexBuilder::new(edge_count);
        let mut max_x = f64::MIN;
        for (ring_idx, ring) in rings.iter().enumerate() {
            if ring.len() < 3 {
                continue;
            }
            for i in 0..ring.len() {
                let a = ring[i];
                let b = ring[(i + 1) % ring.len()];
                builder.add(
                    a.x.min(b.x) as f64,
                    a.y.min(b.y) as f64,
                    a.x.max(b.x) as f64,
                    a.y.max(b.y) as f64,
                );
                max_x = max_x.max(a.x as f64);
                edges.push((ring_idx, i));
            }
        }

        Some(Self {
            rings,
            edges,
            index: unwrap_spatial_index(builder),
            max_x,
        })
    }

    #[inline]
    fn edge(&self, i: usize) -> (Point, Point) {
        let (ring_idx, start) = self.edges[i];
        let ring = &self.rings[ring_idx];
        (ring[start], ring[(start + 1) % ring.len()])
    }

    /// Winding number of all rings around (x, y), counting edges crossed by a ray in the positive
    /// x direction.
    fn winding_number(&self, x: f64, y: f64, query_stack: &mut Vec<usize>) -> i32 {
        let mut winding = 0;
        self.index.visit_query_with_stack(
            x,
            y,
            self.max_x.max(x),
            y,
            &mut |i: usize| {
                let (a, b) = self.edge(i);
                let (ay, by) = (a.y as f64, b.y as f64);
                let upward = ay <= y && by > y;
                let downward = by <= y && ay > y;
                if !upward && !downward {
                    return;
                }
                let t = (y - ay) / (by - ay);
                let cross_x = a.x as f64 + t * (b.x - a.x) as f64;
                if cross_x > x {
                    if upward {
                        winding += 1;
                    } else {
                        winding -= 1;
                    }
                }
            },
            query_stack,
        );
        winding
    }
}

/// Clip open `lines` against the region formed by `rings` under `fill_rule`. Keeps the parts
/// inside of the region if `keep_inside` is true, otherwise the parts outside of it.
pub fn clip_lines(
    lines: &[Vec<Point>],
    rings: &[Vec<Point>],
    fill_rule: FillRule,
    keep_inside: bool,
) -> Vec<Vec<Point>> {
    let Some(region) = RegionEdges::new(rings) else {
        return if keep_inside {
            Vec::new()
        } else {
            lines.iter().filter(|l| l.len() >= 2).cloned().collect()
        };
    };

    let mut result = Vec::new();
    let mut query_stack = Vec::with_capacity(8);
    let mut params: Vec<f64> = Vec::new();

    for line in lines {
        let mut current: Vec<Point> = Vec::new();
        for window in line.windows(2) {
            let (a, b) = (window[0], window[1]);
            if a == b {
                continue;
            }

            params.clear();
            params.push(0.0);
            region.index.visit_query_with_stack(
                a.x.min(b.x) as f64,
                a.y.min(b.y) as f64,
                a.x.max(b.x) as f64,
                a.y.max(b.y) as f64,
                &mut |i: usize| {
                    let (c, d) = region.edge(i);
                    if let Some((t, _)) = segment_segment_intersection(a, b, c, d) {
                        if t > 0.0 && t < 1.0 {
                            params.push(t);
                        }
                    }
                },
                &mut query_stack,
            );
            params.push(1.0);
            params.sort_unstable_by(|x, y| x.total_cmp(y));
            params.dedup();

            let delta: [f64; 2] = (b - a).into();
            for piece in params.windows(2) {
                let (t0, t1) = (piece[0], piece[1]);
                let t_mid = (t0 + t1) / 2.0;
                let mid_x = a.x as f64 + delta[0] * t_mid;
                let mid_y = a.y as f64 + delta[1] * t_mid;
                let inside =
                    fill_rule.is_filled(region.winding_number(mid_x, mid_y, &mut query_stack));

                if inside == keep_inside {
                    let start = point_at(a, delta, t0);
                    let end = point_at(a, delta, t1);
                    if current.last() != Some(&start) {
                        if current.len() >= 2 {
                            result.push(std::mem::take(&mut current));
                        }
                        current.clear();
                        current.push(start);
                    }
                    if current.last() != Some(&end) {
                        current.push(end);
                    }
                } else if !current.is_empty() {
                    if current.len() >= 2 {
                        result.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
            }
        }

        if current.len() >= 2 {
            result.push(current);
        }
    }

    result
}

#[inline]
fn point_at(a: Point, delta: [f64; 2], t: f64) -> Point {
    Point::new(
        (a.x as f64 + delta[0] * t).round() as i64,
        (a.y as f64 + delta[1] * t).round() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i64, y: i64, size: i64) -> Vec<Point> {
        vec![
            Point::new(x, y),
            Point::new(x + size, y),
            Point::new(x + size, y + size),
            Point::new(x, y + size),
        ]
    }

    #[test]
    fn line_through_square() {
        let lines = vec![vec![Point::new(-50, 50), Point::new(150, 50)]];
        let rings = vec![square(0, 0, 100)];

        let inside = clip_lines(&lines, &rings, FillRule::EvenOdd, true);
        assert_eq!(inside, vec![vec![Point::new(0, 50), Point::new(100, 50)]]);

        let outside = clip_lines(&lines, &rings, FillRule::EvenOdd, false);
        assert_eq!(
            outside,
            vec![
                vec![Point::new(-50, 50), Point::new(0, 50)],
                vec![Point::new(100, 50), Point::new(150, 50)]
            ]
        );
    }

    #[test]
    fn kept_pieces_merge_across_vertices() {
        let lines = vec![vec![
            Point::new(10, 10),
            Point::new(50, 10),
            Point::new(50, 50),
            Point::new(150, 50),
        ]];
        let rings = vec![square(0, 0, 100)];
        let inside = clip_lines(&lines, &rings, FillRule::EvenOdd, true);
        assert_eq!(
            inside,
            vec![vec![
                Point::new(10, 10),
                Point::new(50, 10),
                Point::new(50, 50),
                Point::new(100, 50)
            ]]
        );
    }

    #[test]
    fn line_crossing_hole() {
        let mut hole = square(25, 25, 50);
        hole.reverse();
        let rings = vec![square(0, 0, 100), hole];
        let lines = vec![vec![Point::new(10, 50), Point::new(90, 50)]];
        let inside = clip_lines(&lines, &rings, FillRule::NonZero, true);
        assert_eq!(
            inside,
            vec![
                vec![Point::new(10, 50), Point::new(25, 50)],
                vec![Point::new(75, 50), Point::new(90, 50)]
            ]
        );
    }

    #[test]
    fn empty_region() {
        let lines = vec![vec![Point::new(0, 0), Point::new(10, 0)]];
        assert!(clip_lines(&lines, &[], FillRule::EvenOdd, true).is_empty());
        assert_eq!(clip_lines(&lines, &[], FillRule::EvenOdd, false), lines);
    }
}
