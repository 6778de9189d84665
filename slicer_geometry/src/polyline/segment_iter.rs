use crate::core::math::Point;

/// A single polyline segment referencing its two end points in the polyline storage.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub start: &'a Point,
    pub end: &'a Point,
}

impl Segment<'_> {
    /// Vector from `start` to `end`.
    #[inline]
    pub fn delta(&self) -> Point {
        *self.end - *self.start
    }

    /// Segment length rounded to the nearest unit.
    #[inline]
    pub fn length(&self) -> i64 {
        self.delta().length()
    }
}

/// Iterator over polyline segments as pairs of point references.
///
/// Yields exactly `segment_count` segments, segment `i` joins point `i` to point `i + 1` wrapping
/// to point `0`, so the last segment of a line with a closing segment ends at the first point.
#[derive(Debug)]
pub struct SegmentIter<'a> {
    points: &'a [Point],
    front: usize,
    back: usize,
}

impl<'a> SegmentIter<'a> {
    /// Create an iterator over the first `segment_count` segments of `points`.
    #[inline]
    pub fn new(points: &'a [Point], segment_count: usize) -> Self {
        debug_assert!(
            segment_count <= points.len(),
            "more segments requested than points available"
        );
        Self {
            points,
            front: 0,
            back: segment_count,
        }
    }

    #[inline]
    fn segment_at(&self, index: usize) -> Segment<'a> {
        let next = if index + 1 == self.points.len() {
            0
        } else {
            index + 1
        };
        Segment {
            start: &self.points[index],
            end: &self.points[next],
        }
    }
}

impl Clone for SegmentIter<'_> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            points: self.points,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = Segment<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }

        let r = self.segment_at(self.front);
        self.front += 1;
        Some(r)
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for SegmentIter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }

        self.back -= 1;
        Some(self.segment_at(self.back))
    }
}

impl ExactSizeIterator for SegmentIter<'_> {}

impl std::iter::FusedIterator for SegmentIter<'_> {}

/// Iterator over segment point index pairs, used where segment end points are modified in place.
#[derive(Debug, Clone)]
pub struct SegmentIndexIter {
    pos: usize,
    remaining: usize,
    point_count: usize,
}

impl SegmentIndexIter {
    #[inline]
    pub fn new(point_count: usize, segment_count: usize) -> SegmentIndexIter {
        debug_assert!(segment_count <= point_count);
        SegmentIndexIter {
            pos: 0,
            remaining: segment_count,
            point_count,
        }
    }
}

impl Iterator for SegmentIndexIter {
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        let pos = self.pos;
        self.pos += 1;
        let next = if self.pos == self.point_count {
            0
        } else {
            self.pos
        };
        Some((pos, next))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SegmentIndexIter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts() -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ]
    }

    #[test]
    fn closing_segment_wraps() {
        let points = pts();
        let segs: Vec<_> = SegmentIter::new(&points, 4).collect();
        assert_eq!(segs.len(), 4);
        assert_eq!(*segs[3].start, Point::new(0, 10));
        assert_eq!(*segs[3].end, Point::new(0, 0));
    }

    #[test]
    fn open_stops_one_short() {
        let points = pts();
        let iter = SegmentIter::new(&points, 3);
        assert_eq!(iter.len(), 3);
        let last = iter.last().unwrap();
        assert_eq!(*last.end, Point::new(0, 10));
    }

    #[test]
    fn random_access_and_reverse() {
        let points = pts();
        let mut iter = SegmentIter::new(&points, 4);
        let third = iter.nth(2).unwrap();
        assert_eq!(*third.start, Point::new(10, 10));
        assert_eq!(iter.len(), 1);
        assert!(iter.nth(5).is_none());

        let rev: Vec<_> = SegmentIter::new(&points, 4).rev().map(|s| *s.start).collect();
        assert_eq!(rev, vec![points[3], points[2], points[1], points[0]]);
    }

    #[test]
    fn restartable_through_clone() {
        let points = pts();
        let mut iter = SegmentIter::new(&points, 4);
        iter.next();
        let copy = iter.clone();
        assert_eq!(iter.count(), 3);
        assert_eq!(copy.count(), 3);
    }

    #[test]
    fn index_pairs() {
        let pairs: Vec<_> = SegmentIndexIter::new(3, 3).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 0)]);
        let pairs: Vec<_> = SegmentIndexIter::new(3, 2).collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2)]);
        assert_eq!(SegmentIndexIter::new(0, 0).count(), 0);
    }
}
