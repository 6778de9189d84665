use super::SingleShape;
use crate::lines_set::Shape;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grouping of a [Shape]'s polygons into parts by index.
///
/// `parts()[i]` lists the polygon indexes of part `i`: the outline first, then its holes. The
/// indexes are only meaningful for the reordered shape returned alongside the view by
/// [Shape::split_into_parts_view].
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartsView {
    parts: Vec<Vec<usize>>,
}

impl PartsView {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn from_parts(parts: Vec<Vec<usize>>) -> Self {
        Self { parts }
    }

    #[inline]
    pub fn parts(&self) -> &[Vec<usize>] {
        &self.parts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Start a new part, returning its index.
    pub(crate) fn push_part(&mut self) -> usize {
        self.parts.push(Vec::new());
        self.parts.len() - 1
    }

    pub(crate) fn push_index(&mut self, part_idx: usize, poly_idx: usize) {
        self.parts[part_idx].push(poly_idx);
    }

    /// Find the part holding polygon `poly_idx`, returns the part index and the index of the
    /// part's outline polygon.
    pub fn part_containing(&self, poly_idx: usize) -> Option<(usize, usize)> {
        self.parts.iter().enumerate().find_map(|(part_idx, part)| {
            if part.contains(&poly_idx) {
                Some((part_idx, part[0]))
            } else {
                None
            }
        })
    }

    /// Copy the polygons of part `part_idx` out of `shape`.
    pub fn assemble_part(&self, shape: &Shape, part_idx: usize) -> SingleShape {
        debug_assert!(part_idx < self.parts.len(), "part index out of range");
        let mut part = Shape::with_capacity(self.parts[part_idx].len());
        for &poly_idx in &self.parts[part_idx] {
            part.push(shape[poly_idx].clone());
        }
        SingleShape::from_shape(part)
    }

    /// Copy the part holding polygon `poly_idx` out of `shape`.
    pub fn assemble_part_containing(&self, shape: &Shape, poly_idx: usize) -> Option<SingleShape> {
        self.part_containing(poly_idx)
            .map(|(part_idx, _)| self.assemble_part(shape, part_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Point;

    fn square(x: i64, size: i64) -> Vec<Point> {
        vec![
            Point::new(x, x),
            Point::new(x + size, x),
            Point::new(x + size, x + size),
            Point::new(x, x + size),
        ]
    }

    #[test]
    fn part_lookup() {
        let view = PartsView::from_parts(vec![vec![0, 1, 2], vec![3]]);
        assert_eq!(view.part_containing(2), Some((0, 0)));
        assert_eq!(view.part_containing(3), Some((1, 3)));
        assert_eq!(view.part_containing(4), None);
    }

    #[test]
    fn assemble_copies_in_part_order() {
        let shape = Shape::from_paths(vec![square(0, 10), square(100, 10), square(2, 4)]);
        let view = PartsView::from_parts(vec![vec![0, 2], vec![1]]);
        let part = view.assemble_part(&shape, 0);
        assert_eq!(part.len(), 2);
        assert_eq!(part[1], shape[2]);

        let containing = view.assemble_part_containing(&shape, 1).unwrap();
        assert_eq!(containing.len(), 1);
        assert_eq!(containing[0], shape[1]);
        assert!(view.assemble_part_containing(&shape, 7).is_none());
    }
}
