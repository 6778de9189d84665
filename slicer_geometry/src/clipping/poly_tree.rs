use super::unwrap_spatial_index;
use crate::core::math::{point_in_polygon, signed_area, Point, PointContainment};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use static_aabb2d_index::{StaticAABB2DIndex, StaticAABB2DIndexBuilder};

/// Node in a [PolyTree]: an outer contour (children are its holes) or a hole (children are the
/// outer contours nested inside of it).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolyNode {
    pub contour: Vec<Point>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub is_hole: bool,
}

/// Containment hierarchy of a boolean operation result, stored as an arena of [PolyNode]s
/// addressed by index.
///
/// Roots are the outermost contours. Walking from a root alternates outer contour, hole, outer
/// contour (an island inside a hole), and so on.
///
/// # Examples
///
/// ```
/// # use slicer_geometry::clipping::*;
/// # use slicer_geometry::core::math::Point;
/// let square = |x: i64, size: i64| {
///     vec![Point::new(x, x), Point::new(x + size, x), Point::new(x + size, x + size), Point::new(x, x + size)]
/// };
/// let mut clipper = Clipper::new();
/// clipper.add_path(&square(0, 100), PathRole::Subject, true);
/// clipper.add_path(&square(20, 60), PathRole::Subject, true);
/// clipper.add_path(&square(40, 20), PathRole::Subject, true);
/// let tree = clipper.execute_tree(ClipType::Union, FillRule::EvenOdd);
///
/// assert_eq!(tree.roots().len(), 1);
/// let outer = tree.node(tree.roots()[0]);
/// assert_eq!(outer.children.len(), 1);
/// let hole = tree.node(outer.children[0]);
/// assert!(hole.is_hole);
/// assert_eq!(hole.children.len(), 1);
/// assert_eq!(tree.depth(hole.children[0]), 2);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolyTree {
    nodes: Vec<PolyNode>,
    roots: Vec<usize>,
    open_paths: Vec<Vec<Point>>,
}

impl PolyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the hierarchy from normalized parts (outer contour first, then its holes).
    ///
    /// Each outer contour gets as parent the smallest hole containing it.
    pub fn from_shapes(shapes: Vec<Vec<Vec<Point>>>) -> Self {
        let mut tree = PolyTree::new();
        let mut outers = Vec::with_capacity(shapes.len());
        let mut holes = Vec::new();

        for shape in shapes {
            let mut contours = shape.into_iter();
            let Some(outer) = contours.next() else {
                continue;
            };
            let outer_idx = tree.push_node(outer, None, false);
            outers.push(outer_idx);
            for hole in contours {
                let hole_idx = tree.push_node(hole, Some(outer_idx), true);
                tree.nodes[outer_idx].children.push(hole_idx);
                holes.push(hole_idx);
            }
        }

        if holes.is_empty() {
            tree.roots = outers;
            return tree;
        }

        let hole_index = tree.build_bounds_index(&holes);
        let mut query_stack = Vec::with_capacity(8);
        let mut candidates = Vec::new();
        for &outer_idx in &outers {
            let (min, max) = bounds(&tree.nodes[outer_idx].contour);
            candidates.clear();
            hole_index.visit_query_with_stack(
                min.x as f64,
                min.y as f64,
                max.x as f64,
                max.y as f64,
                &mut |i: usize| {
                    candidates.push(holes[i]);
                },
                &mut query_stack,
            );

            let mut parent: Option<(usize, f64)> = None;
            for &hole_idx in &candidates {
                if tree.nodes[hole_idx].parent == Some(outer_idx)
                    || !contour_inside(&tree.nodes[outer_idx].contour, &tree.nodes[hole_idx].contour)
                {
                    continue;
                }
                let hole_area = signed_area(&tree.nodes[hole_idx].contour).abs();
                if parent.is_none_or(|(_, area)| hole_area < area) {
                    parent = Some((hole_idx, hole_area));
                }
            }

            match parent {
                Some((hole_idx, _)) => {
                    tree.nodes[outer_idx].parent = Some(hole_idx);
                    tree.nodes[hole_idx].children.push(outer_idx);
                }
                None => tree.roots.push(outer_idx),
            }
        }

        log::trace!(
            "built poly tree: {} nodes, {} roots, {} holes",
            tree.nodes.len(),
            tree.roots.len(),
            holes.len()
        );
        tree
    }

    fn push_node(&mut self, contour: Vec<Point>, parent: Option<usize>, is_hole: bool) -> usize {
        self.nodes.push(PolyNode {
            contour,
            parent,
            children: Vec::new(),
            is_hole,
        });
        self.nodes.len() - 1
    }

    fn build_bounds_index(&self, node_indexes: &[usize]) -> StaticAABB2DIndex<f64> {
        let mut builder = StaticAABB2DIndexBuilder::new(node_indexes.len());
        for &i in node_indexes {
            let (min, max) = bounds(&self.nodes[i].contour);
            builder.add(min.x as f64, min.y as f64, max.x as f64, max.y as f64);
        }
        unwrap_spatial_index(builder)
    }

    /// Indexes of the outermost contours.
    #[inline]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    #[inline]
    pub fn node(&self, index: usize) -> &PolyNode {
        &self.nodes[index]
    }

    #[inline]
    pub fn nodes(&self) -> &[PolyNode] {
        &self.nodes
    }

    /// Total number of closed contours in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nesting depth of a node, roots have depth 0.
    pub fn depth(&self, index: usize) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[index].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent].parent;
        }
        depth
    }

    /// Move the contour out of a node, leaving it empty. Used when converting the tree into other
    /// collections without copying points.
    #[inline]
    pub fn take_contour(&mut self, index: usize) -> Vec<Point> {
        std::mem::take(&mut self.nodes[index].contour)
    }

    /// Open lines produced by the operation.
    #[inline]
    pub fn open_paths(&self) -> &[Vec<Point>] {
        &self.open_paths
    }

    #[inline]
    pub fn set_open_paths(&mut self, open_paths: Vec<Vec<Point>>) {
        self.open_paths = open_paths;
    }

    #[inline]
    pub fn into_open_paths(self) -> Vec<Vec<Point>> {
        self.open_paths
    }

    /// Node indexes in depth first order (each node before its children).
    pub fn depth_first(&self) -> Vec<usize> {
        let mut result = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(i) = stack.pop() {
            result.push(i);
            stack.extend(self.nodes[i].children.iter().rev().copied());
        }
        result
    }
}

fn bounds(contour: &[Point]) -> (Point, Point) {
    let mut min = contour[0];
    let mut max = contour[0];
    for p in &contour[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

/// Tests the first vertex of `inner` not on the border of `outer`. Contours fully on the border
/// are not inside.
fn contour_inside(inner: &[Point], outer: &[Point]) -> bool {
    for &p in inner {
        match point_in_polygon(p, outer) {
            PointContainment::Inside => return true,
            PointContainment::Outside => return false,
            PointContainment::OnBorder => {}
        }
    }
    false
}
