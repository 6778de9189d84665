use super::{PartsView, SingleShape};
use crate::{
    clipping::{ClipType, Clipper, FillRule, PathRole, PolyTree},
    lines_set::Shape,
    polyline::Polyline,
};

impl Shape {
    /// Containment tree of the union of all polygons, non zero fill if `union_all` is true and
    /// even-odd otherwise.
    pub fn union_tree(&self, union_all: bool) -> PolyTree {
        let fill_rule = if union_all {
            FillRule::NonZero
        } else {
            FillRule::EvenOdd
        };
        let mut clipper = Clipper::new();
        self.add_paths(&mut clipper, PathRole::Subject);
        clipper.execute_tree(ClipType::Union, fill_rule)
    }

    /// Decompose the region into parts, each an outline with the holes directly inside of it.
    ///
    /// Outlines nested inside of a hole (islands) become parts of their own. The parts of islands
    /// come before the part containing them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use slicer_geometry::lines_set::Shape;
    /// # use slicer_geometry::core::math::Point;
    /// let square = |x: i64, size: i64| {
    ///     vec![Point::new(x, x), Point::new(x + size, x), Point::new(x + size, x + size), Point::new(x, x + size)]
    /// };
    /// let shape = Shape::from_paths(vec![square(0, 100), square(20, 60), square(40, 20)]);
    /// let parts = shape.split_into_parts(false);
    /// assert_eq!(parts.len(), 2);
    /// assert_eq!(parts[0].len(), 1);
    /// assert_eq!(parts[0].area(), 400.0);
    /// assert_eq!(parts[1].len(), 2);
    /// assert_eq!(parts[1].area(), 10000.0 - 3600.0);
    /// ```
    pub fn split_into_parts(&self, union_all: bool) -> Vec<SingleShape> {
        let mut tree = self.union_tree(union_all);
        let roots = tree.roots().to_vec();
        let mut result = Vec::new();
        collect_parts(&mut tree, &roots, &mut result);
        log::debug!(
            "split {} polygons into {} parts",
            self.len(),
            result.len()
        );
        result
    }

    /// Polygons of the region grouped by nesting depth: outermost contours at index 0, their
    /// holes at index 1, islands in those holes at index 2, and so on.
    pub fn sort_by_nesting(&self) -> Vec<Shape> {
        let mut tree = self.union_tree(false);
        let roots = tree.roots().to_vec();
        let mut result = Vec::new();
        collect_by_depth(&mut tree, &roots, 0, &mut result);
        result
    }

    /// Decompose the region into parts by index, consuming the shape.
    ///
    /// Returns the polygons of the region reordered so every part is stored contiguously (outline
    /// first, then its holes) together with the [PartsView] indexing into that reordered shape.
    pub fn split_into_parts_view(self, union_all: bool) -> (Shape, PartsView) {
        self.parts_view(union_all)
    }

    /// Same as [Shape::split_into_parts_view] but leaves `self` untouched, the returned shape is
    /// a reordered copy.
    pub fn parts_view(&self, union_all: bool) -> (Shape, PartsView) {
        let mut tree = self.union_tree(union_all);
        let roots = tree.roots().to_vec();
        let mut reordered = Shape::with_capacity(tree.len());
        let mut view = PartsView::new();
        collect_parts_view(&mut tree, &roots, &mut reordered, &mut view);
        (reordered, view)
    }

    /// Same as [Shape::split_into_parts_view] but replaces the polygons of `self` by the
    /// reordered polygons. Indexes held from before the call are invalidated.
    pub fn split_into_parts_view_in_place(&mut self, union_all: bool) -> PartsView {
        let (reordered, view) = self.parts_view(union_all);
        *self = reordered;
        view
    }

    /// Outermost contours of the region, without holes or islands.
    pub fn get_outside_polygons(&self) -> Shape {
        if self.len() <= 1 {
            return self.clone();
        }
        let mut tree = self.union_tree(false);
        let roots = tree.roots().to_vec();
        roots
            .into_iter()
            .map(|root| Polyline::polygon(tree.take_contour(root)))
            .collect()
    }

    /// The region with all holes that contain no islands filled in.
    pub fn remove_empty_holes(&self) -> Shape {
        let mut tree = self.union_tree(false);
        let roots = tree.roots().to_vec();
        let mut result = Shape::new();
        collect_holes(&mut tree, &roots, true, &mut result);
        result
    }

    /// Holes of the region that contain no islands.
    pub fn get_empty_holes(&self) -> Shape {
        let mut tree = self.union_tree(false);
        let roots = tree.roots().to_vec();
        let mut result = Shape::new();
        collect_holes(&mut tree, &roots, false, &mut result);
        result
    }
}

fn collect_parts(tree: &mut PolyTree, outers: &[usize], result: &mut Vec<SingleShape>) {
    for &outer in outers {
        let mut part = Shape::new();
        part.push(Polyline::polygon(tree.take_contour(outer)));
        let holes = tree.node(outer).children.clone();
        for hole in holes {
            part.push(Polyline::polygon(tree.take_contour(hole)));
            let islands = tree.node(hole).children.clone();
            collect_parts(tree, &islands, result);
        }
        result.push(SingleShape::from_shape(part));
    }
}

fn collect_by_depth(tree: &mut PolyTree, nodes: &[usize], depth: usize, result: &mut Vec<Shape>) {
    for &node in nodes {
        if depth >= result.len() {
            result.resize_with(depth + 1, Shape::new);
        }
        result[depth].push(Polyline::polygon(tree.take_contour(node)));
        let children = tree.node(node).children.clone();
        collect_by_depth(tree, &children, depth + 1, result);
    }
}

fn collect_parts_view(
    tree: &mut PolyTree,
    outers: &[usize],
    reordered: &mut Shape,
    view: &mut PartsView,
) {
    for &outer in outers {
        let part_idx = view.push_part();
        view.push_index(part_idx, reordered.len());
        reordered.push(Polyline::polygon(tree.take_contour(outer)));
        let holes = tree.node(outer).children.clone();
        for hole in holes {
            view.push_index(part_idx, reordered.len());
            reordered.push(Polyline::polygon(tree.take_contour(hole)));
            let islands = tree.node(hole).children.clone();
            collect_parts_view(tree, &islands, reordered, view);
        }
    }
}

/// Collects outlines (when `remove_holes`) and the holes whose having islands matches
/// `remove_holes`, descending into the kept holes.
fn collect_holes(tree: &mut PolyTree, outers: &[usize], remove_holes: bool, result: &mut Shape) {
    for &outer in outers {
        if remove_holes {
            result.push(Polyline::polygon(tree.take_contour(outer)));
        }
        let holes = tree.node(outer).children.clone();
        for hole in holes {
            let islands = tree.node(hole).children.clone();
            if !islands.is_empty() == remove_holes {
                result.push(Polyline::polygon(tree.take_contour(hole)));
                collect_holes(tree, &islands, remove_holes, result);
            }
        }
    }
}
