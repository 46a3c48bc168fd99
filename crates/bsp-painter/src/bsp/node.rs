//! BSP tree node implementation.

use crate::{Plane3D, Polygon};

/// A node in the BSP tree.
///
/// Each node partitions space using the plane of its splitting polygon and
/// stores every polygon found coplanar with that plane. Polygons in front of
/// or behind the plane live in the respective child subtrees, which the node
/// owns outright.
#[derive(Debug, Clone, PartialEq)]
pub struct BspNode {
    /// The splitting plane for this node.
    plane: Plane3D,

    /// The splitter followed by the polygons coplanar with it.
    polygons: Vec<Polygon>,

    /// Subtree containing polygons in FRONT of the splitting plane.
    front: Option<Box<BspNode>>,

    /// Subtree containing polygons BEHIND the splitting plane.
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Creates a leaf node for `splitter`, partitioning along `plane`.
    pub fn new(plane: Plane3D, splitter: Polygon) -> Self {
        Self::with_coplanar(plane, splitter, Vec::new())
    }

    /// Creates a leaf node for `splitter` plus polygons coplanar with it.
    pub fn with_coplanar(plane: Plane3D, splitter: Polygon, coplanar: Vec<Polygon>) -> Self {
        let mut polygons = Vec::with_capacity(coplanar.len() + 1);
        polygons.push(splitter);
        polygons.extend(coplanar);
        Self {
            plane,
            polygons,
            front: None,
            back: None,
        }
    }

    /// Returns a reference to the splitting plane.
    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// The polygon whose plane partitions this node.
    #[inline]
    pub fn splitter(&self) -> &Polygon {
        &self.polygons[0]
    }

    /// The splitter followed by every polygon coplanar with it.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Polygons stored at this node besides the splitter.
    #[inline]
    pub fn coplanar(&self) -> &[Polygon] {
        &self.polygons[1..]
    }

    /// Returns a reference to the front child subtree.
    #[inline]
    pub fn front(&self) -> Option<&BspNode> {
        self.front.as_deref()
    }

    /// Returns a reference to the back child subtree.
    #[inline]
    pub fn back(&self) -> Option<&BspNode> {
        self.back.as_deref()
    }

    /// Sets the front child subtree.
    #[inline]
    pub fn set_front(&mut self, node: Option<BspNode>) {
        self.front = node.map(Box::new);
    }

    /// Sets the back child subtree.
    #[inline]
    pub fn set_back(&mut self, node: Option<BspNode>) {
        self.back = node.map(Box::new);
    }

    /// Checks if this node has any children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    /// Returns the total number of polygons in this subtree.
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
            + self.front().map_or(0, BspNode::polygon_count)
            + self.back().map_or(0, BspNode::polygon_count)
    }

    /// Returns the number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.front().map_or(0, BspNode::node_count) + self.back().map_or(0, BspNode::node_count)
    }

    /// Returns the depth of this subtree (1 for a leaf node).
    pub fn depth(&self) -> usize {
        let front_depth = self.front().map_or(0, BspNode::depth);
        let back_depth = self.back().map_or(0, BspNode::depth);
        1 + front_depth.max(back_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn make_triangle(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Polygon {
        Polygon::new(vec![Point3::from(a), Point3::from(b), Point3::from(c)])
    }

    fn ground() -> Plane3D {
        Plane3D::from_point_and_normal(Point3::origin(), Vector3::y())
    }

    fn floor_triangle() -> Polygon {
        make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0])
    }

    #[test]
    fn new_node_is_leaf_holding_splitter() {
        let node = BspNode::new(ground(), floor_triangle());

        assert!(node.is_leaf());
        assert_eq!(node.splitter(), &floor_triangle());
        assert!(node.coplanar().is_empty());
        assert_eq!(node.polygon_count(), 1);
        assert_eq!(node.node_count(), 1);
        assert_eq!(node.depth(), 1);
    }

    #[test]
    fn with_coplanar_keeps_splitter_first() {
        let other = make_triangle([2.0, 0.0, 0.0], [2.0, 0.0, 1.0], [3.0, 0.0, 0.0]);
        let node = BspNode::with_coplanar(ground(), floor_triangle(), vec![other.clone()]);

        assert_eq!(node.polygons(), &[floor_triangle(), other.clone()]);
        assert_eq!(node.coplanar(), &[other]);
    }

    #[test]
    fn set_children_updates_leaf_status() {
        let mut node = BspNode::new(ground(), floor_triangle());

        node.set_front(Some(BspNode::new(ground(), floor_triangle())));
        assert!(!node.is_leaf());

        node.set_front(None);
        assert!(node.is_leaf());

        node.set_back(Some(BspNode::new(ground(), floor_triangle())));
        assert!(!node.is_leaf());
    }

    #[test]
    fn counts_are_recursive() {
        let mut root = BspNode::new(ground(), floor_triangle());
        let mut front = BspNode::with_coplanar(ground(), floor_triangle(), vec![floor_triangle()]);
        front.set_front(Some(BspNode::new(ground(), floor_triangle())));
        root.set_front(Some(front));
        root.set_back(Some(BspNode::new(ground(), floor_triangle())));

        // root -> front -> front
        assert_eq!(root.depth(), 3);
        assert_eq!(root.node_count(), 4);
        assert_eq!(root.polygon_count(), 5);
    }
}
