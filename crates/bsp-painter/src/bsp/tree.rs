//! BSP tree container, construction and traversal.

use log::{debug, warn};
use nalgebra::Point3;

use crate::{Classification, PlaneSide, Polygon};

use super::node::BspNode;
use super::selector::{FirstPolygon, PlaneSelector};
use super::visitor::BspVisitor;

/// Counters gathered while building a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Polygons handed to the builder.
    pub input: usize,
    /// Polygons dropped for having fewer than three vertices.
    pub degenerate: usize,
    /// Splitters whose leading vertices were collinear (fallback plane used).
    pub fallback_planes: usize,
    /// Spanning polygons that were split in two.
    pub splits: usize,
}

/// A Binary Space Partitioning tree for 3D polygons.
///
/// Each node contains the polygons coplanar with its splitting plane, while
/// the remaining polygons are stored in front or back subtrees. The tree is
/// built once from a fixed polygon set and is read-only afterwards;
/// rebuilding means constructing a new tree.
///
/// # Traversal
///
/// [`BspTree::draw_order`] returns the polygons back to front relative to a
/// viewpoint, which is the order the painter's algorithm needs: drawing them
/// in sequence lets nearer faces overpaint farther ones without a depth test.
#[derive(Debug, Clone, Default)]
pub struct BspTree {
    root: Option<BspNode>,
    stats: BuildStats,
}

impl BspTree {
    /// Creates an empty BSP tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a BSP tree from a collection of polygons.
    ///
    /// Uses the provided [`PlaneSelector`] to choose splitting planes.
    /// Degenerate polygons are dropped up front and spanning polygons are
    /// split along the node plane. Returns an empty tree if no usable
    /// polygon remains.
    pub fn build<S: PlaneSelector>(polygons: Vec<Polygon>, selector: &S) -> Self {
        let mut stats = BuildStats {
            input: polygons.len(),
            ..BuildStats::default()
        };

        let polygons: Vec<Polygon> = polygons
            .into_iter()
            .filter(|polygon| {
                if polygon.is_degenerate() {
                    debug!("Dropping degenerate polygon with {} vertices", polygon.len());
                    stats.degenerate += 1;
                    false
                } else {
                    true
                }
            })
            .collect();

        let root = build_node(polygons, selector, &mut stats);
        let tree = Self { root, stats };

        debug!(
            "Built BSP tree: {} input polygons, {} dropped, {} splits, {} nodes, depth {}",
            stats.input,
            stats.degenerate,
            stats.splits,
            tree.node_count(),
            tree.depth()
        );

        tree
    }

    /// Builds a BSP tree splitting on the first polygon of every subset.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self::build(polygons, &FirstPolygon)
    }

    /// Returns `true` if the tree contains no polygons.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns a reference to the root node, if any.
    #[inline]
    pub fn root(&self) -> Option<&BspNode> {
        self.root.as_ref()
    }

    /// Counters recorded while building.
    #[inline]
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Returns the total number of polygons in the tree.
    pub fn polygon_count(&self) -> usize {
        self.root.as_ref().map_or(0, BspNode::polygon_count)
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, BspNode::node_count)
    }

    /// Returns the maximum depth of the tree (0 for empty tree).
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, BspNode::depth)
    }

    /// Returns the polygons in back-to-front order as seen from `eye`.
    pub fn draw_order(&self, eye: Point3<f64>) -> Vec<&Polygon> {
        let mut ordered = Vec::with_capacity(self.polygon_count());
        if let Some(root) = &self.root {
            walk_back_to_front(root, eye, &mut |group| ordered.extend(group));
        }
        ordered
    }

    /// Traverses the tree back-to-front relative to the given viewpoint.
    ///
    /// The visitor receives one polygon group per node, farthest first.
    pub fn traverse_back_to_front<V: BspVisitor>(&self, eye: Point3<f64>, visitor: &mut V) {
        if let Some(root) = &self.root {
            walk_back_to_front(root, eye, &mut |group| visitor.visit(group));
        }
    }

    /// Traverses the tree front-to-back relative to the given viewpoint.
    ///
    /// This is the exact reverse of the back-to-front group order.
    pub fn traverse_front_to_back<V: BspVisitor>(&self, eye: Point3<f64>, visitor: &mut V) {
        if let Some(root) = &self.root {
            walk_front_to_back(root, eye, &mut |group| visitor.visit(group));
        }
    }
}

/// Recursively builds a BSP node from a list of non-degenerate polygons.
fn build_node<S: PlaneSelector>(
    mut polygons: Vec<Polygon>,
    selector: &S,
    stats: &mut BuildStats,
) -> Option<BspNode> {
    let splitter_idx = selector.select(&polygons)?;

    // `remove` keeps the remaining input order, which decides later splitters.
    let splitter = polygons.remove(splitter_idx);
    if !splitter.has_plane() {
        warn!(
            "Splitter starting at {:?} has collinear leading vertices; using fallback normal",
            splitter.vertices()[0]
        );
        stats.fallback_planes += 1;
    }
    let plane = splitter.plane();

    let mut coplanar = Vec::new();
    let mut front_list = Vec::new();
    let mut back_list = Vec::new();

    for polygon in polygons {
        match polygon.classify(&plane) {
            Classification::Front => front_list.push(polygon),
            Classification::Back => back_list.push(polygon),
            Classification::Coplanar => coplanar.push(polygon),
            Classification::Spanning => {
                stats.splits += 1;
                let (front_part, back_part) = polygon.cut(&plane);
                front_list.extend(front_part);
                back_list.extend(back_part);
            }
        }
    }

    let mut node = BspNode::with_coplanar(plane, splitter, coplanar);
    node.set_front(build_node(front_list, selector, stats));
    node.set_back(build_node(back_list, selector, stats));

    Some(node)
}

/// Walks a subtree farthest-first, handing each node's polygons to `emit`.
fn walk_back_to_front<'a, F>(node: &'a BspNode, eye: Point3<f64>, emit: &mut F)
where
    F: FnMut(&'a [Polygon]),
{
    let (far, near) = match node.plane().classify_point(eye) {
        PlaneSide::Front | PlaneSide::OnPlane => (node.back(), node.front()),
        PlaneSide::Back => (node.front(), node.back()),
    };

    if let Some(far) = far {
        walk_back_to_front(far, eye, emit);
    }
    emit(node.polygons());
    if let Some(near) = near {
        walk_back_to_front(near, eye, emit);
    }
}

/// Walks a subtree nearest-first, handing each node's polygons to `emit`.
fn walk_front_to_back<'a, F>(node: &'a BspNode, eye: Point3<f64>, emit: &mut F)
where
    F: FnMut(&'a [Polygon]),
{
    let (far, near) = match node.plane().classify_point(eye) {
        PlaneSide::Front | PlaneSide::OnPlane => (node.back(), node.front()),
        PlaneSide::Back => (node.front(), node.back()),
    };

    if let Some(near) = near {
        walk_front_to_back(near, eye, emit);
    }
    emit(node.polygons());
    if let Some(far) = far {
        walk_front_to_back(far, eye, emit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsp::visitor::OrderRecorder;
    use crate::FALLBACK_NORMAL;

    fn make_triangle(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Polygon {
        Polygon::new(vec![Point3::from(a), Point3::from(b), Point3::from(c)])
    }

    fn triangle_at_z(z: f64) -> Polygon {
        make_triangle([0.0, 0.0, z], [1.0, 0.0, z], [0.0, 1.0, z])
    }

    #[test]
    fn empty_tree() {
        let tree = BspTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.polygon_count(), 0);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn build_empty_traverses_to_nothing() {
        let tree = BspTree::from_polygons(vec![]);
        assert!(tree.is_empty());
        assert!(tree.draw_order(Point3::new(1.0, 2.0, 3.0)).is_empty());

        let mut visitor = OrderRecorder::new();
        tree.traverse_back_to_front(Point3::origin(), &mut visitor);
        assert!(visitor.polygons().is_empty());
    }

    #[test]
    fn build_single_polygon() {
        let tree = BspTree::from_polygons(vec![triangle_at_z(0.0)]);

        assert!(!tree.is_empty());
        assert_eq!(tree.polygon_count(), 1);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.root().unwrap().splitter(), &triangle_at_z(0.0));
    }

    #[test]
    fn first_polygon_is_root_splitter() {
        let tree = BspTree::from_polygons(vec![
            triangle_at_z(0.0),
            triangle_at_z(1.0),
            triangle_at_z(-1.0),
        ]);
        let root = tree.root().unwrap();

        assert_eq!(root.splitter(), &triangle_at_z(0.0));
        assert_eq!(root.front().unwrap().splitter(), &triangle_at_z(1.0));
        assert_eq!(root.back().unwrap().splitter(), &triangle_at_z(-1.0));
    }

    #[test]
    fn coplanar_polygons_share_node() {
        let poly1 = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        // Opposite winding still counts as coplanar.
        let poly2 = make_triangle([1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [2.0, 0.0, 0.0]);

        let tree = BspTree::from_polygons(vec![poly1.clone(), poly2.clone()]);

        assert_eq!(tree.depth(), 1);
        let root = tree.root().unwrap();
        assert_eq!(root.polygons(), &[poly1, poly2]);
    }

    #[test]
    fn spanning_polygon_gets_split() {
        let splitter = make_triangle([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let spanning = make_triangle([-0.5, -1.0, 0.5], [0.5, 1.0, 0.5], [0.5, -1.0, 0.5]);

        let tree = BspTree::from_polygons(vec![splitter, spanning]);

        assert_eq!(tree.polygon_count(), 3);
        assert_eq!(tree.stats().splits, 1);
        let root = tree.root().unwrap();
        assert!(root.front().is_some());
        assert!(root.back().is_some());
    }

    #[test]
    fn degenerate_polygon_is_dropped() {
        let valid = vec![triangle_at_z(0.0), triangle_at_z(2.0), triangle_at_z(-2.0)];
        let stub = Polygon::new(vec![Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 5.0, 5.0)]);

        let mut with_stub = valid.clone();
        with_stub.insert(1, stub);

        let expected = BspTree::from_polygons(valid);
        let tree = BspTree::from_polygons(with_stub);

        assert_eq!(tree.root(), expected.root());
        assert_eq!(tree.stats().degenerate, 1);
        assert_eq!(tree.stats().input, 4);
    }

    #[test]
    fn only_degenerate_input_builds_empty_tree() {
        let stub = Polygon::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
        let tree = BspTree::from_polygons(vec![stub]);
        assert!(tree.is_empty());
    }

    #[test]
    fn collinear_splitter_uses_fallback_plane() {
        let sliver = make_triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let above = triangle_at_z(1.0);
        let below = triangle_at_z(-1.0);

        let tree = BspTree::from_polygons(vec![sliver.clone(), above, below]);
        let root = tree.root().unwrap();

        assert_eq!(root.plane().normal(), FALLBACK_NORMAL);
        assert_eq!(root.splitter(), &sliver);
        assert_eq!(tree.stats().fallback_planes, 1);
        assert_eq!(root.front().unwrap().splitter(), &triangle_at_z(1.0));
        assert_eq!(root.back().unwrap().splitter(), &triangle_at_z(-1.0));
    }

    #[test]
    fn draw_order_paints_far_polygon_first() {
        let near = triangle_at_z(1.0);
        let far = triangle_at_z(-1.0);

        for polygons in [vec![far.clone(), near.clone()], vec![near.clone(), far.clone()]] {
            let tree = BspTree::from_polygons(polygons);
            let ordered = tree.draw_order(Point3::new(0.5, 0.5, 10.0));
            assert_eq!(ordered, vec![&far, &near]);

            // From the other side the order flips.
            let ordered = tree.draw_order(Point3::new(0.5, 0.5, -10.0));
            assert_eq!(ordered, vec![&near, &far]);
        }
    }

    #[test]
    fn eye_on_plane_counts_as_front() {
        let tree = BspTree::from_polygons(vec![
            triangle_at_z(0.0),
            triangle_at_z(1.0),
            triangle_at_z(-1.0),
        ]);
        let ordered = tree.draw_order(Point3::new(3.0, 3.0, 0.0));
        let zs: Vec<f64> = ordered.iter().map(|p| p.centroid().z).collect();
        assert_eq!(zs, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn front_to_back_reverses_back_to_front() {
        let polygons = vec![
            triangle_at_z(0.0),
            triangle_at_z(1.0),
            triangle_at_z(-1.0),
            triangle_at_z(2.0),
        ];
        let tree = BspTree::from_polygons(polygons);
        let eye = Point3::new(0.2, 0.2, 0.5);

        let mut back_to_front = OrderRecorder::new();
        tree.traverse_back_to_front(eye, &mut back_to_front);
        let mut front_to_back = OrderRecorder::new();
        tree.traverse_front_to_back(eye, &mut front_to_back);

        let mut reversed: Vec<&[Polygon]> = front_to_back.groups().collect();
        reversed.reverse();
        assert_eq!(back_to_front.groups().collect::<Vec<_>>(), reversed);
        assert_eq!(back_to_front.group_count(), tree.node_count());
    }

    #[test]
    fn stacked_polygons_form_a_chain() {
        let polygons = vec![triangle_at_z(0.0), triangle_at_z(1.0), triangle_at_z(2.0)];
        let tree = BspTree::from_polygons(polygons);
        assert_eq!(tree.polygon_count(), 3);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.depth(), 3);
    }
}
