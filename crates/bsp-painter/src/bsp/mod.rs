//! Binary Space Partitioning tree for painter's algorithm rendering.
//!
//! The tree recursively partitions 3D space using planes derived from the
//! input polygons themselves. Walking it relative to a viewpoint yields a
//! back-to-front order that needs no depth buffer.
//!
//! # Example
//!
//! ```
//! use bsp_painter::BspTree;
//! use bsp_painter::scene::cube_faces;
//! use nalgebra::Point3;
//!
//! let tree = BspTree::from_polygons(cube_faces(Point3::origin(), 1.0));
//!
//! // Farthest faces first; draw them in this order.
//! let eye = Point3::new(0.0, 0.0, 5.0);
//! let ordered = tree.draw_order(eye);
//! assert_eq!(ordered.len(), 6);
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: the root node plus build statistics
//! - [`BspNode`]: splitting plane, splitter and coplanar polygons, children
//! - [`PlaneSelector`]: strategy trait for choosing splitting planes
//! - [`BspVisitor`]: visitor trait for custom traversal behavior

mod node;
mod selector;
mod tree;
mod visitor;

pub use node::BspNode;
pub use selector::{FirstPolygon, PlaneSelector};
pub use tree::{BspTree, BuildStats};
pub use visitor::{BspVisitor, OrderRecorder};
