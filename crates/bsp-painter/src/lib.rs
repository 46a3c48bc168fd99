//! Painter's algorithm rendering ordered by a BSP (Binary Space Partitioning) tree.
//!
//! The pipeline is:
//!
//! 1. build a [`BspTree`] once from a static polygon set,
//! 2. move a [`Camera`] with [`CameraCommand`]s,
//! 3. run [`render_scene`], which walks the tree back to front from the
//!    camera position, projects each polygon and hands it to a [`DrawSink`].
//!
//! Everything is plain data and single-threaded; the crate has no opinion
//! about windows or rasterization.

pub mod bsp;
mod camera;
mod error;
mod plane;
mod polygon;
pub mod render;
pub mod scene;
mod split;

pub use bsp::{
    BspNode, BspTree, BspVisitor, BuildStats, FirstPolygon, OrderRecorder, PlaneSelector,
};
pub use camera::{project, Camera, CameraCommand, Viewport, ZOOM_FACTOR};
pub use error::{SceneError, SceneResult};
pub use plane::{Classification, Plane3D, PlaneSide, FALLBACK_NORMAL, PLANE_EPSILON};
pub use polygon::Polygon;
pub use render::{
    render_edges, render_scene, Color, CommandList, DrawCommand, DrawSink, FillStyle,
    RenderOptions, RenderStats,
};
pub use split::split_polygon;
