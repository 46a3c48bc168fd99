//! Interactive macroquad front end for the BSP painter.

use bsp_painter::render::{self, DrawSink};
use bsp_painter::scene::Edge;
use bsp_painter::{
    render_edges, render_scene, BspTree, Camera, CameraCommand, CommandList, RenderOptions,
    RenderStats, Viewport,
};
use macroquad::prelude::*;
use nalgebra::Point2;

pub mod controls;
pub use controls::{draw_overlay, handle_input, KEY_BINDINGS};

pub const BACKGROUND: Color = Color::new(0.08, 0.08, 0.12, 1.0);
pub const WIREFRAME_COLOR: render::Color = render::Color::WHITE;

/// What the viewer paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Filled polygons in BSP order.
    Bsp,
    /// Unordered wireframe edges.
    Wireframe,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Bsp => ViewMode::Wireframe,
            ViewMode::Wireframe => ViewMode::Bsp,
        }
    }
}

/// Scene, camera and the most recent render pass.
///
/// A pass runs only after the camera, mode or viewport changed; between
/// passes the recorded commands are replayed every frame.
pub struct Viewer {
    tree: BspTree,
    edges: Vec<Edge>,
    camera: Camera,
    viewport: Viewport,
    options: RenderOptions,
    mode: ViewMode,
    frame: CommandList,
    stats: RenderStats,
    dirty: bool,
}

impl Viewer {
    pub fn new(tree: BspTree, edges: Vec<Edge>, camera: Camera, options: RenderOptions) -> Self {
        Self {
            tree,
            edges,
            camera,
            viewport: Viewport::default(),
            options,
            mode: ViewMode::Bsp,
            frame: CommandList::new(),
            stats: RenderStats::default(),
            dirty: true,
        }
    }

    pub fn tree(&self) -> &BspTree {
        &self.tree
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    pub fn frame(&self) -> &CommandList {
        &self.frame
    }

    pub fn apply(&mut self, command: CameraCommand) {
        self.camera.apply(command);
        self.dirty = true;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.dirty = true;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.dirty = true;
        }
    }

    /// Runs a render pass if anything changed since the last one.
    ///
    /// Returns true if a pass ran.
    pub fn refresh(&mut self) -> bool {
        if !self.dirty {
            return false;
        }

        let mut frame = CommandList::new();
        self.stats = match self.mode {
            ViewMode::Bsp => render_scene(
                &self.tree,
                &self.camera,
                &self.viewport,
                &self.options,
                &mut frame,
            ),
            ViewMode::Wireframe => render_edges(
                &self.edges,
                &self.camera,
                &self.viewport,
                WIREFRAME_COLOR,
                &mut frame,
            ),
        };
        self.frame = frame;
        self.dirty = false;
        true
    }

    /// Replays the last pass onto the screen.
    pub fn draw(&self) {
        self.frame.replay(&mut ScreenSink);
    }
}

/// Draws primitives straight onto the macroquad screen.
pub struct ScreenSink;

impl DrawSink for ScreenSink {
    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>, color: render::Color) {
        draw_line(from.x as f32, from.y as f32, to.x as f32, to.y as f32, 1.0, to_macroquad(color));
    }

    fn draw_polygon(
        &mut self,
        points: &[Point2<f64>],
        fill: render::Color,
        outline: Option<render::Color>,
    ) {
        if points.len() < 3 {
            return;
        }

        // Fan triangulation: vertex 0 connects to all edges
        let fill = to_macroquad(fill);
        let first = to_vec2(points[0]);
        for pair in points[1..].windows(2) {
            draw_triangle(first, to_vec2(pair[0]), to_vec2(pair[1]), fill);
        }

        if let Some(outline) = outline {
            let outline = to_macroquad(outline);
            for (i, &start) in points.iter().enumerate() {
                let end = to_vec2(points[(i + 1) % points.len()]);
                let start = to_vec2(start);
                draw_line(start.x, start.y, end.x, end.y, 1.0, outline);
            }
        }
    }
}

fn to_vec2(point: Point2<f64>) -> Vec2 {
    vec2(point.x as f32, point.y as f32)
}

pub fn to_macroquad(color: render::Color) -> Color {
    Color::from_rgba(color.r, color.g, color.b, color.a)
}
