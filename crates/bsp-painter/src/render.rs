//! Render pass: BSP traversal, projection and draw primitive emission.
//!
//! The core never rasterizes anything itself. A pass hands screen-space
//! primitives, farthest first, to a [`DrawSink`] supplied by the caller.

use std::hash::{DefaultHasher, Hash, Hasher};

use log::trace;
use nalgebra::Point2;

use crate::scene::Edge;
use crate::{BspTree, Camera, Polygon, Viewport};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::rgb(200, 200, 200);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// A screen-space draw primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Point2<f64>,
        to: Point2<f64>,
        color: Color,
    },
    Polygon {
        points: Vec<Point2<f64>>,
        fill: Color,
        outline: Option<Color>,
    },
}

/// A drawing surface that accepts primitives in paint order.
pub trait DrawSink {
    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Color);

    fn draw_polygon(&mut self, points: &[Point2<f64>], fill: Color, outline: Option<Color>);
}

/// A sink that records commands so they can be inspected or replayed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replays the recorded commands, in order, into another sink.
    pub fn replay<S: DrawSink + ?Sized>(&self, sink: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::Line { from, to, color } => sink.draw_line(*from, *to, *color),
                DrawCommand::Polygon {
                    points,
                    fill,
                    outline,
                } => sink.draw_polygon(points, *fill, *outline),
            }
        }
    }
}

impl DrawSink for CommandList {
    fn draw_line(&mut self, from: Point2<f64>, to: Point2<f64>, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_polygon(&mut self, points: &[Point2<f64>], fill: Color, outline: Option<Color>) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
            outline,
        });
    }
}

/// How polygons are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStyle {
    /// Every polygon gets the same color.
    Uniform(Color),
    /// Each polygon gets a hue derived from its vertices, so split fragments
    /// keep stable colors across frames.
    PerPolygon,
}

impl FillStyle {
    const SATURATION: f64 = 0.5;
    const VALUE: f64 = 0.9;

    /// The fill color for `polygon`.
    pub fn color_for(&self, polygon: &Polygon) -> Color {
        match self {
            FillStyle::Uniform(color) => *color,
            FillStyle::PerPolygon => {
                let mut hasher = DefaultHasher::new();
                for vertex in polygon.vertices() {
                    vertex.coords.map(f64::to_bits).hash(&mut hasher);
                }
                let hue = (hasher.finish() % 3600) as f64 / 10.0;
                hsv_color(hue, Self::SATURATION, Self::VALUE)
            }
        }
    }
}

/// Converts a hue in degrees plus saturation and value in `0..=1` to RGB.
fn hsv_color(hue: f64, saturation: f64, value: f64) -> Color {
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;
    let channel = |c: f64| ((c + m) * 255.0).round() as u8;
    Color::rgb(channel(r), channel(g), channel(b))
}

/// Options for [`render_scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Skip polygons whose normal points away from the camera.
    pub cull_back_faces: bool,
    pub fill: FillStyle,
    pub outline: Option<Color>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cull_back_faces: false,
            fill: FillStyle::Uniform(Color::LIGHT_GRAY),
            outline: Some(Color::BLACK),
        }
    }
}

/// What happened to the polygons or edges of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Primitives considered, in traversal order.
    pub visited: usize,
    /// Polygons skipped as back faces.
    pub culled: usize,
    /// Primitives skipped because a vertex was behind the camera.
    pub clipped: usize,
    /// Primitives handed to the sink.
    pub drawn: usize,
}

/// Draws the tree's polygons back to front as seen by `camera`.
///
/// A polygon with any vertex behind the camera is skipped as a whole.
pub fn render_scene<S: DrawSink + ?Sized>(
    tree: &BspTree,
    camera: &Camera,
    viewport: &Viewport,
    options: &RenderOptions,
    sink: &mut S,
) -> RenderStats {
    let mut stats = RenderStats::default();

    tree.traverse_back_to_front(camera.position, &mut |group: &[Polygon]| {
        for polygon in group {
            stats.visited += 1;

            if options.cull_back_faces && !polygon.faces(camera.position) {
                stats.culled += 1;
                continue;
            }

            let Some(points) = project_polygon(polygon, camera, viewport) else {
                stats.clipped += 1;
                continue;
            };

            sink.draw_polygon(&points, options.fill.color_for(polygon), options.outline);
            stats.drawn += 1;
        }
    });

    trace!("Render pass: {:?}", stats);
    stats
}

/// Draws a wireframe of `edges`, skipping edges with an endpoint behind the
/// camera. No visibility ordering is applied.
pub fn render_edges<S: DrawSink + ?Sized>(
    edges: &[Edge],
    camera: &Camera,
    viewport: &Viewport,
    color: Color,
    sink: &mut S,
) -> RenderStats {
    let mut stats = RenderStats::default();

    for edge in edges {
        stats.visited += 1;
        match (
            camera.project(edge.start, viewport),
            camera.project(edge.end, viewport),
        ) {
            (Some(from), Some(to)) => {
                sink.draw_line(from, to, color);
                stats.drawn += 1;
            }
            _ => stats.clipped += 1,
        }
    }

    trace!("Wireframe pass: {:?}", stats);
    stats
}

/// Projects every vertex; `None` if any of them cannot be projected.
pub fn project_polygon(
    polygon: &Polygon,
    camera: &Camera,
    viewport: &Viewport,
) -> Option<Vec<Point2<f64>>> {
    polygon
        .vertices()
        .iter()
        .map(|vertex| camera.project(*vertex, viewport))
        .collect()
}
