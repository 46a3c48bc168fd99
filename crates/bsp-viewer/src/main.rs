use std::path::{Path, PathBuf};

use bsp_painter::scene::{self, Edge};
use bsp_painter::{BspTree, Camera, FillStyle, Polygon, RenderOptions, SceneResult, Viewport};
use bsp_viewer::{draw_overlay, handle_input, Viewer, BACKGROUND};
use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;
use nalgebra::Point3;

const CUBE_SIZE: f64 = 1.2;
const CUBE_SPACING: f64 = 1.0;

#[derive(Parser, Debug)]
#[command(name = "bsp-viewer")]
#[command(about = "Painter's algorithm viewer ordered by a BSP tree")]
struct Args {
    /// Polygon list JSON; a generated cube grid is used when omitted
    #[arg(long)]
    polygons: Option<PathBuf>,

    /// Edge list JSON for wireframe mode; derived from the polygons when omitted
    #[arg(long)]
    edges: Option<PathBuf>,

    /// Write cube_polygons.json and cube_data.json for the scene into DIR and exit
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,

    /// Cubes per axis of the generated grid
    #[arg(long, default_value_t = 3)]
    grid: usize,

    /// Starting camera position
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        allow_negative_numbers = true,
        default_values_t = [2.8, 2.8, 15.0]
    )]
    position: Vec<f64>,

    /// Starting yaw, in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    yaw: f64,

    /// Starting pitch, in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pitch: f64,

    /// Starting roll, in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    roll: f64,

    /// Distance covered per movement key press
    #[arg(long, default_value_t = 0.5)]
    move_speed: f64,

    /// Angle covered per rotation key press, in degrees
    #[arg(long, default_value_t = 5.0)]
    rot_speed: f64,

    #[arg(long, default_value_t = 500.0)]
    focal_length: f64,

    /// Draw faces pointing away from the camera too
    #[arg(long)]
    no_cull: bool,

    /// Give every polygon its own color
    #[arg(long)]
    colorful: bool,
}

impl Args {
    fn camera(&self) -> Camera {
        Camera::new(Point3::new(self.position[0], self.position[1], self.position[2]))
            .with_orientation(
                self.yaw.to_radians(),
                self.pitch.to_radians(),
                self.roll.to_radians(),
            )
            .with_speeds(self.move_speed, self.rot_speed.to_radians())
            .with_focal_length(self.focal_length)
    }

    fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            cull_back_faces: !self.no_cull,
            fill: if self.colorful {
                FillStyle::PerPolygon
            } else {
                defaults.fill
            },
            ..defaults
        }
    }
}

fn load_scene(args: &Args) -> SceneResult<(Vec<Polygon>, Vec<Edge>)> {
    let polygons = match &args.polygons {
        Some(path) => scene::load_polygons(path)?,
        None => scene::cube_grid(args.grid, CUBE_SIZE, CUBE_SPACING),
    };
    let edges = match &args.edges {
        Some(path) => scene::load_edges(path)?,
        None => scene::polygon_edges(&polygons),
    };
    info!("Scene: {} polygons, {} edges", polygons.len(), edges.len());
    Ok((polygons, edges))
}

fn export_scene(dir: &Path, polygons: &[Polygon], edges: &[Edge]) -> SceneResult<()> {
    let polygons_path = dir.join("cube_polygons.json");
    let edges_path = dir.join("cube_data.json");
    scene::save_polygons(&polygons_path, polygons)?;
    scene::save_edges(&edges_path, edges)?;
    info!("Wrote {} and {}", polygons_path.display(), edges_path.display());
    Ok(())
}

fn window_conf() -> Conf {
    Conf {
        window_title: "BSP Painter".to_owned(),
        window_width: 800,
        window_height: 600,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let (polygons, edges) = match load_scene(&args) {
        Ok(scene) => scene,
        Err(e) => {
            error!("Loading scene: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(dir) = &args.export {
        if let Err(e) = export_scene(dir, &polygons, &edges) {
            error!("Exporting scene: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let tree = BspTree::from_polygons(polygons);
    info!(
        "BSP tree built: {} polygons, {} nodes, depth {}",
        tree.polygon_count(),
        tree.node_count(),
        tree.depth()
    );

    let mut viewer = Viewer::new(tree, edges, args.camera(), args.render_options());

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        handle_input(&mut viewer);
        viewer.set_viewport(Viewport::new(screen_width() as f64, screen_height() as f64));
        viewer.refresh();

        clear_background(BACKGROUND);
        viewer.draw();
        draw_overlay(&viewer, 25.0);

        next_frame().await
    }
}
