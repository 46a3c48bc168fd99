use approx::assert_relative_eq;
use bsp_painter::scene::{cube_faces, cube_grid};
use bsp_painter::{
    render_scene, BspTree, Camera, CommandList, DrawCommand, Polygon, RenderOptions, Viewport,
};
use nalgebra::{Point2, Point3, Vector3};

fn scenario() -> (BspTree, Camera, Viewport) {
    let tree = BspTree::from_polygons(cube_faces(Point3::origin(), 1.0));
    let camera = Camera::new(Point3::new(0.0, 0.0, 5.0)).with_focal_length(500.0);
    (tree, camera, Viewport::new(800.0, 600.0))
}

fn face_with_normal(polygons: &[&Polygon], normal: Vector3<f64>) -> usize {
    polygons
        .iter()
        .position(|p| p.unit_normal().is_some_and(|n| (n - normal).norm() < 1e-9))
        .unwrap()
}

#[test]
fn back_face_is_painted_before_front_face() {
    let (tree, camera, _) = scenario();
    let ordered = tree.draw_order(camera.position);

    assert_eq!(ordered.len(), 6);
    let back = face_with_normal(&ordered, -Vector3::z());
    let front = face_with_normal(&ordered, Vector3::z());
    assert!(back < front);
    assert_eq!(front, ordered.len() - 1);
}

#[test]
fn front_face_projects_around_screen_center() {
    let (tree, camera, viewport) = scenario();
    let mut sink = CommandList::new();
    let stats = render_scene(&tree, &camera, &viewport, &RenderOptions::default(), &mut sink);
    assert_eq!(stats.drawn, 6);

    let Some(DrawCommand::Polygon { points, .. }) = sink.commands().last() else {
        panic!("expected the +Z face last");
    };
    assert_eq!(points.len(), 4);

    let center = points.iter().fold(Point2::origin(), |acc, p| acc + p.coords / 4.0);
    assert_relative_eq!(center, Point2::new(400.0, 300.0), epsilon = 1e-9);

    // Half-extent 0.5 at depth 4.5.
    let half = 500.0 * 0.5 / 4.5;
    assert_relative_eq!(points[0], Point2::new(400.0 - half, 300.0 + half), epsilon = 1e-9);
    assert_relative_eq!(points[2], Point2::new(400.0 + half, 300.0 - half), epsilon = 1e-9);
}

#[test]
fn nearer_cube_is_painted_after_farther_cube() {
    let mut polygons = cube_faces(Point3::new(0.0, 0.0, -3.0), 1.0);
    polygons.extend(cube_faces(Point3::new(0.0, 0.0, 0.0), 1.0));
    let tree = BspTree::from_polygons(polygons);
    let eye = Point3::new(0.0, 0.0, 5.0);

    let ordered = tree.draw_order(eye);
    let last_far = ordered.iter().rposition(|p| p.centroid().z < -2.0).unwrap();
    let first_near = ordered.iter().position(|p| p.centroid().z > -1.0).unwrap();
    assert!(last_far < first_near);
}

#[test]
fn grid_is_fully_visible_from_default_viewpoint() {
    let tree = BspTree::from_polygons(cube_grid(3, 1.2, 1.0));
    assert_eq!(tree.stats().splits, 0);
    assert_eq!(tree.polygon_count(), 27 * 6);

    let camera = Camera::new(Point3::new(2.8, 2.8, 15.0));
    let options = RenderOptions {
        cull_back_faces: true,
        ..RenderOptions::default()
    };
    let mut sink = CommandList::new();
    let stats = render_scene(&tree, &camera, &Viewport::default(), &options, &mut sink);

    assert_eq!(stats.visited, 27 * 6);
    assert_eq!(stats.clipped, 0);
    assert_eq!(stats.drawn + stats.culled, stats.visited);
    assert!(stats.drawn > 0 && stats.culled > 0);
}
