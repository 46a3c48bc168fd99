//! Scene files and built-in scene generators.
//!
//! Polygon lists are stored as `[[[x, y, z], ...], ...]` and edge lists as
//! `[[[x, y, z], [x, y, z]], ...]`. Vertex order is preserved exactly, since
//! winding decides which side of a polygon is its front.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::debug;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{Polygon, SceneError, SceneResult};

/// A line segment of a wireframe scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Edge {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct PointList(Vec<[f64; 3]>);

impl PointList {
    fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        Self(points.into_iter().map(|p| [p.x, p.y, p.z]).collect())
    }

    fn into_points(self) -> Vec<Point3<f64>> {
        self.0.into_iter().map(Point3::from).collect()
    }
}

/// Parses a polygon list.
pub fn polygons_from_str(json: &str) -> SceneResult<Vec<Polygon>> {
    let records: Vec<PointList> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .map(|record| Polygon::new(record.into_points()))
        .collect())
}

/// Serializes a polygon list.
pub fn polygons_to_string(polygons: &[Polygon]) -> SceneResult<String> {
    let records: Vec<PointList> = polygons
        .iter()
        .map(|polygon| PointList::from_points(polygon.vertices()))
        .collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parses an edge list. Every entry must hold exactly two points.
pub fn edges_from_str(json: &str) -> SceneResult<Vec<Edge>> {
    let records: Vec<PointList> = serde_json::from_str(json)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match record.into_points().as_slice() {
            [start, end] => Ok(Edge::new(*start, *end)),
            other => Err(SceneError::InvalidEdge {
                index,
                len: other.len(),
            }),
        })
        .collect()
}

/// Serializes an edge list.
pub fn edges_to_string(edges: &[Edge]) -> SceneResult<String> {
    let records: Vec<PointList> = edges
        .iter()
        .map(|edge| PointList::from_points([&edge.start, &edge.end]))
        .collect();
    Ok(serde_json::to_string(&records)?)
}

pub fn load_polygons(path: impl AsRef<Path>) -> SceneResult<Vec<Polygon>> {
    let polygons = polygons_from_str(&read(path.as_ref())?)?;
    debug!("Loaded {} polygons from {}", polygons.len(), path.as_ref().display());
    Ok(polygons)
}

pub fn save_polygons(path: impl AsRef<Path>, polygons: &[Polygon]) -> SceneResult<()> {
    write(path.as_ref(), polygons_to_string(polygons)?)
}

pub fn load_edges(path: impl AsRef<Path>) -> SceneResult<Vec<Edge>> {
    let edges = edges_from_str(&read(path.as_ref())?)?;
    debug!("Loaded {} edges from {}", edges.len(), path.as_ref().display());
    Ok(edges)
}

pub fn save_edges(path: impl AsRef<Path>, edges: &[Edge]) -> SceneResult<()> {
    write(path.as_ref(), edges_to_string(edges)?)
}

fn read(path: &Path) -> SceneResult<String> {
    fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: String) -> SceneResult<()> {
    fs::write(path, contents).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Generates the six faces of an axis-aligned cube, wound so that every
/// normal points outwards.
pub fn cube_faces(center: Point3<f64>, size: f64) -> Vec<Polygon> {
    let h = size / 2.0;
    let corners = [
        center + Vector3::new(-h, -h, -h),
        center + Vector3::new(h, -h, -h),
        center + Vector3::new(h, h, -h),
        center + Vector3::new(-h, h, -h),
        center + Vector3::new(-h, -h, h),
        center + Vector3::new(h, -h, h),
        center + Vector3::new(h, h, h),
        center + Vector3::new(-h, h, h),
    ];

    let faces: [[usize; 4]; 6] = [
        [4, 5, 6, 7], // +Z
        [1, 0, 3, 2], // -Z
        [0, 4, 7, 3], // -X
        [5, 1, 2, 6], // +X
        [7, 6, 2, 3], // +Y
        [0, 1, 5, 4], // -Y
    ];

    faces
        .iter()
        .map(|face| Polygon::new(face.iter().map(|&i| corners[i]).collect()))
        .collect()
}

/// Generates a `count`³ grid of cubes. Cube `(i, j, k)` has its minimum
/// corner at `(i, j, k) · (cube_size + spacing)`.
pub fn cube_grid(count: usize, cube_size: f64, spacing: f64) -> Vec<Polygon> {
    let pitch = cube_size + spacing;
    let half = cube_size / 2.0;

    let mut polygons = Vec::with_capacity(count.pow(3) * 6);
    for x in 0..count {
        for y in 0..count {
            for z in 0..count {
                let min = Point3::new(x as f64, y as f64, z as f64) * pitch;
                polygons.extend(cube_faces(min + Vector3::repeat(half), cube_size));
            }
        }
    }
    polygons
}

/// Collects the distinct outline edges of a polygon set.
///
/// An edge shared by two polygons is reported once, whichever direction each
/// polygon walks it in.
pub fn polygon_edges(polygons: &[Polygon]) -> Vec<Edge> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for polygon in polygons {
        for (start, end) in polygon.edges() {
            let a = point_key(&start);
            let b = point_key(&end);
            let key = if a <= b { (a, b) } else { (b, a) };
            if seen.insert(key) {
                edges.push(Edge::new(start, end));
            }
        }
    }
    edges
}

fn point_key(point: &Point3<f64>) -> [u64; 3] {
    [point.x.to_bits(), point.y.to_bits(), point.z.to_bits()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn polygons_keep_vertex_order() {
        let json = "[[[0,0,0],[1,0,0],[0,1,0]],[[0,0,1],[0,1,1],[1,0,1],[1,1,1]]]";
        let polygons = polygons_from_str(json).unwrap();

        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[1].vertices()[1], Point3::new(0.0, 1.0, 1.0));
        assert_eq!(polygons[1].vertices()[2], Point3::new(1.0, 0.0, 1.0));

        let reparsed = polygons_from_str(&polygons_to_string(&polygons).unwrap()).unwrap();
        assert_eq!(reparsed, polygons);
    }

    #[test]
    fn short_polygons_load() {
        let polygons = polygons_from_str("[[[0,0,0],[1,0,0]]]").unwrap();
        assert!(polygons[0].is_degenerate());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(polygons_from_str("[[[0,0]]]"), Err(SceneError::Json(_))));
        assert!(matches!(edges_from_str("{}"), Err(SceneError::Json(_))));
    }

    #[test]
    fn edges_need_two_points() {
        let edges = edges_from_str("[[[0,0,0],[1,2,3]]]").unwrap();
        assert_eq!(edges, vec![Edge::new(Point3::origin(), Point3::new(1.0, 2.0, 3.0))]);

        let err = edges_from_str("[[[0,0,0],[1,0,0]],[[0,0,0]]]").unwrap_err();
        assert!(matches!(err, SceneError::InvalidEdge { index: 1, len: 1 }));
    }

    #[test]
    fn files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let polygons_path = dir.path().join("cube_polygons.json");
        let edges_path = dir.path().join("cube_data.json");

        let polygons = cube_faces(Point3::new(1.0, 2.0, 3.0), 2.0);
        let edges = polygon_edges(&polygons);
        save_polygons(&polygons_path, &polygons).unwrap();
        save_edges(&edges_path, &edges).unwrap();

        assert_eq!(load_polygons(&polygons_path).unwrap(), polygons);
        assert_eq!(load_edges(&edges_path).unwrap(), edges);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        match load_polygons(&path) {
            Err(SceneError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn cube_faces_point_outwards() {
        let center = Point3::new(1.0, -2.0, 0.5);
        let faces = cube_faces(center, 2.0);

        assert_eq!(faces.len(), 6);
        for face in &faces {
            assert!(face.is_planar());
            assert_relative_eq!(face.area(), 4.0, epsilon = 1e-12);
            let outward = face.centroid() - center;
            let normal = face.unit_normal().unwrap();
            assert_relative_eq!(normal, outward.normalize(), epsilon = 1e-12);
        }
    }

    #[test]
    fn cube_grid_layout() {
        let polygons = cube_grid(3, 1.2, 1.0);
        assert_eq!(polygons.len(), 27 * 6);

        let max_x = polygons
            .iter()
            .flat_map(|p| p.vertices())
            .map(|v| v.x)
            .fold(f64::MIN, f64::max);
        assert_relative_eq!(max_x, 2.0 * 2.2 + 1.2, epsilon = 1e-12);
        assert!(cube_grid(0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn cube_edges_are_deduplicated() {
        let edges = polygon_edges(&cube_faces(Point3::origin(), 1.0));
        assert_eq!(edges.len(), 12);
        for edge in &edges {
            assert_relative_eq!(edge.length(), 1.0, epsilon = 1e-12);
        }
    }
}
