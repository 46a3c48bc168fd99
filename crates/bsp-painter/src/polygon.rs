//! Polygon representation for BSP trees.

use nalgebra::{Point3, Vector3};

use crate::{Classification, Plane3D};

/// A polygon in 3D space, defined by an ordered list of vertices.
///
/// Vertices should be coplanar and, for correct splitting, form a convex
/// face. The winding of the first three vertices determines the normal
/// direction via the right-hand rule.
///
/// Construction does not reject short vertex lists: a polygon with fewer
/// than three vertices is [degenerate](Polygon::is_degenerate) and is
/// dropped by the tree builder before it is ever classified.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3<f64>>,
}

impl Polygon {
    /// Creates a new polygon from a list of vertices.
    pub fn new(vertices: Vec<Point3<f64>>) -> Self {
        Self { vertices }
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns true if the polygon has fewer than three vertices.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Computes the (unnormalized) normal `(v1 - v0) × (v2 - v0)`.
    ///
    /// Returns the zero vector for degenerate polygons.
    pub fn normal(&self) -> Vector3<f64> {
        match self.vertices.as_slice() {
            [a, b, c, ..] => (b - a).cross(&(c - a)),
            _ => Vector3::zeros(),
        }
    }

    /// Computes the unit normal vector of the polygon.
    ///
    /// Returns `None` if the first three vertices are collinear.
    pub fn unit_normal(&self) -> Option<Vector3<f64>> {
        self.normal().try_normalize(f64::EPSILON)
    }

    /// Returns true if the first three vertices span a plane.
    pub fn has_plane(&self) -> bool {
        self.unit_normal().is_some()
    }

    /// Returns the plane this polygon lies on.
    ///
    /// Collinear leading vertices give a plane through the first vertex with
    /// [`FALLBACK_NORMAL`](crate::FALLBACK_NORMAL). An empty polygon gets the
    /// fallback plane through the origin.
    pub fn plane(&self) -> Plane3D {
        let anchor = self.vertices.first().copied().unwrap_or_else(Point3::origin);
        Plane3D::from_point_and_normal(anchor, self.normal())
    }

    /// Checks if all vertices lie on the plane of the first three.
    pub fn is_planar(&self) -> bool {
        if self.vertices.len() <= 3 {
            return true;
        }
        self.plane().classify_vertices(&self.vertices) == Classification::Coplanar
    }

    /// Computes the centroid (vertex average) of the polygon.
    pub fn centroid(&self) -> Point3<f64> {
        let sum: Vector3<f64> = self.vertices.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.vertices.len().max(1) as f64)
    }

    /// Iterates over the closed boundary edges `(v[i], v[i + 1 mod n])`.
    pub fn edges(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Length of the closed boundary.
    pub fn perimeter(&self) -> f64 {
        self.edges().map(|(a, b)| (b - a).norm()).sum()
    }

    /// Area of the polygon, assuming it is planar.
    pub fn area(&self) -> f64 {
        let Some(first) = self.vertices.first() else {
            return 0.0;
        };
        let doubled: Vector3<f64> = self
            .vertices
            .windows(2)
            .skip(1)
            .map(|pair| (pair[0] - first).cross(&(pair[1] - first)))
            .sum();
        doubled.norm() / 2.0
    }

    /// Classifies this polygon relative to a plane.
    ///
    /// Returns:
    /// - `Coplanar` if all vertices lie on the plane
    /// - `Front` if no vertex is behind the plane
    /// - `Back` if no vertex is in front of the plane
    /// - `Spanning` if vertices are on both sides
    pub fn classify(&self, plane: &Plane3D) -> Classification {
        plane.classify_vertices(&self.vertices)
    }

    /// Returns true if the face points towards `eye`
    /// (`normal · (centroid - eye) < 0`).
    pub fn faces(&self, eye: Point3<f64>) -> bool {
        self.normal().dot(&(self.centroid() - eye)) < 0.0
    }
}

impl From<Vec<Point3<f64>>> for Polygon {
    fn from(vertices: Vec<Point3<f64>>) -> Self {
        Self::new(vertices)
    }
}

impl From<&Polygon> for Plane3D {
    fn from(polygon: &Polygon) -> Self {
        polygon.plane()
    }
}
