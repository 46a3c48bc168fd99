//! Polygon cutting/splitting operations for BSP trees.

use nalgebra::Point3;

use crate::{Classification, Plane3D, PlaneSide, Polygon};

impl Polygon {
    /// Cuts the polygon by a plane.
    ///
    /// Returns `(front, back)`:
    ///
    /// - **Front**: `(Some(self), None)`
    /// - **Back**: `(None, Some(self))`
    /// - **Coplanar**: `(Some(self), None)`, treated as front
    /// - **Spanning**: the result of [`split_polygon`]
    pub fn cut(&self, plane: &Plane3D) -> (Option<Polygon>, Option<Polygon>) {
        match self.classify(plane) {
            Classification::Front | Classification::Coplanar => (Some(self.clone()), None),
            Classification::Back => (None, Some(self.clone())),
            Classification::Spanning => split_polygon(self, plane),
        }
    }
}

/// Splits a spanning polygon into front and back parts.
///
/// Walks the polygon edges in order (Sutherland-Hodgman style). On-plane
/// vertices go to both sides; every edge running strictly from one side to
/// the other contributes its intersection point to both sides. A side left
/// with fewer than three vertices is returned as `None`.
pub fn split_polygon(polygon: &Polygon, plane: &Plane3D) -> (Option<Polygon>, Option<Polygon>) {
    let vertices = polygon.vertices();
    let n = vertices.len();

    let mut front_verts = Vec::with_capacity(n + 1);
    let mut back_verts = Vec::with_capacity(n + 1);

    let sides: Vec<PlaneSide> = vertices.iter().map(|v| plane.classify_point(*v)).collect();

    for i in 0..n {
        let current = vertices[i];
        let current_side = sides[i];
        let next_idx = (i + 1) % n;
        let next = vertices[next_idx];
        let next_side = sides[next_idx];

        match current_side {
            PlaneSide::Front => front_verts.push(current),
            PlaneSide::Back => back_verts.push(current),
            PlaneSide::OnPlane => {
                front_verts.push(current);
                back_verts.push(current);
            }
        }

        let crosses = matches!(
            (current_side, next_side),
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
        );

        if crosses {
            let intersection = edge_intersection(plane, current, next);
            front_verts.push(intersection);
            back_verts.push(intersection);
        }
    }

    (into_polygon(front_verts), into_polygon(back_verts))
}

/// Intersection of the edge `a -> b` with the plane.
///
/// Only called for edges whose endpoints lie strictly on opposite sides, so
/// the denominator is at least `2 * PLANE_EPSILON` in magnitude.
fn edge_intersection(plane: &Plane3D, a: Point3<f64>, b: Point3<f64>) -> Point3<f64> {
    let direction = b - a;
    let t = (plane.point() - a).dot(&plane.normal()) / direction.dot(&plane.normal());
    a + direction * t
}

fn into_polygon(vertices: Vec<Point3<f64>>) -> Option<Polygon> {
    (vertices.len() >= 3).then(|| Polygon::new(vertices))
}
