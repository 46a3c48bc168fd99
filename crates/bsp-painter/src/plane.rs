//! Splitting planes and point/polygon classification.

use nalgebra::{Point3, Vector3};

/// Points within this distance of a plane are considered "on" the plane.
pub const PLANE_EPSILON: f64 = 1e-6;

/// Normal used for planes derived from a polygon whose first three vertices
/// are collinear.
pub const FALLBACK_NORMAL: Vector3<f64> = Vector3::new(0.0, 0.0, 1.0);

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// Classification of a polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// No vertex behind the plane and at least one in front
    Front,
    /// No vertex in front of the plane and at least one behind
    Back,
    /// All vertices are on the plane
    Coplanar,
    /// Vertices are on both sides
    Spanning,
}

/// A plane in 3D space, stored as a point on the plane and a unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane3D {
    point: Point3<f64>,
    normal: Vector3<f64>,
}

impl Plane3D {
    /// Creates a plane from a point on the plane and a normal vector.
    ///
    /// The normal is normalized. A zero-length normal is replaced by
    /// [`FALLBACK_NORMAL`].
    pub fn from_point_and_normal(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            point,
            normal: normal.try_normalize(f64::EPSILON).unwrap_or(FALLBACK_NORMAL),
        }
    }

    /// The point the plane was anchored at.
    #[inline]
    pub fn point(&self) -> Point3<f64> {
        self.point
    }

    /// The unit normal of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Signed distance from `point` to the plane, positive on the normal side.
    #[inline]
    pub fn signed_distance(&self, point: Point3<f64>) -> f64 {
        (point - self.point).dot(&self.normal)
    }

    /// Classifies which side of the plane a point lies on, using
    /// [`PLANE_EPSILON`].
    pub fn classify_point(&self, point: Point3<f64>) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > PLANE_EPSILON {
            PlaneSide::Front
        } else if dist < -PLANE_EPSILON {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Classifies a set of vertices against the plane.
    ///
    /// On-plane vertices never change a `Front` or `Back` verdict.
    pub fn classify_vertices(&self, vertices: &[Point3<f64>]) -> Classification {
        let mut front = false;
        let mut back = false;

        for vertex in vertices {
            match self.classify_point(*vertex) {
                PlaneSide::Front => front = true,
                PlaneSide::Back => back = true,
                PlaneSide::OnPlane => {}
            }
        }

        match (front, back) {
            (false, false) => Classification::Coplanar,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (true, true) => Classification::Spanning,
        }
    }
}
