//! Circumsphere curvature of candidate faces.
//!
//! Growing through a frontier triangle replaces it by the other three faces of
//! the tetrahedron behind it, so the surface bulges out to that tetrahedron's
//! apex. The bulge is measured with the sphere through the triangle's corners
//! and the apex:
//!
//! - while the sphere's centre lies behind the triangle the bulge is a cap
//!   smaller than a hemisphere, and the curvature is `1/R`
//! - once the centre passes in front of the triangle the cap is larger than a
//!   hemisphere, and the curvature keeps increasing as `2/r - 1/R`, where `r`
//!   is the triangle's circumradius
//!
//! The two branches meet at `1/r` (a hemisphere). Flat slivers score close to
//! zero, tall spikes and folds approach `2/r`. Lower scores are grown first.
//!
//! Geometry that has no circumsphere (zero-area triangle, apex in the
//! triangle's plane) scores [`DEGENERATE_CURVATURE`], so it sorts after every
//! real value and NaN never reaches the candidate set.

use nalgebra::Point3;

use crate::mesh::{MeshIndex, TetMesh, TetraId, TriangleId};

/// Curvature reported for faces without a well-defined circumsphere.
pub const DEGENERATE_CURVATURE: f64 = f64::INFINITY;

/// Relative tolerance for zero areas and heights.
const EPSILON: f64 = 1e-12;

/// Curvature of growing from `triangle` into the tetrahedron `t` behind it.
///
/// Returns [`DEGENERATE_CURVATURE`] for outer tetrahedra or when `triangle`
/// does not bound `t`.
pub fn circumcurvature<I: MeshIndex>(
    mesh: &TetMesh<I>,
    t: TetraId<I>,
    triangle: TriangleId<I>,
) -> f64 {
    if mesh.tetrahedron(t).is_outer() {
        return DEGENERATE_CURVATURE;
    }
    match mesh.apex(t, triangle) {
        Some(apex) => face_curvature(&mesh.triangle_positions(triangle), mesh.position(apex)),
        None => DEGENERATE_CURVATURE,
    }
}

/// Curvature of the bulge from triangle `tri` out to `apex`.
pub fn face_curvature(tri: &[Point3<f64>; 3], apex: &Point3<f64>) -> f64 {
    let [p0, p1, p2] = tri;
    let e1 = p1 - p0;
    let e2 = p2 - p0;
    let n = e1.cross(&e2);
    let n2 = n.norm_squared();

    // Zero-area (or collinear) triangle
    let scale2 = e1.norm_squared() * e2.norm_squared();
    if !(n2 > EPSILON * scale2) {
        return DEGENERATE_CURVATURE;
    }

    // Circumcentre of the triangle in its plane
    let centre =
        p0 + (e2.cross(&n) * e1.norm_squared() + n.cross(&e1) * e2.norm_squared()) / (2.0 * n2);
    let r = (centre - p0).norm();

    // Height of the apex above the plane, measured towards the apex
    let unit = n / n2.sqrt();
    let to_apex = apex - centre;
    let a = to_apex.dot(&unit).abs();
    if !(a > EPSILON.sqrt() * r) {
        return DEGENERATE_CURVATURE;
    }

    // Squared offset of the apex from the circumcentre within the plane
    let d2 = (to_apex.norm_squared() - a * a).max(0.0);

    // Signed offset of the sphere centre along the normal, positive towards
    // the apex
    let h = (d2 + a * a - r * r) / (2.0 * a);
    let radius = (r * r + h * h).sqrt();

    let curvature = if h <= 0.0 {
        1.0 / radius
    } else {
        2.0 / r - 1.0 / radius
    };

    if curvature.is_finite() {
        curvature
    } else {
        DEGENERATE_CURVATURE
    }
}
