//! # Hullgrow
//!
//! Concave hull extraction from 3D point clouds by greedy growth through a
//! tetrahedralization.
//!
//! Given the tetrahedra of a point cloud (from any Delaunay-style builder),
//! hullgrow consumes tetrahedra one at a time, flattest face first, and
//! reports the boundary of the consumed region as a manifold triangle
//! surface. The growth can start from outside the convex hull, from the
//! middle of the cloud, or from one side along a direction, which gives
//! terrain-like undersurfaces and canopy-like oversurfaces.
//!
//! ## Features
//!
//! - **Tetrahedral mesh**: flat arenas with O(1) adjacency and type-safe handles
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//! - **Deterministic growth**: candidates are totally ordered, so results do
//!   not depend on thread count
//! - **Manifold output**: growth never pinches the surface at an edge or vertex
//!
//! ## Quick Start
//!
//! ```
//! use hullgrow::prelude::*;
//! use nalgebra::Point3;
//!
//! // A unit cube split into six tetrahedra around its diagonal
//! let mut points = Vec::new();
//! for z in 0..2 {
//!     for y in 0..2 {
//!         for x in 0..2 {
//!             points.push(Point3::new(x as f64, y as f64, z as f64));
//!         }
//!     }
//! }
//! let cells = [
//!     [0, 1, 3, 7],
//!     [0, 1, 5, 7],
//!     [0, 2, 3, 7],
//!     [0, 2, 6, 7],
//!     [0, 4, 5, 7],
//!     [0, 4, 6, 7],
//! ];
//! let tets = Tetrahedralization::from_cells(&cells).unwrap();
//!
//! let mut hull: ConcaveHull = ConcaveHull::build(points, &tets).unwrap();
//! let summary = hull.grow_outwards(f64::INFINITY).unwrap();
//! assert!(summary.converged);
//!
//! // The whole cube is consumed and its twelve hull triangles remain
//! let surface = hull.surface_mesh();
//! assert_eq!(surface.num_triangles(), 12);
//! assert!(surface.is_edge_manifold());
//! ```
//!
//! ## Plugging In a Tetrahedralizer
//!
//! Anything implementing [`mesh::Tetrahedralizer`] can build the hull
//! straight from points, closures included:
//!
//! ```
//! use hullgrow::prelude::*;
//! use nalgebra::Point3;
//!
//! let builder = |points: &[Point3<f64>]| -> Result<Tetrahedralization> {
//!     assert_eq!(points.len(), 4);
//!     Tetrahedralization::from_cells(&[[0, 1, 2, 3]])
//! };
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//!
//! let mut hull: ConcaveHull = ConcaveHull::from_points(points, &builder).unwrap();
//! hull.grow_inwards(f64::INFINITY).unwrap();
//! assert!(hull.surface_triangles().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types:
///
/// ```
/// use hullgrow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        ConcaveHull, GrowOptions, GrowthMode, GrowthState, GrowthSummary, Progress,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        MeshIndex, PointStore, SurfaceMesh, TetMesh, TetraId, Tetrahedralization, Tetrahedralizer,
        TriangleId, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::mesh::fixtures;

    #[test]
    fn test_inward_and_outward_agree_on_convex_input() {
        // On a convex cloud with no threshold, both passes end on the hull
        let mut hull: ConcaveHull = ConcaveHull::new(fixtures::cube());
        hull.grow_outwards(f64::INFINITY).unwrap();
        let mut outwards = hull.surface_triangles();
        outwards.sort();

        hull.grow_inwards(0.0).unwrap();
        let mut inwards = hull.surface_triangles();
        inwards.sort();

        assert_eq!(outwards, inwards);
    }
}
