//! Core mesh data structures.
//!
//! This module provides the tetrahedral mesh that hull growth runs on, the
//! input model it is built from, and the surface mesh it produces.
//!
//! # Overview
//!
//! The primary type is [`TetMesh`]: flat arenas of edges, triangles and
//! tetrahedra over a [`PointStore`], with O(1) traversal between adjacent
//! elements. Connectivity is fixed at build time; growth only flips the
//! per-pass flags stored on the elements.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe handles:
//! - [`VertexId`] - Identifies a point
//! - [`EdgeId`] - Identifies an edge
//! - [`TriangleId`] - Identifies a triangle
//! - [`TetraId`] - Identifies a tetrahedron
//!
//! Handles are generic over the underlying integer type ([`MeshIndex`] trait),
//! so `u16`, `u32` or `u64` can be chosen based on cloud size.
//!
//! # Construction
//!
//! The tetrahedralization itself comes from outside (a Delaunay library,
//! for instance):
//!
//! ```
//! use hullgrow::mesh::{TetMesh, Tetrahedralization};
//! use nalgebra::Point3;
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//! ];
//! let tets = Tetrahedralization::from_cells(&[[0, 1, 2, 3]]).unwrap();
//!
//! let mesh: TetMesh = TetMesh::build(points, &tets).unwrap();
//! assert_eq!(mesh.num_triangles(), 4);
//! ```

mod builder;
mod index;
mod points;
mod surface;
mod tetmesh;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::{build_tet_mesh, Cell, Tetrahedralization, Tetrahedralizer};
pub use index::{EdgeId, MeshIndex, TetraId, TriangleId, VertexId};
pub use points::PointStore;
pub use surface::SurfaceMesh;
pub use tetmesh::{Edge, SurfaceFace, TetMesh, Tetrahedron, Triangle};
