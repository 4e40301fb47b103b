//! Error types for hullgrow.
//!
//! Errors are reserved for malformed input handed to the core by the external
//! tetrahedralization builder and for invalid growth parameters. Degenerate
//! point sets are not errors: they produce an empty surface.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building a tetrahedral mesh or growing a hull.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A tetrahedron references a vertex outside the point store.
    #[error("tetrahedron {tetrahedron} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The tetrahedron index.
        tetrahedron: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A tetrahedron repeats one of its vertex indices.
    #[error("tetrahedron {tetrahedron} is degenerate (has duplicate vertices)")]
    DegenerateTetrahedron {
        /// The tetrahedron index.
        tetrahedron: usize,
    },

    /// A face neighbour index points outside the tetrahedralization.
    #[error("tetrahedron {tetrahedron} face {face} references neighbour {neighbour} which is out of range")]
    NeighbourOutOfRange {
        /// The tetrahedron index.
        tetrahedron: usize,
        /// The local face index (0..4).
        face: usize,
        /// The out-of-range neighbour index.
        neighbour: usize,
    },

    /// A triangle is claimed by more than two tetrahedra.
    #[error("triangle {triangle} would gain a third owner (tetrahedron {tetrahedron})")]
    NonManifoldTriangle {
        /// The triangle index.
        triangle: usize,
        /// The tetrahedron trying to claim the triangle.
        tetrahedron: usize,
    },

    /// The supplied face adjacency disagrees with the shared vertex triples.
    #[error("tetrahedron {tetrahedron} face {face} claims neighbour {neighbour:?} but does not share that face with it")]
    InconsistentNeighbour {
        /// The tetrahedron index.
        tetrahedron: usize,
        /// The local face index (0..4).
        face: usize,
        /// The claimed neighbour, if any.
        neighbour: Option<usize>,
    },

    /// The external tetrahedralization builder failed.
    #[error("tetrahedralization failed: {0}")]
    Tetrahedralization(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_offender() {
        let err = MeshError::NeighbourOutOfRange {
            tetrahedron: 3,
            face: 1,
            neighbour: 99,
        };
        let msg = err.to_string();
        assert!(msg.contains("tetrahedron 3"));
        assert!(msg.contains("99"));

        let err = MeshError::NonManifoldTriangle {
            triangle: 7,
            tetrahedron: 2,
        };
        assert!(err.to_string().contains("triangle 7"));
    }

    #[test]
    fn test_invalid_param() {
        let err = MeshError::invalid_param("max_curvature", -1.0, "must be non-negative");
        assert_eq!(
            err.to_string(),
            "invalid parameter: max_curvature = -1 (must be non-negative)"
        );
    }
}
