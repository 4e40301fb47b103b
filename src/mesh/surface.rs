//! Extracted surface meshes.
//!
//! Growth leaves its result as `is_surface` flags on the tetrahedral mesh.
//! [`SurfaceMesh`] is the portable form: a compact vertex list and triangle
//! index triples, ready for export by an outer layer.

use std::collections::HashMap;

use nalgebra::Point3;

/// A triangle surface with its own compact vertex list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    /// Positions of the referenced points.
    pub vertices: Vec<Point3<f64>>,

    /// Triangles as indices into `vertices`.
    pub triangles: Vec<[usize; 3]>,

    /// For each vertex, its index in the original point store.
    pub point_indices: Vec<usize>,
}

impl SurfaceMesh {
    /// Build from triangles indexing a larger point array, keeping only the
    /// points the triangles reference.
    ///
    /// Vertices are numbered in order of first use.
    pub fn from_indexed(points: &[Point3<f64>], triangles: &[[usize; 3]]) -> Self {
        let mut remap: HashMap<usize, usize> = HashMap::new();
        let mut mesh = Self::default();
        mesh.triangles.reserve(triangles.len());

        for tri in triangles {
            let compact = tri.map(|p| {
                *remap.entry(p).or_insert_with(|| {
                    mesh.vertices.push(points[p]);
                    mesh.point_indices.push(p);
                    mesh.point_indices.len() - 1
                })
            });
            mesh.triangles.push(compact);
        }
        mesh
    }

    /// Whether there are no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Total surface area.
    pub fn area(&self) -> f64 {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (self.vertices[a], self.vertices[b], self.vertices[c]);
                0.5 * (b - a).cross(&(c - a)).norm()
            })
            .sum()
    }

    /// Whether every edge is shared by at most two triangles, and any edge
    /// shared by two is traversed in opposite directions.
    pub fn is_edge_manifold(&self) -> bool {
        let mut directed: HashMap<(usize, usize), usize> = HashMap::new();
        for &[a, b, c] in &self.triangles {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *directed.entry((u, v)).or_insert(0) += 1;
            }
        }
        directed.values().all(|&count| count == 1)
    }

    /// Split into plain vertex and face lists.
    pub fn into_face_vertex(self) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        (self.vertices, self.triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tetrahedron_faces() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        let points = vec![
            Point3::new(9.0, 9.0, 9.0), // unused
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let faces = vec![[1, 3, 2], [1, 2, 4], [2, 3, 4], [3, 1, 4]];
        (points, faces)
    }

    #[test]
    fn test_compaction() {
        let (points, faces) = tetrahedron_faces();
        let mesh = SurfaceMesh::from_indexed(&points, &faces);
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_triangles(), 4);
        assert_eq!(mesh.point_indices, vec![1, 3, 2, 4]);
        assert_eq!(mesh.triangles[0], [0, 1, 2]);
        for (v, &p) in mesh.point_indices.iter().enumerate() {
            assert_eq!(mesh.vertices[v], points[p]);
        }
    }

    #[test]
    fn test_closed_surface_is_manifold() {
        let (points, faces) = tetrahedron_faces();
        let mesh = SurfaceMesh::from_indexed(&points, &faces);
        assert!(mesh.is_edge_manifold());
        assert_relative_eq!(mesh.area(), 1.5 + 3.0_f64.sqrt() / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flipped_face_is_not_manifold() {
        let (points, mut faces) = tetrahedron_faces();
        faces[0] = [1, 2, 3];
        let mesh = SurfaceMesh::from_indexed(&points, &faces);
        assert!(!mesh.is_edge_manifold());
    }

    #[test]
    fn test_empty() {
        let mesh = SurfaceMesh::from_indexed(&[], &[]);
        assert!(mesh.is_empty());
        assert_eq!(mesh.area(), 0.0);
        let (vertices, triangles) = mesh.into_face_vertex();
        assert!(vertices.is_empty() && triangles.is_empty());
    }
}
