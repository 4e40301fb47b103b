//! Tetrahedral mesh construction.
//!
//! The core does not tetrahedralize points itself. An external builder hands
//! over a [`Tetrahedralization`]: one [`Cell`] per tetrahedron, each with four
//! vertex indices and the neighbour across each face (face `i` is opposite
//! vertex `i`). [`build_tet_mesh`] turns that description into the
//! cross-linked arenas of a [`TetMesh`], failing fast when the description is
//! malformed.

use std::collections::HashMap;

use nalgebra::Point3;

use super::index::{EdgeId, MeshIndex, TetraId, TriangleId, VertexId};
use super::points::PointStore;
use super::tetmesh::{Edge, TetMesh, Tetrahedron, Triangle};
use crate::error::{MeshError, Result};

/// Relative tolerance below which a tetrahedralization is treated as flat.
const FLAT_VOLUME_TOLERANCE: f64 = 1e-12;

/// One tetrahedron of an externally built tetrahedralization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// A real tetrahedron.
    Finite {
        /// Indices into the point store.
        vertices: [usize; 4],
        /// Neighbouring cell across the face opposite each vertex.
        neighbours: [Option<usize>; 4],
    },
    /// A sentinel for the space outside the convex hull.
    Outer,
}

/// Vertex tuples and face adjacency as produced by a tetrahedralization
/// library.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tetrahedralization {
    /// Cells in the order they should be identified by.
    pub cells: Vec<Cell>,
}

impl Tetrahedralization {
    /// Wrap a list of cells with explicit adjacency.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Build from vertex tuples only, deriving face adjacency by matching
    /// shared vertex triples.
    ///
    /// Faces that no other tuple shares become boundary faces with no
    /// neighbour.
    ///
    /// # Example
    /// ```
    /// use hullgrow::mesh::Tetrahedralization;
    ///
    /// // Two tetrahedra glued on the face (1, 2, 3).
    /// let tets = Tetrahedralization::from_cells(&[[0, 1, 2, 3], [4, 1, 2, 3]]).unwrap();
    /// assert_eq!(tets.len(), 2);
    /// ```
    pub fn from_cells(cells: &[[usize; 4]]) -> Result<Self> {
        // Triangles are numbered in first-seen order, matching the numbering
        // build_tet_mesh will give them.
        let mut face_map: HashMap<[usize; 3], (usize, usize, usize)> = HashMap::new();
        let mut neighbours = vec![[None; 4]; cells.len()];

        for (ci, cell) in cells.iter().enumerate() {
            for face in 0..4 {
                let key = sorted_face(cell, face);
                match face_map.get(&key) {
                    None => {
                        let triangle = face_map.len();
                        face_map.insert(key, (ci, face, triangle));
                    }
                    Some(&(other, other_face, triangle)) => {
                        if neighbours[other][other_face].is_some() {
                            return Err(MeshError::NonManifoldTriangle {
                                triangle,
                                tetrahedron: ci,
                            });
                        }
                        neighbours[other][other_face] = Some(ci);
                        neighbours[ci][face] = Some(other);
                    }
                }
            }
        }

        let cells = cells
            .iter()
            .zip(neighbours)
            .map(|(&vertices, neighbours)| Cell::Finite {
                vertices,
                neighbours,
            })
            .collect();
        Ok(Self { cells })
    }

    /// Number of cells, outer sentinels included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether there are no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of real tetrahedra.
    pub fn num_finite(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Finite { .. }))
            .count()
    }
}

/// A source of tetrahedralizations, such as a Delaunay library.
///
/// Closures of the right shape implement this trait, which keeps the seam
/// cheap for callers that already own a builder.
pub trait Tetrahedralizer {
    /// Tetrahedralize a point set.
    fn tetrahedralize(&self, points: &[Point3<f64>]) -> Result<Tetrahedralization>;
}

impl<F> Tetrahedralizer for F
where
    F: Fn(&[Point3<f64>]) -> Result<Tetrahedralization>,
{
    fn tetrahedralize(&self, points: &[Point3<f64>]) -> Result<Tetrahedralization> {
        self(points)
    }
}

/// Sorted vertex triple of the face opposite local vertex `face`.
fn sorted_face(cell: &[usize; 4], face: usize) -> [usize; 3] {
    let mut key = [0; 3];
    let mut k = 0;
    for (i, &v) in cell.iter().enumerate() {
        if i != face {
            key[k] = v;
            k += 1;
        }
    }
    key.sort_unstable();
    key
}

/// Build a tetrahedral mesh from points and an external tetrahedralization.
///
/// Fewer than four points, no finite cells, or a tetrahedralization with no
/// volume all give an empty mesh. Malformed input is an error naming the
/// offending tetrahedron or triangle.
pub fn build_tet_mesh<I: MeshIndex>(
    points: PointStore,
    tets: &Tetrahedralization,
) -> Result<TetMesh<I>> {
    if points.len() < 4 || tets.num_finite() == 0 {
        log::debug!(
            "no tetrahedra to build from {} points and {} cells",
            points.len(),
            tets.len()
        );
        return Ok(TetMesh::empty(points));
    }

    validate(&points, tets)?;

    if is_flat(&points, tets) {
        log::warn!(
            "tetrahedralization of {} points has no volume, treating as degenerate",
            points.len()
        );
        return Ok(TetMesh::empty(points));
    }

    let mut mesh = TetMesh::empty(points);
    mesh.tetrahedra.reserve(tets.len());

    for (ci, cell) in tets.cells.iter().enumerate() {
        let tet = match cell {
            Cell::Finite { vertices, .. } => {
                Tetrahedron::finite(ci, vertices.map(VertexId::new))
            }
            Cell::Outer => Tetrahedron::outer(ci),
        };
        mesh.tetrahedra.push(tet);
    }

    let mut edge_map: HashMap<(usize, usize), EdgeId<I>> = HashMap::new();
    let mut triangle_map: HashMap<[usize; 3], TriangleId<I>> = HashMap::new();

    // First pass: create triangles and edges, link triangles to owners
    for (ci, cell) in tets.cells.iter().enumerate() {
        let Cell::Finite { vertices, .. } = cell else {
            continue;
        };
        let t = TetraId::<I>::new(ci);

        for face in 0..4 {
            let key = sorted_face(vertices, face);
            let tri = match triangle_map.get(&key) {
                Some(&tri) => tri,
                None => {
                    let edges = [
                        edge_for(&mut mesh, &mut edge_map, key[0], key[1]),
                        edge_for(&mut mesh, &mut edge_map, key[1], key[2]),
                        edge_for(&mut mesh, &mut edge_map, key[0], key[2]),
                    ];
                    let tri = TriangleId::new(mesh.triangles.len());
                    mesh.triangles
                        .push(Triangle::new(key.map(VertexId::new), edges));
                    triangle_map.insert(key, tri);
                    tri
                }
            };

            let owners = &mut mesh.triangle_mut(tri).tetrahedra;
            if !owners[0].is_valid() {
                owners[0] = t;
            } else if !owners[1].is_valid() {
                owners[1] = t;
            } else {
                return Err(MeshError::NonManifoldTriangle {
                    triangle: tri.index(),
                    tetrahedron: ci,
                });
            }
            mesh.tetrahedron_mut(t).triangles[face] = tri;
        }
    }

    // Second pass: neighbours follow shared triangles; supplied adjacency
    // must agree with them
    for (ci, cell) in tets.cells.iter().enumerate() {
        let Cell::Finite { neighbours, .. } = cell else {
            continue;
        };
        let t = TetraId::<I>::new(ci);

        for face in 0..4 {
            let tri = mesh.tetrahedron(t).triangles[face];
            let shared = mesh.far_side(tri, t);
            let neighbour = match (shared, neighbours[face]) {
                (Some(o), Some(s)) if o.index() == s => o,
                (None, None) => TetraId::invalid(),
                (None, Some(s)) if tets.cells[s] == Cell::Outer => TetraId::new(s),
                (_, claimed) => {
                    return Err(MeshError::InconsistentNeighbour {
                        tetrahedron: ci,
                        face,
                        neighbour: claimed,
                    });
                }
            };
            mesh.tetrahedron_mut(t).neighbours[face] = neighbour;
        }
    }

    log::debug!(
        "built tetrahedral mesh: {} points, {} edges, {} triangles, {} tetrahedra ({} finite)",
        mesh.num_points(),
        mesh.num_edges(),
        mesh.num_triangles(),
        mesh.num_tetrahedra(),
        mesh.num_finite_tetrahedra()
    );

    Ok(mesh)
}

fn edge_for<I: MeshIndex>(
    mesh: &mut TetMesh<I>,
    edge_map: &mut HashMap<(usize, usize), EdgeId<I>>,
    v0: usize,
    v1: usize,
) -> EdgeId<I> {
    *edge_map.entry((v0, v1)).or_insert_with(|| {
        let id = EdgeId::new(mesh.edges.len());
        mesh.edges
            .push(Edge::new(VertexId::new(v0), VertexId::new(v1)));
        id
    })
}

/// Check vertex and neighbour indices before anything is linked.
fn validate(points: &PointStore, tets: &Tetrahedralization) -> Result<()> {
    for (ci, cell) in tets.cells.iter().enumerate() {
        let Cell::Finite {
            vertices,
            neighbours,
        } = cell
        else {
            continue;
        };

        for &v in vertices {
            if v >= points.len() {
                return Err(MeshError::InvalidVertexIndex {
                    tetrahedron: ci,
                    vertex: v,
                });
            }
        }
        for i in 0..4 {
            for j in (i + 1)..4 {
                if vertices[i] == vertices[j] {
                    return Err(MeshError::DegenerateTetrahedron { tetrahedron: ci });
                }
            }
        }
        for (face, n) in neighbours.iter().enumerate() {
            if let Some(n) = *n {
                if n >= tets.len() {
                    return Err(MeshError::NeighbourOutOfRange {
                        tetrahedron: ci,
                        face,
                        neighbour: n,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Whether every finite cell is flat relative to the cloud's extent.
fn is_flat(points: &PointStore, tets: &Tetrahedralization) -> bool {
    let extent = points.extent();
    let tolerance = FLAT_VOLUME_TOLERANCE * extent * extent * extent;
    let p = points.as_slice();

    tets.cells.iter().all(|cell| match cell {
        Cell::Finite { vertices: [a, b, c, d], .. } => {
            let volume6 = (p[*b] - p[*a]).cross(&(p[*c] - p[*a])).dot(&(p[*d] - p[*a]));
            volume6.abs() <= tolerance
        }
        Cell::Outer => true,
    })
}

impl<I: MeshIndex> TetMesh<I> {
    /// Build a mesh from points and a tetrahedralization.
    ///
    /// See [`build_tet_mesh`].
    pub fn build(points: impl Into<PointStore>, tets: &Tetrahedralization) -> Result<Self> {
        build_tet_mesh(points.into(), tets)
    }
}
