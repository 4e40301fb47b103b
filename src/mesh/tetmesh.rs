//! Tetrahedral mesh data structure.
//!
//! The mesh is a set of flat arenas (edges, triangles, tetrahedra) built over
//! a [`PointStore`], cross-linked by typed handles:
//!
//! - each **triangle** knows its three edges and its one or two owning
//!   tetrahedra (one owner means the triangle lies on the hull boundary)
//! - each **tetrahedron** knows its four triangles and, across each of them,
//!   its neighbour. Triangle `i` of a tetrahedron is the face opposite its
//!   vertex `i`, so the apex across a face is found in O(1)
//!
//! Connectivity never changes after the build. Growth only flips the per-pass
//! flags (`seen`, `used`, `is_surface`, `has_had_face`, vertex-on-surface).
//!
//! # Outer Tetrahedra
//!
//! A tetrahedron whose vertices are invalid is an outer sentinel standing in
//! for space outside the convex hull. Outer tetrahedra own no triangles and
//! have no interior.

use std::cmp::Ordering;

use nalgebra::{Point3, Vector3};

use super::index::{EdgeId, MeshIndex, TetraId, TriangleId, VertexId};
use super::points::PointStore;

/// An unordered edge between two points.
#[derive(Debug, Clone, Copy)]
pub struct Edge<I: MeshIndex = u32> {
    /// The two end points, smaller index first.
    pub vertices: [VertexId<I>; 2],

    /// Set once a surface triangle has been attached to this edge in the
    /// current pass.
    pub has_had_face: bool,
}

impl<I: MeshIndex> Edge<I> {
    /// Create an edge with a canonical vertex order.
    pub fn new(v0: VertexId<I>, v1: VertexId<I>) -> Self {
        let vertices = if v0 <= v1 { [v0, v1] } else { [v1, v0] };
        Self {
            vertices,
            has_had_face: false,
        }
    }
}

/// A candidate surface face: growing through `triangle` absorbs `tetrahedron`.
///
/// Candidates are totally ordered by curvature, then by triangle handle, then
/// by tetrahedron handle, so equal curvatures never make the order depend on
/// insertion sequence.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceFace<I: MeshIndex = u32> {
    /// The unconsumed tetrahedron on the far side of the triangle.
    pub tetrahedron: TetraId<I>,
    /// The frontier triangle.
    pub triangle: TriangleId<I>,
    /// Growth priority; lower is absorbed first.
    pub curvature: f64,
}

impl<I: MeshIndex> PartialEq for SurfaceFace<I> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<I: MeshIndex> Eq for SurfaceFace<I> {}

impl<I: MeshIndex> PartialOrd for SurfaceFace<I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I: MeshIndex> Ord for SurfaceFace<I> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.curvature
            .total_cmp(&other.curvature)
            .then_with(|| self.triangle.cmp(&other.triangle))
            .then_with(|| self.tetrahedron.cmp(&other.tetrahedron))
    }
}

/// A triangle shared by one or two tetrahedra.
#[derive(Debug, Clone, Copy)]
pub struct Triangle<I: MeshIndex = u32> {
    /// The three corner points, sorted by index.
    pub vertices: [VertexId<I>; 3],

    /// The three edges.
    pub edges: [EdgeId<I>; 3],

    /// Owning tetrahedra. The second slot is invalid for boundary triangles.
    pub tetrahedra: [TetraId<I>; 2],

    /// Whether the triangle is currently part of the extracted surface.
    pub is_surface: bool,

    /// Whether growth has passed through this triangle in the current pass.
    pub used: bool,

    /// The queued candidate for this triangle, kept so it can be withdrawn
    /// without recomputing its curvature.
    pub(crate) candidate: Option<SurfaceFace<I>>,
}

impl<I: MeshIndex> Triangle<I> {
    pub(crate) fn new(vertices: [VertexId<I>; 3], edges: [EdgeId<I>; 3]) -> Self {
        Self {
            vertices,
            edges,
            tetrahedra: [TetraId::invalid(); 2],
            is_surface: false,
            used: false,
            candidate: None,
        }
    }

    /// Whether only one tetrahedron owns this triangle.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.tetrahedra[1].is_valid()
    }

    /// Number of owning tetrahedra (1 or 2 once built).
    #[inline]
    pub fn num_owners(&self) -> usize {
        self.tetrahedra.iter().filter(|t| t.is_valid()).count()
    }

    /// The owner on the other side from `t`, if any.
    #[inline]
    pub fn other_owner(&self, t: TetraId<I>) -> Option<TetraId<I>> {
        if self.tetrahedra[0] == t {
            self.tetrahedra[1].valid()
        } else if self.tetrahedra[1] == t {
            self.tetrahedra[0].valid()
        } else {
            None
        }
    }

    /// Whether `v` is one of the corners.
    #[inline]
    pub fn has_vertex(&self, v: VertexId<I>) -> bool {
        self.vertices.contains(&v)
    }
}

/// A tetrahedron, or an outer sentinel when its vertices are invalid.
#[derive(Debug, Clone, Copy)]
pub struct Tetrahedron<I: MeshIndex = u32> {
    /// The four corner points.
    pub vertices: [VertexId<I>; 4],

    /// Bounding triangles; triangle `i` is opposite vertex `i`.
    pub triangles: [TriangleId<I>; 4],

    /// Neighbour across each triangle. Invalid when nothing was supplied
    /// across a boundary face.
    pub neighbours: [TetraId<I>; 4],

    /// Stable identifier (the index of the cell in the input).
    pub id: usize,

    /// Whether the tetrahedron has been consumed in the current pass.
    pub seen: bool,
}

impl<I: MeshIndex> Tetrahedron<I> {
    pub(crate) fn finite(id: usize, vertices: [VertexId<I>; 4]) -> Self {
        Self {
            vertices,
            triangles: [TriangleId::invalid(); 4],
            neighbours: [TetraId::invalid(); 4],
            id,
            seen: false,
        }
    }

    pub(crate) fn outer(id: usize) -> Self {
        Self {
            vertices: [VertexId::invalid(); 4],
            triangles: [TriangleId::invalid(); 4],
            neighbours: [TetraId::invalid(); 4],
            id,
            seen: false,
        }
    }

    /// Whether this is an outer sentinel.
    #[inline]
    pub fn is_outer(&self) -> bool {
        self.vertices.iter().any(|v| !v.is_valid())
    }

    /// Local index (0..4) of a bounding triangle.
    #[inline]
    pub fn local_face(&self, tri: TriangleId<I>) -> Option<usize> {
        self.triangles.iter().position(|&t| t == tri)
    }

    /// The three vertices of local face `i`, in the order that keeps the
    /// orientation of a positively oriented tetrahedron outward.
    #[inline]
    pub fn face_vertices(&self, i: usize) -> [VertexId<I>; 3] {
        let [a, b, c, d] = self.vertices;
        match i {
            0 => [b, c, d],
            1 => [a, d, c],
            2 => [a, b, d],
            _ => [a, c, b],
        }
    }
}

/// A tetrahedral mesh over a point store.
#[derive(Debug, Clone)]
pub struct TetMesh<I: MeshIndex = u32> {
    pub(crate) points: PointStore,
    pub(crate) edges: Vec<Edge<I>>,
    pub(crate) triangles: Vec<Triangle<I>>,
    pub(crate) tetrahedra: Vec<Tetrahedron<I>>,
    pub(crate) vertex_on_surface: Vec<bool>,
}

impl<I: MeshIndex> TetMesh<I> {
    /// A mesh with points but no tetrahedra (the degenerate case).
    pub fn empty(points: PointStore) -> Self {
        let n = points.len();
        Self {
            points,
            edges: Vec::new(),
            triangles: Vec::new(),
            tetrahedra: Vec::new(),
            vertex_on_surface: vec![false; n],
        }
    }

    // ==================== Accessors ====================

    /// The underlying point store.
    #[inline]
    pub fn points(&self) -> &PointStore {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Number of tetrahedra, outer sentinels included.
    #[inline]
    pub fn num_tetrahedra(&self) -> usize {
        self.tetrahedra.len()
    }

    /// Number of non-sentinel tetrahedra.
    pub fn num_finite_tetrahedra(&self) -> usize {
        self.tetrahedra.iter().filter(|t| !t.is_outer()).count()
    }

    /// Whether the mesh has no volume to grow through.
    pub fn is_degenerate(&self) -> bool {
        self.num_finite_tetrahedra() == 0
    }

    /// Get an edge.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        &self.edges[id.index()]
    }

    /// Get a triangle.
    #[inline]
    pub fn triangle(&self, id: TriangleId<I>) -> &Triangle<I> {
        &self.triangles[id.index()]
    }

    #[inline]
    pub(crate) fn triangle_mut(&mut self, id: TriangleId<I>) -> &mut Triangle<I> {
        &mut self.triangles[id.index()]
    }

    /// Get a tetrahedron.
    #[inline]
    pub fn tetrahedron(&self, id: TetraId<I>) -> &Tetrahedron<I> {
        &self.tetrahedra[id.index()]
    }

    #[inline]
    pub(crate) fn tetrahedron_mut(&mut self, id: TetraId<I>) -> &mut Tetrahedron<I> {
        &mut self.tetrahedra[id.index()]
    }

    /// Position of a point.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        self.points.position(v)
    }

    /// Whether a point currently lies on the surface.
    #[inline]
    pub fn is_vertex_on_surface(&self, v: VertexId<I>) -> bool {
        self.vertex_on_surface[v.index()]
    }

    // ==================== Iteration ====================

    /// Iterate over all triangle handles.
    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId<I>> + '_ {
        (0..self.triangles.len()).map(TriangleId::new)
    }

    /// Iterate over all tetrahedron handles, outer sentinels included.
    pub fn tetra_ids(&self) -> impl Iterator<Item = TetraId<I>> + '_ {
        (0..self.tetrahedra.len()).map(TetraId::new)
    }

    /// Iterate over non-sentinel tetrahedron handles.
    pub fn finite_tetra_ids(&self) -> impl Iterator<Item = TetraId<I>> + '_ {
        self.tetra_ids().filter(|&t| !self.tetrahedron(t).is_outer())
    }

    /// Iterate over triangles currently on the surface.
    pub fn surface_triangle_ids(&self) -> impl Iterator<Item = TriangleId<I>> + '_ {
        self.triangle_ids().filter(|&t| self.triangle(t).is_surface)
    }

    /// Number of consumed non-sentinel tetrahedra.
    pub fn num_consumed(&self) -> usize {
        self.tetrahedra
            .iter()
            .filter(|t| t.seen && !t.is_outer())
            .count()
    }

    // ==================== Geometry ====================

    /// Corner positions of a non-sentinel tetrahedron.
    pub fn tetra_positions(&self, t: TetraId<I>) -> [Point3<f64>; 4] {
        let tet = self.tetrahedron(t);
        tet.vertices.map(|v| *self.position(v))
    }

    /// Corner positions of a triangle.
    pub fn triangle_positions(&self, tri: TriangleId<I>) -> [Point3<f64>; 3] {
        self.triangle(tri).vertices.map(|v| *self.position(v))
    }

    /// Centroid of a tetrahedron, `None` for outer sentinels.
    pub fn tetra_centroid(&self, t: TetraId<I>) -> Option<Point3<f64>> {
        if self.tetrahedron(t).is_outer() {
            return None;
        }
        let [a, b, c, d] = self.tetra_positions(t);
        Some(Point3::from((a.coords + b.coords + c.coords + d.coords) * 0.25))
    }

    /// Six times the signed volume of a non-sentinel tetrahedron.
    pub fn signed_volume6(&self, t: TetraId<I>) -> f64 {
        let [a, b, c, d] = self.tetra_positions(t);
        (b - a).cross(&(c - a)).dot(&(d - a))
    }

    /// The vertex of `t` that is not on `tri`.
    pub fn apex(&self, t: TetraId<I>, tri: TriangleId<I>) -> Option<VertexId<I>> {
        let tet = self.tetrahedron(t);
        tet.local_face(tri).map(|i| tet.vertices[i])
    }

    /// The tetrahedron on the other side of `tri` from `t`, if it is finite.
    pub fn far_side(&self, tri: TriangleId<I>, t: TetraId<I>) -> Option<TetraId<I>> {
        self.triangle(tri).other_owner(t)
    }

    /// Normal of `tri` pointing away from the tetrahedron `t` (not normalized).
    ///
    /// The length is twice the triangle area.
    pub fn outward_normal(&self, tri: TriangleId<I>, t: TetraId<I>) -> Vector3<f64> {
        let [p0, p1, p2] = self.triangle_positions(tri);
        let mut normal = (p1 - p0).cross(&(p2 - p0));
        if let Some(apex) = self.apex(t, tri) {
            if normal.dot(&(self.position(apex) - p0)) > 0.0 {
                normal = -normal;
            }
        }
        normal
    }

    /// Test whether `pos` lies inside (or on) tetrahedron `t`.
    ///
    /// For each bounding triangle the signed plane distance of `pos` must
    /// agree in sign with that of the tetrahedron's centroid. Outer
    /// sentinels have no interior.
    pub fn point_inside_tetrahedron(&self, pos: &Point3<f64>, t: TetraId<I>) -> bool {
        let Some(mid) = self.tetra_centroid(t) else {
            return false;
        };
        self.tetrahedron(t).triangles.iter().all(|&tri| {
            let [p0, p1, p2] = self.triangle_positions(tri);
            let normal = (p1 - p0).cross(&(p2 - p0));
            (pos - p0).dot(&normal) * (mid - p0).dot(&normal) >= 0.0
        })
    }

    // ==================== Pass State ====================

    /// Clear every per-pass flag and cached candidate.
    pub fn reset_flags(&mut self) {
        for e in &mut self.edges {
            e.has_had_face = false;
        }
        for tri in &mut self.triangles {
            tri.is_surface = false;
            tri.used = false;
            tri.candidate = None;
        }
        for tet in &mut self.tetrahedra {
            tet.seen = false;
        }
        self.vertex_on_surface.iter_mut().for_each(|v| *v = false);
    }

    /// Number of surface triangles incident to each edge.
    ///
    /// On a manifold surface every entry is 0, 1 or 2.
    pub fn surface_edge_valence(&self) -> Vec<usize> {
        let mut valence = vec![0; self.edges.len()];
        for tri in self.triangles.iter().filter(|t| t.is_surface) {
            for e in tri.edges {
                valence[e.index()] += 1;
            }
        }
        valence
    }
}
