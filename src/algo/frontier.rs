//! Greedy frontier growth through a tetrahedral mesh.
//!
//! The frontier is the set of triangles separating consumed space from
//! unconsumed space. Every frontier triangle whose far side may still be
//! grown into is queued as a [`SurfaceFace`], ordered by curvature. Each step
//! pops the flattest candidate and absorbs the tetrahedron behind it, which
//! replaces the crossed triangle by the tetrahedron's other faces.
//!
//! # Manifold Guard
//!
//! Absorbing a tetrahedron whose apex touches the surface only along an edge,
//! or only at a vertex, would pinch the surface. Before absorbing, each edge
//! from the apex to the crossed triangle must either be new to the surface or
//! already be bordered by consumed space inside the tetrahedron. A candidate
//! failing this check is discarded; the tetrahedron stays unconsumed and may
//! still be reached later through another face.
//!
//! # Example
//!
//! ```
//! use hullgrow::algo::{Frontier, GrowthMode, GrowthState};
//! use hullgrow::mesh::{TetMesh, TetraId, Tetrahedralization};
//! use nalgebra::Point3;
//!
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(1.0, 1.0, 1.0),
//! ];
//! let tets = Tetrahedralization::from_cells(&[[0, 1, 2, 3], [4, 1, 2, 3]]).unwrap();
//! let mut mesh: TetMesh = TetMesh::build(points, &tets).unwrap();
//!
//! let mut frontier = Frontier::new(GrowthMode::Outwards);
//! frontier.seed_tetrahedra(&mut mesh, &[TetraId::new(0)]);
//! let summary = frontier.grow_surface(&mut mesh, f64::INFINITY);
//!
//! assert_eq!(frontier.state(), GrowthState::Converged);
//! assert_eq!(summary.absorbed, 1);
//! assert_eq!(mesh.surface_triangle_ids().count(), 6);
//! ```

use std::collections::BTreeSet;

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::mesh::{EdgeId, MeshIndex, SurfaceFace, TetMesh, TetraId, TriangleId, VertexId};

use super::curvature::circumcurvature;
use super::Progress;

/// Margin a face normal must clear along the growth direction, relative to
/// the normal's length, for the face to count as surface.
const DIRECTION_TOLERANCE: f64 = 1e-9;

/// Where growth starts and which faces count as surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthMode {
    /// Start from the space outside the convex hull and grow inwards. The
    /// unconsumed region is the solid.
    Inwards,

    /// Start from an interior tetrahedron and grow outwards. The consumed
    /// region is the solid.
    Outwards,

    /// Start from the tetrahedron furthest against the direction and grow
    /// through every open face. Only frontier faces looking along the
    /// direction are surface, which leaves the far side of the consumed
    /// region as a height-like sheet.
    Directional(Vector3<f64>),
}

impl GrowthMode {
    /// Whether the space outside the convex hull counts as consumed.
    #[inline]
    pub fn exterior_is_consumed(&self) -> bool {
        matches!(self, GrowthMode::Inwards)
    }
}

/// Lifecycle of a growth pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrowthState {
    /// Nothing seeded yet.
    #[default]
    Idle,
    /// Seeds placed, no candidate processed yet.
    Seeded,
    /// At least one candidate processed.
    Growing,
    /// No candidate under the threshold remains. Only reseeding leaves this
    /// state.
    Converged,
}

/// Counters describing a growth pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthSummary {
    /// Tetrahedra consumed directly by seeding.
    pub seeds: usize,
    /// Tetrahedra absorbed through a frontier face.
    pub absorbed: usize,
    /// Candidates dropped by the manifold guard.
    pub discarded: usize,
    /// Candidates still queued.
    pub remaining: usize,
    /// Candidates processed.
    pub iterations: usize,
    /// Whether the pass reached [`GrowthState::Converged`].
    pub converged: bool,
}

/// Options for a growth pass.
#[derive(Debug, Clone)]
pub struct GrowOptions {
    /// Candidates with a higher curvature are never absorbed.
    pub max_curvature: f64,

    /// Stop after this many processed candidates.
    pub max_iterations: Option<usize>,

    /// Whether to run read-only seeding queries in parallel (default: true).
    pub parallel: bool,
}

impl Default for GrowOptions {
    fn default() -> Self {
        Self {
            max_curvature: f64::INFINITY,
            max_iterations: None,
            parallel: true,
        }
    }
}

impl GrowOptions {
    /// Set the curvature threshold.
    pub fn with_max_curvature(mut self, max_curvature: f64) -> Self {
        self.max_curvature = max_curvature;
        self
    }

    /// Bound the number of processed candidates.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check that the options describe a runnable pass.
    pub fn validate(&self) -> Result<()> {
        if self.max_curvature.is_nan() || self.max_curvature < 0.0 {
            return Err(MeshError::invalid_param(
                "max_curvature",
                self.max_curvature,
                "must be a non-negative number",
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(MeshError::invalid_param(
                "max_iterations",
                0,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Which side of a frontier triangle lies beyond the tetrahedron being
/// absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FarSide<I: MeshIndex> {
    Consumed,
    Open(TetraId<I>),
    Exterior,
}

/// The ordered candidate set of a growth pass and its state.
///
/// The frontier does not own the mesh; every operation takes it explicitly
/// so that flag mutation stays in one place.
#[derive(Debug, Clone)]
pub struct Frontier<I: MeshIndex = u32> {
    mode: GrowthMode,
    candidates: BTreeSet<SurfaceFace<I>>,
    state: GrowthState,
    summary: GrowthSummary,
}

impl<I: MeshIndex> Frontier<I> {
    /// Create an idle frontier.
    pub fn new(mode: GrowthMode) -> Self {
        Self {
            mode,
            candidates: BTreeSet::new(),
            state: GrowthState::Idle,
            summary: GrowthSummary::default(),
        }
    }

    /// The growth mode.
    #[inline]
    pub fn mode(&self) -> GrowthMode {
        self.mode
    }

    /// Current pass state.
    #[inline]
    pub fn state(&self) -> GrowthState {
        self.state
    }

    /// Counters for the current pass.
    pub fn summary(&self) -> GrowthSummary {
        GrowthSummary {
            remaining: self.candidates.len(),
            converged: self.state == GrowthState::Converged,
            ..self.summary
        }
    }

    /// Number of queued candidates.
    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether no candidate is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The candidate the next step would process.
    #[inline]
    pub fn peek(&self) -> Option<&SurfaceFace<I>> {
        self.candidates.first()
    }

    /// Queued candidates in growth order.
    pub fn candidates(&self) -> impl Iterator<Item = &SurfaceFace<I>> + '_ {
        self.candidates.iter()
    }

    /// Clear the candidate set and every per-pass flag on the mesh.
    pub fn reset(&mut self, mesh: &mut TetMesh<I>) {
        mesh.reset_flags();
        self.candidates.clear();
        self.state = GrowthState::Idle;
        self.summary = GrowthSummary::default();
    }

    // ==================== Seeding ====================

    /// Start a pass from the space outside the convex hull.
    ///
    /// Outer sentinels are marked consumed and every hull triangle becomes a
    /// surface triangle and a candidate into its single owner.
    pub fn seed_exterior(&mut self, mesh: &mut TetMesh<I>, parallel: bool) {
        self.reset(mesh);

        for t in mesh.tetra_ids().collect::<Vec<_>>() {
            if mesh.tetrahedron(t).is_outer() {
                mesh.tetrahedron_mut(t).seen = true;
            }
        }

        let boundary: Vec<TriangleId<I>> = mesh
            .triangle_ids()
            .filter(|&tri| mesh.triangle(tri).is_boundary())
            .collect();

        let shared: &TetMesh<I> = mesh;
        let faces: Vec<SurfaceFace<I>> = if parallel {
            boundary
                .par_iter()
                .map(|&tri| exterior_candidate(shared, tri))
                .collect()
        } else {
            boundary
                .iter()
                .map(|&tri| exterior_candidate(shared, tri))
                .collect()
        };

        for face in faces {
            expose(mesh, face.triangle);
            mesh.triangle_mut(face.triangle).is_surface = true;
            self.enqueue(mesh, face);
        }

        self.state = GrowthState::Seeded;
        log::debug!(
            "seeded {:?} growth from {} hull triangles",
            self.mode,
            self.candidates.len()
        );
    }

    /// Start a pass by consuming the given tetrahedra.
    ///
    /// Outer sentinels and repeated seeds are ignored.
    pub fn seed_tetrahedra(&mut self, mesh: &mut TetMesh<I>, seeds: &[TetraId<I>]) {
        self.reset(mesh);

        for &t in seeds {
            let tet = mesh.tetrahedron(t);
            if tet.is_outer() || tet.seen {
                continue;
            }
            self.absorb(mesh, t, None);
            self.summary.seeds += 1;
        }

        self.state = GrowthState::Seeded;
        log::debug!(
            "seeded {:?} growth from {} tetrahedra, {} candidates",
            self.mode,
            self.summary.seeds,
            self.candidates.len()
        );
    }

    // ==================== Growth ====================

    /// Process the lowest-curvature candidate.
    ///
    /// Returns false, leaving the candidate queued, when no candidate is at
    /// or under `max_curvature`; the pass is then converged and later calls
    /// are no-ops until the frontier is reseeded. Returns true when a
    /// candidate was processed, whether it was absorbed or discarded.
    pub fn grow_front(&mut self, mesh: &mut TetMesh<I>, max_curvature: f64) -> bool {
        if !matches!(self.state, GrowthState::Seeded | GrowthState::Growing) {
            return false;
        }

        let face = match self.candidates.first() {
            Some(&face) if face.curvature <= max_curvature => face,
            _ => {
                self.state = GrowthState::Converged;
                return false;
            }
        };
        self.candidates.pop_first();
        mesh.triangle_mut(face.triangle).candidate = None;
        self.state = GrowthState::Growing;
        self.summary.iterations += 1;

        if mesh.tetrahedron(face.tetrahedron).seen {
            return true;
        }

        if !self.can_absorb(mesh, face.tetrahedron, face.triangle) {
            log::trace!(
                "discarded {:?} through {:?} (curvature {})",
                face.tetrahedron,
                face.triangle,
                face.curvature
            );
            self.summary.discarded += 1;
            return true;
        }

        log::trace!(
            "absorbing {:?} through {:?} (curvature {})",
            face.tetrahedron,
            face.triangle,
            face.curvature
        );
        self.absorb(mesh, face.tetrahedron, Some(face.triangle));
        self.summary.absorbed += 1;
        true
    }

    /// Grow until no candidate is at or under `max_curvature`.
    pub fn grow_surface(&mut self, mesh: &mut TetMesh<I>, max_curvature: f64) -> GrowthSummary {
        while self.grow_front(mesh, max_curvature) {}
        self.summary()
    }

    /// Grow with options, reporting progress as consumed / finite tetrahedra.
    ///
    /// A pass cut short by `max_iterations` is left in the
    /// [`GrowthState::Growing`] state and can be continued.
    pub fn grow_surface_with_progress(
        &mut self,
        mesh: &mut TetMesh<I>,
        options: &GrowOptions,
        progress: &Progress,
    ) -> GrowthSummary {
        let total = mesh.num_finite_tetrahedra();
        let mut steps = 0;

        while self.grow_front(mesh, options.max_curvature) {
            steps += 1;
            progress.tick(
                steps,
                self.summary.seeds + self.summary.absorbed,
                total,
                "Growing surface",
            );
            if options.max_iterations.is_some_and(|limit| steps >= limit) {
                if !self.candidates.is_empty() {
                    log::warn!(
                        "growth stopped after {} iterations with {} candidates left",
                        steps,
                        self.candidates.len()
                    );
                }
                break;
            }
        }

        progress.report(
            self.summary.seeds + self.summary.absorbed,
            total,
            "Growth finished",
        );
        self.summary()
    }

    // ==================== Internals ====================

    fn far_side(&self, mesh: &TetMesh<I>, tri: TriangleId<I>, t: TetraId<I>) -> FarSide<I> {
        match mesh.far_side(tri, t) {
            Some(far) if mesh.tetrahedron(far).seen => FarSide::Consumed,
            Some(far) => FarSide::Open(far),
            None if self.mode.exterior_is_consumed() => FarSide::Consumed,
            None => FarSide::Exterior,
        }
    }

    /// Whether the frontier triangle `tri`, seen from the consumed
    /// tetrahedron `from`, belongs to the surface.
    fn is_surface_face(&self, mesh: &TetMesh<I>, tri: TriangleId<I>, from: TetraId<I>) -> bool {
        match self.mode {
            GrowthMode::Directional(dir) => {
                let normal = mesh.outward_normal(tri, from);
                normal.dot(&dir) > DIRECTION_TOLERANCE * normal.norm() * dir.norm()
            }
            _ => true,
        }
    }

    /// Manifold guard for absorbing `t` through `entry`.
    fn can_absorb(&self, mesh: &TetMesh<I>, t: TetraId<I>, entry: TriangleId<I>) -> bool {
        let tet = mesh.tetrahedron(t);
        let Some(local) = tet.local_face(entry) else {
            return false;
        };
        let apex = tet.vertices[local];

        // Consumed state beyond the face opposite each vertex
        let mut consumed = [false; 4];
        for i in (0..4).filter(|&i| i != local) {
            consumed[i] = self.far_side(mesh, tet.triangles[i], t) == FarSide::Consumed;
        }

        let mut touching = false;
        for w in (0..4).filter(|&w| w != local) {
            // The two faces through edge (apex, w) are the ones opposite the
            // other two corners of the entry triangle
            let count = (0..4)
                .filter(|&i| i != local && i != w && consumed[i])
                .count();
            if count > 0 {
                touching = true;
                continue;
            }

            let opposite = (0..4).find(|&i| i != local && i != w).unwrap_or(local);
            let edge = find_edge(mesh, tet.triangles[opposite], apex, tet.vertices[w]);
            if edge.is_some_and(|e| mesh.edge(e).has_had_face) {
                return false;
            }
        }

        touching || !mesh.is_vertex_on_surface(apex)
    }

    /// Consume `t`, entered through `entry` (or directly as a seed).
    fn absorb(&mut self, mesh: &mut TetMesh<I>, t: TetraId<I>, entry: Option<TriangleId<I>>) {
        mesh.tetrahedron_mut(t).seen = true;
        if let Some(entry) = entry {
            self.withdraw(mesh, entry);
            let tri = mesh.triangle_mut(entry);
            tri.used = true;
            tri.is_surface = false;
        }

        let triangles = mesh.tetrahedron(t).triangles;
        for tri in triangles {
            if Some(tri) == entry {
                continue;
            }
            match self.far_side(mesh, tri, t) {
                FarSide::Consumed => {
                    self.withdraw(mesh, tri);
                    mesh.triangle_mut(tri).is_surface = false;
                }
                FarSide::Open(far) => {
                    expose(mesh, tri);
                    mesh.triangle_mut(tri).is_surface = self.is_surface_face(mesh, tri, t);
                    if !mesh.triangle(tri).used {
                        let curvature = circumcurvature(mesh, far, tri);
                        self.enqueue(
                            mesh,
                            SurfaceFace {
                                tetrahedron: far,
                                triangle: tri,
                                curvature,
                            },
                        );
                    }
                }
                FarSide::Exterior => {
                    expose(mesh, tri);
                    mesh.triangle_mut(tri).is_surface = self.is_surface_face(mesh, tri, t);
                }
            }
        }
    }

    fn enqueue(&mut self, mesh: &mut TetMesh<I>, face: SurfaceFace<I>) {
        self.withdraw(mesh, face.triangle);
        if self.candidates.insert(face) {
            mesh.triangle_mut(face.triangle).candidate = Some(face);
        }
    }

    fn withdraw(&mut self, mesh: &mut TetMesh<I>, tri: TriangleId<I>) {
        if let Some(face) = mesh.triangle_mut(tri).candidate.take() {
            self.candidates.remove(&face);
        }
    }
}

/// Record that `tri` now borders the surface.
fn expose<I: MeshIndex>(mesh: &mut TetMesh<I>, tri: TriangleId<I>) {
    let triangle = *mesh.triangle(tri);
    for e in triangle.edges {
        mesh.edges[e.index()].has_had_face = true;
    }
    for v in triangle.vertices {
        mesh.vertex_on_surface[v.index()] = true;
    }
}

/// Candidate from the exterior into the single owner of a hull triangle.
fn exterior_candidate<I: MeshIndex>(mesh: &TetMesh<I>, tri: TriangleId<I>) -> SurfaceFace<I> {
    let owner = mesh.triangle(tri).tetrahedra[0];
    SurfaceFace {
        tetrahedron: owner,
        triangle: tri,
        curvature: circumcurvature(mesh, owner, tri),
    }
}

/// The edge of `tri` joining `a` and `b`.
fn find_edge<I: MeshIndex>(
    mesh: &TetMesh<I>,
    tri: TriangleId<I>,
    a: VertexId<I>,
    b: VertexId<I>,
) -> Option<EdgeId<I>> {
    let key = if a <= b { [a, b] } else { [b, a] };
    mesh.triangle(tri)
        .edges
        .into_iter()
        .find(|&e| mesh.edge(e).vertices == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures;

    fn used_count<I: MeshIndex>(mesh: &TetMesh<I>) -> usize {
        mesh.triangle_ids()
            .filter(|&t| mesh.triangle(t).used)
            .count()
    }

    #[test]
    fn test_options_validation() {
        assert!(GrowOptions::default().validate().is_ok());
        assert!(GrowOptions::default().with_max_curvature(0.0).validate().is_ok());
        assert!(matches!(
            GrowOptions::default().with_max_curvature(-1.0).validate(),
            Err(MeshError::InvalidParameter { name: "max_curvature", .. })
        ));
        assert!(GrowOptions::default()
            .with_max_curvature(f64::NAN)
            .validate()
            .is_err());
        assert!(matches!(
            GrowOptions::default().with_max_iterations(0).validate(),
            Err(MeshError::InvalidParameter { name: "max_iterations", .. })
        ));
        assert!(!GrowOptions::default().sequential().parallel);
    }

    #[test]
    fn test_idle_frontier_does_nothing() {
        let mut mesh = fixtures::cube();
        let mut frontier = Frontier::new(GrowthMode::Outwards);
        assert!(!frontier.grow_front(&mut mesh, f64::INFINITY));
        assert_eq!(frontier.state(), GrowthState::Idle);
    }

    #[test]
    fn test_seed_exposes_faces() {
        let mut mesh = fixtures::cube();
        let mut frontier = Frontier::new(GrowthMode::Outwards);
        frontier.seed_tetrahedra(&mut mesh, &[TetraId::new(0)]);

        assert_eq!(frontier.state(), GrowthState::Seeded);
        assert_eq!(frontier.summary().seeds, 1);
        // Two interior faces to grow through, two hull faces on the surface
        assert_eq!(frontier.len(), 2);
        assert_eq!(mesh.surface_triangle_ids().count(), 4);
        for face in frontier.candidates() {
            assert!(!mesh.tetrahedron(face.tetrahedron).seen);
            assert_eq!(mesh.triangle(face.triangle).candidate, Some(*face));
        }
    }

    #[test]
    fn test_monotonic_consumption() {
        let mut mesh = fixtures::lattice(3, 3, 2);
        let mut frontier = Frontier::new(GrowthMode::Outwards);
        frontier.seed_tetrahedra(&mut mesh, &[TetraId::new(0)]);

        let mut consumed = mesh.num_consumed();
        while frontier.peek().is_some() {
            assert!(frontier.grow_front(&mut mesh, f64::INFINITY));
            let now = mesh.num_consumed();
            assert!(now == consumed || now == consumed + 1);
            consumed = now;

            // Every consumed tetrahedron was a seed or crossed into once
            assert_eq!(now, used_count(&mesh) + frontier.summary().seeds);
        }
        assert!(!frontier.grow_front(&mut mesh, f64::INFINITY));
        assert_eq!(frontier.state(), GrowthState::Converged);

        let summary = frontier.summary();
        assert!(summary.converged);
        assert_eq!(summary.remaining, 0);
        assert_eq!(summary.iterations, summary.absorbed + summary.discarded);
        assert_eq!(mesh.num_consumed(), summary.seeds + summary.absorbed);
    }

    #[test]
    fn test_candidates_separate_consumed_from_open() {
        let mut mesh = fixtures::lattice(2, 2, 2);
        let mut frontier = Frontier::new(GrowthMode::Outwards);
        frontier.seed_tetrahedra(&mut mesh, &[TetraId::new(20)]);
        for _ in 0..15 {
            frontier.grow_front(&mut mesh, f64::INFINITY);
            for face in frontier.candidates() {
                let tri = mesh.triangle(face.triangle);
                assert!(!tri.used);
                assert!(!mesh.tetrahedron(face.tetrahedron).seen);
                let near = tri.other_owner(face.tetrahedron).unwrap();
                assert!(mesh.tetrahedron(near).seen);
            }
        }
    }

    #[test]
    fn test_edge_valence_stays_manifold() {
        for max_curvature in [0.5, 1.0, 1.5, f64::INFINITY] {
            let mut mesh = fixtures::lattice(3, 2, 2);
            let mut frontier = Frontier::new(GrowthMode::Outwards);
            frontier.seed_tetrahedra(&mut mesh, &[TetraId::new(30)]);
            while frontier.grow_front(&mut mesh, max_curvature) {
                assert!(mesh.surface_edge_valence().iter().all(|&v| v <= 2));
            }
        }
    }

    #[test]
    fn test_threshold_stops_growth_and_keeps_candidate() {
        let mut mesh = fixtures::cube();
        let mut frontier = Frontier::new(GrowthMode::Outwards);
        frontier.seed_tetrahedra(&mut mesh, &[TetraId::new(0)]);

        let summary = frontier.grow_surface(&mut mesh, 0.0);
        assert!(summary.converged);
        assert_eq!(summary.iterations, 0);
        assert_eq!(summary.remaining, 2);

        // Converged passes do not resume without reseeding
        assert!(!frontier.grow_front(&mut mesh, f64::INFINITY));
        assert_eq!(mesh.num_consumed(), 1);
    }

    #[test]
    fn test_exterior_seed() {
        let mut mesh = fixtures::single_tetrahedron_with_outer();
        let mut frontier = Frontier::new(GrowthMode::Inwards);
        frontier.seed_exterior(&mut mesh, true);

        assert_eq!(frontier.len(), 4);
        assert_eq!(mesh.surface_triangle_ids().count(), 4);
        assert!(mesh.tetrahedron(TetraId::new(1)).seen);
        assert_eq!(mesh.num_consumed(), 0);

        // Crossing any hull face consumes the whole tetrahedron
        let summary = frontier.grow_surface(&mut mesh, f64::INFINITY);
        assert_eq!(summary.absorbed, 1);
        assert_eq!(summary.remaining, 0);
        assert_eq!(mesh.surface_triangle_ids().count(), 0);
        assert_eq!(used_count(&mesh), 1);
    }

    #[test]
    fn test_parallel_seeding_matches_sequential() {
        let mut a = fixtures::lattice(3, 3, 2);
        let mut b = a.clone();
        let mut fa = Frontier::new(GrowthMode::Inwards);
        let mut fb = Frontier::new(GrowthMode::Inwards);
        fa.seed_exterior(&mut a, true);
        fb.seed_exterior(&mut b, false);
        assert!(fa.candidates().eq(fb.candidates()));
    }

    #[test]
    fn test_directional_spreads_sideways() {
        let up = Vector3::new(0.0, 0.0, 1.0);
        let mut mesh = fixtures::cube();
        let mut frontier = Frontier::new(GrowthMode::Directional(up));
        frontier.seed_tetrahedra(&mut mesh, &[TetraId::new(0)]);

        // Every open face is a candidate, not only the ones looking up
        assert_eq!(frontier.len(), 2);
        let summary = frontier.grow_surface(&mut mesh, f64::INFINITY);
        assert!(summary.converged);
        assert_eq!(mesh.num_consumed(), 6);

        // Only the top of the cube remains
        let surface: Vec<_> = mesh.surface_triangle_ids().collect();
        assert_eq!(surface.len(), 2);
        for tri in surface {
            let t = mesh.triangle(tri);
            assert!(t.is_boundary());
            let normal = mesh.outward_normal(tri, t.tetrahedra[0]);
            assert!(normal.z > 0.0);
            assert_eq!(normal.x, 0.0);
            assert_eq!(normal.y, 0.0);
        }
    }

    #[test]
    fn test_directional_surface_faces_along() {
        let up = Vector3::new(0.0, 0.0, 1.0);
        let mut mesh = fixtures::lattice(2, 2, 2);
        let mut frontier = Frontier::new(GrowthMode::Directional(up));
        frontier.seed_tetrahedra(&mut mesh, &[TetraId::new(0)]);
        for _ in 0..12 {
            frontier.grow_front(&mut mesh, f64::INFINITY);
            for tri in mesh.surface_triangle_ids() {
                let t = mesh.triangle(tri);
                let near = t
                    .tetrahedra
                    .into_iter()
                    .find(|&o| o.is_valid() && mesh.tetrahedron(o).seen)
                    .unwrap();
                let normal = mesh.outward_normal(tri, near);
                assert!(normal.dot(&up) > 0.0);
            }
        }
        assert!(mesh.num_consumed() > 1);
    }

    #[test]
    fn test_progress_and_iteration_limit() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let progress = Progress::new(move |_, total, _| {
            assert_eq!(total, 3 * 3 * 2 * 6);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut mesh = fixtures::lattice(3, 3, 2);
        let mut frontier = Frontier::new(GrowthMode::Outwards);
        frontier.seed_tetrahedra(&mut mesh, &[TetraId::new(0)]);
        let options = GrowOptions::default().with_max_iterations(5);
        let summary = frontier.grow_surface_with_progress(&mut mesh, &options, &progress);

        assert_eq!(summary.iterations, 5);
        assert!(!summary.converged);
        assert_eq!(frontier.state(), GrowthState::Growing);
        // Five ticks and the final report
        assert_eq!(calls.load(Ordering::SeqCst), 6);

        // The pass can be continued
        let summary = frontier.grow_surface(&mut mesh, f64::INFINITY);
        assert!(summary.converged);
    }
}
