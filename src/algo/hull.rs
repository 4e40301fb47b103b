//! Concave hull extraction.
//!
//! [`ConcaveHull`] owns a tetrahedral mesh and drives one growth pass at a
//! time over it:
//!
//! - [`ConcaveHull::grow_inwards`] starts outside the convex hull and eats
//!   into cavities and undersides
//! - [`ConcaveHull::grow_outwards`] starts deep inside the cloud and inflates
//!   until the remaining faces are too sharp
//! - [`ConcaveHull::grow_in_direction`] starts at the tetrahedron furthest
//!   against a direction and sweeps along it, as used for terrain
//!   ([`ConcaveHull::grow_upwards`]) and canopy
//!   ([`ConcaveHull::grow_top_down`]) surfaces
//!
//! Every pass resets the mesh flags, so passes are independent. The result is
//! read back with [`ConcaveHull::surface_triangles`] or
//! [`ConcaveHull::surface_mesh`].
//!
//! # Example
//!
//! ```
//! use hullgrow::prelude::*;
//! use nalgebra::Point3;
//!
//! // A centre point inside an octahedron
//! let points = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(-1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, -1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(0.0, 0.0, -1.0),
//! ];
//! let mut cells = Vec::new();
//! for x in [1, 2] {
//!     for y in [3, 4] {
//!         for z in [5, 6] {
//!             cells.push([0, x, y, z]);
//!         }
//!     }
//! }
//! let tets = Tetrahedralization::from_cells(&cells).unwrap();
//!
//! let mut hull: ConcaveHull = ConcaveHull::build(points, &tets).unwrap();
//! hull.grow_outwards(f64::INFINITY).unwrap();
//!
//! let surface = hull.surface_mesh();
//! assert_eq!(surface.num_triangles(), 8);
//! assert!(surface.is_edge_manifold());
//! ```

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::mesh::{
    MeshIndex, PointStore, SurfaceMesh, TetMesh, TetraId, Tetrahedralization, Tetrahedralizer,
};

use super::frontier::{Frontier, GrowOptions, GrowthMode, GrowthState, GrowthSummary};
use super::Progress;

/// A concave hull grower over a fixed tetrahedralization.
#[derive(Debug, Clone)]
pub struct ConcaveHull<I: MeshIndex = u32> {
    mesh: TetMesh<I>,
    frontier: Frontier<I>,
    centre: Point3<f64>,
}

impl<I: MeshIndex> ConcaveHull<I> {
    /// Wrap an already built mesh.
    pub fn new(mesh: TetMesh<I>) -> Self {
        let centre = mesh.points().centroid().unwrap_or_else(Point3::origin);
        Self {
            mesh,
            frontier: Frontier::new(GrowthMode::Outwards),
            centre,
        }
    }

    /// Build from points and an external tetrahedralization.
    pub fn build(points: impl Into<PointStore>, tets: &Tetrahedralization) -> Result<Self> {
        Ok(Self::new(TetMesh::build(points, tets)?))
    }

    /// Tetrahedralize `points` with `builder` and build the hull.
    ///
    /// Fewer than four points can never enclose a volume, so the builder is
    /// not consulted and the hull is empty.
    pub fn from_points<B: Tetrahedralizer + ?Sized>(
        points: Vec<Point3<f64>>,
        builder: &B,
    ) -> Result<Self> {
        if points.len() < 4 {
            log::debug!("{} points cannot enclose a volume", points.len());
            return Ok(Self::new(TetMesh::empty(points.into())));
        }
        let tets = builder.tetrahedralize(&points)?;
        Self::build(points, &tets)
    }

    /// The tetrahedral mesh, with the flags of the last pass.
    #[inline]
    pub fn mesh(&self) -> &TetMesh<I> {
        &self.mesh
    }

    /// The frontier of the last pass.
    #[inline]
    pub fn frontier(&self) -> &Frontier<I> {
        &self.frontier
    }

    /// Mean of all points.
    #[inline]
    pub fn centre(&self) -> Point3<f64> {
        self.centre
    }

    /// State of the current pass.
    #[inline]
    pub fn state(&self) -> GrowthState {
        self.frontier.state()
    }

    // ==================== Passes ====================

    /// Grow from the convex hull inwards.
    pub fn grow_inwards(&mut self, max_curvature: f64) -> Result<GrowthSummary> {
        self.grow(
            GrowthMode::Inwards,
            &GrowOptions::default().with_max_curvature(max_curvature),
        )
    }

    /// Grow from the innermost tetrahedron outwards.
    pub fn grow_outwards(&mut self, max_curvature: f64) -> Result<GrowthSummary> {
        self.grow(
            GrowthMode::Outwards,
            &GrowOptions::default().with_max_curvature(max_curvature),
        )
    }

    /// Grow along `direction`, starting from the tetrahedron whose centroid
    /// lies furthest against it.
    pub fn grow_in_direction(
        &mut self,
        max_curvature: f64,
        direction: Vector3<f64>,
    ) -> Result<GrowthSummary> {
        self.grow(
            GrowthMode::Directional(direction),
            &GrowOptions::default().with_max_curvature(max_curvature),
        )
    }

    /// Grow upwards (+Z), giving the surface of the ground under the cloud.
    pub fn grow_upwards(&mut self, max_curvature: f64) -> Result<GrowthSummary> {
        self.grow_in_direction(max_curvature, Vector3::z())
    }

    /// Grow downwards (-Z), giving the surface over the cloud.
    pub fn grow_top_down(&mut self, max_curvature: f64) -> Result<GrowthSummary> {
        self.grow_in_direction(max_curvature, -Vector3::z())
    }

    /// Run a full pass in `mode`.
    pub fn grow(&mut self, mode: GrowthMode, options: &GrowOptions) -> Result<GrowthSummary> {
        self.grow_with_progress(mode, options, &Progress::none())
    }

    /// Run a full pass in `mode`, reporting progress.
    pub fn grow_with_progress(
        &mut self,
        mode: GrowthMode,
        options: &GrowOptions,
        progress: &Progress,
    ) -> Result<GrowthSummary> {
        options.validate()?;
        self.seed(mode, options.parallel)?;
        let summary = self
            .frontier
            .grow_surface_with_progress(&mut self.mesh, options, progress);

        log::debug!(
            "{:?} pass: {} seeds, {} absorbed, {} discarded, {} surface triangles{}",
            self.frontier.mode(),
            summary.seeds,
            summary.absorbed,
            summary.discarded,
            self.mesh.surface_triangle_ids().count(),
            if summary.converged { "" } else { " (not converged)" }
        );
        Ok(summary)
    }

    // ==================== Stepping ====================

    /// Reset all flags and seed a new pass without growing.
    pub fn seed(&mut self, mode: GrowthMode, parallel: bool) -> Result<()> {
        let mode = match mode {
            GrowthMode::Directional(dir) => GrowthMode::Directional(unit_direction(dir)?),
            other => other,
        };
        self.frontier = Frontier::new(mode);

        match mode {
            GrowthMode::Inwards => self.frontier.seed_exterior(&mut self.mesh, parallel),
            GrowthMode::Outwards => {
                let seeds: Vec<_> = self.outward_seed(parallel).into_iter().collect();
                self.frontier.seed_tetrahedra(&mut self.mesh, &seeds);
            }
            GrowthMode::Directional(dir) => {
                let seeds: Vec<_> = self.directional_seed(&dir, parallel).into_iter().collect();
                self.frontier.seed_tetrahedra(&mut self.mesh, &seeds);
            }
        }

        if self.mesh.is_degenerate() {
            log::debug!("no tetrahedra to grow through, surface is empty");
        }
        Ok(())
    }

    /// Process one candidate of the current pass. See
    /// [`Frontier::grow_front`].
    pub fn grow_front(&mut self, max_curvature: f64) -> bool {
        self.frontier.grow_front(&mut self.mesh, max_curvature)
    }

    /// Continue the current pass until it converges at `max_curvature`.
    pub fn grow_surface(&mut self, max_curvature: f64) -> GrowthSummary {
        self.frontier.grow_surface(&mut self.mesh, max_curvature)
    }

    // ==================== Seeds ====================

    /// The first tetrahedron containing the centre, or failing that the one
    /// whose centroid is nearest to it.
    pub fn outward_seed(&self, parallel: bool) -> Option<TetraId<I>> {
        let mesh = &self.mesh;
        let centre = self.centre;
        let ids: Vec<TetraId<I>> = mesh.finite_tetra_ids().collect();

        let containing = if parallel {
            ids.par_iter()
                .copied()
                .find_first(|&t| mesh.point_inside_tetrahedron(&centre, t))
        } else {
            ids.iter()
                .copied()
                .find(|&t| mesh.point_inside_tetrahedron(&centre, t))
        };

        containing.or_else(|| {
            self.extreme_tetrahedron(&ids, parallel, |c| (c - centre).norm_squared())
        })
    }

    /// The tetrahedron whose centroid lies furthest against `direction`.
    pub fn directional_seed(&self, direction: &Vector3<f64>, parallel: bool) -> Option<TetraId<I>> {
        let ids: Vec<TetraId<I>> = self.mesh.finite_tetra_ids().collect();
        self.extreme_tetrahedron(&ids, parallel, |c| c.coords.dot(direction))
    }

    /// The tetrahedron minimizing `key` of its centroid, lowest handle first
    /// on ties.
    fn extreme_tetrahedron<F>(
        &self,
        ids: &[TetraId<I>],
        parallel: bool,
        key: F,
    ) -> Option<TetraId<I>>
    where
        F: Fn(&Point3<f64>) -> f64 + Sync,
    {
        let mesh = &self.mesh;
        let score = |t: TetraId<I>| mesh.tetra_centroid(t).map(|c| (key(&c), t));
        let better = |a: (f64, TetraId<I>), b: (f64, TetraId<I>)| {
            if b.0.total_cmp(&a.0).then(b.1.cmp(&a.1)).is_lt() {
                b
            } else {
                a
            }
        };

        if parallel {
            ids.par_iter()
                .filter_map(|&t| score(t))
                .reduce_with(better)
                .map(|(_, t)| t)
        } else {
            ids.iter()
                .filter_map(|&t| score(t))
                .reduce(better)
                .map(|(_, t)| t)
        }
    }

    // ==================== Output ====================

    /// Surface triangles as point-store index triples, oriented with their
    /// normal pointing away from the solid side.
    ///
    /// The solid is the consumed region, except for inward growth where it
    /// is what remains unconsumed.
    pub fn surface_triangles(&self) -> Vec<[usize; 3]> {
        let mesh = &self.mesh;
        let inwards = self.frontier.mode().exterior_is_consumed();

        mesh.surface_triangle_ids()
            .map(|tri| {
                let owner = mesh.triangle(tri).tetrahedra[0];
                let in_solid = mesh.tetrahedron(owner).seen != inwards;
                let away = if in_solid {
                    mesh.outward_normal(tri, owner)
                } else {
                    -mesh.outward_normal(tri, owner)
                };

                let [a, b, c] = mesh.triangle(tri).vertices;
                let [pa, pb, pc] = mesh.triangle_positions(tri);
                if (pb - pa).cross(&(pc - pa)).dot(&away) >= 0.0 {
                    [a.index(), b.index(), c.index()]
                } else {
                    [a.index(), c.index(), b.index()]
                }
            })
            .collect()
    }

    /// The surface as a compact mesh.
    pub fn surface_mesh(&self) -> SurfaceMesh {
        SurfaceMesh::from_indexed(self.mesh.points().as_slice(), &self.surface_triangles())
    }
}

/// Normalize a growth direction, rejecting zero and non-finite vectors.
fn unit_direction(direction: Vector3<f64>) -> Result<Vector3<f64>> {
    let norm = direction.norm();
    if !norm.is_finite() || norm <= f64::EPSILON {
        return Err(MeshError::invalid_param(
            "direction",
            format!("[{}, {}, {}]", direction.x, direction.y, direction.z),
            "must be a finite non-zero vector",
        ));
    }
    Ok(direction / norm)
}
