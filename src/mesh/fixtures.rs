//! Hand-built tetrahedralizations shared by the unit tests.

use nalgebra::Point3;

use super::builder::{Cell, Tetrahedralization};
use super::tetmesh::TetMesh;

/// The origin and the three unit axis points.
pub fn unit_corner_points() -> Vec<Point3<f64>> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    ]
}

/// One tetrahedron with no neighbours.
pub fn single_tetrahedron() -> TetMesh {
    let tets = Tetrahedralization::from_cells(&[[0, 1, 2, 3]]).unwrap();
    TetMesh::build(unit_corner_points(), &tets).unwrap()
}

/// One tetrahedron whose every face borders an outer sentinel.
pub fn single_tetrahedron_with_outer() -> TetMesh {
    let tets = Tetrahedralization::new(vec![
        Cell::Finite {
            vertices: [0, 1, 2, 3],
            neighbours: [Some(1); 4],
        },
        Cell::Outer,
    ]);
    TetMesh::build(unit_corner_points(), &tets).unwrap()
}

/// Two tetrahedra glued on the face (1, 2, 3).
pub fn bipyramid() -> TetMesh {
    let mut points = unit_corner_points();
    points.push(Point3::new(1.0, 1.0, 1.0));
    let tets = Tetrahedralization::from_cells(&[[0, 1, 2, 3], [4, 1, 2, 3]]).unwrap();
    TetMesh::build(points, &tets).unwrap()
}

/// The unit cube split into six tetrahedra around its main diagonal.
pub fn cube() -> TetMesh {
    let (points, cells) = kuhn_lattice(1, 1, 1, 0.0);
    let tets = Tetrahedralization::from_cells(&cells).unwrap();
    TetMesh::build(points, &tets).unwrap()
}

/// A centre point (index 0) surrounded by the six axis points, one
/// tetrahedron per octant.
pub fn octahedron() -> TetMesh {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, -1.0),
    ];
    let mut cells = Vec::new();
    for x in [1, 2] {
        for y in [3, 4] {
            for z in [5, 6] {
                cells.push([0, x, y, z]);
            }
        }
    }
    let tets = Tetrahedralization::from_cells(&cells).unwrap();
    TetMesh::build(points, &tets).unwrap()
}

/// An `nx * ny * nz` block of Kuhn-split cubes with slightly jittered
/// lattice points.
pub fn lattice(nx: usize, ny: usize, nz: usize) -> TetMesh {
    let (points, cells) = kuhn_lattice(nx, ny, nz, 0.05);
    let tets = Tetrahedralization::from_cells(&cells).unwrap();
    TetMesh::build(points, &tets).unwrap()
}

/// Lattice points and cells of a Kuhn (Freudenthal) triangulation.
///
/// Each cube is split into the six tetrahedra sharing its main diagonal,
/// which makes neighbouring cubes conform. Jitter is a deterministic
/// per-point offset of at most `jitter` along each axis.
pub fn kuhn_lattice(
    nx: usize,
    ny: usize,
    nz: usize,
    jitter: f64,
) -> (Vec<Point3<f64>>, Vec<[usize; 4]>) {
    let index = |i: usize, j: usize, k: usize| i + (nx + 1) * (j + (ny + 1) * k);

    let mut points = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                let n = index(i, j, k);
                let offset = |salt: usize| {
                    let h = (n * 7919 + salt * 104_729) % 1009;
                    (h as f64 / 1009.0 - 0.5) * 2.0 * jitter
                };
                points.push(Point3::new(
                    i as f64 + offset(1),
                    j as f64 + offset(2),
                    k as f64 + offset(3),
                ));
            }
        }
    }

    const PERMUTATIONS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    let mut cells = Vec::with_capacity(nx * ny * nz * 6);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                for perm in PERMUTATIONS {
                    let mut corner = [i, j, k];
                    let mut cell = [index(i, j, k), 0, 0, 0];
                    for (step, &axis) in perm.iter().enumerate() {
                        corner[axis] += 1;
                        cell[step + 1] = index(corner[0], corner[1], corner[2]);
                    }
                    cells.push(cell);
                }
            }
        }
    }

    (points, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_counts() {
        let mesh = lattice(2, 2, 1);
        assert_eq!(mesh.num_points(), 3 * 3 * 2);
        assert_eq!(mesh.num_finite_tetrahedra(), 2 * 2 * 6);
        for t in mesh.finite_tetra_ids() {
            assert!(mesh.signed_volume6(t).abs() > 0.1);
        }
    }

    #[test]
    fn test_octahedron_counts() {
        let mesh = octahedron();
        assert_eq!(mesh.num_finite_tetrahedra(), 8);
        // 8 hull faces and 12 interior faces around the centre
        let boundary = mesh
            .triangle_ids()
            .filter(|&t| mesh.triangle(t).is_boundary())
            .count();
        assert_eq!(boundary, 8);
        assert_eq!(mesh.num_triangles(), 20);
    }
}
