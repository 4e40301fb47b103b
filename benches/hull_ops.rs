//! Benchmarks for hull growth.

use criterion::{criterion_group, criterion_main, Criterion};
use hullgrow::prelude::*;
use nalgebra::Point3;

/// Points and cells of an `n * n * n` block of cubes, each split into six
/// tetrahedra around its diagonal.
fn create_lattice(n: usize) -> (Vec<Point3<f64>>, Tetrahedralization) {
    let index = |i: usize, j: usize, k: usize| i + (n + 1) * (j + (n + 1) * k);

    let mut points = Vec::with_capacity((n + 1).pow(3));
    for k in 0..=n {
        for j in 0..=n {
            for i in 0..=n {
                // Small deterministic wobble so no four points are cospherical
                let h = (index(i, j, k) * 7919 % 1009) as f64 / 1009.0 - 0.5;
                points.push(Point3::new(
                    i as f64 + 0.1 * h,
                    j as f64 - 0.07 * h,
                    k as f64 + 0.05 * h,
                ));
            }
        }
    }

    let mut cells = Vec::with_capacity(n * n * n * 6);
    for k in 0..n {
        for j in 0..n {
            for i in 0..n {
                for perm in [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
                    let mut corner = [i, j, k];
                    let mut cell = [index(i, j, k), 0, 0, 0];
                    for (step, axis) in perm.into_iter().enumerate() {
                        corner[axis] += 1;
                        cell[step + 1] = index(corner[0], corner[1], corner[2]);
                    }
                    cells.push(cell);
                }
            }
        }
    }

    (points, Tetrahedralization::from_cells(&cells).unwrap())
}

fn bench_mesh_construction(c: &mut Criterion) {
    let (points, tets) = create_lattice(10);

    c.bench_function("build_lattice_10", |b| {
        b.iter(|| {
            let mesh: TetMesh = TetMesh::build(points.clone(), &tets).unwrap();
            mesh
        });
    });
}

fn bench_growth(c: &mut Criterion) {
    let (points, tets) = create_lattice(12);
    let mut hull: ConcaveHull = ConcaveHull::build(points, &tets).unwrap();

    c.bench_function("grow_outwards_lattice_12", |b| {
        b.iter(|| hull.grow_outwards(1.5).unwrap());
    });

    c.bench_function("grow_inwards_lattice_12", |b| {
        b.iter(|| hull.grow_inwards(1.5).unwrap());
    });

    c.bench_function("grow_upwards_lattice_12", |b| {
        b.iter(|| hull.grow_upwards(1.5).unwrap());
    });

    let sequential = GrowOptions::default().with_max_curvature(1.5).sequential();
    c.bench_function("grow_inwards_lattice_12_sequential", |b| {
        b.iter(|| hull.grow(GrowthMode::Inwards, &sequential).unwrap());
    });
}

fn bench_surface_output(c: &mut Criterion) {
    let (points, tets) = create_lattice(12);
    let mut hull: ConcaveHull = ConcaveHull::build(points, &tets).unwrap();
    hull.grow_outwards(f64::INFINITY).unwrap();

    c.bench_function("surface_mesh_lattice_12", |b| {
        b.iter(|| hull.surface_mesh());
    });
}

criterion_group!(
    benches,
    bench_mesh_construction,
    bench_growth,
    bench_surface_output
);
criterion_main!(benches);
