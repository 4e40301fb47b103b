//! Immutable indexed point storage.

use nalgebra::Point3;

use super::index::{MeshIndex, VertexId};

/// An immutable, index-addressable array of 3D coordinates.
///
/// Every other structure refers to points by [`VertexId`] into this store.
#[derive(Debug, Clone, Default)]
pub struct PointStore {
    points: Vec<Point3<f64>>,
}

impl PointStore {
    /// Wrap a list of points.
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position of a point.
    #[inline]
    pub fn position<I: MeshIndex>(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.points[v.index()]
    }

    /// All points as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Mean of all points, or `None` for an empty store.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords);
        Some(Point3::from(sum / self.points.len() as f64))
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &self.points[1..] {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        Some((min, max))
    }

    /// Length of the bounding box diagonal (0 for fewer than two points).
    pub fn extent(&self) -> f64 {
        self.bounding_box()
            .map(|(min, max)| (max - min).norm())
            .unwrap_or(0.0)
    }
}

impl From<Vec<Point3<f64>>> for PointStore {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self::new(points)
    }
}
