//! Per-candidate height projection

use nalgebra::Vector3;

use super::facets::FacetTable;

/// Projected facet heights along one candidate "up" direction
///
/// Buffers are sized to the facet counts and rebuilt for every candidate.
#[derive(Debug, Clone, Default)]
pub(crate) struct Projection {
    /// Projected height of each corner, per mesh facet
    pub z: Vec<[f64; 3]>,
    /// Highest corner per mesh facet
    pub z_max: Vec<f64>,
    /// Median corner per mesh facet
    pub z_median: Vec<f64>,
    /// Mean corner height per mesh facet
    pub z_mean: Vec<f64>,
    /// Highest corner per hull facet
    pub hull_z_max: Vec<f64>,
    /// Lowest projected mesh corner, 0 for a mesh without facets
    pub min_z: f64,
}

impl Projection {
    /// Project mesh and hull facets onto `up`
    pub fn compute(mesh: &FacetTable, hull: &FacetTable, up: &Vector3<f64>) -> Self {
        let count = mesh.len();
        let mut projection = Self {
            z: Vec::with_capacity(count),
            z_max: Vec::with_capacity(count),
            z_median: Vec::with_capacity(count),
            z_mean: Vec::with_capacity(count),
            hull_z_max: Vec::with_capacity(hull.len()),
            min_z: f64::INFINITY,
        };

        for corners in &mesh.corners {
            let [a, b, c] = corners.map(|p| p.dot(up));
            projection.z.push([a, b, c]);
            projection.z_max.push(a.max(b).max(c));
            projection.z_median.push(median3(a, b, c));
            projection.z_mean.push((a + b + c) / 3.0);
            projection.min_z = projection.min_z.min(a).min(b).min(c);
        }

        projection.hull_z_max.extend(
            hull.corners
                .iter()
                .map(|corners| corners.iter().map(|p| p.dot(up)).fold(f64::NEG_INFINITY, f64::max)),
        );

        if !projection.min_z.is_finite() {
            projection.min_z = 0.0;
        }
        projection
    }
}

/// Median of three values without sorting
pub(crate) fn median3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).max(a.max(b).min(c))
}
