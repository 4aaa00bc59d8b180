//! Cost feature extraction
//!
//! Turns one candidate's [`Projection`] into the scalar features the cost
//! model consumes. All area sums skip nothing explicitly: negligible facets
//! carry a zero area and a zero normal, so they fall out of every sum on
//! their own while still taking part in the lowest-point search.

use std::fmt;

use nalgebra::Vector3;

use super::facets::FacetTable;
use super::projection::Projection;
use crate::params::OrientParams;

/// Scalar features of one candidate orientation
///
/// `unprintability` is filled in by the cost model and is the only ranking
/// key; the other fields are kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostItems {
    /// Overhang cost (height-weighted in volume-minimizing mode)
    pub overhang: f64,
    /// Mesh area resting on the bed
    pub bottom: f64,
    /// Convex hull area resting on the bed
    pub bottom_hull: f64,
    /// Estimated perimeter of the bed contact region
    pub contour: f64,
    /// Area of low-angle faces above the first layer
    pub area_laf: f64,
    /// Silhouette area of the hull seen along the up direction
    pub area_projected: f64,
    /// Mesh volume
    pub volume: f64,
    /// Total surface area of the mesh
    pub area_total: f64,
    /// Bounding box radius
    pub radius: f64,
    /// Final score, lower is better
    pub unprintability: f64,
}

impl fmt::Display for CostItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "overhang={:.1}, bottom={:.1}, bothull={:.1}, contour={:.1}, A_laf={:.1}, A_prj={:.1}, unprintability={:.4}",
            self.overhang,
            self.bottom,
            self.bottom_hull,
            self.contour,
            self.area_laf,
            self.area_projected,
            self.unprintability
        )
    }
}

/// Orientation-independent mesh measures copied into every [`CostItems`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct MeshStats {
    pub volume: f64,
    pub area_total: f64,
    pub radius: f64,
}

/// Compute the features of one candidate
///
/// A facet is on the bed when its highest corner is strictly below
/// `min_z + first_layer_height`; low-angle faces must lie strictly above
/// that level, so a facet topping out exactly on it counts as neither.
///
/// `params` must already carry the mesh's own overhang angle.
pub(crate) fn extract_features(
    mesh: &FacetTable,
    hull: &FacetTable,
    projection: &Projection,
    up: &Vector3<f64>,
    stats: &MeshStats,
    params: &OrientParams,
) -> CostItems {
    let ascent = params.ascent();
    let bed_level = projection.min_z + params.first_layer_height;
    let appearance_weight = params.appearance_face_supp + 1.0;

    let mut costs = CostItems {
        volume: stats.volume,
        area_total: stats.area_total,
        radius: stats.radius,
        ..CostItems::default()
    };

    let mut traced_contour = 0.0;
    let mut contour_facets = 0usize;

    for i in 0..mesh.len() {
        let area = mesh.areas[i];
        let z_max = projection.z_max[i];
        let normal_projection = mesh.normals[i].dot(up);
        let on_bed = z_max < bed_level;

        if on_bed {
            costs.bottom += area;
            if params.exact_contour {
                traced_contour += lowest_edge_length(mesh, projection, i);
                contour_facets += 1;
            }
        } else if normal_projection < ascent {
            let weighted = if mesh.appearance[i] {
                area * appearance_weight
            } else {
                area
            };
            costs.overhang += if params.min_volume {
                let height = projection.z_mean[i] - projection.min_z;
                height * weighted * (ascent - normal_projection)
            } else {
                weighted
            };
        }

        let tilt = normal_projection.abs();
        if z_max > bed_level && tilt > params.laf_min && tilt < params.laf_max {
            costs.area_laf += area;
        }
    }

    costs.contour = if params.exact_contour {
        traced_contour + params.contour_amount * contour_facets as f64
    } else {
        4.0 * costs.bottom.sqrt()
    };

    costs.bottom_hull = hull
        .areas
        .iter()
        .zip(&projection.hull_z_max)
        .filter(|&(_, &z_max)| z_max < bed_level)
        .map(|(area, _)| area)
        .sum();

    if params.use_projected_area {
        costs.area_projected = 0.5
            * hull
                .normals
                .iter()
                .zip(&hull.areas)
                .map(|(normal, area)| normal.dot(up).abs() * area)
                .sum::<f64>();
    }

    costs
}

/// Length of the edge joining a facet's two lowest corners
fn lowest_edge_length(mesh: &FacetTable, projection: &Projection, facet: usize) -> f64 {
    let z = projection.z[facet];
    let median = projection.z_median[facet];

    let lowest = if z[0] <= z[1] && z[0] <= z[2] {
        0
    } else if z[1] <= z[2] {
        1
    } else {
        2
    };
    let middle = (0..3)
        .find(|&k| k != lowest && z[k] == median)
        .unwrap_or((lowest + 1) % 3);

    let corners = &mesh.corners[facet];
    (corners[lowest] - corners[middle]).norm()
}
