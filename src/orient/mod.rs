//! Automatic orientation engine
//!
//! [`AutoOrienter`] scores a fixed set of candidate "up" directions for one
//! mesh and picks the cheapest:
//!
//! 1. facet tables are built once for the mesh and its convex hull,
//! 2. [`candidates`] derives the deduplicated candidate list,
//! 3. every candidate is projected, reduced to [`CostItems`] and scored,
//! 4. the lowest score wins; among equal scores the earliest candidate wins.
//!
//! The engine only borrows the mesh. Its per-mesh buffers are dropped with
//! the orienter once the result has been produced.

pub mod candidates;
pub mod cost;
pub(crate) mod facets;
pub mod features;
pub(crate) mod projection;

use nalgebra::Vector3;
use tracing::{debug, info};

use crate::error::Result;
use crate::mesh_ops::{
    bounding_radius, compute_convex_hull, compute_mesh_volume, compute_surface_area,
};
use crate::model::Mesh;
use crate::params::OrientParams;
use crate::rotation::MeshOrientation;

use facets::FacetTable;
use features::MeshStats;
use projection::Projection;

pub use candidates::{NormalKey, remove_duplicates};
pub use cost::unprintability;
pub use features::CostItems;

/// Score of one candidate direction
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Candidate "up" direction in the mesh's frame
    pub up: Vector3<f64>,
    /// Features and score of the candidate
    pub costs: CostItems,
}

/// Result of a full candidate search
#[derive(Debug, Clone, PartialEq)]
pub struct OrientOutcome {
    /// Winning "up" direction
    pub up: Vector3<f64>,
    /// Features and score of the winner
    pub costs: CostItems,
    /// Every candidate in generation order
    pub evaluations: Vec<Evaluation>,
}

/// Orientation search over one borrowed mesh
#[derive(Debug)]
pub struct AutoOrienter<'a> {
    mesh: &'a Mesh,
    params: OrientParams,
    facets: FacetTable,
    hull: FacetTable,
    stats: MeshStats,
}

impl<'a> AutoOrienter<'a> {
    /// Prepare the facet tables of `mesh` and its convex hull
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidParameter`] if `params` fails
    /// validation.
    pub fn new(mesh: &'a Mesh, params: &OrientParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::prepare(mesh, params))
    }

    /// Build the orienter from parameters that were already validated
    pub(crate) fn prepare(mesh: &'a Mesh, params: &OrientParams) -> Self {
        let facets = FacetTable::from_mesh(mesh, params.negligible_face_size);

        let hull_mesh = compute_convex_hull(mesh);
        let hull = if hull_mesh.is_empty() {
            debug!("Using mesh facets in place of the convex hull");
            facets.clone()
        } else {
            FacetTable::from_mesh(&hull_mesh, params.negligible_face_size)
        };

        let volume = match mesh.volume {
            Some(volume) if volume > 0.0 => volume,
            _ => compute_mesh_volume(mesh),
        };
        let stats = MeshStats {
            volume,
            area_total: compute_surface_area(mesh),
            radius: bounding_radius(mesh),
        };

        debug!(
            facets = facets.len(),
            hull_facets = hull.len(),
            appearance = facets.appearance_count(),
            volume,
            "Prepared mesh for orientation"
        );

        Self {
            mesh,
            params: params.clone(),
            facets,
            hull,
            stats,
        }
    }

    /// The mesh being oriented
    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    /// Deduplicated candidate "up" directions in evaluation order
    ///
    /// Never empty.
    pub fn candidates(&self) -> Vec<Vector3<f64>> {
        candidates::generate_candidates(&self.facets, &self.hull, &self.params)
    }

    /// Features and score of one "up" direction
    pub fn evaluate(&self, up: &Vector3<f64>) -> CostItems {
        let projection = Projection::compute(&self.facets, &self.hull, up);
        let mut costs = features::extract_features(
            &self.facets,
            &self.hull,
            &projection,
            up,
            &self.stats,
            &self.params,
        );
        cost::score(&mut costs, &self.params);
        costs
    }

    /// Evaluate every candidate and pick the cheapest
    pub fn process(&self) -> OrientOutcome {
        let candidates = self.candidates();
        debug!(count = candidates.len(), "Evaluating candidate orientations");

        let evaluations: Vec<Evaluation> = candidates
            .into_iter()
            .map(|up| {
                let costs = self.evaluate(&up);
                debug!(
                    up = ?(up.x, up.y, up.z),
                    "Candidate {}",
                    costs
                );
                Evaluation { up, costs }
            })
            .collect();

        // Strict comparison keeps the earliest candidate on ties
        let mut best = 0;
        for (i, evaluation) in evaluations.iter().enumerate().skip(1) {
            let current = evaluations[best].costs.unprintability;
            if evaluation.costs.unprintability < current || current.is_nan() {
                best = i;
            }
        }
        let winner = &evaluations[best];

        info!(
            up = ?(winner.up.x, winner.up.y, winner.up.z),
            "Best orientation: {}",
            winner.costs
        );

        OrientOutcome {
            up: winner.up,
            costs: winner.costs,
            evaluations,
        }
    }
}

/// Score a single "up" direction for a mesh
///
/// `up` is measured in the mesh's current frame; `(0, 0, 1)` scores the pose
/// the mesh already has.
///
/// # Errors
/// Returns [`crate::Error::InvalidParameter`] if `params` fails validation.
///
/// # Example
///
/// ```
/// use autoorient::{evaluate_direction, Mesh, OrientParams};
/// use nalgebra::Vector3;
///
/// let costs = evaluate_direction(&Mesh::new(), &OrientParams::default(), &Vector3::z()).unwrap();
/// assert_eq!(costs.bottom, 0.0);
/// ```
pub fn evaluate_direction(
    mesh: &Mesh,
    params: &OrientParams,
    up: &Vector3<f64>,
) -> Result<CostItems> {
    Ok(AutoOrienter::new(mesh, params)?.evaluate(up))
}

/// Find the best orientation of a single mesh
///
/// # Errors
/// Returns [`crate::Error::InvalidParameter`] if `params` fails validation.
pub fn orient_mesh(mesh: &Mesh, params: &OrientParams) -> Result<MeshOrientation> {
    let outcome = AutoOrienter::new(mesh, params)?.process();
    Ok(MeshOrientation::from_up(outcome.up, outcome.costs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Triangle, Vertex};

    fn cuboid(x: f64, y: f64, z: f64) -> Mesh {
        let mut mesh = Mesh::new();
        for &(px, py, pz) in &[
            (0.0, 0.0, 0.0),
            (x, 0.0, 0.0),
            (x, y, 0.0),
            (0.0, y, 0.0),
            (0.0, 0.0, z),
            (x, 0.0, z),
            (x, y, z),
            (0.0, y, z),
        ] {
            mesh.vertices.push(Vertex::new(px, py, pz));
        }
        for [a, b, c] in [
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ] {
            mesh.triangles.push(Triangle::new(a, b, c));
        }
        mesh
    }

    #[test]
    fn test_cube_keeps_current_pose() {
        let mesh = cuboid(1.0, 1.0, 1.0);
        let orienter = AutoOrienter::new(&mesh, &OrientParams::default()).unwrap();
        let outcome = orienter.process();

        assert_eq!(outcome.up, Vector3::new(0.0, 0.0, 1.0));
        assert!((outcome.costs.bottom - 1.0).abs() < 1e-9);
        assert_eq!(outcome.costs.overhang, 0.0);
        assert!((outcome.costs.volume - 1.0).abs() < 1e-12);
        assert!((outcome.costs.area_total - 6.0).abs() < 1e-12);
        assert_eq!(outcome.evaluations[0].up, outcome.up);
    }

    #[test]
    fn test_pillar_lies_down() {
        let mesh = cuboid(1.0, 1.0, 10.0);
        let outcome = AutoOrienter::new(&mesh, &OrientParams::default())
            .unwrap()
            .process();

        assert!(outcome.up.z.abs() < 1e-9, "picked {:?}", outcome.up);
        assert!((outcome.costs.bottom - 10.0).abs() < 1e-6);

        let standing = outcome
            .evaluations
            .iter()
            .find(|e| e.up == Vector3::new(0.0, 0.0, 1.0))
            .unwrap();
        assert!(standing.costs.unprintability > outcome.costs.unprintability);
    }

    #[test]
    fn test_stored_volume_is_trusted_when_positive() {
        let mut mesh = cuboid(1.0, 1.0, 1.0);
        mesh.volume = Some(42.0);
        let costs = evaluate_direction(&mesh, &OrientParams::default(), &Vector3::z()).unwrap();
        assert_eq!(costs.volume, 42.0);

        mesh.volume = Some(-1.0);
        let costs = evaluate_direction(&mesh, &OrientParams::default(), &Vector3::z()).unwrap();
        assert!((costs.volume - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_mesh_still_has_a_result() {
        let mesh = Mesh::new();
        let orienter = AutoOrienter::new(&mesh, &OrientParams::default()).unwrap();
        assert!(!orienter.candidates().is_empty());

        let outcome = orienter.process();
        assert_eq!(outcome.up, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = OrientParams::default().with_overhang_angle(120.0);
        assert!(AutoOrienter::new(&cuboid(1.0, 1.0, 1.0), &params).is_err());
        assert!(orient_mesh(&cuboid(1.0, 1.0, 1.0), &params).is_err());
    }
}
