//! Candidate orientation generation
//!
//! Candidates are "up" directions: the direction in the part's own frame
//! that will point away from the build plate. They come from four sources,
//! in this order:
//!
//! 1. the current pose (`+Z` up),
//! 2. the dominant facet-normal clusters of the mesh, largest area first,
//! 3. the dominant facet-normal clusters of the convex hull (at most
//!    `OrientParams::hull_directions`),
//! 4. a fixed set of 18 directions covering the sphere at 45° steps.
//!
//! A facet normal `n` becomes the candidate `-n`, i.e. the orientation that
//! puts that facet face down on the plate. The list is then deduplicated.

use std::collections::HashMap;

use nalgebra::Vector3;

use super::facets::FacetTable;
use crate::params::OrientParams;

/// Quantization steps per unit for normal bucketing (3 decimal places)
///
/// Changing this changes how facets cluster and therefore which candidates
/// are generated.
pub const NORMAL_QUANTIZATION: f64 = 1000.0;

/// The current pose: `+Z` stays up
pub const DEFAULT_UP: [f64; 3] = [0.0, 0.0, 1.0];

const S: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Supplemental facet-normal directions, appended after the mesh clusters
///
/// The six axis directions plus the twelve 45° diagonals between them.
pub const SUPPLEMENTAL_NORMALS: [[f64; 3]; 18] = [
    [0.0, 0.0, -1.0],
    [S, 0.0, -S],
    [0.0, S, -S],
    [-S, 0.0, -S],
    [0.0, -S, -S],
    [1.0, 0.0, 0.0],
    [S, S, 0.0],
    [0.0, 1.0, 0.0],
    [-S, S, 0.0],
    [-1.0, 0.0, 0.0],
    [-S, -S, 0.0],
    [0.0, -1.0, 0.0],
    [S, -S, 0.0],
    [S, 0.0, S],
    [0.0, S, S],
    [-S, 0.0, S],
    [0.0, -S, S],
    [0.0, 0.0, 1.0],
];

/// Bucket key of a quantized unit normal
///
/// Each component is `floor(c * NORMAL_QUANTIZATION)`, so two normals share
/// a bucket exactly when they agree to three decimal places (rounding toward
/// negative infinity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalKey(pub [i32; 3]);

impl NormalKey {
    /// Bucket of negligible or degenerate facets
    pub const ZERO: NormalKey = NormalKey([0, 0, 0]);

    /// Quantize a normal into its bucket
    pub fn quantize(normal: &Vector3<f64>) -> Self {
        let q = |c: f64| (c * NORMAL_QUANTIZATION).floor() as i32;
        NormalKey([q(normal.x), q(normal.y), q(normal.z)])
    }

    /// Representative direction of the bucket
    pub fn direction(&self) -> Vector3<f64> {
        let [x, y, z] = self.0;
        Vector3::new(x as f64, y as f64, z as f64) / NORMAL_QUANTIZATION
    }

    /// Whether this is the zero bucket
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Area-weighted normal clusters, largest first
///
/// Buckets with equal total area keep the order in which their first facet
/// appears, so the result does not depend on hash iteration order. Zero
/// buckets and zero-area facets are skipped. Returns at most `limit`
/// buckets, or all of them when `limit` is `None`.
pub(crate) fn area_cumulation(facets: &FacetTable, limit: Option<usize>) -> Vec<(NormalKey, f64)> {
    let mut slots: HashMap<NormalKey, usize> = HashMap::new();
    let mut buckets: Vec<(NormalKey, f64)> = Vec::new();

    for (key, &area) in facets.keys.iter().zip(&facets.areas) {
        if key.is_zero() || area <= 0.0 {
            continue;
        }
        let slot = *slots.entry(*key).or_insert_with(|| {
            buckets.push((*key, 0.0));
            buckets.len() - 1
        });
        buckets[slot].1 += area;
    }

    // Stable: ties keep first-seen order
    buckets.sort_by(|a, b| b.1.total_cmp(&a.1));

    if let Some(limit) = limit {
        buckets.truncate(limit);
    }
    buckets
}

/// Build the deduplicated candidate list for a mesh and its hull
///
/// Never empty: the current pose is always the first candidate.
pub(crate) fn generate_candidates(
    mesh: &FacetTable,
    hull: &FacetTable,
    params: &OrientParams,
) -> Vec<Vector3<f64>> {
    let mesh_clusters = area_cumulation(mesh, None);
    let hull_clusters = area_cumulation(hull, Some(params.hull_directions));

    let mut candidates = Vec::with_capacity(
        1 + mesh_clusters.len() + hull_clusters.len() + SUPPLEMENTAL_NORMALS.len(),
    );
    candidates.push(Vector3::from(DEFAULT_UP));
    candidates.extend(
        mesh_clusters
            .iter()
            .chain(&hull_clusters)
            .map(|(key, _)| -key.direction()),
    );
    candidates.extend(SUPPLEMENTAL_NORMALS.iter().map(|n| -Vector3::from(*n)));

    remove_duplicates(candidates, params.duplicate_tolerance)
}

/// Whether two directions are equal within a relative tolerance
///
/// `‖a − b‖ ≤ tol · min(‖a‖, ‖b‖)`. For unit vectors and small `tol` this
/// means the angle between them is below roughly `tol` radians.
pub fn is_approx(a: &Vector3<f64>, b: &Vector3<f64>, tol: f64) -> bool {
    (a - b).norm() <= tol * a.norm().min(b.norm())
}

/// Drop zero vectors and directions close to an earlier kept one
///
/// Scans in insertion order and compares each candidate with every kept
/// candidate, which is quadratic in the candidate count. Candidate lists
/// are a few dozen entries (clusters plus 19 fixed directions).
pub fn remove_duplicates(candidates: Vec<Vector3<f64>>, tol: f64) -> Vec<Vector3<f64>> {
    let mut kept: Vec<Vector3<f64>> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate.norm() <= f64::EPSILON {
            continue;
        }
        if kept.iter().any(|k| is_approx(k, &candidate, tol)) {
            continue;
        }
        kept.push(candidate);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[([f64; 3], f64)]) -> FacetTable {
        let mut table = FacetTable::default();
        for (normal, area) in entries {
            let key = NormalKey::quantize(&Vector3::from(*normal));
            table.keys.push(key);
            table.normals.push(key.direction());
            table.areas.push(*area);
            table.appearance.push(false);
            table.corners.push([Vector3::zeros(); 3]);
        }
        table
    }

    #[test]
    fn test_quantize_floors_to_three_decimals() {
        let key = NormalKey::quantize(&Vector3::new(S, -S, 0.0));
        assert_eq!(key, NormalKey([707, -708, 0]));
        assert_eq!(key.direction(), Vector3::new(0.707, -0.708, 0.0));

        let axis = NormalKey::quantize(&Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(axis, NormalKey([0, 0, -1000]));
        assert!(!axis.is_zero());
    }

    #[test]
    fn test_quantize_merges_near_identical_normals() {
        let a = NormalKey::quantize(&Vector3::new(0.0, 0.0, 1.0));
        let b = NormalKey::quantize(&Vector3::new(0.0000004, 0.0000001, 0.9999999999));
        assert_eq!(a.0[0], b.0[0]);
        assert_eq!(a.0[1], b.0[1]);
    }

    #[test]
    fn test_area_cumulation_sorts_by_area() {
        let facets = table(&[
            ([0.0, 0.0, 1.0], 1.0),
            ([1.0, 0.0, 0.0], 2.0),
            ([0.0, 0.0, 1.0], 1.5),
            ([0.0, 1.0, 0.0], 0.5),
        ]);

        let clusters = area_cumulation(&facets, None);
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].0, NormalKey([0, 0, 1000]));
        assert!((clusters[0].1 - 2.5).abs() < 1e-12);
        assert_eq!(clusters[1].0, NormalKey([1000, 0, 0]));
        assert_eq!(clusters[2].0, NormalKey([0, 1000, 0]));

        let limited = area_cumulation(&facets, Some(1));
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_area_cumulation_ties_keep_first_seen_order() {
        let facets = table(&[
            ([0.0, 1.0, 0.0], 1.0),
            ([1.0, 0.0, 0.0], 1.0),
            ([0.0, -1.0, 0.0], 1.0),
        ]);
        let keys: Vec<_> = area_cumulation(&facets, None).into_iter().map(|c| c.0).collect();
        assert_eq!(
            keys,
            vec![
                NormalKey([0, 1000, 0]),
                NormalKey([1000, 0, 0]),
                NormalKey([0, -1000, 0])
            ]
        );
    }

    #[test]
    fn test_area_cumulation_skips_negligible() {
        let mut facets = table(&[([0.0, 0.0, 1.0], 0.0)]);
        facets.keys.push(NormalKey::ZERO);
        facets.normals.push(Vector3::zeros());
        facets.areas.push(3.0);
        facets.appearance.push(false);
        facets.corners.push([Vector3::zeros(); 3]);

        assert!(area_cumulation(&facets, None).is_empty());
    }

    #[test]
    fn test_remove_duplicates() {
        let candidates = vec![
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.001, 0.9999),
            Vector3::zeros(),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 0.1, 0.995),
        ];

        let kept = remove_duplicates(candidates, 0.01);
        assert_eq!(
            kept,
            vec![
                Vector3::new(0.0, 0.0, 1.0),
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 0.1, 0.995),
            ]
        );
    }

    #[test]
    fn test_supplements_alone_give_eighteen_candidates() {
        let empty = FacetTable::default();
        let candidates = generate_candidates(&empty, &empty, &OrientParams::default());

        // Default up duplicates the negated (0, 0, -1) supplement
        assert_eq!(candidates.len(), 18);
        assert_eq!(candidates[0], Vector3::new(0.0, 0.0, 1.0));
        for (i, a) in candidates.iter().enumerate() {
            assert!((a.norm() - 1.0).abs() < 1e-6);
            for b in &candidates[i + 1..] {
                assert!(!is_approx(a, b, 0.01));
            }
        }
    }

    #[test]
    fn test_mesh_clusters_come_before_supplements() {
        let mesh = table(&[([0.5, 0.0, -0.75], 5.0)]);
        let candidates =
            generate_candidates(&mesh, &FacetTable::default(), &OrientParams::default());

        assert_eq!(candidates[0], Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(candidates[1], Vector3::new(-0.5, 0.0, 0.75));
        assert_eq!(candidates.len(), 19);
    }
}
