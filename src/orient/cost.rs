//! Unprintability cost model

use super::features::CostItems;
use crate::params::OrientParams;

/// Divisor applied to the overhang cost in volume-minimizing mode
pub const OVERHANG_NORMALIZER: f64 = 25.0;

/// Reduce a feature set to its unprintability score
///
/// Volume-minimizing mode:
///
/// ```text
/// o = overhang / 25
/// A·(o + B) + F·(C·o + D + LAF·laf) / (D + CF·contour + BF·bottom + BHF·bottom_hull + E·o + P·projected)
/// ```
///
/// Legacy mode drops the leading term, the `/25` scaling and the `E·o`
/// denominator term. Both modes add `bottom_penalty` when the bed contact
/// area is below `bottom_min`. `tar_d > 0` keeps the denominator positive.
pub fn unprintability(costs: &CostItems, params: &OrientParams) -> f64 {
    let laf = if params.use_low_angle_face {
        params.tar_laf * costs.area_laf
    } else {
        0.0
    };
    let support = params.contour_f * costs.contour
        + params.bottom_f * costs.bottom
        + params.bottom_hull_f * costs.bottom_hull
        + params.tar_proj_area * costs.area_projected;

    let mut cost = if params.min_volume {
        let overhang = costs.overhang / OVERHANG_NORMALIZER;
        params.tar_a * (overhang + params.tar_b)
            + params.relative_f * (overhang * params.tar_c + params.tar_d + laf)
                / (params.tar_d + support + params.tar_e * overhang)
    } else {
        params.relative_f * (costs.overhang * params.tar_c + params.tar_d + laf)
            / (params.tar_d + support)
    };

    if costs.bottom < params.bottom_min {
        cost += params.bottom_penalty;
    }
    cost
}

/// Score a feature set and store the score in it
pub(crate) fn score(costs: &mut CostItems, params: &OrientParams) -> f64 {
    costs.unprintability = unprintability(costs, params);
    costs.unprintability
}
