//! Orientation parameters
//!
//! Every threshold and weight used by the orientation engine lives in one
//! immutable [`OrientParams`] value that is passed through every call. The
//! cost-model weights (`tar_*`, `*_f`) are empirically tuned constants: they
//! have no physical meaning on their own and are exposed so they can be
//! re-tuned, not because individual values are expected to change often.

use crate::error::{Error, Result};

/// Configuration for one orientation run
///
/// The defaults reproduce the shipped tuning.
///
/// # Example
///
/// ```
/// use autoorient::OrientParams;
///
/// let params = OrientParams::default()
///     .with_overhang_angle(45.0)
///     .with_min_volume(false)
///     .with_parallel(false);
/// assert!(params.validate().is_ok());
/// assert!((params.ascent() - (-std::f64::consts::FRAC_1_SQRT_2)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OrientParams {
    /// Maximum printable overhang angle in degrees, measured from vertical
    ///
    /// Facets whose normal leans further downward than this need support.
    /// Per-mesh values are applied with [`OrientParams::for_overhang_angle`].
    pub overhang_angle: f64,

    /// First layer height; facets whose highest point lies within this
    /// distance of the lowest vertex count as resting on the bed
    pub first_layer_height: f64,

    /// Facets with a smaller area are ignored for clustering and area sums
    pub negligible_face_size: f64,

    /// Extra overhang weight for exterior appearance faces
    ///
    /// An appearance facet contributes `area * (1 + appearance_face_supp)`.
    pub appearance_face_supp: f64,

    /// Lower bound (exclusive) of `|n·up|` for low-angle faces
    pub laf_min: f64,

    /// Upper bound (exclusive) of `|n·up|` for low-angle faces
    pub laf_max: f64,

    /// Bottom contact area below which `bottom_penalty` is added
    pub bottom_min: f64,

    /// Score added when the bottom contact area is below `bottom_min`
    pub bottom_penalty: f64,

    /// Additive overhang weight (volume-minimizing mode only)
    pub tar_a: f64,
    /// Additive overhang offset (volume-minimizing mode only)
    pub tar_b: f64,
    /// Overhang weight in the numerator
    pub tar_c: f64,
    /// Constant added to both numerator and denominator
    pub tar_d: f64,
    /// Overhang weight in the denominator (volume-minimizing mode only)
    pub tar_e: f64,
    /// Low-angle face area weight
    pub tar_laf: f64,
    /// Weight of the rational term
    pub relative_f: f64,
    /// Contour weight
    pub contour_f: f64,
    /// Bottom contact area weight
    pub bottom_f: f64,
    /// Convex hull bottom contact area weight
    pub bottom_hull_f: f64,
    /// Projected silhouette area weight
    pub tar_proj_area: f64,

    /// Whether the low-angle face term contributes to the score
    pub use_low_angle_face: bool,

    /// Whether the projected silhouette area is computed
    ///
    /// Off by default: the shipped weights were tuned with this feature at 0.
    pub use_projected_area: bool,

    /// Trace the bottom contour from facet edges instead of `4·√bottom`
    ///
    /// Off by default: the square-perimeter estimate is what the shipped
    /// weights were tuned with.
    pub exact_contour: bool,

    /// Length added per bottom facet when `exact_contour` is set
    pub contour_amount: f64,

    /// Selects the volume-minimizing cost model (height-weighted overhangs)
    /// instead of the legacy area-only model
    pub min_volume: bool,

    /// Orient meshes of a batch in parallel
    pub parallel: bool,

    /// Relative distance under which two candidate directions are duplicates
    ///
    /// The default 0.01 corresponds to roughly 0.57° between unit vectors.
    pub duplicate_tolerance: f64,

    /// Number of dominant convex hull directions used as candidates
    pub hull_directions: usize,
}

impl Default for OrientParams {
    fn default() -> Self {
        Self {
            overhang_angle: 60.0,
            first_layer_height: 0.2,
            negligible_face_size: 0.1,
            appearance_face_supp: 3.0,
            laf_min: 0.97,  // cos(14°)
            laf_max: 0.999, // cos(2.6°)
            bottom_min: 0.1,
            bottom_penalty: 100.0,
            tar_a: 0.01,
            tar_b: 1.0,
            tar_c: 0.243_080_704_769_247_26,
            tar_d: 0.628_451_550_816_087_1,
            tar_e: 0.032_157_292_647_062_234,
            tar_laf: 0.001,
            relative_f: 6.610_621_027_964_314,
            contour_f: 0.232_286_232_697_759_97,
            bottom_f: 1.167_152_017_941_474,
            bottom_hull_f: 0.1,
            tar_proj_area: 0.1,
            use_low_angle_face: true,
            use_projected_area: false,
            exact_contour: false,
            contour_amount: 0.0,
            min_volume: true,
            parallel: true,
            duplicate_tolerance: 0.01,
            hull_directions: 10,
        }
    }
}

impl OrientParams {
    /// Create parameters with the default tuning
    pub fn new() -> Self {
        Self::default()
    }

    /// Cosine threshold below which a facet normal counts as overhanging
    ///
    /// `cos(π − overhang_angle)`: for the default 60° this is −0.5.
    pub fn ascent(&self) -> f64 {
        (std::f64::consts::PI - self.overhang_angle.to_radians()).cos()
    }

    /// Copy of these parameters with a per-mesh overhang angle
    pub fn for_overhang_angle(&self, degrees: f64) -> Self {
        Self {
            overhang_angle: degrees,
            ..self.clone()
        }
    }

    /// Set the overhang angle in degrees
    pub fn with_overhang_angle(mut self, degrees: f64) -> Self {
        self.overhang_angle = degrees;
        self
    }

    /// Set the first layer height
    pub fn with_first_layer_height(mut self, height: f64) -> Self {
        self.first_layer_height = height;
        self
    }

    /// Set the appearance face weight
    pub fn with_appearance_face_supp(mut self, supp: f64) -> Self {
        self.appearance_face_supp = supp;
        self
    }

    /// Select the volume-minimizing (`true`) or legacy (`false`) cost model
    pub fn with_min_volume(mut self, min_volume: bool) -> Self {
        self.min_volume = min_volume;
        self
    }

    /// Enable or disable parallel batch orientation
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable or disable the projected silhouette area feature
    pub fn with_projected_area(mut self, enabled: bool) -> Self {
        self.use_projected_area = enabled;
        self
    }

    /// Check every parameter against its valid range
    ///
    /// Public entry points call this before doing any work, so an invalid
    /// configuration is rejected before a single mesh is touched.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.overhang_angle.is_finite()
            && self.overhang_angle > 0.0
            && self.overhang_angle <= 90.0)
        {
            return Err(Error::invalid_parameter(
                "overhang_angle",
                self.overhang_angle,
                "an angle in (0, 90] degrees",
            ));
        }

        let non_negative = [
            ("first_layer_height", self.first_layer_height),
            ("negligible_face_size", self.negligible_face_size),
            ("appearance_face_supp", self.appearance_face_supp),
            ("bottom_min", self.bottom_min),
            ("bottom_penalty", self.bottom_penalty),
            ("tar_a", self.tar_a),
            ("tar_b", self.tar_b),
            ("tar_c", self.tar_c),
            ("tar_e", self.tar_e),
            ("tar_laf", self.tar_laf),
            ("relative_f", self.relative_f),
            ("contour_f", self.contour_f),
            ("bottom_f", self.bottom_f),
            ("bottom_hull_f", self.bottom_hull_f),
            ("tar_proj_area", self.tar_proj_area),
            ("contour_amount", self.contour_amount),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::invalid_parameter(field, value, "a finite value >= 0"));
            }
        }

        // tar_d keeps the cost denominator away from zero
        if !(self.tar_d.is_finite() && self.tar_d > 0.0) {
            return Err(Error::invalid_parameter(
                "tar_d",
                self.tar_d,
                "a finite value > 0",
            ));
        }

        for (field, value) in [("laf_min", self.laf_min), ("laf_max", self.laf_max)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::invalid_parameter(field, value, "a cosine in [0, 1]"));
            }
        }
        if self.laf_min >= self.laf_max {
            return Err(Error::invalid_parameter(
                "laf_min",
                self.laf_min,
                "a value below laf_max",
            ));
        }

        if !(self.duplicate_tolerance.is_finite() && self.duplicate_tolerance > 0.0) {
            return Err(Error::invalid_parameter(
                "duplicate_tolerance",
                self.duplicate_tolerance,
                "a finite value > 0",
            ));
        }

        Ok(())
    }
}
