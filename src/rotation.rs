//! Turning a chosen "up" direction into a rotation
//!
//! The engine reports a direction in the mesh's own frame. The rotation that
//! carries it onto `+Z` is what gets applied to the part before slicing.

use std::f64::consts::PI;

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};

use crate::mesh_ops::rotate_mesh;
use crate::model::Mesh;
use crate::orient::CostItems;

pub use crate::mesh_ops::place_on_bed;

/// Shortest rotation taking `from` onto `to`
///
/// Returns `(axis, angle, matrix)` with a unit axis and an angle in
/// radians. Parallel inputs (and zero vectors) give the identity with the
/// X axis and angle 0. Anti-parallel inputs give a half turn about an
/// axis perpendicular to `from`.
///
/// # Example
///
/// ```
/// use autoorient::rotation::rotation_from_two_vectors;
/// use nalgebra::Vector3;
///
/// let (axis, angle, matrix) =
///     rotation_from_two_vectors(&Vector3::x(), &Vector3::z());
/// assert!((angle - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// assert!((axis - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-12);
/// assert!((matrix * Vector3::x() - Vector3::z()).norm() < 1e-12);
/// ```
pub fn rotation_from_two_vectors(
    from: &Vector3<f64>,
    to: &Vector3<f64>,
) -> (Vector3<f64>, f64, Matrix3<f64>) {
    let identity = (Vector3::x(), 0.0, Matrix3::identity());
    if from.norm() <= f64::EPSILON || to.norm() <= f64::EPSILON {
        return identity;
    }

    let rotation = match Rotation3::rotation_between(from, to) {
        Some(rotation) => rotation,
        None => {
            // Anti-parallel: any axis perpendicular to `from` works
            let mut axis = from.cross(&Vector3::x());
            if axis.norm() < 1e-6 * from.norm() {
                axis = from.cross(&Vector3::y());
            }
            let axis = Unit::new_normalize(axis);
            return (axis.into_inner(), PI, *Rotation3::from_axis_angle(&axis, PI).matrix());
        }
    };

    match rotation.axis_angle() {
        Some((axis, angle)) => (axis.into_inner(), angle, *rotation.matrix()),
        None => identity,
    }
}

/// Roll, pitch and yaw of a rotation matrix, in radians
pub fn extract_euler_angles(rotation: &Matrix3<f64>) -> Vector3<f64> {
    let (roll, pitch, yaw) = Rotation3::from_matrix_unchecked(*rotation).euler_angles();
    Vector3::new(roll, pitch, yaw)
}

/// Chosen orientation of one mesh and the rotation that realises it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshOrientation {
    /// Winning "up" direction in the mesh's original frame
    pub up: Vector3<f64>,
    /// Unit rotation axis
    pub axis: Vector3<f64>,
    /// Rotation angle in radians
    pub angle: f64,
    /// Rotation matrix taking `up` onto `+Z`
    pub rotation: Matrix3<f64>,
    /// Roll, pitch and yaw of `rotation`
    pub euler_angles: Vector3<f64>,
    /// Features and score of the winning direction
    pub costs: CostItems,
}

impl MeshOrientation {
    /// Derive the rotation for a chosen "up" direction
    pub fn from_up(up: Vector3<f64>, costs: CostItems) -> Self {
        let (axis, angle, rotation) = rotation_from_two_vectors(&up, &Vector3::z());
        Self {
            up,
            axis,
            angle,
            rotation,
            euler_angles: extract_euler_angles(&rotation),
            costs,
        }
    }

    /// Whether the mesh is already in this orientation
    pub fn is_identity(&self) -> bool {
        self.angle == 0.0
    }
}

/// Rotate a mesh into its chosen orientation and drop it onto the bed
pub fn apply_orientation(mesh: &Mesh, orientation: &MeshOrientation) -> Mesh {
    place_on_bed(&rotate_mesh(mesh, &orientation.rotation))
}
