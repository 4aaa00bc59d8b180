//! Error types for print orientation
//!
//! Orientation itself is defensive: degenerate meshes still produce a result,
//! and cancellation is reported through [`crate::batch::BatchSummary`] rather
//! than as an error. What remains are caller contract violations, which are
//! rejected up front with an error code.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: Configuration errors
//! - **E2xxx**: Mesh geometry errors
//!
//! ## Error Codes
//!
//! - `E1001`: Invalid orientation parameter
//! - `E2001`: Invalid mesh

use thiserror::Error;

/// Result type for orientation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when orienting meshes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An orientation parameter is outside its valid range
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - Negative or non-finite thresholds (layer height, face size, weights)
    /// - Low-angle band with `laf_min >= laf_max`
    /// - Overhang angle outside (0°, 90°]
    ///
    /// **Suggestions**:
    /// - Start from `OrientParams::default()` and adjust single fields
    #[error("[E1001] Invalid orientation parameter: {0}")]
    InvalidParameter(String),

    /// Mesh cannot be used for the requested operation
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Mesh without vertices or triangles
    /// - Triangle indices pointing past the vertex list
    #[error("[E2001] Invalid mesh: {0}")]
    InvalidMesh(String),
}

impl Error {
    /// Create an InvalidParameter error naming the offending field
    ///
    /// # Arguments
    /// * `field` - The parameter name (e.g., "first_layer_height")
    /// * `value` - The rejected value
    /// * `expected` - What the value should satisfy (e.g., "a finite value >= 0")
    ///
    /// # Example
    /// ```
    /// use autoorient::Error;
    ///
    /// let err = Error::invalid_parameter("first_layer_height", -0.2, "a finite value >= 0");
    /// assert!(err.to_string().contains("first_layer_height"));
    /// ```
    pub fn invalid_parameter(field: &str, value: impl std::fmt::Display, expected: &str) -> Self {
        Error::InvalidParameter(format!(
            "'{}' is {}, expected {}",
            field, value, expected
        ))
    }

    /// Create an InvalidMesh error with context about the operation
    ///
    /// # Arguments
    /// * `operation` - What was attempted (e.g., "bounding box")
    /// * `message` - Description of the problem
    pub fn invalid_mesh(operation: &str, message: &str) -> Self {
        Error::InvalidMesh(format!("{}: {}", operation, message))
    }
}
