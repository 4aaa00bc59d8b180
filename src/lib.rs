//! # autoorient
//!
//! Automatic print orientation for triangle meshes.
//!
//! Before slicing, a part can be rotated so that it needs as little support
//! material as possible and rests stably on the build plate. This crate picks
//! that rotation: it scores a set of candidate "up" directions with an
//! empirically tuned unprintability cost and returns the cheapest one,
//! together with the rotation that realises it.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Candidate directions from dominant facet clusters of the mesh and its
//!   convex hull, plus a fixed set covering the sphere
//! - Two cost models: volume-minimizing (height-weighted overhangs) and legacy
//! - Appearance faces weighted up in overhang accounting
//! - Batch orientation with progress reporting and cooperative cancellation,
//!   parallel across meshes with the `parallel` feature (on by default)
//! - Optional `serde` support for parameters and results
//!
//! ## Example
//!
//! ```
//! use autoorient::{orient_mesh, apply_orientation, Mesh, OrientParams, Triangle, Vertex};
//!
//! # fn main() -> Result<(), autoorient::Error> {
//! // A 1 × 1 × 10 pillar standing on its small end
//! let mut mesh = Mesh::new();
//! for &(x, y, z) in &[
//!     (0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (1.0, 1.0, 0.0), (0.0, 1.0, 0.0),
//!     (0.0, 0.0, 10.0), (1.0, 0.0, 10.0), (1.0, 1.0, 10.0), (0.0, 1.0, 10.0),
//! ] {
//!     mesh.vertices.push(Vertex::new(x, y, z));
//! }
//! for [a, b, c] in [
//!     [0, 2, 1], [0, 3, 2], [4, 5, 6], [4, 6, 7], [0, 1, 5], [0, 5, 4],
//!     [3, 7, 6], [3, 6, 2], [0, 4, 7], [0, 7, 3], [1, 2, 6], [1, 6, 5],
//! ] {
//!     mesh.triangles.push(Triangle::new(a, b, c));
//! }
//!
//! let orientation = orient_mesh(&mesh, &OrientParams::default())?;
//! let oriented = apply_orientation(&mesh, &orientation);
//!
//! // It is laid on its side
//! let height = oriented.vertices.iter().map(|v| v.z).fold(0.0, f64::max);
//! assert!((height - 1.0).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod error;
pub mod mesh_ops;
pub mod model;
pub mod orient;
pub mod params;
pub mod rotation;

pub use batch::{BatchSummary, OrientItem, orient_meshes};
pub use error::{Error, Result};
pub use model::{FaceType, Mesh, Triangle, Vertex};
pub use orient::{
    AutoOrienter, CostItems, Evaluation, OrientOutcome, evaluate_direction, orient_mesh,
};
pub use params::OrientParams;
pub use rotation::{MeshOrientation, apply_orientation, rotation_from_two_vectors};
