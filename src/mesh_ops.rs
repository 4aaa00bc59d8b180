//! Triangle mesh operations
//!
//! This module provides the geometric services the orientation engine relies on:
//! - Face normals and facet areas
//! - Volume computation
//! - Bounding box, bounding radius and surface area
//! - Convex hull construction (via parry3d)
//! - Rigid rotation and bed placement
//!
//! Triangles with out-of-bounds vertex indices are skipped by every function
//! here rather than causing a panic.

use crate::error::{Error, Result};
use crate::model::{Mesh, Triangle, Vertex};
use nalgebra::{Matrix3, Vector3};
use tracing::warn;

/// An axis-aligned bounding box represented as (min_point, max_point)
pub type BoundingBox = (Vector3<f64>, Vector3<f64>);

/// Relative extent below which a point set is treated as flat
const FLAT_TOLERANCE: f64 = 1e-9;

/// Compute the signed volume of a mesh using the divergence theorem
///
/// Returns the signed volume in cubic units. For a watertight mesh with correct winding order,
/// the volume should be positive. Negative volume indicates inverted triangles.
pub fn compute_mesh_signed_volume(mesh: &Mesh) -> f64 {
    let mut volume = 0.0_f64;
    for triangle in &mesh.triangles {
        let Some([v1, v2, v3]) = mesh.triangle_positions(triangle) else {
            continue;
        };
        volume += v1.dot(&v2.cross(&v3));
    }
    volume / 6.0
}

/// Compute the unsigned volume of a mesh
///
/// Returns the absolute value of [`compute_mesh_signed_volume`], so meshes
/// with consistently inverted winding still report their enclosed volume.
pub fn compute_mesh_volume(mesh: &Mesh) -> f64 {
    compute_mesh_signed_volume(mesh).abs()
}

/// Compute the axis-aligned bounding box (AABB) of a mesh
///
/// Returns the minimum and maximum corners of the bounding box.
///
/// # Errors
/// Returns [`Error::InvalidMesh`] when the mesh has no vertices.
pub fn compute_mesh_aabb(mesh: &Mesh) -> Result<BoundingBox> {
    let mut vertices = mesh.vertices.iter().map(Vertex::to_vector);
    let Some(first) = vertices.next() else {
        return Err(Error::invalid_mesh(
            "bounding box",
            "Cannot compute bounding box of empty mesh",
        ));
    };

    Ok(vertices.fold((first, first), |(min, max), v| {
        (min.inf(&v), max.sup(&v))
    }))
}

/// Radius of the mesh bounding box (half its diagonal)
///
/// Returns 0 for an empty mesh.
pub fn bounding_radius(mesh: &Mesh) -> f64 {
    compute_mesh_aabb(mesh)
        .map(|(min, max)| 0.5 * (max - min).norm())
        .unwrap_or(0.0)
}

/// Calculate the unit normal of a triangle face
///
/// The normal is computed using the cross product of two edges of the triangle,
/// following the right-hand rule for the winding order. If the triangle is
/// degenerate (zero area), returns a zero vector.
///
/// # Example
/// ```
/// use autoorient::mesh_ops::calculate_face_normal;
/// use nalgebra::Vector3;
///
/// let normal = calculate_face_normal(
///     &Vector3::new(0.0, 0.0, 0.0),
///     &Vector3::new(1.0, 0.0, 0.0),
///     &Vector3::new(0.0, 1.0, 0.0),
/// );
/// assert_eq!(normal, Vector3::new(0.0, 0.0, 1.0));
/// ```
pub fn calculate_face_normal(
    v0: &Vector3<f64>,
    v1: &Vector3<f64>,
    v2: &Vector3<f64>,
) -> Vector3<f64> {
    let cross = (v1 - v0).cross(&(v2 - v0));
    let magnitude = cross.norm();
    if magnitude > 0.0 {
        cross / magnitude
    } else {
        Vector3::zeros()
    }
}

/// Area of the triangle spanned by three points
pub fn facet_area(v0: &Vector3<f64>, v1: &Vector3<f64>, v2: &Vector3<f64>) -> f64 {
    0.5 * (v1 - v0).cross(&(v2 - v0)).norm()
}

/// Total surface area of all valid triangles
pub fn compute_surface_area(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .filter_map(|t| mesh.triangle_positions(t))
        .map(|[a, b, c]| facet_area(&a, &b, &c))
        .sum()
}

/// Build the convex hull of a mesh's vertices
///
/// The hull is computed with parry3d's quickhull. Hull triangles are re-wound
/// so that every face normal points away from the hull centroid.
///
/// Inputs that do not span a volume (fewer than four vertices, or all
/// vertices collinear/coplanar) yield an empty mesh; quickhull is not run on
/// them.
pub fn compute_convex_hull(mesh: &Mesh) -> Mesh {
    let positions: Vec<Vector3<f64>> = mesh.vertices.iter().map(Vertex::to_vector).collect();
    if !spans_volume(&positions) {
        warn!(
            vertices = positions.len(),
            "Skipping convex hull of degenerate point set"
        );
        return Mesh::new();
    }

    let points: Vec<parry3d::math::Vector> = positions
        .iter()
        .map(|p| parry3d::math::Vector::new(p.x as f32, p.y as f32, p.z as f32))
        .collect();

    let (hull_points, hull_indices) = parry3d::transformation::convex_hull(&points);

    let vertices: Vec<Vertex> = hull_points
        .iter()
        .map(|p| Vertex::new(p.x as f64, p.y as f64, p.z as f64))
        .collect();

    if vertices.is_empty() {
        return Mesh::new();
    }

    let centroid = vertices
        .iter()
        .fold(Vector3::zeros(), |acc, v| acc + v.to_vector())
        / vertices.len() as f64;

    let mut hull = Mesh::with_capacity(vertices.len(), hull_indices.len());
    hull.vertices = vertices;

    for [a, b, c] in hull_indices {
        let mut triangle = Triangle::new(a as usize, b as usize, c as usize);
        let Some([p0, p1, p2]) = hull.triangle_positions(&triangle) else {
            continue;
        };
        let normal = (p1 - p0).cross(&(p2 - p0));
        if normal.dot(&(p0 - centroid)) < 0.0 {
            std::mem::swap(&mut triangle.v2, &mut triangle.v3);
        }
        hull.triangles.push(triangle);
    }

    hull.volume = Some(compute_mesh_volume(&hull));
    hull
}

/// Whether a point set encloses a non-zero volume
///
/// Greedily picks the first point, the point farthest from it, the point
/// farthest from that line, and finally the point farthest from that plane.
fn spans_volume(points: &[Vector3<f64>]) -> bool {
    if points.len() < 4 {
        return false;
    }

    let p0 = points[0];

    let (d1, p1) = farthest_point(points, |p| (p - p0).norm());
    if d1 <= 0.0 {
        return false;
    }
    let scale = d1;
    let axis = (p1 - p0) / d1;

    let (d2, p2) = farthest_point(points, |p| (p - p0).cross(&axis).norm());
    if d2 <= FLAT_TOLERANCE * scale {
        return false;
    }
    let normal = (p1 - p0).cross(&(p2 - p0)).normalize();

    let (d3, _) = farthest_point(points, |p| (p - p0).dot(&normal).abs());
    d3 > FLAT_TOLERANCE * scale
}

fn farthest_point(
    points: &[Vector3<f64>],
    score: impl Fn(&Vector3<f64>) -> f64,
) -> (f64, Vector3<f64>) {
    points
        .iter()
        .map(|p| (score(p), *p))
        .fold((0.0, points[0]), |best, cur| if cur.0 > best.0 { cur } else { best })
}

/// Rotate every vertex of a mesh about the origin
///
/// Triangles, face types and the cached volume are carried over unchanged.
pub fn rotate_mesh(mesh: &Mesh, rotation: &Matrix3<f64>) -> Mesh {
    let mut result = mesh.clone();
    for vertex in &mut result.vertices {
        *vertex = Vertex::from(rotation * vertex.to_vector());
    }
    result
}

/// Place a mesh on the build plate (translate so its minimum Z is 0)
pub fn place_on_bed(mesh: &Mesh) -> Mesh {
    let min_z = mesh
        .vertices
        .iter()
        .map(|v| v.z)
        .fold(f64::INFINITY, f64::min);

    let mut result = mesh.clone();
    if min_z.is_finite() {
        for vertex in &mut result.vertices {
            vertex.z -= min_z;
        }
    }
    result
}
