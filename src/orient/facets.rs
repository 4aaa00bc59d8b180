//! Columnar per-facet buffers

use nalgebra::Vector3;
use tracing::warn;

use super::candidates::NormalKey;
use crate::mesh_ops::{calculate_face_normal, facet_area};
use crate::model::Mesh;

/// Struct-of-arrays view of a mesh's facets
///
/// Built once per mesh (and once per convex hull) and shared by every
/// candidate evaluation. Negligible facets keep their corners so they still
/// take part in the lowest-point search, but carry a zero area and a zero
/// normal so they contribute nothing to any area sum.
#[derive(Debug, Clone, Default)]
pub(crate) struct FacetTable {
    /// Quantized normal bucket per facet
    pub keys: Vec<NormalKey>,
    /// Quantized normal per facet (`keys[i].direction()`)
    pub normals: Vec<Vector3<f64>>,
    /// Facet area, zero for negligible facets
    pub areas: Vec<f64>,
    /// Exterior appearance flag per facet
    pub appearance: Vec<bool>,
    /// Corner positions per facet
    pub corners: Vec<[Vector3<f64>; 3]>,
}

impl FacetTable {
    /// Gather facet data from a mesh
    ///
    /// Facets with an area below `negligible_face_size` are kept as
    /// zero-area entries (a size of 0 disables the filter). Triangles that
    /// reference missing vertices are dropped.
    pub fn from_mesh(mesh: &Mesh, negligible_face_size: f64) -> Self {
        let count = mesh.triangles.len();
        let mut table = Self {
            keys: Vec::with_capacity(count),
            normals: Vec::with_capacity(count),
            areas: Vec::with_capacity(count),
            appearance: Vec::with_capacity(count),
            corners: Vec::with_capacity(count),
        };

        let mut invalid = 0usize;
        for triangle in &mesh.triangles {
            let Some(corners) = mesh.triangle_positions(triangle) else {
                invalid += 1;
                continue;
            };
            let [a, b, c] = corners;
            let area = facet_area(&a, &b, &c);

            let (key, area) = if negligible_face_size > 0.0 && area < negligible_face_size {
                (NormalKey::ZERO, 0.0)
            } else {
                (NormalKey::quantize(&calculate_face_normal(&a, &b, &c)), area)
            };

            table.keys.push(key);
            table.normals.push(key.direction());
            table.areas.push(area);
            table.appearance.push(triangle.is_appearance());
            table.corners.push(corners);
        }

        if invalid > 0 {
            warn!(
                skipped = invalid,
                "Ignoring triangles with out-of-bounds vertex indices"
            );
        }

        table
    }

    /// Number of facets
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    /// Whether the table holds no facets
    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    /// Number of facets flagged as appearance faces
    pub fn appearance_count(&self) -> usize {
        self.appearance.iter().filter(|&&a| a).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Triangle, Vertex};

    fn two_triangles() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.vertices.push(Vertex::new(0.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::new(2.0, 0.0, 0.0));
        mesh.vertices.push(Vertex::new(0.0, 2.0, 0.0));
        mesh.vertices.push(Vertex::new(0.1, 0.0, 1.0));
        mesh.vertices.push(Vertex::new(0.0, 0.1, 1.0));
        // Large facet pointing +Z
        mesh.triangles.push(Triangle::appearance(0, 1, 2));
        // Sliver with area ~0.07
        mesh.triangles.push(Triangle::new(3, 0, 4));
        mesh
    }

    #[test]
    fn test_negligible_facets_keep_corners() {
        let table = FacetTable::from_mesh(&two_triangles(), 0.1);

        assert_eq!(table.len(), 2);
        assert!((table.areas[0] - 2.0).abs() < 1e-12);
        assert_eq!(table.normals[0], Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(table.areas[1], 0.0);
        assert_eq!(table.keys[1], NormalKey::ZERO);
        assert_eq!(table.normals[1], Vector3::zeros());
        assert_eq!(table.corners[1][0], Vector3::new(0.1, 0.0, 1.0));
        assert_eq!(table.appearance_count(), 1);
    }

    #[test]
    fn test_zero_threshold_keeps_everything() {
        let table = FacetTable::from_mesh(&two_triangles(), 0.0);
        assert!(table.areas[1] > 0.0);
        assert_ne!(table.keys[1], NormalKey::ZERO);
    }

    #[test]
    fn test_invalid_triangles_are_dropped() {
        let mut mesh = two_triangles();
        mesh.triangles.push(Triangle::new(0, 1, 42));

        let table = FacetTable::from_mesh(&mesh, 0.1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.areas.len(), 2);
        assert_eq!(table.appearance.len(), 2);
    }

    #[test]
    fn test_empty_mesh() {
        let table = FacetTable::from_mesh(&Mesh::new(), 0.1);
        assert!(table.is_empty());
    }
}
