//! Shared mesh builders for integration tests

#![allow(dead_code)]

use autoorient::{Mesh, Triangle, Vertex};

/// Outward-wound triangles of a box with corners numbered as in [`cuboid`]
const BOX_TRIANGLES: [[usize; 3]; 12] = [
    // Bottom face (z = min)
    [0, 2, 1],
    [0, 3, 2],
    // Top face (z = max)
    [4, 5, 6],
    [4, 6, 7],
    // Front face (y = min)
    [0, 1, 5],
    [0, 5, 4],
    // Back face (y = max)
    [3, 7, 6],
    [3, 6, 2],
    // Left face (x = min)
    [0, 4, 7],
    [0, 7, 3],
    // Right face (x = max)
    [1, 2, 6],
    [1, 6, 5],
];

/// Axis-aligned box `[0, x] × [0, y] × [0, z]`
pub fn cuboid(x: f64, y: f64, z: f64) -> Mesh {
    cuboid_at(x, y, z, 0.0, 0.0, 0.0)
}

/// Axis-aligned box with its minimum corner at `(ox, oy, oz)`
pub fn cuboid_at(x: f64, y: f64, z: f64, ox: f64, oy: f64, oz: f64) -> Mesh {
    let mut mesh = Mesh::with_capacity(8, 12);
    for (px, py, pz) in [
        (0.0, 0.0, 0.0),
        (x, 0.0, 0.0),
        (x, y, 0.0),
        (0.0, y, 0.0),
        (0.0, 0.0, z),
        (x, 0.0, z),
        (x, y, z),
        (0.0, y, z),
    ] {
        mesh.vertices.push(Vertex::new(px + ox, py + oy, pz + oz));
    }
    for [a, b, c] in BOX_TRIANGLES {
        mesh.triangles.push(Triangle::new(a, b, c));
    }
    mesh
}

/// Unit cube resting on the plane z = 0
pub fn unit_cube() -> Mesh {
    cuboid(1.0, 1.0, 1.0)
}

/// 1 × 1 × 10 pillar standing on its small face
pub fn pillar() -> Mesh {
    cuboid(1.0, 1.0, 10.0)
}

/// Table-like part: a 10 × 10 × 1 slab on four 1 × 1 × 4 legs
///
/// Standing on its legs leaves the slab underside as a large overhang;
/// flipped upside down the slab rests flat on the bed.
pub fn table() -> Mesh {
    let mut mesh = Mesh::new();
    append(&mut mesh, &cuboid_at(10.0, 10.0, 1.0, 0.0, 0.0, 4.0));
    for (ox, oy) in [(0.0, 0.0), (9.0, 0.0), (0.0, 9.0), (9.0, 9.0)] {
        append(&mut mesh, &cuboid_at(1.0, 1.0, 4.0, ox, oy, 0.0));
    }
    mesh
}

/// Copy all vertices and triangles of `part` into `mesh`
pub fn append(mesh: &mut Mesh, part: &Mesh) {
    let offset = mesh.vertices.len();
    mesh.vertices.extend_from_slice(&part.vertices);
    for triangle in &part.triangles {
        let mut triangle = triangle.clone();
        triangle.v1 += offset;
        triangle.v2 += offset;
        triangle.v3 += offset;
        mesh.triangles.push(triangle);
    }
}

/// Mark every triangle of `mesh` whose corners all satisfy `select` as an
/// exterior appearance face
pub fn mark_appearance(mesh: &mut Mesh, select: impl Fn(&Vertex) -> bool) {
    for i in 0..mesh.triangles.len() {
        let [a, b, c] = mesh.triangles[i].indices();
        if [a, b, c].iter().all(|&v| select(&mesh.vertices[v])) {
            mesh.triangles[i].face_type = autoorient::FaceType::ExteriorAppearance;
        }
    }
}

/// Lowest and highest z of a mesh
pub fn z_range(mesh: &Mesh) -> (f64, f64) {
    mesh.vertices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v.z), hi.max(v.z))
        })
}
