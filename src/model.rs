//! Triangle mesh data consumed by the orientation engine

use nalgebra::Vector3;

/// A vertex in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Position as a vector
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for Vertex {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Surface classification of a triangle
///
/// Appearance faces are the visible, cosmetic surfaces of a part. Support
/// material touching them leaves marks, so the orientation engine weights
/// their overhang area up by `OrientParams::appearance_face_supp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FaceType {
    /// Ordinary surface
    #[default]
    Regular,
    /// Exterior cosmetic surface
    ExteriorAppearance,
}

/// A triangle defined by three vertex indices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Index of first vertex
    pub v1: usize,
    /// Index of second vertex
    pub v2: usize,
    /// Index of third vertex
    pub v3: usize,
    /// Surface classification
    pub face_type: FaceType,
}

impl Triangle {
    /// Create a new regular triangle
    pub fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self {
            v1,
            v2,
            v3,
            face_type: FaceType::Regular,
        }
    }

    /// Create a new triangle flagged as an exterior appearance face
    pub fn appearance(v1: usize, v2: usize, v3: usize) -> Self {
        Self {
            v1,
            v2,
            v3,
            face_type: FaceType::ExteriorAppearance,
        }
    }

    /// Whether this triangle is an exterior appearance face
    pub fn is_appearance(&self) -> bool {
        self.face_type == FaceType::ExteriorAppearance
    }

    /// Vertex indices in winding order
    pub fn indices(&self) -> [usize; 3] {
        [self.v1, self.v2, self.v3]
    }
}

/// A triangle mesh
///
/// The orientation engine only ever borrows a mesh; it never stores or
/// modifies one.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// List of vertices
    pub vertices: Vec<Vertex>,
    /// List of triangles
    pub triangles: Vec<Triangle>,
    /// Cached volume as reported by the mesh's producer, if any
    ///
    /// Only trusted when strictly positive; otherwise the volume is
    /// recomputed from the triangles.
    pub volume: Option<f64>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            volume: None,
        }
    }

    /// Create a new mesh with pre-allocated capacity
    ///
    /// This is useful for performance when the number of vertices and triangles
    /// is known in advance, as it avoids multiple reallocations.
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
            volume: None,
        }
    }

    /// Create a mesh from vertex and triangle lists
    pub fn from_parts(vertices: Vec<Vertex>, triangles: Vec<Triangle>) -> Self {
        Self {
            vertices,
            triangles,
            volume: None,
        }
    }

    /// Whether the mesh has no triangles or no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }

    /// Positions of a triangle's corners, or `None` if an index is out of bounds
    pub fn triangle_positions(&self, triangle: &Triangle) -> Option<[Vector3<f64>; 3]> {
        let [a, b, c] = triangle.indices();
        Some([
            self.vertices.get(a)?.to_vector(),
            self.vertices.get(b)?.to_vector(),
            self.vertices.get(c)?.to_vector(),
        ])
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
