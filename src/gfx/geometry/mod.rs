//! # Geometry Construction
//!
//! Turns payload faces into indexed triangle buffers ready for GPU upload,
//! and derives the wireframe edge set drawn on top of them.
//!
//! ## Usage
//!
//! ```rust
//! use meshview::gfx::geometry::{build_object_geometry, extract_edges};
//! use meshview::gfx::scene::payload::SceneData;
//!
//! let data = SceneData::parse(r#"{"objects": [{"faces": [
//!     {"vertices": [{"x":0,"y":0,"z":0},{"x":1,"y":0,"z":0},{"x":0,"y":1,"z":0}],
//!      "normal": {"x":0,"y":0,"z":1}}
//! ]}]}"#).unwrap();
//!
//! let geometry = build_object_geometry(&data.objects[0]);
//! assert_eq!(geometry.triangle_count(), 1);
//! assert_eq!(extract_edges(&geometry, 1.0).len(), 3);
//! ```

pub mod builder;
pub mod edges;

pub use builder::build_object_geometry;
pub use edges::{extract_edges, Edge};

use crate::gfx::scene::vertex::Vertex3D;

/// Indexed triangle data for one object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Flat normal of the face each vertex came from
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices, three per triangle
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Interleaves positions and normals into the GPU vertex format.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.positions
            .iter()
            .zip(self.normals.iter())
            .map(|(&position, &normal)| Vertex3D { position, normal })
            .collect()
    }
}
