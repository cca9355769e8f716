//! Face list to triangle buffer conversion

use super::GeometryData;
use crate::gfx::scene::payload::{Face, Object3D};

/// Triangles covering a quad, relative to its first vertex.
const QUAD_TRIANGLES: [u32; 6] = [0, 1, 2, 0, 2, 3];
const TRIANGLE: [u32; 3] = [0, 1, 2];

/// Builds the indexed triangle buffer for one object.
///
/// Quads are fan-split along their 0-2 diagonal, so they are assumed convex
/// and consistently wound. Faces with anything other than 3 or 4 vertices
/// contribute nothing.
pub fn build_object_geometry(object: &Object3D) -> GeometryData {
    let mut data = GeometryData::new();
    let mut offset: u32 = 0;

    for (face_index, face) in object.faces.iter().enumerate() {
        let pattern: &[u32] = match face.vertices.len() {
            4 => &QUAD_TRIANGLES,
            3 => &TRIANGLE,
            count => {
                log::trace!(
                    "Skipping face {} with {} vertices (expected 3 or 4)",
                    face_index,
                    count
                );
                continue;
            }
        };

        push_face(&mut data, face);
        data.indices.extend(pattern.iter().map(|i| offset + i));
        offset += face.vertices.len() as u32;
    }

    data
}

fn push_face(data: &mut GeometryData, face: &Face) {
    let normal = face.normal.to_array();
    for vertex in &face.vertices {
        data.positions.push(vertex.to_array());
        data.normals.push(normal);
    }
}
