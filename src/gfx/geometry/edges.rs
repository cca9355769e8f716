//! Wireframe edge extraction
//!
//! Produces the outline drawn over each object: boundary edges plus every
//! shared edge whose adjacent triangles meet at more than a threshold angle.
//! Edges are index pairs into the same vertex buffer as the triangles, so
//! the overlay needs no vertex data of its own.

use std::collections::HashMap;

use cgmath::{InnerSpace, Vector3};

use super::GeometryData;

/// A line segment as two vertex indices
pub type Edge = [u32; 2];

/// Positions closer than this are welded together when matching edges.
const WELD_PRECISION: f32 = 1e4;

type WeldKey = [i64; 3];

struct OpenEdge {
    edge: Edge,
    normal: Vector3<f32>,
}

/// Extracts outline edges from an indexed triangle buffer.
///
/// Vertices are matched by position, not index, because flat-shaded faces
/// duplicate their corners. Degenerate triangles are ignored.
pub fn extract_edges(geometry: &GeometryData, threshold_deg: f32) -> Vec<Edge> {
    let cos_threshold = threshold_deg.to_radians().cos();
    let welded: Vec<WeldKey> = geometry.positions.iter().map(|p| weld_key(*p)).collect();

    let mut open: HashMap<(WeldKey, WeldKey), OpenEdge> = HashMap::new();
    // Keeps output order independent of hash iteration.
    let mut open_order: Vec<(WeldKey, WeldKey)> = Vec::new();
    let mut edges = Vec::new();

    for triangle in geometry.triangles() {
        let Some(normal) = triangle_normal(geometry, triangle) else {
            continue;
        };
        if welded[triangle[0] as usize] == welded[triangle[1] as usize]
            || welded[triangle[1] as usize] == welded[triangle[2] as usize]
            || welded[triangle[2] as usize] == welded[triangle[0] as usize]
        {
            continue;
        }

        for j in 0..3 {
            let a = triangle[j];
            let b = triangle[(j + 1) % 3];
            let (ka, kb) = (welded[a as usize], welded[b as usize]);
            let key = if ka <= kb { (ka, kb) } else { (kb, ka) };

            match open.remove(&key) {
                Some(shared) => {
                    if shared.normal.dot(normal) <= cos_threshold {
                        edges.push(shared.edge);
                    }
                }
                None => {
                    open.insert(key, OpenEdge { edge: [a, b], normal });
                    open_order.push(key);
                }
            }
        }
    }

    // Whatever is still open touches a single triangle: a boundary edge.
    for key in open_order {
        if let Some(boundary) = open.remove(&key) {
            edges.push(boundary.edge);
        }
    }

    edges
}

fn weld_key(position: [f32; 3]) -> WeldKey {
    position.map(|c| (c * WELD_PRECISION).round() as i64)
}

/// Unit normal, or `None` when the corner angle at `a` is numerically zero.
///
/// The cutoff is relative to the side lengths, so it holds at any scale.
fn triangle_normal(geometry: &GeometryData, triangle: [u32; 3]) -> Option<Vector3<f32>> {
    let [a, b, c] = triangle.map(|i| Vector3::from(geometry.positions[i as usize]));
    let (ab, ac) = (b - a, c - a);
    let normal = ab.cross(ac);
    let scale = ab.magnitude2() * ac.magnitude2();
    if normal.magnitude2() <= scale * f32::EPSILON * f32::EPSILON {
        return None;
    }
    Some(normal.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::build_object_geometry;
    use crate::gfx::scene::payload::SceneData;

    fn geometry_of(json: &str) -> GeometryData {
        let data = SceneData::parse(json).unwrap();
        build_object_geometry(&data.objects[0])
    }

    #[test]
    fn test_single_triangle_has_three_edges() {
        let geometry = geometry_of(
            r#"{"objects": [{"faces": [{"vertices": [{"x":0,"y":0,"z":0},{"x":1,"y":0,"z":0},{"x":0,"y":1,"z":0}], "normal": {"x":0,"y":0,"z":1}}]}]}"#,
        );
        let edges = extract_edges(&geometry, 1.0);
        assert_eq!(edges, vec![[0, 1], [1, 2], [2, 0]]);
    }

    #[test]
    fn test_flat_quad_hides_diagonal() {
        let geometry = geometry_of(
            r#"{"objects": [{"faces": [{"vertices": [{"x":0,"y":0,"z":0},{"x":1,"y":0,"z":0},{"x":1,"y":1,"z":0},{"x":0,"y":1,"z":0}], "normal": {"x":0,"y":0,"z":1}}]}]}"#,
        );
        let edges = extract_edges(&geometry, 1.0);
        assert_eq!(edges.len(), 4);
        assert!(!edges.contains(&[0, 2]) && !edges.contains(&[2, 0]));
    }

    #[test]
    fn test_cube_has_twelve_edges() {
        let data = SceneData::parse(crate::gfx::scene::payload::SAMPLE_PAYLOAD).unwrap();
        let cube = build_object_geometry(&data.objects[0]);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(extract_edges(&cube, 1.0).len(), 12);
    }

    #[test]
    fn test_folded_quads_keep_crease() {
        // Two quads sharing the x=1 edge, folded by 90 degrees.
        let geometry = geometry_of(
            r#"{"objects": [{"faces": [
                {"vertices": [{"x":0,"y":0,"z":0},{"x":1,"y":0,"z":0},{"x":1,"y":1,"z":0},{"x":0,"y":1,"z":0}], "normal": {"x":0,"y":0,"z":1}},
                {"vertices": [{"x":1,"y":0,"z":0},{"x":1,"y":0,"z":-1},{"x":1,"y":1,"z":-1},{"x":1,"y":1,"z":0}], "normal": {"x":1,"y":0,"z":0}}
            ]}]}"#,
        );
        assert_eq!(extract_edges(&geometry, 1.0).len(), 7);
        // With a threshold above the fold angle the crease disappears.
        assert_eq!(extract_edges(&geometry, 91.0).len(), 6);
    }

    #[test]
    fn test_degenerate_triangles_ignored() {
        let geometry = geometry_of(
            r#"{"objects": [{"faces": [{"vertices": [{"x":0,"y":0,"z":0},{"x":1,"y":0,"z":0},{"x":2,"y":0,"z":0}], "normal": {"x":0,"y":0,"z":1}}]}]}"#,
        );
        assert!(extract_edges(&geometry, 1.0).is_empty());
    }

    #[test]
    fn test_small_triangle_keeps_edges() {
        let geometry = geometry_of(
            r#"{"objects": [{"faces": [{"vertices": [{"x":0,"y":0,"z":0},{"x":0.0003,"y":0,"z":0},{"x":0,"y":0.0003,"z":0}], "normal": {"x":0,"y":0,"z":1}}]}]}"#,
        );
        assert_eq!(extract_edges(&geometry, 1.0).len(), 3);
    }

    #[test]
    fn test_small_flat_quad_hides_diagonal() {
        let geometry = geometry_of(
            r#"{"objects": [{"faces": [{"vertices": [{"x":0,"y":0,"z":0},{"x":0.0003,"y":0,"z":0},{"x":0.0003,"y":0.0003,"z":0},{"x":0,"y":0.0003,"z":0}], "normal": {"x":0,"y":0,"z":1}}]}]}"#,
        );
        assert_eq!(extract_edges(&geometry, 1.0).len(), 4);
    }

    #[test]
    fn test_empty_geometry() {
        assert!(extract_edges(&GeometryData::new(), 1.0).is_empty());
    }
}
