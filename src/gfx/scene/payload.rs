//! Scene payload format
//!
//! The JSON accepted by the input panel:
//!
//! ```json
//! { "objects": [ { "name": "optional", "faces": [
//!     { "vertices": [{"x":0,"y":0,"z":0}, ...], "normal": {"x":0,"y":1,"z":0} }
//! ] } ] }
//! ```
//!
//! No schema checking happens beyond what deserialization enforces. Faces
//! with the wrong number of vertices are accepted here and dropped by the
//! geometry builder.

use serde::Deserialize;

use crate::error::LoadError;

/// A point in object-local space
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Flat shading direction shared by every vertex of one face.
pub type Normal = Vertex;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Face {
    pub vertices: Vec<Vertex>,
    pub normal: Normal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Object3D {
    #[serde(default)]
    pub name: Option<String>,
    pub faces: Vec<Face>,
}

impl Object3D {
    /// Name shown in the UI: the given name, or `object<index>`.
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("object{}", index),
        }
    }
}

/// Root of a pasted payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneData {
    pub objects: Vec<Object3D>,
}

impl SceneData {
    /// Parses pasted text.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Payload the input panel starts with: a unit cube and a tetrahedron.
pub const SAMPLE_PAYLOAD: &str = r#"{
  "objects": [
    {
      "name": "cube",
      "faces": [
        { "vertices": [{"x":-1,"y":-1,"z":1},{"x":1,"y":-1,"z":1},{"x":1,"y":1,"z":1},{"x":-1,"y":1,"z":1}], "normal": {"x":0,"y":0,"z":1} },
        { "vertices": [{"x":1,"y":-1,"z":-1},{"x":-1,"y":-1,"z":-1},{"x":-1,"y":1,"z":-1},{"x":1,"y":1,"z":-1}], "normal": {"x":0,"y":0,"z":-1} },
        { "vertices": [{"x":-1,"y":-1,"z":-1},{"x":-1,"y":-1,"z":1},{"x":-1,"y":1,"z":1},{"x":-1,"y":1,"z":-1}], "normal": {"x":-1,"y":0,"z":0} },
        { "vertices": [{"x":1,"y":-1,"z":1},{"x":1,"y":-1,"z":-1},{"x":1,"y":1,"z":-1},{"x":1,"y":1,"z":1}], "normal": {"x":1,"y":0,"z":0} },
        { "vertices": [{"x":-1,"y":1,"z":1},{"x":1,"y":1,"z":1},{"x":1,"y":1,"z":-1},{"x":-1,"y":1,"z":-1}], "normal": {"x":0,"y":1,"z":0} },
        { "vertices": [{"x":-1,"y":-1,"z":-1},{"x":1,"y":-1,"z":-1},{"x":1,"y":-1,"z":1},{"x":-1,"y":-1,"z":1}], "normal": {"x":0,"y":-1,"z":0} }
      ]
    },
    {
      "faces": [
        { "vertices": [{"x":3,"y":0,"z":0},{"x":4,"y":0,"z":0},{"x":3.5,"y":0,"z":1}], "normal": {"x":0,"y":-1,"z":0} },
        { "vertices": [{"x":3,"y":0,"z":0},{"x":3.5,"y":1,"z":0.5},{"x":4,"y":0,"z":0}], "normal": {"x":0,"y":0.45,"z":-0.89} },
        { "vertices": [{"x":4,"y":0,"z":0},{"x":3.5,"y":1,"z":0.5},{"x":3.5,"y":0,"z":1}], "normal": {"x":0.8,"y":0.4,"z":0.4} },
        { "vertices": [{"x":3.5,"y":0,"z":1},{"x":3.5,"y":1,"z":0.5},{"x":3,"y":0,"z":0}], "normal": {"x":-0.8,"y":0.4,"z":0.4} }
      ]
    }
  ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let data = SceneData::parse(r#"{"objects": []}"#).unwrap();
        assert!(data.objects.is_empty());
    }

    #[test]
    fn test_parse_named_and_unnamed() {
        let text = r#"{"objects": [
            {"name": "a", "faces": []},
            {"faces": [{"vertices": [{"x":0,"y":0,"z":0}], "normal": {"x":0,"y":1,"z":0}}]}
        ]}"#;
        let data = SceneData::parse(text).unwrap();
        assert_eq!(data.objects.len(), 2);
        assert_eq!(data.objects[0].display_name(0), "a");
        assert_eq!(data.objects[1].display_name(1), "object1");
        assert_eq!(data.objects[1].faces[0].normal, Vertex::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_parse_rejects_bad_text() {
        assert!(SceneData::parse("{not json").is_err());
        assert!(SceneData::parse("[]").is_err());
        assert!(SceneData::parse(r#"{"objects": [{"name": "x"}]}"#).is_err());
        assert!(SceneData::parse(r#"{"objects": [{"faces": [{"vertices": []}]}]}"#).is_err());
    }

    #[test]
    fn test_sample_payload_parses() {
        let data = SceneData::parse(SAMPLE_PAYLOAD).unwrap();
        assert_eq!(data.objects.len(), 2);
        assert_eq!(data.objects[0].faces.len(), 6);
        assert_eq!(data.objects[1].name, None);
    }
}
