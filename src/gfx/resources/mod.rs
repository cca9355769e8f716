//! GPU resource management
//!
//! Global uniforms and the depth buffer shared by all pipelines.

pub mod global_bindings;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, GlobalUBOContent};
pub use texture_resource::TextureResource;
