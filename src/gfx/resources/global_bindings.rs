//! Global uniform bindings for camera and scene lighting
//!
//! One uniform buffer, bound at slot 0 in every pipeline, carries the camera
//! matrices plus the ambient and directional light of the current scene.

use crate::{
    gfx::{camera::camera_utils::CameraUniform, scene::Scene},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],  // Camera position (homogeneous coordinates)
    view_proj: [[f32; 4]; 4], // Camera view-projection matrix

    ambient: [f32; 3], // Ambient color * intensity
    _padding0: f32,
    light_direction: [f32; 3], // Unit vector towards the directional light
    _padding1: f32,
    light_color: [f32; 3], // Directional color * intensity
    _padding2: f32,
}
// Total: 16 + 64 + 16 + 16 + 16 = 128 bytes

impl GlobalUBOContent {
    /// Collects camera and light data for one frame.
    ///
    /// A scene without lights renders unlit black faces.
    pub fn from_scene(camera: CameraUniform, scene: &Scene) -> Self {
        let ambient = scene
            .ambient_light()
            .map(|light| light.radiance())
            .unwrap_or([0.0; 3]);
        let (light_direction, light_color) = scene
            .directional_light()
            .map(|light| (light.to_light(), light.radiance()))
            .unwrap_or(([0.0, 1.0, 0.0], [0.0; 3]));

        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            ambient,
            _padding0: 0.0,
            light_direction,
            _padding1: 0.0,
            light_color,
            _padding2: 0.0,
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Writes this frame's camera and light data to the global uniform buffer.
pub fn update_global_ubo(ubo: &mut GlobalUBO, queue: &wgpu::Queue, scene: &Scene) {
    let camera = scene.camera_manager.camera.uniform;
    ubo.update_content(queue, GlobalUBOContent::from_scene(camera, scene));
}

/// Manages bind group layouts and bind groups for global uniforms
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    /// Creates the layout and the bind group for `ubo`
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    /// Used when creating render pipelines that need access to global uniforms.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ViewerConfig, gfx::camera::CameraManager};

    #[test]
    fn test_layout_is_std140_sized() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 128);
    }

    #[test]
    fn test_lights_from_scene() {
        let config = ViewerConfig::default();
        let scene = Scene::new(CameraManager::from_config(&config.camera, 1.0), &config);

        let content = GlobalUBOContent::from_scene(CameraUniform::default(), &scene);
        assert_eq!(content.ambient, [0.25, 0.25, 0.25]);
        assert_eq!(content.light_color, [0.8, 0.8, 0.8]);
        let d = content.light_direction;
        let expected = 1.0 / 3f32.sqrt();
        assert!(d.iter().all(|c| (c - expected).abs() < 1e-6));
    }
}
