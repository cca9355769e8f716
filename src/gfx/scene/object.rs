//! Renderable groups built from payload objects
//!
//! A [`RenderableGroup`] is one loaded object: its triangle geometry, the
//! edge overlay indices and its tint. GPU buffers are created lazily by
//! [`RenderableGroup::init_gpu_resources`] the first time the group is
//! drawn; a group replaced by a later load simply drops them.

use wgpu::util::DeviceExt;

use crate::{
    gfx::{
        color::{color_for_index, seed_for_object},
        geometry::{build_object_geometry, extract_edges, Edge, GeometryData},
        scene::payload::Object3D,
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutWithDesc},
        uniform_buffer::UniformBuffer,
    },
};

/// Per-group uniform data shared by the mesh and edge pipelines
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GroupUniform {
    pub face_color: [f32; 4],
    pub edge_color: [f32; 4],
}

const EDGE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// GPU buffers for one group
pub struct GroupGpuResources {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    edge_buffer: Option<wgpu::Buffer>,
    _uniform: UniformBuffer<GroupUniform>,
    bind_group: wgpu::BindGroup,
}

/// A translucent shaded mesh plus its black edge overlay
pub struct RenderableGroup {
    pub name: String,
    pub color: [f32; 3],
    pub opacity: f32,
    pub visible: bool,
    pub geometry: GeometryData,
    pub edges: Vec<Edge>,
    pub gpu_resources: Option<GroupGpuResources>,
}

impl RenderableGroup {
    /// Builds the group for the object at `index` in a payload.
    pub fn from_object(
        object: &Object3D,
        index: usize,
        opacity: f32,
        edge_threshold_deg: f32,
    ) -> Self {
        let geometry = build_object_geometry(object);
        let edges = extract_edges(&geometry, edge_threshold_deg);
        let color = color_for_index(seed_for_object(index, object.name.as_deref()));

        Self {
            name: object.display_name(index),
            color,
            opacity,
            visible: true,
            geometry,
            edges,
            gpu_resources: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.geometry.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.geometry.triangle_count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn uniform(&self) -> GroupUniform {
        GroupUniform {
            face_color: [self.color[0], self.color[1], self.color[2], self.opacity],
            edge_color: EDGE_COLOR,
        }
    }

    /// Uploads geometry and creates the group's bind group.
    ///
    /// Groups without triangles get no resources and are never drawn.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, layout: &BindGroupLayoutWithDesc) {
        if self.gpu_resources.is_some() || self.geometry.is_empty() {
            return;
        }

        let vertices = self.geometry.to_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", self.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", self.name)),
            contents: bytemuck::cast_slice(&self.geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let edge_buffer = (!self.edges.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Edge Buffer", self.name)),
                contents: bytemuck::cast_slice(&self.edges),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let uniform = UniformBuffer::new_with_data(device, &self.uniform());
        let bind_group = BindGroupBuilder::new(layout)
            .resource(uniform.binding_resource())
            .create(device, &format!("{} Bind Group", self.name));

        log::debug!(
            "Uploaded '{}': {} vertices, {} triangles, {} edges",
            self.name,
            self.vertex_count(),
            self.triangle_count(),
            self.edge_count()
        );

        self.gpu_resources = Some(GroupGpuResources {
            vertex_buffer,
            index_buffer,
            edge_buffer,
            _uniform: uniform,
            bind_group,
        });
    }
}

/// Draw calls for renderable groups on a render pass
///
/// The caller sets the pipeline; these set buffers and bind group 1.
pub trait DrawGroup<'a> {
    fn draw_group_faces(&mut self, group: &'a RenderableGroup);
    fn draw_group_edges(&mut self, group: &'a RenderableGroup);
}

impl<'a, 'b> DrawGroup<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_group_faces(&mut self, group: &'b RenderableGroup) {
        let Some(gpu) = &group.gpu_resources else {
            return; // Skip drawing if not uploaded
        };

        self.set_bind_group(1, &gpu.bind_group, &[]);
        self.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        self.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..group.geometry.indices.len() as u32, 0, 0..1);
    }

    fn draw_group_edges(&mut self, group: &'b RenderableGroup) {
        let Some(gpu) = &group.gpu_resources else {
            return;
        };
        let Some(edge_buffer) = &gpu.edge_buffer else {
            return;
        };

        self.set_bind_group(1, &gpu.bind_group, &[]);
        self.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        self.set_index_buffer(edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..(group.edges.len() * 2) as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::payload::SceneData;

    #[test]
    fn test_group_from_object() {
        let data = SceneData::parse(crate::gfx::scene::payload::SAMPLE_PAYLOAD).unwrap();
        let cube = RenderableGroup::from_object(&data.objects[0], 0, 0.7, 1.0);
        assert_eq!(cube.name, "cube");
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.edge_count(), 12);
        assert!(cube.gpu_resources.is_none());

        let unnamed = RenderableGroup::from_object(&data.objects[1], 1, 0.7, 1.0);
        assert_eq!(unnamed.name, "object1");
        assert_eq!(unnamed.color, color_for_index(1));
    }

    #[test]
    fn test_uniform_colors() {
        let data = SceneData::parse(r#"{"objects": [{"faces": []}]}"#).unwrap();
        let group = RenderableGroup::from_object(&data.objects[0], 4, 0.5, 1.0);
        let uniform = group.uniform();
        assert_eq!(uniform.face_color[3], 0.5);
        assert_eq!(&uniform.face_color[..3], &color_for_index(4)[..]);
        assert_eq!(uniform.edge_color, EDGE_COLOR);
    }
}
