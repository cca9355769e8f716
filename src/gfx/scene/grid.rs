//! Ground reference grid
//!
//! A square of lines on the XZ plane centered on the origin, with the middle
//! lines in a darker color, drawn as a line list.

use wgpu::util::DeviceExt;

use crate::config::GridConfig;

use super::vertex::LineVertex;

pub struct GridGpuResources {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

pub struct Grid {
    pub size: f32,
    pub divisions: u32,
    pub center_color: [f32; 3],
    pub line_color: [f32; 3],
    gpu_resources: Option<GridGpuResources>,
}

impl Grid {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            size: config.size,
            divisions: config.divisions.max(1),
            center_color: config.center_color,
            line_color: config.line_color,
            gpu_resources: None,
        }
    }

    /// Two vertices per line, lines parallel to X then Z for each step.
    pub fn line_vertices(&self) -> Vec<LineVertex> {
        let half = self.size / 2.0;
        let step = self.size / self.divisions as f32;
        let center = self.divisions / 2;

        let mut vertices = Vec::with_capacity((self.divisions as usize + 1) * 4);
        for i in 0..=self.divisions {
            let k = -half + i as f32 * step;
            let color = if i == center {
                self.center_color
            } else {
                self.line_color
            };

            vertices.push(LineVertex { position: [-half, 0.0, k], color });
            vertices.push(LineVertex { position: [half, 0.0, k], color });
            vertices.push(LineVertex { position: [k, 0.0, -half], color });
            vertices.push(LineVertex { position: [k, 0.0, half], color });
        }
        vertices
    }

    pub fn init_gpu_resources(&mut self, device: &wgpu::Device) {
        if self.gpu_resources.is_some() {
            return;
        }

        let vertices = self.line_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        self.gpu_resources = Some(GridGpuResources {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        });
    }

    /// Draws the grid with whatever line pipeline is bound.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if let Some(gpu) = &self.gpu_resources {
            render_pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
            render_pass.draw(0..gpu.vertex_count, 0..1);
        }
    }
}
