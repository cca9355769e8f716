//! WGPU-based rendering engine for the viewer
//!
//! Owns the surface, device and pipelines, and records one frame as: clear,
//! grid lines, translucent faces, edge lines, then the UI overlay.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use wgpu::{Device, TextureFormat};

use crate::{
    gfx::{
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
            texture_resource::TextureResource,
        },
        scene::{
            object::DrawGroup,
            scene::Scene,
            vertex::{LineVertex, Vertex3D},
        },
    },
    wgpu_utils::{
        binding_builder::{BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
    },
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const GRID_PIPELINE: &str = "Grid";
const MESH_PIPELINE: &str = "Mesh";
const EDGES_PIPELINE: &str = "Edges";

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    clear_color: wgpu::Color,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    group_layout: BindGroupLayoutWithDesc,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Fails if no adapter, device or surface format is available, or if a
    /// pipeline cannot be built.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        clear_color: [f64; 3],
    ) -> anyhow::Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to request adapter")?;

        let info = adapter.get_info();
        log::info!("Using adapter '{}' ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to request a device")?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or_else(|| anyhow!("Surface is not supported by the adapter"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        let group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(&device, "Group Bind Group Layout");

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("grid", include_str!("shaders/grid.wgsl"));
        pipeline_manager.load_shader("mesh", include_str!("shaders/mesh.wgsl"));
        pipeline_manager.load_shader("edges", include_str!("shaders/edges.wgsl"));

        let globals_layout = global_bindings.bind_group_layout().clone();

        pipeline_manager.register_pipeline(
            GRID_PIPELINE,
            PipelineConfig::default()
                .with_label("GRID")
                .with_shader("grid")
                .with_vertex_buffer(LineVertex::desc())
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_depth(TextureResource::DEPTH_FORMAT, true)
                .with_bind_group_layouts(vec![globals_layout.clone()])
                .with_color_target(format, wgpu::BlendState::REPLACE),
        );

        pipeline_manager.register_pipeline(
            MESH_PIPELINE,
            PipelineConfig::default()
                .with_label("MESH")
                .with_shader("mesh")
                .with_vertex_buffer(Vertex3D::desc())
                .with_cull_mode(None) // Faces are double sided
                .with_depth(TextureResource::DEPTH_FORMAT, true)
                .with_depth_bias(wgpu::DepthBiasState {
                    constant: 1,
                    slope_scale: 1.0,
                    clamp: 0.0,
                })
                .with_bind_group_layouts(vec![
                    globals_layout.clone(),
                    group_layout.layout.clone(),
                ])
                .with_color_target(format, wgpu::BlendState::ALPHA_BLENDING),
        );

        pipeline_manager.register_pipeline(
            EDGES_PIPELINE,
            PipelineConfig::default()
                .with_label("EDGES")
                .with_shader("edges")
                .with_vertex_buffer(Vertex3D::desc())
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_depth(TextureResource::DEPTH_FORMAT, true)
                .with_bind_group_layouts(vec![globals_layout, group_layout.layout.clone()])
                .with_color_target(format, wgpu::BlendState::REPLACE),
        );

        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            for e in &errors {
                log::error!("{}", e);
            }
            return Err(anyhow!("Failed to create {} render pipeline(s)", errors.len()));
        }

        log::info!(
            "Render engine ready: {}x{} {:?}, {:?}",
            config.width,
            config.height,
            format,
            pipeline_manager.get_stats()
        );

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            clear_color: wgpu::Color {
                r: clear_color[0],
                g: clear_color[1],
                b: clear_color[2],
                a: 1.0,
            },
            pipeline_manager,
            global_ubo,
            global_bindings,
            group_layout,
        })
    }

    /// Uploads buffers for scene nodes created since the last frame
    pub fn prepare_scene(&self, scene: &mut Scene) {
        scene.prepare_gpu_resources(&self.device, &self.group_layout);
    }

    /// Writes camera and light data for the next frame
    pub fn update(&mut self, scene: &Scene) {
        update_global_ubo(&mut self.global_ubo, &self.queue, scene);
    }

    pub fn render_frame<F>(&mut self, scene: &Scene, ui_callback: Option<F>)
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return;
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            if let (Some(pipeline), Some(grid)) =
                (self.pipeline_manager.pipeline(GRID_PIPELINE), scene.grid())
            {
                render_pass.set_pipeline(pipeline);
                grid.draw(&mut render_pass);
            }

            if let Some(pipeline) = self.pipeline_manager.pipeline(MESH_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                for group in scene.groups().filter(|g| g.visible) {
                    render_pass.draw_group_faces(group);
                }
            }

            if let Some(pipeline) = self.pipeline_manager.pipeline(EDGES_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                for group in scene.groups().filter(|g| g.visible) {
                    render_pass.draw_group_edges(group);
                }
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    /// Reconfigures the surface and depth buffer; zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> TextureFormat {
        self.format
    }
}
