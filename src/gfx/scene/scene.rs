use crate::{
    config::{GridConfig, LightingConfig, ViewerConfig},
    error::LoadError,
    gfx::camera::camera_utils::CameraManager,
    wgpu_utils::binding_builder::BindGroupLayoutWithDesc,
};

use super::{
    grid::Grid,
    lights::{AmbientLight, DirectionalLight},
    object::RenderableGroup,
    payload::SceneData,
};

/// One entry of the scene's content list
pub enum SceneNode {
    AmbientLight(AmbientLight),
    DirectionalLight(DirectionalLight),
    Grid(Grid),
    Group(RenderableGroup),
}

/// Scene contents plus the camera looking at them
///
/// Every successful load replaces all nodes at once: lights, grid and one
/// group per payload object, in payload order.
pub struct Scene {
    pub camera_manager: CameraManager,
    nodes: Vec<SceneNode>,
    grid_config: GridConfig,
    lighting: LightingConfig,
    edge_threshold_deg: f32,
}

impl Scene {
    /// Creates a scene holding only the lights and the grid
    pub fn new(camera_manager: CameraManager, config: &ViewerConfig) -> Self {
        let mut scene = Self {
            camera_manager,
            nodes: Vec::new(),
            grid_config: config.grid.clone(),
            lighting: config.lighting.clone(),
            edge_threshold_deg: config.edge_threshold_deg,
        };
        scene.replace_groups(Vec::new());
        scene
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Parses a JSON payload and, only if it is valid, replaces the scene
    /// contents with it.
    ///
    /// On error the scene is left exactly as it was.
    pub fn load_from_str(&mut self, text: &str) -> Result<SceneStatistics, LoadError> {
        let data = SceneData::parse(text).inspect_err(|err| {
            log::warn!("Rejected scene payload: {}", err);
        })?;
        Ok(self.load(&data))
    }

    /// Replaces the scene contents with the objects of `data`.
    pub fn load(&mut self, data: &SceneData) -> SceneStatistics {
        let groups: Vec<RenderableGroup> = data
            .objects
            .iter()
            .enumerate()
            .map(|(index, object)| {
                RenderableGroup::from_object(
                    object,
                    index,
                    self.lighting.face_opacity,
                    self.edge_threshold_deg,
                )
            })
            .collect();

        self.replace_groups(groups);

        let stats = self.statistics();
        log::info!(
            "Loaded {} objects ({} triangles, {} vertices, {} edges)",
            stats.object_count,
            stats.total_triangles,
            stats.total_vertices,
            stats.total_edges
        );
        stats
    }

    fn replace_groups(&mut self, groups: Vec<RenderableGroup>) {
        self.nodes.clear();
        self.nodes.reserve(groups.len() + 3);
        self.nodes
            .push(SceneNode::AmbientLight(AmbientLight::from_config(&self.lighting)));
        self.nodes.push(SceneNode::DirectionalLight(
            DirectionalLight::from_config(&self.lighting),
        ));
        self.nodes
            .push(SceneNode::Grid(Grid::from_config(&self.grid_config)));
        self.nodes.extend(groups.into_iter().map(SceneNode::Group));
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn groups(&self) -> impl Iterator<Item = &RenderableGroup> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::Group(group) => Some(group),
            _ => None,
        })
    }

    pub fn groups_mut(&mut self) -> impl Iterator<Item = &mut RenderableGroup> + '_ {
        self.nodes.iter_mut().filter_map(|node| match node {
            SceneNode::Group(group) => Some(group),
            _ => None,
        })
    }

    /// Gets the total number of loaded objects
    pub fn object_count(&self) -> usize {
        self.groups().count()
    }

    pub fn ambient_light(&self) -> Option<&AmbientLight> {
        self.nodes.iter().find_map(|node| match node {
            SceneNode::AmbientLight(light) => Some(light),
            _ => None,
        })
    }

    pub fn directional_light(&self) -> Option<&DirectionalLight> {
        self.nodes.iter().find_map(|node| match node {
            SceneNode::DirectionalLight(light) => Some(light),
            _ => None,
        })
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.nodes.iter().find_map(|node| match node {
            SceneNode::Grid(grid) => Some(grid),
            _ => None,
        })
    }

    /// Gets all object names for UI display
    pub fn get_object_names(&self) -> Vec<String> {
        self.groups().map(|group| group.name.clone()).collect()
    }

    /// Gets statistics about the scene
    pub fn statistics(&self) -> SceneStatistics {
        self.groups().fold(SceneStatistics::default(), |mut stats, group| {
            stats.object_count += 1;
            stats.total_triangles += group.triangle_count();
            stats.total_vertices += group.vertex_count();
            stats.total_edges += group.edge_count();
            stats
        })
    }

    /// Creates GPU buffers for nodes that do not have them yet.
    ///
    /// Called every frame; nodes created by a load are uploaded on the frame
    /// after it.
    pub fn prepare_gpu_resources(
        &mut self,
        device: &wgpu::Device,
        group_layout: &BindGroupLayoutWithDesc,
    ) {
        for node in self.nodes.iter_mut() {
            match node {
                SceneNode::Grid(grid) => grid.init_gpu_resources(device),
                SceneNode::Group(group) => group.init_gpu_resources(device, group_layout),
                SceneNode::AmbientLight(_) | SceneNode::DirectionalLight(_) => {}
            }
        }
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub total_triangles: usize,
    pub total_vertices: usize,
    pub total_edges: usize,
}
