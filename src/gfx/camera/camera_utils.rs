use cgmath::{Matrix4, SquareMatrix};

use crate::{config::CameraConfig, input::ViewportEvent};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::new(
            OrbitCamera::from_config(config, aspect),
            CameraController::from_config(config),
        )
    }

    /// Feeds a viewport event to the controller; true if the camera moved.
    pub fn process_event(&mut self, event: &ViewportEvent) -> bool {
        self.controller.process_event(event, &mut self.camera)
    }

    pub fn reset(&mut self) {
        log::info!("Resetting camera to default position");
        self.camera.reset_to_default();
    }

    /// Get the view projection matrix from the camera
    pub fn get_view_proj_matrix(&self) -> Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fulfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix4.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_proj_maps_target_inside_clip_volume() {
        let mut manager = CameraManager::from_config(&CameraConfig::default(), 1.0);
        manager.camera.update_view_proj();

        let clip = manager.get_view_proj_matrix() * cgmath::Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
        assert_eq!(manager.camera.uniform.view_position[3], 1.0);
    }
}
