use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::config::CameraConfig;
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Camera on a sphere around `target`, always looking at it.
///
/// Position is kept as yaw, pitch and distance rather than as a vector that
/// gets rotated incrementally, so repeated drags cannot drift off the sphere.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
    home: (f32, f32, f32),
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculated in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
            home: (distance, pitch, yaw),
        };
        camera.set_pitch(pitch);
        camera.set_distance(distance);
        camera.home = (camera.distance, camera.pitch, camera.yaw);
        camera
    }

    /// Builds a camera at `config.position` looking at the origin.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let position = Vector3::from(config.position);
        let distance = position.magnitude().max(f32::EPSILON);
        let pitch = (position.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = position.x.atan2(position.z);

        let mut camera = Self::new(distance, pitch, yaw, Vector3::zero(), aspect);
        camera.bounds.min_distance = Some(config.min_distance);
        camera.bounds.max_distance = Some(config.max_distance);
        camera.fovy = Deg(config.fovy_deg).into();
        camera.znear = config.znear;
        camera.zfar = config.zfar;
        camera.set_distance(distance);
        camera.home = (camera.distance, camera.pitch, camera.yaw);
        camera
    }

    /// Returns to the position the camera was created with.
    pub fn reset_to_default(&mut self) {
        let (distance, pitch, yaw) = self.home;
        self.distance = distance;
        self.pitch = pitch;
        self.yaw = yaw;
        self.update();
    }

    /// Sets the distance within the bounds. Inverted bounds collapse onto the
    /// minimum instead of panicking.
    pub fn set_distance(&mut self, distance: f32) {
        let min = self.bounds.min_distance.unwrap_or(f32::EPSILON);
        let max = self.bounds.max_distance.unwrap_or(f32::MAX).max(min);
        self.distance = distance.clamp(min, max);
        self.update();
    }

    /// Multiplies the distance to the target, respecting the bounds.
    pub fn scale_distance(&mut self, factor: f32) {
        self.set_distance(self.distance * factor);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Current distance between eye and target.
    pub fn distance_to_target(&self) -> f32 {
        (self.eye - self.target).magnitude()
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        // Stay just short of the poles so look_at never sees eye parallel to up.
        Self {
            min_distance: None,
            max_distance: Some(100.0),
            min_pitch: -std::f32::consts::FRAC_PI_2 + 1e-3,
            max_pitch: std::f32::consts::FRAC_PI_2 - 1e-3,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_reproduces_position() {
        let config = CameraConfig::default();
        let camera = OrbitCamera::from_config(&config, 1.5);
        let expected = Vector3::from(config.position);
        assert!((camera.eye - expected).magnitude() < 1e-4);
        assert!((camera.distance - expected.magnitude()).abs() < 1e-5);
    }

    #[test]
    fn test_distance_clamped() {
        let mut camera = OrbitCamera::from_config(&CameraConfig::default(), 1.0);
        camera.set_distance(1000.0);
        assert_eq!(camera.distance, 100.0);
        camera.set_distance(0.0);
        assert_eq!(camera.distance, 1.0);
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let config = CameraConfig {
            min_distance: 50.0,
            max_distance: 10.0,
            ..CameraConfig::default()
        };
        let mut camera = OrbitCamera::from_config(&config, 1.0);
        assert_eq!(camera.distance, 50.0);
        camera.scale_distance(0.5);
        assert_eq!(camera.distance, 50.0);
    }

    #[test]
    fn test_pitch_clamped_short_of_poles() {
        let mut camera = OrbitCamera::from_config(&CameraConfig::default(), 1.0);
        camera.add_pitch(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        camera.add_pitch(-20.0);
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_eye_stays_on_sphere() {
        let mut camera = OrbitCamera::from_config(&CameraConfig::default(), 1.0);
        let distance = camera.distance;
        for i in 0..1000 {
            camera.add_yaw(0.037 * (i % 7) as f32);
            camera.add_pitch(0.011 * ((i % 5) as f32 - 2.0));
        }
        assert!((camera.distance_to_target() - distance).abs() < 1e-3);
    }

    #[test]
    fn test_reset_to_default() {
        let mut camera = OrbitCamera::from_config(&CameraConfig::default(), 1.0);
        let home = camera.eye;
        camera.add_yaw(1.0);
        camera.scale_distance(3.0);
        camera.reset_to_default();
        assert!((camera.eye - home).magnitude() < 1e-5);
    }

    #[test]
    fn test_resize_projection_ignores_zero_height() {
        let mut camera = OrbitCamera::from_config(&CameraConfig::default(), 1.0);
        camera.resize_projection(800, 400);
        assert_eq!(camera.aspect, 2.0);
        camera.resize_projection(800, 0);
        assert_eq!(camera.aspect, 2.0);
    }
}
