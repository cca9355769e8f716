use crate::{config::CameraConfig, input::ViewportEvent};

use super::orbit_camera::OrbitCamera;

/// Pointer gesture state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        start: (f32, f32),
        last: (f32, f32),
    },
}

/// Turns viewport pointer events into orbit camera motion.
///
/// A primary-button press starts a drag; each move while dragging rotates by
/// the delta from the previous cursor position. Release or leaving the
/// viewport ends the drag. Wheel zoom works regardless of drag state. There
/// is no inertia: the camera only moves while events arrive.
///
/// Pitch lost to the pole clamp is remembered until the drag ends, so moving
/// the pointer back along its path returns the camera to where it started.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_step: f32,
    state: DragState,
    pitch_overshoot: f32,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_step: f32) -> Self {
        Self {
            rotate_speed,
            zoom_step,
            state: DragState::Idle,
            pitch_overshoot: 0.0,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.rotate_speed, config.zoom_step)
    }

    /// Applies one event to the camera, returning whether it moved.
    pub fn process_event(&mut self, event: &ViewportEvent, camera: &mut OrbitCamera) -> bool {
        match *event {
            ViewportEvent::PointerDown { x, y } => {
                self.state = DragState::Dragging {
                    start: (x, y),
                    last: (x, y),
                };
                self.pitch_overshoot = 0.0;
                false
            }
            ViewportEvent::PointerMove { x, y } => {
                let DragState::Dragging { start, last } = self.state else {
                    return false;
                };
                let (dx, dy) = (x - last.0, y - last.1);
                self.state = DragState::Dragging {
                    start,
                    last: (x, y),
                };
                if dx == 0.0 && dy == 0.0 {
                    return false;
                }

                camera.add_yaw(-dx * self.rotate_speed);
                let wanted = camera.pitch + self.pitch_overshoot + dy * self.rotate_speed;
                camera.set_pitch(wanted);
                self.pitch_overshoot = wanted - camera.pitch;
                true
            }
            ViewportEvent::PointerUp | ViewportEvent::PointerLeave => {
                self.state = DragState::Idle;
                self.pitch_overshoot = 0.0;
                false
            }
            ViewportEvent::Wheel { delta } => {
                let factor = if delta > 0.0 {
                    1.0 + self.zoom_step
                } else if delta < 0.0 {
                    1.0 - self.zoom_step
                } else {
                    return false;
                };
                camera.scale_distance(factor);
                true
            }
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Returns true while a drag gesture is in progress
    pub fn is_rotating(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    fn setup() -> (CameraController, OrbitCamera) {
        let config = CameraConfig::default();
        (
            CameraController::from_config(&config),
            OrbitCamera::from_config(&config, 1.0),
        )
    }

    #[test]
    fn test_moves_ignored_while_idle() {
        let (mut controller, mut camera) = setup();
        let before = camera.eye;
        assert!(!controller.process_event(&ViewportEvent::PointerMove { x: 50.0, y: 80.0 }, &mut camera));
        assert_eq!(camera.eye, before);
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_drag_rotates_and_tracks_last() {
        let (mut controller, mut camera) = setup();
        let yaw = camera.yaw;
        let pitch = camera.pitch;

        controller.process_event(&ViewportEvent::PointerDown { x: 10.0, y: 10.0 }, &mut camera);
        assert!(controller.is_rotating());
        assert!(controller.process_event(&ViewportEvent::PointerMove { x: 20.0, y: 15.0 }, &mut camera));

        assert!((camera.yaw - (yaw - 0.1)).abs() < 1e-6);
        assert!((camera.pitch - (pitch + 0.05)).abs() < 1e-6);
        assert_eq!(
            controller.state(),
            DragState::Dragging {
                start: (10.0, 10.0),
                last: (20.0, 15.0)
            }
        );
    }

    #[test]
    fn test_zero_net_drag_leaves_camera_unchanged() {
        let (mut controller, mut camera) = setup();
        let before = camera.eye;

        controller.process_event(&ViewportEvent::PointerDown { x: 100.0, y: 100.0 }, &mut camera);
        for (x, y) in [(130.0, 90.0), (70.0, 120.0), (85.0, 95.0), (100.0, 100.0)] {
            controller.process_event(&ViewportEvent::PointerMove { x, y }, &mut camera);
        }
        controller.process_event(&ViewportEvent::PointerUp, &mut camera);

        assert!((camera.eye - before).magnitude() < 1e-4);
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn test_drag_past_pole_and_back_restores_pitch() {
        let (mut controller, mut camera) = setup();
        let before = camera.eye;
        let pitch = camera.pitch;

        controller.process_event(&ViewportEvent::PointerDown { x: 100.0, y: 100.0 }, &mut camera);
        controller.process_event(&ViewportEvent::PointerMove { x: 100.0, y: 400.0 }, &mut camera);
        let top = camera.pitch;
        assert!(top < std::f32::consts::FRAC_PI_2);

        // Still beyond the clamp, so the camera does not move yet.
        controller.process_event(&ViewportEvent::PointerMove { x: 100.0, y: 350.0 }, &mut camera);
        assert_eq!(camera.pitch, top);

        controller.process_event(&ViewportEvent::PointerMove { x: 100.0, y: 100.0 }, &mut camera);
        assert!((camera.pitch - pitch).abs() < 1e-5);
        assert!((camera.eye - before).magnitude() < 1e-4);
    }

    #[test]
    fn test_new_drag_forgets_overshoot() {
        let (mut controller, mut camera) = setup();
        controller.process_event(&ViewportEvent::PointerDown { x: 0.0, y: 0.0 }, &mut camera);
        controller.process_event(&ViewportEvent::PointerMove { x: 0.0, y: 300.0 }, &mut camera);
        controller.process_event(&ViewportEvent::PointerUp, &mut camera);
        let top = camera.pitch;

        controller.process_event(&ViewportEvent::PointerDown { x: 0.0, y: 300.0 }, &mut camera);
        controller.process_event(&ViewportEvent::PointerMove { x: 0.0, y: 290.0 }, &mut camera);
        assert!((camera.pitch - (top - 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_leave_ends_drag() {
        let (mut controller, mut camera) = setup();
        controller.process_event(&ViewportEvent::PointerDown { x: 0.0, y: 0.0 }, &mut camera);
        controller.process_event(&ViewportEvent::PointerLeave, &mut camera);
        let before = camera.eye;
        controller.process_event(&ViewportEvent::PointerMove { x: 40.0, y: 40.0 }, &mut camera);
        assert_eq!(camera.eye, before);
    }

    #[test]
    fn test_wheel_zooms_by_ten_percent() {
        let (mut controller, mut camera) = setup();
        camera.set_distance(10.0);

        controller.process_event(&ViewportEvent::Wheel { delta: 1.0 }, &mut camera);
        assert!((camera.distance_to_target() - 11.0).abs() < 1e-4);

        controller.process_event(&ViewportEvent::Wheel { delta: -3.0 }, &mut camera);
        assert!((camera.distance_to_target() - 9.9).abs() < 1e-4);

        assert!(!controller.process_event(&ViewportEvent::Wheel { delta: 0.0 }, &mut camera));
    }

    #[test]
    fn test_wheel_never_exceeds_max_distance() {
        let (mut controller, mut camera) = setup();
        let mut previous = camera.distance_to_target();
        for _ in 0..200 {
            controller.process_event(&ViewportEvent::Wheel { delta: 1.0 }, &mut camera);
            let distance = camera.distance_to_target();
            assert!(distance <= 100.0 + 1e-3);
            assert!(distance >= previous - 1e-4);
            previous = distance;
        }
        assert!((camera.distance - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_wheel_never_below_min_distance() {
        let (mut controller, mut camera) = setup();
        for _ in 0..200 {
            controller.process_event(&ViewportEvent::Wheel { delta: -1.0 }, &mut camera);
        }
        assert!((camera.distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_wheel_during_drag_keeps_drag() {
        let (mut controller, mut camera) = setup();
        controller.process_event(&ViewportEvent::PointerDown { x: 5.0, y: 5.0 }, &mut camera);
        controller.process_event(&ViewportEvent::Wheel { delta: 1.0 }, &mut camera);
        assert!(controller.is_rotating());
    }
}
