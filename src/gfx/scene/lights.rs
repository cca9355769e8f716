//! Scene lights
//!
//! The viewer lights every load with one ambient and one directional light.
//! Both are folded into the global uniform each frame.

use cgmath::{InnerSpace, Vector3};

use crate::config::LightingConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl AmbientLight {
    pub fn from_config(config: &LightingConfig) -> Self {
        Self {
            color: config.ambient_color,
            intensity: config.ambient_intensity,
        }
    }

    /// Color premultiplied by intensity
    pub fn radiance(&self) -> [f32; 3] {
        self.color.map(|c| c * self.intensity)
    }
}

/// Light arriving from `position` towards the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn from_config(config: &LightingConfig) -> Self {
        Self {
            position: config.directional_position,
            color: config.directional_color,
            intensity: config.directional_intensity,
        }
    }

    /// Unit vector pointing from the surface towards the light.
    pub fn to_light(&self) -> [f32; 3] {
        let v = Vector3::from(self.position);
        if v.magnitude2() == 0.0 {
            return [0.0, 1.0, 0.0];
        }
        v.normalize().into()
    }

    pub fn radiance(&self) -> [f32; 3] {
        self.color.map(|c| c * self.intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_light_is_normalized() {
        let light = DirectionalLight {
            position: [1.0, 1.0, 1.0],
            color: [1.0; 3],
            intensity: 0.8,
        };
        let d = Vector3::from(light.to_light());
        assert!((d.magnitude() - 1.0).abs() < 1e-6);
        assert_eq!(light.radiance(), [0.8, 0.8, 0.8]);
    }

    #[test]
    fn test_zero_position_points_up() {
        let light = DirectionalLight {
            position: [0.0; 3],
            color: [1.0; 3],
            intensity: 1.0,
        };
        assert_eq!(light.to_light(), [0.0, 1.0, 0.0]);
    }
}
