//! Viewer configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. The file is JSON and is picked up from the path in
//! [`CONFIG_ENV_VAR`] when that variable is set.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "MESHVIEW_CONFIG";

/// Top-level viewer configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub grid: GridConfig,
    pub lighting: LightingConfig,
    /// Minimum angle in degrees between adjacent triangle normals for the
    /// shared edge to be drawn in the wireframe overlay.
    pub edge_threshold_deg: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            grid: GridConfig::default(),
            lighting: LightingConfig::default(),
            edge_threshold_deg: 1.0,
        }
    }
}

impl ViewerConfig {
    /// Parses and validates a config from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::Syntax)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the camera cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when the
    /// variable is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Loading viewer config from {}", path.display());
                Self::from_path(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f64; 3],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "meshview".to_string(),
            width: 1200,
            height: 800,
            clear_color: [0.94, 0.94, 0.94],
        }
    }
}

/// Orbit camera tuning
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Home eye position; yaw, pitch and distance are derived from it.
    pub position: [f32; 3],
    /// Radians of rotation per pixel of drag.
    pub rotate_speed: f32,
    /// Fractional distance change per wheel tick.
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fovy_deg: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [5.0, 5.0, 5.0],
            rotate_speed: 0.01,
            zoom_step: 0.1,
            min_distance: 1.0,
            max_distance: 100.0,
            fovy_deg: 75.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl CameraConfig {
    /// Distance bounds must be positive and ordered, and a wheel step must
    /// neither stall nor flip the distance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_distance, self.max_distance);
        if !(min > 0.0 && max > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "camera distance bounds must be positive, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(ConfigError::Invalid(format!(
                "camera min_distance {min} exceeds max_distance {max}"
            )));
        }
        if !(self.zoom_step > 0.0 && self.zoom_step < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "camera zoom_step must be in (0, 1), got {}",
                self.zoom_step
            )));
        }
        Ok(())
    }
}

/// Ground reference grid on the XZ plane
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub size: f32,
    pub divisions: u32,
    pub center_color: [f32; 3],
    pub line_color: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            divisions: 10,
            center_color: [0.27, 0.27, 0.27],
            line_color: [0.53, 0.53, 0.53],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient_color: [f32; 3],
    pub ambient_intensity: f32,
    /// Position of the directional light; it shines towards the origin.
    pub directional_position: [f32; 3],
    pub directional_color: [f32; 3],
    pub directional_intensity: f32,
    /// Opacity of the shaded faces.
    pub face_opacity: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: [0.25, 0.25, 0.25],
            ambient_intensity: 1.0,
            directional_position: [1.0, 1.0, 1.0],
            directional_color: [1.0, 1.0, 1.0],
            directional_intensity: 0.8,
            face_opacity: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.camera.rotate_speed, 0.01);
        assert_eq!(config.camera.zoom_step, 0.1);
        assert_eq!(config.camera.max_distance, 100.0);
        assert_eq!(config.grid.divisions, 10);
        assert_eq!(config.edge_threshold_deg, 1.0);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config =
            ViewerConfig::from_json_str(r#"{"camera": {"max_distance": 50.0}, "grid": {"size": 20.0}}"#)
                .unwrap();
        assert_eq!(config.camera.max_distance, 50.0);
        assert_eq!(config.camera.min_distance, 1.0);
        assert_eq!(config.grid.size, 20.0);
        assert_eq!(config.grid.divisions, 10);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = ViewerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = ViewerConfig::from_path(Path::new("/nonexistent/meshview.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_json_is_syntax_error() {
        let err = ViewerConfig::from_json_str(r#"{"camera": "#).unwrap_err();
        assert!(matches!(err, ConfigError::Syntax(_)));
    }

    #[test]
    fn test_inverted_distance_bounds_rejected() {
        let err =
            ViewerConfig::from_json_str(r#"{"camera": {"min_distance": 50.0, "max_distance": 10.0}}"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("exceeds max_distance"));
    }

    #[test]
    fn test_non_positive_distance_bounds_rejected() {
        for text in [
            r#"{"camera": {"min_distance": 0.0}}"#,
            r#"{"camera": {"min_distance": -2.0}}"#,
            r#"{"camera": {"min_distance": -5.0, "max_distance": -1.0}}"#,
        ] {
            let err = ViewerConfig::from_json_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{text}");
        }
    }

    #[test]
    fn test_zoom_step_outside_unit_interval_rejected() {
        for step in ["0.0", "1.0", "1.5", "-0.1"] {
            let text = format!(r#"{{"camera": {{"zoom_step": {step}}}}}"#);
            let err = ViewerConfig::from_json_str(&text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{step}");
        }
    }

    #[test]
    fn test_equal_distance_bounds_accepted() {
        let config =
            ViewerConfig::from_json_str(r#"{"camera": {"min_distance": 8.0, "max_distance": 8.0}}"#)
                .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_file_is_rejected_before_use() {
        let path = std::env::temp_dir().join(format!("meshview-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"camera": {"min_distance": 50.0, "max_distance": 10.0}}"#).unwrap();
        let result = ViewerConfig::from_path(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
