//! # Graphics Module
//!
//! Everything between the parsed payload and pixels on screen.
//!
//! ## Architecture Overview
//!
//! - **Color** ([`color`]) - Golden-angle hue rotation for per-object colors
//! - **Geometry** ([`geometry`]) - Faces to indexed triangles, plus edge extraction
//! - **Scene Management** ([`scene`]) - Payload types, lights, grid, groups and the load operation
//! - **Camera System** ([`camera`]) - Spherical orbit camera with drag and zoom
//! - **Rendering Pipeline** ([`rendering`]) - Grid, translucent faces and edge lines
//! - **Resource Management** ([`resources`]) - Global uniforms and the depth buffer
//!
//! ## Usage
//!
//! The graphics system is driven by the application, which owns a
//! [`RenderEngine`] and a [`Scene`]:
//!
//! ```no_run
//! use meshview::config::ViewerConfig;
//! use meshview::gfx::{camera::CameraManager, scene::Scene};
//!
//! let config = ViewerConfig::default();
//! let mut scene = Scene::new(CameraManager::from_config(&config.camera, 1.5), &config);
//! scene.load_from_str(r#"{"objects": []}"#).unwrap();
//! ```
//!
//! [`Scene`]: scene::Scene

pub mod camera;
pub mod color;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
