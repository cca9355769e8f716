//! # Scene Management Module
//!
//! The scene is an ordered list of nodes: an ambient light, a directional
//! light, the ground grid, and one [`RenderableGroup`] per loaded object.
//!
//! ## Key Components
//!
//! - [`Scene`] - Node list, camera and the load operation
//! - [`payload`] - JSON payload types and parsing
//! - [`RenderableGroup`] - Shaded faces plus edge overlay for one object
//! - [`Vertex3D`] / [`LineVertex`] - GPU vertex formats
//!
//! ## Usage
//!
//! ```no_run
//! use meshview::config::ViewerConfig;
//! use meshview::gfx::camera::CameraManager;
//! use meshview::gfx::scene::{payload::SAMPLE_PAYLOAD, Scene};
//!
//! let config = ViewerConfig::default();
//! let camera = CameraManager::from_config(&config.camera, 1.5);
//! let mut scene = Scene::new(camera, &config);
//!
//! let stats = scene.load_from_str(SAMPLE_PAYLOAD).unwrap();
//! println!("{} objects", stats.object_count);
//! ```

pub mod grid;
pub mod lights;
pub mod object;
pub mod payload;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use grid::Grid;
pub use lights::{AmbientLight, DirectionalLight};
pub use object::{DrawGroup, GroupUniform, RenderableGroup};
pub use payload::{Face, Normal, Object3D, SceneData, Vertex};
pub use scene::{Scene, SceneNode, SceneStatistics};
pub use vertex::{LineVertex, Vertex3D};
