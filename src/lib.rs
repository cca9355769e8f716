//! meshview
//!
//! A desktop viewer for JSON face/vertex payloads, built on wgpu, winit and
//! Dear ImGui.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::MeshViewerApp;
pub use config::ViewerConfig;
