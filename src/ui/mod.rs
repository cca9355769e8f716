//! # User Interface Module
//!
//! Dear ImGui overlay for the viewer.
//!
//! ## Key Components
//!
//! - [`UiManager`] - ImGui context, winit platform glue and wgpu renderer
//! - [`scene_input_panel`] - The "Scene Input" window: JSON text area, load
//!   button, error line, statistics and object list
//! - [`PanelState`] - What the panel remembers between frames
//!
//! ## Input Handling
//!
//! Window events go to ImGui first. Events it captures never reach the
//! camera, so typing or dragging inside the panel leaves the view alone.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{scene_input_panel, PanelState};
