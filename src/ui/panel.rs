//! Scene input panel
//!
//! One window holding the JSON text area, the load button with its error
//! line, scene statistics and the object list.

use crate::gfx::scene::{payload::SAMPLE_PAYLOAD, scene::Scene};

const ERROR_COLOR: [f32; 4] = [0.9, 0.2, 0.2, 1.0];

/// State the panel keeps between frames
#[derive(Debug, Clone, PartialEq)]
pub struct PanelState {
    /// Contents of the text area
    pub input_text: String,
    /// Message from the last failed load; cleared by the next success
    pub error: Option<&'static str>,
    pub selected: Option<usize>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            input_text: SAMPLE_PAYLOAD.to_string(),
            error: None,
            selected: None,
        }
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the text area into the scene, recording the outcome.
    ///
    /// Returns true if the scene was replaced.
    pub fn apply_load(&mut self, scene: &mut Scene) -> bool {
        match scene.load_from_str(&self.input_text) {
            Ok(_) => {
                self.error = None;
                self.selected = None;
                true
            }
            Err(e) => {
                self.error = Some(e.user_message());
                false
            }
        }
    }
}

/// Builds the "Scene Input" window for this frame
pub fn scene_input_panel(ui: &imgui::Ui, state: &mut PanelState, scene: &mut Scene) {
    let display_size = ui.io().display_size;
    // Guard against invalid display size that could cause crashes
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }
    let panel_width = (display_size[0] * 0.3).clamp(320.0, 480.0);
    let panel_height = (display_size[1] * 0.85).max(400.0);

    ui.window("Scene Input")
        .size([panel_width, panel_height], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            render_input(ui, state, scene);
            ui.separator();
            render_statistics(ui, scene);
            ui.separator();
            render_object_list(ui, state, scene);
            ui.separator();
            if ui.button("Reset Camera") {
                scene.camera_manager.reset();
            }
        });
}

fn render_input(ui: &imgui::Ui, state: &mut PanelState, scene: &mut Scene) {
    ui.text("Scene JSON");
    ui.input_text_multiline("##scene_json", &mut state.input_text, [-1.0, 240.0])
        .build();

    if ui.button("Load") {
        state.apply_load(scene);
    }

    if let Some(message) = state.error {
        ui.text_colored(ERROR_COLOR, message);
    }
}

fn render_statistics(ui: &imgui::Ui, scene: &Scene) {
    let stats = scene.statistics();

    ui.text("Scene Statistics");
    ui.columns(2, "stats", false);
    for (label, value) in [
        ("Objects:", stats.object_count),
        ("Triangles:", stats.total_triangles),
        ("Vertices:", stats.total_vertices),
        ("Edges:", stats.total_edges),
    ] {
        ui.text(label);
        ui.next_column();
        ui.text(format!("{}", value));
        ui.next_column();
    }
    ui.columns(1, "", false);
}

/// Renders the object selection list and the selected object's visibility
fn render_object_list(ui: &imgui::Ui, state: &mut PanelState, scene: &mut Scene) {
    let object_names = scene.get_object_names();

    if object_names.is_empty() {
        ui.text("No Objects");
        return;
    }

    ui.child_window("object_list")
        .size([0.0, 150.0])
        .border(true)
        .build(|| {
            for (i, object_name) in object_names.iter().enumerate() {
                let is_selected = state.selected == Some(i);
                if ui
                    .selectable_config(object_name)
                    .selected(is_selected)
                    .build()
                {
                    state.selected = Some(i);
                }
            }
        });

    let selected = match state.selected {
        Some(i) => scene.groups_mut().nth(i),
        None => None,
    };
    if let Some(group) = selected {
        ui.text(format!("Selected: {}", group.name));
        ui.text(format!(
            "{} triangles, {} edges",
            group.triangle_count(),
            group.edge_count()
        ));
        ui.checkbox("Visible in Scene", &mut group.visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ViewerConfig, error::INVALID_PAYLOAD_MESSAGE, gfx::camera::CameraManager,
    };

    fn scene() -> Scene {
        let config = ViewerConfig::default();
        Scene::new(CameraManager::from_config(&config.camera, 1.0), &config)
    }

    #[test]
    fn test_starts_with_sample() {
        let state = PanelState::new();
        assert_eq!(state.input_text, SAMPLE_PAYLOAD);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_failed_load_sets_error_and_keeps_scene() {
        let mut scene = scene();
        let mut state = PanelState::new();
        assert!(state.apply_load(&mut scene));
        assert_eq!(scene.object_count(), 2);

        state.input_text = "{\"objects\": [".to_string();
        assert!(!state.apply_load(&mut scene));
        assert_eq!(state.error, Some(INVALID_PAYLOAD_MESSAGE));
        assert_eq!(scene.object_count(), 2);
    }

    #[test]
    fn test_successful_load_clears_error() {
        let mut scene = scene();
        let mut state = PanelState {
            input_text: "nope".to_string(),
            error: None,
            selected: Some(1),
        };
        assert!(!state.apply_load(&mut scene));
        assert!(state.error.is_some());

        state.input_text = r#"{"objects": []}"#.to_string();
        assert!(state.apply_load(&mut scene));
        assert_eq!(state.error, None);
        assert_eq!(state.selected, None);
        assert_eq!(scene.object_count(), 0);
    }
}
