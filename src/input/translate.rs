//! winit to [`ViewportEvent`] translation

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use super::ViewportEvent;

/// Pixels of precise scrolling treated as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Converts a winit scroll delta to the viewport convention, where positive
/// means scrolling towards the user.
pub fn wheel_delta(delta: &MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y,
        MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => (-y / PIXELS_PER_LINE) as f32,
    }
}

/// Tracks the cursor so button presses carry a position.
#[derive(Debug, Default)]
pub struct WindowEventTranslator {
    cursor: Option<(f32, f32)>,
}

impl WindowEventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    /// Returns the viewport event for a window event, if it is one.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<ViewportEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                self.cursor = Some((x, y));
                Some(ViewportEvent::PointerMove { x, y })
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                Some(ViewportEvent::PointerLeave)
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    let (x, y) = self.cursor?;
                    Some(ViewportEvent::PointerDown { x, y })
                }
                ElementState::Released => Some(ViewportEvent::PointerUp),
            },
            WindowEvent::MouseWheel { delta, .. } => Some(ViewportEvent::Wheel {
                delta: wheel_delta(delta),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_delta_sign() {
        assert_eq!(wheel_delta(&MouseScrollDelta::LineDelta(0.0, -1.0)), 1.0);
        assert_eq!(wheel_delta(&MouseScrollDelta::LineDelta(0.0, 2.0)), -2.0);
        assert_eq!(
            wheel_delta(&MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -80.0))),
            2.0
        );
    }

    #[test]
    fn test_unrelated_events_ignored() {
        let mut translator = WindowEventTranslator::new();
        assert_eq!(translator.translate(&WindowEvent::CloseRequested), None);
        assert_eq!(translator.cursor(), None);
    }
}
