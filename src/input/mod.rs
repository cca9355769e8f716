//! # Viewport Input
//!
//! Pointer and wheel events for the 3D viewport, decoupled from winit, and
//! a single-threaded dispatcher that delivers them to subscribed listeners.
//!
//! ## Ordering
//!
//! Events are delivered in the order the window system produced them, and
//! each event reaches listeners in subscription order. A `PointerDown`
//! always precedes the moves of its gesture; listeners that track drags
//! (the camera controller) ignore moves that arrive while no drag is active.
//!
//! Listeners are removed with [`EventDispatcher::unsubscribe`] or all at
//! once with [`EventDispatcher::clear`] when the viewer detaches.

pub mod dispatcher;
pub mod translate;

pub use dispatcher::{EventDispatcher, ListenerId};
pub use translate::{wheel_delta, WindowEventTranslator};

/// Input that can affect the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// Primary button pressed at the given cursor position (physical pixels)
    PointerDown { x: f32, y: f32 },
    /// Cursor moved to the given position
    PointerMove { x: f32, y: f32 },
    /// Primary button released
    PointerUp,
    /// Cursor left the viewport
    PointerLeave,
    /// Wheel scrolled; positive means towards the user (zoom out)
    Wheel { delta: f32 },
}
