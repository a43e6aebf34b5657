//! # Input Mapping
//!
//! Raw winit events are translated into [`InputEvent`]s by [`platform`] and
//! handed to the active demo, which maps them to actions (place a cone,
//! switch shader, rotate the camera). Held keys are tracked in
//! [`InputState`] for per-frame polling such as `WASD` movement.
//!
//! Key and button identifiers reuse winit's plain enums so demo handlers can
//! be exercised in tests without a window.

pub mod platform;
pub mod state;

pub use state::InputState;

pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;

/// A platform-independent input event.
///
/// Pointer coordinates are in physical pixels with the origin at the top-left
/// corner of the window, Y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved {
        x: f32,
        y: f32,
    },
    PointerButton {
        button: MouseButton,
        state: ElementState,
        x: f32,
        y: f32,
    },
    Key {
        key: KeyCode,
        state: ElementState,
        repeat: bool,
    },
    /// Surface size in physical pixels.
    Resized {
        width: u32,
        height: u32,
    },
    Focused(bool),
}

impl InputEvent {
    /// True for the first press of `key` (auto-repeat excluded).
    pub fn is_key_press(&self, key: KeyCode) -> bool {
        matches!(
            self,
            InputEvent::Key {
                key: k,
                state: ElementState::Pressed,
                repeat: false,
            } if *k == key
        )
    }
}

/// What the runner should do after a demo handled an event or a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Exit,
}
