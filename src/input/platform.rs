//! winit → [`InputEvent`] translation.

use winit::event::{KeyEvent, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::{InputEvent, InputState};

/// Translates a winit `WindowEvent` into an [`InputEvent`].
///
/// Returns `None` for events the demos do not consume. When the cursor is
/// grabbed, pointer positions come from [`VirtualCursor`] instead and
/// `CursorMoved` is ignored.
pub fn translate_window_event(
    event: &WindowEvent,
    state: &InputState,
    cursor_grabbed: bool,
) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(focused) => Some(InputEvent::Focused(*focused)),

        WindowEvent::CursorMoved { position, .. } if !cursor_grabbed => {
            Some(InputEvent::PointerMoved {
                x: position.x as f32,
                y: position.y as f32,
            })
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            // winit 0.30 has no cursor query; use the tracked position.
            let (x, y) = state.pointer_pos.unwrap_or((0.0, 0.0));
            Some(InputEvent::PointerButton {
                button: *button,
                state: *st,
                x,
                y,
            })
        }

        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(key),
                    state: st,
                    repeat,
                    ..
                },
            ..
        } => Some(InputEvent::Key {
            key: *key,
            state: *st,
            repeat: *repeat,
        }),

        WindowEvent::Resized(size) => Some(InputEvent::Resized {
            width: size.width,
            height: size.height,
        }),

        _ => None,
    }
}

/// Unbounded pointer position accumulated from raw mouse motion.
///
/// Used while the cursor is hidden and locked so that looking around keeps
/// working past the window edges.
#[derive(Debug, Default, Clone, Copy)]
pub struct VirtualCursor {
    x: f64,
    y: f64,
}

impl VirtualCursor {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn apply_motion(&mut self, delta: (f64, f64)) -> InputEvent {
        self.x += delta.0;
        self.y += delta.1;
        InputEvent::PointerMoved {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}
