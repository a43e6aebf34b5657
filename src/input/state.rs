use std::collections::HashSet;

use super::{ElementState, InputEvent, KeyCode, MouseButton};

/// Current input state for the demo window.
///
/// Holds "is down" information and the last pointer position. Focus loss
/// clears the held sets so keys do not stay stuck.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    pub pointer_pos: Option<(f32, f32)>,
    pub keys_down: HashSet<KeyCode>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }
            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some((x, y));
            }
            InputEvent::PointerButton {
                button, state, x, y, ..
            } => {
                self.pointer_pos = Some((x, y));
                match state {
                    ElementState::Pressed => {
                        self.buttons_down.insert(button);
                    }
                    ElementState::Released => {
                        self.buttons_down.remove(&button);
                    }
                }
            }
            InputEvent::Key { key, state, .. } => match state {
                ElementState::Pressed => {
                    self.keys_down.insert(key);
                }
                ElementState::Released => {
                    self.keys_down.remove(&key);
                }
            },
            InputEvent::Resized { .. } => {}
        }
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: KeyCode, state: ElementState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            repeat: false,
        }
    }

    #[test]
    fn tracks_held_keys() {
        let mut input = InputState::default();
        input.apply_event(&key(KeyCode::KeyW, ElementState::Pressed));
        assert!(input.key_down(KeyCode::KeyW));

        input.apply_event(&key(KeyCode::KeyW, ElementState::Released));
        assert!(!input.key_down(KeyCode::KeyW));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut input = InputState::default();
        input.apply_event(&key(KeyCode::KeyA, ElementState::Pressed));
        input.apply_event(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: ElementState::Pressed,
            x: 10.0,
            y: 20.0,
        });
        assert!(input.button_down(MouseButton::Left));
        assert_eq!(input.pointer_pos, Some((10.0, 20.0)));

        input.apply_event(&InputEvent::Focused(false));
        assert!(!input.key_down(KeyCode::KeyA));
        assert!(!input.button_down(MouseButton::Left));
    }
}
