use cgmath::{Deg, InnerSpace, Vector2};

use super::fly_camera::{FlyCamera, FlyCameraConfig};
use crate::gfx::transform::{cursor_in_range, Viewport};
use crate::input::{InputState, KeyCode};

/// Cursor moves up to this length (squared, in `[-1, 1]` space) are ignored.
const ROTATION_THRESHOLD: f32 = 1e-5;

fn exceeds_rotation_threshold(distance_squared: f32) -> bool {
    distance_squared > ROTATION_THRESHOLD
}

/// Drives a [`FlyCamera`] from pointer position and held WASD keys.
pub struct FlyCameraController {
    pub linear_speed: f32,
    pub rotation_gain: f32,
    last_cursor: Option<Vector2<f32>>,
}

impl FlyCameraController {
    pub fn new(linear_speed: f32, rotation_gain: f32) -> Self {
        Self {
            linear_speed,
            rotation_gain,
            last_cursor: None,
        }
    }

    pub fn from_config(config: &FlyCameraConfig) -> Self {
        Self::new(config.linear_speed, config.rotation_gain)
    }

    /// Rotates the camera by the cursor travel since the previous call.
    ///
    /// The first position only seeds the reference. Returns whether the
    /// camera rotated.
    pub fn process_cursor(
        &mut self,
        x: f32,
        y: f32,
        viewport: Viewport,
        camera: &mut FlyCamera,
    ) -> bool {
        let (cx, cy) = cursor_in_range(x, y, viewport.width, viewport.height, -1.0, 1.0);
        let cursor = Vector2::new(cx, cy);

        let Some(last) = self.last_cursor else {
            self.last_cursor = Some(cursor);
            return false;
        };

        let delta = cursor - last;
        if !exceeds_rotation_threshold(delta.magnitude2()) {
            return false;
        }

        camera.add_rotation(
            Deg(-delta.x * self.rotation_gain),
            Deg(delta.y * self.rotation_gain),
        );
        self.last_cursor = Some(cursor);
        true
    }

    /// Applies one frame of movement for the held movement keys.
    pub fn process_keys(&self, input: &InputState, camera: &mut FlyCamera) {
        let axis = |positive: KeyCode, negative: KeyCode| {
            let mut value = 0.0;
            if input.key_down(positive) {
                value += 1.0;
            }
            if input.key_down(negative) {
                value -= 1.0;
            }
            value
        };

        let forward = axis(KeyCode::KeyW, KeyCode::KeyS);
        let right = axis(KeyCode::KeyD, KeyCode::KeyA);
        if forward != 0.0 || right != 0.0 {
            camera.move_along(forward * self.linear_speed, right * self.linear_speed);
        }
    }
}
