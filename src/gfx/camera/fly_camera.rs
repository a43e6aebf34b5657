use super::camera_utils::{Camera, OPENGL_TO_WGPU_MATRIX};
use cgmath::*;

/// Pitch stays within this angle of the horizon so `forward` never aligns with `up`.
pub const MAX_PITCH: f32 = 0.9 * std::f32::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy)]
pub struct FlyCameraConfig {
    pub position: Point3<f32>,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    /// Distance moved per frame while a movement key is held.
    pub linear_speed: f32,
    /// Degrees of rotation per unit of cursor travel in `[-1, 1]` space.
    pub rotation_gain: f32,
}

impl Default for FlyCameraConfig {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 1.6, 0.0),
            fovy: Deg(70.0),
            znear: 0.01,
            zfar: 100.0,
            linear_speed: 0.15,
            rotation_gain: 30.0,
        }
    }
}

/// First-person camera driven by accumulated yaw and pitch.
#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    forward: Vector3<f32>,
    yaw: Rad<f32>,
    pitch: Rad<f32>,
}

impl Camera for FlyCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.position, self.position + self.forward, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl FlyCamera {
    pub fn new(config: &FlyCameraConfig, aspect: f32) -> Self {
        Self {
            position: config.position,
            up: Vector3::unit_y(),
            aspect,
            fovy: config.fovy.into(),
            znear: config.znear,
            zfar: config.zfar,
            forward: -Vector3::unit_z(),
            yaw: Rad(0.0),
            pitch: Rad(0.0),
        }
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    pub fn yaw(&self) -> Rad<f32> {
        self.yaw
    }

    pub fn pitch(&self) -> Rad<f32> {
        self.pitch
    }

    /// Accumulates rotation around the vertical and lateral axes.
    ///
    /// Positive yaw turns left, positive pitch looks up. Pitch is clamped to
    /// [`MAX_PITCH`].
    pub fn add_rotation(&mut self, yaw: impl Into<Rad<f32>>, pitch: impl Into<Rad<f32>>) {
        let yaw: Rad<f32> = yaw.into();
        let pitch: Rad<f32> = pitch.into();
        self.yaw += yaw;
        self.pitch = Rad((self.pitch.0 + pitch.0).clamp(-MAX_PITCH, MAX_PITCH));

        let yawed = Matrix3::from_angle_y(self.yaw) * -Vector3::unit_z();
        let lateral = yawed.cross(self.up).normalize();
        self.forward = (Matrix3::from_axis_angle(lateral, self.pitch) * yawed).normalize();
    }

    /// Horizontal projection of `forward`.
    pub fn forward_xz(&self) -> Vector3<f32> {
        Vector3::new(self.forward.x, 0.0, self.forward.z).normalize()
    }

    /// Horizontal vector pointing to the camera's right.
    pub fn right_xz(&self) -> Vector3<f32> {
        self.forward_xz().cross(self.up).normalize()
    }

    /// Moves in the horizontal plane: `forward` along the view, `right` sideways.
    pub fn move_along(&mut self, forward: f32, right: f32) {
        self.position += self.forward_xz() * forward + self.right_xz() * right;
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> FlyCamera {
        FlyCamera::new(&FlyCameraConfig::default(), 1300.0 / 800.0)
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut camera = camera();
        for _ in 0..50 {
            camera.add_rotation(Deg(3.0), Deg(17.0));
        }
        assert!(camera.pitch().0 <= MAX_PITCH + 1e-6);

        for _ in 0..100 {
            camera.add_rotation(Deg(-5.0), Deg(-23.0));
        }
        assert!(camera.pitch().0 >= -MAX_PITCH - 1e-6);
    }

    #[test]
    fn forward_never_parallel_to_up() {
        let mut camera = camera();
        camera.add_rotation(Deg(0.0), Deg(500.0));
        assert!(camera.forward().cross(camera.up).magnitude() > 0.1);
        assert!((camera.forward().magnitude() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn positive_pitch_looks_up_and_negative_yaw_turns_right() {
        let mut looking_up = camera();
        looking_up.add_rotation(Deg(0.0), Deg(10.0));
        assert!(looking_up.forward().y > 0.0);

        let mut turned = camera();
        turned.add_rotation(Deg(-10.0), Deg(0.0));
        assert!(turned.forward().x > 0.0);
    }

    #[test]
    fn moves_stay_horizontal() {
        let mut camera = camera();
        camera.add_rotation(Deg(30.0), Deg(40.0));
        let start = camera.position;

        camera.move_along(0.15, 0.0);
        assert!((camera.position.y - start.y).abs() < 1e-6);
        assert!(((camera.position - start).magnitude() - 0.15).abs() < 1e-5);
    }

    #[test]
    fn default_projection() {
        let camera = camera();
        assert_eq!(camera.position, Point3::new(0.0, 1.6, 0.0));
        assert!((camera.fovy.0 - 70f32.to_radians()).abs() < 1e-6);
        assert_eq!((camera.znear, camera.zfar), (0.01, 100.0));
    }
}
