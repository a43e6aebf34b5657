//! Per-frame transform math shared by both demos.
//!
//! Screen-space helpers map window pixels to normalized device coordinates;
//! the world-space helpers compose the plane hierarchy and the looping rain.

use cgmath::{Matrix4, Point3, Rad, Vector3};

/// Drawable surface size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Maps a pixel position to NDC. `(0, 0)` is the top-left corner and maps to `(-1, 1)`.
pub fn screen_to_ndc(x: f32, y: f32, viewport: Viewport) -> (f32, f32) {
    let ndc_x = 2.0 * x / viewport.width - 1.0;
    let ndc_y = -(2.0 * y / viewport.height - 1.0);
    (ndc_x, ndc_y)
}

/// Maps a pixel position onto a symmetric `[min, max]` range centred on the window.
///
/// The y axis is flipped so that moving the pointer up yields larger values.
pub fn cursor_in_range(x: f32, y: f32, width: f32, height: f32, min: f32, max: f32) -> (f32, f32) {
    let span = max - min;
    let x_in_range = x / width * span - span / 2.0;
    let y_in_range = y / height * span - span / 2.0;
    (x_in_range, -y_in_range)
}

/// Vertical loop of a falling rain streak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainWrap {
    /// Height the streak restarts from.
    pub height: f32,
    /// Length of one streak.
    pub length: f32,
    /// Fall speed in units per second; negative values make the rain rise.
    pub velocity: f32,
}

impl Default for RainWrap {
    fn default() -> Self {
        Self {
            height: 10.0,
            length: 0.1,
            velocity: 5.0,
        }
    }
}

impl RainWrap {
    pub fn period(&self) -> f32 {
        self.height + self.length
    }

    /// Height of a streak with phase `base` at `time` seconds.
    ///
    /// The floored modulo keeps the result in `(height - period, height]`
    /// for any sign of velocity.
    pub fn y(&self, base: f32, time: f32) -> f32 {
        self.height - (base + time * self.velocity).rem_euclid(self.period())
    }
}

/// Root transform of a plane: placed at `position`, pitched about x.
pub fn plane_transform(position: Vector3<f32>, pitch: Rad<f32>) -> Matrix4<f32> {
    Matrix4::from_translation(position) * Matrix4::from_angle_x(pitch)
}

/// Rotation about y by `rate` radians per second at `time`.
pub fn spin(rate: f32, time: f32) -> Matrix4<f32> {
    Matrix4::from_angle_y(Rad(time * rate))
}

/// Values a demo needs to turn scene objects into per-draw uniforms.
#[derive(Debug, Clone, Copy)]
pub struct FrameTransforms {
    pub view_projection: Matrix4<f32>,
    /// Seconds since start.
    pub time: f32,
    pub camera_position: Point3<f32>,
    pub rain: RainWrap,
}

impl FrameTransforms {
    /// Transforms for scenes drawn directly in NDC.
    pub fn screen_space(time: f32) -> Self {
        Self {
            view_projection: Matrix4::from_scale(1.0),
            time,
            camera_position: Point3::new(0.0, 0.0, 0.0),
            rain: RainWrap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, SquareMatrix, Vector4};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn ndc_corners_and_centre() {
        let viewport = Viewport::new(800, 600);

        assert_eq!(screen_to_ndc(0.0, 0.0, viewport), (-1.0, 1.0));
        assert_eq!(screen_to_ndc(400.0, 300.0, viewport), (0.0, 0.0));
        assert_eq!(screen_to_ndc(800.0, 600.0, viewport), (1.0, -1.0));
    }

    #[test]
    fn cursor_range_matches_ndc_for_unit_range() {
        let (x, y) = cursor_in_range(200.0, 150.0, 800.0, 600.0, -1.0, 1.0);
        let (nx, ny) = screen_to_ndc(200.0, 150.0, Viewport::new(800, 600));
        assert!(approx(x, nx) && approx(y, ny));
    }

    #[test]
    fn rain_wrap_is_periodic() {
        let wrap = RainWrap {
            height: 10.0,
            length: 0.1,
            velocity: 5.0,
        };
        let period_in_time = wrap.period() / wrap.velocity;

        for base in [0.0, 1.3, 7.9] {
            for t in [0.0, 0.25, 3.7] {
                let now = wrap.y(base, t);
                let later = wrap.y(base, t + period_in_time);
                assert!((now - later).abs() < 1e-3, "base {base} t {t}");
                assert!(now <= wrap.height && now > wrap.height - wrap.period());
            }
        }
    }

    #[test]
    fn rain_wrap_stays_in_range_when_rising() {
        let wrap = RainWrap {
            height: 10.0,
            length: 0.1,
            velocity: -2.0,
        };
        for t in [0.0, 1.0, 12.5, 100.0] {
            let y = wrap.y(3.0, t);
            assert!(y <= wrap.height && y > wrap.height - wrap.period());
        }
    }

    #[test]
    fn plane_transform_places_origin() {
        let model = plane_transform(Vector3::new(-2.0, 0.5, 2.0), Deg(45.0).into());
        let origin = model * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(origin.truncate(), Vector3::new(-2.0, 0.5, 2.0));
    }

    #[test]
    fn spin_is_identity_at_time_zero() {
        assert_eq!(spin(10.0, 0.0), Matrix4::identity());
    }
}
