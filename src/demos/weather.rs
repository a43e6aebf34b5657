//! Fly-through scene with two planes and rain.
//!
//! The rain column is a fixed set of line segments that loops vertically and
//! follows the camera horizontally, so the viewer never walks out of it.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::app::Demo;
use crate::gfx::{
    camera::{Camera, FlyCamera, FlyCameraConfig, FlyCameraController},
    geometry::{
        generate_floor, generate_line_segment, generate_plane_body, generate_plane_propeller,
        generate_plane_wing, Topology,
    },
    rendering::{DrawList, PipelineSpec},
    scene::{MeshArena, MeshId, PlanePart, RainDrop, SceneStore, StaticMesh},
    shaders::{ShaderProgram, SCENE_WGSL},
    transform::{plane_transform, FrameTransforms, RainWrap, Viewport},
};
use crate::input::{AppControl, InputEvent, InputState, KeyCode};
use crate::time::FrameTime;

const SHADER_NAME: &str = "scene";
const TRIANGLE_PIPELINE: &str = "scene_triangles";
const LINE_PIPELINE: &str = "scene_lines";
const SCENE_UNIFORMS: &[&str] = &["model_view_proj", "color"];

/// Propeller spin in radians per second.
const PROPELLER_SPIN: f32 = 10.0;

#[derive(Debug, Clone, Copy)]
pub struct RainConfig {
    /// Height a streak restarts from.
    pub height: f32,
    /// Number of streaks.
    pub amount: usize,
    /// Initial fall speed in units per second.
    pub velocity: f32,
    /// Streak length.
    pub length: f32,
    /// Streaks are scattered over `[-spread_x, spread_x)` around the camera.
    pub spread_x: f32,
    pub spread_z: f32,
    /// Velocity change per frame while `Up`/`Down` is held.
    pub velocity_step: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            height: 10.0,
            amount: 400,
            velocity: 5.0,
            length: 0.1,
            spread_x: 2.0,
            spread_z: 2.0,
            velocity_step: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WeatherConfig {
    pub rain: RainConfig,
    pub camera: FlyCameraConfig,
    pub floor_half_extent: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            rain: RainConfig::default(),
            camera: FlyCameraConfig::default(),
            floor_half_extent: 10.0,
        }
    }
}

struct PlaneMeshes {
    body: MeshId,
    wing: MeshId,
    propeller: MeshId,
}

pub struct WeatherDemo {
    rain: RainConfig,
    rain_velocity: f32,
    meshes: MeshArena,
    scene: SceneStore,
    camera: FlyCamera,
    controller: FlyCameraController,
    viewport: Viewport,
}

impl WeatherDemo {
    pub fn new(config: WeatherConfig) -> Self {
        Self::with_rng(config, &mut StdRng::from_os_rng())
    }

    /// Builds the scene, scattering the rain with `rng`.
    pub fn with_rng(config: WeatherConfig, rng: &mut impl Rng) -> Self {
        let mut meshes = MeshArena::new();
        let mut scene = SceneStore::new();

        let floor = meshes.insert("floor", generate_floor(config.floor_half_extent));
        scene.append(StaticMesh {
            mesh: floor,
            model: Matrix4::identity(),
        });

        let plane = PlaneMeshes {
            body: meshes.insert("plane_body", generate_plane_body()),
            wing: meshes.insert("plane_wing", generate_plane_wing()),
            propeller: meshes.insert("plane_propeller", generate_plane_propeller()),
        };
        scene.extend(plane_parts(
            &plane,
            plane_transform(Vector3::new(-2.0, 0.5, 2.0), Rad(FRAC_PI_4)),
        ));
        scene.extend(plane_parts(
            &plane,
            plane_transform(Vector3::new(2.0, 0.5, -2.0), Rad(3.0 * FRAC_PI_4)),
        ));

        let rain = config.rain;
        let streak = meshes.insert(
            "rain_streak",
            generate_line_segment([0.0, rain.length, 0.0], [0.0, 0.0, 0.0]),
        );
        scene.extend((0..rain.amount).map(|_| RainDrop {
            mesh: streak,
            offset: Vector3::new(
                rng.random_range(-rain.spread_x..rain.spread_x),
                rng.random_range(0.0..rain.height),
                rng.random_range(-rain.spread_z..rain.spread_z),
            ),
            color: [1.0, 1.0, 1.0],
        }));

        log::info!(
            "Weather scene: {} objects, {} meshes",
            scene.len(),
            meshes.len()
        );

        Self {
            rain,
            rain_velocity: rain.velocity,
            meshes,
            scene,
            camera: FlyCamera::new(&config.camera, 1.0),
            controller: FlyCameraController::from_config(&config.camera),
            viewport: Viewport::new(1, 1),
        }
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn rain_velocity(&self) -> f32 {
        self.rain_velocity
    }

    pub fn scene(&self) -> &SceneStore {
        &self.scene
    }

    fn rain_wrap(&self) -> RainWrap {
        RainWrap {
            height: self.rain.height,
            length: self.rain.length,
            velocity: self.rain_velocity,
        }
    }
}

/// The six parts of one plane placed at `base`.
fn plane_parts(meshes: &PlaneMeshes, base: Matrix4<f32>) -> Vec<PlanePart> {
    let back = Matrix4::from_translation(Vector3::new(0.0, -0.5, 0.0));
    let part = |mesh, attach| PlanePart {
        mesh,
        base,
        attach,
        spin: None,
        orient: Matrix4::identity(),
    };

    vec![
        part(meshes.body, Matrix4::identity()),
        part(meshes.wing, Matrix4::identity()),
        part(meshes.wing, Matrix4::from_nonuniform_scale(-1.0, 1.0, 1.0)),
        part(meshes.wing, back * Matrix4::from_nonuniform_scale(0.5, 0.5, 0.5)),
        part(meshes.wing, back * Matrix4::from_nonuniform_scale(-0.5, 0.5, 0.5)),
        PlanePart {
            mesh: meshes.propeller,
            base,
            attach: Matrix4::from_translation(Vector3::new(0.0, 0.5, 0.0)),
            spin: Some(PROPELLER_SPIN),
            orient: Matrix4::from_angle_x(Rad(FRAC_PI_2)) * Matrix4::from_scale(0.5),
        },
    ]
}

impl Demo for WeatherDemo {
    fn shader_programs(&self) -> Vec<ShaderProgram> {
        vec![ShaderProgram::from_wgsl(SHADER_NAME, SCENE_WGSL)]
    }

    fn pipelines(&self) -> Vec<PipelineSpec> {
        [
            (TRIANGLE_PIPELINE, Topology::TriangleList),
            (LINE_PIPELINE, Topology::LineList),
        ]
        .into_iter()
        .map(|(name, topology)| PipelineSpec {
            name,
            shader: SHADER_NAME,
            fragment_entry: "fs_main",
            topology,
            required_uniforms: SCENE_UNIFORMS,
        })
        .collect()
    }

    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: 0.3,
            g: 0.3,
            b: 0.3,
            a: 1.0,
        }
    }

    fn handle_input(&mut self, event: &InputEvent, _input: &InputState) -> AppControl {
        match *event {
            InputEvent::PointerMoved { x, y } => {
                self.controller
                    .process_cursor(x, y, self.viewport, &mut self.camera);
            }
            InputEvent::Resized { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.camera.resize_projection(width, height);
            }
            _ => {}
        }
        AppControl::Continue
    }

    fn update(&mut self, _time: &FrameTime, input: &InputState) -> AppControl {
        self.controller.process_keys(input, &mut self.camera);

        if input.key_down(KeyCode::ArrowUp) {
            self.rain_velocity += self.rain.velocity_step;
        }
        if input.key_down(KeyCode::ArrowDown) {
            self.rain_velocity -= self.rain.velocity_step;
        }
        AppControl::Continue
    }

    fn record(&self, time: &FrameTime, draws: &mut DrawList) {
        let frame = FrameTransforms {
            view_projection: self.camera.build_view_projection_matrix(),
            time: time.elapsed,
            camera_position: self.camera.position,
            rain: self.rain_wrap(),
        };

        for object in &self.scene {
            let pipeline = match self.meshes.topology(object.mesh()) {
                Some(Topology::TriangleList) => TRIANGLE_PIPELINE,
                Some(Topology::LineList) => LINE_PIPELINE,
                None => continue,
            };
            draws.push(pipeline, object.mesh(), object.uniforms(&frame));
        }
    }

    fn meshes_mut(&mut self) -> &mut MeshArena {
        &mut self.meshes
    }

    fn hud_lines(&self) -> Vec<String> {
        let p = self.camera.position;
        vec![
            format!("Camera: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
            format!("Rain velocity: {:.2} (Up/Down)", self.rain_velocity),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ElementState;

    fn demo() -> WeatherDemo {
        let mut demo = WeatherDemo::with_rng(WeatherConfig::default(), &mut StdRng::seed_from_u64(3));
        demo.handle_input(
            &InputEvent::Resized {
                width: 1300,
                height: 800,
            },
            &InputState::default(),
        );
        demo
    }

    fn frame(elapsed: f32) -> FrameTime {
        FrameTime {
            elapsed,
            dt: 0.02,
            frame_index: 0,
        }
    }

    fn holding(key: KeyCode) -> InputState {
        let mut input = InputState::default();
        input.apply_event(&InputEvent::Key {
            key,
            state: ElementState::Pressed,
            repeat: false,
        });
        input
    }

    #[test]
    fn records_floor_planes_and_rain() {
        let demo = demo();
        let mut draws = DrawList::new();
        demo.record(&frame(0.0), &mut draws);

        assert_eq!(draws.len(), 1 + 12 + 400);
        let lines = draws
            .iter()
            .filter(|draw| draw.pipeline == LINE_PIPELINE)
            .count();
        assert_eq!(lines, 400);
    }

    #[test]
    fn rain_starts_inside_the_column() {
        let demo = demo();
        let rain = RainConfig::default();
        for object in demo.scene() {
            if let crate::gfx::scene::SceneObject::RainDrop(drop) = object {
                assert!(drop.offset.x >= -rain.spread_x && drop.offset.x < rain.spread_x);
                assert!(drop.offset.y >= 0.0 && drop.offset.y < rain.height);
                assert!(drop.offset.z >= -rain.spread_z && drop.offset.z < rain.spread_z);
            }
        }
    }

    fn plane_meshes() -> PlaneMeshes {
        let mut meshes = MeshArena::new();
        PlaneMeshes {
            body: meshes.insert("body", generate_plane_body()),
            wing: meshes.insert("wing", generate_plane_wing()),
            propeller: meshes.insert("propeller", generate_plane_propeller()),
        }
    }

    fn assert_point(actual: cgmath::Vector4<f32>, expected: [f32; 3]) {
        let [x, y, z] = expected;
        assert!(
            (actual.x - x).abs() < 1e-5 && (actual.y - y).abs() < 1e-5 && (actual.z - z).abs() < 1e-5,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn wings_are_mirrored_and_scaled_behind_the_body() {
        let parts = plane_parts(&plane_meshes(), Matrix4::identity());
        let tip = cgmath::Vector4::new(0.8, 0.0, 0.0, 1.0);

        assert_point(parts[1].model(0.0) * tip, [0.8, 0.0, 0.0]);
        assert_point(parts[2].model(0.0) * tip, [-0.8, 0.0, 0.0]);
        assert_point(parts[3].model(0.0) * tip, [0.4, -0.5, 0.0]);
        assert_point(parts[4].model(0.0) * tip, [-0.4, -0.5, 0.0]);
    }

    #[test]
    fn wing_parts_follow_the_plane_base() {
        let base = plane_transform(Vector3::new(-2.0, 0.5, 2.0), Rad(FRAC_PI_4));
        let parts = plane_parts(&plane_meshes(), base);
        let tip = cgmath::Vector4::new(0.8, 0.0, 0.0, 1.0);

        // rotate_x leaves x alone, so the back-wing offset (0, -0.5, 0) tilts into y and z
        let (s, c) = FRAC_PI_4.sin_cos();
        assert_point(parts[2].model(0.0) * tip, [-2.8, 0.5, 2.0]);
        assert_point(parts[3].model(0.0) * tip, [-1.6, 0.5 - 0.5 * c, 2.0 - 0.5 * s]);
        assert_point(parts[4].model(0.0) * tip, [-2.4, 0.5 - 0.5 * c, 2.0 - 0.5 * s]);
    }

    #[test]
    fn arrow_keys_change_rain_velocity() {
        let mut demo = demo();

        demo.update(&frame(0.0), &holding(KeyCode::ArrowUp));
        assert!((demo.rain_velocity() - 5.01).abs() < 1e-5);

        demo.update(&frame(0.0), &holding(KeyCode::ArrowDown));
        demo.update(&frame(0.0), &holding(KeyCode::ArrowDown));
        assert!((demo.rain_velocity() - 4.99).abs() < 1e-5);
    }

    #[test]
    fn w_moves_camera_forward() {
        let mut demo = demo();
        let start = demo.camera().position;

        demo.update(&frame(0.0), &holding(KeyCode::KeyW));

        let moved = demo.camera().position;
        assert!((moved.z - (start.z - 0.15)).abs() < 1e-5);
        assert_eq!(moved.y, start.y);
    }

    #[test]
    fn first_pointer_move_only_seeds_rotation() {
        let mut demo = demo();
        let input = InputState::default();

        demo.handle_input(&InputEvent::PointerMoved { x: 900.0, y: 100.0 }, &input);
        assert_eq!(demo.camera().yaw(), Rad(0.0));

        demo.handle_input(&InputEvent::PointerMoved { x: 650.0, y: 100.0 }, &input);
        assert!(demo.camera().yaw().0 > 0.0);
    }
}
