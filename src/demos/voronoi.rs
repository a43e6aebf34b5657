//! Voronoi diagram from depth-tested cones.
//!
//! Every left click drops a wide cone with its apex towards the viewer at the
//! clicked position. With depth testing the nearest apex wins each pixel, so
//! the visible cone regions form the Voronoi cells of the clicked seeds.

use cgmath::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::app::Demo;
use crate::gfx::{
    geometry::{generate_cone_fan, Topology},
    rendering::{DrawList, PipelineSpec},
    scene::{FlatCone, MeshArena, MeshId, SceneStore},
    shaders::{ShaderProgram, ShaderSelector, ShaderVariant, VORONOI_WGSL},
    transform::{screen_to_ndc, FrameTransforms, Viewport},
};
use crate::input::{AppControl, ElementState, InputEvent, InputState, KeyCode, MouseButton};
use crate::time::FrameTime;

const SHADER_NAME: &str = "voronoi";
const CONE_UNIFORMS: &[&str] = &["color", "offset"];

#[derive(Debug, Clone, Copy)]
pub struct VoronoiConfig {
    /// Triangles in the cone fan.
    pub triangle_count: usize,
    /// Rim radius in NDC; large enough that one cone covers the window.
    pub cone_radius: f32,
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            triangle_count: 360,
            cone_radius: 3.0,
        }
    }
}

pub struct VoronoiDemo<R: Rng = StdRng> {
    meshes: MeshArena,
    cone_mesh: MeshId,
    scene: SceneStore,
    shaders: ShaderSelector,
    viewport: Viewport,
    rng: R,
}

impl VoronoiDemo<StdRng> {
    pub fn new(config: VoronoiConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> VoronoiDemo<R> {
    /// Builds the demo with `rng` supplying cone colors.
    pub fn with_rng(config: VoronoiConfig, rng: R) -> Self {
        let mut meshes = MeshArena::new();
        // all cones share this mesh
        let cone_mesh = meshes.insert(
            "voronoi_cone",
            generate_cone_fan(config.triangle_count, config.cone_radius),
        );

        Self {
            meshes,
            cone_mesh,
            scene: SceneStore::new(),
            shaders: ShaderSelector::default(),
            viewport: Viewport::new(1, 1),
            rng,
        }
    }

    pub fn cone_count(&self) -> usize {
        self.scene.len()
    }

    pub fn active_shader(&self) -> ShaderVariant {
        self.shaders.active()
    }

    pub fn scene(&self) -> &SceneStore {
        &self.scene
    }

    /// Places a cone with a random color at the pixel position `(x, y)`.
    pub fn place_cone(&mut self, x: f32, y: f32) {
        let (ndc_x, ndc_y) = screen_to_ndc(x, y, self.viewport);
        let color = [
            self.rng.random::<f32>(),
            self.rng.random::<f32>(),
            self.rng.random::<f32>(),
        ];

        self.scene.append(FlatCone {
            mesh: self.cone_mesh,
            color,
            offset: Vector2::new(ndc_x, ndc_y),
        });
        log::debug!(
            "Placed cone {} at ({ndc_x:.3}, {ndc_y:.3})",
            self.scene.len()
        );
    }

    fn select_shader(&mut self, key: KeyCode) -> bool {
        let variant = match key {
            KeyCode::Digit1 => ShaderVariant::Color,
            KeyCode::Digit2 => ShaderVariant::Distance,
            KeyCode::Digit3 => ShaderVariant::DistanceColor,
            _ => return false,
        };
        self.shaders.select(variant);
        log::info!("Shader: {}", variant.name());
        true
    }
}

impl<R: Rng> Demo for VoronoiDemo<R> {
    fn shader_programs(&self) -> Vec<ShaderProgram> {
        vec![ShaderProgram::from_wgsl(SHADER_NAME, VORONOI_WGSL)]
    }

    fn pipelines(&self) -> Vec<PipelineSpec> {
        ShaderVariant::ALL
            .iter()
            .map(|variant| PipelineSpec {
                name: variant.pipeline_name(),
                shader: SHADER_NAME,
                fragment_entry: variant.fragment_entry(),
                topology: Topology::TriangleList,
                required_uniforms: CONE_UNIFORMS,
            })
            .collect()
    }

    fn clear_color(&self) -> wgpu::Color {
        wgpu::Color::BLACK
    }

    fn handle_input(&mut self, event: &InputEvent, _input: &InputState) -> AppControl {
        match *event {
            InputEvent::PointerButton {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                x,
                y,
            } => self.place_cone(x, y),
            InputEvent::Key {
                key,
                state: ElementState::Pressed,
                repeat: false,
            } => {
                self.select_shader(key);
            }
            InputEvent::Resized { width, height } => {
                self.viewport = Viewport::new(width, height);
            }
            _ => {}
        }
        AppControl::Continue
    }

    fn update(&mut self, _time: &FrameTime, _input: &InputState) -> AppControl {
        AppControl::Continue
    }

    fn record(&self, time: &FrameTime, draws: &mut DrawList) {
        let frame = FrameTransforms::screen_space(time.elapsed);
        let pipeline = self.shaders.active().pipeline_name();

        self.scene.for_each(|object| {
            draws.push(pipeline, object.mesh(), object.uniforms(&frame));
        });
    }

    fn meshes_mut(&mut self) -> &mut MeshArena {
        &mut self.meshes
    }

    fn hud_lines(&self) -> Vec<String> {
        vec![
            format!("Cones: {}", self.scene.len()),
            format!("Shader: {} (1/2/3)", self.shaders.active().name()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::SceneObject;

    fn demo() -> VoronoiDemo {
        let mut demo = VoronoiDemo::with_rng(VoronoiConfig::default(), StdRng::seed_from_u64(7));
        let input = InputState::default();
        demo.handle_input(&InputEvent::Resized { width: 800, height: 600 }, &input);
        demo
    }

    fn frame() -> FrameTime {
        FrameTime {
            elapsed: 0.0,
            dt: 0.0,
            frame_index: 0,
        }
    }

    fn click(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton {
            button: MouseButton::Left,
            state: ElementState::Pressed,
            x,
            y,
        }
    }

    fn press(key: KeyCode) -> InputEvent {
        InputEvent::Key {
            key,
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    #[test]
    fn left_click_places_one_cone_at_ndc() {
        let mut demo = demo();
        let input = InputState::default();

        demo.handle_input(&click(200.0, 150.0), &input);

        assert_eq!(demo.cone_count(), 1);
        let Some(SceneObject::FlatCone(cone)) = demo.scene().iter().next() else {
            panic!("expected a cone");
        };
        assert!((cone.offset.x + 0.5).abs() < 1e-6);
        assert!((cone.offset.y - 0.5).abs() < 1e-6);
        assert!(cone.color.iter().all(|c| (0.0..1.0).contains(c)));
    }

    #[test]
    fn release_and_other_buttons_do_not_place_cones() {
        let mut demo = demo();
        let input = InputState::default();

        demo.handle_input(
            &InputEvent::PointerButton {
                button: MouseButton::Left,
                state: ElementState::Released,
                x: 10.0,
                y: 10.0,
            },
            &input,
        );
        demo.handle_input(
            &InputEvent::PointerButton {
                button: MouseButton::Right,
                state: ElementState::Pressed,
                x: 10.0,
                y: 10.0,
            },
            &input,
        );

        assert_eq!(demo.cone_count(), 0);
    }

    #[test]
    fn digit_keys_switch_shader() {
        let mut demo = demo();
        let input = InputState::default();

        demo.handle_input(&press(KeyCode::Digit2), &input);
        assert_eq!(demo.active_shader(), ShaderVariant::Distance);
        demo.handle_input(&press(KeyCode::Digit3), &input);
        assert_eq!(demo.active_shader(), ShaderVariant::DistanceColor);
        demo.handle_input(&press(KeyCode::Digit1), &input);
        assert_eq!(demo.active_shader(), ShaderVariant::Color);
    }

    #[test]
    fn other_keys_change_nothing() {
        let mut demo = demo();
        let input = InputState::default();

        demo.handle_input(&press(KeyCode::Digit2), &input);
        demo.handle_input(&press(KeyCode::Digit4), &input);
        demo.handle_input(&press(KeyCode::KeyQ), &input);

        assert_eq!(demo.active_shader(), ShaderVariant::Distance);
        assert_eq!(demo.cone_count(), 0);
    }

    #[test]
    fn records_one_draw_per_cone_with_active_pipeline() {
        let mut demo = demo();
        let input = InputState::default();
        let mut draws = DrawList::new();

        demo.record(&frame(), &mut draws);
        assert!(draws.is_empty());

        demo.handle_input(&click(0.0, 0.0), &input);
        demo.handle_input(&click(800.0, 600.0), &input);
        demo.handle_input(&press(KeyCode::Digit3), &input);
        demo.record(&frame(), &mut draws);

        assert_eq!(draws.len(), 2);
        assert!(draws
            .iter()
            .all(|draw| draw.pipeline == "voronoi_distance_color" && draw.mesh == demo.cone_mesh));
    }

    #[test]
    fn cones_share_one_mesh() {
        let mut demo = demo();
        let input = InputState::default();
        for i in 0..5 {
            demo.handle_input(&click(i as f32 * 10.0, 20.0), &input);
        }

        assert_eq!(demo.meshes_mut().len(), 1);
        assert_eq!(demo.cone_count(), 5);
    }

    #[test]
    fn pipelines_cover_every_variant() {
        let demo = demo();
        let names: Vec<_> = demo.pipelines().iter().map(|spec| spec.name).collect();
        assert_eq!(
            names,
            ["voronoi_color", "voronoi_distance", "voronoi_distance_color"]
        );
    }
}
