//! Demo runner: owns the window, the render engine and the frame loop.
//!
//! A [`Demo`] only deals with input events, per-frame updates and draw
//! recording. [`DemoApp`] drives it from a winit event loop, paces frames with
//! [`FramePacer`] and renders the recorded [`DrawList`] every redraw.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

use crate::config::AppConfig;
use crate::error::RenderError;
use crate::gfx::{
    rendering::{DrawList, FrameOutcome, PipelineSpec, RenderEngine},
    scene::mesh::MeshArena,
    shaders::ShaderProgram,
};
use crate::input::{
    platform::{translate_window_event, VirtualCursor},
    AppControl, InputEvent, InputState,
};
use crate::performance::FrameStats;
use crate::time::{FrameClock, FramePacer, FrameTime};
use crate::ui::{hud_panel, UiManager};

/// An interactive scene driven by [`DemoApp`].
pub trait Demo {
    /// Shader programs the demo's pipelines are built from.
    fn shader_programs(&self) -> Vec<ShaderProgram>;

    /// Pipelines referenced by the draw commands the demo records.
    fn pipelines(&self) -> Vec<PipelineSpec>;

    fn clear_color(&self) -> wgpu::Color;

    /// Reacts to one input event. `input` already reflects the event.
    fn handle_input(&mut self, event: &InputEvent, input: &InputState) -> AppControl;

    /// Advances the demo by one frame.
    fn update(&mut self, time: &FrameTime, input: &InputState) -> AppControl;

    /// Records this frame's draw commands.
    fn record(&self, time: &FrameTime, draws: &mut DrawList);

    fn meshes_mut(&mut self) -> &mut MeshArena;

    /// Demo-specific HUD lines.
    fn hud_lines(&self) -> Vec<String> {
        Vec::new()
    }
}

pub struct DemoApp<D: Demo> {
    state: AppState<D>,
}

struct AppState<D: Demo> {
    config: AppConfig,
    demo: D,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    input: InputState,
    virtual_cursor: Option<VirtualCursor>,
    clock: FrameClock,
    pacer: FramePacer,
    stats: FrameStats,
    draws: DrawList,
    last_present: Option<Instant>,
    error: Option<anyhow::Error>,
}

impl<D: Demo> DemoApp<D> {
    pub fn new(config: AppConfig, demo: D) -> Self {
        let pacer = FramePacer::new(config.frame_interval);
        Self {
            state: AppState {
                config,
                demo,
                window: None,
                render_engine: None,
                ui_manager: None,
                input: InputState::default(),
                virtual_cursor: None,
                clock: FrameClock::new(),
                pacer,
                stats: FrameStats::new(),
                draws: DrawList::new(),
                last_present: None,
                error: None,
            },
        }
    }

    /// Runs the event loop until the window closes or the demo exits.
    ///
    /// Initialization and fatal render errors stop the loop and are returned here.
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()
            .map_err(RenderError::from)
            .context("failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        log::info!("Starting '{}'", self.state.config.window.title);
        event_loop
            .run_app(&mut self.state)
            .map_err(RenderError::from)
            .context("event loop terminated with an error")?;

        match self.state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl<D: Demo> AppState<D> {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.config.window;
        let attributes = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(RenderError::from)
                .context("failed to create window")?,
        );

        let (width, height): (u32, u32) = window.inner_size().into();

        if window_config.grab_cursor {
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            match grabbed {
                Ok(()) => {
                    window.set_cursor_visible(false);
                    self.virtual_cursor =
                        Some(VirtualCursor::new(width as f64 / 2.0, height as f64 / 2.0));
                }
                Err(e) => log::warn!("Cursor grab unavailable, using window cursor: {e}"),
            }
        }

        let mut renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.present_mode,
        ))
        .context("failed to initialize renderer")?;

        renderer
            .register_pipelines(&self.demo.shader_programs(), &self.demo.pipelines())
            .context("failed to build pipelines")?;

        if self.config.show_hud {
            let mut ui_manager = UiManager::new(
                renderer.device(),
                renderer.queue(),
                renderer.surface_format(),
                &window,
            );
            ui_manager.update_display_size(width, height);
            self.ui_manager = Some(ui_manager);
        }

        self.render_engine = Some(renderer);
        self.window = Some(window);

        // demos size their projection from this
        self.dispatch(event_loop, InputEvent::Resized { width, height });
        Ok(())
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: InputEvent) {
        self.input.apply_event(&event);
        if self.demo.handle_input(&event, &self.input) == AppControl::Exit {
            log::info!("Demo requested exit");
            event_loop.exit();
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        self.pacer.begin_frame(now);
        let time = self.clock.tick(now);

        if self.demo.update(&time, &self.input) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        self.draws.clear();
        self.demo.record(&time, &mut self.draws);

        let Self {
            config,
            demo,
            window,
            render_engine,
            ui_manager,
            stats,
            draws,
            ..
        } = self;
        let (Some(render_engine), Some(window)) = (render_engine.as_mut(), window.as_ref()) else {
            return;
        };

        let clear_color = demo.clear_color();
        let mut hud_lines = stats.summary_lines();
        hud_lines.extend(demo.hud_lines());
        let title = config.window.title.as_str();

        let outcome = match ui_manager.as_mut() {
            Some(ui_manager) => render_engine.render_frame(
                demo.meshes_mut(),
                draws,
                clear_color,
                Some(|device: &wgpu::Device, queue: &wgpu::Queue, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView| {
                    ui_manager.draw(device, queue, encoder, window, view, |ui| {
                        hud_panel(ui, title, &hud_lines);
                    });
                }),
            ),
            None => render_engine.render_frame(
                demo.meshes_mut(),
                draws,
                clear_color,
                None::<fn(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView)>,
            ),
        };

        match outcome {
            Ok(FrameOutcome::Presented { draw_calls }) => {
                if let Some(last) = self.last_present {
                    self.stats.record_frame(now - last, draw_calls);
                }
                self.last_present = Some(now);
            }
            Ok(FrameOutcome::Skipped) => {}
            Err(e) => self.fail(event_loop, anyhow::Error::new(e).context("rendering failed")),
        }
    }
}

impl<D: Demo> ApplicationHandler for AppState<D> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Handle UI input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            if ui_manager.handle_input(&window, &event) {
                return;
            }
        }

        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(size) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(size.width, size.height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                return;
            }
            _ => (),
        }

        let grabbed = self.virtual_cursor.is_some();
        if let Some(input_event) = translate_window_event(&event, &self.input, grabbed) {
            self.dispatch(event_loop, input_event);
        }
    }

    fn device_event(&mut self, event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            let Some(cursor) = self.virtual_cursor.as_mut() else {
                return;
            };
            let pointer = cursor.apply_motion(delta);
            self.dispatch(event_loop, pointer);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        match self.pacer.next_deadline() {
            Some(deadline) if !self.pacer.is_due(Instant::now()) => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => {
                event_loop.set_control_flow(ControlFlow::Wait);
                window.request_redraw();
            }
        }
    }
}
