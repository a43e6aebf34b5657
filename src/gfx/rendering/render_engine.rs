//! WGPU-based rendering engine for the demos
//!
//! Owns the surface, device and depth buffer, builds the pipelines a demo
//! asks for, and turns a recorded [`DrawList`] into one draw call per
//! command. Per-draw uniforms live in a single dynamic uniform buffer bound
//! at group 0.

use std::sync::Arc;
use wgpu::{Device, TextureFormat};

use crate::error::{RenderError, Result};
use crate::gfx::{
    geometry::Topology,
    resources::DepthTexture,
    scene::mesh::{DrawMesh, MeshArena},
    shaders::ShaderProgram,
};
use crate::wgpu_utils::{binding_types, DynamicUniformBuffer};

use super::draw_list::{DrawList, ObjectUniform};
use super::pipeline_manager::{PipelineConfig, PipelineManager};

/// Draw slots allocated up front; the buffer grows on demand.
const INITIAL_DRAW_CAPACITY: usize = 256;

/// A named pipeline a demo wants the engine to build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSpec {
    pub name: &'static str,
    pub shader: &'static str,
    pub fragment_entry: &'static str,
    pub topology: Topology,
    /// Uniform fields the shader must declare.
    pub required_uniforms: &'static [&'static str],
}

/// Result of one [`RenderEngine::render_frame`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented { draw_calls: usize },
    /// No frame was presented; the next redraw can try again.
    Skipped,
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn classify(error: &wgpu::SurfaceError) -> Self {
        match error {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                SurfaceErrorAction::Reconfigured
            }
            wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => {
                SurfaceErrorAction::SkipFrame
            }
        }
    }
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: DepthTexture,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    object_layout: wgpu::BindGroupLayout,
    object_uniforms: DynamicUniformBuffer<ObjectUniform>,
    object_bind_group: wgpu::BindGroup,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `present_mode` - Preferred present mode; falls back to `Fifo` when unsupported
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        present_mode: wgpu::PresentMode,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let info = adapter.get_info();
        log::info!("Using adapter '{}' ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;

        let present_mode = if surface_capabilities.present_modes.contains(&present_mode) {
            present_mode
        } else {
            log::warn!("Present mode {present_mode:?} unsupported, using Fifo");
            wgpu::PresentMode::Fifo
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = DepthTexture::create(&device, &config, "depth_texture");

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: binding_types::uniform_dynamic(std::mem::size_of::<ObjectUniform>() as u64),
                count: None,
            }],
        });

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let object_uniforms =
            DynamicUniformBuffer::<ObjectUniform>::new(&device, alignment, INITIAL_DRAW_CAPACITY);
        let object_bind_group = create_object_bind_group(&device, &object_layout, &object_uniforms);

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let pipeline_manager = PipelineManager::new(device_handle.clone());

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            object_layout,
            object_uniforms,
            object_bind_group,
        })
    }

    /// Loads `shaders` and builds every pipeline in `specs`.
    ///
    /// Fails on the first shader, attribute or uniform lookup that does not resolve.
    pub fn register_pipelines(&mut self, shaders: &[ShaderProgram], specs: &[PipelineSpec]) -> Result<()> {
        for shader in shaders {
            self.pipeline_manager.load_shader(shader.clone());
        }

        for spec in specs {
            self.pipeline_manager.register_pipeline(
                spec.name,
                PipelineConfig::default_with_shader(spec.shader)
                    .with_label(spec.name)
                    .with_fragment_entry(spec.fragment_entry)
                    .with_primitive_topology(spec.topology.to_wgpu())
                    .with_bind_group_layouts(vec![self.object_layout.clone()])
                    .with_color_format(self.format)
                    .with_depth_format(Some(DepthTexture::DEPTH_FORMAT))
                    .with_required_uniforms(spec.required_uniforms),
            );
        }

        self.pipeline_manager.create_all_pipelines()?;
        let stats = self.pipeline_manager.get_stats();
        log::info!(
            "Registered {} pipelines from {} shaders",
            stats.total_pipelines,
            stats.loaded_shaders
        );
        Ok(())
    }

    /// Uploads pending meshes, then draws `draws` in order and presents.
    ///
    /// Every command's pipeline is checked before the surface is acquired.
    /// Lost or outdated surfaces are reconfigured and the frame is skipped;
    /// running out of memory is returned as [`RenderError::OutOfMemory`].
    pub fn render_frame<F>(
        &mut self,
        meshes: &mut MeshArena,
        draws: &DrawList,
        clear_color: wgpu::Color,
        ui_callback: Option<F>,
    ) -> Result<FrameOutcome>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        meshes.upload_pending(&self.device);

        for command in draws.iter() {
            if self.pipeline_manager.get_pipeline(command.pipeline).is_none() {
                return Err(RenderError::PipelineNotFound {
                    name: command.pipeline.to_owned(),
                });
            }
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(error) => {
                return match self.handle_surface_error(error) {
                    SurfaceErrorAction::Fatal => Err(RenderError::OutOfMemory),
                    _ => Ok(FrameOutcome::Skipped),
                };
            }
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if self
            .object_uniforms
            .write(&self.device, &self.queue, &draws.uniforms())
        {
            self.object_bind_group =
                create_object_bind_group(&self.device, &self.object_layout, &self.object_uniforms);
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let mut draw_calls = 0;
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let mut bound_pipeline: Option<&str> = None;
            for (slot, command) in draws.iter().enumerate() {
                // empty geometry is never uploaded
                let Some(mesh) = meshes.gpu(command.mesh) else {
                    continue;
                };
                if bound_pipeline != Some(command.pipeline) {
                    if let Some(pipeline) = self.pipeline_manager.get_pipeline(command.pipeline) {
                        render_pass.set_pipeline(pipeline);
                    }
                    bound_pipeline = Some(command.pipeline);
                }
                render_pass.set_bind_group(
                    0,
                    &self.object_bind_group,
                    &[self.object_uniforms.offset_of(slot)],
                );
                render_pass.draw_gpu_mesh(mesh);
                draw_calls += 1;
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        Ok(FrameOutcome::Presented { draw_calls })
    }

    fn handle_surface_error(&mut self, error: wgpu::SurfaceError) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::classify(&error);
        match action {
            SurfaceErrorAction::Reconfigured => {
                log::warn!("Surface {error:?}, reconfiguring");
                self.surface.configure(&self.device, &self.config);
            }
            SurfaceErrorAction::SkipFrame => log::warn!("Surface {error:?}, skipping frame"),
            SurfaceErrorAction::Fatal => log::error!("Surface {error:?}"),
        }
        action
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;

        self.surface.configure(&self.device, &self.config);

        self.depth_texture = DepthTexture::create(&self.device, &self.config, "depth_texture");
        log::debug!("Surface resized to {width}x{height}");
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

fn create_object_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniforms: &DynamicUniformBuffer<ObjectUniform>,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Object Uniform Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniforms.binding_resource(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_errors_map_to_actions() {
        assert_eq!(
            SurfaceErrorAction::classify(&wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            SurfaceErrorAction::classify(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            SurfaceErrorAction::classify(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            SurfaceErrorAction::classify(&wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
    }
}
