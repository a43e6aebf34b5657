//! Render pipeline management system for wgpu
//!
//! Pipelines are registered by name and created together once the shared
//! bind group layout exists. Creation validates every shader lookup the
//! pipeline depends on and fails with a named error on the first miss.

use std::{collections::HashMap, sync::Arc};
use wgpu::*;

use crate::error::{RenderError, Result};
use crate::gfx::resources::DepthTexture;
use crate::gfx::scene::vertex::Vertex3D;
use crate::gfx::shaders::ShaderProgram;

/// Configuration for creating a render pipeline
///
/// Defines all parameters needed to create a wgpu render pipeline,
/// including shaders, bind group layouts, and render state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub fragment_entry: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub depth_format: Option<TextureFormat>,
    pub color_targets: Vec<Option<ColorTargetState>>,
    /// Uniform block fields the shader must declare.
    pub required_uniforms: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Default Pipeline".to_string(),
            shader: "scene".to_string(),
            fragment_entry: "fs_main".to_string(),
            bind_group_layouts: Vec::new(),
            primitive_topology: PrimitiveTopology::TriangleList,
            cull_mode: None,
            depth_format: Some(DepthTexture::DEPTH_FORMAT),
            color_targets: vec![Some(ColorTargetState {
                format: TextureFormat::Bgra8Unorm,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
            required_uniforms: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Creates a new config with a specific shader
    pub fn default_with_shader(shader: &str) -> Self {
        Self {
            shader: shader.to_string(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_fragment_entry(mut self, entry: &str) -> Self {
        self.fragment_entry = entry.to_owned();
        self
    }

    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    pub fn with_depth_format(mut self, format: Option<TextureFormat>) -> Self {
        self.depth_format = format;
        self
    }

    /// Uses a single color target of `format`.
    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_targets = vec![Some(ColorTargetState {
            format,
            blend: Some(BlendState::REPLACE),
            write_mask: ColorWrites::ALL,
        })];
        self
    }

    pub fn with_primitive_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.primitive_topology = topology;
        self
    }

    pub fn with_required_uniforms(mut self, uniforms: &[&str]) -> Self {
        self.required_uniforms = uniforms.iter().map(|u| u.to_string()).collect();
        self
    }
}

struct LoadedShader {
    program: ShaderProgram,
    module: ShaderModule,
}

/// Owns shader modules and the render pipelines built from them
pub struct PipelineManager {
    device: Arc<Device>,
    pipelines: HashMap<String, RenderPipeline>,
    pipeline_configs: HashMap<String, PipelineConfig>,
    shaders: HashMap<String, LoadedShader>,
    pending_pipelines: Vec<String>,
}

impl PipelineManager {
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            pipelines: HashMap::new(),
            pipeline_configs: HashMap::new(),
            shaders: HashMap::new(),
            pending_pipelines: Vec::new(),
        }
    }

    /// Registers a pipeline configuration without creating it
    ///
    /// Pipelines are created by [`PipelineManager::create_all_pipelines`].
    pub fn register_pipeline(&mut self, name: &str, config: PipelineConfig) {
        self.pipeline_configs.insert(name.to_string(), config);
        if !self.pending_pipelines.iter().any(|n| n == name) {
            self.pending_pipelines.push(name.to_string());
        }
    }

    /// Compiles `program` into a shader module, keyed by its name
    pub fn load_shader(&mut self, program: ShaderProgram) {
        let module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(program.name()),
            source: ShaderSource::Wgsl(program.source().to_owned().into()),
        });

        log::debug!(
            "Loaded shader '{}' ({} attributes, {} uniforms)",
            program.name(),
            program.attributes().count(),
            program.uniforms().count()
        );
        self.shaders
            .insert(program.name().to_owned(), LoadedShader { program, module });
    }

    pub fn get_pipeline(&self, name: &str) -> Option<&RenderPipeline> {
        self.pipelines.get(name)
    }

    /// Creates all pending pipelines, stopping at the first failure
    pub fn create_all_pipelines(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending_pipelines);

        for (i, name) in pending.iter().enumerate() {
            let Some(config) = self.pipeline_configs.get(name) else {
                continue;
            };
            match self.create_pipeline_from_config(name, config) {
                Ok(pipeline) => {
                    self.pipelines.insert(name.clone(), pipeline);
                }
                Err(e) => {
                    self.pending_pipelines = pending[i..].to_vec();
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Creates a render pipeline from configuration
    fn create_pipeline_from_config(
        &self,
        name: &str,
        config: &PipelineConfig,
    ) -> Result<RenderPipeline> {
        let shader = self
            .shaders
            .get(&config.shader)
            .ok_or_else(|| RenderError::ShaderNotFound {
                name: config.shader.clone(),
            })?;

        for uniform in &config.required_uniforms {
            shader.program.require_uniform(uniform)?;
        }
        let attributes = Vertex3D::attributes(&shader.program)?;

        let bind_group_layout_refs: Vec<&BindGroupLayout> =
            config.bind_group_layouts.iter().collect();
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", name)),
                bind_group_layouts: &bind_group_layout_refs,
                push_constant_ranges: &[],
            });

        let depth_stencil = config.depth_format.map(|format| DepthStencilState {
            format,
            ..DepthTexture::depth_stencil_state()
        });

        let pipeline = self
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&pipeline_layout),
                vertex: VertexState {
                    module: &shader.module,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::layout(&attributes)],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: &shader.module,
                    entry_point: Some(config.fragment_entry.as_str()),
                    targets: &config.color_targets,
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: config.primitive_topology,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil,
                multisample: MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        Ok(pipeline)
    }

    /// Returns pipeline manager statistics
    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            total_pipelines: self.pipelines.len(),
            loaded_shaders: self.shaders.len(),
        }
    }
}

/// Statistics about pipeline manager state
#[derive(Debug)]
pub struct PipelineStats {
    pub total_pipelines: usize,
    pub loaded_shaders: usize,
}
