// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles render pipelines, per-draw uniforms, and frame rendering.

pub mod draw_list;
pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use draw_list::{DrawCommand, DrawList, ObjectUniform};
pub use pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats};
pub use render_engine::{FrameOutcome, PipelineSpec, RenderEngine, SurfaceErrorAction};
