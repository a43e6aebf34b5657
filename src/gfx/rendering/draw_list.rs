//! Per-frame draw recording.
//!
//! Demos record one [`DrawCommand`] per visible object; the render engine
//! uploads the uniforms into a dynamic uniform buffer and issues the draws
//! in recording order.

use cgmath::{Matrix4, SquareMatrix};

use crate::gfx::camera::camera_utils::convert_matrix4_to_array;
use crate::gfx::scene::mesh::MeshId;

/// Per-draw uniform block, laid out like `ObjectUniforms` in the WGSL sources.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model_view_proj: [[f32; 4]; 4],
    /// RGBA tint.
    pub color: [f32; 4],
    /// Screen-space offset in xy; zw unused.
    pub offset: [f32; 4],
}

impl ObjectUniform {
    /// Uniform field names a shader must declare to accept this block.
    pub const FIELDS: [&'static str; 3] = ["model_view_proj", "color", "offset"];

    pub fn new(model_view_proj: Matrix4<f32>, color: [f32; 4]) -> Self {
        Self {
            model_view_proj: convert_matrix4_to_array(model_view_proj),
            color,
            offset: [0.0; 4],
        }
    }

    /// Screen-space block: identity transform, `offset` applied in the vertex shader.
    pub fn screen_space(offset: [f32; 2], color: [f32; 3]) -> Self {
        Self {
            model_view_proj: convert_matrix4_to_array(Matrix4::identity()),
            color: [color[0], color[1], color[2], 1.0],
            offset: [offset[0], offset[1], 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub pipeline: &'static str,
    pub mesh: MeshId,
    pub uniforms: ObjectUniform,
}

/// Ordered draw commands for one frame.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pipeline: &'static str, mesh: MeshId, uniforms: ObjectUniform) {
        self.commands.push(DrawCommand {
            pipeline,
            mesh,
            uniforms,
        });
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    pub fn uniforms(&self) -> Vec<ObjectUniform> {
        self.commands.iter().map(|command| command.uniforms).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_96_bytes() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 96);
    }

    #[test]
    fn screen_space_block_keeps_identity_transform() {
        let block = ObjectUniform::screen_space([0.25, -0.5], [1.0, 0.5, 0.0]);
        assert_eq!(block.model_view_proj[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(block.offset, [0.25, -0.5, 0.0, 0.0]);
        assert_eq!(block.color[3], 1.0);
    }
}
