//! # Vertex Data Structures
//!
//! GPU-compatible vertex format shared by every mesh in the demos.

use crate::error::Result;
use crate::gfx::shaders::ShaderProgram;

/// A vertex with position and RGBA color.
///
/// The `#[repr(C)]` layout is uploaded as-is with `bytemuck`.
///
/// # Examples
///
/// ```no_run
/// use raster_lab::gfx::scene::vertex::Vertex3D;
///
/// let apex = Vertex3D::new([0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]);
/// ```
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// Position [x, y, z]
    pub position: [f32; 3],
    /// Color [r, g, b, a]
    pub color: [f32; 4],
}

impl Vertex3D {
    /// Shader-side names of the vertex attributes, in buffer order.
    pub const POSITION_ATTRIBUTE: &'static str = "position";
    pub const COLOR_ATTRIBUTE: &'static str = "color";

    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    /// Builds the attribute list for `program`.
    ///
    /// Attribute locations are looked up by name in the shader; a shader that
    /// does not declare `position` or `color` is rejected with
    /// [`RenderError::ShaderAttributeNotFound`](crate::error::RenderError::ShaderAttributeNotFound).
    pub fn attributes(program: &ShaderProgram) -> Result<[wgpu::VertexAttribute; 2]> {
        Ok([
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: program.attribute_location(Self::POSITION_ATTRIBUTE)?,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                shader_location: program.attribute_location(Self::COLOR_ATTRIBUTE)?,
                format: wgpu::VertexFormat::Float32x4,
            },
        ])
    }

    /// Returns the vertex buffer layout over previously resolved `attributes`.
    pub fn layout(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    const SHADER: &str = r#"
        struct VertexInput {
            @location(3) color: vec4<f32>,
            @location(1) position: vec3<f32>,
        };
    "#;

    #[test]
    fn attributes_follow_shader_locations() {
        let program = ShaderProgram::from_wgsl("test", SHADER);
        let attributes = Vertex3D::attributes(&program).unwrap();

        assert_eq!(attributes[0].shader_location, 1);
        assert_eq!(attributes[1].shader_location, 3);
        assert_eq!(attributes[1].offset, 12);
        assert_eq!(std::mem::size_of::<Vertex3D>(), 28);
    }

    #[test]
    fn missing_attribute_is_named() {
        let program = ShaderProgram::from_wgsl(
            "positions_only",
            "struct VertexInput { @location(0) position: vec3<f32>, };",
        );

        match Vertex3D::attributes(&program) {
            Err(RenderError::ShaderAttributeNotFound { shader, name }) => {
                assert_eq!(shader, "positions_only");
                assert_eq!(name, "color");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
