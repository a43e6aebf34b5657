//! # Procedural Geometry Generation
//!
//! Pure functions that synthesize vertex data for the demo meshes, so no
//! model files are needed.
//!
//! ## Supported Shapes
//!
//! - **Cone fan**: N triangles sharing an apex above a circular rim
//! - **Line segment**: a two-vertex line
//! - **Floor**: a colored quad at y = 0
//! - **Plane parts**: body, wing and propeller of a toy plane
//!
//! ## Usage
//!
//! ```rust
//! use raster_lab::gfx::geometry::{generate_cone_fan, generate_line_segment};
//!
//! let cone = generate_cone_fan(360, 3.0);
//! assert_eq!(cone.vertex_count(), 3 * 360);
//!
//! let streak = generate_line_segment([0.0, 0.1, 0.0], [0.0, 0.0, 0.0]);
//! assert_eq!(streak.vertex_count(), 2);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Primitive topology of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    TriangleList,
    LineList,
}

impl Topology {
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
            Topology::LineList => wgpu::PrimitiveTopology::LineList,
        }
    }

    /// Vertices (or indices) consumed per primitive.
    pub fn vertices_per_primitive(self) -> usize {
        match self {
            Topology::TriangleList => 3,
            Topology::LineList => 2,
        }
    }
}

/// Generated geometry ready for GPU upload.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Vertex colors (r, g, b, a); white when shorter than `positions`
    pub colors: Vec<[f32; 4]>,
    /// Optional index list (counter-clockwise winding); empty means non-indexed
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl GeometryData {
    pub fn new(topology: Topology) -> Self {
        Self {
            positions: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
            topology,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of elements a draw call consumes: indices when indexed, vertices otherwise.
    pub fn element_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len()
        } else {
            self.positions.len()
        }
    }

    pub fn primitive_count(&self) -> usize {
        self.element_count() / self.topology.vertices_per_primitive()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Pushes a vertex with its color.
    pub fn push_vertex(&mut self, position: [f32; 3], color: [f32; 4]) {
        self.positions.push(position);
        self.colors.push(color);
    }

    /// Interleaves positions and colors into the renderer's vertex format.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, position)| {
                Vertex3D::new(*position, self.colors.get(i).copied().unwrap_or(WHITE))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_count_prefers_indices() {
        let mut data = GeometryData::new(Topology::TriangleList);
        for position in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]] {
            data.push_vertex(position, WHITE);
        }
        assert_eq!(data.element_count(), 4);

        data.indices = vec![0, 1, 2, 2, 1, 3];
        assert_eq!(data.element_count(), 6);
        assert_eq!(data.primitive_count(), 2);
    }

    #[test]
    fn missing_colors_default_to_white() {
        let mut data = GeometryData::new(Topology::LineList);
        data.positions = vec![[0.0; 3], [1.0; 3]];
        data.colors = vec![[1.0, 0.0, 0.0, 1.0]];

        let vertices = data.to_vertices();
        assert_eq!(vertices[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(vertices[1].color, WHITE);
    }
}
