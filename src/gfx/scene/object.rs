//! Renderable scene objects.
//!
//! Every object references a mesh in a [`MeshArena`](super::mesh::MeshArena)
//! and carries the small pose/color payload that turns into its per-draw
//! uniform block.

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector3};

use super::mesh::MeshId;
use crate::gfx::rendering::ObjectUniform;
use crate::gfx::transform::{spin, FrameTransforms};

/// Screen-space cone placed at a Voronoi seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCone {
    pub mesh: MeshId,
    pub color: [f32; 3],
    /// Seed position in NDC.
    pub offset: Vector2<f32>,
}

/// One part of a plane hierarchy.
///
/// The model matrix is `base · attach · spin(t) · orient`, so the spin is
/// applied in the part's attachment frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanePart {
    pub mesh: MeshId,
    /// Transform of the whole plane.
    pub base: Matrix4<f32>,
    /// Placement relative to the plane.
    pub attach: Matrix4<f32>,
    /// Spin rate about the attachment's y axis, radians per second.
    pub spin: Option<f32>,
    /// Orientation and scale of the mesh inside the attachment frame.
    pub orient: Matrix4<f32>,
}

impl PlanePart {
    pub fn model(&self, time: f32) -> Matrix4<f32> {
        let rotation = self
            .spin
            .map_or_else(Matrix4::identity, |rate| spin(rate, time));
        self.base * self.attach * rotation * self.orient
    }
}

/// A falling rain streak. `offset.y` is the phase within the fall loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainDrop {
    pub mesh: MeshId,
    pub offset: Vector3<f32>,
    pub color: [f32; 3],
}

impl RainDrop {
    /// Model transform: the streak follows the camera horizontally.
    pub fn model(&self, frame: &FrameTransforms) -> Matrix4<f32> {
        let y = frame.rain.y(self.offset.y, frame.time);
        Matrix4::from_translation(Vector3::new(
            self.offset.x + frame.camera_position.x,
            y,
            self.offset.z + frame.camera_position.z,
        ))
    }
}

/// Mesh drawn with a fixed model transform and its vertex colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticMesh {
    pub mesh: MeshId,
    pub model: Matrix4<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneObject {
    FlatCone(FlatCone),
    PlanePart(PlanePart),
    RainDrop(RainDrop),
    StaticMesh(StaticMesh),
}

impl SceneObject {
    pub fn mesh(&self) -> MeshId {
        match self {
            SceneObject::FlatCone(cone) => cone.mesh,
            SceneObject::PlanePart(part) => part.mesh,
            SceneObject::RainDrop(drop) => drop.mesh,
            SceneObject::StaticMesh(mesh) => mesh.mesh,
        }
    }

    /// Uniform block for this frame.
    pub fn uniforms(&self, frame: &FrameTransforms) -> ObjectUniform {
        match self {
            SceneObject::FlatCone(cone) => {
                ObjectUniform::screen_space([cone.offset.x, cone.offset.y], cone.color)
            }
            SceneObject::PlanePart(part) => {
                ObjectUniform::new(frame.view_projection * part.model(frame.time), [1.0; 4])
            }
            SceneObject::RainDrop(drop) => {
                let [r, g, b] = drop.color;
                ObjectUniform::new(frame.view_projection * drop.model(frame), [r, g, b, 1.0])
            }
            SceneObject::StaticMesh(mesh) => {
                ObjectUniform::new(frame.view_projection * mesh.model, [1.0; 4])
            }
        }
    }
}

impl From<FlatCone> for SceneObject {
    fn from(cone: FlatCone) -> Self {
        SceneObject::FlatCone(cone)
    }
}

impl From<PlanePart> for SceneObject {
    fn from(part: PlanePart) -> Self {
        SceneObject::PlanePart(part)
    }
}

impl From<RainDrop> for SceneObject {
    fn from(drop: RainDrop) -> Self {
        SceneObject::RainDrop(drop)
    }
}

impl From<StaticMesh> for SceneObject {
    fn from(mesh: StaticMesh) -> Self {
        SceneObject::StaticMesh(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_line_segment;
    use crate::gfx::scene::mesh::MeshArena;
    use crate::gfx::transform::RainWrap;
    use cgmath::{Point3, Vector4};

    fn frame(time: f32) -> FrameTransforms {
        FrameTransforms {
            view_projection: Matrix4::identity(),
            time,
            camera_position: Point3::new(3.0, 1.6, -4.0),
            rain: RainWrap {
                height: 10.0,
                length: 0.1,
                velocity: 5.0,
            },
        }
    }

    fn mesh() -> MeshId {
        MeshArena::new().insert("line", generate_line_segment([0.0; 3], [0.0, 0.1, 0.0]))
    }

    #[test]
    fn rain_follows_camera_horizontally() {
        let drop = RainDrop {
            mesh: mesh(),
            offset: Vector3::new(0.5, 2.0, -1.0),
            color: [1.0, 1.0, 1.0],
        };
        let origin = drop.model(&frame(0.0)) * Vector4::new(0.0, 0.0, 0.0, 1.0);

        assert_eq!(origin.x, 3.5);
        assert_eq!(origin.z, -5.0);
        assert_eq!(origin.y, 8.0);
    }

    #[test]
    fn spinning_part_rotates_about_attachment() {
        let part = PlanePart {
            mesh: mesh(),
            base: Matrix4::identity(),
            attach: Matrix4::from_translation(Vector3::new(0.0, 0.5, 0.0)),
            spin: Some(10.0),
            orient: Matrix4::identity(),
        };

        let tip = Vector4::new(1.0, 0.0, 0.0, 1.0);
        let at_rest = part.model(0.0) * tip;
        let spun = part.model(std::f32::consts::FRAC_PI_2 / 10.0) * tip;

        assert!((at_rest.x - 1.0).abs() < 1e-5 && (at_rest.y - 0.5).abs() < 1e-5);
        assert!(spun.x.abs() < 1e-5 && (spun.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn cone_uniforms_carry_offset_and_color() {
        let cone = SceneObject::from(FlatCone {
            mesh: mesh(),
            color: [0.2, 0.4, 0.6],
            offset: Vector2::new(-0.5, 0.25),
        });
        let block = cone.uniforms(&frame(1.0));

        assert_eq!(block.offset[..2], [-0.5, 0.25]);
        assert_eq!(block.color, [0.2, 0.4, 0.6, 1.0]);
    }
}
