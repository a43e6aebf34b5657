//! # Scene Module
//!
//! Scene objects, the store that keeps them in order, the mesh arena that
//! owns their GPU buffers, and the shared vertex format.
//!
//! ## Key Components
//!
//! - [`SceneObject`] - A renderable instance: cone, plane part, rain streak or static mesh
//! - [`SceneStore`] - Append-only, insertion-ordered object list
//! - [`MeshArena`] - Owner of all meshes, addressed by [`MeshId`]
//! - [`Vertex3D`] - Position + color vertex

pub mod mesh;
pub mod object;
pub mod store;
pub mod vertex;

// Re-export main types
pub use mesh::{DrawMesh, GpuMesh, MeshArena, MeshId};
pub use object::{FlatCone, PlanePart, RainDrop, SceneObject, StaticMesh};
pub use store::SceneStore;
pub use vertex::Vertex3D;
