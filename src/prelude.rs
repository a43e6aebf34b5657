//! # Prelude
//!
//! Common imports for writing a demo.
//!
//! ```rust
//! use raster_lab::prelude::*;
//!
//! let mut store: SceneStore = SceneStore::new();
//! let mut meshes = MeshArena::new();
//! let line = meshes.insert("line", generate_line_segment([0.0; 3], [0.0, 1.0, 0.0]));
//! store.append(StaticMesh { mesh: line, model: Matrix4::from_scale(1.0) });
//! assert_eq!(store.len(), 1);
//! ```

// Application types
pub use crate::app::{Demo, DemoApp};
pub use crate::config::{AppConfig, WindowConfig};
pub use crate::error::RenderError;
pub use crate::time::FrameTime;

// Input
pub use crate::input::{AppControl, ElementState, InputEvent, InputState, KeyCode, MouseButton};

// Scene and geometry
pub use crate::gfx::geometry::{
    generate_cone_fan, generate_floor, generate_line_segment, GeometryData, Topology,
};
pub use crate::gfx::rendering::{DrawList, ObjectUniform, PipelineSpec};
pub use crate::gfx::scene::{
    FlatCone, MeshArena, MeshId, PlanePart, RainDrop, SceneObject, SceneStore, StaticMesh,
};
pub use crate::gfx::shaders::{ShaderProgram, ShaderVariant};
pub use crate::gfx::transform::{screen_to_ndc, FrameTransforms, Viewport};

// Common external dependencies
pub use cgmath::{Matrix4, Point3, Vector2, Vector3};
