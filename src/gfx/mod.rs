//! # Graphics Module
//!
//! Everything between a demo's scene and the GPU.
//!
//! - **Geometry** ([`geometry`]) - pure procedural mesh builders
//! - **Scene** ([`scene`]) - mesh arena, scene objects and the object store
//! - **Transforms** ([`transform`]) - screen mapping, plane hierarchy, rain loop
//! - **Camera** ([`camera`]) - first-person fly camera and its controller
//! - **Shaders** ([`shaders`]) - embedded WGSL with name-based reflection
//! - **Rendering** ([`rendering`]) - draw lists, pipelines and the render engine
//!
//! Demos never touch wgpu directly: they record a [`rendering::DrawList`]
//! each frame and [`RenderEngine`] uploads meshes and uniforms and issues
//! the draws.

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod shaders;
pub mod transform;

// Re-export commonly used types
pub use camera::FlyCamera;
pub use rendering::render_engine::RenderEngine;
