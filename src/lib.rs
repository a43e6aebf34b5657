// src/lib.rs
//! raster-lab
//!
//! Small interactive rendering demos built on wgpu and winit: a cone-based
//! Voronoi diagram and a fly-by rain scene. The library holds the shared
//! pieces (procedural meshes, scene objects, transforms, input mapping and
//! the render loop); the binaries only pick a demo and a config.

pub mod app;
pub mod config;
pub mod demos;
pub mod error;
pub mod gfx;
pub mod input;
pub mod logging;
pub mod performance;
pub mod prelude;
pub mod time;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{Demo, DemoApp};
pub use error::RenderError;
