// src/gfx/resources/mod.rs
//! GPU resource management

pub mod texture_resource;

// Re-export main types
pub use texture_resource::DepthTexture;
