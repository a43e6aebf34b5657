// src/wgpu_utils/binding_types.rs
//! WGPU binding type utilities

/// Uniform buffer addressed per draw through a dynamic offset.
pub fn uniform_dynamic(min_binding_size: u64) -> wgpu::BindingType {
    wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: true,
        min_binding_size: wgpu::BufferSize::new(min_binding_size),
    }
}
