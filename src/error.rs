//! Error types shared by the render engine and the demo runner.

use thiserror::Error;

/// Everything that can go wrong while bringing up or driving a demo.
///
/// Initialization failures (event loop, window, surface, adapter, device)
/// abort the demo. Shader lookups are checked when pipelines are created so a
/// missing attribute or uniform is reported by name instead of surfacing as
/// undefined GPU behavior later.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("shader '{name}' has not been loaded")]
    ShaderNotFound { name: String },

    #[error("shader '{shader}' declares no vertex attribute named '{name}'")]
    ShaderAttributeNotFound { shader: String, name: String },

    #[error("shader '{shader}' declares no uniform named '{name}'")]
    UniformNotFound { shader: String, name: String },

    #[error("pipeline '{name}' is not registered")]
    PipelineNotFound { name: String },

    #[error("GPU ran out of memory while acquiring a frame")]
    OutOfMemory,
}

pub type Result<T> = std::result::Result<T, RenderError>;
