pub mod camera_controller;
pub mod camera_utils;
pub mod fly_camera;

// Re-export main types
pub use camera_controller::FlyCameraController;
pub use camera_utils::{Camera, OPENGL_TO_WGPU_MATRIX};
pub use fly_camera::{FlyCamera, FlyCameraConfig};
