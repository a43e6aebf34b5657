//! # User Interface Module
//!
//! Dear ImGui overlay for the demos. [`UiManager`] owns the ImGui context and
//! its winit/wgpu integration; [`hud_panel`] draws the per-demo status box.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::hud_panel;
