//! Application-level configuration.
//!
//! Demo-specific settings live next to the demos (`VoronoiConfig`,
//! `WeatherConfig`); this module covers what every demo window needs.

use std::time::Duration;

use crate::logging::LoggingConfig;

/// Window creation settings.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    /// Logical width in pixels.
    pub width: u32,
    /// Logical height in pixels.
    pub height: u32,
    /// Hide and lock the cursor; pointer moves are then reported from raw
    /// mouse motion as an unbounded virtual cursor.
    pub grab_cursor: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "raster-lab".to_string(),
            width: 1200,
            height: 900,
            grab_cursor: false,
        }
    }
}

/// Settings for [`DemoApp`](crate::app::DemoApp).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: WindowConfig,
    /// Fixed frame cadence. `None` renders as fast as the present mode allows.
    pub frame_interval: Option<Duration>,
    pub present_mode: wgpu::PresentMode,
    /// Draw the ImGui statistics overlay.
    pub show_hud: bool,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            frame_interval: None,
            present_mode: wgpu::PresentMode::AutoVsync,
            show_hud: true,
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.window.title = title.to_owned();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn with_grab_cursor(mut self, grab: bool) -> Self {
        self.window.grab_cursor = grab;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    pub fn with_present_mode(mut self, mode: wgpu::PresentMode) -> Self {
        self.present_mode = mode;
        self
    }

    pub fn with_hud(mut self, show: bool) -> Self {
        self.show_hud = show;
        self
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }
}
