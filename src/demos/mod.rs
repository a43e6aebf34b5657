//! The two interactive scenes shipped as binaries.

pub mod voronoi;
pub mod weather;

pub use voronoi::{VoronoiConfig, VoronoiDemo};
pub use weather::{RainConfig, WeatherConfig, WeatherDemo};
