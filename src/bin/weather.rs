use std::time::Duration;

use raster_lab::config::AppConfig;
use raster_lab::demos::{WeatherConfig, WeatherDemo};
use raster_lab::logging::init_logging;
use raster_lab::DemoApp;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::default()
        .with_title("Weather")
        .with_size(1300, 800)
        .with_grab_cursor(true)
        .with_frame_interval(Duration::from_millis(20));
    init_logging(&config.logging);

    DemoApp::new(config, WeatherDemo::new(WeatherConfig::default())).run()
}
