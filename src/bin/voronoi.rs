use raster_lab::config::AppConfig;
use raster_lab::demos::{VoronoiConfig, VoronoiDemo};
use raster_lab::logging::init_logging;
use raster_lab::DemoApp;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::default()
        .with_title("Voronoi")
        .with_size(1200, 900);
    init_logging(&config.logging);

    DemoApp::new(config, VoronoiDemo::new(VoronoiConfig::default())).run()
}
