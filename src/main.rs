use meshview::{MeshViewerApp, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewerConfig::load().unwrap_or_else(|err| {
        log::warn!("{}; using default configuration", err);
        ViewerConfig::default()
    });

    MeshViewerApp::new(config)?.run()
}
