//! combpad: hexagonal chord pad

mod app;

use app::CombPadApp;
use combcore::PadConfig;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &PadConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result<()> {
    let config_path = PadConfig::default_path();
    let (config, load_error) = PadConfig::load_or_default(&config_path);
    init_tracing(&config);
    if let Some(e) = load_error {
        tracing::warn!(
            path = %config_path.display(),
            error = %e,
            "could not read config, using defaults"
        );
    }
    tracing::info!(key = %config.key, path = %config_path.display(), "starting combpad");

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([config.window_width, config.window_height])
        .with_min_inner_size([320.0, 280.0]);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "combpad",
        options,
        Box::new(move |cc| Box::new(CombPadApp::new(&cc.egui_ctx, config, config_path))),
    )
}
