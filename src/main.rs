use std::sync::Arc;

use content_prefs::{
    api::HttpApi,
    config::AppConfig,
    core::tasks::TaskManager,
    gui::PreferenceApp,
    persistence::get_app_data_dir,
    preference::LogTelemetry,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("content_prefs=info,telemetry=info")),
        )
        .init();

    let data_dir = get_app_data_dir();
    let config = AppConfig::load_or_init(&data_dir).unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from {}: {}. Using defaults.", data_dir.display(), e);
        AppConfig::default()
    });
    tracing::info!(base_url = %config.base_url, "Starting content preference editor");

    let api = Arc::new(HttpApi::new(&config)?);
    let tasks = TaskManager::new(api)?;
    let telemetry = Arc::new(LogTelemetry);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([720.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Content preferences",
        options,
        Box::new(move |cc| Ok(Box::new(PreferenceApp::new(cc, config, tasks, telemetry)))),
    )?;

    Ok(())
}
