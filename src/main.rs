mod application;
mod domain;
mod infrastructure;
mod presentation;

use application::UseCaseContainer;
use domain::entities::AppConfig;
use domain::repositories::CatalogRepository;
use infrastructure::{ConfigRepository, FixtureCatalogRepository};
use presentation::components::LogEntry;
use presentation::services::log_capture::init_log_capture;
use presentation::style::configure_style;
use presentation::ui::SitescopeApp;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

type DynError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> eframe::Result<()> {
    let log_rx = init_log_capture();

    let config = ConfigRepository::new().load().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default config: {:#}", e);
        AppConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([760.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sitescope - Industrial Site Finder",
        options,
        Box::new(move |cc: &eframe::CreationContext<'_>| create_app(cc, config, log_rx)),
    )
}

fn create_app(
    cc: &eframe::CreationContext<'_>,
    config: AppConfig,
    log_rx: Receiver<LogEntry>,
) -> Result<Box<dyn eframe::App>, DynError> {
    configure_style(&cc.egui_ctx, config.theme);

    let latency = Duration::from_millis(config.simulated_latency_ms);
    let repository: Arc<dyn CatalogRepository> = Arc::new(FixtureCatalogRepository::new(latency)?);
    let use_cases = Arc::new(UseCaseContainer::new(repository));

    tracing::info!(
        "Starting with filter namespace '{}' (persisted: {})",
        config.storage_namespace,
        config.persist_filters
    );

    let app = SitescopeApp::new(use_cases, &config, log_rx)?;
    Ok(Box::new(app))
}
