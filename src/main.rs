mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use app::FactbookApp;
use eframe::egui;
use factbook_explorer::config::{DashboardConfig, CONFIG_FILE_NAME};

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE_NAME)).unwrap_or_else(|e| {
        log::error!("Ignoring {CONFIG_FILE_NAME}: {e:#}");
        DashboardConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Factbook Explorer – Global Demographics",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the background jpg/png.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(FactbookApp::new(config)))
        }),
    )
}
