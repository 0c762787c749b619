mod app;
mod color;
mod config;
mod data;
mod nav;
mod pages;
mod reserve;
mod state;
mod ui;

use app::KrigingDashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Kriging Gold Estimation",
        options,
        Box::new(|_cc| Ok(Box::new(KrigingDashboardApp::new(config)))),
    )
}
