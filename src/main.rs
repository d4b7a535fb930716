//! Oncodash - Pediatric Cancer Case Dashboard
//!
//! Loads a CSV of yearly pediatric-cancer case counts and displays KPIs,
//! charts and the filtered table with year/type filters.

mod charts;
mod data;
mod gui;
mod stats;

use eframe::egui;
use gui::DashboardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Dashboard de Cáncer Infantil"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Dashboard de Cáncer Infantil",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
