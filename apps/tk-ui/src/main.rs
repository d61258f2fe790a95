#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod theme;
mod views;

use app::TankflowApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    // Optional session config path as the only argument
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_title("Tank & Valve Simulator"),
        ..Default::default()
    };

    eframe::run_native(
        "Tankflow",
        options,
        Box::new(move |cc| Ok(Box::new(TankflowApp::new(cc, config_path)))),
    )
}
