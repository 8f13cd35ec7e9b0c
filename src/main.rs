//! PlotPad - Dataset entry form with chart export
//!
//! A Rust application for typing in (x, y) datasets and saving them
//! as line, regression or smoothed-curve charts.

mod charts;
mod data;
mod gui;
mod stats;

use eframe::egui;
use gui::PlotPadApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 576.0])
            .with_min_inner_size([900.0, 520.0])
            .with_title("PlotPad"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "PlotPad",
        options,
        Box::new(|cc| Ok(Box::new(PlotPadApp::new(cc)))),
    )
}
