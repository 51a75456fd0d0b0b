#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use deskgauge::comparator::DEFAULT_PRICE_FILE;

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Confronto prezzi",
        native_options,
        Box::new(|cc| {
            Ok(Box::new(deskgauge::PriceComparatorApp::new(
                cc,
                DEFAULT_PRICE_FILE,
            )))
        }),
    )
}
