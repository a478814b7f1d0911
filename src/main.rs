#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::Path;

use eframe_palette::app::SLIDER_PANEL_HEIGHT;
use eframe_palette::file_handler::DirectorySink;
use eframe_palette::{PaletteApp, PaletteConfig, PaletteController};

fn main() -> Result<(), eframe::Error> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = match std::env::args_os().nth(1) {
        Some(path) => match PaletteConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{}", err);
                std::process::exit(1);
            }
        },
        None => PaletteConfig::default(),
    };

    let sink = Box::new(DirectorySink::new(config.export_dir.clone()));
    let window_size = [
        config.canvas_width as f32,
        config.chrome_height + config.canvas_height as f32 + SLIDER_PANEL_HEIGHT,
    ];
    let controller = match PaletteController::new(config, sink) {
        Ok(controller) => controller,
        Err(err) => {
            log::error!("Cannot start palette: {}", err);
            std::process::exit(1);
        }
    };

    println!("Controls:");
    println!("- Click on colors to select them, or mix one with the R/G/B sliders");
    println!("- Click on brush sizes to change brush size");
    println!("- Press 'z' for undo, 'y' for redo, 'c' to clear, 's' to save");
    println!("- Press 'b' for brush, 'e' for eraser, 'Esc' to exit");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window_size)
            .with_resizable(false),
        ..Default::default()
    };
    eframe::run_native(
        "Interactive Digital Palette",
        native_options,
        Box::new(|cc| Ok(Box::new(PaletteApp::new(cc, controller)))),
    )
}
