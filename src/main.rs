mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::MovieExplorerApp;
use eframe::egui;

const DEFAULT_SOURCE: &str = "movies.csv";

/// First positional argument, else `movies.csv` next to the executable,
/// else `movies.csv` in the working directory.
fn source_path() -> PathBuf {
    if let Some(arg) = std::env::args_os().nth(1) {
        return PathBuf::from(arg);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_SOURCE)))
        .filter(|p| p.is_file())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE))
}

fn main() -> eframe::Result {
    env_logger::init();

    let source = source_path();
    log::info!("Movie data source: {}", source.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Movie Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(MovieExplorerApp::new(source)))),
    )
}
