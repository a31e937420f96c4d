mod app;
mod color;
mod data;
mod export;
mod state;
mod ui;

use std::path::PathBuf;

use app::ClimascopeApp;
use data::loader::{self, DEFAULT_DATA_PATH};
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Source table: first CLI argument, else the conventional cleaned file.
    let data_path: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    let mut state = AppState::default();
    match loader::load_file(&data_path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} rows from {} (metrics: {:?})",
                dataset.len(),
                data_path.display(),
                dataset.columns.metrics
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            // Degraded start: the UI shows the remediation panel.
            log::error!("Failed to load {}: {e}", data_path.display());
            state.set_load_error(e);
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Climascope – Climate Indicators Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(ClimascopeApp::new(state)))),
    )
}
