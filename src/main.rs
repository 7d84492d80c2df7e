mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::MercuryDashApp;
use eframe::egui;
use state::{AnalysisMode, AppState};

/// Default dataset locations, written by the `generate_sample` bin.
const DAILY_PATH: &str = "data/daily_prices.csv";
const DAILY_VOLUME_PATH: &str = "data/daily_prices_volume.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::default();
    load_default(&mut state, AnalysisMode::Daily, DAILY_PATH);
    load_default(&mut state, AnalysisMode::DailyWithVolume, DAILY_VOLUME_PATH);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Mercury Dash – Stock Forecast Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(MercuryDashApp::new(state)))),
    )
}

/// Load a dataset from its default path if present; otherwise start empty
/// and let the user open one via the File menu.
fn load_default(state: &mut AppState, mode: AnalysisMode, path: &str) {
    let path = Path::new(path);
    if !path.exists() {
        log::warn!("{} not found, starting without it", path.display());
        return;
    }
    match data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} observations ({} … {}) from {}",
                dataset.len(),
                dataset.span.start,
                dataset.span.end,
                path.display()
            );
            state.set_dataset(mode, dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
