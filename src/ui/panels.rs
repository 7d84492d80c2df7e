use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::{export, loader};
use crate::state::{AnalysisMode, AppState};

// ---------------------------------------------------------------------------
// Left side panel – analysis settings
// ---------------------------------------------------------------------------

/// Render the left settings panel: analysis mode, date window, download.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis Settings");
    ui.separator();

    ui.strong("Analysis type");
    for mode in AnalysisMode::ALL {
        if ui
            .radio(state.mode == mode, mode.label())
            .clicked()
        {
            state.set_mode(mode);
        }
    }
    ui.separator();

    date_pickers(ui, state);

    ui.separator();
    download_section(ui, state);
}

/// Start/end date pickers bounded by the active dataset's span. The values
/// are clamped again before filtering, so these bounds are presentation only.
fn date_pickers(ui: &mut Ui, state: &mut AppState) {
    let Some(dataset) = state.active_dataset() else {
        ui.label("No dataset loaded.");
        return;
    };
    let span = dataset.span;
    let range = state.active_range().unwrap_or(span).clamped_to(span);

    let (start_salt, end_salt) = match state.mode {
        AnalysisMode::Daily => ("start_daily", "end_daily"),
        AnalysisMode::DailyWithVolume => ("start_volume", "end_volume"),
    };

    let mut start = range.start;
    let mut end = range.end;
    let mut changed = false;

    ui.strong("Start date");
    changed |= ui
        .add(egui_extras::DatePickerButton::new(&mut start).id_salt(start_salt))
        .changed();

    ui.strong("End date");
    changed |= ui
        .add(egui_extras::DatePickerButton::new(&mut end).id_salt(end_salt))
        .changed();

    if changed {
        state.update_range(start, end);
    }

    if state.visible.is_empty() {
        ui.add_space(4.0);
        ui.label(RichText::new("No rows in the selected window.").italics());
    }
}

/// Combined CSV download, enabled once both datasets are in.
fn download_section(ui: &mut Ui, state: &mut AppState) {
    let both_loaded = state.daily.is_some() && state.daily_volume.is_some();
    let button = ui.add_enabled(both_loaded, egui::Button::new("Download All Data"));
    if !both_loaded {
        ui.label(RichText::new("Load both datasets to export.").small());
    }
    if button.clicked() {
        save_export_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open daily prices…").clicked() {
                open_file_dialog(state, AnalysisMode::Daily);
                ui.close_menu();
            }
            if ui.button("Open daily prices + volume…").clicked() {
                open_file_dialog(state, AnalysisMode::DailyWithVolume);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = state.active_dataset() {
            ui.label(format!(
                "{} rows loaded, {} in window",
                ds.len(),
                state.visible.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, mode: AnalysisMode) {
    let file = rfd::FileDialog::new()
        .set_title(match mode {
            AnalysisMode::Daily => "Open daily price data",
            AnalysisMode::DailyWithVolume => "Open daily price + volume data",
        })
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match loader::load_file(&path) {
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
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn save_export_dialog(state: &mut AppState) {
    let (Some(daily), Some(daily_volume)) = (&state.daily, &state.daily_volume) else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Download all data")
        .set_file_name(export::EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export::export_to_path(&path, daily, daily_volume) {
            Ok(()) => {
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Export error: {e:#}"));
            }
        }
    }
}
