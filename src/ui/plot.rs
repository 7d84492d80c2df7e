use std::ops::RangeInclusive;

use chrono::NaiveDate;
use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Line, LineStyle, Plot, PlotPoints, VLine};

use crate::color;
use crate::data::model::{Observation, SeriesKind, fire_date};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Date axis helpers
// ---------------------------------------------------------------------------

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("literal date")
}

/// Plot x coordinate for a date: whole days since the Unix epoch.
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.signed_duration_since(epoch()).num_days() as f64
}

fn x_axis_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    let date = epoch() + chrono::Duration::days(mark.value.round() as i64);
    date.format("%Y-%m-%d").to_string()
}

// ---------------------------------------------------------------------------
// Chart builders
// ---------------------------------------------------------------------------

fn series_points<'a>(rows: &'a [Observation], visible: &'a [usize], kind: SeriesKind) -> PlotPoints<'a> {
    visible
        .iter()
        .map(|&i| &rows[i])
        .filter(|obs| obs.kind == kind)
        .map(|obs| [date_to_x(obs.date), obs.close])
        .collect()
}

fn no_data_hint(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("No dataset loaded  (File → Open…)");
    });
}

/// Actual vs forecast closing-price lines over the filtered window.
pub fn trend_plot(ui: &mut Ui, state: &AppState, id: &str) {
    let Some(dataset) = state.active_dataset() else {
        no_data_hint(ui);
        return;
    };

    Plot::new(id)
        .legend(egui_plot::Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Closing price")
        .x_axis_formatter(x_axis_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for kind in [SeriesKind::Actual, SeriesKind::Forecast] {
                let points = series_points(&dataset.rows, &state.visible, kind);
                let line = Line::new(points)
                    .name(kind.to_string())
                    .color(color::series_color(kind))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

/// Closing-price line with a dashed marker on the fire date.
pub fn impact_plot(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = state.active_dataset() else {
        no_data_hint(ui);
        return;
    };

    let points: PlotPoints = state
        .visible
        .iter()
        .map(|&i| &dataset.rows[i])
        .map(|obs| [date_to_x(obs.date), obs.close])
        .collect();

    Plot::new("impact_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Price")
        .x_axis_formatter(x_axis_label)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Price")
                    .color(color::series_color(SeriesKind::Actual))
                    .width(1.5),
            );
            plot_ui.vline(
                VLine::new(date_to_x(fire_date()))
                    .name("Fire date")
                    .color(color::marker_color())
                    .style(LineStyle::dashed_loose()),
            );
        });
}

/// Price lines on top, traded-volume bars below, sharing the date axis.
pub fn volume_trend_plot(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = state.active_dataset() else {
        no_data_hint(ui);
        return;
    };

    let price_height = ui.available_height() * 0.6;
    ui.allocate_ui([ui.available_width(), price_height].into(), |ui: &mut Ui| {
        trend_plot(ui, state, "volume_trend_prices");
    });

    let bars: Vec<Bar> = state
        .visible
        .iter()
        .map(|&i| &dataset.rows[i])
        .filter_map(|obs| obs.volume.map(|v| (obs.date, v)))
        .map(|(date, v)| Bar::new(date_to_x(date), v).width(0.8))
        .collect();

    Plot::new("volume_trend_bars")
        .x_axis_label("Date")
        .y_axis_label("Volume")
        .x_axis_formatter(x_axis_label)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Volume")
                    .color(color::volume_color()),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_axis_is_days_since_epoch() {
        let d = NaiveDate::from_ymd_opt(1970, 1, 11).unwrap();
        assert_eq!(date_to_x(d), 10.0);
        assert!(date_to_x(fire_date()) > 20_000.0);
    }
}
