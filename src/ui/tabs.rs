use eframe::egui::{RichText, ScrollArea, Ui};

use crate::state::{AnalysisMode, AppState, DailyTab, VolumeTab};
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Central panel – tab strip and tab content
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Mercury General Corp After the Los Angeles Fires");
    ui.add_space(4.0);

    match state.mode {
        AnalysisMode::Daily => {
            ui.horizontal(|ui: &mut Ui| {
                for tab in DailyTab::ALL {
                    if ui
                        .selectable_label(state.daily_tab == tab, tab.label())
                        .clicked()
                    {
                        state.daily_tab = tab;
                    }
                }
            });
            ui.separator();
            match state.daily_tab {
                DailyTab::Trend => daily_trend_tab(ui, state),
                DailyTab::FireImpact => fire_impact_tab(ui, state),
                DailyTab::ModelEvaluation => model_evaluation_tab(ui),
            }
        }
        AnalysisMode::DailyWithVolume => {
            ui.horizontal(|ui: &mut Ui| {
                for tab in VolumeTab::ALL {
                    if ui
                        .selectable_label(state.volume_tab == tab, tab.label())
                        .clicked()
                    {
                        state.volume_tab = tab;
                    }
                }
            });
            ui.separator();
            match state.volume_tab {
                VolumeTab::Trend => volume_trend_tab(ui, state),
                VolumeTab::ModelComparison => model_comparison_tab(ui),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Daily tabs
// ---------------------------------------------------------------------------

fn daily_trend_tab(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            chart_area(ui, |ui: &mut Ui| {
                plot::trend_plot(ui, state, "daily_trend_plot");
            });
            commentary(ui, "Daily Trend Interpretation", TREND_COMMENTARY);
        });
}

fn fire_impact_tab(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            chart_area(ui, |ui: &mut Ui| {
                plot::impact_plot(ui, state);
            });

            ui.add_space(8.0);
            ui.columns(3, |cols: &mut [Ui]| {
                metric(&mut cols[0], "Price 1 Week Before", "65.25");
                metric(&mut cols[1], "Price 1 Week After", "48.63");
                metric(&mut cols[2], "Drop (%)", "-25.47%");
            });

            commentary(ui, "Fire Impact Analysis", IMPACT_COMMENTARY);
        });
}

fn model_evaluation_tab(ui: &mut Ui) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Daily SARIMAX Model Evaluation");
            ui.add_space(8.0);
            ui.columns(3, |cols: &mut [Ui]| {
                metric(&mut cols[0], "RMSE", "2.79");
                metric(&mut cols[1], "MAE", "1.74");
                metric(&mut cols[2], "R²", "-0.042");
            });

            commentary(ui, "Forecast Model Performance", EVALUATION_COMMENTARY);
        });
}

// ---------------------------------------------------------------------------
// Volume tabs
// ---------------------------------------------------------------------------

fn volume_trend_tab(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            chart_area(ui, |ui: &mut Ui| {
                plot::volume_trend_plot(ui, state);
            });
            commentary(ui, "Volume-Price Analysis", VOLUME_COMMENTARY);
        });
}

fn model_comparison_tab(ui: &mut Ui) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Models With and Without the Volume Factor");
            ui.add_space(4.0);
            ui.label(COMPARISON_INSIGHTS);
            ui.add_space(8.0);
            ui.columns(3, |cols: &mut [Ui]| {
                metric(&mut cols[0], "RMSE (with volume)", "2.02");
                metric(&mut cols[1], "MAE (with volume)", "1.23");
                metric(&mut cols[2], "R² (with volume)", "0.082");
            });

            commentary(ui, "Comparative Model Analysis", COMPARISON_COMMENTARY);
        });
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// Reserve a fixed-height region for a chart so the commentary below it
/// doesn't collapse the plot.
fn chart_area(ui: &mut Ui, add_chart: impl FnOnce(&mut Ui)) {
    let height = (ui.available_height() * 0.55).max(240.0);
    ui.allocate_ui([ui.available_width(), height].into(), add_chart);
}

/// A labelled headline number, like a `st.metric` card.
fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

/// A titled narrative block of static text.
fn commentary(ui: &mut Ui, title: &str, body: &str) {
    ui.add_space(12.0);
    ui.strong(title);
    ui.add_space(4.0);
    ui.label(body);
}

// ---------------------------------------------------------------------------
// Narrative text (pre-computed findings; nothing here is derived from the
// loaded data)
// ---------------------------------------------------------------------------

const TREND_COMMENTARY: &str = "\
SARIMA forecast results:
1. A sharp 25.47% decline is clearly visible after January 10, 2025.
2. The model forecasts price stability in the $48-52 band for the 60 days following the fires.
3. The historical trend shows a slow recovery with daily fluctuation around ±2.1%.

Investor notes:
• Consider a stop loss around $47.50.
• Avoid large purchases until the price stabilises above $50.
• Watch the company's monthly insurance-claim reports.";

const IMPACT_COMMENTARY: &str = "\
Key factors identified:
1. Daily volatility rose 3.8x after the event (σ: $1.52 → $5.27).
2. Average daily trading volume rose 62% in the first 30 days.
3. Strong negative correlation (-0.78) between trading volume and closing price.

Crisis strategy:
• Use a trailing stop to protect the portfolio.
• Diversify into non-insurance sectors for 3-6 months.
• Consider put options as a hedge.";

const EVALUATION_COMMENTARY: &str = "\
Accuracy analysis:
1. An RMSE of 2.79 means an average deviation of ±$2.79 from the actual price.
2. The negative R² indicates the model captures little of the data's variance.
3. An MAE of 1.74 means forecasts miss by $1.74 per day on average.

Model development notes:
• Add exogenous variables: social-media sentiment and a disaster-risk index.
• Try different seasonal parameters for weekly/monthly patterns.
• Consider combining with an LSTM to capture non-linearity.";

const VOLUME_COMMENTARY: &str = "\
Main findings:
1. Volume above 500,000 shares/day correlates with price declines of 1.2-2.8%.
2. Adding volume to the SARIMAX model improves forecast accuracy by 27.6%.
3. High-volume patterns (>1M shares) appear 3-5 days before significant price drops.

Volume-based strategy:
• Watch days with volume above 300% of the 30-day average.
• Use volume as confirmation of sell signals.
• Concentrate trading in the first two high-volume hours of the session.";

const COMPARISON_INSIGHTS: &str = "\
Insights:
• The model with the volume variable is the more accurate of the two.
• RMSE with volume: 2.02 (vs 2.79 without).
• R² with volume: 0.082 (vs -0.042 without).";

const COMPARISON_COMMENTARY: &str = "\
SARIMAX advantages:
1. Detects flash crashes 3 days earlier than plain SARIMA.
2. Reduces false-positive recovery signals by 41%.
3. Picks up abnormal volume patterns ahead of official company announcements.

Investment implications:
• Use the SARIMAX model for short horizons (1-7 days).
• Refresh the model with live volume data for faster reaction.
• Treat the volume/price ratio as a leading indicator.";
