use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::SeriesKind;

// ---------------------------------------------------------------------------
// Series colors
// ---------------------------------------------------------------------------

/// Convert an HSL triple to an egui color.
fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Chart color for a series, matching the original dashboard's mapping:
/// actual prices in blue, forecast in red.
pub fn series_color(kind: SeriesKind) -> Color32 {
    match kind {
        SeriesKind::Actual => hsl_color(215.0, 0.80, 0.50),
        SeriesKind::Forecast => hsl_color(2.0, 0.75, 0.52),
    }
}

/// Muted violet for the volume bars so they sit behind the price lines.
pub fn volume_color() -> Color32 {
    hsl_color(270.0, 0.40, 0.62)
}

/// Near-black for the fire-date marker line.
pub fn marker_color() -> Color32 {
    hsl_color(0.0, 0.0, 0.15)
}
