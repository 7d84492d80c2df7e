use chrono::NaiveDate;

use crate::data::filter::filtered_indices;
use crate::data::model::{DateRange, PriceDataset};

// ---------------------------------------------------------------------------
// Analysis mode and tabs
// ---------------------------------------------------------------------------

/// The two-option analysis selector from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisMode {
    #[default]
    Daily,
    DailyWithVolume,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 2] = [AnalysisMode::Daily, AnalysisMode::DailyWithVolume];

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Daily => "Daily Forecast",
            AnalysisMode::DailyWithVolume => "Forecast with Volume Factor",
        }
    }
}

/// Tabs shown in daily mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DailyTab {
    #[default]
    Trend,
    FireImpact,
    ModelEvaluation,
}

impl DailyTab {
    pub const ALL: [DailyTab; 3] = [
        DailyTab::Trend,
        DailyTab::FireImpact,
        DailyTab::ModelEvaluation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DailyTab::Trend => "Daily Trend",
            DailyTab::FireImpact => "Fire Impact",
            DailyTab::ModelEvaluation => "Model Evaluation",
        }
    }
}

/// Tabs shown in volume mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VolumeTab {
    #[default]
    Trend,
    ModelComparison,
}

impl VolumeTab {
    pub const ALL: [VolumeTab; 2] = [VolumeTab::Trend, VolumeTab::ModelComparison];

    pub fn label(&self) -> &'static str {
        match self {
            VolumeTab::Trend => "Trend + Volume",
            VolumeTab::ModelComparison => "Model Comparison",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Daily price dataset (None until loaded).
    pub daily: Option<PriceDataset>,

    /// Daily price + volume dataset (None until loaded).
    pub daily_volume: Option<PriceDataset>,

    /// Which analysis the user is looking at.
    pub mode: AnalysisMode,

    /// Date window per mode, as in the original's per-mode widget keys.
    /// None until the matching dataset loads; then defaults to the full span.
    pub daily_range: Option<DateRange>,
    pub volume_range: Option<DateRange>,

    /// Active tab per mode.
    pub daily_tab: DailyTab,
    pub volume_tab: VolumeTab,

    /// Indices into the active dataset passing the current range (cached).
    pub visible: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            daily: None,
            daily_volume: None,
            mode: AnalysisMode::default(),
            daily_range: None,
            volume_range: None,
            daily_tab: DailyTab::default(),
            volume_tab: VolumeTab::default(),
            visible: Vec::new(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset into the slot for `mode`, reset that
    /// mode's window to the full span, and refilter.
    pub fn set_dataset(&mut self, mode: AnalysisMode, dataset: PriceDataset) {
        let span = dataset.span;
        match mode {
            AnalysisMode::Daily => {
                self.daily = Some(dataset);
                self.daily_range = Some(span);
            }
            AnalysisMode::DailyWithVolume => {
                self.daily_volume = Some(dataset);
                self.volume_range = Some(span);
            }
        }
        self.status_message = None;
        self.refilter();
    }

    /// Dataset backing the current mode.
    pub fn active_dataset(&self) -> Option<&PriceDataset> {
        match self.mode {
            AnalysisMode::Daily => self.daily.as_ref(),
            AnalysisMode::DailyWithVolume => self.daily_volume.as_ref(),
        }
    }

    /// Date window of the current mode (full span until the user edits it).
    pub fn active_range(&self) -> Option<DateRange> {
        match self.mode {
            AnalysisMode::Daily => self.daily_range,
            AnalysisMode::DailyWithVolume => self.volume_range,
        }
    }

    /// Store an edited date window for the current mode and refilter.
    pub fn update_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let range = DateRange::new(start, end);
        match self.mode {
            AnalysisMode::Daily => self.daily_range = Some(range),
            AnalysisMode::DailyWithVolume => self.volume_range = Some(range),
        }
        self.refilter();
    }

    /// Switch analysis mode, restoring that mode's own range and tab.
    pub fn set_mode(&mut self, mode: AnalysisMode) {
        if self.mode != mode {
            self.mode = mode;
            self.refilter();
        }
    }

    /// Recompute `visible` for the active dataset. The stored range is
    /// clamped to the dataset span before filtering, so stale bounds from a
    /// previous load can never select outside the data.
    pub fn refilter(&mut self) {
        self.visible = match (self.active_dataset(), self.active_range()) {
            (Some(ds), Some(range)) => filtered_indices(&ds.rows, &range.clamped_to(ds.span)),
            (Some(ds), None) => (0..ds.len()).collect(),
            _ => Vec::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Observation, SeriesKind};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dataset(dates: &[&str]) -> PriceDataset {
        let rows = dates
            .iter()
            .map(|s| Observation {
                date: d(s),
                close: 50.0,
                volume: None,
                kind: SeriesKind::Actual,
            })
            .collect();
        PriceDataset::from_rows(rows).unwrap()
    }

    #[test]
    fn loading_a_dataset_shows_everything() {
        let mut state = AppState::default();
        state.set_dataset(
            AnalysisMode::Daily,
            dataset(&["2025-01-08", "2025-01-09", "2025-01-10"]),
        );
        assert_eq!(state.visible, vec![0, 1, 2]);
        assert_eq!(
            state.active_range(),
            Some(DateRange::new(d("2025-01-08"), d("2025-01-10")))
        );
    }

    #[test]
    fn narrowing_the_range_refilters() {
        let mut state = AppState::default();
        state.set_dataset(
            AnalysisMode::Daily,
            dataset(&["2025-01-08", "2025-01-09", "2025-01-10", "2025-01-11"]),
        );
        state.update_range(d("2025-01-09"), d("2025-01-10"));
        assert_eq!(state.visible, vec![1, 2]);
    }

    #[test]
    fn inverted_range_shows_empty_view() {
        let mut state = AppState::default();
        state.set_dataset(
            AnalysisMode::Daily,
            dataset(&["2025-01-08", "2025-01-09", "2025-01-10"]),
        );
        state.update_range(d("2025-01-10"), d("2025-01-08"));
        assert!(state.visible.is_empty());
    }

    #[test]
    fn each_mode_keeps_its_own_range() {
        let mut state = AppState::default();
        state.set_dataset(
            AnalysisMode::Daily,
            dataset(&["2025-01-08", "2025-01-09", "2025-01-10"]),
        );
        state.set_dataset(
            AnalysisMode::DailyWithVolume,
            dataset(&["2025-01-08", "2025-01-09", "2025-01-10"]),
        );
        state.update_range(d("2025-01-09"), d("2025-01-09"));
        assert_eq!(state.visible, vec![1]);

        state.set_mode(AnalysisMode::DailyWithVolume);
        assert_eq!(state.visible, vec![0, 1, 2]);

        state.set_mode(AnalysisMode::Daily);
        assert_eq!(state.visible, vec![1]);
    }

    #[test]
    fn no_dataset_means_no_visible_rows() {
        let mut state = AppState::default();
        state.refilter();
        assert!(state.visible.is_empty());
    }
}
