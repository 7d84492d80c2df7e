use std::fmt;

use chrono::NaiveDate;

use super::LoadError;

// ---------------------------------------------------------------------------
// SeriesKind – actual vs forecast category label
// ---------------------------------------------------------------------------

/// Which series an observation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeriesKind {
    Actual,
    Forecast,
}

impl SeriesKind {
    /// Parse the category label as it appears in the source files.
    /// The original exports label rows `Real` / `Prediksi`; English
    /// spellings are accepted too.
    pub fn parse(label: &str) -> Option<SeriesKind> {
        match label.trim() {
            "Real" | "Actual" | "actual" => Some(SeriesKind::Actual),
            "Prediksi" | "Forecast" | "Prediction" | "forecast" => Some(SeriesKind::Forecast),
            _ => None,
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Actual => write!(f, "Actual"),
            SeriesKind::Forecast => write!(f, "Forecast"),
        }
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the source table
// ---------------------------------------------------------------------------

/// A single dated record: closing price, optional traded volume, and the
/// actual/forecast tag. Read-only after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: Option<f64>,
    pub kind: SeriesKind,
}

// ---------------------------------------------------------------------------
// DateRange – the inclusive [start, end] display window
// ---------------------------------------------------------------------------

/// Inclusive date window used to filter observations. Rebuilt on every
/// interaction; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// An inverted range selects nothing.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Clamp both bounds into `span`. The result may still be inverted if
    /// `self` was inverted to begin with.
    pub fn clamped_to(&self, span: DateRange) -> DateRange {
        DateRange {
            start: self.start.clamp(span.start, span.end),
            end: self.end.clamp(span.start, span.end),
        }
    }
}

// ---------------------------------------------------------------------------
// PriceDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// A loaded price table with facts derived once at construction.
#[derive(Debug, Clone)]
pub struct PriceDataset {
    /// All observations, in file order.
    pub rows: Vec<Observation>,
    /// Min/max date present across all rows.
    pub span: DateRange,
    /// Whether any row carries a volume figure.
    pub has_volume: bool,
}

impl PriceDataset {
    /// Build a dataset from loaded rows. Empty input is an error: the date
    /// span would be undefined and the UI has nothing to show.
    pub fn from_rows(rows: Vec<Observation>) -> Result<Self, LoadError> {
        let first = rows.first().ok_or(LoadError::Empty)?;
        let mut min = first.date;
        let mut max = first.date;
        let mut has_volume = false;
        for row in &rows {
            min = min.min(row.date);
            max = max.max(row.date);
            has_volume |= row.volume.is_some();
        }
        Ok(PriceDataset {
            rows,
            span: DateRange::new(min, max),
            has_volume,
        })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Day the Los Angeles fires hit the insurer's book (marker on the impact
/// chart).
pub fn fire_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).expect("literal date")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn obs(date: &str, close: f64) -> Observation {
        Observation {
            date: d(date),
            close,
            volume: None,
            kind: SeriesKind::Actual,
        }
    }

    #[test]
    fn series_kind_accepts_source_labels() {
        assert_eq!(SeriesKind::parse("Real"), Some(SeriesKind::Actual));
        assert_eq!(SeriesKind::parse("Prediksi"), Some(SeriesKind::Forecast));
        assert_eq!(SeriesKind::parse(" Forecast "), Some(SeriesKind::Forecast));
        assert_eq!(SeriesKind::parse("weekly"), None);
    }

    #[test]
    fn span_and_volume_flag_derived_from_rows() {
        let mut rows = vec![obs("2025-01-10", 50.0), obs("2025-01-08", 65.0)];
        rows.push(Observation {
            volume: Some(1_200_000.0),
            ..obs("2025-01-12", 48.0)
        });
        let ds = PriceDataset::from_rows(rows).unwrap();
        assert_eq!(ds.span, DateRange::new(d("2025-01-08"), d("2025-01-12")));
        assert!(ds.has_volume);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(matches!(
            PriceDataset::from_rows(Vec::new()),
            Err(LoadError::Empty)
        ));
    }

    #[test]
    fn clamp_pulls_bounds_into_span() {
        let span = DateRange::new(d("2025-01-08"), d("2025-01-12"));
        let wide = DateRange::new(d("2024-12-01"), d("2025-02-01"));
        assert_eq!(wide.clamped_to(span), span);

        let inverted = DateRange::new(d("2025-01-11"), d("2025-01-09"));
        assert!(inverted.clamped_to(span).is_inverted());
    }
}
