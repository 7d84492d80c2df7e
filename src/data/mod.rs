/// Data layer: core types, loading, filtering, and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PriceDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ PriceDataset  │  Vec<Observation>, date span
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  filter   │      │  export   │  combined CSV download
///   └──────────┘      └──────────┘
/// ```
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

use thiserror::Error;

/// Domain failures while turning a file into a [`model::PriceDataset`].
/// I/O and format-level errors are reported through `anyhow` with context.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset contains no rows")]
    Empty,

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: '{value}' is not a YYYY-MM-DD date")]
    BadDate { row: usize, value: String },

    #[error("row {row}: unrecognised category label '{label}' (expected Real/Actual or Prediksi/Forecast)")]
    BadKind { row: usize, label: String },
}
