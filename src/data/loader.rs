use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Date32Array, Float32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::LoadError;
use super::model::{Observation, PriceDataset, SeriesKind};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a price dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Date`, `Close`, `Tipe`/`Type`/`Kind`
///                and optionally `Volume` columns
/// * `.json`    – `[{ "Date": "...", "Close": ..., "Tipe": "...", ... }, ...]`
/// * `.parquet` – same columns as scalar Arrow arrays
pub fn load_file(path: &Path) -> Result<PriceDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// Row schema shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

/// One record as it appears in the source files. The original exports use
/// pandas column names (`Date`, `Close`, `Tipe`, `Volume`); English header
/// spellings are accepted as aliases.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Tipe", alias = "Type", alias = "Kind")]
    kind: String,
    #[serde(rename = "Volume", default)]
    volume: Option<f64>,
}

impl RawRecord {
    fn into_observation(self, row: usize) -> Result<Observation, LoadError> {
        let date =
            NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
                LoadError::BadDate {
                    row,
                    value: self.date.clone(),
                }
            })?;
        let kind = SeriesKind::parse(&self.kind).ok_or_else(|| LoadError::BadKind {
            row,
            label: self.kind.clone(),
        })?;
        Ok(Observation {
            date,
            close: self.close,
            volume: self.volume,
            kind,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<PriceDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse CSV from any reader. Split out from [`load_csv`] so tests can feed
/// in-memory data.
pub fn read_csv<R: Read>(reader: R) -> Result<PriceDataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let mut rows = Vec::new();
    for (row_no, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.into_observation(row_no)?);
    }

    Ok(PriceDataset::from_rows(rows)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Date": "2025-01-08", "Close": 65.25, "Tipe": "Real", "Volume": 420000 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<PriceDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

pub fn read_json(text: &str) -> Result<PriceDataset> {
    let records: Vec<RawRecord> = serde_json::from_str(text).context("parsing JSON records")?;

    let mut rows = Vec::with_capacity(records.len());
    for (row_no, record) in records.into_iter().enumerate() {
        rows.push(record.into_observation(row_no)?);
    }

    Ok(PriceDataset::from_rows(rows)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same logical schema as the CSV export.
///
/// Expected columns:
/// - `Date`: Utf8 (`YYYY-MM-DD`) or Date32
/// - `Close`: Float64 / Float32 / Int64
/// - `Tipe` (or `Type` / `Kind`): Utf8
/// - `Volume` (optional): Float64 / Float32 / Int64
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<PriceDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let date_idx = schema
            .index_of("Date")
            .map_err(|_| LoadError::MissingColumn("Date"))?;
        let close_idx = schema
            .index_of("Close")
            .map_err(|_| LoadError::MissingColumn("Close"))?;
        let kind_idx = ["Tipe", "Type", "Kind"]
            .iter()
            .find_map(|name| schema.index_of(name).ok())
            .ok_or(LoadError::MissingColumn("Tipe"))?;
        let volume_idx = schema.index_of("Volume").ok();

        let date_col = batch.column(date_idx);
        let close_col = batch.column(close_idx);
        let kind_col = batch.column(kind_idx);

        for row in 0..batch.num_rows() {
            let date = extract_date(date_col, row)
                .with_context(|| format!("Row {row}: failed to read 'Date'"))?;
            let close = extract_f64(close_col, row)
                .with_context(|| format!("Row {row}: failed to read 'Close'"))?
                .ok_or_else(|| anyhow::anyhow!("Row {row}: null 'Close'"))?;
            let label = extract_string(kind_col, row)
                .with_context(|| format!("Row {row}: failed to read category label"))?;
            let kind = SeriesKind::parse(&label).ok_or(LoadError::BadKind { row, label })?;

            let volume = match volume_idx {
                Some(idx) => extract_f64(batch.column(idx), row)
                    .with_context(|| format!("Row {row}: failed to read 'Volume'"))?,
                None => None,
            };

            rows.push(Observation {
                date,
                close,
                volume,
                kind,
            });
        }
    }

    Ok(PriceDataset::from_rows(rows)?)
}

// -- Parquet / Arrow helpers --

fn extract_date(col: &Arc<dyn Array>, row: usize) -> Result<NaiveDate> {
    if col.is_null(row) {
        bail!("null date value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            let text = arr.value(row);
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .with_context(|| format!("'{text}' is not a YYYY-MM-DD date"))
        }
        DataType::Date32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Date32Array>()
                .context("expected Date32Array")?;
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("literal date");
            Ok(epoch + chrono::Duration::days(arr.value(row) as i64))
        }
        other => bail!("Expected Utf8 or Date32 'Date' column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            Ok(Some(arr.value(row)))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            Ok(Some(arr.value(row) as f64))
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            Ok(Some(arr.value(row) as f64))
        }
        other => bail!("Expected a numeric column, got {other:?}"),
    }
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null category label");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col.as_any().downcast_ref::<StringArray>().unwrap();
            Ok(arr.value(row).to_string())
        }
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn csv_with_volume_column() {
        let csv = "\
Date,Close,Tipe,Volume
2025-01-08,65.25,Real,420000
2025-01-09,64.10,Real,510000
2025-01-13,49.80,Prediksi,1450000
";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert!(ds.has_volume);
        assert_eq!(ds.rows[0].date, d("2025-01-08"));
        assert_eq!(ds.rows[0].kind, SeriesKind::Actual);
        assert_eq!(ds.rows[2].kind, SeriesKind::Forecast);
        assert_eq!(ds.rows[2].volume, Some(1_450_000.0));
        assert_eq!(ds.span.start, d("2025-01-08"));
        assert_eq!(ds.span.end, d("2025-01-13"));
    }

    #[test]
    fn csv_without_volume_column() {
        let csv = "\
Date,Close,Tipe
2025-01-08,65.25,Real
2025-01-09,64.10,Prediksi
";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert!(!ds.has_volume);
        assert_eq!(ds.rows[1].volume, None);
    }

    #[test]
    fn csv_accepts_english_header_alias() {
        let csv = "\
Date,Close,Type
2025-01-08,65.25,Actual
";
        let ds = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(ds.rows[0].kind, SeriesKind::Actual);
    }

    #[test]
    fn csv_rejects_unknown_category_label() {
        let csv = "\
Date,Close,Tipe
2025-01-08,65.25,Weekly
";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        let load_err = err.downcast_ref::<LoadError>().unwrap();
        assert!(matches!(load_err, LoadError::BadKind { row: 0, .. }));
    }

    #[test]
    fn csv_rejects_bad_date() {
        let csv = "\
Date,Close,Tipe
08/01/2025,65.25,Real
";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::BadDate { row: 0, .. })
        ));
    }

    #[test]
    fn empty_csv_is_an_error() {
        let csv = "Date,Close,Tipe\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Empty)
        ));
    }

    #[test]
    fn json_records() {
        let json = r#"[
            { "Date": "2025-01-08", "Close": 65.25, "Tipe": "Real", "Volume": 420000.0 },
            { "Date": "2025-01-13", "Close": 49.8, "Tipe": "Prediksi" }
        ]"#;
        let ds = read_json(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].volume, Some(420_000.0));
        assert_eq!(ds.rows[1].volume, None);
        assert_eq!(ds.rows[1].kind, SeriesKind::Forecast);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("prices.xlsx")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }
}
