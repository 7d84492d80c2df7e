use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Observation, PriceDataset};

// ---------------------------------------------------------------------------
// Combined CSV download
// ---------------------------------------------------------------------------

/// Fixed filename offered by the download dialog.
pub const EXPORT_FILE_NAME: &str = "all_data.csv";

/// Write both datasets as one CSV, daily rows first. The `Volume` field is
/// left empty for rows without one, so the two tables share a single header.
pub fn write_combined_csv<W: Write>(
    writer: W,
    daily: &PriceDataset,
    daily_volume: &PriceDataset,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["Date", "Close", "Type", "Volume"])
        .context("writing CSV header")?;

    for row in daily.rows.iter().chain(daily_volume.rows.iter()) {
        write_row(&mut csv_writer, row)?;
    }

    csv_writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_row<W: Write>(csv_writer: &mut csv::Writer<W>, row: &Observation) -> Result<()> {
    let volume = row.volume.map(|v| v.to_string()).unwrap_or_default();
    csv_writer
        .write_record([
            row.date.format("%Y-%m-%d").to_string(),
            row.close.to_string(),
            row.kind.to_string(),
            volume,
        ])
        .with_context(|| format!("writing CSV row for {}", row.date))
}

/// Export the combined CSV to a file on disk (the save-dialog target).
pub fn export_to_path(
    path: &Path,
    daily: &PriceDataset,
    daily_volume: &PriceDataset,
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_combined_csv(file, daily, daily_volume)?;
    log::info!(
        "Exported {} rows to {}",
        daily.len() + daily_volume.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SeriesKind;
    use chrono::NaiveDate;

    fn obs(date: &str, close: f64, volume: Option<f64>, kind: SeriesKind) -> Observation {
        Observation {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            close,
            volume,
            kind,
        }
    }

    #[test]
    fn combined_csv_concatenates_both_tables() {
        let daily = PriceDataset::from_rows(vec![
            obs("2025-01-08", 65.25, None, SeriesKind::Actual),
            obs("2025-01-13", 49.8, None, SeriesKind::Forecast),
        ])
        .unwrap();
        let daily_volume = PriceDataset::from_rows(vec![obs(
            "2025-01-08",
            65.25,
            Some(420_000.0),
            SeriesKind::Actual,
        )])
        .unwrap();

        let mut buf = Vec::new();
        write_combined_csv(&mut buf, &daily, &daily_volume).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let expected = "\
Date,Close,Type,Volume
2025-01-08,65.25,Actual,
2025-01-13,49.8,Forecast,
2025-01-08,65.25,Actual,420000
";
        assert_eq!(text, expected);
    }
}
