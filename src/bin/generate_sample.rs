use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("literal date")
}

/// Weekdays in [from, to] inclusive.
fn trading_days(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = from;
    while day <= to {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(day);
        }
        day = day.succ_opt().expect("date overflow");
    }
    days
}

struct Row {
    date: NaiveDate,
    close: f64,
    kind: &'static str,
    volume: f64,
}

/// Random-walk Mercury price path: drifting around $66 before the fires,
/// a 25% crash on 2025-01-10, then noisy stabilisation near $50. Volume
/// spikes with the crash and stays elevated.
fn simulate(rng: &mut SimpleRng, days: &[NaiveDate], kind: &'static str, noise: f64) -> Vec<Row> {
    let fire = date(2025, 1, 10);
    let mut price = 66.0;
    let mut rows = Vec::with_capacity(days.len());

    for &day in days {
        if day == fire {
            price *= 0.82;
        } else if day > fire && day <= date(2025, 1, 14) {
            price *= 1.0 + rng.gauss(-0.035, 0.01);
        } else if day > fire {
            // slow mean-reversion towards $50
            price += (50.0 - price) * 0.04 + rng.gauss(0.0, noise * 2.2);
        } else {
            price += rng.gauss(0.05, noise);
        }
        price = price.max(40.0);

        let base_volume = if day >= fire { 680_000.0 } else { 420_000.0 };
        let volume = (base_volume * (1.0 + rng.gauss(0.0, 0.25))).max(50_000.0);

        rows.push(Row {
            date: day,
            close: (price * 100.0).round() / 100.0,
            kind,
            volume: volume.round(),
        });
    }
    rows
}

fn write_csv(path: &Path, rows: &[Row], with_volume: bool) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    if with_volume {
        writer.write_record(["Date", "Close", "Tipe", "Volume"])?;
    } else {
        writer.write_record(["Date", "Close", "Tipe"])?;
    }

    for row in rows {
        let mut record = vec![
            row.date.format("%Y-%m-%d").to_string(),
            row.close.to_string(),
            row.kind.to_string(),
        ];
        if with_volume {
            record.push(row.volume.to_string());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Actual history runs through end of January; the forecast covers the
    // same window (out-of-sample test) plus two further months.
    let actual_days = trading_days(date(2024, 11, 1), date(2025, 1, 31));
    let forecast_days = trading_days(date(2025, 1, 2), date(2025, 3, 31));

    let mut rows = simulate(&mut rng, &actual_days, "Real", 0.55);
    rows.extend(simulate(&mut rng, &forecast_days, "Prediksi", 0.35));

    std::fs::create_dir_all("data").context("creating data directory")?;
    write_csv(Path::new("data/daily_prices.csv"), &rows, false)?;
    write_csv(Path::new("data/daily_prices_volume.csv"), &rows, true)?;

    println!(
        "Wrote {} rows to data/daily_prices.csv and data/daily_prices_volume.csv",
        rows.len()
    );
    Ok(())
}
