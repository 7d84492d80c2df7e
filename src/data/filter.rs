use super::model::{DateRange, Observation};

// ---------------------------------------------------------------------------
// Date-range filter
// ---------------------------------------------------------------------------

/// Return indices of observations whose date lies in `range` (inclusive on
/// both ends), preserving the original row order.
///
/// Pure and stateless; invoked on every user interaction. An inverted range
/// (`start > end`) matches nothing and yields an empty result rather than an
/// error, so the UI renders an empty chart.
pub fn filtered_indices(rows: &[Observation], range: &DateRange) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, obs)| range.contains(obs.date))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SeriesKind;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn rows(dates: &[&str]) -> Vec<Observation> {
        dates
            .iter()
            .enumerate()
            .map(|(i, s)| Observation {
                date: d(s),
                close: 50.0 + i as f64,
                volume: None,
                kind: SeriesKind::Actual,
            })
            .collect()
    }

    const WEEK: [&str; 5] = [
        "2025-01-08",
        "2025-01-09",
        "2025-01-10",
        "2025-01-11",
        "2025-01-12",
    ];

    #[test]
    fn inclusive_on_both_bounds() {
        let rows = rows(&WEEK);
        let range = DateRange::new(d("2025-01-09"), d("2025-01-11"));
        assert_eq!(filtered_indices(&rows, &range), vec![1, 2, 3]);
    }

    #[test]
    fn full_span_is_identity() {
        let rows = rows(&WEEK);
        let range = DateRange::new(d("2025-01-08"), d("2025-01-12"));
        assert_eq!(filtered_indices(&rows, &range), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn inverted_range_selects_nothing() {
        let rows = rows(&WEEK);
        let range = DateRange::new(d("2025-01-11"), d("2025-01-09"));
        assert!(filtered_indices(&rows, &range).is_empty());
    }

    #[test]
    fn preserves_file_order_not_date_order() {
        let rows = rows(&["2025-01-12", "2025-01-08", "2025-01-10"]);
        let range = DateRange::new(d("2025-01-08"), d("2025-01-12"));
        assert_eq!(filtered_indices(&rows, &range), vec![0, 1, 2]);
    }

    #[test]
    fn refiltering_the_filtered_subset_is_idempotent() {
        let rows = rows(&WEEK);
        let range = DateRange::new(d("2025-01-09"), d("2025-01-11"));

        let once: Vec<Observation> = filtered_indices(&rows, &range)
            .into_iter()
            .map(|i| rows[i].clone())
            .collect();
        let twice: Vec<Observation> = filtered_indices(&once, &range)
            .into_iter()
            .map(|i| once[i].clone())
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn range_outside_data_yields_empty() {
        let rows = rows(&WEEK);
        let range = DateRange::new(d("2025-02-01"), d("2025-02-10"));
        assert!(filtered_indices(&rows, &range).is_empty());
    }
}
