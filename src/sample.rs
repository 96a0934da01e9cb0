use crate::models::{DailyRecord, DailySeries};
use chrono::{Datelike, Duration, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::f64::consts::TAU;

/// Length of the generated placeholder series.
pub const SAMPLE_DAYS: i64 = 90;

/// Build a 90-day placeholder series ending on `today`, used when no live
/// data can be loaded for a repository.
///
/// The shape is a weekly plus bi-weekly sinusoid with bounded jitter,
/// clamped at zero. The RNG is seeded from the anchor date, so the same
/// day always produces the same series and downstream aggregation stays
/// testable. Records satisfy the same invariants as live data.
pub fn synthetic_series(today: NaiveDate) -> DailySeries {
    let mut rng = StdRng::seed_from_u64(today.num_days_from_ce() as u64);
    let mut series = DailySeries::new();

    for offset in 0..SAMPLE_DAYS {
        let date = today - Duration::days(SAMPLE_DAYS - 1 - offset);
        let phase = offset as f64;

        let weekly = (TAU * phase / 7.0).sin();
        let biweekly = (TAU * phase / 14.0).sin();

        let views = counter(40.0 + 18.0 * weekly + 10.0 * biweekly, 8.0, &mut rng);
        let visitors = counter(14.0 + 6.0 * weekly, 4.0, &mut rng).min(views);
        let clones = counter(8.0 + 4.0 * biweekly, 3.0, &mut rng);
        let cloners = counter(3.0 + 1.5 * biweekly, 2.0, &mut rng).min(clones);

        series.insert(
            date.format("%Y-%m-%d").to_string(),
            DailyRecord {
                views,
                unique_visitors: visitors,
                clones,
                unique_cloners: cloners,
                timestamp: None,
            },
        );
    }

    series
}

fn counter(base: f64, jitter: f64, rng: &mut StdRng) -> u64 {
    (base + rng.gen_range(-jitter..=jitter)).max(0.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_series_has_ninety_days() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let series = synthetic_series(today);

        assert_eq!(series.len(), SAMPLE_DAYS as usize);
        assert_eq!(series.keys().last().map(String::as_str), Some("2026-08-26"));
        assert_eq!(series.keys().next().map(String::as_str), Some("2026-05-29"));
    }

    #[test]
    fn synthetic_series_is_deterministic_for_a_date() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(synthetic_series(today), synthetic_series(today));
    }

    #[test]
    fn synthetic_uniques_never_exceed_totals() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        for record in synthetic_series(today).values() {
            assert!(record.unique_visitors <= record.views);
            assert!(record.unique_cloners <= record.clones);
        }
    }
}
