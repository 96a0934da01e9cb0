use crate::models::{
    DailyRecord, DailySeries, MonthTotals, RankedReferrer, RawYearlyData, ReferrerCounts,
    SummaryStats,
};
use std::collections::BTreeMap;
use tracing::warn;

/// How many referrers the dashboard displays.
pub const TOP_REFERRERS: usize = 6;

/// Flatten year -> date -> fields into a single date-keyed series.
///
/// Years are processed in ascending key order. If the same date string
/// shows up under two different years (a malformed source document), the
/// later year wins; the collision is logged rather than silently absorbed.
pub fn normalize(raw: &RawYearlyData) -> DailySeries {
    let mut series = DailySeries::new();
    for (year, days) in raw {
        for (date, record) in days {
            if series.insert(date.clone(), record.clone()).is_some() {
                warn!("duplicate date {date} under year {year}, keeping later entry");
            }
        }
    }
    series
}

/// Sum the four counters across a series. Pure and order-independent;
/// an empty series yields the all-zero summary with no peak day.
pub fn summarize(series: &DailySeries) -> SummaryStats {
    let mut stats = SummaryStats::default();
    let mut peak: Option<(&str, u64)> = None;

    for (date, record) in series {
        stats.total_views += record.views;
        stats.total_visitors += record.unique_visitors;
        stats.total_clones += record.clones;
        stats.total_unique_cloners += record.unique_cloners;
        match peak {
            Some((_, views)) if views >= record.views => {}
            _ => peak = Some((date, record.views)),
        }
    }

    stats.days_with_data = series.len();
    if !series.is_empty() {
        stats.avg_daily_views = stats.total_views as f64 / series.len() as f64;
        stats.avg_daily_visitors = stats.total_visitors as f64 / series.len() as f64;
    }
    if let Some((date, views)) = peak {
        stats.peak_views_day = Some(date.to_string());
        stats.peak_views_count = views;
    }
    stats
}

/// Accumulate daily records into `YYYY-MM` buckets by truncating each
/// date key to its first seven characters. BTreeMap keys keep the
/// buckets in chronological order for free.
pub fn monthly_rollup(series: &DailySeries) -> BTreeMap<String, MonthTotals> {
    let mut months: BTreeMap<String, MonthTotals> = BTreeMap::new();
    for (date, record) in series {
        let month = date.get(..7).unwrap_or(date.as_str());
        let bucket = months.entry(month.to_string()).or_default();
        bucket.views += record.views;
        bucket.unique_visitors += record.unique_visitors;
        bucket.clones += record.clones;
        bucket.unique_cloners += record.unique_cloners;
        bucket.days_count += 1;
    }
    months
}

/// Rank referrers by count descending and keep the top six.
///
/// The sort is stable, so equal counts keep the map's enumeration order
/// (alphabetical, which is also deterministic across runs). Percentages
/// are relative to the largest count among all referrers, not just the
/// kept slice; an empty input returns an empty ranking without ever
/// dividing by zero.
pub fn rank_referrers(counts: &ReferrerCounts) -> Vec<RankedReferrer> {
    let Some(max) = counts.values().copied().max().filter(|&m| m > 0) else {
        return Vec::new();
    };

    let mut entries: Vec<(&String, u64)> = counts.iter().map(|(k, &v)| (k, v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(TOP_REFERRERS);

    entries
        .into_iter()
        .map(|(referrer, count)| RankedReferrer {
            referrer: referrer.clone(),
            count,
            percentage: 100.0 * count as f64 / max as f64,
        })
        .collect()
}

/// Keep only the dates within the inclusive `[from, to]` range. Used for
/// display filtering and CSV export; `None` bounds are open ends.
pub fn filter_series(
    series: &DailySeries,
    from: Option<&str>,
    to: Option<&str>,
) -> DailySeries {
    series
        .iter()
        .filter(|(date, _)| {
            from.is_none_or(|f| date.as_str() >= f) && to.is_none_or(|t| date.as_str() <= t)
        })
        .map(|(date, record)| (date.clone(), record.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(views: u64, visitors: u64, clones: u64, cloners: u64) -> DailyRecord {
        DailyRecord {
            views,
            unique_visitors: visitors,
            clones,
            unique_cloners: cloners,
            timestamp: None,
        }
    }

    fn raw_from_json(json: &str) -> RawYearlyData {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn normalize_fills_missing_fields_with_zero() {
        let raw = raw_from_json(
            r#"{"2024": {"2024-01-01": {"views": 5}, "2024-01-02": {"views": 3, "clones": 1}}}"#,
        );
        let series = normalize(&raw);

        assert_eq!(series.len(), 2);
        assert_eq!(series["2024-01-01"], record(5, 0, 0, 0));
        assert_eq!(series["2024-01-02"], record(3, 0, 1, 0));
    }

    #[test]
    fn normalize_empty_input_yields_empty_series() {
        assert!(normalize(&RawYearlyData::new()).is_empty());
    }

    #[test]
    fn normalize_duplicate_date_keeps_later_year() {
        let mut raw = RawYearlyData::new();
        raw.entry("2023".to_string())
            .or_default()
            .insert("2024-01-01".to_string(), record(1, 0, 0, 0));
        raw.entry("2024".to_string())
            .or_default()
            .insert("2024-01-01".to_string(), record(9, 0, 0, 0));

        let series = normalize(&raw);
        assert_eq!(series.len(), 1);
        assert_eq!(series["2024-01-01"].views, 9);
    }

    #[test]
    fn summarize_totals_and_peak() {
        let raw = raw_from_json(
            r#"{"2024": {"2024-01-01": {"views": 5}, "2024-01-02": {"views": 3, "clones": 1}}}"#,
        );
        let summary = summarize(&normalize(&raw));

        assert_eq!(summary.total_views, 8);
        assert_eq!(summary.total_visitors, 0);
        assert_eq!(summary.total_clones, 1);
        assert_eq!(summary.total_unique_cloners, 0);
        assert_eq!(summary.days_with_data, 2);
        assert_eq!(summary.avg_daily_views, 4.0);
        assert_eq!(summary.peak_views_day.as_deref(), Some("2024-01-01"));
        assert_eq!(summary.peak_views_count, 5);
    }

    #[test]
    fn summarize_empty_series_is_all_zero() {
        let summary = summarize(&DailySeries::new());
        assert_eq!(summary, SummaryStats::default());
        assert!(summary.peak_views_day.is_none());
    }

    #[test]
    fn monthly_rollup_buckets_by_month_prefix() {
        let mut series = DailySeries::new();
        series.insert("2024-01-01".to_string(), record(5, 2, 0, 0));
        series.insert("2024-01-02".to_string(), record(3, 1, 1, 1));
        series.insert("2024-02-10".to_string(), record(7, 0, 2, 0));

        let months = monthly_rollup(&series);
        assert_eq!(months.len(), 2);
        assert_eq!(
            months["2024-01"],
            MonthTotals {
                views: 8,
                unique_visitors: 3,
                clones: 1,
                unique_cloners: 1,
                days_count: 2,
            }
        );
        assert_eq!(months["2024-02"].views, 7);
        assert_eq!(months["2024-02"].days_count, 1);
    }

    #[test]
    fn monthly_rollup_conserves_totals() {
        let mut series = DailySeries::new();
        series.insert("2023-12-31".to_string(), record(4, 3, 2, 1));
        series.insert("2024-01-15".to_string(), record(10, 5, 0, 0));
        series.insert("2024-03-01".to_string(), record(6, 0, 7, 2));

        let summary = summarize(&series);
        let months = monthly_rollup(&series);

        let views: u64 = months.values().map(|m| m.views).sum();
        let visitors: u64 = months.values().map(|m| m.unique_visitors).sum();
        let clones: u64 = months.values().map(|m| m.clones).sum();
        let cloners: u64 = months.values().map(|m| m.unique_cloners).sum();

        assert_eq!(views, summary.total_views);
        assert_eq!(visitors, summary.total_visitors);
        assert_eq!(clones, summary.total_clones);
        assert_eq!(cloners, summary.total_unique_cloners);
    }

    #[test]
    fn rank_referrers_stable_ties_and_global_max() {
        let counts: ReferrerCounts =
            [("a".to_string(), 10), ("b".to_string(), 10), ("c".to_string(), 5)]
                .into_iter()
                .collect();

        let ranked = rank_referrers(&counts);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].referrer, "a");
        assert_eq!(ranked[0].percentage, 100.0);
        assert_eq!(ranked[1].referrer, "b");
        assert_eq!(ranked[1].percentage, 100.0);
        assert_eq!(ranked[2].referrer, "c");
        assert_eq!(ranked[2].percentage, 50.0);
    }

    #[test]
    fn rank_referrers_truncates_to_top_six_but_keeps_global_max() {
        let counts: ReferrerCounts = (0..9)
            .map(|i| (format!("site{i}.example"), 10 + i as u64))
            .collect();

        let ranked = rank_referrers(&counts);
        assert_eq!(ranked.len(), TOP_REFERRERS);
        assert_eq!(ranked[0].count, 18);
        assert_eq!(ranked[0].percentage, 100.0);
        // Entries below the cut still set the denominator for everyone.
        assert_eq!(ranked[5].count, 13);
        assert!((ranked[5].percentage - 100.0 * 13.0 / 18.0).abs() < 1e-9);
    }

    #[test]
    fn rank_referrers_empty_input_is_empty() {
        assert!(rank_referrers(&ReferrerCounts::new()).is_empty());
    }

    #[test]
    fn filter_series_inclusive_bounds() {
        let mut series = DailySeries::new();
        for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            series.insert(day.to_string(), record(1, 0, 0, 0));
        }

        let filtered = filter_series(&series, Some("2024-01-02"), Some("2024-01-03"));
        assert_eq!(
            filtered.keys().collect::<Vec<_>>(),
            vec!["2024-01-02", "2024-01-03"]
        );
        assert_eq!(filter_series(&series, None, None).len(), 3);
    }
}
