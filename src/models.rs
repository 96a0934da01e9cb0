use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day's traffic counters. Missing fields in the source document
/// deserialize to zero; negative or fractional values are rejected by the
/// u64 typing and surface as a parse error on the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DailyRecord {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub unique_visitors: u64,
    #[serde(default)]
    pub clones: u64,
    #[serde(default)]
    pub unique_cloners: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Flat date-keyed series. Keys are `YYYY-MM-DD`, so lexicographic map
/// order equals chronological order.
pub type DailySeries = BTreeMap<String, DailyRecord>;

/// Raw source document: year -> date -> partial daily fields.
pub type RawYearlyData = BTreeMap<String, BTreeMap<String, DailyRecord>>;

/// Referrer domain -> visit count, as served by the referrers document.
pub type ReferrerCounts = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SummaryStats {
    pub total_views: u64,
    pub total_visitors: u64,
    pub total_clones: u64,
    pub total_unique_cloners: u64,
    pub days_with_data: usize,
    pub avg_daily_views: f64,
    pub avg_daily_visitors: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_views_day: Option<String>,
    pub peak_views_count: u64,
}

/// Per-month accumulator for the monthly rollup, keyed by `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct MonthTotals {
    pub views: u64,
    pub unique_visitors: u64,
    pub clones: u64,
    pub unique_cloners: u64,
    pub days_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedReferrer {
    pub referrer: String,
    pub count: u64,
    /// Share of the single largest referrer across *all* referrers, not
    /// just the displayed top slice.
    pub percentage: f64,
}

/// Where the current snapshot's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Live,
    Synthetic,
}

/// Everything the dashboard renders for one repository. Rebuilt from
/// scratch on every load and swapped into shared state wholesale.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub repository: String,
    pub origin: DataOrigin,
    pub series: DailySeries,
    pub summary: SummaryStats,
    pub monthly: BTreeMap<String, MonthTotals>,
    pub referrers: Vec<RankedReferrer>,
    pub generated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectRepositoryRequest {
    pub repository: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}
