use crate::metrics::{monthly_rollup, normalize, rank_referrers, summarize};
use crate::models::{Dashboard, DailySeries, DataOrigin, ReferrerCounts};
use crate::sample::synthetic_series;
use crate::source::{DataSource, Fetched};
use chrono::{Local, Utc};
use tracing::{info, warn};

/// Load one repository's dashboard snapshot.
///
/// The fallback branches are explicit: a missing or broken traffic
/// document yields a synthetic series (marked as such in the snapshot),
/// and a broken referrers document yields an empty ranking. Neither
/// aborts the load; there are no retries.
pub async fn load_dashboard(source: &DataSource, owner: &str, name: &str) -> Dashboard {
    let repository = format!("{owner}/{name}");

    let (series, origin) = match source.fetch_traffic(owner, name).await {
        Ok(Fetched::Live(raw)) => (normalize(&raw), DataOrigin::Live),
        Ok(Fetched::Missing) => {
            info!("no traffic data for {repository}, using synthetic sample");
            (synthetic_series(Local::now().date_naive()), DataOrigin::Synthetic)
        }
        Err(err) => {
            warn!("traffic load failed for {repository}: {err}, using synthetic sample");
            (synthetic_series(Local::now().date_naive()), DataOrigin::Synthetic)
        }
    };

    let referrers = match source.fetch_referrers(owner, name).await {
        Ok(counts) => counts,
        Err(err) => {
            warn!("referrer load failed for {repository}: {err}, continuing without");
            ReferrerCounts::new()
        }
    };

    build_dashboard(repository, origin, series, &referrers)
}

/// Assemble the snapshot from an already-normalized series. Pure; every
/// derived structure is rebuilt from scratch.
pub fn build_dashboard(
    repository: String,
    origin: DataOrigin,
    series: DailySeries,
    referrers: &ReferrerCounts,
) -> Dashboard {
    Dashboard {
        summary: summarize(&series),
        monthly: monthly_rollup(&series),
        referrers: rank_referrers(referrers),
        generated_at: Utc::now().to_rfc3339(),
        repository,
        origin,
        series,
    }
}
