use crate::models::DailySeries;

pub const CSV_HEADER: &str = "Date,Views,Unique Visitors,Clones,Unique Cloners";

/// Render a series as CSV, one row per date in ascending order.
///
/// Every value is an ISO date or a plain integer, so no quoting or
/// escaping is ever needed.
pub fn series_to_csv(series: &DailySeries) -> String {
    let mut lines = Vec::with_capacity(series.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for (date, record) in series {
        lines.push(format!(
            "{date},{},{},{},{}",
            record.views, record.unique_visitors, record.clones, record.unique_cloners
        ));
    }
    lines.join("\n")
}
