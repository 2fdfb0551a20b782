use crate::{
    dataforseo::format_count,
    error::Result,
    models::{DomainMetrics, DomainQuery},
    traits::MetricsSource,
};
use std::io::Write;

pub const NO_RESULTS: &str = "No results found";

/// Metric lines for each result, or the single `No results found` line.
pub fn render_metrics(metrics: &[DomainMetrics]) -> Vec<String> {
    if metrics.is_empty() {
        return vec![NO_RESULTS.to_string()];
    }

    metrics
        .iter()
        .flat_map(|m| {
            [
                format!("organic_traffic: {}", format_count(Some(m.organic_traffic))),
                format!("keywords: {}", format_count(Some(m.keywords))),
                format!("top_3_positions: {}", m.top_3_positions),
            ]
        })
        .collect()
}

pub fn render_overview(query: &DomainQuery, metrics: &[DomainMetrics]) -> Vec<String> {
    let mut lines = vec![
        format!("domain: {}", query.target),
        format!("location: {}", query.location_code),
    ];
    lines.extend(render_metrics(metrics));
    lines
}

/// Queries `source` once and writes the overview to `out`.
pub async fn domain_overview<W: Write>(
    source: &dyn MetricsSource,
    query: &DomainQuery,
    out: &mut W,
) -> Result<Vec<DomainMetrics>> {
    let metrics = source.domain_metrics(query).await?;
    for line in render_overview(query, &metrics) {
        writeln!(out, "{}", line)?;
    }
    Ok(metrics)
}
