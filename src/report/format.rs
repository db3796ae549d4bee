//! Formatted terminal output.
//!
//! Formatting lives here so the pipeline code stays free of presentation and
//! output changes stay localized.

use std::collections::HashSet;

use crate::domain::{PipelineResult, RawRecord};
use crate::prep::parse_date;
use crate::report::{FitLabel, Trend, forecast_rows};

/// Format the run summary: dataset stats, drop breakdown and fitted trend.
pub fn format_run_summary(source: &str, result: &PipelineResult) -> String {
    let data = &result.data;
    let s = &data.summary;
    let m = &result.regression;
    let mut out = String::new();

    out.push_str(&format!("=== sf - Sales Trend Forecast: {source} ===\n"));
    out.push_str(&format!(
        "Records: raw={} valid={} dropped={}\n",
        s.raw_count, s.valid_count, data.dropped_count
    ));
    for (reason, count) in &data.drop_reasons {
        out.push_str(&format!("  - {}: {count}\n", reason.label()));
    }
    out.push_str(&format!(
        "Revenue: total={:.2} avg/record={:.2} | products={}\n",
        s.total_revenue, s.average_revenue, s.product_count
    ));
    out.push_str(&format!(
        "Dates: {} .. {} | daily points={}\n",
        s.date_range.start,
        s.date_range.end,
        data.series.len()
    ));

    out.push_str("\nModel:\n");
    out.push_str(&format!(
        "- revenue = {:.2} + {:.2} x day\n",
        m.intercept, m.slope
    ));
    out.push_str(&format!(
        "- R^2 = {:.4} ({} fit)\n",
        m.r_squared,
        FitLabel::from_r_squared(m.r_squared).as_str()
    ));
    out.push_str(&format!(
        "- trend: {} by {:.2} per day\n",
        Trend::from_slope(m.slope).as_str(),
        m.slope.abs()
    ));
    out.push_str(&format!(
        "- expected revenue over next {} days: {:.2}\n",
        m.forecasts.len(),
        m.expected_revenue()
    ));

    out
}

/// Format the forecast table.
///
/// Rows where the projection was negative (and clamped to 0) are marked `*`.
pub fn format_forecast_table(result: &PipelineResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}-day forecast:\n", result.regression.forecasts.len()));
    out.push_str(&format!(
        "{:<10} {:<3} {:>6} {:>14} {:>12} {:>8}\n",
        "date", "dow", "day", "revenue", "change", "change%"
    ));
    out.push_str(&format!(
        "{:-<10} {:-<3} {:-<6} {:-<14} {:-<12} {:-<8}\n",
        "", "", "", "", "", ""
    ));

    for row in forecast_rows(&result.regression) {
        let p = row.point;
        let line = format!(
            "{:<10} {:<3} {:>6} {:>14.2} {:>+12.2} {:>+7.1}%{}",
            p.date,
            p.date.format("%a").to_string(),
            p.x,
            p.y,
            row.change,
            row.change_pct,
            if row.clamped { " *" } else { "" }
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Format a preview of raw records before processing.
pub fn format_preview(source: &str, records: &[RawRecord], max_rows: usize) -> String {
    let mut out = String::new();

    let products: HashSet<&str> = records.iter().filter_map(|r| r.product.as_deref()).collect();
    let dates: Vec<_> = records
        .iter()
        .filter_map(|r| r.date.as_deref().and_then(parse_date))
        .collect();

    out.push_str(&format!("=== sf - Preview: {source} ===\n"));
    out.push_str(&format!(
        "Rows: {} | products: {}\n",
        records.len(),
        products.len()
    ));
    match (dates.iter().min(), dates.iter().max()) {
        (Some(start), Some(end)) => out.push_str(&format!("Dates: {start} .. {end}\n")),
        _ => out.push_str("Dates: (none parseable)\n"),
    }
    out.push('\n');

    out.push_str(&format!(
        "{:<12} {:<20} {:>10} {:>12}\n",
        "date", "product", "quantity", "revenue"
    ));
    out.push_str(&format!("{:-<12} {:-<20} {:-<10} {:-<12}\n", "", "", "", ""));

    for r in records.iter().take(max_rows) {
        let line = format!(
            "{:<12} {:<20} {:>10} {:>12}",
            truncate(r.date.as_deref().unwrap_or("-"), 12),
            truncate(r.product.as_deref().unwrap_or("-"), 20),
            fmt_opt(r.quantity),
            fmt_opt(r.revenue),
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    if records.len() > max_rows {
        out.push_str(&format!("... {} more rows\n", records.len() - max_rows));
    }

    out
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        Some(_) => "NaN".to_string(),
        None => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
